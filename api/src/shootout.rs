//! Alternating-turn penalty shootout.
//!
//! Team 1 opens every round. There is no early stop once a side can no longer
//! be caught: kicks keep being accepted for as long as the operator records them.

use crate::TeamIndex;
use crate::error::{MatchError, MatchResult};

/// Whose kick is next, from the kick counts alone.
///
/// Equal counts: team 1. Team 1 one ahead: team 2. Team 2 ahead (only reachable
/// by undoing a team 1 kick): nobody, until team 2's extra kick is undone too.
pub fn next_kicker(team1: &[bool], team2: &[bool]) -> Option<TeamIndex> {
    if team1.len() == team2.len() {
        Some(TeamIndex::One)
    } else if team1.len() > team2.len() {
        Some(TeamIndex::Two)
    } else {
        None
    }
}

/// Converted kicks.
pub fn penalty_score(kicks: &[bool]) -> usize {
    kicks.iter().filter(|scored| **scored).count()
}

/// Append a kick for `team`, provided it is that team's turn.
pub fn record_kick(
    team1: &mut Vec<bool>,
    team2: &mut Vec<bool>,
    team: TeamIndex,
    scored: bool,
) -> MatchResult<()> {
    let expected = next_kicker(team1, team2);
    if expected != Some(team) {
        return Err(MatchError::TurnViolation { team, expected });
    }
    match team {
        TeamIndex::One => team1.push(scored),
        TeamIndex::Two => team2.push(scored),
    }
    Ok(())
}

/// Drop the last kick of `team`, whoever is up. Returns the removed outcome.
pub fn undo_last_kick(kicks: &mut Vec<bool>, team: TeamIndex) -> MatchResult<bool> {
    kicks.pop().ok_or(MatchError::EmptySequence { team })
}
