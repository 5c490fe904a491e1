pub mod commentary;
pub mod error;
pub mod events;
pub mod gemini;
pub mod lineup;
pub mod setup;
pub mod shootout;
pub mod standings;
pub mod stats;
pub mod status;

pub use error::{MatchError, MatchResult};
pub use events::{EventKind, EventLog, MatchEvent};
pub use lineup::{Lineup, Player};
pub use commentary::CommentaryClient;
pub use setup::{MatchSetup, SetupError, TeamSetup};
pub use standings::{RowField, Standings, TableGroup, TableRow};
pub use stats::{MatchStats, StatKind};
pub use status::{MatchStatus, status_label};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_MINUTE: u8 = 0;
pub const MAX_MINUTE: u8 = 120;
/// Minutes beyond this mean extra time was played.
pub const REGULAR_TIME: u8 = 90;

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// Side of the pitch. Serialized as the plain integer 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamIndex {
    One,
    Two,
}

impl TeamIndex {
    pub const BOTH: [TeamIndex; 2] = [TeamIndex::One, TeamIndex::Two];

    pub fn number(self) -> u8 {
        match self {
            TeamIndex::One => 1,
            TeamIndex::Two => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            TeamIndex::One => TeamIndex::Two,
            TeamIndex::Two => TeamIndex::One,
        }
    }

    /// Zero-based slot into `[team 1, team 2]` pairs.
    pub fn slot(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl fmt::Display for TeamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", self.number())
    }
}

impl From<TeamIndex> for u8 {
    fn from(team: TeamIndex) -> Self {
        team.number()
    }
}

impl TryFrom<u8> for TeamIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TeamIndex::One),
            2 => Ok(TeamIndex::Two),
            other => Err(format!("team index must be 1 or 2, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Path or URL of the crest image; resolved by whoever renders it.
    pub logo: String,
    pub score: u32,
    /// Shootout kicks in order, `true` = scored.
    pub penalties: Vec<bool>,
}

impl Team {
    pub fn new(name: impl Into<String>, logo: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo: logo.into(),
            ..Self::default()
        }
    }

    pub fn penalty_score(&self) -> usize {
        shootout::penalty_score(&self.penalties)
    }
}

/// Partial team edit from the control panel. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub score: Option<u32>,
}

impl TeamUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn logo(logo: impl Into<String>) -> Self {
        Self {
            logo: Some(logo.into()),
            ..Self::default()
        }
    }

    pub fn score(score: u32) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Match record
// ---------------------------------------------------------------------------

/// The one match being tracked. Every operator action goes through a method
/// on this record; callers own it and hand out snapshots to readers.
///
/// `score` has two writers: `record_goal` (which also logs a GOAL) and direct
/// overrides through `update_team` / `adjust_score` (which do not). The score
/// is therefore not guaranteed to equal the number of logged goals; see
/// [`MatchState::score_matches_log`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub team1: Team,
    pub team2: Team,
    pub competition: String,
    pub stadium: String,
    pub minute: u8,
    pub is_timer_running: bool,
    pub status: MatchStatus,
    pub events: EventLog,
}

impl Default for MatchState {
    fn default() -> Self {
        MatchSetup::default().initial_state()
    }
}

impl MatchState {
    pub fn new(
        team1: Team,
        team2: Team,
        competition: impl Into<String>,
        stadium: impl Into<String>,
    ) -> Self {
        Self {
            team1,
            team2,
            competition: competition.into(),
            stadium: stadium.into(),
            minute: MIN_MINUTE,
            is_timer_running: false,
            status: MatchStatus::Live,
            events: EventLog::new(),
        }
    }

    pub fn team(&self, team: TeamIndex) -> &Team {
        match team {
            TeamIndex::One => &self.team1,
            TeamIndex::Two => &self.team2,
        }
    }

    fn team_mut(&mut self, team: TeamIndex) -> &mut Team {
        match team {
            TeamIndex::One => &mut self.team1,
            TeamIndex::Two => &mut self.team2,
        }
    }

    /// Read-only copy for renderers and the commentary worker.
    pub fn snapshot(&self) -> MatchState {
        self.clone()
    }

    /// Full reinitialization to the built-in defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // -----------------------------------------------------------------------
    // Phase and clock
    // -----------------------------------------------------------------------

    /// Move to the next phase. A finished match stays finished.
    pub fn advance_status(&mut self) -> MatchStatus {
        if let Some(next) = self.status.next() {
            info!("status {} -> {}", self.status.code(), next.code());
            self.status = next;
        }
        self.status
    }

    /// Set the match minute, clamping into `0..=120`. Returns the minute applied.
    pub fn set_minute(&mut self, minute: i32) -> u8 {
        let clamped = minute.clamp(i32::from(MIN_MINUTE), i32::from(MAX_MINUTE));
        if clamped != minute {
            warn!(
                "minute clamped to {clamped}: {}",
                MatchError::InvalidRange {
                    value: i64::from(minute),
                    min: i64::from(MIN_MINUTE),
                    max: i64::from(MAX_MINUTE),
                }
            );
        }
        // In range after the clamp above.
        self.minute = u8::try_from(clamped).unwrap_or(MAX_MINUTE);
        self.minute
    }

    pub fn set_timer_running(&mut self, running: bool) {
        self.is_timer_running = running;
    }

    pub fn toggle_timer(&mut self) -> bool {
        self.is_timer_running = !self.is_timer_running;
        self.is_timer_running
    }

    /// One beat of the external match clock. Returns whether the minute moved.
    pub fn tick_minute(&mut self) -> bool {
        if !self.is_timer_running || self.minute >= MAX_MINUTE {
            return false;
        }
        self.minute += 1;
        true
    }

    pub fn status_label(&self) -> String {
        status_label(
            self.status,
            self.minute,
            (self.team1.penalties.len(), self.team2.penalties.len()),
        )
    }

    // -----------------------------------------------------------------------
    // Teams and scoring
    // -----------------------------------------------------------------------

    pub fn update_team(&mut self, team: TeamIndex, update: TeamUpdate) {
        let t = self.team_mut(team);
        if let Some(name) = update.name {
            t.name = name;
        }
        if let Some(logo) = update.logo {
            t.logo = logo;
        }
        if let Some(score) = update.score {
            t.score = score;
        }
    }

    /// Operator +/- on a score. Increments are recorded as goals, decrements
    /// are a plain correction that leaves the event log untouched.
    pub fn adjust_score(&mut self, team: TeamIndex, delta: i32) -> u32 {
        if delta > 0 {
            for _ in 0..delta {
                self.record_goal(team, None);
            }
        } else if delta < 0 {
            let score = self.team(team).score.saturating_add_signed(delta);
            self.update_team(team, TeamUpdate::score(score));
        }
        self.team(team).score
    }

    /// Log a GOAL at the current minute and add exactly one to the score.
    pub fn record_goal(&mut self, team: TeamIndex, player: Option<String>) -> &MatchEvent {
        let t = self.team_mut(team);
        t.score = t.score.saturating_add(1);
        debug!("goal for {team} at {}'", self.minute);
        let minute = self.minute;
        self.events.append(EventKind::Goal, team, minute, player)
    }

    /// Log-only entry at the current minute. Scores are not touched, even for
    /// a GOAL.
    pub fn add_event(
        &mut self,
        kind: EventKind,
        team: TeamIndex,
        player: Option<String>,
    ) -> &MatchEvent {
        let minute = self.minute;
        self.events.append(kind, team, minute, player)
    }

    pub fn remove_event(&mut self, id: &str) -> MatchResult<MatchEvent> {
        self.events
            .remove(id)
            .ok_or_else(|| MatchError::UnknownEvent(id.to_string()))
    }

    /// Whether the score still equals the logged goals for that side.
    pub fn score_matches_log(&self, team: TeamIndex) -> bool {
        self.events.goals_for(team) == self.team(team).score as usize
    }

    // -----------------------------------------------------------------------
    // Shootout
    // -----------------------------------------------------------------------

    pub fn next_kicker(&self) -> Option<TeamIndex> {
        shootout::next_kicker(&self.team1.penalties, &self.team2.penalties)
    }

    pub fn record_penalty_kick(&mut self, team: TeamIndex, scored: bool) -> MatchResult<()> {
        shootout::record_kick(
            &mut self.team1.penalties,
            &mut self.team2.penalties,
            team,
            scored,
        )
    }

    pub fn undo_penalty_kick(&mut self, team: TeamIndex) -> MatchResult<bool> {
        shootout::undo_last_kick(&mut self.team_mut(team).penalties, team)
    }

    pub fn penalty_score(&self, team: TeamIndex) -> usize {
        self.team(team).penalty_score()
    }

    /// Winner of a finished match: goals first, then the shootout.
    pub fn winner(&self) -> Option<TeamIndex> {
        if self.status != MatchStatus::Finished {
            return None;
        }
        let key = |t: TeamIndex| (self.team(t).score, self.penalty_score(t));
        match key(TeamIndex::One).cmp(&key(TeamIndex::Two)) {
            std::cmp::Ordering::Greater => Some(TeamIndex::One),
            std::cmp::Ordering::Less => Some(TeamIndex::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> MatchState {
        MatchState::new(Team::new("Reds", ""), Team::new("Blues", ""), "Cup", "Arena")
    }

    #[test]
    fn team_index_round_trips_as_integer() {
        assert_eq!(serde_json::to_string(&TeamIndex::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<TeamIndex>("1").unwrap(), TeamIndex::One);
        assert!(serde_json::from_str::<TeamIndex>("3").is_err());
        assert_eq!(TeamIndex::One.other(), TeamIndex::Two);
        assert_eq!(TeamIndex::Two.slot(), 1);
    }

    #[test]
    fn record_goal_logs_and_scores_together() {
        let mut state = fresh();
        state.set_minute(23);
        let event = state.record_goal(TeamIndex::One, Some("Nine".into())).clone();
        assert_eq!(event.kind, EventKind::Goal);
        assert_eq!(event.team_index, TeamIndex::One);
        assert_eq!(event.minute, 23);
        assert_eq!(state.team1.score, 1);
        assert_eq!(state.team2.score, 0);
        assert_eq!(state.events.len(), 1);
        assert!(state.score_matches_log(TeamIndex::One));
    }

    #[test]
    fn goal_on_a_maxed_score_still_logs() {
        let mut state = fresh();
        state.update_team(TeamIndex::One, TeamUpdate::score(u32::MAX));
        state.record_goal(TeamIndex::One, None);
        assert_eq!(state.team1.score, u32::MAX);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn overrides_bypass_the_log() {
        let mut state = fresh();
        state.record_goal(TeamIndex::Two, None);
        assert_eq!(state.adjust_score(TeamIndex::Two, -1), 0);
        assert_eq!(state.adjust_score(TeamIndex::Two, -1), 0, "score never goes below zero");
        assert_eq!(state.events.len(), 1);
        assert!(!state.score_matches_log(TeamIndex::Two));

        state.update_team(TeamIndex::One, TeamUpdate::score(4));
        assert_eq!(state.team1.score, 4);
        assert!(state.events.iter().all(|e| e.team_index == TeamIndex::Two));
    }

    #[test]
    fn positive_adjustment_goes_through_record_goal() {
        let mut state = fresh();
        assert_eq!(state.adjust_score(TeamIndex::One, 2), 2);
        assert_eq!(state.events.goals_for(TeamIndex::One), 2);
    }

    #[test]
    fn add_event_does_not_touch_scores() {
        let mut state = fresh();
        state.set_minute(60);
        state.add_event(EventKind::YellowCard, TeamIndex::One, None);
        state.add_event(EventKind::YellowCard, TeamIndex::One, None);
        state.add_event(EventKind::Goal, TeamIndex::Two, None);
        assert_eq!((state.team1.score, state.team2.score), (0, 0));
        assert_eq!(state.events.len(), 3);
        assert!(state.events.iter().all(|e| e.minute == 60));
    }

    #[test]
    fn update_team_applies_only_given_fields() {
        let mut state = fresh();
        state.update_team(TeamIndex::Two, TeamUpdate::name("Greens"));
        state.update_team(TeamIndex::Two, TeamUpdate::logo("crest.png"));
        assert_eq!(state.team2.name, "Greens");
        assert_eq!(state.team2.logo, "crest.png");
        assert_eq!(state.team2.score, 0);
    }

    #[test]
    fn minute_is_clamped() {
        let mut state = fresh();
        assert_eq!(state.set_minute(150), 120);
        assert_eq!(state.set_minute(-5), 0);
        assert_eq!(state.set_minute(45), 45);
        assert_eq!(state.minute, 45);
    }

    #[test]
    fn clock_ticks_only_while_running_and_stops_at_120() {
        let mut state = fresh();
        assert!(!state.tick_minute());
        state.set_timer_running(true);
        assert!(state.tick_minute());
        assert_eq!(state.minute, 1);
        state.set_minute(120);
        assert!(!state.tick_minute());
        assert_eq!(state.minute, 120);
        assert!(!state.toggle_timer());
    }

    #[test]
    fn advance_is_a_no_op_once_finished() {
        let mut state = fresh();
        for _ in 0..5 {
            state.advance_status();
        }
        assert_eq!(state.status, MatchStatus::Finished);
        assert_eq!(state.advance_status(), MatchStatus::Finished);
    }

    #[test]
    fn goal_then_phases_then_out_of_phase_kick() {
        let mut state = fresh();
        state.record_goal(TeamIndex::One, None);
        assert_eq!((state.team1.score, state.team2.score), (1, 0));
        assert_eq!(state.events.iter().next().map(|e| e.minute), Some(0));
        assert_eq!(state.advance_status(), MatchStatus::FullTime);
        assert_eq!(state.advance_status(), MatchStatus::ExtraTime);
        // Phase and shootout are tracked independently; only turn order is enforced.
        assert!(matches!(
            state.record_penalty_kick(TeamIndex::Two, true),
            Err(MatchError::TurnViolation { .. })
        ));
        state.record_penalty_kick(TeamIndex::One, true).unwrap();
        state.record_penalty_kick(TeamIndex::Two, true).unwrap();
        assert_eq!(state.status, MatchStatus::ExtraTime);
    }

    #[test]
    fn shootout_without_sudden_death_cutoff() {
        let mut state = fresh();
        state.status = MatchStatus::Penalties;
        for _ in 0..3 {
            state.record_penalty_kick(TeamIndex::One, true).unwrap();
            state.record_penalty_kick(TeamIndex::Two, true).unwrap();
        }
        assert_eq!(state.penalty_score(TeamIndex::One), 3);
        assert_eq!(state.penalty_score(TeamIndex::Two), 3);
        // Team 1 misses twice and team 2 scores twice: decided, yet kicks continue.
        for _ in 0..3 {
            state.record_penalty_kick(TeamIndex::One, false).unwrap();
            state.record_penalty_kick(TeamIndex::Two, true).unwrap();
        }
        assert_eq!(state.team1.penalties.len(), 6);
        assert_eq!(state.next_kicker(), Some(TeamIndex::One));
    }

    #[test]
    fn undo_penalty_kick_is_not_turn_gated() {
        let mut state = fresh();
        assert_eq!(
            state.undo_penalty_kick(TeamIndex::One),
            Err(MatchError::EmptySequence { team: TeamIndex::One })
        );
        state.record_penalty_kick(TeamIndex::One, false).unwrap();
        state.record_penalty_kick(TeamIndex::Two, true).unwrap();
        assert_eq!(state.undo_penalty_kick(TeamIndex::One), Ok(false));
        assert_eq!(state.team1.penalties, Vec::<bool>::new());
        assert_eq!(state.team2.penalties, vec![true]);
    }

    #[test]
    fn finished_labels_and_winner() {
        let mut state = fresh();
        state.status = MatchStatus::Finished;
        state.set_minute(90);
        assert_eq!(state.status_label(), "Full Time");
        assert_eq!(state.winner(), None);

        state.set_minute(120);
        assert_eq!(state.status_label(), "FT (AET)");

        state.team2.penalties = vec![true];
        assert_eq!(state.status_label(), "FT (AP)");
        assert_eq!(state.winner(), Some(TeamIndex::Two));

        state.team1.score = 1;
        assert_eq!(state.winner(), Some(TeamIndex::One));
    }

    #[test]
    fn winner_is_only_known_at_the_end() {
        let mut state = fresh();
        state.record_goal(TeamIndex::One, None);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn remove_event_reports_unknown_ids() {
        let mut state = fresh();
        let id = state.add_event(EventKind::RedCard, TeamIndex::Two, None).id.clone();
        assert!(state.remove_event(&id).is_ok());
        assert_eq!(
            state.remove_event(&id),
            Err(MatchError::UnknownEvent(id.clone()))
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = fresh();
        state.record_goal(TeamIndex::One, None);
        state.set_timer_running(true);
        state.advance_status();
        state.reset();
        assert_eq!(state, MatchState::default());
        assert!(state.events.is_empty());
        assert_eq!(state.status, MatchStatus::Live);
    }

    proptest! {
        #[test]
        fn goals_always_add_exactly_one(teams in prop::collection::vec(any::<bool>(), 0..30), minute in 0i32..=120) {
            let mut state = fresh();
            state.set_minute(minute);
            for first in teams {
                let team = if first { TeamIndex::One } else { TeamIndex::Two };
                let before = state.team(team).score;
                let logged = state.events.len();
                state.record_goal(team, None);
                prop_assert_eq!(state.team(team).score, before + 1);
                prop_assert_eq!(state.events.len(), logged + 1);
                let last = state.events.last().unwrap();
                prop_assert_eq!(last.kind, EventKind::Goal);
                prop_assert_eq!(i32::from(last.minute), minute);
            }
        }

        #[test]
        fn any_minute_lands_in_range(minute in any::<i32>()) {
            let mut state = fresh();
            let applied = state.set_minute(minute);
            prop_assert!(applied <= MAX_MINUTE);
            prop_assert_eq!(i32::from(applied), minute.clamp(0, 120));
        }
    }
}
