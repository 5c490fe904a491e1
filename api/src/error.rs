use crate::TeamIndex;
use thiserror::Error;

pub type MatchResult<T> = Result<T, MatchError>;

/// Rejections raised by operator actions against the match record.
///
/// None of these are fatal: the action is dropped (or clamped) and the record
/// is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("it is not {team}'s turn to kick ({})", turn_text(.expected))]
    TurnViolation {
        team: TeamIndex,
        expected: Option<TeamIndex>,
    },
    #[error("{team} has no penalty kicks to undo")]
    EmptySequence { team: TeamIndex },
    #[error("{value} is outside {min}..={max}")]
    InvalidRange { value: i64, min: i64, max: i64 },
    #[error("no event with id {0}")]
    UnknownEvent(String),
    #[error("no standings group with id {0}")]
    UnknownGroup(String),
    #[error("no standings row with id {0}")]
    UnknownRow(String),
}

fn turn_text(expected: &Option<TeamIndex>) -> String {
    match expected {
        Some(team) => format!("{team} is up"),
        None => "nobody may kick until the last kick of team 2 is undone".to_string(),
    }
}
