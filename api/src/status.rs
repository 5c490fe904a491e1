use serde::{Deserialize, Serialize};

/// Match lifecycle. Ordered from kick-off to the final whistle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    #[serde(rename = "LIVE")]
    Live,
    #[serde(rename = "FT")]
    FullTime,
    #[serde(rename = "ET")]
    ExtraTime,
    #[serde(rename = "ET_FT")]
    ExtraTimeFinished,
    #[serde(rename = "PENALTIES")]
    Penalties,
    #[serde(rename = "FINISHED")]
    Finished,
}

impl MatchStatus {
    pub const ALL: [MatchStatus; 6] = [
        MatchStatus::Live,
        MatchStatus::FullTime,
        MatchStatus::ExtraTime,
        MatchStatus::ExtraTimeFinished,
        MatchStatus::Penalties,
        MatchStatus::Finished,
    ];

    /// The phase an operator "advance" moves to. `None` once the match is over.
    pub fn next(self) -> Option<Self> {
        match self {
            MatchStatus::Live => Some(MatchStatus::FullTime),
            MatchStatus::FullTime => Some(MatchStatus::ExtraTime),
            MatchStatus::ExtraTime => Some(MatchStatus::ExtraTimeFinished),
            MatchStatus::ExtraTimeFinished => Some(MatchStatus::Penalties),
            MatchStatus::Penalties => Some(MatchStatus::Finished),
            MatchStatus::Finished => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Phases during which play (or the shootout) is actually under way.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            MatchStatus::Live | MatchStatus::ExtraTime | MatchStatus::Penalties
        )
    }

    pub fn code(self) -> &'static str {
        match self {
            MatchStatus::Live => "LIVE",
            MatchStatus::FullTime => "FT",
            MatchStatus::ExtraTime => "ET",
            MatchStatus::ExtraTimeFinished => "ET_FT",
            MatchStatus::Penalties => "PENALTIES",
            MatchStatus::Finished => "FINISHED",
        }
    }

    /// Caption for the operator button that advances out of this phase.
    pub fn transition_label(self) -> Option<&'static str> {
        match self {
            MatchStatus::Live => Some("Finish Regular Time"),
            MatchStatus::FullTime => Some("Start Extra Time"),
            MatchStatus::ExtraTime => Some("Finish Extra Time"),
            MatchStatus::ExtraTimeFinished => Some("Start Penalties"),
            MatchStatus::Penalties => Some("Complete Game"),
            MatchStatus::Finished => None,
        }
    }
}

/// Scoreboard caption for the current phase.
///
/// `kicks` is the number of recorded penalty kicks for (team 1, team 2). A
/// finished match that went to a shootout reads "FT (AP)", one that ran past
/// ninety minutes reads "FT (AET)".
pub fn status_label(status: MatchStatus, minute: u8, kicks: (usize, usize)) -> String {
    match status {
        MatchStatus::Live => format!("{minute}'"),
        MatchStatus::FullTime => "Full Time".to_string(),
        MatchStatus::ExtraTime => format!("ET {minute}'"),
        MatchStatus::ExtraTimeFinished => "AET".to_string(),
        MatchStatus::Penalties => "Penalties".to_string(),
        MatchStatus::Finished => {
            if kicks.0 > 0 || kicks.1 > 0 {
                "FT (AP)".to_string()
            } else if minute > 90 {
                "FT (AET)".to_string()
            } else {
                "Full Time".to_string()
            }
        }
    }
}
