use crate::{Lineup, MatchState, Standings, Team};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const EMBEDDED_SETUP_JSON: &str = include_str!("../default_setup.json");

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid match setup json{}: {source}", origin(.path))]
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSetup {
    pub name: String,
    pub logo: String,
    pub lineup: Lineup,
}

impl TeamSetup {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            logo: String::new(),
            lineup: Lineup::default(),
        }
    }
}

impl Default for TeamSetup {
    fn default() -> Self {
        Self::named("Team")
    }
}

/// Everything a match session starts from. "Reset match" returns here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSetup {
    pub competition: String,
    pub stadium: String,
    pub team1: TeamSetup,
    pub team2: TeamSetup,
    pub groups: Standings,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            competition: "Friendly".to_string(),
            stadium: "Home Ground".to_string(),
            team1: TeamSetup::named("Home"),
            team2: TeamSetup::named("Away"),
            groups: Standings::default(),
        }
    }
}

impl MatchSetup {
    /// Load from `path` when given, otherwise from the bundled setup.
    pub fn load(path: Option<&Path>) -> Result<Self, SetupError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, SetupError> {
        let content = std::fs::read_to_string(path).map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SetupError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        serde_json::from_str(json).map_err(|source| SetupError::Parse { path: None, source })
    }

    pub fn embedded() -> Result<Self, SetupError> {
        Self::from_json(EMBEDDED_SETUP_JSON)
    }

    /// A fresh match record: 0-0, minute 0, clock stopped, LIVE.
    pub fn initial_state(&self) -> MatchState {
        MatchState::new(
            Team::new(&self.team1.name, &self.team1.logo),
            Team::new(&self.team2.name, &self.team2.logo),
            &self.competition,
            &self.stadium,
        )
    }

    pub fn lineups(&self) -> [Lineup; 2] {
        [self.team1.lineup.clone(), self.team2.lineup.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatchStatus, TeamIndex};

    #[test]
    fn embedded_setup_parses() {
        let setup = MatchSetup::embedded().expect("bundled setup should parse");
        assert!(!setup.team1.name.is_empty());
        assert!(!setup.team1.lineup.is_empty());
        assert!(!setup.groups.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let setup = MatchSetup::from_json(r#"{"team1":{"name":"Lions"}}"#).unwrap();
        assert_eq!(setup.team1.name, "Lions");
        assert_eq!(setup.team2.name, "Away");
        assert_eq!(setup.competition, "Friendly");
        assert!(setup.groups.is_empty());
    }

    #[test]
    fn initial_state_is_a_fresh_match() {
        let setup = MatchSetup::from_json(
            r#"{"competition":"Cup","stadium":"Arena","team2":{"name":"Wolves","logo":"wolves.png"}}"#,
        )
        .unwrap();
        let state = setup.initial_state();
        assert_eq!(state.competition, "Cup");
        assert_eq!(state.team(TeamIndex::Two).logo, "wolves.png");
        assert_eq!((state.team1.score, state.team2.score), (0, 0));
        assert_eq!(state.minute, 0);
        assert!(!state.is_timer_running);
        assert_eq!(state.status, MatchStatus::Live);
        assert!(state.events.is_empty());
    }

    #[test]
    fn errors_name_their_source() {
        let err = MatchSetup::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid match setup json: "));

        let missing = Path::new("/definitely/not/here.json");
        let err = MatchSetup::load(Some(missing)).unwrap_err();
        assert!(matches!(err, SetupError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
