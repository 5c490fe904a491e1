use crate::TeamIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Goal,
    YellowCard,
    RedCard,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Goal => "GOAL!",
            EventKind::YellowCard => "Yellow Card",
            EventKind::RedCard => "Red Card",
        }
    }
}

/// One timeline entry. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub team_index: TeamIndex,
    pub minute: u8,
    pub player: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Goals and cards in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new event with a fresh id. Identical (kind, team, minute)
    /// entries are allowed and stay distinct.
    pub fn append(
        &mut self,
        kind: EventKind,
        team_index: TeamIndex,
        minute: u8,
        player: Option<String>,
    ) -> &MatchEvent {
        let player = player.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self.events.push(MatchEvent {
            id: Uuid::new_v4().to_string(),
            kind,
            team_index,
            minute,
            player,
            recorded_at: Utc::now(),
        });
        &self.events[self.events.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&MatchEvent> {
        self.events.last()
    }

    pub fn get(&self, id: &str) -> Option<&MatchEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Timeline view: latest minute first. Events sharing a minute keep their
    /// recording order. The stored order is untouched.
    pub fn by_minute_desc(&self) -> Vec<&MatchEvent> {
        let mut view: Vec<&MatchEvent> = self.events.iter().collect();
        view.sort_by(|a, b| b.minute.cmp(&a.minute));
        view
    }

    pub fn goals_for(&self, team: TeamIndex) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Goal && e.team_index == team)
            .count()
    }

    /// Operator correction. Does not touch any score.
    pub fn remove(&mut self, id: &str) -> Option<MatchEvent> {
        let idx = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(idx))
    }
}
