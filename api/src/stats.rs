use crate::TeamIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Possession,
    Shots,
    Corners,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Possession, StatKind::Shots, StatKind::Corners];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Possession => "Possession",
            StatKind::Shots => "Shots",
            StatKind::Corners => "Corners",
        }
    }
}

/// Operator-maintained live statistics, `[team 1, team 2]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub possession: [u32; 2],
    pub shots: [u32; 2],
    pub corners: [u32; 2],
}

impl Default for MatchStats {
    fn default() -> Self {
        Self {
            possession: [50, 50],
            shots: [0, 0],
            corners: [0, 0],
        }
    }
}

impl MatchStats {
    pub fn get(&self, stat: StatKind) -> [u32; 2] {
        match stat {
            StatKind::Possession => self.possession,
            StatKind::Shots => self.shots,
            StatKind::Corners => self.corners,
        }
    }

    /// Add `amount` (may be negative) to one side of a stat, never below zero.
    /// Possession stays a percentage: the other side gets the remainder.
    pub fn adjust(&mut self, stat: StatKind, team: TeamIndex, amount: i32) {
        let (own, other) = (team.slot(), team.other().slot());
        let values = match stat {
            StatKind::Possession => &mut self.possession,
            StatKind::Shots => &mut self.shots,
            StatKind::Corners => &mut self.corners,
        };
        let mut updated = values[own].saturating_add_signed(amount);
        if stat == StatKind::Possession {
            updated = updated.min(100);
            values[other] = 100 - updated;
        }
        values[own] = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_never_go_negative() {
        let mut stats = MatchStats::default();
        stats.adjust(StatKind::Shots, TeamIndex::One, -1);
        assert_eq!(stats.shots, [0, 0]);
        stats.adjust(StatKind::Corners, TeamIndex::Two, 3);
        stats.adjust(StatKind::Corners, TeamIndex::Two, -1);
        assert_eq!(stats.corners, [0, 2]);
    }

    #[test]
    fn possession_always_sums_to_one_hundred() {
        let mut stats = MatchStats::default();
        stats.adjust(StatKind::Possession, TeamIndex::One, 5);
        assert_eq!(stats.possession, [55, 45]);
        stats.adjust(StatKind::Possession, TeamIndex::Two, 10);
        assert_eq!(stats.possession, [45, 55]);
        stats.adjust(StatKind::Possession, TeamIndex::Two, 80);
        assert_eq!(stats.possession, [0, 100]);
        stats.adjust(StatKind::Possession, TeamIndex::One, -3);
        assert_eq!(stats.possession, [0, 100]);
    }

    #[test]
    fn get_reads_the_matching_pair() {
        let mut stats = MatchStats::default();
        stats.adjust(StatKind::Shots, TeamIndex::Two, 4);
        assert_eq!(stats.get(StatKind::Shots), [0, 4]);
        assert_eq!(stats.get(StatKind::Possession), [50, 50]);
    }
}
