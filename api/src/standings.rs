use crate::error::{MatchError, MatchResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One team's line in a group table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default = "new_id")]
    pub id: String,
    pub team_name: String,
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub won: u32,
    #[serde(default)]
    pub drawn: u32,
    #[serde(default)]
    pub lost: u32,
    #[serde(default)]
    pub gf: u32,
    #[serde(default)]
    pub ga: u32,
    #[serde(default)]
    pub points: u32,
}

impl TableRow {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            team_name: team_name.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            gf: 0,
            ga: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.gf) - i64::from(self.ga)
    }

    pub fn get(&self, field: RowField) -> u32 {
        match field {
            RowField::Played => self.played,
            RowField::Won => self.won,
            RowField::Drawn => self.drawn,
            RowField::Lost => self.lost,
            RowField::GoalsFor => self.gf,
            RowField::GoalsAgainst => self.ga,
            RowField::Points => self.points,
        }
    }

    fn field_mut(&mut self, field: RowField) -> &mut u32 {
        match field {
            RowField::Played => &mut self.played,
            RowField::Won => &mut self.won,
            RowField::Drawn => &mut self.drawn,
            RowField::Lost => &mut self.lost,
            RowField::GoalsFor => &mut self.gf,
            RowField::GoalsAgainst => &mut self.ga,
            RowField::Points => &mut self.points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    Played,
    Won,
    Drawn,
    Lost,
    GoalsFor,
    GoalsAgainst,
    Points,
}

impl RowField {
    pub const ALL: [RowField; 7] = [
        RowField::Played,
        RowField::Won,
        RowField::Drawn,
        RowField::Lost,
        RowField::GoalsFor,
        RowField::GoalsAgainst,
        RowField::Points,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            RowField::Played => "P",
            RowField::Won => "W",
            RowField::Drawn => "D",
            RowField::Lost => "L",
            RowField::GoalsFor => "GF",
            RowField::GoalsAgainst => "GA",
            RowField::Points => "Pts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGroup {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl TableGroup {
    /// Ranking view: points, then goal difference. Ties keep entry order.
    pub fn sorted_rows(&self) -> Vec<&TableRow> {
        let mut rows: Vec<&TableRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        });
        rows
    }
}

/// Every group table the operator maintains alongside the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings {
    pub groups: Vec<TableGroup>,
}

impl Standings {
    pub fn new(groups: Vec<TableGroup>) -> Self {
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// New empty group lettered after the current count ("Group A", "Group B", …).
    pub fn add_group(&mut self) -> &TableGroup {
        let name = group_name(self.groups.len());
        self.groups.push(TableGroup {
            id: new_id(),
            name,
            rows: Vec::new(),
        });
        &self.groups[self.groups.len() - 1]
    }

    pub fn remove_group(&mut self, group_id: &str) -> MatchResult<TableGroup> {
        let idx = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| MatchError::UnknownGroup(group_id.to_string()))?;
        Ok(self.groups.remove(idx))
    }

    pub fn rename_group(&mut self, group_id: &str, name: impl Into<String>) -> MatchResult<()> {
        self.group_mut(group_id)?.name = name.into();
        Ok(())
    }

    pub fn add_row(&mut self, group_id: &str) -> MatchResult<&TableRow> {
        let group = self.group_mut(group_id)?;
        group.rows.push(TableRow::new("New Team"));
        Ok(&group.rows[group.rows.len() - 1])
    }

    pub fn remove_row(&mut self, group_id: &str, row_id: &str) -> MatchResult<TableRow> {
        let group = self.group_mut(group_id)?;
        let idx = group
            .rows
            .iter()
            .position(|r| r.id == row_id)
            .ok_or_else(|| MatchError::UnknownRow(row_id.to_string()))?;
        Ok(group.rows.remove(idx))
    }

    pub fn rename_row(
        &mut self,
        group_id: &str,
        row_id: &str,
        team_name: impl Into<String>,
    ) -> MatchResult<()> {
        self.row_mut(group_id, row_id)?.team_name = team_name.into();
        Ok(())
    }

    /// Nudge one numeric column, saturating at zero.
    pub fn adjust_row(
        &mut self,
        group_id: &str,
        row_id: &str,
        field: RowField,
        delta: i32,
    ) -> MatchResult<u32> {
        let value = self.row_mut(group_id, row_id)?.field_mut(field);
        *value = value.saturating_add_signed(delta);
        Ok(*value)
    }

    pub fn group(&self, group_id: &str) -> Option<&TableGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    fn group_mut(&mut self, group_id: &str) -> MatchResult<&mut TableGroup> {
        self.groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| MatchError::UnknownGroup(group_id.to_string()))
    }

    fn row_mut(&mut self, group_id: &str, row_id: &str) -> MatchResult<&mut TableRow> {
        self.group_mut(group_id)?
            .rows
            .iter_mut()
            .find(|r| r.id == row_id)
            .ok_or_else(|| MatchError::UnknownRow(row_id.to_string()))
    }
}

fn group_name(existing: usize) -> String {
    match u8::try_from(existing) {
        Ok(n) if n < 26 => format!("Group {}", char::from(b'A' + n)),
        _ => format!("Group {}", existing + 1),
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, points: u32, gf: u32, ga: u32) -> TableRow {
        TableRow {
            points,
            gf,
            ga,
            ..TableRow::new(name)
        }
    }

    #[test]
    fn groups_are_lettered_by_count() {
        let mut standings = Standings::default();
        assert_eq!(standings.add_group().name, "Group A");
        assert_eq!(standings.add_group().name, "Group B");
        let first = standings.groups[0].id.clone();
        standings.remove_group(&first).unwrap();
        // Naming follows the count, as the operator sees it.
        assert_eq!(standings.add_group().name, "Group B");
        assert_eq!(group_name(25), "Group Z");
        assert_eq!(group_name(26), "Group 27");
    }

    #[test]
    fn ranking_uses_points_then_goal_difference() {
        let group = TableGroup {
            id: "g".into(),
            name: "Group A".into(),
            rows: vec![
                row("Low", 3, 1, 4),
                row("Top", 9, 7, 1),
                row("Mid GD+", 6, 5, 1),
                row("Mid GD-", 6, 2, 3),
                row("Low twin", 3, 1, 4),
            ],
        };
        let order: Vec<_> = group.sorted_rows().iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(order, vec!["Top", "Mid GD+", "Mid GD-", "Low", "Low twin"]);
        assert_eq!(group.rows[0].team_name, "Low", "reading must not reorder storage");
    }

    #[test]
    fn row_lifecycle() {
        let mut standings = Standings::default();
        let gid = standings.add_group().id.clone();
        let rid = standings.add_row(&gid).unwrap().id.clone();
        assert_eq!(standings.group(&gid).unwrap().rows[0].team_name, "New Team");

        standings.rename_row(&gid, &rid, "Lions").unwrap();
        assert_eq!(standings.adjust_row(&gid, &rid, RowField::Points, 3), Ok(3));
        assert_eq!(standings.adjust_row(&gid, &rid, RowField::Lost, -1), Ok(0));

        let removed = standings.remove_row(&gid, &rid).unwrap();
        assert_eq!(removed.team_name, "Lions");
        assert_eq!(
            standings.remove_row(&gid, &rid),
            Err(MatchError::UnknownRow(rid.clone()))
        );
        assert_eq!(
            standings.add_row("nope").map(|r| r.id.clone()),
            Err(MatchError::UnknownGroup("nope".into()))
        );
    }

    #[test]
    fn deserializes_rows_without_ids() {
        let json = r#"[{"name":"Group A","rows":[{"teamName":"Hawks","points":4,"gf":3,"ga":1}]}]"#;
        let standings: Standings = serde_json::from_str(json).unwrap();
        let r = &standings.groups[0].rows[0];
        assert_eq!(r.team_name, "Hawks");
        assert_eq!(r.goal_difference(), 2);
        assert!(!r.id.is_empty());
        assert!(!standings.groups[0].id.is_empty());
    }
}
