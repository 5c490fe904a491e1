use crate::app::MenuItem;
use crate::state::editor::{EditTarget, LineEditor};
use chrono::{DateTime, Local};
use matchday_api::{
    Lineup, MatchSetup, MatchState, MatchStats, RowField, StatKind, Standings, TableGroup,
    TableRow, TeamIndex,
};

/// Animation ticks (80ms each) a goal banner stays up.
pub const GOAL_CELEBRATION_TICKS: u16 = 40;
/// Animation ticks the champions banner stays up.
pub const CHAMPIONS_CELEBRATION_TICKS: u16 = 75;

// ---------------------------------------------------------------------------
// Banner animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index into the banner frames array, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter. Drives the bouncing ball.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count.max(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CelebrationKind {
    Goal { team: TeamIndex, scorer: Option<String> },
    Champions { team: TeamIndex },
}

/// Full-screen banner shown over the tabs until its ticks run out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    pub kind: CelebrationKind,
    pub ticks_left: u16,
}

impl Celebration {
    pub fn goal(team: TeamIndex, scorer: Option<String>) -> Self {
        Self {
            kind: CelebrationKind::Goal { team, scorer },
            ticks_left: GOAL_CELEBRATION_TICKS,
        }
    }

    pub fn champions(team: TeamIndex) -> Self {
        Self {
            kind: CelebrationKind::Champions { team },
            ticks_left: CHAMPIONS_CELEBRATION_TICKS,
        }
    }

    /// Count one tick down. Returns false once the banner should go away.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left > 0
    }
}

// ---------------------------------------------------------------------------
// Per-tab cursors
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TimelineState {
    /// Index into the newest-first view.
    pub selected: usize,
}

#[derive(Debug)]
pub struct StatsState {
    pub stat: usize,
    pub team: TeamIndex,
}

impl Default for StatsState {
    fn default() -> Self {
        Self { stat: 0, team: TeamIndex::One }
    }
}

impl StatsState {
    pub fn selected_stat(&self) -> StatKind {
        StatKind::ALL[self.stat % StatKind::ALL.len()]
    }
}

#[derive(Debug)]
pub struct LineupsState {
    pub team: TeamIndex,
    pub selected: usize,
}

impl Default for LineupsState {
    fn default() -> Self {
        Self { team: TeamIndex::One, selected: 0 }
    }
}

#[derive(Debug, Default)]
pub struct StandingsState {
    pub group: usize,
    /// Index into the ranked view of the selected group.
    pub row: usize,
    pub field: usize,
}

impl StandingsState {
    pub fn selected_field(&self) -> RowField {
        RowField::ALL[self.field % RowField::ALL.len()]
    }
}

pub const CONTROL_FIELDS: [EditTarget; 8] = [
    EditTarget::Competition,
    EditTarget::Stadium,
    EditTarget::TeamName(TeamIndex::One),
    EditTarget::TeamLogo(TeamIndex::One),
    EditTarget::TeamName(TeamIndex::Two),
    EditTarget::TeamLogo(TeamIndex::Two),
    EditTarget::Minute,
    EditTarget::NextPlayer,
];

#[derive(Debug, Default)]
pub struct ControlState {
    pub selected: usize,
}

impl ControlState {
    pub fn selected_field(&self) -> EditTarget {
        CONTROL_FIELDS[self.selected % CONTROL_FIELDS.len()]
    }
}

#[derive(Debug, Default)]
pub struct CommentaryState {
    pub text: Option<String>,
    pub pending: bool,
    pub updated_at: Option<DateTime<Local>>,
    /// Bumped on every reset. Answers tagged with an older value are stale.
    pub generation: u64,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_intro: bool,
    pub show_logs: bool,
    /// One-line message under the tabs: last failure or confirmation prompt.
    pub notice: Option<String>,
    pub game: MatchState,
    pub stats: MatchStats,
    pub standings: Standings,
    pub lineups: [Lineup; 2],
    /// Consumed by the next goal or card.
    pub next_player: Option<String>,
    /// First `R` press arms the reset, the second performs it.
    pub reset_armed: bool,
    pub timeline: TimelineState,
    pub stats_view: StatsState,
    pub lineups_view: LineupsState,
    pub standings_view: StandingsState,
    pub control: ControlState,
    pub commentary: CommentaryState,
    pub animation: AnimationState,
    pub celebration: Option<Celebration>,
    pub editor: LineEditor,
}

impl AppState {
    pub fn new(setup: &MatchSetup) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_intro: true,
            show_logs: false,
            notice: None,
            game: setup.initial_state(),
            stats: MatchStats::default(),
            standings: setup.groups.clone(),
            lineups: setup.lineups(),
            next_player: None,
            reset_armed: false,
            timeline: TimelineState::default(),
            stats_view: StatsState::default(),
            lineups_view: LineupsState::default(),
            standings_view: StandingsState::default(),
            control: ControlState::default(),
            commentary: CommentaryState::default(),
            animation: AnimationState::default(),
            celebration: None,
            editor: LineEditor::default(),
        }
    }

    /// Put every match-owned piece back to `setup`. View flags survive.
    pub fn restart(&mut self, setup: &MatchSetup) {
        self.game = setup.initial_state();
        self.stats = MatchStats::default();
        self.standings = setup.groups.clone();
        self.lineups = setup.lineups();
        self.next_player = None;
        self.reset_armed = false;
        self.timeline = TimelineState::default();
        self.lineups_view = LineupsState::default();
        self.standings_view = StandingsState::default();
        self.commentary = CommentaryState {
            generation: self.commentary.generation.wrapping_add(1),
            ..CommentaryState::default()
        };
        self.celebration = None;
        self.editor.cancel();
    }

    pub fn lineup(&self, team: TeamIndex) -> &Lineup {
        &self.lineups[team.slot()]
    }

    pub fn lineup_mut(&mut self, team: TeamIndex) -> &mut Lineup {
        &mut self.lineups[team.slot()]
    }

    pub fn selected_group(&self) -> Option<&TableGroup> {
        self.standings.groups.get(self.standings_view.group)
    }

    /// The row under the cursor, addressed through the ranked view.
    pub fn selected_row(&self) -> Option<&TableRow> {
        self.selected_group()?
            .sorted_rows()
            .get(self.standings_view.row)
            .copied()
    }

    /// Pull every cursor back inside its list after something was removed.
    pub fn clamp_cursors(&mut self) {
        self.timeline.selected = clamp_index(self.timeline.selected, self.game.events.len());
        let players = self.lineup(self.lineups_view.team).len();
        self.lineups_view.selected = clamp_index(self.lineups_view.selected, players);
        self.standings_view.group =
            clamp_index(self.standings_view.group, self.standings.groups.len());
        let rows = self.selected_group().map_or(0, |g| g.rows.len());
        self.standings_view.row = clamp_index(self.standings_view.row, rows);
    }
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celebration_counts_down() {
        let mut celebration = Celebration::goal(TeamIndex::One, None);
        for _ in 0..GOAL_CELEBRATION_TICKS - 1 {
            assert!(celebration.tick());
        }
        assert!(!celebration.tick());
        assert!(!celebration.tick());
    }

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(4, 0), 0);
    }

    #[test]
    fn test_restart_rebuilds_from_setup() {
        let setup = MatchSetup::embedded().unwrap();
        let mut state = AppState::new(&setup);
        state.game.record_goal(TeamIndex::One, None);
        state.stats.adjust(StatKind::Shots, TeamIndex::Two, 3);
        state.lineups[0].remove(1);
        state.standings.add_group();
        state.show_logs = true;

        state.restart(&setup);
        assert_eq!(state.game, setup.initial_state());
        assert_eq!(state.stats, MatchStats::default());
        assert_eq!(state.standings, setup.groups);
        assert_eq!(state.lineups, setup.lineups());
        assert!(state.show_logs);
        assert_eq!(state.commentary.generation, 1);
    }
}
