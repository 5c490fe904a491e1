use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, CONTROL_FIELDS, Celebration, clamp_index};
use crate::state::editor::EditTarget;
use chrono::Local;
use log::{debug, error, info, warn};
use matchday_api::{
    EventKind, MAX_MINUTE, MIN_MINUTE, MatchError, MatchSetup, MatchState, MatchStatus, Player,
    RowField, StatKind, TeamIndex, TeamUpdate,
};
use std::fmt::Display;
use std::path::Path;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Scoreboard,
    Timeline,
    Stats,
    Penalties,
    Lineups,
    Standings,
    Control,
    Help,
}

/// Possession moves in steps of this many percentage points.
const POSSESSION_STEP: i32 = 5;

pub struct App {
    pub settings: AppSettings,
    /// What "reset match" goes back to.
    pub setup: MatchSetup,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let (setup, problem) = load_setup(settings.setup_path.as_deref());
        let mut app = Self::with_setup(settings, setup);
        app.state.notice = problem;
        app
    }

    pub fn with_setup(settings: AppSettings, setup: MatchSetup) -> Self {
        Self {
            state: AppState::new(&setup),
            settings,
            setup,
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn dismiss_intro(&mut self) {
        self.state.show_intro = false;
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    pub fn on_error(&mut self, err: impl Display) {
        warn!("{err}");
        self.state.notice = Some(err.to_string());
    }

    // -----------------------------------------------------------------------
    // Clock and phase
    // -----------------------------------------------------------------------

    /// Returns whether anything visible changed.
    pub fn on_clock_tick(&mut self) -> bool {
        let moved = self.state.game.tick_minute();
        if moved {
            debug!("clock {}'", self.state.game.minute);
        }
        moved
    }

    pub fn toggle_timer(&mut self) {
        let running = self.state.game.toggle_timer();
        info!("clock {}", if running { "started" } else { "stopped" });
    }

    pub fn nudge_minute(&mut self, delta: i32) {
        let minute = i32::from(self.state.game.minute) + delta;
        self.set_minute(minute);
    }

    fn set_minute(&mut self, minute: i32) {
        let applied = self.state.game.set_minute(minute);
        if i32::from(applied) != minute {
            self.state.notice = Some(
                MatchError::InvalidRange {
                    value: i64::from(minute),
                    min: i64::from(MIN_MINUTE),
                    max: i64::from(MAX_MINUTE),
                }
                .to_string(),
            );
        }
    }

    pub fn advance_status(&mut self) {
        let before = self.state.game.status;
        let now = self.state.game.advance_status();
        if now == MatchStatus::Finished && before != MatchStatus::Finished {
            self.state.game.set_timer_running(false);
            match self.state.game.winner() {
                Some(team) => {
                    info!("{} win the match", self.state.game.team(team).name);
                    self.state.celebration = Some(Celebration::champions(team));
                }
                None => info!("match finished level"),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Goals and cards
    // -----------------------------------------------------------------------

    pub fn goal(&mut self, team: TeamIndex) {
        let scorer = self.state.next_player.take();
        let event = self.state.game.record_goal(team, scorer.clone());
        info!(
            "GOAL {team} {}' {}",
            event.minute,
            event.player.as_deref().unwrap_or("")
        );
        self.state.celebration = Some(Celebration::goal(team, scorer));
    }

    /// Operator "-" on a score: a correction that never touches the log.
    pub fn score_correction(&mut self, team: TeamIndex) {
        let score = self.state.game.adjust_score(team, -1);
        debug!("{team} score corrected to {score}");
    }

    pub fn card(&mut self, kind: EventKind, team: TeamIndex) {
        let player = self.state.next_player.take();
        let event = self.state.game.add_event(kind, team, player);
        info!("{} {team} {}'", event.kind.label(), event.minute);
    }

    // -----------------------------------------------------------------------
    // Timeline
    // -----------------------------------------------------------------------

    pub fn timeline_down(&mut self) {
        let len = self.state.game.events.len();
        self.state.timeline.selected = clamp_index(self.state.timeline.selected + 1, len);
    }

    pub fn timeline_up(&mut self) {
        self.state.timeline.selected = self.state.timeline.selected.saturating_sub(1);
    }

    pub fn remove_selected_event(&mut self) {
        let Some(id) = self
            .state
            .game
            .events
            .by_minute_desc()
            .get(self.state.timeline.selected)
            .map(|e| e.id.clone())
        else {
            return;
        };
        match self.state.game.remove_event(&id) {
            Ok(event) => info!("removed {} at {}'", event.kind.label(), event.minute),
            Err(e) => self.on_error(e),
        }
        self.state.clamp_cursors();
    }

    // -----------------------------------------------------------------------
    // Penalty shootout
    // -----------------------------------------------------------------------

    pub fn penalty_kick(&mut self, team: TeamIndex, scored: bool) {
        match self.state.game.record_penalty_kick(team, scored) {
            Ok(()) => {
                self.state.notice = None;
                info!("{team} penalty {}", if scored { "scored" } else { "missed" });
            }
            Err(e) => self.on_error(e),
        }
    }

    pub fn undo_penalty(&mut self, team: TeamIndex) {
        match self.state.game.undo_penalty_kick(team) {
            Ok(_) => self.state.notice = None,
            Err(e) => self.on_error(e),
        }
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    pub fn stats_next(&mut self) {
        self.state.stats_view.stat = (self.state.stats_view.stat + 1) % StatKind::ALL.len();
    }

    pub fn stats_prev(&mut self) {
        let len = StatKind::ALL.len();
        self.state.stats_view.stat = (self.state.stats_view.stat + len - 1) % len;
    }

    pub fn stats_select_team(&mut self, team: TeamIndex) {
        self.state.stats_view.team = team;
    }

    pub fn stats_adjust(&mut self, direction: i32) {
        let stat = self.state.stats_view.selected_stat();
        let amount = match stat {
            StatKind::Possession => direction * POSSESSION_STEP,
            _ => direction,
        };
        self.state.stats.adjust(stat, self.state.stats_view.team, amount);
    }

    // -----------------------------------------------------------------------
    // Lineups
    // -----------------------------------------------------------------------

    pub fn lineups_select_team(&mut self, team: TeamIndex) {
        self.state.lineups_view.team = team;
        self.state.clamp_cursors();
    }

    pub fn lineups_down(&mut self) {
        let len = self.state.lineup(self.state.lineups_view.team).len();
        self.state.lineups_view.selected = clamp_index(self.state.lineups_view.selected + 1, len);
    }

    pub fn lineups_up(&mut self) {
        self.state.lineups_view.selected = self.state.lineups_view.selected.saturating_sub(1);
    }

    pub fn begin_lineup_entry(&mut self) {
        let team = self.state.lineups_view.team;
        self.state.editor.begin(EditTarget::LineupEntry(team), "");
    }

    pub fn remove_selected_player(&mut self) {
        let team = self.state.lineups_view.team;
        let selected = self.state.lineups_view.selected;
        let Some(number) = self.state.lineup(team).players.get(selected).map(|p| p.number) else {
            return;
        };
        self.state.lineup_mut(team).remove(number);
        self.state.clamp_cursors();
    }

    /// Attach the highlighted player to the next goal or card.
    pub fn use_selected_player(&mut self) {
        let team = self.state.lineups_view.team;
        let Some(player) = self
            .state
            .lineup(team)
            .players
            .get(self.state.lineups_view.selected)
        else {
            return;
        };
        let name = player.name.clone();
        self.state.notice = Some(format!("next event: {name}"));
        self.state.next_player = Some(name);
    }

    // -----------------------------------------------------------------------
    // Standings
    // -----------------------------------------------------------------------

    pub fn standings_next_group(&mut self) {
        let len = self.state.standings.groups.len();
        if len > 0 {
            self.state.standings_view.group = (self.state.standings_view.group + 1) % len;
            self.state.standings_view.row = 0;
        }
    }

    pub fn standings_prev_group(&mut self) {
        let len = self.state.standings.groups.len();
        if len > 0 {
            self.state.standings_view.group = (self.state.standings_view.group + len - 1) % len;
            self.state.standings_view.row = 0;
        }
    }

    pub fn standings_row_down(&mut self) {
        let len = self.state.selected_group().map_or(0, |g| g.rows.len());
        self.state.standings_view.row = clamp_index(self.state.standings_view.row + 1, len);
    }

    pub fn standings_row_up(&mut self) {
        self.state.standings_view.row = self.state.standings_view.row.saturating_sub(1);
    }

    pub fn standings_field_next(&mut self) {
        self.state.standings_view.field = (self.state.standings_view.field + 1) % RowField::ALL.len();
    }

    pub fn standings_field_prev(&mut self) {
        let len = RowField::ALL.len();
        self.state.standings_view.field = (self.state.standings_view.field + len - 1) % len;
    }

    /// Adjusting can reorder the ranking; the cursor follows the row.
    pub fn standings_adjust(&mut self, delta: i32) {
        let Some((group_id, row_id)) = self.selected_row_ids() else {
            return;
        };
        let field = self.state.standings_view.selected_field();
        if let Err(e) = self.state.standings.adjust_row(&group_id, &row_id, field, delta) {
            self.on_error(e);
            return;
        }
        if let Some(pos) = self
            .state
            .selected_group()
            .and_then(|g| g.sorted_rows().iter().position(|r| r.id == row_id))
        {
            self.state.standings_view.row = pos;
        }
    }

    pub fn standings_add_group(&mut self) {
        let name = self.state.standings.add_group().name.clone();
        self.state.standings_view.group = self.state.standings.groups.len() - 1;
        self.state.standings_view.row = 0;
        debug!("added {name}");
    }

    pub fn standings_remove_group(&mut self) {
        let Some(group_id) = self.state.selected_group().map(|g| g.id.clone()) else {
            return;
        };
        if let Err(e) = self.state.standings.remove_group(&group_id) {
            self.on_error(e);
        }
        self.state.clamp_cursors();
    }

    pub fn standings_add_row(&mut self) {
        let Some(group_id) = self.state.selected_group().map(|g| g.id.clone()) else {
            self.state.notice = Some("add a group first (A)".to_string());
            return;
        };
        if let Err(e) = self.state.standings.add_row(&group_id) {
            self.on_error(e);
        }
    }

    pub fn standings_remove_row(&mut self) {
        let Some((group_id, row_id)) = self.selected_row_ids() else {
            return;
        };
        if let Err(e) = self.state.standings.remove_row(&group_id, &row_id) {
            self.on_error(e);
        }
        self.state.clamp_cursors();
    }

    pub fn begin_rename_group(&mut self) {
        if let Some(name) = self.state.selected_group().map(|g| g.name.clone()) {
            self.state.editor.begin(EditTarget::GroupName, name);
        }
    }

    pub fn begin_rename_row(&mut self) {
        if let Some(name) = self.state.selected_row().map(|r| r.team_name.clone()) {
            self.state.editor.begin(EditTarget::RowName, name);
        }
    }

    fn selected_row_ids(&self) -> Option<(String, String)> {
        let group = self.state.selected_group()?;
        let row = self.state.selected_row()?;
        Some((group.id.clone(), row.id.clone()))
    }

    // -----------------------------------------------------------------------
    // Control panel and the line editor
    // -----------------------------------------------------------------------

    pub fn control_down(&mut self) {
        self.state.control.selected = clamp_index(self.state.control.selected + 1, CONTROL_FIELDS.len());
    }

    pub fn control_up(&mut self) {
        self.state.control.selected = self.state.control.selected.saturating_sub(1);
    }

    pub fn begin_control_edit(&mut self) {
        let target = self.state.control.selected_field();
        let current = self.field_value(target);
        self.state.editor.begin(target, current);
    }

    pub fn field_value(&self, target: EditTarget) -> String {
        let game = &self.state.game;
        match target {
            EditTarget::Competition => game.competition.clone(),
            EditTarget::Stadium => game.stadium.clone(),
            EditTarget::TeamName(team) => game.team(team).name.clone(),
            EditTarget::TeamLogo(team) => game.team(team).logo.clone(),
            EditTarget::Minute => game.minute.to_string(),
            EditTarget::NextPlayer => self.state.next_player.clone().unwrap_or_default(),
            EditTarget::LineupEntry(_) => String::new(),
            EditTarget::GroupName => self
                .state
                .selected_group()
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            EditTarget::RowName => self
                .state
                .selected_row()
                .map(|r| r.team_name.clone())
                .unwrap_or_default(),
        }
    }

    pub fn editor_push(&mut self, ch: char) {
        self.state.editor.push(ch);
    }

    pub fn editor_backspace(&mut self) {
        self.state.editor.backspace();
    }

    pub fn editor_cancel(&mut self) {
        self.state.editor.cancel();
    }

    pub fn commit_edit(&mut self) {
        let Some((target, text)) = self.state.editor.submit() else {
            return;
        };
        match target {
            EditTarget::Competition => self.state.game.competition = text,
            EditTarget::Stadium => self.state.game.stadium = text,
            EditTarget::TeamName(_) | EditTarget::GroupName | EditTarget::RowName
                if text.is_empty() =>
            {
                self.state.notice = Some("name cannot be blank".to_string());
            }
            EditTarget::TeamName(team) => self.state.game.update_team(team, TeamUpdate::name(text)),
            EditTarget::TeamLogo(team) => self.state.game.update_team(team, TeamUpdate::logo(text)),
            EditTarget::Minute => match text.parse::<i32>() {
                Ok(minute) => self.set_minute(minute),
                Err(_) => self.state.notice = Some(format!("not a minute: {text:?}")),
            },
            EditTarget::NextPlayer => {
                self.state.next_player = (!text.is_empty()).then_some(text);
            }
            EditTarget::LineupEntry(team) => match Player::parse_entry(&text) {
                Some(player) => self.state.lineup_mut(team).add(player),
                None => {
                    self.state.notice = Some("expected \"<number> <name>\"".to_string());
                }
            },
            EditTarget::GroupName => {
                if let Some(id) = self.state.selected_group().map(|g| g.id.clone())
                    && let Err(e) = self.state.standings.rename_group(&id, text)
                {
                    self.on_error(e);
                }
            }
            EditTarget::RowName => {
                if let Some((group_id, row_id)) = self.selected_row_ids()
                    && let Err(e) = self.state.standings.rename_row(&group_id, &row_id, text)
                {
                    self.on_error(e);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Returns true when the session was actually reset.
    pub fn request_reset(&mut self) -> bool {
        if !self.state.reset_armed {
            self.state.reset_armed = true;
            self.state.notice = Some("press R again to reset the match".to_string());
            return false;
        }
        info!("match reset");
        self.state.restart(&self.setup);
        self.state.notice = Some("match reset".to_string());
        true
    }

    pub fn disarm_reset(&mut self) {
        if self.state.reset_armed {
            self.state.reset_armed = false;
            self.state.notice = None;
        }
    }

    // -----------------------------------------------------------------------
    // Commentary
    // -----------------------------------------------------------------------

    /// Snapshot to send to the commentary worker, tagged with the current
    /// generation, or `None` while a request for this match is in flight.
    pub fn request_commentary(&mut self) -> Option<(u64, MatchState)> {
        if self.state.commentary.pending {
            return None;
        }
        self.state.commentary.pending = true;
        Some((self.state.commentary.generation, self.state.game.snapshot()))
    }

    /// Returns false when the answer belongs to a match that was reset since.
    pub fn on_commentary(&mut self, generation: u64, text: String) -> bool {
        let commentary = &mut self.state.commentary;
        if generation != commentary.generation {
            debug!("dropping commentary from before the last reset");
            return false;
        }
        commentary.pending = false;
        commentary.text = Some(text);
        commentary.updated_at = Some(Local::now());
        true
    }

    // -----------------------------------------------------------------------
    // Animation, one call per 80ms AnimationTick
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
        if let Some(celebration) = self.state.celebration.as_mut()
            && !celebration.tick()
        {
            self.state.celebration = None;
        }
    }
}

/// Configured file first, then the bundled setup, then the built-in default.
/// The second value describes what went wrong, for the notice line.
fn load_setup(path: Option<&Path>) -> (MatchSetup, Option<String>) {
    let err = match MatchSetup::load(path) {
        Ok(setup) => return (setup, None),
        Err(e) => e,
    };
    error!("{err}");
    if path.is_some()
        && let Ok(setup) = MatchSetup::embedded()
    {
        return (setup, Some(format!("{err}; using the bundled setup")));
    }
    (MatchSetup::default(), Some(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_state::CelebrationKind;

    fn app() -> App {
        App::with_setup(AppSettings::default(), MatchSetup::embedded().unwrap())
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.editor_push(ch);
        }
    }

    #[test]
    fn test_goal_takes_next_player_and_celebrates() {
        let mut app = app();
        app.state.next_player = Some("Marcus Hale".into());
        app.state.game.set_minute(17);
        app.goal(TeamIndex::One);

        assert_eq!(app.state.game.team1.score, 1);
        let event = app.state.game.events.last().unwrap();
        assert_eq!(event.player.as_deref(), Some("Marcus Hale"));
        assert_eq!(event.minute, 17);
        assert!(app.state.next_player.is_none());
        assert_eq!(
            app.state.celebration.as_ref().map(|c| &c.kind),
            Some(&CelebrationKind::Goal {
                team: TeamIndex::One,
                scorer: Some("Marcus Hale".into())
            })
        );
    }

    #[test]
    fn test_celebration_clears_after_its_ticks() {
        let mut app = app();
        app.goal(TeamIndex::Two);
        for _ in 0..crate::state::app_state::GOAL_CELEBRATION_TICKS {
            app.advance_animation(4);
        }
        assert!(app.state.celebration.is_none());
    }

    #[test]
    fn test_reset_needs_two_presses() {
        let mut app = app();
        app.goal(TeamIndex::One);
        app.state.game.toggle_timer();

        assert!(!app.request_reset());
        assert_eq!(app.state.game.team1.score, 1);
        app.disarm_reset();
        assert!(!app.request_reset());
        assert!(app.request_reset());

        assert_eq!(app.state.game, app.setup.initial_state());
        assert!(!app.state.reset_armed);
    }

    #[test]
    fn test_out_of_turn_kick_becomes_a_notice() {
        let mut app = app();
        app.penalty_kick(TeamIndex::Two, true);
        assert!(app.state.game.team2.penalties.is_empty());
        assert!(app.state.notice.as_deref().unwrap().contains("team 2"));

        app.penalty_kick(TeamIndex::One, false);
        assert!(app.state.notice.is_none());
        app.undo_penalty(TeamIndex::Two);
        assert!(app.state.notice.is_some());
    }

    #[test]
    fn test_finishing_crowns_the_winner() {
        let mut app = app();
        app.goal(TeamIndex::Two);
        app.state.game.set_timer_running(true);
        app.state.celebration = None;
        for _ in 0..5 {
            app.advance_status();
        }
        assert_eq!(app.state.game.status, MatchStatus::Finished);
        assert!(!app.state.game.is_timer_running);
        assert_eq!(
            app.state.celebration.map(|c| c.kind),
            Some(CelebrationKind::Champions { team: TeamIndex::Two })
        );
    }

    #[test]
    fn test_minute_edit_is_clamped_with_notice() {
        let mut app = app();
        app.state.control.selected = CONTROL_FIELDS
            .iter()
            .position(|f| *f == EditTarget::Minute)
            .unwrap();
        app.begin_control_edit();
        assert_eq!(app.state.editor.input, "0");
        app.editor_backspace();
        type_text(&mut app, "130");
        app.commit_edit();
        assert_eq!(app.state.game.minute, 120);
        assert!(app.state.notice.is_some());

        app.nudge_minute(-200);
        assert_eq!(app.state.game.minute, 0);
    }

    #[test]
    fn test_control_edits_team_name() {
        let mut app = app();
        app.state.control.selected = 4;
        assert_eq!(app.state.control.selected_field(), EditTarget::TeamName(TeamIndex::Two));
        app.begin_control_edit();
        app.editor_cancel();
        app.state.editor.begin(EditTarget::TeamName(TeamIndex::Two), "");
        type_text(&mut app, "Harbour Town");
        app.commit_edit();
        assert_eq!(app.state.game.team2.name, "Harbour Town");

        app.state.editor.begin(EditTarget::TeamName(TeamIndex::Two), "");
        app.commit_edit();
        assert_eq!(app.state.game.team2.name, "Harbour Town");
    }

    #[test]
    fn test_lineup_entry_and_removal() {
        let mut app = app();
        app.lineups_select_team(TeamIndex::Two);
        let before = app.state.lineup(TeamIndex::Two).len();

        app.begin_lineup_entry();
        type_text(&mut app, "23 Ravi Kumar");
        app.commit_edit();
        assert_eq!(app.state.lineup(TeamIndex::Two).len(), before + 1);

        app.begin_lineup_entry();
        type_text(&mut app, "no number");
        app.commit_edit();
        assert_eq!(app.state.lineup(TeamIndex::Two).len(), before + 1);
        assert!(app.state.notice.is_some());

        app.state.lineups_view.selected = before;
        app.use_selected_player();
        assert_eq!(app.state.next_player.as_deref(), Some("Ravi Kumar"));
        app.remove_selected_player();
        assert_eq!(app.state.lineup(TeamIndex::Two).len(), before);
        assert_eq!(app.state.lineups_view.selected, before - 1);
    }

    #[test]
    fn test_standings_cursor_follows_row_after_reorder() {
        let mut app = app();
        app.standings_add_group();
        app.standings_add_row();
        app.standings_add_row();
        app.state.standings_view.row = 1;
        let row_id = app.state.selected_row().unwrap().id.clone();
        app.state.standings_view.field = RowField::ALL
            .iter()
            .position(|f| *f == RowField::Points)
            .unwrap();

        app.standings_adjust(3);
        assert_eq!(app.state.standings_view.row, 0);
        assert_eq!(app.state.selected_row().unwrap().id, row_id);
        assert_eq!(app.state.selected_row().unwrap().points, 3);

        app.standings_remove_row();
        assert_eq!(app.state.selected_group().unwrap().rows.len(), 1);
    }

    #[test]
    fn test_removing_from_timeline_leaves_score() {
        let mut app = app();
        app.goal(TeamIndex::One);
        app.state.game.set_minute(30);
        app.card(EventKind::YellowCard, TeamIndex::Two);

        // Newest first: the card is at the top.
        app.state.timeline.selected = 1;
        app.remove_selected_event();
        assert_eq!(app.state.game.events.len(), 1);
        assert_eq!(app.state.game.team1.score, 1);
        assert!(!app.state.game.score_matches_log(TeamIndex::One));
        assert_eq!(app.state.timeline.selected, 0);
    }

    #[test]
    fn test_commentary_is_single_flight() {
        let mut app = app();
        let (generation, _) = app.request_commentary().unwrap();
        assert!(app.request_commentary().is_none());
        assert!(app.on_commentary(generation, "What a match!".into()));
        assert_eq!(app.state.commentary.text.as_deref(), Some("What a match!"));
        assert!(app.request_commentary().is_some());
    }

    #[test]
    fn test_commentary_from_before_reset_is_dropped() {
        let mut app = app();
        app.goal(TeamIndex::One);
        let (old, snapshot) = app.request_commentary().unwrap();
        assert_eq!(snapshot.team1.score, 1);

        app.request_reset();
        app.request_reset();
        let (current, snapshot) = app.request_commentary().unwrap();
        assert_ne!(old, current);
        assert_eq!(snapshot.team1.score, 0);

        assert!(!app.on_commentary(old, "Northbridge lead 1-0!".into()));
        assert!(app.state.commentary.pending);
        assert!(app.state.commentary.text.is_none());
        assert!(app.request_commentary().is_none());

        assert!(app.on_commentary(current, "Still goalless.".into()));
        assert!(!app.state.commentary.pending);
        assert_eq!(app.state.commentary.text.as_deref(), Some("Still goalless."));
    }

    #[test]
    fn test_possession_moves_in_steps() {
        let mut app = app();
        app.stats_select_team(TeamIndex::Two);
        app.stats_adjust(1);
        assert_eq!(app.state.stats.possession, [45, 55]);
        app.stats_next();
        app.stats_adjust(-1);
        assert_eq!(app.state.stats.shots, [0, 0]);
    }

    #[test]
    fn test_bad_setup_path_falls_back_to_bundled() {
        let (setup, problem) = load_setup(Some(Path::new("/no/such/setup.json")));
        assert_eq!(setup, MatchSetup::embedded().unwrap());
        assert!(problem.unwrap().contains("/no/such/setup.json"));
    }
}
