use crate::app::{App, MenuItem};
use crate::state::messages::CommentaryRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use matchday_api::EventKind;
use matchday_api::TeamIndex::{One, Two};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    commentary_requests: &mpsc::Sender<CommentaryRequest>,
) {
    let mut guard = app.lock().await;

    if guard.state.show_intro {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Enter, _) => guard.dismiss_intro(),
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => quit(),
            _ => {}
        }
        return;
    }

    if guard.state.editor.composing() {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => quit(),
            (KeyCode::Enter, _) => guard.commit_edit(),
            (KeyCode::Esc, _) => guard.editor_cancel(),
            (KeyCode::Backspace, _) => guard.editor_backspace(),
            (Char(ch), _) => guard.editor_push(ch),
            _ => {}
        }
        return;
    }

    if key_event.code != Char('R') {
        guard.disarm_reset();
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => quit(),

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Scoreboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Timeline),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Stats),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Penalties),
        (_, Char('5'), _) => guard.update_tab(MenuItem::Lineups),
        (_, Char('6'), _) => guard.update_tab(MenuItem::Standings),
        (_, Char('7'), _) => guard.update_tab(MenuItem::Control),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Match flow, available everywhere
        (_, Char(' '), _) => guard.toggle_timer(),
        (_, Char('n'), _) => guard.advance_status(),
        (_, Char('R'), _) => {
            guard.request_reset();
        }
        (_, Char('C'), _) => {
            if let Some((generation, snapshot)) = guard.request_commentary() {
                drop(guard);
                let _ = commentary_requests
                    .send(CommentaryRequest::Generate {
                        generation,
                        snapshot: Box::new(snapshot),
                    })
                    .await;
                return;
            }
        }

        // Goals and cards: lowercase for team 1, uppercase for team 2
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('g'), _) => guard.goal(One),
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('G'), _) => guard.goal(Two),
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('-'), _) => guard.score_correction(One),
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('_'), _) => guard.score_correction(Two),
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('y'), _) => {
            guard.card(EventKind::YellowCard, One)
        }
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('Y'), _) => {
            guard.card(EventKind::YellowCard, Two)
        }
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('x'), _) => {
            guard.card(EventKind::RedCard, One)
        }
        (MenuItem::Scoreboard | MenuItem::Timeline, Char('X'), _) => {
            guard.card(EventKind::RedCard, Two)
        }

        // Timeline navigation
        (MenuItem::Timeline, Char('j') | KeyCode::Down, _) => guard.timeline_down(),
        (MenuItem::Timeline, Char('k') | KeyCode::Up, _) => guard.timeline_up(),
        (MenuItem::Timeline, Char('d') | KeyCode::Delete, _) => guard.remove_selected_event(),

        // Penalties
        (MenuItem::Penalties, Char('s'), _) => guard.penalty_kick(One, true),
        (MenuItem::Penalties, Char('m'), _) => guard.penalty_kick(One, false),
        (MenuItem::Penalties, Char('u'), _) => guard.undo_penalty(One),
        (MenuItem::Penalties, Char('S'), _) => guard.penalty_kick(Two, true),
        (MenuItem::Penalties, Char('M'), _) => guard.penalty_kick(Two, false),
        (MenuItem::Penalties, Char('U'), _) => guard.undo_penalty(Two),

        // Stats
        (MenuItem::Stats, Char('j') | KeyCode::Down, _) => guard.stats_next(),
        (MenuItem::Stats, Char('k') | KeyCode::Up, _) => guard.stats_prev(),
        (MenuItem::Stats, Char('h') | KeyCode::Left, _) => guard.stats_select_team(One),
        (MenuItem::Stats, Char('l') | KeyCode::Right, _) => guard.stats_select_team(Two),
        (MenuItem::Stats, Char('+') | Char('='), _) => guard.stats_adjust(1),
        (MenuItem::Stats, Char('-'), _) => guard.stats_adjust(-1),

        // Lineups
        (MenuItem::Lineups, Char('h') | KeyCode::Left, _) => guard.lineups_select_team(One),
        (MenuItem::Lineups, Char('l') | KeyCode::Right, _) => guard.lineups_select_team(Two),
        (MenuItem::Lineups, Char('j') | KeyCode::Down, _) => guard.lineups_down(),
        (MenuItem::Lineups, Char('k') | KeyCode::Up, _) => guard.lineups_up(),
        (MenuItem::Lineups, Char('a'), _) => guard.begin_lineup_entry(),
        (MenuItem::Lineups, Char('d') | KeyCode::Delete, _) => guard.remove_selected_player(),
        (MenuItem::Lineups, KeyCode::Enter, _) => guard.use_selected_player(),

        // Standings
        (MenuItem::Standings, Char(']') | KeyCode::Tab, _) => guard.standings_next_group(),
        (MenuItem::Standings, Char('[') | KeyCode::BackTab, _) => guard.standings_prev_group(),
        (MenuItem::Standings, Char('j') | KeyCode::Down, _) => guard.standings_row_down(),
        (MenuItem::Standings, Char('k') | KeyCode::Up, _) => guard.standings_row_up(),
        (MenuItem::Standings, Char('l') | KeyCode::Right, _) => guard.standings_field_next(),
        (MenuItem::Standings, Char('h') | KeyCode::Left, _) => guard.standings_field_prev(),
        (MenuItem::Standings, Char('+') | Char('='), _) => guard.standings_adjust(1),
        (MenuItem::Standings, Char('-'), _) => guard.standings_adjust(-1),
        (MenuItem::Standings, Char('a'), _) => guard.standings_add_row(),
        (MenuItem::Standings, Char('d'), _) => guard.standings_remove_row(),
        (MenuItem::Standings, Char('e'), _) => guard.begin_rename_row(),
        (MenuItem::Standings, Char('A'), _) => guard.standings_add_group(),
        (MenuItem::Standings, Char('D'), _) => guard.standings_remove_group(),
        (MenuItem::Standings, Char('E'), _) => guard.begin_rename_group(),

        // Control panel
        (MenuItem::Control, Char('j') | KeyCode::Down, _) => guard.control_down(),
        (MenuItem::Control, Char('k') | KeyCode::Up, _) => guard.control_up(),
        (MenuItem::Control, KeyCode::Enter, _) => guard.begin_control_edit(),
        (MenuItem::Control, Char('+') | Char('='), _) => guard.nudge_minute(1),
        (MenuItem::Control, Char('-'), _) => guard.nudge_minute(-1),

        // Global
        (_, KeyCode::Esc, _) => guard.dismiss_notice(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn quit() {
    crate::cleanup_terminal();
    std::process::exit(0);
}
