use chrono::Local;
use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, MenuItem};
use crate::components::banner::AnimatedBanner;
use crate::components::banner_frames::{BannerTheme, BannerTitle};
use crate::components::shootout::ShootoutView;
use crate::state::app_state::{CONTROL_FIELDS, CelebrationKind};
use crate::state::commentary::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use matchday_api::{EventKind, MatchEvent, MatchState, RowField, StatKind, TeamIndex};

static TABS: &[&str; 7] = &[
    "Scoreboard",
    "Timeline",
    "Stats",
    "Penalties",
    "Lineups",
    "Standings",
    "Control",
];

const HELP_TEXT: &str = "\
Tabs     1 Scoreboard  2 Timeline  3 Stats  4 Penalties  5 Lineups  6 Standings  7 Control  ? Help

Match    space  start/stop clock        n  next phase
         C      ask for commentary      R  reset match (press twice)

Events   g / G  goal team 1 / team 2    - / _  take a goal off team 1 / team 2
         y / Y  yellow card             x / X  red card
         (Scoreboard and Timeline; the player set in Control or Lineups is attached)

Timeline j/k  move                      d  delete entry (scores are not changed)

Shootout s / S  scored                  m / M  missed           u / U  undo last kick
         (lowercase team 1, uppercase team 2; kicks must alternate)

Stats    j/k  stat   h/l  team   + / -  adjust

Lineups  h/l  team   j/k  player   a  add \"10 Name\"   d  remove   Enter  use for next event

Standings [ / ]  group   j/k  row   h/l  column   + / -  adjust
         a / d  add / remove team   e  rename team   A / D  add / remove group   E  rename group

Control  j/k  field   Enter  edit   + / -  minute

General  f  full screen   \"  log pane   Esc  dismiss notice   q  quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        let area = f.area();
        if app.state.show_intro {
            draw_intro(f, area, app);
            return;
        }

        layout.update(area, app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_notice(f, layout.notice, app);
        }

        match app.state.active_tab {
            MenuItem::Scoreboard => draw_scoreboard(f, layout.main, app, loading),
            MenuItem::Timeline => draw_timeline(f, layout.main, app),
            MenuItem::Stats => draw_stats(f, layout.main, app),
            MenuItem::Penalties => draw_penalties(f, layout.main, app),
            MenuItem::Lineups => draw_lineups(f, layout.main, app),
            MenuItem::Standings => draw_standings(f, layout.main, app),
            MenuItem::Control => draw_control(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if app.state.editor.composing() {
            draw_editor(f, layout.main, app);
        }
        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        if app.state.celebration.is_some() {
            draw_celebration(f, layout.main, app);
        }

        draw_loading_spinner(f, area, app, loading);
    });
    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn team_color(team: TeamIndex) -> Color {
    match team {
        TeamIndex::One => Color::Rgb(66, 135, 245),
        TeamIndex::Two => Color::Rgb(235, 87, 87),
    }
}

fn fixture(game: &MatchState) -> String {
    format!("{} vs {}", game.team1.name, game.team2.name)
}

fn draw_intro(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(format!(" {} ", app.state.game.competition));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_top_pad, banner_area, venue_area, prompt_area, _bottom_pad] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let caption = fixture(&app.state.game);
    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            theme: BannerTheme::Dark,
            title: BannerTitle::Matchday,
            caption: &caption,
        },
        banner_area,
    );
    f.render_widget(
        Paragraph::new(app.state.game.stadium.as_str())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        venue_area,
    );
    f.render_widget(
        Paragraph::new("Press Enter to open the scoreboard")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        prompt_area,
    );
}

fn draw_celebration(f: &mut Frame, area: Rect, app: &App) {
    let Some(celebration) = app.state.celebration.as_ref() else {
        return;
    };
    let game = &app.state.game;
    let (title, caption) = match &celebration.kind {
        CelebrationKind::Goal { team, scorer } => {
            let who = scorer.as_deref().unwrap_or(&game.team(*team).name);
            (
                BannerTitle::Goal,
                format!(
                    "{who} {}'  {} {} - {} {}",
                    game.minute, game.team1.name, game.team1.score, game.team2.score, game.team2.name
                ),
            )
        }
        CelebrationKind::Champions { team } => (
            BannerTitle::Champions,
            format!("{} win the {}", game.team(*team).name, game.competition),
        ),
    };

    let [_, middle, _] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(9), Constraint::Fill(1)]).areas(area);
    f.render_widget(Clear, middle);
    f.render_widget(
        AnimatedBanner {
            frame: app.state.animation.frame,
            tick: app.state.animation.tick,
            theme: BannerTheme::Dark,
            title,
            caption: &caption,
        },
        middle,
    );
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Scoreboard => 0,
        MenuItem::Timeline => 1,
        MenuItem::Stats => 2,
        MenuItem::Penalties => 3,
        MenuItem::Lineups => 4,
        MenuItem::Standings => 5,
        MenuItem::Control => 6,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_notice(f: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = app.state.notice.as_deref() else {
        return;
    };
    let style = if app.state.reset_armed {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Yellow)
    };
    f.render_widget(Paragraph::new(format!(" {notice}")).style(style), area);
}

// ---------------------------------------------------------------------------
// Scoreboard
// ---------------------------------------------------------------------------

fn draw_scoreboard(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let game = &app.state.game;
    let block = default_border(Color::White).title(format!(" {} | {} ", game.competition, game.stadium));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [score_area, status_area, hint_area, _, commentary_area, recent_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(inner);

    draw_score_line(f, score_area, game);
    draw_status_line(f, status_area, app);

    let mut hints = Vec::new();
    for team in TeamIndex::BOTH {
        if !game.score_matches_log(team) {
            hints.push(format!(
                "{} score {} but {} goals logged",
                game.team(team).name,
                game.team(team).score,
                game.events.goals_for(team)
            ));
        }
    }
    if !hints.is_empty() {
        f.render_widget(
            Paragraph::new(hints.join("  |  "))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            hint_area,
        );
    }

    draw_commentary(f, commentary_area, app, loading);
    draw_recent_events(f, recent_area, game);
}

fn draw_score_line(f: &mut Frame, area: Rect, game: &MatchState) {
    let [left, middle, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .areas(area);

    let name_style = |team| {
        Style::default()
            .fg(team_color(team))
            .add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(game.team1.name.as_str(), name_style(TeamIndex::One))),
        ])
        .alignment(Alignment::Right),
        left,
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{}  -  {}", game.team1.score, game.team2.score),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(Block::default().borders(Borders::LEFT | Borders::RIGHT))
        .alignment(Alignment::Center),
        middle,
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(game.team2.name.as_str(), name_style(TeamIndex::Two))),
        ]),
        right,
    );
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let mut spans = Vec::new();
    if game.status.is_live() {
        spans.push(Span::styled(
            " LIVE ",
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        game.status_label(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));
    if !game.team1.penalties.is_empty() || !game.team2.penalties.is_empty() {
        spans.push(Span::raw(format!(
            "  ({} - {} pens)",
            game.penalty_score(TeamIndex::One),
            game.penalty_score(TeamIndex::Two)
        )));
    }
    let clock = if game.is_timer_running { "  clock running" } else { "  clock stopped" };
    spans.push(Span::styled(clock, Style::default().fg(Color::DarkGray)));

    let mut next = Vec::new();
    if let Some(label) = game.status.transition_label() {
        next.push(Span::styled("n ", Style::default().fg(Color::Yellow)));
        next.push(Span::styled(label, Style::default().fg(Color::Gray)));
    }
    if let Some(player) = app.state.next_player.as_deref() {
        next.push(Span::styled(
            format!("   next event: {player}"),
            Style::default().fg(Color::Cyan),
        ));
    }

    f.render_widget(
        Paragraph::new(vec![Line::from(spans), Line::from(next)]).alignment(Alignment::Center),
        area,
    );
}

fn draw_commentary(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let commentary = &app.state.commentary;
    let title = match commentary.updated_at {
        Some(at) => format!(" Commentary {} ", at.format("%H:%M:%S")),
        None => " Commentary ".to_string(),
    };
    let block = default_border(Color::DarkGray).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (text, style) = if commentary.pending {
        (
            format!("{} waiting for the commentator...", loading.spinner_char),
            Style::default().fg(Color::DarkGray),
        )
    } else if let Some(text) = commentary.text.as_deref() {
        (format!("\"{text}\""), Style::default().fg(Color::White).add_modifier(Modifier::ITALIC))
    } else {
        ("Press C for a line of live commentary".to_string(), Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(text).style(style).wrap(Wrap { trim: true }), inner);
}

fn draw_recent_events(f: &mut Frame, area: Rect, game: &MatchState) {
    let block = default_border(Color::DarkGray).title(" Recent ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if game.events.is_empty() {
        f.render_widget(
            Paragraph::new("No events yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    let lines: Vec<Line> = game
        .events
        .by_minute_desc()
        .into_iter()
        .take(inner.height as usize)
        .map(|e| event_line(e, game, false))
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn event_line<'a>(event: &'a MatchEvent, game: &'a MatchState, selected: bool) -> Line<'a> {
    let kind_style = match event.kind {
        EventKind::Goal => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        EventKind::YellowCard => Style::default().fg(Color::Yellow),
        EventKind::RedCard => Style::default().fg(Color::Red),
    };
    let marker = if selected { "> " } else { "  " };
    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("{:>3}' ", event.minute), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:<12}", event.kind.label()), kind_style),
        Span::styled(
            game.team(event.team_index).name.as_str(),
            Style::default().fg(team_color(event.team_index)),
        ),
    ];
    if let Some(player) = event.player.as_deref() {
        spans.push(Span::raw(format!("  ({player})")));
    }
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        line
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

fn draw_timeline(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let block = default_border(Color::White).title(format!(" Timeline ({} events) ", game.events.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if game.events.is_empty() {
        draw_empty(f, inner, "No events yet. g/G goal, y/Y yellow, x/X red");
        return;
    }

    let events = game.events.by_minute_desc();
    let visible = inner.height as usize;
    let selected = app.state.timeline.selected;
    let start = selected.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = events
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(idx, e)| {
            let mut line = event_line(e, game, idx == selected);
            let logged = e.recorded_at.with_timezone(&Local).format("  %H:%M:%S").to_string();
            line.spans.push(Span::styled(logged, Style::default().fg(Color::DarkGray)));
            line
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Split `width` cells between two values in proportion. Equal halves when both are zero.
pub fn split_bar(left: u32, right: u32, width: u16) -> (u16, u16) {
    let total = u64::from(left) + u64::from(right);
    if total == 0 {
        let half = width / 2;
        return (half, width - half);
    }
    let left_cells = (u64::from(left) * u64::from(width) + total / 2) / total;
    let left_cells = left_cells as u16;
    (left_cells, width - left_cells)
}

fn draw_stats(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let block = default_border(Color::White).title(" Match Stats ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let selected_team = app.state.stats_view.team;
    let header = Line::from(vec![
        Span::styled(
            game.team1.name.as_str(),
            team_header_style(TeamIndex::One, selected_team),
        ),
        Span::raw("   vs   "),
        Span::styled(
            game.team2.name.as_str(),
            team_header_style(TeamIndex::Two, selected_team),
        ),
    ]);

    let mut lines = vec![header.alignment(Alignment::Center), Line::from("")];
    let bar_width = inner.width.saturating_sub(16).min(60);
    for stat in StatKind::ALL {
        let [left, right] = app.state.stats.get(stat);
        let selected = stat == app.state.stats_view.selected_stat();
        let label_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let suffix = if stat == StatKind::Possession { "%" } else { "" };
        lines.push(Line::from(Span::styled(stat.label(), label_style)).alignment(Alignment::Center));

        let (l, r) = split_bar(left, right, bar_width);
        lines.push(
            Line::from(vec![
                Span::raw(format!("{left:>4}{suffix:<2} ")),
                Span::styled("█".repeat(l as usize), Style::default().fg(team_color(TeamIndex::One))),
                Span::styled("█".repeat(r as usize), Style::default().fg(team_color(TeamIndex::Two))),
                Span::raw(format!(" {right:<4}{suffix}")),
            ])
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(""));
    }
    lines.push(
        Line::from(Span::styled(
            "j/k stat  h/l team  +/- adjust",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    );
    f.render_widget(Paragraph::new(lines), inner);
}

fn team_header_style(team: TeamIndex, selected: TeamIndex) -> Style {
    let style = Style::default().fg(team_color(team)).add_modifier(Modifier::BOLD);
    if team == selected {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

// ---------------------------------------------------------------------------
// Penalties
// ---------------------------------------------------------------------------

fn draw_penalties(f: &mut Frame, area: Rect, app: &App) {
    let game = &app.state.game;
    let block = default_border(Color::White).title(format!(
        " Penalty Shootout  {} - {} ",
        game.penalty_score(TeamIndex::One),
        game.penalty_score(TeamIndex::Two)
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [_, grid, _, info, keys] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
    ])
    .areas(inner);

    let [_, grid] = Layout::horizontal([Constraint::Length(2), Constraint::Fill(1)]).areas(grid);
    let next = game.next_kicker();
    f.render_widget(
        ShootoutView {
            team1: &game.team1,
            team2: &game.team2,
            next,
            theme: BannerTheme::Dark,
        },
        grid,
    );

    let info_text = match next {
        Some(team) => format!("Next to kick: {}", game.team(team).name),
        None => format!("{} has an extra kick recorded; undo it (U) to continue", game.team2.name),
    };
    f.render_widget(
        Paragraph::new(info_text).style(Style::default().fg(Color::Gray)),
        info,
    );
    f.render_widget(
        Paragraph::new("s/m scored/missed team 1   S/M team 2   u/U undo last kick")
            .style(Style::default().fg(Color::DarkGray)),
        keys,
    );
}

// ---------------------------------------------------------------------------
// Lineups
// ---------------------------------------------------------------------------

fn draw_lineups(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Lineups ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(inner);
    for (team, column) in [(TeamIndex::One, left), (TeamIndex::Two, right)] {
        let active = app.state.lineups_view.team == team;
        let block = default_border(if active { team_color(team) } else { Color::DarkGray })
            .title(format!(" {} ", app.state.game.team(team).name));
        let list_area = block.inner(column);
        f.render_widget(block, column);

        let lineup = app.state.lineup(team);
        if lineup.is_empty() {
            draw_empty(f, list_area, "No players. a to add");
            continue;
        }
        let lines: Vec<Line> = lineup
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let line = Line::from(format!("{:>3}  {}", p.number, p.name));
                if active && idx == app.state.lineups_view.selected {
                    line.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    line
                }
            })
            .collect();
        f.render_widget(Paragraph::new(lines), list_area);
    }
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

fn draw_standings(f: &mut Frame, area: Rect, app: &App) {
    let standings = &app.state.standings;
    let view = &app.state.standings_view;
    let title = match app.state.selected_group() {
        Some(group) => format!(" {} ({}/{}) ", group.name, view.group + 1, standings.groups.len()),
        None => " Standings ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(group) = app.state.selected_group() else {
        draw_empty(f, inner, "No groups. A to add one");
        return;
    };

    let [table_area, keys] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    let selected_field = view.selected_field();

    let mut header_cells = vec![Cell::from("#"), Cell::from("Team")];
    for field in RowField::ALL {
        let style = if field == selected_field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        header_cells.push(Cell::from(field.header()).style(style));
        if field == RowField::GoalsAgainst {
            header_cells.push(Cell::from("GD").style(Style::default().fg(Color::Gray)));
        }
    }

    let rows: Vec<Row> = group
        .sorted_rows()
        .into_iter()
        .enumerate()
        .map(|(rank, row)| {
            let mut cells = vec![Cell::from((rank + 1).to_string()), Cell::from(row.team_name.clone())];
            for field in RowField::ALL {
                cells.push(Cell::from(row.get(field).to_string()));
                if field == RowField::GoalsAgainst {
                    cells.push(Cell::from(format!("{:+}", row.goal_difference())));
                }
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(3), Constraint::Fill(1)];
    widths.extend(std::iter::repeat_n(Constraint::Length(4), RowField::ALL.len() + 1));

    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).bottom_margin(1))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut table_state = TableState::default().with_selected(Some(view.row));
    f.render_stateful_widget(table, table_area, &mut table_state);

    f.render_widget(
        Paragraph::new("[/] group  j/k row  h/l column  +/- adjust  a/d team  e rename  A/D group  E rename group")
            .style(Style::default().fg(Color::DarkGray)),
        keys,
    );
}

// ---------------------------------------------------------------------------
// Control panel
// ---------------------------------------------------------------------------

fn draw_control(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Match Control ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::with_capacity(CONTROL_FIELDS.len() + 2);
    for (idx, field) in CONTROL_FIELDS.iter().enumerate() {
        let selected = idx == app.state.control.selected;
        let value = app.field_value(*field);
        let value = if value.is_empty() { "-".to_string() } else { value };
        let line = Line::from(vec![
            Span::styled(
                format!("{:<24}", field.prompt()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(value, Style::default().fg(Color::White)),
        ]);
        lines.push(if selected {
            line.style(Style::default().add_modifier(Modifier::REVERSED))
        } else {
            line
        });
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k field  Enter edit  +/- minute  R reset match",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_editor(f: &mut Frame, area: Rect, app: &App) {
    let Some(target) = app.state.editor.target() else {
        return;
    };
    let height = 3.min(area.height);
    let input_area = Rect::new(area.x, area.y + area.height - height, area.width, height);
    f.render_widget(Clear, input_area);

    let input_block = default_border(Color::Yellow).title(format!(" {} (Enter save, Esc cancel) ", target.prompt()));
    let input_inner = input_block.inner(input_area);
    f.render_widget(input_block, input_area);
    f.render_widget(
        Paragraph::new(format!("> {}_", app.state.editor.input))
            .style(Style::default().fg(Color::Yellow)),
        input_inner,
    );
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help (Esc to go back) ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Log "))
        .output_separator(' ')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_empty(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use matchday_api::MatchSetup;
    use tui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        let mut app = App::with_setup(AppSettings::default(), MatchSetup::embedded().unwrap());
        app.dismiss_intro();
        app
    }

    #[test]
    fn test_split_bar() {
        assert_eq!(split_bar(0, 0, 11), (5, 6));
        assert_eq!(split_bar(50, 50, 40), (20, 20));
        assert_eq!(split_bar(3, 1, 40), (30, 10));
        assert_eq!(split_bar(7, 0, 9), (9, 0));
    }

    #[test]
    fn test_scoreboard_shows_score_and_badge() {
        let mut app = app();
        app.goal(TeamIndex::One);
        app.state.celebration = None;
        app.state.game.set_minute(34);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen_text(&terminal);
        assert!(text.contains("Northbridge FC"));
        assert!(text.contains("1  -  0"));
        assert!(text.contains(" LIVE "));
        assert!(text.contains("34'"));
        assert!(text.contains("Finish Regular Time"));
    }

    #[test]
    fn test_every_tab_renders() {
        let mut app = app();
        app.goal(TeamIndex::Two);
        app.penalty_kick(TeamIndex::One, true);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for tab in [
            MenuItem::Scoreboard,
            MenuItem::Timeline,
            MenuItem::Stats,
            MenuItem::Penalties,
            MenuItem::Lineups,
            MenuItem::Standings,
            MenuItem::Control,
            MenuItem::Help,
        ] {
            app.update_tab(tab);
            draw(&mut terminal, &mut app, LoadingState::default());
        }
        app.update_tab(MenuItem::Control);
        app.begin_control_edit();
        draw(&mut terminal, &mut app, LoadingState::default());
        assert!(screen_text(&terminal).contains("Enter save"));
    }

    #[test]
    fn test_standings_table_is_ranked() {
        let mut app = app();
        app.update_tab(MenuItem::Standings);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        draw(&mut terminal, &mut app, LoadingState::default());
        let text = screen_text(&terminal);
        let group = app.state.selected_group().unwrap();
        let leader = &group.sorted_rows()[0].team_name;
        assert!(text.contains(group.name.as_str()));
        assert!(text.contains(leader.as_str()));
        assert!(text.contains("Pts"));
    }
}
