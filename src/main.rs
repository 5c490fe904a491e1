mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::components::banner::FRAME_COUNT;
use crate::state::app_settings::AppSettings;
use crate::state::clock::MatchClock;
use crate::state::commentary::{CommentaryWorker, LoadingState};
use crate::state::messages::{CommentaryRequest, CommentaryResponse, UiEvent};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::info;
use matchday_api::CommentaryClient;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let settings = AppSettings::load();
    tui_logger::init_logger(settings.log_level)?;
    tui_logger::set_default_level(settings.log_level);
    settings.log_problems();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let mut client = CommentaryClient::new();
    if let Some(key) = settings.api_key.clone() {
        client = client.with_api_key(key);
    }
    if let Some(url) = settings.commentary_url.clone() {
        client = client.with_base_url(url);
    }
    if let Some(model) = settings.commentary_model.clone() {
        client = client.with_model(model);
    }
    if !client.has_api_key() {
        info!("no API key set, commentary will use stock lines");
    }
    let minute_duration = settings.minute_duration;

    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (commentary_req_tx, commentary_req_rx) = mpsc::channel::<CommentaryRequest>(100);
    let (commentary_resp_tx, commentary_resp_rx) = mpsc::channel::<CommentaryResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Commentary thread
    let commentary_worker = CommentaryWorker::new(client, commentary_req_rx, commentary_resp_tx);
    let commentary_task = tokio::spawn(commentary_worker.run());

    // Match clock, one tick per match minute
    let match_clock = MatchClock::new(ui_event_tx.clone(), minute_duration);
    let clock_task = tokio::spawn(match_clock.run());

    // Animation tick thread, 80ms
    let anim_tx = ui_event_tx.clone();
    let animation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(80));
        loop {
            interval.tick().await;
            if anim_tx.send(UiEvent::AnimationTick).await.is_err() {
                break;
            }
        }
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, commentary_req_tx, commentary_resp_rx).await;

    input_handler.abort();
    commentary_task.abort();
    clock_task.abort();
    animation_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("matchday {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "matchday - live football match console

Usage:
  matchday
  matchday --help
  matchday --version

Environment:
  MATCHDAY_SETUP_JSON        Path to a match setup JSON file (teams, lineups, groups)
  MATCHDAY_MINUTE_SECS       Real seconds per match minute (default 60)
  MATCHDAY_LOG               Log level for the log pane (default warn)
  MATCHDAY_COMMENTARY_URL    Base URL of the generative language API
  MATCHDAY_COMMENTARY_MODEL  Model used for commentary (default gemini-3-flash-preview)
  GEMINI_API_KEY, API_KEY    API key for live commentary"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    commentary_requests: mpsc::Sender<CommentaryRequest>,
    mut commentary_responses: mpsc::Receiver<CommentaryResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &commentary_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = commentary_responses.recv() => {
                let should_redraw = handle_commentary_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    commentary_requests: &mpsc::Sender<CommentaryRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted | UiEvent::Resize => true,
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, commentary_requests).await;
            true
        }
        UiEvent::ClockTick => {
            let mut guard = app.lock().await;
            guard.on_clock_tick()
        }
        UiEvent::AnimationTick => {
            let mut guard = app.lock().await;
            // Only the intro and celebrations animate.
            let animating = guard.state.show_intro || guard.state.celebration.is_some();
            guard.advance_animation(FRAME_COUNT);
            animating
        }
    }
}

async fn handle_commentary_response(
    response: CommentaryResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        CommentaryResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        CommentaryResponse::Generated { generation, text } => {
            let mut guard = app.lock().await;
            guard.on_commentary(generation, text);
        }
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
