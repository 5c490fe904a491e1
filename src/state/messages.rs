use crate::state::commentary::LoadingState;
use crossterm::event::KeyEvent;
use matchday_api::MatchState;

#[derive(Debug, Clone)]
pub enum CommentaryRequest {
    /// `generation` is echoed back so answers about a match that has since
    /// been reset can be dropped.
    Generate { generation: u64, snapshot: Box<MatchState> },
}

#[derive(Debug)]
pub enum CommentaryResponse {
    LoadingStateChanged { loading_state: LoadingState },
    Generated { generation: u64, text: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
    /// One match minute elapsed on the wall clock.
    ClockTick,
}
