use crate::state::messages::{CommentaryRequest, CommentaryResponse};
use log::{debug, error};
use matchday_api::MatchState;
use matchday_api::commentary::{CommentaryClient, fallback_text};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Runs commentary requests one at a time, off the UI loop.
pub struct CommentaryWorker {
    client: CommentaryClient,
    requests: mpsc::Receiver<CommentaryRequest>,
    responses: mpsc::Sender<CommentaryResponse>,
    is_loading: Arc<AtomicBool>,
}

impl CommentaryWorker {
    pub fn new(
        client: CommentaryClient,
        requests: mpsc::Receiver<CommentaryRequest>,
        responses: mpsc::Sender<CommentaryResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let (generation, text, is_ok) = match request {
                CommentaryRequest::Generate { generation, snapshot } => {
                    let (text, is_ok) = self.handle_generate(&snapshot).await;
                    (generation, text, is_ok)
                }
            };

            debug!("commentary request complete");
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self
                .responses
                .send(CommentaryResponse::Generated { generation, text })
                .await
            {
                error!("Failed to send commentary response: {e}");
                break;
            }
        }
    }

    async fn handle_generate(&self, snapshot: &MatchState) -> (String, bool) {
        let result = self.client.try_generate(snapshot).await;
        let is_ok = result.is_ok();
        (fallback_text(result), is_ok)
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(CommentaryResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(CommentaryResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(CommentaryResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchday_api::commentary::ERROR_FALLBACK;

    #[tokio::test]
    async fn test_missing_key_still_answers_with_fallback() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = CommentaryWorker::new(CommentaryClient::new(), req_rx, resp_tx);
        let task = tokio::spawn(worker.run());

        req_tx
            .send(CommentaryRequest::Generate { generation: 3, snapshot: Box::new(MatchState::default()) })
            .await
            .unwrap();

        let mut last_loading = None;
        let text = loop {
            match resp_rx.recv().await.unwrap() {
                CommentaryResponse::LoadingStateChanged { loading_state } => {
                    last_loading = Some(loading_state);
                }
                CommentaryResponse::Generated { generation, text } => {
                    assert_eq!(generation, 3);
                    break text;
                }
            }
        };
        assert_eq!(text, ERROR_FALLBACK);
        let last = last_loading.unwrap();
        assert!(!last.is_loading);
        assert_eq!(last.spinner_char, ERROR_CHAR);
        task.abort();
    }
}
