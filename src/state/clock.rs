use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Wall-clock driver for the match minute. Sends a `ClockTick` every period;
/// whether the minute actually moves is up to the match record.
pub struct MatchClock {
    ui_events: mpsc::Sender<UiEvent>,
    period: Duration,
}

impl MatchClock {
    pub fn new(ui_events: mpsc::Sender<UiEvent>, period: Duration) -> Self {
        Self { ui_events, period }
    }

    pub async fn run(self) {
        let mut minute_interval = interval(self.period);
        // The first tick fires immediately; a minute has not passed yet.
        minute_interval.tick().await;

        loop {
            minute_interval.tick().await;
            if self.ui_events.send(UiEvent::ClockTick).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_a_full_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let task = tokio::spawn(MatchClock::new(tx, Duration::from_secs(60)).run());

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(matches!(rx.recv().await, Some(UiEvent::ClockTick)));
        task.abort();
    }
}
