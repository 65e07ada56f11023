//! Terminal events for the TUI
//!
//! A reader thread polls crossterm and forwards keys, resizes and ticks
//! over a channel; the async loop awaits them. The thread stops once the
//! handler is dropped.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// No input within one tick period
    Tick,
    Resize(u16, u16),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || loop {
            let next = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                    Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                    _ => Event::Tick,
                },
                Ok(false) => Event::Tick,
                Err(_) => {
                    std::thread::sleep(tick_rate);
                    Event::Tick
                }
            };
            if tx.send(next).is_err() {
                break;
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_arrive_without_input() {
        let mut events = EventHandler::new(Duration::from_millis(10));
        let event = tokio::time::timeout(Duration::from_secs(5), events.next())
            .await
            .unwrap();
        assert!(matches!(event, Event::Tick | Event::Key(_) | Event::Resize(_, _)));
    }
}
