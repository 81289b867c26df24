use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse,
    Resize,
    Tick,
}

/// Terminal event source: crossterm's async stream multiplexed with a fixed
/// tick used for spinners and submission polling.
pub struct EventHandler {
    stream: EventStream,
    tick: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            stream: EventStream::new(),
            tick,
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                maybe_event = self.stream.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => {
                            // Windows terminals deliver release events too
                            if key.kind == KeyEventKind::Press {
                                return Some(Event::Key(key));
                            }
                        }
                        Some(Ok(CrosstermEvent::Mouse(_))) => return Some(Event::Mouse),
                        Some(Ok(CrosstermEvent::Resize(_, _))) => return Some(Event::Resize),
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => return None,
                    }
                }
                _ = self.tick.tick() => return Some(Event::Tick),
            }
        }
    }
}
