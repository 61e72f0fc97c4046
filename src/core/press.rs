use std::time::{Duration, Instant};

/// Hold time that turns a press into a long press.
pub const LONG_PRESS: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Tap,
    Long,
}

/// Press-and-hold detector driven by explicit timestamps.
///
/// For front-ends that can report how long a press was held. The terminal
/// session cannot, so it sends [`Event::LongPress`](crate::core::Event)
/// from its "Surprise me" option instead.
#[derive(Debug, Default)]
pub struct PressTimer {
    started: Option<Instant>,
}

impl PressTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, at: Instant) {
        self.started = Some(at);
    }

    pub fn cancel(&mut self) {
        self.started = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.started.is_some()
    }

    /// Returns `None` for a release without a matching press.
    pub fn release(&mut self, at: Instant) -> Option<PressKind> {
        let started = self.started.take()?;
        Some(classify(at.saturating_duration_since(started)))
    }
}

pub fn classify(held: Duration) -> PressKind {
    if held >= LONG_PRESS {
        PressKind::Long
    } else {
        PressKind::Tap
    }
}
