use glam::Vec2;
use std::time::Duration;

/// Phase of a pointer event, following multi-touch conventions: the first
/// finger produces `Down`/`Up`, additional fingers `PointerDown`/`PointerUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Up,
    PointerDown,
    PointerUp,
    Move,
}

/// One pointer event with the positions of every pointer currently down.
///
/// For `Up`/`PointerUp` the lifting pointer is still included. `time` is
/// measured from an arbitrary host-chosen epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointers: Vec<Vec2>,
    pub time: Duration,
}

impl PointerEvent {
    pub fn new(action: PointerAction, pointers: Vec<Vec2>, time: Duration) -> Self {
        Self {
            action,
            pointers,
            time,
        }
    }

    /// Position of the primary pointer (index 0).
    pub fn position(&self) -> Vec2 {
        self.pointers.first().copied().unwrap_or_default()
    }

    /// Distance between pointers 0 and 1, if two are down.
    pub fn spacing(&self) -> Option<f32> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}

/// Per-finger phase as reported by a windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Folds per-finger touch updates into [`PointerEvent`]s.
///
/// Pointer indices follow the order in which fingers went down, so index 0 is
/// always the oldest finger still on the screen.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: Vec<(u64, Vec2)>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingers currently down.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Record an update for finger `id`. Returns `None` for updates about
    /// fingers the tracker never saw go down.
    pub fn update(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: Vec2,
        time: Duration,
    ) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started => {
                if let Some(slot) = self.slot(id) {
                    self.active[slot].1 = position;
                    return Some(self.event(PointerAction::Move, time));
                }
                self.active.push((id, position));
                let action = if self.active.len() == 1 {
                    PointerAction::Down
                } else {
                    PointerAction::PointerDown
                };
                Some(self.event(action, time))
            }
            TouchPhase::Moved => {
                let slot = self.slot(id)?;
                self.active[slot].1 = position;
                Some(self.event(PointerAction::Move, time))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let slot = self.slot(id)?;
                self.active[slot].1 = position;
                let action = if self.active.len() == 1 {
                    PointerAction::Up
                } else {
                    PointerAction::PointerUp
                };
                let event = self.event(action, time);
                self.active.remove(slot);
                Some(event)
            }
        }
    }

    fn slot(&self, id: u64) -> Option<usize> {
        self.active.iter().position(|(active_id, _)| *active_id == id)
    }

    fn event(&self, action: PointerAction, time: Duration) -> PointerEvent {
        PointerEvent::new(
            action,
            self.active.iter().map(|(_, p)| *p).collect(),
            time,
        )
    }
}
