use crate::pointer::{PointerAction, PointerEvent};
use glam::Vec2;
use std::collections::VecDeque;
use std::time::Duration;

/// Movement in pixels after which a press can no longer become a tap.
pub const TOUCH_SLOP: f32 = 8.0;

/// Presses held longer than this are not taps.
pub const LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);

/// Release velocity (px/s) on either axis needed to count as a fling.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Fling velocities are clamped to this many px/s per axis.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Only samples this recent contribute to the release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// A gesture recognised from a completed pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    SingleTap,
    /// Release velocity in pixels per second.
    Fling { velocity: Vec2 },
}

#[derive(Debug, Clone, Copy)]
struct Press {
    position: Vec2,
    time: Duration,
}

/// Recognises taps and flings from single-finger pointer sequences.
///
/// Only the releasing `Up` event can be claimed; every other event passes
/// through so drags and pinches keep working while a gesture is tracked.
#[derive(Debug, Default)]
pub struct GestureDetector {
    press: Option<Press>,
    tap_candidate: bool,
    multi_touch: bool,
    samples: VecDeque<(Duration, Vec2)>,
}

impl GestureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer event. `Some` means the event was consumed.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Option<Gesture> {
        let position = event.position();

        match event.action {
            PointerAction::Down => {
                self.press = Some(Press {
                    position,
                    time: event.time,
                });
                self.tap_candidate = true;
                self.multi_touch = false;
                self.samples.clear();
                self.record(event.time, position);
                None
            }
            PointerAction::PointerDown => {
                self.tap_candidate = false;
                self.multi_touch = true;
                None
            }
            PointerAction::PointerUp => None,
            PointerAction::Move => {
                self.record(event.time, position);
                self.check_slop(position);
                None
            }
            PointerAction::Up => {
                self.record(event.time, position);
                self.check_slop(position);
                let press = self.press.take()?;
                if self.multi_touch {
                    return None;
                }

                let held = event.time.saturating_sub(press.time);
                if self.tap_candidate && held < LONG_PRESS_TIMEOUT {
                    return Some(Gesture::SingleTap);
                }

                let velocity = self.velocity();
                if velocity.x.abs() > MIN_FLING_VELOCITY || velocity.y.abs() > MIN_FLING_VELOCITY {
                    let velocity = velocity.clamp(
                        Vec2::splat(-MAX_FLING_VELOCITY),
                        Vec2::splat(MAX_FLING_VELOCITY),
                    );
                    return Some(Gesture::Fling { velocity });
                }
                None
            }
        }
    }

    fn check_slop(&mut self, position: Vec2) {
        if let Some(press) = self.press {
            if position.distance(press.position) > TOUCH_SLOP {
                self.tap_candidate = false;
            }
        }
    }

    fn record(&mut self, time: Duration, position: Vec2) {
        let horizon = time.saturating_sub(VELOCITY_WINDOW);
        while self.samples.front().is_some_and(|(t, _)| *t < horizon) {
            self.samples.pop_front();
        }
        self.samples.push_back((time, position));
    }

    /// Average velocity across the retained samples, in px/s.
    fn velocity(&self) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.front(), self.samples.back()) else {
            return Vec2::ZERO;
        };
        let dt = t1.saturating_sub(t0).as_secs_f32();
        if dt <= f32::EPSILON {
            return Vec2::ZERO;
        }
        (p1 - p0) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(action: PointerAction, x: f32, y: f32, ms: u64) -> PointerEvent {
        PointerEvent::new(action, vec![Vec2::new(x, y)], Duration::from_millis(ms))
    }

    #[test]
    fn quick_press_is_a_tap() {
        let mut detector = GestureDetector::new();
        assert_eq!(detector.on_pointer_event(&ev(PointerAction::Down, 10.0, 10.0, 0)), None);
        assert_eq!(detector.on_pointer_event(&ev(PointerAction::Move, 12.0, 11.0, 40)), None);
        assert_eq!(
            detector.on_pointer_event(&ev(PointerAction::Up, 12.0, 11.0, 80)),
            Some(Gesture::SingleTap)
        );
    }

    #[test]
    fn long_press_is_not_a_tap() {
        let mut detector = GestureDetector::new();
        detector.on_pointer_event(&ev(PointerAction::Down, 10.0, 10.0, 0));
        assert_eq!(detector.on_pointer_event(&ev(PointerAction::Up, 10.0, 10.0, 900)), None);
    }

    #[test]
    fn fast_release_is_a_fling() {
        let mut detector = GestureDetector::new();
        detector.on_pointer_event(&ev(PointerAction::Down, 0.0, 0.0, 0));
        detector.on_pointer_event(&ev(PointerAction::Move, 50.0, 0.0, 50));
        let gesture = detector.on_pointer_event(&ev(PointerAction::Up, 100.0, 0.0, 100));
        match gesture {
            Some(Gesture::Fling { velocity }) => {
                assert!((velocity.x - 1000.0).abs() < 1.0);
                assert!(velocity.y.abs() < 1e-3);
            }
            other => panic!("expected fling, got {other:?}"),
        }
    }

    #[test]
    fn slow_drag_release_passes_through() {
        let mut detector = GestureDetector::new();
        detector.on_pointer_event(&ev(PointerAction::Down, 0.0, 0.0, 0));
        detector.on_pointer_event(&ev(PointerAction::Move, 30.0, 0.0, 600));
        detector.on_pointer_event(&ev(PointerAction::Move, 31.0, 0.0, 700));
        assert_eq!(detector.on_pointer_event(&ev(PointerAction::Up, 32.0, 0.0, 790)), None);
    }

    #[test]
    fn fling_velocity_is_clamped() {
        let mut detector = GestureDetector::new();
        detector.on_pointer_event(&ev(PointerAction::Down, 0.0, 0.0, 0));
        let gesture = detector.on_pointer_event(&ev(PointerAction::Up, 0.0, 2000.0, 10));
        assert_eq!(
            gesture,
            Some(Gesture::Fling {
                velocity: Vec2::new(0.0, MAX_FLING_VELOCITY)
            })
        );
    }

    #[test]
    fn multi_touch_suppresses_gestures() {
        let mut detector = GestureDetector::new();
        detector.on_pointer_event(&ev(PointerAction::Down, 0.0, 0.0, 0));
        detector.on_pointer_event(&PointerEvent::new(
            PointerAction::PointerDown,
            vec![Vec2::ZERO, Vec2::new(100.0, 0.0)],
            Duration::from_millis(10),
        ));
        detector.on_pointer_event(&ev(PointerAction::PointerUp, 0.0, 0.0, 20));
        assert_eq!(detector.on_pointer_event(&ev(PointerAction::Up, 0.0, 0.0, 30)), None);
    }

    #[test]
    fn up_without_down_is_not_claimed() {
        let mut detector = GestureDetector::new();
        assert_eq!(detector.on_pointer_event(&ev(PointerAction::Up, 0.0, 0.0, 30)), None);
    }
}
