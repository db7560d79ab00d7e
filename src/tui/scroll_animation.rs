//! Smooth scroll animation for the message list.
//!
//! Scrolling to the newest message glides instead of jumping. The animation
//! uses:
//! - Adaptive target velocity based on distance (faster when far, slower when close)
//! - Momentum smoothing (low-pass filter) so the motion eases in and out
//! - Frame-rate independent delta-time calculations
//!
//! Positions are in terminal lines. The target is supplied on every tick so
//! content that grows mid-animation is still followed to the end.

use std::time::Duration;

/// Minimum target scroll speed in lines per second (when very close to target)
const MIN_SCROLL_SPEED_LINES_PER_SEC: f32 = 8.0;

/// Maximum target scroll speed in lines per second (when far from target)
const MAX_SCROLL_SPEED_LINES_PER_SEC: f32 = 120.0;

/// Distance at which we reach max scroll speed (lines)
const FULL_SPEED_DISTANCE: f32 = 40.0;

/// Time constant for velocity increase
const VELOCITY_ATTACK_TIME: f32 = 0.05;

/// Time constant for velocity decrease
const VELOCITY_DECAY_TIME: f32 = 0.20;

/// Distance below which the animation snaps to the target (lines)
const SNAP_THRESHOLD: f32 = 0.5;

/// Longest frame delta honoured, so a stalled loop does not teleport
const MAX_DELTA_SECS: f32 = 0.05;

/// Momentum-based scroll toward a target line offset
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimation {
    /// Fractional position, tracked separately from the rendered offset
    position: f32,
    /// Current velocity in lines per second
    velocity: f32,
    active: bool,
}

impl ScrollAnimation {
    /// Begin animating from `offset`. A running animation keeps its momentum.
    pub fn start(&mut self, offset: usize) {
        if !self.active {
            self.position = offset as f32;
            self.active = true;
        }
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.velocity = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `delta` toward `target`, returning the offset to render.
    pub fn tick(&mut self, delta: Duration, target: usize) -> usize {
        if !self.active {
            return self.position.round() as usize;
        }

        let target = target as f32;
        let distance = target - self.position;

        if distance.abs() < SNAP_THRESHOLD || distance < 0.0 {
            // Content shrank below us or we are close enough: land exactly
            self.position = target;
            self.stop();
            return target as usize;
        }

        let dt = delta.as_secs_f32().min(MAX_DELTA_SECS);

        let speed_factor = (distance / FULL_SPEED_DISTANCE).min(1.0);
        let target_speed = MIN_SCROLL_SPEED_LINES_PER_SEC
            + (MAX_SCROLL_SPEED_LINES_PER_SEC - MIN_SCROLL_SPEED_LINES_PER_SEC) * speed_factor;

        let time_constant = if target_speed > self.velocity {
            VELOCITY_ATTACK_TIME
        } else {
            VELOCITY_DECAY_TIME
        };
        let alpha = 1.0 - (-dt / time_constant).exp();
        self.velocity += (target_speed - self.velocity) * alpha;

        let step = (self.velocity * dt).min(distance);
        self.position += step;

        if target - self.position < SNAP_THRESHOLD {
            self.position = target;
            self.stop();
        }

        self.position.round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_inactive_tick_is_noop() {
        let mut anim = ScrollAnimation::default();
        assert_eq!(anim.tick(FRAME, 50), 0);
        assert!(!anim.is_active());
    }

    #[test]
    fn test_reaches_target_monotonically() {
        let mut anim = ScrollAnimation::default();
        anim.start(0);

        let mut last = 0;
        let mut frames = 0;
        while anim.is_active() {
            let offset = anim.tick(FRAME, 60);
            assert!(offset >= last, "scroll moved backwards");
            assert!(offset <= 60);
            last = offset;
            frames += 1;
            assert!(frames < 500, "animation never settled");
        }
        assert_eq!(last, 60);
        // More than one frame means it glided rather than jumped
        assert!(frames > 1);
    }

    #[test]
    fn test_follows_growing_target() {
        let mut anim = ScrollAnimation::default();
        anim.start(0);
        for _ in 0..5 {
            anim.tick(FRAME, 10);
        }
        let mut offset = 0;
        for _ in 0..500 {
            offset = anim.tick(FRAME, 25);
            if !anim.is_active() {
                break;
            }
        }
        assert_eq!(offset, 25);
    }

    #[test]
    fn test_snaps_when_target_behind() {
        let mut anim = ScrollAnimation::default();
        anim.start(30);
        assert_eq!(anim.tick(FRAME, 10), 10);
        assert!(!anim.is_active());
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut anim = ScrollAnimation::default();
        anim.start(0);
        let offset = anim.tick(Duration::from_secs(10), 1000);
        assert!(offset < 1000);
        assert!(anim.is_active());
    }
}
