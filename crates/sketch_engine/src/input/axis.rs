//! Axis smoothing helpers
//!
//! An axis folds sets of positive and negative keys into a raw value in
//! {-1, 0, 1}, then derives two continuous readings per frame: `linear`
//! moves toward raw at a fixed speed, `smooth` closes a fraction of the
//! remaining distance each step. Both snap to raw inside the dead zone
//! and are clamped to [-1, 1].

use super::{InputManager, Key};

/// A one-dimensional smoothed input axis
#[derive(Debug, Clone)]
pub struct Axis {
    positives: Vec<Key>,
    negatives: Vec<Key>,

    raw: i32,
    linear: f64,
    smooth: f64,

    /// Linear step per update
    pub speed: f64,
    /// Snap-to-raw threshold
    pub dead: f64,
    /// Divisor for the smooth step; higher is slower
    pub smoothness: f64,
}

impl Axis {
    /// Create an axis over sets of positive and negative keys
    pub fn new(positives: Vec<Key>, negatives: Vec<Key>) -> Self {
        Self {
            positives,
            negatives,
            raw: 0,
            linear: 0.0,
            smooth: 0.0,
            speed: 0.1,
            dead: 0.01,
            smoothness: 5.0,
        }
    }

    /// Create an axis over a single key pair
    pub fn from_keys(positive: Key, negative: Key) -> Self {
        Self::new(vec![positive], vec![negative])
    }

    /// Sample raw key state and advance the smoothed readings one step
    pub fn update(&mut self, input: &InputManager) {
        self.sample_raw(input);
        self.update_linear();
        self.update_smooth();
    }

    /// The raw reading: -1, 0, or 1
    pub fn raw(&self) -> i32 {
        self.raw
    }

    /// The fixed-speed reading in [-1, 1]
    pub fn linear(&self) -> f64 {
        self.linear
    }

    /// The eased reading in [-1, 1]
    pub fn smooth(&self) -> f64 {
        self.smooth
    }

    fn sample_raw(&mut self, input: &InputManager) {
        let mut result = 0;
        if self.positives.iter().any(|key| input.is_down(*key)) {
            result += 1;
        }
        if self.negatives.iter().any(|key| input.is_down(*key)) {
            result -= 1;
        }
        self.raw = result;
    }

    fn update_linear(&mut self) {
        let target = f64::from(self.raw);
        if self.linear == target {
            return;
        }

        if self.linear < target {
            self.linear += self.speed;
        } else {
            self.linear -= self.speed;
        }

        if self.linear > 1.0 {
            self.linear = 1.0;
        } else if self.linear < -1.0 {
            self.linear = -1.0;
        } else if (target - self.linear).abs() <= self.dead {
            self.linear = target;
        }
    }

    fn update_smooth(&mut self) {
        let target = f64::from(self.raw);
        if self.smooth == target {
            return;
        }

        let step = (self.smooth - target).abs() / self.smoothness;
        if self.smooth < target {
            self.smooth += step;
        } else {
            self.smooth -= step;
        }

        if self.smooth > 1.0 {
            self.smooth = 1.0;
        } else if self.smooth < -1.0 {
            self.smooth = -1.0;
        } else if (target - self.smooth).abs() <= self.dead {
            self.smooth = target;
        }
    }
}

/// Two perpendicular axes read together
///
/// Combined readings are clamped to unit magnitude, so a held diagonal
/// moves no faster than a cardinal direction.
#[derive(Debug, Clone)]
pub struct Axis2D {
    x: Axis,
    y: Axis,
}

impl Axis2D {
    /// Create from left/up/right/down keys
    pub fn from_keys(left: Key, up: Key, right: Key, down: Key) -> Self {
        Self {
            x: Axis::from_keys(right, left),
            y: Axis::from_keys(up, down),
        }
    }

    /// Advance both axes one step
    pub fn update(&mut self, input: &InputManager) {
        self.x.update(input);
        self.y.update(input);
    }

    /// Raw (x, y) reading, clamped to unit magnitude
    pub fn raw(&self) -> (f64, f64) {
        clamped(f64::from(self.x.raw()), f64::from(self.y.raw()))
    }

    /// Fixed-speed (x, y) reading, clamped to unit magnitude
    pub fn linear(&self) -> (f64, f64) {
        clamped(self.x.linear(), self.y.linear())
    }

    /// Eased (x, y) reading, clamped to unit magnitude
    pub fn smooth(&self) -> (f64, f64) {
        clamped(self.x.smooth(), self.y.smooth())
    }
}

fn clamped(x: f64, y: f64) -> (f64, f64) {
    let magnitude = x.hypot(y);
    if magnitude > 1.0 {
        (x / magnitude, y / magnitude)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_folds_key_sets() {
        let mut input = InputManager::new();
        let mut axis = Axis::new(vec![Key::Right, Key::D], vec![Key::Left, Key::A]);

        axis.update(&input);
        assert_eq!(axis.raw(), 0);

        input.press(Key::D);
        axis.update(&input);
        assert_eq!(axis.raw(), 1);

        input.press(Key::Left);
        axis.update(&input);
        assert_eq!(axis.raw(), 0); // opposing keys cancel
    }

    #[test]
    fn test_linear_ramps_and_clamps() {
        let mut input = InputManager::new();
        input.press(Key::Up);
        let mut axis = Axis::from_keys(Key::Up, Key::Down);

        axis.update(&input);
        assert!(axis.linear() > 0.0 && axis.linear() < 1.0);

        for _ in 0..50 {
            axis.update(&input);
        }
        assert_eq!(axis.linear(), 1.0);
        assert_eq!(axis.smooth(), 1.0);
    }

    #[test]
    fn test_dead_zone_snaps_to_rest() {
        let mut input = InputManager::new();
        input.press(Key::Up);
        let mut axis = Axis::from_keys(Key::Up, Key::Down);
        for _ in 0..50 {
            axis.update(&input);
        }

        input.release(Key::Up);
        for _ in 0..200 {
            axis.update(&input);
        }
        assert_eq!(axis.raw(), 0);
        assert_eq!(axis.linear(), 0.0);
        assert_eq!(axis.smooth(), 0.0);
    }

    #[test]
    fn test_axis2d_reads_both_axes() {
        let mut input = InputManager::new();
        let mut arrows = Axis2D::from_keys(Key::Left, Key::Up, Key::Right, Key::Down);

        input.press(Key::Right);
        input.press(Key::Down);
        arrows.update(&input);

        let (x, y) = arrows.raw();
        assert!(x > 0.0);
        assert!(y < 0.0);
    }

    #[test]
    fn test_axis2d_diagonal_is_clamped_to_unit_magnitude() {
        let mut input = InputManager::new();
        let mut arrows = Axis2D::from_keys(Key::Left, Key::Up, Key::Right, Key::Down);

        input.press(Key::Right);
        input.press(Key::Up);
        for _ in 0..100 {
            arrows.update(&input);
        }

        for (x, y) in [arrows.raw(), arrows.linear(), arrows.smooth()] {
            let magnitude = x.hypot(y);
            assert!(magnitude <= 1.0 + 1e-12, "magnitude {magnitude} over 1");
            // Direction survives the clamp
            assert!((x - y).abs() < 1e-12);
        }

        // A single cardinal direction is untouched
        input.release(Key::Up);
        for _ in 0..100 {
            arrows.update(&input);
        }
        assert_eq!(arrows.smooth(), (1.0, 0.0));
    }
}
