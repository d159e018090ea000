/// A closed or open range of ray parameters or color values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Copy of this interval with a new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Every positive ray parameter: (0, inf).
    pub const POSITIVE: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };

    /// The unit range [0, 1] colors are clamped to.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_excludes_zero() {
        let positive = Interval::POSITIVE;

        assert!(!positive.surrounds(0.0));
        assert!(!positive.surrounds(-1.0));
        assert!(positive.surrounds(1e-6));
        assert!(positive.surrounds(1e10));
        assert!(!positive.surrounds(f32::INFINITY));
    }

    #[test]
    fn test_unit_clamp() {
        let unit = Interval::UNIT;

        assert_eq!(unit.clamp(-5.0), 0.0);
        assert_eq!(unit.clamp(0.25), 0.25);
        assert_eq!(unit.clamp(3.0), 1.0);
    }

    #[test]
    fn test_with_max_narrows() {
        let narrowed = Interval::POSITIVE.with_max(4.0);

        assert_eq!(narrowed.min, 0.0);
        assert!(narrowed.surrounds(3.9));
        assert!(!narrowed.surrounds(4.0));
    }
}
