//! Flip-flop motion between two bounds.

use crate::error::AnimationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Advancing,
    Retreating,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Advancing => 1.0,
            Direction::Retreating => -1.0,
        }
    }
}

/// A value that moves by a fixed delta per step and reverses at the bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Oscillator {
    value: f32,
    delta: f32,
    lower: f32,
    upper: f32,
    direction: Direction,
}

impl Oscillator {
    /// Starts advancing from `start`.
    pub fn new(start: f32, delta: f32, lower: f32, upper: f32) -> Result<Self, AnimationError> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(AnimationError::InvalidDelta(delta));
        }
        if !(lower < upper) {
            return Err(AnimationError::InvalidBounds { lower, upper });
        }
        Ok(Self {
            value: start,
            delta,
            lower,
            upper,
            direction: Direction::Advancing,
        })
    }

    /// Moves one delta, then turns around if a bound was reached.
    pub fn step(&mut self) -> f32 {
        self.value += self.direction.sign() * self.delta;
        if self.value >= self.upper {
            self.direction = Direction::Retreating;
        } else if self.value <= self.lower {
            self.direction = Direction::Advancing;
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_parameters() {
        assert_eq!(
            Oscillator::new(0.0, 0.5, 20.0, -20.0),
            Err(AnimationError::InvalidBounds {
                lower: 20.0,
                upper: -20.0,
            })
        );
        assert_eq!(
            Oscillator::new(0.0, 0.5, 1.0, 1.0),
            Err(AnimationError::InvalidBounds {
                lower: 1.0,
                upper: 1.0,
            })
        );
        assert_eq!(
            Oscillator::new(0.0, 0.0, -1.0, 1.0),
            Err(AnimationError::InvalidDelta(0.0))
        );
        assert!(matches!(
            Oscillator::new(0.0, f32::NAN, -1.0, 1.0),
            Err(AnimationError::InvalidDelta(_))
        ));
    }

    #[test]
    fn test_reaches_upper_then_turns() {
        let mut ball = Oscillator::new(0.0, 0.5, -20.0, 20.0).unwrap();
        for _ in 0..39 {
            ball.step();
            assert_eq!(ball.direction(), Direction::Advancing);
        }
        assert_eq!(ball.step(), 20.0);
        assert_eq!(ball.direction(), Direction::Retreating);
        assert_eq!(ball.step(), 19.5);
    }

    #[test]
    fn test_strictly_decreasing_from_upper_to_lower() {
        let mut ball = Oscillator::new(0.0, 0.5, -20.0, 20.0).unwrap();
        while ball.direction() == Direction::Advancing {
            ball.step();
        }
        assert_eq!(ball.value(), 20.0);

        let mut previous = ball.value();
        loop {
            let value = ball.step();
            assert!(value < previous);
            previous = value;
            if ball.direction() == Direction::Advancing {
                break;
            }
        }
        assert_eq!(previous, -20.0);

        // And back up again.
        assert!(ball.step() > previous);
    }

    #[test]
    fn test_overshoot_still_turns() {
        let mut osc = Oscillator::new(0.0, 3.0, -5.0, 5.0).unwrap();
        osc.step();
        assert_eq!(osc.step(), 6.0);
        assert_eq!(osc.direction(), Direction::Retreating);
        assert_eq!(osc.step(), 3.0);
    }
}
