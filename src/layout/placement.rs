//! Grid placement loops
//!
//! A [`GridPlacement`] is the nested `for` loop that spaces template clones
//! along one or two world axes.

use cgmath::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vector3<f32> {
        let mut unit = Vector3::new(0.0, 0.0, 0.0);
        unit[self.index()] = 1.0;
        unit
    }
}

/// `count` offsets of `step` along `axis`, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRepeat {
    pub axis: Axis,
    pub step: f32,
    pub count: usize,
}

impl AxisRepeat {
    pub fn new(axis: Axis, step: f32, count: usize) -> Self {
        Self { axis, step, count }
    }

    fn offset(&self, i: usize) -> Vector3<f32> {
        self.axis.unit() * (self.step * i as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlacement {
    pub origin: Vector3<f32>,
    pub primary: AxisRepeat,
    pub secondary: Option<AxisRepeat>,
}

impl GridPlacement {
    /// Single loop along one axis.
    pub fn along(origin: Vector3<f32>, axis: Axis, step: f32, count: usize) -> Self {
        Self {
            origin,
            primary: AxisRepeat::new(axis, step, count),
            secondary: None,
        }
    }

    /// Adds an inner loop.
    pub fn then(mut self, axis: Axis, step: f32, count: usize) -> Self {
        self.secondary = Some(AxisRepeat::new(axis, step, count));
        self
    }

    /// Number of positions the loops produce.
    pub fn len(&self) -> usize {
        self.primary.count * self.secondary.map_or(1, |inner| inner.count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positions in loop order: the primary axis is the outer loop.
    pub fn positions(&self) -> Vec<Vector3<f32>> {
        let mut positions = Vec::with_capacity(self.len());
        for i in 0..self.primary.count {
            let outer = self.origin + self.primary.offset(i);
            match self.secondary {
                Some(inner) => {
                    positions.extend((0..inner.count).map(|j| outer + inner.offset(j)));
                }
                None => positions.push(outer),
            }
        }
        positions
    }
}

/// Iterations of `for (v = start; v < end_exclusive; v += step)`.
///
/// Assumes `(end_exclusive - start) / step` is a whole number or not within
/// float error of one, as with every layout range in the blueprint.
pub fn repeat_count(start: f32, end_exclusive: f32, step: f32) -> usize {
    if !(step > 0.0) || !(start < end_exclusive) || !step.is_finite() {
        return 0;
    }
    ((end_exclusive - start) / step).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(positions: &[Vector3<f32>]) -> Vec<f32> {
        positions.iter().map(|p| p.x).collect()
    }

    #[test]
    fn test_single_axis_loop() {
        let grid = GridPlacement::along(Vector3::new(0.0, 0.0, 0.0), Axis::X, 40.0, 3);
        assert_eq!(xs(&grid.positions()), vec![0.0, 40.0, 80.0]);
    }

    #[test]
    fn test_nested_order_is_outer_then_inner() {
        let grid = GridPlacement::along(Vector3::new(-60.0, 0.0, -40.0), Axis::X, 40.0, 2)
            .then(Axis::Z, 40.0, 3);
        let positions = grid.positions();

        assert_eq!(grid.len(), 6);
        assert_eq!(positions[0], Vector3::new(-60.0, 0.0, -40.0));
        assert_eq!(positions[1], Vector3::new(-60.0, 0.0, 0.0));
        assert_eq!(positions[2], Vector3::new(-60.0, 0.0, 40.0));
        assert_eq!(positions[3], Vector3::new(-20.0, 0.0, -40.0));
    }

    #[test]
    fn test_empty_loops() {
        let origin = Vector3::new(1.0, 2.0, 3.0);
        let none = GridPlacement::along(origin, Axis::Y, 5.0, 0);
        assert!(none.positions().is_empty());
        let inner_empty = GridPlacement::along(origin, Axis::X, 5.0, 4).then(Axis::Z, 5.0, 0);
        assert!(inner_empty.is_empty());
        assert!(inner_empty.positions().is_empty());
    }

    #[test]
    fn test_repeat_count_matches_half_open_loop() {
        assert_eq!(repeat_count(0.0, 280.0, 40.0), 7);
        assert_eq!(repeat_count(0.0, 200.0, 40.0), 5);
        assert_eq!(repeat_count(-40.0, 120.0, 40.0), 4);
        assert_eq!(repeat_count(120.0, 170.0, 40.0), 2);
        assert_eq!(repeat_count(-60.0, 75.0, 15.0), 9);
        assert_eq!(repeat_count(0.0, 0.0, 40.0), 0);
        assert_eq!(repeat_count(10.0, 0.0, 40.0), 0);
        assert_eq!(repeat_count(0.0, 10.0, 0.0), 0);
        assert_eq!(repeat_count(0.0, 10.0, -1.0), 0);
    }

    #[test]
    fn test_repeat_count_agrees_with_stepping_loop() {
        let ranges: [(f32, f32, f32); 5] = [
            (0.0, 0.3, 0.1),
            (0.0, 1.0, 0.1),
            (0.0, 0.7, 0.1),
            (0.0, 2.0, 0.2),
            (0.0, 0.9, 0.3),
        ];
        for (start, end, step) in ranges {
            let mut stepped = 0;
            let mut v = start;
            while v < end {
                stepped += 1;
                v += step;
            }
            let counted = repeat_count(start, end, step);
            assert_eq!(counted, stepped, "{start}..{end} by {step}");
        }
    }
}
