use glam::Vec3;
use serde::Serialize;

/// Axis-aligned bounding box in 3-D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Smallest box containing every point, `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self {
            min: min.to_array(),
            max: max.to_array(),
        })
    }

    /// Centre point of the box.
    pub fn center(&self) -> [f32; 3] {
        ((Vec3::from(self.min) + Vec3::from(self.max)) * 0.5).to_array()
    }

    /// Length of the space diagonal.
    pub fn diagonal(&self) -> f32 {
        (Vec3::from(self.max) - Vec3::from(self.min)).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_points() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn unit_cube_corners() {
        let bb = BoundingBox::from_points([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.5, 1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bb.min, [0.0, 0.0, 0.0]);
        assert_eq!(bb.max, [1.0, 1.0, 1.0]);
        assert_eq!(bb.center(), [0.5, 0.5, 0.5]);
        assert_relative_eq!(bb.diagonal(), 3.0f32.sqrt());
    }
}
