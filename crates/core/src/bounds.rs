use crate::Vec3;

/// Axis-aligned bounding box in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| acc.including(p)))
    }

    /// Grow the box so it contains `p`.
    #[inline]
    pub fn including(self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half the diagonal length; handy for framing a model with a camera.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;
    use approx::assert_relative_eq;

    #[test]
    fn empty_points_have_no_bounds() {
        assert_eq!(Aabb::from_points(std::iter::empty()), None);
    }

    #[test]
    fn single_point_is_degenerate_box() {
        let p = vec3(1.0, -2.0, 3.0);
        let b = Aabb::from_points([p]).unwrap();
        assert_eq!(b.min, p);
        assert_eq!(b.max, p);
        assert_eq!(b.size(), Vec3::ZERO);
    }

    #[test]
    fn bounds_cover_all_points() {
        let b = Aabb::from_points([
            vec3(-1.0, 0.0, 2.0),
            vec3(3.0, -4.0, 0.5),
            vec3(0.0, 2.0, -1.0),
        ])
        .unwrap();
        assert_eq!(b.min, vec3(-1.0, -4.0, -1.0));
        assert_eq!(b.max, vec3(3.0, 2.0, 2.0));
        assert_eq!(b.center(), vec3(1.0, -1.0, 0.5));
    }

    #[test]
    fn unit_cube_radius() {
        let b = Aabb::new(vec3(-1.0, -1.0, -1.0), vec3(1.0, 1.0, 1.0));
        assert_relative_eq!(b.radius(), 3f32.sqrt(), epsilon = 1e-6);
    }
}
