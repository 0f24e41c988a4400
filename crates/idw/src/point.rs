//! Points and rectangular extents.

use crate::error::IdwError;

/// A 2-D location in projected coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Easting.
    pub x: f64,
    /// Northing.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Minimum x.
    pub xmin: f64,
    /// Maximum x.
    pub xmax: f64,
    /// Minimum y.
    pub ymin: f64,
    /// Maximum y.
    pub ymax: f64,
}

impl Extent {
    /// Creates an extent, checking that bounds are finite and ordered.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, IdwError> {
        let e = Self {
            xmin,
            xmax,
            ymin,
            ymax,
        };
        e.validate()?;
        Ok(e)
    }

    /// Bounding box of `points`.
    pub fn from_points(points: &[Point]) -> Result<Self, IdwError> {
        let Some(first) = points.first() else {
            return Err(IdwError::InvalidExtent {
                reason: "no points".to_string(),
            });
        };
        let e = points.iter().fold(
            Self {
                xmin: first.x,
                xmax: first.x,
                ymin: first.y,
                ymax: first.y,
            },
            |acc, p| Self {
                xmin: acc.xmin.min(p.x),
                xmax: acc.xmax.max(p.x),
                ymin: acc.ymin.min(p.y),
                ymax: acc.ymax.max(p.y),
            },
        );
        e.validate()?;
        Ok(e)
    }

    /// Checks that all bounds are finite and `min <= max` on both axes.
    pub fn validate(&self) -> Result<(), IdwError> {
        let bounds = [self.xmin, self.xmax, self.ymin, self.ymax];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(IdwError::InvalidExtent {
                reason: format!("non-finite bound in {self:?}"),
            });
        }
        if self.xmin > self.xmax || self.ymin > self.ymax {
            return Err(IdwError::InvalidExtent {
                reason: format!("min exceeds max in {self:?}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn extent_from_points() {
        let e = Extent::from_points(&[
            Point::new(2.0, 5.0),
            Point::new(-1.0, 7.0),
            Point::new(4.0, 6.0),
        ])
        .unwrap();
        assert_eq!(e, Extent::new(-1.0, 4.0, 5.0, 7.0).unwrap());
    }

    #[test]
    fn extent_rejects_bad_bounds() {
        assert!(Extent::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Extent::new(0.0, f64::NAN, 0.0, 1.0).is_err());
        assert!(Extent::from_points(&[]).is_err());
    }
}
