//! Geographic bounding box.

use crate::{DemError, Result};

/// Latitude limit of the Web Mercator projection used by the terrain tiles.
/// The exact value is arctan(sinh(pi)).
pub const MERCATOR_MAX_LAT: f64 = 85.0511;

/// A geographic extent in longitude/latitude degrees.
///
/// The field order matches the conventional `left bottom right top` CLI
/// spelling: `left`/`right` are longitudes, `bottom`/`top` are latitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// West edge, degrees longitude.
    pub left: f64,
    /// South edge, degrees latitude.
    pub bottom: f64,
    /// East edge, degrees longitude.
    pub right: f64,
    /// North edge, degrees latitude.
    pub top: f64,
}

impl BoundingBox {
    /// Create a validated bounding box from four ordered floats.
    ///
    /// # Errors
    /// Returns [`DemError::InvalidBoundingBox`] if the edges are out of
    /// order, non-finite, or outside the valid longitude/latitude range for
    /// the tile projection.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Result<Self> {
        for (name, value) in [
            ("left", left),
            ("bottom", bottom),
            ("right", right),
            ("top", top),
        ] {
            if !value.is_finite() {
                return Err(DemError::InvalidBoundingBox(format!(
                    "{} edge is not finite",
                    name
                )));
            }
        }
        if left >= right {
            return Err(DemError::InvalidBoundingBox(format!(
                "left ({}) must be west of right ({})",
                left, right
            )));
        }
        if bottom >= top {
            return Err(DemError::InvalidBoundingBox(format!(
                "bottom ({}) must be south of top ({})",
                bottom, top
            )));
        }
        if left < -180.0 || right > 180.0 {
            return Err(DemError::InvalidBoundingBox(format!(
                "longitude range {}..{} exceeds -180..180",
                left, right
            )));
        }
        if bottom < -MERCATOR_MAX_LAT || top > MERCATOR_MAX_LAT {
            return Err(DemError::InvalidBoundingBox(format!(
                "latitude range {}..{} exceeds the Web Mercator limit of +/-{}",
                bottom, top, MERCATOR_MAX_LAT
            )));
        }

        Ok(Self {
            left,
            bottom,
            right,
            top,
        })
    }

    /// Width of the box in degrees longitude.
    pub fn width_deg(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the box in degrees latitude.
    pub fn height_deg(&self) -> f64 {
        self.top - self.bottom
    }

    /// Check if a coordinate is within the box (edges inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.bottom && lat <= self.top && lon >= self.left && lon <= self.right
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.left, self.bottom, self.right, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bbox() {
        // The Big Island of Hawaii.
        let bbox = BoundingBox::new(-156.0, 18.8, -154.7, 20.3).unwrap();
        assert!((bbox.width_deg() - 1.3).abs() < 1e-9);
        assert!((bbox.height_deg() - 1.5).abs() < 1e-9);
        assert!(bbox.contains(19.5, -155.5));
        assert!(!bbox.contains(19.5, -150.0));
    }

    #[test]
    fn test_edges_out_of_order() {
        assert!(BoundingBox::new(-154.7, 18.8, -156.0, 20.3).is_err());
        assert!(BoundingBox::new(-156.0, 20.3, -154.7, 18.8).is_err());
        assert!(BoundingBox::new(-156.0, 18.8, -156.0, 20.3).is_err());
    }

    #[test]
    fn test_out_of_range() {
        assert!(BoundingBox::new(-190.0, 18.8, -154.7, 20.3).is_err());
        assert!(BoundingBox::new(-156.0, 18.8, 185.0, 20.3).is_err());
        assert!(BoundingBox::new(-156.0, -89.0, -154.7, 20.3).is_err());
        assert!(BoundingBox::new(-156.0, 18.8, -154.7, 88.0).is_err());
    }

    #[test]
    fn test_non_finite_edge() {
        assert!(BoundingBox::new(f64::NAN, 18.8, -154.7, 20.3).is_err());
        assert!(BoundingBox::new(-156.0, 18.8, f64::INFINITY, 20.3).is_err());
    }
}
