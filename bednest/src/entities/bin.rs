use anyhow::Result;

use crate::entities::BoundingBoxf;
use crate::geometry::primitives::{Rect, SPolygon};

/// Rectangular region in which a single [`PackGroup`](crate::entities::PackGroup) is packed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bin {
    pub rect: Rect,
}

impl Bin {
    pub fn new(rect: Rect) -> Self {
        Bin { rect }
    }

    /// Scales a real-world bed rectangle onto the internal grid
    pub fn from_bbox(bbox: &BoundingBoxf) -> Result<Self> {
        Ok(Bin::new(bbox.scaled()?))
    }

    pub fn width(&self) -> i64 {
        self.rect.width()
    }

    pub fn height(&self) -> i64 {
        self.rect.height()
    }

    /// Outline of the bin as a polygon
    pub fn outline(&self) -> SPolygon {
        SPolygon::from_rect(self.rect)
    }
}
