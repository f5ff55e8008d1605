use anyhow::Result;

use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::SPolygon;
use crate::geometry::shape_modification::{ShapeModifyMode, offset_shape};

/// Projected silhouette to be nested, together with the transformation found for it
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Index of the item in the [`ShapeRegistry`](crate::entities::ShapeRegistry)
    pub id: usize,
    /// Silhouette as projected, clockwise and convex
    pub shape: SPolygon,
    /// Silhouette inflated by half the clearance, used for overlap tests
    pub inflated: SPolygon,
    /// Accumulated rotation and translation relative to `shape`
    pub d_transf: DTransformation,
}

impl Item {
    pub fn new(id: usize, shape: SPolygon) -> Self {
        Item {
            id,
            inflated: shape.clone(),
            shape,
            d_transf: DTransformation::empty(),
        }
    }

    /// Regenerates the inflated shape so two touching inflated items are `clearance` apart
    pub fn inflate(&mut self, clearance: i64) -> Result<()> {
        let distance = clearance.max(0) / 2;
        self.inflated = offset_shape(&self.shape, ShapeModifyMode::Inflate, distance)?;
        Ok(())
    }

    pub fn transformed_shape(&self) -> SPolygon {
        self.shape.transform_clone(&self.d_transf)
    }

    pub fn transformed_inflated(&self) -> SPolygon {
        self.inflated.transform_clone(&self.d_transf)
    }

    pub fn rotation(&self) -> f64 {
        self.d_transf.rotation()
    }

    pub fn translation(&self) -> (i64, i64) {
        self.d_transf.translation()
    }

    /// Clone of the item carrying `d_transf`
    pub fn placed(&self, d_transf: DTransformation) -> Item {
        Item {
            d_transf,
            ..self.clone()
        }
    }
}
