use crate::entities::{InstanceRef, Item};
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::SPolygon;

/// Projected silhouettes paired with the instance they were projected from.
///
/// The position of an entry is the index the nesting engine refers to it by.
#[derive(Clone, Debug, Default)]
pub struct ShapeRegistry {
    entries: Vec<(InstanceRef, Item)>,
}

impl ShapeRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        ShapeRegistry {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Registers a silhouette and returns its index
    pub fn register(&mut self, iref: InstanceRef, shape: SPolygon) -> usize {
        let id = self.entries.len();
        self.entries.push((iref, Item::new(id, shape)));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn instance_ref(&self, idx: usize) -> Option<InstanceRef> {
        self.entries.get(idx).map(|(iref, _)| *iref)
    }

    pub fn item(&self, idx: usize) -> Option<&Item> {
        self.entries.get(idx).map(|(_, item)| item)
    }

    /// Fresh copies of all items, in registry order
    pub fn items(&self) -> Vec<Item> {
        self.entries.iter().map(|(_, item)| item.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(InstanceRef, Item)> {
        self.entries.iter()
    }

    /// The item with the largest bounding box before inflation, the lowest index wins ties.
    pub fn largest_item(&self) -> Option<&Item> {
        self.entries
            .iter()
            .map(|(_, item)| item)
            .fold(None, |best: Option<&Item>, item| match best {
                Some(b) if b.shape.bbox().area() >= item.shape.bbox().area() => Some(b),
                _ => Some(item),
            })
    }
}
