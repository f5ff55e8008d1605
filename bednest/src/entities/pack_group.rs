use itertools::Itertools;

use crate::entities::Item;

/// Items packed together in one bin-sized region, in order of placement.
///
/// Each entry pairs the item's registry index with the item carrying its final transformation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackGroup {
    pub entries: Vec<(usize, Item)>,
}

impl PackGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) {
        self.entries.push((item.id, item));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry indices of the packed items, in order of placement
    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|(idx, _)| *idx).collect_vec()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + Clone {
        self.entries.iter().map(|(_, item)| item)
    }
}
