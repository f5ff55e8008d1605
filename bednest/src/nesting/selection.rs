use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::entities::Item;
use crate::geometry::geo_traits::Shape;

/// Decides which of the remaining items is placed next
pub trait Selector {
    /// Position in `remaining` of the next item to place, `None` if `remaining` is empty.
    fn select(&self, remaining: &[Item]) -> Option<usize>;
}

/// Largest item first: descending bounding box area of the inflated shape,
/// the lowest item id wins ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeepestFirstSelection;

impl Selector for DeepestFirstSelection {
    fn select(&self, remaining: &[Item]) -> Option<usize> {
        remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, item)| (Reverse(item.inflated.bbox().area()), item.id))
            .map(|(pos, _)| pos)
    }
}

/// Items are placed in ascending id order
#[derive(Clone, Copy, Debug, Default)]
pub struct InputOrderSelection;

impl Selector for InputOrderSelection {
    fn select(&self, remaining: &[Item]) -> Option<usize> {
        remaining
            .iter()
            .enumerate()
            .min_by_key(|(_, item)| item.id)
            .map(|(pos, _)| pos)
    }
}

/// Selection heuristic, chosen at call time
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionStrategy {
    #[default]
    DeepestFirst,
    InputOrder,
}

impl Selector for SelectionStrategy {
    fn select(&self, remaining: &[Item]) -> Option<usize> {
        match self {
            SelectionStrategy::DeepestFirst => DeepestFirstSelection.select(remaining),
            SelectionStrategy::InputOrder => InputOrderSelection.select(remaining),
        }
    }
}
