use std::time::Instant;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::entities::{Bin, Item, PackGroup};
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::SPolygon;
use crate::nesting::{BottomLeftPlacement, PlacementStrategy, Placer, Selector};
use crate::util::NestConfig;
use crate::util::assertions;

/// Packs items into as many bin-sized [`PackGroup`]s as needed
#[derive(Clone, Debug)]
pub struct Nester {
    pub bin: Bin,
    /// Minimum distance between any two items, in internal units
    pub clearance: i64,
    pub config: NestConfig,
}

/// Output of [`Nester::pack`]
#[derive(Clone, Debug, Default)]
pub struct NestResult {
    /// Groups in the order they were opened, the first one is the primary bed
    pub groups: Vec<PackGroup>,
    pub stats: NestStats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NestStats {
    /// Number of candidate positions tested over all placements
    pub n_candidates: usize,
    pub n_groups: usize,
    /// Items that did not fit an empty bin and were given a group of their own
    pub n_oversized: usize,
    /// Id of the item with the largest inflated bounding box
    pub largest_item: Option<usize>,
}

/// Group being filled, with the inflated shapes of its items at their final position
#[derive(Default)]
struct OpenGroup {
    group: PackGroup,
    placed: Vec<SPolygon>,
}

impl OpenGroup {
    fn push(&mut self, item: Item) {
        self.placed.push(item.transformed_inflated());
        self.group.push(item);
    }
}

impl Nester {
    pub fn new(bin: Bin, clearance: i64, config: NestConfig) -> Self {
        Self {
            bin,
            clearance,
            config,
        }
    }

    /// Inflates every item by half the clearance and packs them all.
    ///
    /// Items are selected one at a time and placed in the open group. When an item does not fit,
    /// the group is closed and the item is retried in a fresh one. Closed groups are never revisited.
    /// An item that does not even fit an empty bin leaves the open group as is. It is aligned to the
    /// bin's lower-left corner in a group of its own, appended after all regular groups.
    /// No item is ever left out.
    pub fn pack(&self, items: Vec<Item>) -> Result<NestResult> {
        let start = Instant::now();
        let n_items = items.len();

        let mut remaining = items
            .into_iter()
            .map(|mut item| {
                item.inflate(self.clearance)
                    .with_context(|| format!("failed to inflate item {}", item.id))?;
                Ok(item)
            })
            .collect::<Result<Vec<Item>>>()?;

        let mut stats = NestStats {
            largest_item: remaining
                .iter()
                .min_by_key(|i| (std::cmp::Reverse(i.inflated.bbox().area()), i.id))
                .map(|i| i.id),
            ..NestStats::default()
        };

        let placer = self.placer();
        let mut groups = vec![];
        let mut oversized = vec![];
        let mut open = OpenGroup::default();

        while let Some(pos) = self.config.selection.select(&remaining) {
            let item = remaining.remove(pos);

            let placement = match placer.place(&item, &self.bin, &open.placed, &mut stats.n_candidates)
            {
                Some(d_transf) => Some(d_transf),
                None if open.group.is_empty() => None,
                None => {
                    //only close the open group if the item fits a fresh one
                    let fresh = placer.place(&item, &self.bin, &[], &mut stats.n_candidates);
                    if fresh.is_some() {
                        debug!(
                            "[NEST] item {} does not fit group {}, opening a new one",
                            item.id,
                            groups.len()
                        );
                        groups.push(std::mem::take(&mut open).group);
                    }
                    fresh
                }
            };

            let Some(d_transf) = placement else {
                warn!(
                    "[NEST] item {} does not fit an empty bin, placing it alone in a group of its own",
                    item.id
                );
                stats.n_oversized += 1;
                let mut alone = PackGroup::new();
                alone.push(item.placed(self.lower_left_alignment(&item)));
                oversized.push(alone);
                continue;
            };

            debug!(
                "[NEST] placed item {} in group {} at [{}]",
                item.id,
                groups.len(),
                d_transf
            );
            open.push(item.placed(d_transf));
        }

        if !open.group.is_empty() {
            groups.push(open.group);
        }
        //oversized items trail the regular groups
        groups.extend(oversized);
        stats.n_groups = groups.len();

        debug_assert!(assertions::pack_groups_valid(&groups, &self.bin, n_items));

        info!(
            "[NEST] packed {} items into {} group(s) in {:.3}ms ({} candidates, {} oversized)",
            n_items,
            stats.n_groups,
            start.elapsed().as_secs_f64() * 1000.0,
            stats.n_candidates,
            stats.n_oversized
        );
        info!(
            "[NEST] group sizes: [{}]",
            groups.iter().map(|g| g.len()).join(", ")
        );

        Ok(NestResult { groups, stats })
    }

    fn placer(&self) -> impl Placer {
        match self.config.placement {
            PlacementStrategy::BottomLeft => BottomLeftPlacement {
                max_candidates: self.config.max_candidates,
                max_slide_steps: self.config.max_slide_steps,
            },
        }
    }

    fn lower_left_alignment(&self, item: &Item) -> DTransformation {
        let s_ll = item.shape.bbox().lower_left();
        let b_ll = self.bin.rect.lower_left();
        DTransformation::from_translation((b_ll.0 - s_ll.0, b_ll.1 - s_ll.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Rect;
    use crate::nesting::SelectionStrategy;

    fn square_item(id: usize, x: i64, y: i64, w: i64) -> Item {
        Item::new(
            id,
            SPolygon::from_rect(Rect::try_new(x, y, x + w, y + w).unwrap()),
        )
    }

    fn nester(w: i64, h: i64, clearance: i64) -> Nester {
        Nester::new(
            Bin::new(Rect::try_new(0, 0, w, h).unwrap()),
            clearance,
            NestConfig::default(),
        )
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let result = nester(100, 100, 0).pack(vec![]).unwrap();
        assert!(result.groups.is_empty());
        assert_eq!(result.stats, NestStats::default());
    }

    #[test]
    fn overflow_opens_new_groups() {
        let items = (0..5).map(|i| square_item(i, 0, 0, 40)).collect_vec();
        let result = nester(100, 50, 0).pack(items).unwrap();
        //two squares fit side by side
        assert_eq!(
            result.groups.iter().map(|g| g.indices()).collect_vec(),
            vec![vec![0, 1], vec![2, 3], vec![4]]
        );
        assert_eq!(result.stats.n_groups, 3);
        assert_eq!(result.stats.n_oversized, 0);
    }

    #[test]
    fn oversized_item_gets_a_group_of_its_own() {
        let items = vec![
            square_item(0, 0, 0, 10),
            square_item(1, 7, 3, 500),
            square_item(2, 0, 0, 10),
        ];
        let result = nester(100, 100, 0).pack(items).unwrap();
        assert_eq!(
            result.groups.iter().map(|g| g.indices()).collect_vec(),
            vec![vec![0, 2], vec![1]]
        );
        assert_eq!(result.stats.n_oversized, 1);
        assert_eq!(result.groups[1].entries[0].1.translation(), (-7, -3));
    }

    #[test]
    fn oversized_item_does_not_close_the_open_group() {
        let items = vec![
            square_item(0, 0, 0, 10),
            square_item(1, 0, 0, 500),
            square_item(2, 0, 0, 10),
        ];
        let mut n = nester(100, 100, 0);
        n.config.selection = SelectionStrategy::InputOrder;
        let result = n.pack(items).unwrap();
        assert_eq!(
            result.groups.iter().map(|g| g.indices()).collect_vec(),
            vec![vec![0, 2], vec![1]]
        );
        assert_eq!(result.stats.n_groups, 2);
        assert_eq!(result.stats.n_oversized, 1);
    }

    #[test]
    fn selection_strategy_drives_placement_order() {
        let items = vec![square_item(0, 0, 0, 10), square_item(1, 0, 0, 30)];
        let mut n = nester(100, 100, 0);
        assert_eq!(n.pack(items.clone()).unwrap().groups[0].indices(), vec![1, 0]);
        n.config.selection = SelectionStrategy::InputOrder;
        assert_eq!(n.pack(items).unwrap().groups[0].indices(), vec![0, 1]);
    }
}
