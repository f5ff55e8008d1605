use itertools::Itertools;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Item};
use crate::geometry::DTransformation;
use crate::geometry::contact::{SlideDirection, slide_distance};
use crate::geometry::geo_traits::{CollidesWith, Shape};
use crate::geometry::primitives::{Rect, SPolygon};

/// Decides where an item goes in a partially filled bin
pub trait Placer {
    /// Searches a translation of `item` that keeps its shape inside `bin`
    /// and its inflated shape clear of every shape in `placed` (already inflated and transformed).
    ///
    /// Every candidate position tested is added to `candidate_counter`.
    fn place(
        &self,
        item: &Item,
        bin: &Bin,
        placed: &[SPolygon],
        candidate_counter: &mut usize,
    ) -> Option<DTransformation>;
}

/// Bottom-left placement heuristic.
///
/// Candidate translations align the item against the bin walls and against the edges of the
/// bounding boxes of the already placed shapes. Every feasible candidate is then slid
/// down and left, alternately, until it rests against a wall or a placed shape.
/// The resting position with the lowest bottom edge wins, then the one with the leftmost edge.
#[derive(Clone, Copy, Debug)]
pub struct BottomLeftPlacement {
    /// Maximum number of feasible candidate translations slid per item, `None` for no limit.
    /// Infeasible candidates do not count, so an item that fits somewhere is always placed.
    pub max_candidates: Option<usize>,
    /// Maximum number of down/left slide steps from every candidate
    pub max_slide_steps: usize,
}

impl Placer for BottomLeftPlacement {
    fn place(
        &self,
        item: &Item,
        bin: &Bin,
        placed: &[SPolygon],
        candidate_counter: &mut usize,
    ) -> Option<DTransformation> {
        let probe = Probe {
            item,
            bin: bin.rect,
            placed,
        };

        let limit = self.max_candidates.unwrap_or(usize::MAX).max(1);
        let best = self
            .candidates(&probe)
            .into_iter()
            .filter(|t| {
                *candidate_counter += 1;
                probe.is_feasible(*t)
            })
            .take(limit)
            .map(|t| self.slide(&probe, t))
            .min_by_key(|&(tx, ty)| (ty, tx))?;

        trace!(
            "[NEST] bottom-left position for item {}: ({}, {})",
            item.id, best.0, best.1
        );
        Some(DTransformation::from_translation(best))
    }
}

impl BottomLeftPlacement {
    /// Translations aligning the item with the bin walls or with a side of a placed shape's bounding box,
    /// restricted to those keeping the item inside the bin. Sorted bottom-left first.
    fn candidates(&self, probe: &Probe) -> Vec<(i64, i64)> {
        let (bin, s_bb, i_bb) = (probe.bin, probe.item.shape.bbox(), probe.item.inflated.bbox());
        let placed_bboxes = probe.placed.iter().map(|p| p.bbox()).collect_vec();

        let xs = [bin.x_min - s_bb.x_min, bin.x_max - s_bb.x_max]
            .into_iter()
            .chain(
                placed_bboxes
                    .iter()
                    .flat_map(|p| [p.x_max - i_bb.x_min, p.x_min - i_bb.x_max]),
            )
            .filter(|tx| bin.x_min <= s_bb.x_min + tx && s_bb.x_max + tx <= bin.x_max)
            .sorted()
            .dedup()
            .collect_vec();

        let ys = [bin.y_min - s_bb.y_min, bin.y_max - s_bb.y_max]
            .into_iter()
            .chain(
                placed_bboxes
                    .iter()
                    .flat_map(|p| [p.y_max - i_bb.y_min, p.y_min - i_bb.y_max]),
            )
            .filter(|ty| bin.y_min <= s_bb.y_min + ty && s_bb.y_max + ty <= bin.y_max)
            .sorted()
            .dedup()
            .collect_vec();

        ys.into_iter()
            .cartesian_product(xs)
            .map(|(ty, tx)| (tx, ty))
            .collect_vec()
    }

    /// Slides a feasible translation down and left until it comes to rest.
    fn slide(&self, probe: &Probe, mut t: (i64, i64)) -> (i64, i64) {
        for _ in 0..self.max_slide_steps {
            let mut moved = false;
            for dir in [SlideDirection::Down, SlideDirection::Left] {
                let distance = probe.free_distance(t, dir);
                if distance <= 0 {
                    continue;
                }
                let (dx, dy) = dir.translation(distance);
                let next = (t.0 + dx, t.1 + dy);
                //rounding in the contact computation can overshoot by a unit, never accept an overlap
                if probe.is_feasible(next) {
                    t = next;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }
        t
    }
}

/// An item probed against one bin and its placed shapes
struct Probe<'a> {
    item: &'a Item,
    bin: Rect,
    placed: &'a [SPolygon],
}

impl Probe<'_> {
    fn is_feasible(&self, t: (i64, i64)) -> bool {
        if !self.bin.contains(&self.item.shape.bbox().translate(t)) {
            return false;
        }
        let i_bb = self.item.inflated.bbox().translate(t);
        let candidates = self
            .placed
            .iter()
            .filter(|p| p.bbox().collides_with(&i_bb))
            .collect_vec();
        if candidates.is_empty() {
            return true;
        }
        let mut inflated = self.item.inflated.clone();
        inflated.translate(t);
        candidates.iter().all(|p| !inflated.collides_with(*p))
    }

    /// How far the item at `t` can travel in `dir` before meeting a bin wall or a placed shape
    fn free_distance(&self, t: (i64, i64), dir: SlideDirection) -> i64 {
        let s_bb = self.item.shape.bbox().translate(t);
        let wall = match dir {
            SlideDirection::Down => s_bb.y_min - self.bin.y_min,
            SlideDirection::Left => s_bb.x_min - self.bin.x_min,
        };
        let mut inflated = self.item.inflated.clone();
        inflated.translate(t);
        self.placed
            .iter()
            .filter_map(|p| slide_distance(&inflated, p, dir))
            .fold(wall, i64::min)
    }
}

/// Placement heuristic, chosen at call time
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementStrategy {
    #[default]
    BottomLeft,
}
