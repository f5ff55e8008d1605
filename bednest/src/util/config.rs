use serde::{Deserialize, Serialize};

use crate::io::svg::SvgDrawOptions;
use crate::nesting::{PlacementStrategy, SelectionStrategy};

/// Configuration of the nesting engine and its debug output
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NestConfig {
    /// Order in which items are placed
    #[serde(default)]
    pub selection: SelectionStrategy,
    /// How a position is searched for every item
    #[serde(default)]
    pub placement: PlacementStrategy,
    /// Maximum number of feasible candidate positions slid per placement attempt, `None` for no limit
    pub max_candidates: Option<usize>,
    /// Maximum number of alternating down/left slides from every candidate position
    pub max_slide_steps: usize,
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            selection: SelectionStrategy::DeepestFirst,
            placement: PlacementStrategy::BottomLeft,
            max_candidates: Some(4096),
            max_slide_steps: 16,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
