//! Packing of projected silhouettes into bin-sized groups.

mod engine;
mod placement;
mod selection;

#[doc(inline)]
pub use engine::NestResult;
#[doc(inline)]
pub use engine::NestStats;
#[doc(inline)]
pub use engine::Nester;
#[doc(inline)]
pub use placement::BottomLeftPlacement;
#[doc(inline)]
pub use placement::PlacementStrategy;
#[doc(inline)]
pub use placement::Placer;
#[doc(inline)]
pub use selection::DeepestFirstSelection;
#[doc(inline)]
pub use selection::InputOrderSelection;
#[doc(inline)]
pub use selection::SelectionStrategy;
#[doc(inline)]
pub use selection::Selector;
