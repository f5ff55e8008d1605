//! Arranges 3D printable objects on a print bed by nesting their top-down silhouettes.
//!
//! The pipeline is: [`projection`] turns every model instance into a convex 2D polygon,
//! the [`nesting`] engine packs those polygons into one or more bin-sized [`PackGroup`](entities::PackGroup)s,
//! and [`arrange`] writes the resulting placements back onto the model.
//! [`io::svg`] can render the pack groups for debugging.

pub mod arrange;
pub mod entities;
pub mod geometry;
pub mod io;
pub mod nesting;
pub mod projection;
pub mod util;
