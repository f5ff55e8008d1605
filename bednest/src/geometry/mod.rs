pub mod contact;
pub mod convex_hull;
pub mod d_transformation;
pub mod geo_traits;
pub mod primitives;
pub mod shape_modification;

#[doc(inline)]
pub use d_transformation::DTransformation;

/// Length in real-world units (millimetres) of one internal coordinate unit.
pub const SCALING_FACTOR: f64 = 1e-6;

/// Converts a real-world length into internal (integer) units.
pub fn scale_(v: f64) -> i64 {
    (v / SCALING_FACTOR).round() as i64
}

/// Converts a length in internal units back into real-world units.
pub fn unscale(v: i64) -> f64 {
    v as f64 * SCALING_FACTOR
}
