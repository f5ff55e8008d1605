use std::fmt::Display;

use ordered_float::NotNan;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
/// [Proper rigid transformation](https://en.wikipedia.org/wiki/Rigid_transformation),
/// decomposed into a rotation around the origin followed by a translation on the internal grid.
pub struct DTransformation {
    /// The rotation in radians
    pub rotation: NotNan<f64>,
    /// The translation in the x and y-axis
    pub translation: (i64, i64),
}

impl DTransformation {
    pub fn new(rotation: f64, translation: (i64, i64)) -> Self {
        Self {
            rotation: NotNan::new(rotation).expect("rotation is NaN"),
            translation,
        }
    }

    pub const fn empty() -> Self {
        const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
        Self {
            rotation: _0,
            translation: (0, 0),
        }
    }

    pub fn from_translation(translation: (i64, i64)) -> Self {
        Self {
            translation,
            ..Self::empty()
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.into()
    }

    pub fn translation(&self) -> (i64, i64) {
        self.translation
    }

    /// Returns the transformation equivalent to applying `self` followed by a pure translation.
    pub fn then_translate(self, (dx, dy): (i64, i64)) -> Self {
        let (tx, ty) = self.translation;
        Self {
            rotation: self.rotation,
            translation: (tx + dx, ty + dy),
        }
    }
}

impl Default for DTransformation {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {:.3}°, t: ({}, {})",
            self.rotation.to_degrees(),
            self.translation.0,
            self.translation.1
        )
    }
}
