mod group_to_svg;
mod model_to_svg;
mod svg_util;

#[doc(inline)]
pub use group_to_svg::*;
#[doc(inline)]
pub use model_to_svg::*;

#[doc(inline)]
pub use svg_util::Color;
#[doc(inline)]
pub use svg_util::SvgDrawOptions;
#[doc(inline)]
pub use svg_util::SvgLayoutTheme;
