mod point;
mod rect;
mod simple_polygon;

#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use point::Pointf;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use simple_polygon::SPolygon;
