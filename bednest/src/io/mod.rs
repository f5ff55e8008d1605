/// All logic for rendering silhouettes and [`PackGroup`](crate::entities::PackGroup)s to SVG
pub mod svg;
