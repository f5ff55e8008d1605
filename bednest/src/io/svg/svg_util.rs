use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::Path;
use svg::node::element::path::Data;

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Draw the clearance-inflated outline around each item
    #[serde(default)]
    pub draw_inflated: bool,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f32,
    pub bin_fill: Color,
    pub item_fill: Color,
    pub item_fill_opacity: f32,
    pub inflated_stroke: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::EARTH_TONES
    }
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 1.0,
        bin_fill: Color(0xCC, 0x82, 0x4A),
        item_fill: Color(0xFF, 0xC8, 0x79),
        item_fill_opacity: 0.9,
        inflated_stroke: Color(0x2D, 0x2D, 0x2D),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 1.25,
        bin_fill: Color(0xD3, 0xD3, 0xD3),
        item_fill: Color(0x7A, 0x7A, 0x7A),
        item_fill_opacity: 1.0,
        inflated_stroke: Color(0xD0, 0x00, 0x00),
    };
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        anyhow::ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid color: {s}, expected #RRGGBB"
        );
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Closed path through `points`
pub fn polygon_data(points: impl IntoIterator<Item = (f64, f64)>) -> Data {
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return Data::new();
    };
    let mut data = Data::new().move_to::<(f32, f32)>((first.0 as f32, first.1 as f32));
    for (x, y) in points {
        data = data.line_to::<(f32, f32)>((x as f32, y as f32));
    }
    data.close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_round_trip_through_hex() {
        let c = Color::try_from("#CC824A").unwrap();
        assert_eq!(c, Color(0xCC, 0x82, 0x4A));
        assert_eq!(c.to_string(), "#CC824A");
        assert!(Color::try_from("#12345").is_err());
        assert!(Color::try_from("#GG0000").is_err());
    }

    #[test]
    fn draw_options_deserialize_with_defaults() {
        let opts: SvgDrawOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, SvgDrawOptions::default());
    }
}
