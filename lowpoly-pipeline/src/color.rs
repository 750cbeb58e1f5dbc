//! Fragment color policy

use crate::host::MeshHost;
use lowpoly_core::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in pastel palette, cycled by fragment index
pub const PASTEL_PALETTE: [Rgb; 8] = [
    Rgb::new(0.60, 0.75, 0.90), // blue
    Rgb::new(0.60, 0.90, 0.60), // green
    Rgb::new(0.90, 0.60, 0.60), // red
    Rgb::new(0.90, 0.90, 0.60), // yellow
    Rgb::new(0.80, 0.60, 0.90), // purple
    Rgb::new(0.60, 0.90, 0.90), // cyan
    Rgb::new(0.90, 0.80, 0.60), // orange
    Rgb::new(0.70, 0.70, 0.70), // grey
];

/// How each fragment gets its color
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorSpec {
    /// Cycle through [`PASTEL_PALETTE`]
    #[default]
    Default,
    /// Emit no color; the host colors the object later
    NoColor,
    /// Every fragment gets the same named color
    Single(String),
    /// Cycle through named colors by fragment index
    Palette(Vec<String>),
}

impl ColorSpec {
    /// Parse a user color argument.
    ///
    /// `"none"` disables colors, several whitespace separated names form a
    /// palette, one name is a single color, and an empty string or
    /// `"default"` selects the pastel palette.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("default") {
            return ColorSpec::Default;
        }
        if s.eq_ignore_ascii_case("none") {
            return ColorSpec::NoColor;
        }
        let names: Vec<String> = s.split_whitespace().map(str::to_string).collect();
        if names.len() > 1 {
            ColorSpec::Palette(names)
        } else {
            ColorSpec::Single(s.to_string())
        }
    }

    /// Color of fragment `index`, resolving names through the host.
    ///
    /// A name the host cannot resolve falls back to [`Rgb::GREY_FALLBACK`].
    pub fn color_for<H: MeshHost + ?Sized>(&self, index: usize, host: &H) -> Option<Rgb> {
        let name = match self {
            ColorSpec::NoColor => return None,
            ColorSpec::Default => return Some(PASTEL_PALETTE[index % PASTEL_PALETTE.len()]),
            ColorSpec::Single(name) => name,
            ColorSpec::Palette(names) if names.is_empty() => return None,
            ColorSpec::Palette(names) => &names[index % names.len()],
        };
        match host.resolve_color(name) {
            Ok(rgb) => Some(rgb),
            Err(e) => {
                log::warn!("color '{}' could not be resolved ({}), using grey", name, e);
                Some(Rgb::GREY_FALLBACK)
            }
        }
    }
}

impl FromStr for ColorSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ColorSpec::parse(s))
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        ColorSpec::parse(&s)
    }
}

impl From<ColorSpec> for String {
    fn from(spec: ColorSpec) -> Self {
        spec.to_string()
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Default => write!(f, "default"),
            ColorSpec::NoColor => write!(f, "none"),
            ColorSpec::Single(name) => write!(f, "{}", name),
            ColorSpec::Palette(names) => write!(f, "{}", names.join(" ")),
        }
    }
}

/// Look up a common color name or an `r,g,b` float triple.
///
/// Components of a triple are clamped into `[0, 1]`.
pub fn named_color(name: &str) -> Option<Rgb> {
    let name = name.trim();
    if name.contains(',') {
        let parts: Vec<f32> = name
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .ok()?;
        return match parts.as_slice() {
            [r, g, b] => Some(Rgb::clamped(*r, *g, *b)),
            _ => None,
        };
    }

    let rgb = match name.to_ascii_lowercase().as_str() {
        "red" => Rgb::new(1.0, 0.0, 0.0),
        "green" => Rgb::new(0.0, 1.0, 0.0),
        "blue" => Rgb::new(0.0, 0.0, 1.0),
        "yellow" => Rgb::new(1.0, 1.0, 0.0),
        "cyan" => Rgb::new(0.0, 1.0, 1.0),
        "magenta" => Rgb::new(1.0, 0.0, 1.0),
        "orange" => Rgb::new(1.0, 0.5, 0.0),
        "purple" => Rgb::new(0.75, 0.0, 0.75),
        "white" => Rgb::new(1.0, 1.0, 1.0),
        "black" => Rgb::new(0.0, 0.0, 0.0),
        "grey" | "gray" => Rgb::new(0.5, 0.5, 0.5),
        _ => return None,
    };
    Some(rgb)
}
