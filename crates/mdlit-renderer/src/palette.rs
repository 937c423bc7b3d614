//! Color palette for `[color]text[/color]` spans.

use std::fmt;
use std::str::FromStr;

/// A named palette color. Each renders as its "70" shade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    BlueGreen,
    LightBlue,
    Blue,
    Violet,
    Gray,
}

/// Error for a color name outside the palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color: {0}")]
pub struct UnknownColor(pub String);

impl Color {
    /// All palette colors in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::BlueGreen,
        Self::LightBlue,
        Self::Blue,
        Self::Violet,
        Self::Gray,
    ];

    /// Name as written in documents.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::BlueGreen => "blue-green",
            Self::LightBlue => "light-blue",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Gray => "gray",
        }
    }

    /// Hex value of the 70 shade.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#ff4b4b",
            Self::Orange => "#ffa421",
            Self::Yellow => "#ffe312",
            Self::Green => "#21c354",
            Self::BlueGreen => "#29b09d",
            Self::LightBlue => "#00c0f2",
            Self::Blue => "#1c83e1",
            Self::Violet => "#803df5",
            Self::Gray => "#555867",
        }
    }

    /// Regex alternation of every palette name.
    pub(crate) fn alternation() -> String {
        Self::ALL
            .iter()
            .map(|c| regex::escape(c.name()))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownColor(s.to_owned()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
