// SPDX-License-Identifier: GPL-3.0-only

//! Closed set of selectable filters and their display names

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Filter selectable in the UI, identified on the wire by its lowercase id
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// No filter applied
    #[default]
    #[serde(rename = "none")]
    Standard,
    /// Unweighted channel average
    Grayscale,
    /// Inverted colors
    Invert,
    /// Sepia channel-mixing matrix
    Sepia,
    /// 8x8 block mosaic
    Pixelate,
    /// Horizontal flip
    Mirror,
    /// Red channel tint
    Red,
    /// Green channel tint
    Green,
    /// Blue channel tint
    Blue,
    /// Sepia with a warm push
    Vintage,
    /// 3x3 box blur
    Blur,
    /// Brightened with a glow on hot pixels
    Neon,
    /// Diagonal hue sweep, ignores the source image
    Rainbow,
    /// Four levels per channel
    Posterize,
    /// Diagonal relief
    Emboss,
    /// Grayscale edge drawing
    Sketch,
    /// Warm color temperature
    Warm,
    /// Cool color temperature
    Cool,
}

impl FilterType {
    /// Every filter in selector order
    pub const ALL: [FilterType; 18] = [
        FilterType::Standard,
        FilterType::Grayscale,
        FilterType::Invert,
        FilterType::Sepia,
        FilterType::Pixelate,
        FilterType::Mirror,
        FilterType::Red,
        FilterType::Green,
        FilterType::Blue,
        FilterType::Vintage,
        FilterType::Blur,
        FilterType::Neon,
        FilterType::Rainbow,
        FilterType::Posterize,
        FilterType::Emboss,
        FilterType::Sketch,
        FilterType::Warm,
        FilterType::Cool,
    ];

    /// Stable identifier used by selectors and persisted captures
    pub fn id(&self) -> &'static str {
        match self {
            FilterType::Standard => "none",
            FilterType::Grayscale => "grayscale",
            FilterType::Invert => "invert",
            FilterType::Sepia => "sepia",
            FilterType::Pixelate => "pixelate",
            FilterType::Mirror => "mirror",
            FilterType::Red => "red",
            FilterType::Green => "green",
            FilterType::Blue => "blue",
            FilterType::Vintage => "vintage",
            FilterType::Blur => "blur",
            FilterType::Neon => "neon",
            FilterType::Rainbow => "rainbow",
            FilterType::Posterize => "posterize",
            FilterType::Emboss => "emboss",
            FilterType::Sketch => "sketch",
            FilterType::Warm => "warm",
            FilterType::Cool => "cool",
        }
    }

    /// Human readable name for lists and captions
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Standard => "No Filter",
            FilterType::Grayscale => "Grayscale",
            FilterType::Invert => "Invert",
            FilterType::Sepia => "Sepia",
            FilterType::Pixelate => "Pixelate",
            FilterType::Mirror => "Mirror",
            FilterType::Red => "Red Tint",
            FilterType::Green => "Green Tint",
            FilterType::Blue => "Blue Tint",
            FilterType::Vintage => "Vintage",
            FilterType::Blur => "Blur",
            FilterType::Neon => "Neon Glow",
            FilterType::Rainbow => "Rainbow",
            FilterType::Posterize => "Posterize",
            FilterType::Emboss => "Emboss",
            FilterType::Sketch => "Sketch",
            FilterType::Warm => "Warm Tone",
            FilterType::Cool => "Cool Tone",
        }
    }

    /// Look up a filter by id; unknown ids yield `None`
    pub fn from_id(id: &str) -> Option<FilterType> {
        Self::ALL.into_iter().find(|filter| filter.id() == id)
    }
}

/// Display name for a raw selector value, echoing the value back if unknown
pub fn display_name_for(id: &str) -> &str {
    match FilterType::from_id(id) {
        Some(filter) => filter.display_name(),
        None => id,
    }
}

/// Every filter id in selector order
pub fn all_ids() -> impl Iterator<Item = &'static str> {
    FilterType::ALL.iter().map(FilterType::id)
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when parsing a string that names no filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl fmt::Display for UnknownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter '{}'", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for FilterType {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::from_id(s).ok_or_else(|| UnknownFilter(s.to_string()))
    }
}
