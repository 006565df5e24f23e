// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};

/// Number of entries kept in the recent-filters list
pub const MAX_RECENT_FILTERS: usize = 5;

/// Number of stills kept in the capture gallery
pub const MAX_CAPTURES: usize = 5;

/// Side length of a pixelate tile
pub const PIXELATE_BLOCK_SIZE: usize = 8;

/// Quantization levels per channel for posterize
pub const POSTERIZE_LEVELS: u32 = 4;

/// Storage key the capture gallery is persisted under
pub const CAPTURE_STORAGE_KEY: &str = "capturedPhotos";

/// Application directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "filter-camera";

/// JPEG quality presets for captured stills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl EncodingQuality {
    /// All presets, lowest to highest
    pub const ALL: [EncodingQuality; 4] = [
        EncodingQuality::Low,
        EncodingQuality::Medium,
        EncodingQuality::High,
        EncodingQuality::Maximum,
    ];

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            EncodingQuality::Low => "Low",
            EncodingQuality::Medium => "Medium",
            EncodingQuality::High => "High",
            EncodingQuality::Maximum => "Maximum",
        }
    }

    /// Get JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::High => 92,
            EncodingQuality::Maximum => 98,
        }
    }
}
