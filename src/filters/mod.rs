// SPDX-License-Identifier: MPL-2.0

//! CPU pixel filters for live frames and captured stills
//!
//! - [`buffer`]: the RGBA raster filters operate on
//! - [`catalog`]: the closed set of filters and their names
//! - [`engine`]: dispatch from a filter to its transform
//! - [`point`] / [`spatial`]: the transforms themselves

pub mod buffer;
pub mod catalog;
pub mod engine;
pub mod point;
pub mod spatial;

pub use buffer::{PixelBuffer, Snapshot};
pub use catalog::{FilterType, UnknownFilter, all_ids, display_name_for};
pub use engine::{apply_filter, apply_filter_by_id};
