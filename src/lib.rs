// SPDX-License-Identifier: MPL-2.0

//! Filter Camera - live image filters, a recent-filters list and a small
//! capture gallery
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`filters`]: RGBA pixel buffers, the filter catalog and the transforms
//! - [`history`]: most-recently-used filter list
//! - [`gallery`]: bounded list of captured stills and its persistence
//! - [`session`]: ties selection, capture and download together
//! - [`frame_loop`]: threaded loop that filters a live frame stream
//! - [`storage`], [`codec`], [`notify`]: collaborators used by the session
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! let mut frame = PixelBuffer::filled(640, 480, [120, 80, 40, 255]);
//! apply_filter_by_id(&mut frame, "sepia");
//! ```

pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod frame_loop;
pub mod gallery;
pub mod history;
pub mod notify;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use constants::EncodingQuality;
pub use errors::{AppError, AppResult};
pub use filters::{FilterType, PixelBuffer, apply_filter, apply_filter_by_id};
pub use gallery::{Capture, CaptureStore};
pub use history::FilterHistory;
pub use session::Session;
