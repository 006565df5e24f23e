// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for filter operations
//!
//! This module provides command-line functionality for:
//! - Listing and applying filters
//! - Capturing stills into the persistent gallery and downloading them
//! - Running the live filter loop over a test pattern

use filter_camera::Config;
use filter_camera::codec::{self, JpegCodec};
use filter_camera::filters::{
    FilterType, PixelBuffer, all_ids, apply_filter, display_name_for,
};
use filter_camera::frame_loop::{
    FilterLoopController, LoopAction, TestPatternSource, filter_channel,
};
use filter_camera::notify::{NotificationKind, RecordingSink};
use filter_camera::session::Session;
use filter_camera::storage::FileStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Instant;

type CliSession = Session<FileStore, JpegCodec, RecordingSink>;

/// Load the config from `path`, or the default location when not given
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::load_or_default()),
    }
}

fn open_session(config: &Config) -> CliSession {
    let store = FileStore::new(config.storage_dir());
    let codec = JpegCodec::new(config.photo_quality);
    let mut session = Session::start(store, codec, RecordingSink::new());
    print_notifications(&mut session);
    session
}

fn print_notifications(session: &mut CliSession) {
    for notification in session.sink_mut().drain() {
        match notification.kind {
            NotificationKind::Success => println!("{}", notification),
            NotificationKind::Error => eprintln!("Error: {}", notification),
        }
    }
}

/// List all filters with their display names
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for id in all_ids() {
        println!("  {:<10} {}", id, display_name_for(id));
    }
    Ok(())
}

/// Filter an image file and write the result
pub fn apply(filter: &str, input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filter: FilterType = filter.parse()?;

    let mut frame = codec::decode_file(input)?;
    println!("Input: {} ({}x{})", input.display(), frame.width(), frame.height());

    let start = Instant::now();
    apply_filter(&mut frame, filter);
    println!(
        "Applied {} in {:.1}ms",
        filter.display_name(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    codec::save_file(&frame, output)?;
    println!("Saved to: {}", output.display());
    Ok(())
}

/// Capture an image file through the active filter into the gallery
pub fn capture(
    config: &Config,
    filter: Option<&str>,
    input: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match filter {
        Some(id) => id.parse()?,
        None => config.default_filter,
    };
    let frame = codec::decode_file(input)?;

    let mut session = open_session(config);
    session.set_filter(filter);
    session.set_streaming(true);

    let result = session.capture(frame).map(|capture| {
        format!("{} ({} bytes)", capture.caption(), capture.image_data.len())
    });
    print_notifications(&mut session);

    let summary = result?;
    println!("  {}", summary);
    println!("Gallery: {} photo(s)", session.gallery().len());
    Ok(())
}

/// List captured photos, most recent first
pub fn list_gallery(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(config);
    let gallery = session.gallery();

    if gallery.is_empty() {
        println!("No captured photos.");
        return Ok(());
    }

    println!("Captured photos:");
    println!();
    for (index, capture) in gallery.all().enumerate() {
        println!(
            "  [{}] {} ({} bytes)",
            index,
            capture.caption(),
            capture.image_data.len()
        );
    }
    Ok(())
}

/// Write the most recent capture to `output` or the configured download dir
pub fn download(
    config: &Config,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = output.unwrap_or_else(|| config.download_dir());

    let mut session = open_session(config);
    let result = session.download_latest(&dir);
    print_notifications(&mut session);

    let path = result?;
    println!("Saved to: {}", path.display());
    Ok(())
}

/// Remove every capture from the gallery
pub fn clear(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(config);
    let count = session.gallery().len();
    session.clear_gallery();
    print_notifications(&mut session);
    println!("Removed {} photo(s)", count);
    Ok(())
}

/// Run the filter loop over a moving test pattern until done or Ctrl+C
pub fn preview(
    filter: &str,
    frames: Option<u64>,
    width: u32,
    height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter: FilterType = filter.parse()?;
    if width == 0 || height == 0 {
        return Err("Preview size must be non-zero".into());
    }

    let (_selector, selected) = filter_channel(filter);
    let source = TestPatternSource::new(width, height, frames);

    println!(
        "Previewing {} at {}x{}... (press Ctrl+C to stop)",
        filter.display_name(),
        width,
        height
    );

    let start = Instant::now();
    let mut controller =
        FilterLoopController::start("preview", source, selected, |_: &PixelBuffer| {
            LoopAction::Continue
        });

    let stop_flag = controller.stop_signal();
    ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::SeqCst);
    })?;

    controller.join();

    let elapsed = start.elapsed().as_secs_f64();
    let processed = controller.frames_processed();
    println!();
    println!("Frames: {}", processed);
    if elapsed > 0.0 {
        println!("Average: {:.1} fps", processed as f64 / elapsed);
    }
    Ok(())
}
