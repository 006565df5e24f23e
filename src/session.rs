// SPDX-License-Identifier: GPL-3.0-only

//! Filter session
//!
//! Owns everything a UI loop needs between frames: the active filter, the
//! recent-filters list, the capture gallery and the collaborators used to
//! persist it. Persistence failures are reported through the notification
//! sink and never discard in-memory state.

use crate::codec::ImageCodec;
use crate::errors::{AppResult, CaptureError};
use crate::filters::{FilterType, PixelBuffer, apply_filter};
use crate::gallery::{Capture, CaptureStore};
use crate::history::FilterHistory;
use crate::notify::{Notification, NotificationSink};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub struct Session<S, C, N> {
    storage: S,
    codec: C,
    sink: N,
    history: FilterHistory,
    gallery: CaptureStore,
    current_filter: FilterType,
    streaming: bool,
    live_selector: Option<watch::Sender<FilterType>>,
}

impl<S, C, N> Session<S, C, N>
where
    S: KeyValueStore,
    C: ImageCodec,
    N: NotificationSink,
{
    /// Start a session, restoring the saved gallery from `storage`
    ///
    /// A gallery that cannot be read is reported and replaced by an empty one.
    pub fn start(storage: S, codec: C, mut sink: N) -> Self {
        let gallery = match CaptureStore::load(&storage) {
            Ok(gallery) => gallery,
            Err(e) => {
                error!(error = %e, "Error loading photos from storage");
                sink.notify(Notification::error("Error loading saved photos"));
                CaptureStore::new()
            }
        };

        Self {
            storage,
            codec,
            sink,
            history: FilterHistory::new(),
            gallery,
            current_filter: FilterType::Standard,
            streaming: false,
            live_selector: None,
        }
    }

    /// Forward every filter change to a running live loop
    pub fn attach_live_selector(&mut self, selector: watch::Sender<FilterType>) {
        selector.send_replace(self.current_filter);
        self.live_selector = Some(selector);
    }

    /// Select a filter by its selector id
    ///
    /// Ids outside the catalog select the identity filter and are left out of
    /// the recent list.
    pub fn select_filter(&mut self, id: &str) -> FilterType {
        match FilterType::from_id(id) {
            Some(filter) => self.set_filter(filter),
            None => {
                debug!(id, "Unknown filter id, using identity");
                self.activate(FilterType::Standard);
            }
        }
        self.current_filter
    }

    /// Make `filter` active and record it in the recent list
    pub fn set_filter(&mut self, filter: FilterType) {
        info!(filter = %filter, "Filter selected");
        self.history.record_selection(filter);
        self.activate(filter);
    }

    fn activate(&mut self, filter: FilterType) {
        self.current_filter = filter;

        if let Some(selector) = &self.live_selector {
            if selector.send(filter).is_err() {
                debug!("Live loop gone, dropping selector");
                self.live_selector = None;
            }
        }
    }

    pub fn current_filter(&self) -> FilterType {
        self.current_filter
    }

    /// Mark the camera stream as running or stopped
    pub fn set_streaming(&mut self, streaming: bool) {
        self.streaming = streaming;
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Run the active filter over one live frame
    pub fn process_frame<'a>(&self, frame: &'a mut PixelBuffer) -> &'a mut PixelBuffer {
        apply_filter(frame, self.current_filter)
    }

    /// Filter, encode and store a still taken from the live stream
    pub fn capture(&mut self, mut frame: PixelBuffer) -> AppResult<&Capture> {
        if !self.streaming {
            self.sink.notify(Notification::error(CaptureError::NotStreaming.to_string()));
            return Err(CaptureError::NotStreaming.into());
        }

        let filter = self.current_filter;
        if filter != FilterType::Standard {
            apply_filter(&mut frame, filter);
        }

        let image_data = match self.codec.encode(&frame) {
            Ok(data) => data,
            Err(e) => {
                error!(error = %e, "Failed to encode capture");
                self.sink.notify(Notification::error("Error capturing photo"));
                return Err(e.into());
            }
        };

        info!(filter = %filter, size = image_data.len(), "Photo captured");
        self.gallery.add(Capture::new(image_data, filter));
        self.sink.notify(Notification::success("Photo captured successfully!"));
        self.persist_gallery();

        self.gallery
            .latest()
            .ok_or_else(|| CaptureError::EmptyStore.into())
    }

    /// Write the most recent capture into `dir` as `photo_<unix millis>.<ext>`
    pub fn download_latest(&mut self, dir: &Path) -> AppResult<PathBuf> {
        let Some(latest) = self.gallery.latest() else {
            warn!("Download requested with no captures");
            self.sink.notify(Notification::error(CaptureError::EmptyStore.to_string()));
            return Err(CaptureError::EmptyStore.into());
        };

        let filename = format!(
            "photo_{}.{}",
            Local::now().timestamp_millis(),
            self.codec.extension()
        );
        let path = dir.join(filename);

        let written =
            std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, &latest.image_data));
        if let Err(e) = written {
            error!(path = %path.display(), error = %e, "Failed to write download");
            self.sink.notify(Notification::error("Error downloading photo"));
            return Err(CaptureError::SaveFailed(e).into());
        }

        info!(path = %path.display(), "Photo downloaded");
        self.sink.notify(Notification::success("Photo downloaded successfully!"));
        Ok(path)
    }

    /// Drop every capture and persist the empty gallery
    pub fn clear_gallery(&mut self) {
        self.gallery.clear();
        self.persist_gallery();
    }

    fn persist_gallery(&mut self) {
        if let Err(e) = self.gallery.save(&mut self.storage) {
            error!(error = %e, "Error saving photos to storage");
            self.sink.notify(Notification::error("Error saving photos to storage"));
        }
    }

    /// `(display name, age label)` rows for the recent-filters list
    pub fn recent_filters(&self, now: DateTime<Local>) -> Vec<(&'static str, String)> {
        self.history.rows(now)
    }

    pub fn history(&self) -> &FilterHistory {
        &self.history
    }

    pub fn gallery(&self) -> &CaptureStore {
        &self.gallery
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }
}
