// SPDX-License-Identifier: GPL-3.0-only

//! Captured stills gallery
//!
//! Holds the last few filtered captures, newest first. The whole list is
//! serialized to JSON and written under a single storage key; image bytes are
//! base64 encoded inside that document.

use crate::constants::{CAPTURE_STORAGE_KEY, MAX_CAPTURES};
use crate::errors::StorageError;
use crate::filters::FilterType;
use crate::storage::KeyValueStore;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

/// A filtered still and how it was taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    /// Encoded image bytes
    #[serde(with = "base64_bytes")]
    pub image_data: Vec<u8>,
    /// Local wall-clock time of the capture, for display
    pub timestamp: String,
    pub filter_applied: FilterType,
}

impl Capture {
    /// Stamp a capture with the current local time
    pub fn new(image_data: Vec<u8>, filter_applied: FilterType) -> Self {
        Self {
            image_data,
            timestamp: Local::now().format("%-I:%M:%S %p").to_string(),
            filter_applied,
        }
    }

    /// Caption shown under the gallery thumbnail
    pub fn caption(&self) -> String {
        format!("{} - {}", self.timestamp, self.filter_applied)
    }
}

/// Bounded most-recent-first list of captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureStore {
    captures: VecDeque<Capture>,
    capacity: usize,
}

impl Default for CaptureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_CAPTURES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            captures: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest capture past capacity
    pub fn add(&mut self, capture: Capture) {
        self.captures.push_front(capture);
        if self.captures.len() > self.capacity {
            debug!(capacity = self.capacity, "Evicting oldest capture");
            self.captures.truncate(self.capacity);
        }
    }

    /// Captures, most recent first
    pub fn all(&self) -> impl Iterator<Item = &Capture> {
        self.captures.iter()
    }

    pub fn latest(&self) -> Option<&Capture> {
        self.captures.front()
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    pub fn clear(&mut self) {
        self.captures.clear();
    }

    /// Serialize the whole list as one JSON document
    pub fn to_json(&self) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec(&self.captures)?)
    }

    /// Rebuild a store from a JSON document, keeping at most `MAX_CAPTURES`
    pub fn from_json(bytes: &[u8]) -> Result<Self, StorageError> {
        let mut captures: VecDeque<Capture> = serde_json::from_slice(bytes)?;
        captures.truncate(MAX_CAPTURES);
        Ok(Self {
            captures,
            capacity: MAX_CAPTURES,
        })
    }

    /// Load the persisted gallery; an absent key gives an empty store
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StorageError> {
        match store.get(CAPTURE_STORAGE_KEY)? {
            Some(bytes) => {
                let gallery = Self::from_json(&bytes)?;
                info!(count = gallery.len(), "Loaded saved captures");
                Ok(gallery)
            }
            None => Ok(Self::new()),
        }
    }

    /// Write the whole gallery under the capture key
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let bytes = self.to_json()?;
        store.set(CAPTURE_STORAGE_KEY, &bytes)?;
        debug!(count = self.len(), size = bytes.len(), "Saved captures");
        Ok(())
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
