// SPDX-License-Identifier: GPL-3.0-only
//! Live filter loop
//!
//! Pulls frames from a [`FrameSource`], runs the currently selected filter
//! over each one and hands the result to a [`FrameSink`]. Exactly one frame
//! is in flight: the next frame is only requested once the previous one has
//! been filtered and presented. The active filter is read from a
//! `tokio::sync::watch` channel at the start of every frame, so a selector
//! can switch filters while the loop runs.

use crate::filters::{FilterType, PixelBuffer, apply_filter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Action returned by a sink to control loop behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Request the next frame
    Continue,
    /// Stop the loop gracefully
    Stop,
}

/// Supplier of raw frames, e.g. a camera or a still image
pub trait FrameSource: Send {
    /// Next frame, or `None` when the stream has ended
    fn next_frame(&mut self) -> Option<PixelBuffer>;
}

/// Consumer of filtered frames
pub trait FrameSink: Send {
    fn present(&mut self, frame: &PixelBuffer) -> LoopAction;
}

impl<F> FrameSink for F
where
    F: FnMut(&PixelBuffer) -> LoopAction + Send,
{
    fn present(&mut self, frame: &PixelBuffer) -> LoopAction {
        self(frame)
    }
}

/// Create the channel the UI uses to switch the live filter
pub fn filter_channel(
    initial: FilterType,
) -> (watch::Sender<FilterType>, watch::Receiver<FilterType>) {
    watch::channel(initial)
}

/// Controller for a filter loop running on its own thread
///
/// ```ignore
/// let (selector, selected) = filter_channel(FilterType::Standard);
/// let mut controller = FilterLoopController::start("preview", camera, selected, |frame| {
///     display(frame);
///     LoopAction::Continue
/// });
///
/// selector.send(FilterType::Sketch).ok();
/// controller.stop();
/// ```
pub struct FilterLoopController {
    thread_handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    name: String,
}

impl FilterLoopController {
    /// Start the loop on a new thread
    ///
    /// The loop ends when the source runs dry, the sink returns
    /// [`LoopAction::Stop`], or [`stop`](Self::stop) is called.
    pub fn start<S, K>(
        name: &str,
        mut source: S,
        selected: watch::Receiver<FilterType>,
        mut sink: K,
    ) -> Self
    where
        S: FrameSource + 'static,
        K: FrameSink + 'static,
    {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop_signal_clone = Arc::clone(&stop_signal);
        let frames = Arc::new(AtomicU64::new(0));
        let frames_clone = Arc::clone(&frames);
        let name_clone = name.to_string();

        info!(name = %name, "Starting filter loop");

        let thread_handle = thread::spawn(move || {
            let mut last_filter = None;

            loop {
                if stop_signal_clone.load(Ordering::SeqCst) {
                    debug!(name = %name_clone, "Stop signal received");
                    break;
                }

                let Some(mut frame) = source.next_frame() else {
                    debug!(name = %name_clone, "Frame source ended");
                    break;
                };

                let filter = *selected.borrow();
                if last_filter != Some(filter) {
                    debug!(name = %name_clone, filter = %filter, "Live filter changed");
                    last_filter = Some(filter);
                }

                apply_filter(&mut frame, filter);
                frames_clone.fetch_add(1, Ordering::Relaxed);

                if sink.present(&frame) == LoopAction::Stop {
                    debug!(name = %name_clone, "Sink requested stop");
                    break;
                }
            }

            info!(
                name = %name_clone,
                frames = frames_clone.load(Ordering::Relaxed),
                "Filter loop thread exiting"
            );
        });

        Self {
            thread_handle: Some(thread_handle),
            stop_signal,
            frames,
            name: name.to_string(),
        }
    }

    /// Frames filtered so far
    pub fn frames_processed(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Check if the loop is still running
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Shared stop flag, e.g. for a Ctrl-C handler
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    /// Signal the loop to stop after the frame in flight (non-blocking)
    pub fn request_stop(&self) {
        debug!(name = %self.name, "Requesting filter loop stop");
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Stop the loop and wait for the thread to finish
    pub fn stop(&mut self) {
        self.request_stop();
        self.join();
    }

    /// Wait for the thread to finish without sending the stop signal
    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            debug!(name = %self.name, "Waiting for filter loop thread to finish");
            if let Err(e) = handle.join() {
                warn!(name = %self.name, "Filter loop thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for FilterLoopController {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            debug!(name = %self.name, "FilterLoopController dropped, stopping loop");
            self.stop();
        }
    }
}

/// Source that replays one still, optionally a fixed number of times
pub struct StillSource {
    frame: PixelBuffer,
    remaining: Option<u64>,
}

impl StillSource {
    pub fn new(frame: PixelBuffer, repeat: Option<u64>) -> Self {
        Self {
            frame,
            remaining: repeat,
        }
    }
}

impl FrameSource for StillSource {
    fn next_frame(&mut self) -> Option<PixelBuffer> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        Some(self.frame.clone())
    }
}

/// Synthetic moving test pattern, one step per frame
pub struct TestPatternSource {
    width: u32,
    height: u32,
    tick: u32,
    remaining: Option<u64>,
}

impl TestPatternSource {
    pub fn new(width: u32, height: u32, frames: Option<u64>) -> Self {
        Self {
            width,
            height,
            tick: 0,
            remaining: frames,
        }
    }
}

impl FrameSource for TestPatternSource {
    fn next_frame(&mut self) -> Option<PixelBuffer> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }

        let mut frame = PixelBuffer::new(self.width, self.height);
        let width = self.width as usize;
        let tick = self.tick;
        for (i, px) in frame.pixels_mut().iter_mut().enumerate() {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            *px = [
                (x.wrapping_add(tick) & 0xFF) as u8,
                (y.wrapping_mul(2) & 0xFF) as u8,
                ((x ^ y).wrapping_add(tick.wrapping_mul(3)) & 0xFF) as u8,
                255,
            ];
        }
        self.tick = self.tick.wrapping_add(1);
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn test_loop_ends_with_source() {
        let (_selector, selected) = filter_channel(FilterType::Invert);
        let source = StillSource::new(PixelBuffer::filled(2, 2, [10, 20, 30, 255]), Some(5));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let sink = move |frame: &PixelBuffer| {
            seen_clone.lock().unwrap().push(frame.pixel(0, 0));
            LoopAction::Continue
        };
        let mut controller = FilterLoopController::start("test-loop", source, selected, sink);
        controller.join();

        assert_eq!(controller.frames_processed(), 5);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert!(seen.iter().all(|px| *px == Some([245, 235, 225, 255])));
    }

    #[test]
    fn test_sink_can_stop_loop() {
        let (_selector, selected) = filter_channel(FilterType::Standard);
        let source = TestPatternSource::new(4, 4, None);
        let mut count = 0;

        let sink = move |_: &PixelBuffer| {
            count += 1;
            if count >= 3 {
                LoopAction::Stop
            } else {
                LoopAction::Continue
            }
        };
        let mut controller = FilterLoopController::start("test-stop", source, selected, sink);
        controller.join();

        assert_eq!(controller.frames_processed(), 3);
    }

    #[test]
    fn test_stop_signal() {
        let (_selector, selected) = filter_channel(FilterType::Blur);
        let source = TestPatternSource::new(8, 8, None);

        let sink = |_: &PixelBuffer| {
            thread::sleep(Duration::from_millis(5));
            LoopAction::Continue
        };
        let mut controller = FilterLoopController::start("test-signal", source, selected, sink);
        assert!(controller.is_running());

        thread::sleep(Duration::from_millis(30));
        controller.stop();
        assert!(!controller.is_running());
        assert!(controller.frames_processed() > 0);
    }

    #[test]
    fn test_filter_switch_applies_to_later_frames() {
        let (selector, selected) = filter_channel(FilterType::Standard);
        let source = StillSource::new(PixelBuffer::filled(1, 1, [0, 0, 0, 255]), None);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);

        let sink = move |frame: &PixelBuffer| {
            let mut seen = seen_clone.lock().unwrap();
            seen.push(frame.pixel(0, 0));
            if seen.len() == 2 {
                selector.send(FilterType::Invert).ok();
            }
            if seen.len() >= 4 {
                LoopAction::Stop
            } else {
                LoopAction::Continue
            }
        };
        let mut controller = FilterLoopController::start("test-switch", source, selected, sink);
        controller.join();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], Some([0, 0, 0, 255]));
        assert_eq!(seen[1], Some([0, 0, 0, 255]));
        assert_eq!(seen[2], Some([255, 255, 255, 255]));
        assert_eq!(seen[3], Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_pattern_source_moves() {
        let mut source = TestPatternSource::new(4, 2, Some(2));
        let first = source.next_frame().unwrap();
        let second = source.next_frame().unwrap();
        assert_ne!(first, second);
        assert!(source.next_frame().is_none());
    }
}
