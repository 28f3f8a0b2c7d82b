//! Performance monitoring utilities.
//!
//! The gesture path budgets one applied transform per object per frame; this
//! module provides the instrumentation to verify that budget holds on real
//! hardware.
//!
//! ## Features
//!
//! - **Frame timing**: rolling average over recent applied frames
//! - **Scoped timers**: RAII-style timing for hot blocks
//! - **Conditional compilation**: zero-cost when the `profiling` feature is off
//!
//! Enable with `cargo build --features profiling`.

use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, warn};

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Number of samples kept for rolling averages
const SAMPLE_COUNT: usize = 60;

/// Warn when a frame takes this multiple of the target
const WARN_THRESHOLD: f64 = 2.0;

// ============================================================================
// Profiling Macro (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
///
/// # Example
/// ```ignore
/// fn apply_pending() {
///     profile_scope!("apply_pending");
///     // ... hot path ...
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
}

pub use profile_scope;

/// RAII timer that logs its elapsed time on drop.
#[cfg(feature = "profiling")]
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

#[cfg(feature = "profiling")]
impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self { name, start: Instant::now() }
    }
}

#[cfg(feature = "profiling")]
impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::trace!(scope = self.name, elapsed_ms, "scope timing");
    }
}

// ============================================================================
// Frame Monitor
// ============================================================================

/// Rolling frame-time monitor for the transform pipeline.
pub struct FrameMonitor {
    frame_times: VecDeque<f64>,
    frame_start: Option<Instant>,
    slow_frame_count: u64,
    total_frames: u64,
}

impl Default for FrameMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMonitor {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(SAMPLE_COUNT),
            frame_start: None,
            slow_frame_count: 0,
            total_frames: 0,
        }
    }

    /// Mark the start of an applied frame.
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of an applied frame, recording its duration.
    pub fn end_frame(&mut self) {
        let Some(start) = self.frame_start.take() else {
            return;
        };
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.record(elapsed_ms);
    }

    fn record(&mut self, elapsed_ms: f64) {
        if self.frame_times.len() >= SAMPLE_COUNT {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(elapsed_ms);
        self.total_frames += 1;

        if elapsed_ms > TARGET_FRAME_MS * WARN_THRESHOLD {
            self.slow_frame_count += 1;
            warn!(
                elapsed_ms,
                target_ms = TARGET_FRAME_MS,
                "slow transform frame"
            );
        } else if elapsed_ms > TARGET_FRAME_MS {
            debug!(elapsed_ms, "transform frame over budget");
        }
    }

    /// Average frame time over recent samples, in milliseconds.
    pub fn average_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn slow_frames(&self) -> u64 {
        self.slow_frame_count
    }
}
