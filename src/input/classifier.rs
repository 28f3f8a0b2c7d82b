//! Platform capability classification.
//!
//! Exactly one of two two-finger gesture backends is wired up for the
//! lifetime of the process: platform-native gesture deltas on WebKit engines,
//! manual touch math everywhere else. The verdict is computed once from
//! host-reported capabilities and never re-evaluated; single-finger drag uses
//! the pointer-event path on every platform.

use once_cell::sync::OnceCell;
use tracing::info;

/// Host-reported runtime capabilities, sampled once at startup.
///
/// Chromium also exposes some WebKit-origin globals, so the WebKit test must
/// exclude it explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformCaps {
    /// The `webkitURL` global exists.
    pub has_webkit_url_global: bool,
    /// Native gesture events (`gesturestart`/`gesturechange`/`gestureend`)
    /// are available.
    pub has_native_gesture_events: bool,
    /// Chromium-only globals exist (Blink engine).
    pub has_chromium_globals: bool,
}

impl PlatformCaps {
    /// True for WebKit engines (Safari, iOS Safari, WKWebView), false for
    /// Chromium and everything else.
    pub fn is_webkit(&self) -> bool {
        (self.has_webkit_url_global || self.has_native_gesture_events)
            && !self.has_chromium_globals
    }

    /// Which two-finger backend these capabilities select.
    pub fn two_finger_backend(&self) -> TwoFingerBackend {
        if self.is_webkit() {
            TwoFingerBackend::NativeGestures
        } else {
            TwoFingerBackend::TouchMath
        }
    }
}

/// The two mutually exclusive two-finger gesture backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwoFingerBackend {
    /// Platform-supplied scale/rotation deltas (WebKit only).
    NativeGestures,
    /// Hand-computed two-finger distance/angle deltas.
    TouchMath,
}

static CLASSIFIED: OnceCell<TwoFingerBackend> = OnceCell::new();

/// Classify the process once. The first call wins; later calls (even with
/// different capabilities) return the original verdict.
pub fn classify(caps: &PlatformCaps) -> TwoFingerBackend {
    *CLASSIFIED.get_or_init(|| {
        let backend = caps.two_finger_backend();
        info!(?backend, ?caps, "two-finger gesture backend selected");
        backend
    })
}

/// The process-wide verdict, if classification has run.
pub fn classified_backend() -> Option<TwoFingerBackend> {
    CLASSIFIED.get().copied()
}
