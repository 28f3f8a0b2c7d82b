//! caseboard - direct-manipulation engine for a phone-case customizer.
//!
//! Users place, drag, pinch and rotate overlay objects (image stickers, free
//! text) on a masked preview of a case back. The engine recognizes single-
//! and multi-pointer gestures across heterogeneous input backends, paints
//! live transforms through a frame-coalesced pipeline that bypasses the
//! authoritative model, and reconciles that model exactly once per gesture -
//! so live editing and the exported composite always agree.
//!
//! ## Architecture
//!
//! Two tiers of state, one seam between them:
//!
//! - the **live tier**: per-object [`input::GestureSession`] records plus the
//!   [`pipeline::TransformPipeline`] slots, written at input rate, painted at
//!   frame rate, never read by business logic;
//! - the **committed tier**: the [`store::ObjectStore`], written once per
//!   gesture by the commit step and read at rest by the export boundary.
//!
//! Two interchangeable rendering surfaces implement the same contract
//! ([`render::ManipulableSurface`]): the free-transform overlay and a
//! retained scene graph with built-in handles and hard clipping.

pub mod bounds;
pub mod commit;
pub mod config;
pub mod constants;
pub mod editor;
pub mod geometry;
pub mod hit_testing;
pub mod input;
pub mod perf;
pub mod pipeline;
pub mod render;
pub mod selection;
pub mod store;
pub mod types;

pub use bounds::{BoundsTracker, LayoutProbe, MaskedBounds, SharedBounds};
pub use config::GestureTuning;
pub use editor::CaseEditor;
pub use geometry::{ContainerRect, PercentPoint, PixelRect};
pub use input::{PlatformCaps, TwoFingerBackend};
pub use pipeline::{FrameScheduler, LiveTransform, TransformPipeline};
pub use render::{ManipulableSurface, SurfaceNode};
pub use selection::SelectionManager;
pub use store::{InMemoryStore, ObjectStore, StoreError};
pub use types::{ObjectId, ObjectKind, ObjectUpdate, PlacedObject};
