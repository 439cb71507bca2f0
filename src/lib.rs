#![forbid(unsafe_code)]

//! Scroll-driven 3D gallery animation core.
//!
//! A host rendering loop feeds [`Animator::advance`] (or
//! [`GallerySession::tick`]) a scroll progress value and an elapsed-time
//! delta once per frame; the crate computes which items are visible, the
//! role each plays in the hand-off, and every item's damped pose. Hosts
//! draw; vitrine only animates.

pub mod animator;
pub mod config;
pub mod damp;
pub mod error;
pub mod manifest;
pub mod overrides;
pub mod pose;
pub mod scroll;
pub mod session;
pub mod surface;
pub mod window;

pub use animator::{Animator, Frame, IDLE_SPIN_RATE, ItemFrame};
pub use config::{GalleryConfig, SectionCount};
pub use damp::{DampedPose, OPACITY_LAMBDA, POSE_LAMBDA, damp};
pub use error::{VitrineError, VitrineResult};
pub use manifest::{Item, Manifest};
pub use overrides::{OverrideStack, OverrideTable, PoseOverride, ResolvedOverride, merge};
pub use pose::{BASE_PITCH, FRONT_YAW, PoseTarget, baseline_pose, pose_target};
pub use scroll::ScrollSnapshot;
pub use session::GallerySession;
pub use surface::{RecordingSurface, RenderSurface, SurfaceEvent};
pub use window::{Role, role_of, visible_window};
