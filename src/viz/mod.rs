//! Visualization of per-frame tracking diagnostics.
//!
//! Two pieces, in dependency order:
//! - [`frame_state`]: the producer/consumer hand-off of the latest tracking
//!   state, image, and per-keypoint annotations.
//! - [`frame_drawer`]: turns a captured snapshot into a decorated image
//!   (feature overlays plus a status band).

pub mod frame_drawer;
pub mod frame_state;

pub use frame_drawer::FrameDrawer;
pub use frame_state::{derive_map_membership, FrameAnnotations, FrameSnapshot, FrameState};
