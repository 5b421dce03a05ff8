//! Types describing the output of the tracking thread.
//!
//! The tracker itself is an external collaborator; this crate only consumes
//! its per-frame state and diagnostics for visualization.

pub mod state;

pub use state::TrackingState;
