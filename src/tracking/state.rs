//! Tracking state machine of the upstream visual tracker.
//!
//! The logical progression is:
//! `SystemNotReady -> NoImagesYet -> NotInitialized -> Ok <-> Lost`
//! with no terminal state. The `SystemNotReady -> NoImagesYet` edge is
//! fired by the first read of the shared frame state, not by a write
//! (see `viz::frame_state::FrameState::snapshot`).

/// State of the tracking thread, as reported to the visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// System still loading (e.g. vocabulary), no tracking possible yet.
    SystemNotReady,
    /// Ready, but no frame has been processed.
    NoImagesYet,
    /// Waiting for map initialization from a reference frame.
    NotInitialized,
    /// Tracking successfully.
    Ok,
    /// Tracking lost, attempting relocalization.
    Lost,
}

impl Default for TrackingState {
    fn default() -> Self {
        Self::SystemNotReady
    }
}
