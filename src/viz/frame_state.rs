//! Shared frame state between the tracking thread and the drawer.
//!
//! The tracker publishes an immutable [`FrameSnapshot`] after every processed
//! frame; the drawer clones the latest handle and works on it unlocked. Both
//! sides touch the same `parking_lot::Mutex`, but only for the pointer
//! swap/clone, so the producer is never blocked by drawing.

use std::sync::Arc;

use opencv::core::{KeyPoint, Mat, Scalar, Vector, CV_8UC3};
use opencv::prelude::*;
use parking_lot::Mutex;
use tracing::debug;

use crate::map::MapPointId;
use crate::tracking::TrackingState;

/// Per-keypoint annotations attached to a frame, dependent on the tracking
/// state the frame was processed in.
pub enum FrameAnnotations {
    /// Nothing beyond the keypoints themselves (not ready / waiting / lost).
    None,
    /// Map initialization in progress: keypoints of the reference frame and,
    /// for each of them, the index of the corresponding current keypoint
    /// (negative = unmatched).
    Init {
        reference_keypoints: Vector<KeyPoint>,
        matches: Vec<i32>,
    },
    /// Normal tracking: raw per-keypoint association with the map, parallel
    /// to the current keypoints.
    Tracked {
        map_points: Vec<Option<MapPointId>>,
        outliers: Vec<bool>,
    },
}

/// Whether each keypoint counts as tracked: associated with a map point and
/// not flagged as a geometric outlier.
///
/// Both slices are parallel to the current keypoints; equal lengths are a
/// caller contract.
pub fn derive_map_membership(map_points: &[Option<MapPointId>], outliers: &[bool]) -> Vec<bool> {
    debug_assert_eq!(map_points.len(), outliers.len());
    map_points
        .iter()
        .zip(outliers)
        .map(|(mp, &outlier)| mp.is_some() && !outlier)
        .collect()
}

/// Everything the drawer needs about one frame, captured consistently.
///
/// Which fields are meaningful depends on `state`:
/// - `keypoints`: `NotInitialized`, `Ok`, `Lost`
/// - `init_keypoints` / `init_matches`: `NotInitialized` only
/// - `in_map`: `Ok` only (one entry per current keypoint)
#[derive(Clone)]
pub struct FrameSnapshot {
    pub state: TrackingState,
    pub image: Mat,
    pub keypoints: Vector<KeyPoint>,
    pub init_keypoints: Vector<KeyPoint>,
    /// Indices into `keypoints`, parallel to `init_keypoints`; negative
    /// means unmatched.
    pub init_matches: Vec<i32>,
    pub in_map: Vec<bool>,
}

// SAFETY: FrameSnapshot is safe to share between threads because:
// 1. The OpenCV KeyPoint's *mut c_void is an artifact of the Rust bindings -
//    the actual data is POD (point coordinates, size, angle, etc.)
// 2. A snapshot is never mutated after publication; the image Mat holds its
//    own copy of the source bytes
unsafe impl Send for FrameSnapshot {}
unsafe impl Sync for FrameSnapshot {}

/// Holder of the latest published [`FrameSnapshot`].
///
/// One tracking thread calls [`update`](Self::update), one drawing thread
/// calls [`snapshot`](Self::snapshot). There is no staleness detection: two
/// reads without an intervening write observe identical data.
pub struct FrameState {
    latest: Mutex<Arc<FrameSnapshot>>,
}

impl FrameState {
    /// Create the holder with a black canvas of the given image dimensions
    /// and state [`TrackingState::SystemNotReady`].
    pub fn new(width: i32, height: i32) -> opencv::Result<Self> {
        let image = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0))?;
        Ok(Self {
            latest: Mutex::new(Arc::new(FrameSnapshot {
                state: TrackingState::SystemNotReady,
                image,
                keypoints: Vector::new(),
                init_keypoints: Vector::new(),
                init_matches: Vec::new(),
                in_map: Vec::new(),
            })),
        })
    }

    /// Publish a new snapshot, replacing the previous one wholesale.
    ///
    /// The source image bytes are copied; `annotations` should match `state`
    /// (extra fields for states that do not use them are simply left empty).
    /// Mismatched parallel-sequence lengths are a caller contract violation
    /// and are not checked here.
    pub fn update(
        &self,
        image: &Mat,
        keypoints: Vector<KeyPoint>,
        state: TrackingState,
        annotations: FrameAnnotations,
    ) -> opencv::Result<()> {
        let mut snapshot = FrameSnapshot {
            state,
            image: image.try_clone()?,
            keypoints,
            init_keypoints: Vector::new(),
            init_matches: Vec::new(),
            in_map: Vec::new(),
        };

        match annotations {
            FrameAnnotations::None => {}
            FrameAnnotations::Init {
                reference_keypoints,
                matches,
            } => {
                snapshot.init_keypoints = reference_keypoints;
                snapshot.init_matches = matches;
            }
            FrameAnnotations::Tracked {
                map_points,
                outliers,
            } => {
                snapshot.in_map = derive_map_membership(&map_points, &outliers);
            }
        }

        *self.latest.lock() = Arc::new(snapshot);
        Ok(())
    }

    /// Get the latest snapshot.
    ///
    /// Side effect: if the stored state is still `SystemNotReady`, it is
    /// promoted to `NoImagesYet` before the handle is cloned, so this and
    /// every later read (absent an intervening update) observe
    /// `NoImagesYet`. No other state is mutated by a read.
    pub fn snapshot(&self) -> Arc<FrameSnapshot> {
        let mut latest = self.latest.lock();
        if latest.state == TrackingState::SystemNotReady {
            debug!("first read before any frame, promoting to NoImagesYet");
            Arc::make_mut(&mut *latest).state = TrackingState::NoImagesYet;
        }
        Arc::clone(&latest)
    }
}
