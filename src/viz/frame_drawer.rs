//! Overlay drawing and status band composition.
//!
//! The drawer runs on the display side: each call to
//! [`FrameDrawer::draw_frame`] captures the latest published snapshot,
//! decorates a private copy of the image and returns it. Drawing never holds
//! the frame-state lock.
//!
//! Overlays per state:
//! - `NotInitialized`: green lines between reference keypoints and their
//!   matched current keypoints
//! - `Ok`: green circles on keypoints associated with the map
//! - `SystemNotReady` / `NoImagesYet` / `Lost`: status text only

use std::sync::Arc;

use opencv::core::{Mat, Point, Point2f, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;
use tracing::trace;

use crate::map::MapStats;
use crate::tracking::TrackingState;
use crate::viz::frame_state::FrameState;

/// Radius of the circle drawn on each tracked keypoint.
const MARKER_RADIUS: i32 = 3;

/// Stroke width for both match lines and keypoint circles.
const OVERLAY_THICKNESS: i32 = 2;

/// Vertical padding of the status band around the text height.
const BAND_PADDING: i32 = 10;

/// Renders tracking diagnostics onto camera frames.
///
/// Holds the shared [`FrameState`] written by the tracker and the map
/// statistics collaborator queried for the status band.
pub struct FrameDrawer<M: MapStats> {
    frame_state: Arc<FrameState>,
    map_stats: Arc<M>,
    /// Keypoints counted as tracked during the last `Ok` draw.
    tracked_count: usize,
}

impl<M: MapStats> FrameDrawer<M> {
    pub fn new(frame_state: Arc<FrameState>, map_stats: Arc<M>) -> Self {
        Self {
            frame_state,
            map_stats,
            tracked_count: 0,
        }
    }

    /// Number of map-associated keypoints drawn in the last `Ok` frame.
    pub fn tracked_count(&self) -> usize {
        self.tracked_count
    }

    /// Capture the latest snapshot and compose the decorated output image.
    ///
    /// The output is always 3-channel; a grayscale source is converted, a
    /// colour source is copied as-is.
    pub fn draw_frame(&mut self) -> opencv::Result<Mat> {
        let snap = self.frame_state.snapshot();

        let mut canvas = if snap.image.channels() < 3 {
            let mut bgr = Mat::default();
            imgproc::cvt_color(&snap.image, &mut bgr, imgproc::COLOR_GRAY2BGR, 0)?;
            bgr
        } else {
            snap.image.try_clone()?
        };

        let green = Scalar::new(0.0, 255.0, 0.0, 0.0);

        match snap.state {
            TrackingState::NotInitialized => {
                for (i, &m) in snap.init_matches.iter().enumerate() {
                    if m >= 0 {
                        let from = snap.init_keypoints.get(i)?.pt();
                        let to = snap.keypoints.get(m as usize)?.pt();
                        imgproc::line(
                            &mut canvas,
                            to_pixel(from),
                            to_pixel(to),
                            green,
                            OVERLAY_THICKNESS,
                            imgproc::LINE_8,
                            0,
                        )?;
                    }
                }
            }
            TrackingState::Ok => {
                let mut tracked = 0;
                for (i, &in_map) in snap.in_map.iter().enumerate() {
                    if in_map {
                        imgproc::circle(
                            &mut canvas,
                            to_pixel(snap.keypoints.get(i)?.pt()),
                            MARKER_RADIUS,
                            green,
                            OVERLAY_THICKNESS,
                            imgproc::LINE_8,
                            0,
                        )?;
                        tracked += 1;
                    }
                }
                self.tracked_count = tracked;
                trace!(tracked, "drew tracked keypoints");
            }
            TrackingState::SystemNotReady
            | TrackingState::NoImagesYet
            | TrackingState::Lost => {}
        }

        self.draw_text_info(&canvas, snap.state)
    }

    /// One-line status text for the given state.
    ///
    /// Map statistics are read from the collaborator at call time.
    pub fn status_line(&self, state: TrackingState) -> String {
        match state {
            TrackingState::SystemNotReady => "LOADING VOCABULARY. PLEASE WAIT...".to_string(),
            TrackingState::NoImagesYet => "WAITING FOR IMAGES".to_string(),
            TrackingState::NotInitialized => "TRYING TO INITIALIZE".to_string(),
            TrackingState::Ok => format!(
                "KFs: {}, MPs: {}, Matches: {}",
                self.map_stats.keyframes_in_map(),
                self.map_stats.map_points_in_map(),
                self.tracked_count
            ),
            TrackingState::Lost => "TRACK LOST. TRYING TO RELOCALIZE".to_string(),
        }
    }

    /// Paint an opaque band across the bottom of `image` and render the
    /// status line in white inside it. The output keeps the input
    /// dimensions; the band overwrites pixels, it does not append rows.
    pub fn draw_text_info(&self, image: &Mat, state: TrackingState) -> opencv::Result<Mat> {
        let text = self.status_line(state);

        let mut baseline = 0;
        let text_size = imgproc::get_text_size(
            &text,
            imgproc::FONT_HERSHEY_PLAIN,
            1.0,
            1,
            &mut baseline,
        )?;
        let band_height = text_size.height + BAND_PADDING;

        let mut out = image.try_clone()?;
        let (rows, cols) = (out.rows(), out.cols());
        imgproc::rectangle(
            &mut out,
            Rect::new(0, rows - band_height, cols, band_height),
            Scalar::all(0.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;
        imgproc::put_text(
            &mut out,
            &text,
            Point::new(5, rows - 5),
            imgproc::FONT_HERSHEY_PLAIN,
            1.0,
            Scalar::all(255.0),
            1,
            imgproc::LINE_8,
            false,
        )?;
        Ok(out)
    }
}

fn to_pixel(pt: Point2f) -> Point {
    Point::new(pt.x.round() as i32, pt.y.round() as i32)
}
