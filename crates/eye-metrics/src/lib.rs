//! Eye Contour Metrics
//!
//! Pure geometry over eye landmark contours:
//! - 2D image-space points
//! - Six-point eye contours with fixed anatomical ordering
//! - Eye aspect ratio style openness scoring

pub mod contour;
pub mod point;

pub use contour::{average_openness, ContourError, EyeContour};
pub use point::Point2;
