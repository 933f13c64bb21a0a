//! Region selection and in-place blurring of the current image.

pub mod blur;
pub mod selection;

pub use blur::{blur_region, BlurError, BlurResult, BLUR_SIGMA};
pub use selection::{clamp_point, committed_selection, normalize_selection, DragSelection};
