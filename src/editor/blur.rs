use image::{imageops, RgbImage};
use thiserror::Error;

use crate::geometry::{ImageBounds, SelectionRect};

/// Gaussian standard deviation used for every region, whatever its size.
pub const BLUR_SIGMA: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlurError {
    #[error("blur region {region:?} is empty or outside a {bounds:?} image")]
    InvalidRegion {
        region: SelectionRect,
        bounds: ImageBounds,
    },
}

pub type BlurResult<T> = std::result::Result<T, BlurError>;

/// Blurs `region` of `image` in place. Pixels outside `region` are untouched.
pub fn blur_region(image: &mut RgbImage, region: SelectionRect) -> BlurResult<()> {
    let bounds = ImageBounds::of(image);
    if region.is_degenerate() || !bounds.contains(region) {
        return Err(BlurError::InvalidRegion { region, bounds });
    }

    let patch = imageops::crop_imm(&*image, region.x, region.y, region.width, region.height)
        .to_image();
    let blurred = imageops::blur(&patch, BLUR_SIGMA);
    imageops::replace(image, &blurred, i64::from(region.x), i64::from(region.y));
    tracing::debug!(?region, sigma = BLUR_SIGMA, "blurred region");
    Ok(())
}
