//! Pixel preparation for encoders that only accept a subset of colour types.

use image::DynamicImage;
use image::imageops::FilterType;

/// Largest edge an ICO entry can store.
pub const ICON_MAX_EDGE: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelPolicy {
    /// Encoder takes every colour type the decoders produce.
    AsDecoded,
    /// Grey with alpha becomes RGBA of the same depth.
    NoGreyAlpha,
    /// No alpha, 8 bits per channel. Greyscale stays greyscale.
    Opaque8,
    /// 8 bits per channel, alpha kept.
    Eight,
    /// RGB8, or RGBA8 when the source has alpha.
    Rgb8OrRgba8,
    /// RGBA8 scaled down to fit [`ICON_MAX_EDGE`].
    Icon,
}

pub fn prepare(image: DynamicImage, policy: PixelPolicy) -> DynamicImage {
    match policy {
        PixelPolicy::AsDecoded => image,
        PixelPolicy::NoGreyAlpha => match image {
            DynamicImage::ImageLumaA8(_) => DynamicImage::ImageRgba8(image.to_rgba8()),
            DynamicImage::ImageLumaA16(_) => DynamicImage::ImageRgba16(image.to_rgba16()),
            other => other,
        },
        PixelPolicy::Opaque8 => match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
            DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLuma16(_) => {
                DynamicImage::ImageLuma8(image.to_luma8())
            }
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        },
        PixelPolicy::Eight => match image {
            DynamicImage::ImageLuma8(_)
            | DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageRgb8(_)
            | DynamicImage::ImageRgba8(_) => image,
            other => rgb_or_rgba(other),
        },
        PixelPolicy::Rgb8OrRgba8 => match image {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
            other => rgb_or_rgba(other),
        },
        PixelPolicy::Icon => {
            let image = if image.width() > ICON_MAX_EDGE || image.height() > ICON_MAX_EDGE {
                log::debug!(
                    "scaling {}x{} image down to fit {ICON_MAX_EDGE}x{ICON_MAX_EDGE}",
                    image.width(),
                    image.height()
                );
                image.resize(ICON_MAX_EDGE, ICON_MAX_EDGE, FilterType::Lanczos3)
            } else {
                image
            };
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
    }
}

fn rgb_or_rgba(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    }
}
