pub mod prepare;

use image::ImageFormat;

use crate::converter::Converter;
use crate::detect::Format;
use crate::error::Result;
use prepare::PixelPolicy;

/// Everything the converter needs to know about one output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub format: Format,
    pub encoder: ImageFormat,
    pub pixels: PixelPolicy,
}

impl Target {
    const fn new(format: Format, encoder: ImageFormat, pixels: PixelPolicy) -> Self {
        Self {
            format,
            encoder,
            pixels,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Looks up a converter by its case-insensitive format name.
pub fn get_converter(name: &str) -> Result<Converter> {
    converter_for(name.parse()?)
}

pub fn converter_for(format: Format) -> Result<Converter> {
    let target = target_for(format)?;
    log::debug!("dispatching {format} to the {:?} encoder", target.encoder);
    Ok(Converter::new(target))
}

fn target_for(format: Format) -> Result<Target> {
    let target = match format {
        #[cfg(feature = "png")]
        Format::Png => Target::new(format, ImageFormat::Png, PixelPolicy::AsDecoded),
        #[cfg(not(feature = "png"))]
        Format::Png => return Err(crate::error::Error::FeatureDisabled("png")),

        #[cfg(feature = "jpeg")]
        Format::Jpeg | Format::Jpg => Target::new(format, ImageFormat::Jpeg, PixelPolicy::Opaque8),
        #[cfg(not(feature = "jpeg"))]
        Format::Jpeg | Format::Jpg => return Err(crate::error::Error::FeatureDisabled("jpeg")),

        #[cfg(feature = "bmp")]
        Format::Bmp => Target::new(format, ImageFormat::Bmp, PixelPolicy::Eight),
        #[cfg(not(feature = "bmp"))]
        Format::Bmp => return Err(crate::error::Error::FeatureDisabled("bmp")),

        #[cfg(feature = "ico")]
        Format::Ico => Target::new(format, ImageFormat::Ico, PixelPolicy::Icon),
        #[cfg(not(feature = "ico"))]
        Format::Ico => return Err(crate::error::Error::FeatureDisabled("ico")),

        #[cfg(feature = "tiff")]
        Format::Tiff => Target::new(format, ImageFormat::Tiff, PixelPolicy::NoGreyAlpha),
        #[cfg(not(feature = "tiff"))]
        Format::Tiff => return Err(crate::error::Error::FeatureDisabled("tiff")),

        #[cfg(feature = "webp")]
        Format::Webp => Target::new(format, ImageFormat::WebP, PixelPolicy::Rgb8OrRgba8),
        #[cfg(not(feature = "webp"))]
        Format::Webp => return Err(crate::error::Error::FeatureDisabled("webp")),
    };
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_every_format_has_a_converter() {
        for format in Format::ALL {
            let converter = get_converter(format.name()).unwrap();
            assert_eq!(converter.format(), format);
        }
    }

    #[rstest]
    #[case::png("png", ImageFormat::Png, "png")]
    #[case::jpeg("JPEG", ImageFormat::Jpeg, "jpeg")]
    #[case::jpg("jpg", ImageFormat::Jpeg, "jpg")]
    #[case::bmp("Bmp", ImageFormat::Bmp, "bmp")]
    #[case::ico("ICO", ImageFormat::Ico, "ico")]
    #[case::tiff("tiff", ImageFormat::Tiff, "tiff")]
    #[case::webp("WebP", ImageFormat::WebP, "webp")]
    fn test_descriptor(
        #[case] name: &str,
        #[case] encoder: ImageFormat,
        #[case] extension: &str,
    ) {
        let target = get_converter(name).unwrap().target();
        assert_eq!(target.encoder, encoder);
        assert_eq!(target.extension(), extension);
    }

    #[rstest]
    #[case::gif("GIF")]
    #[case::svg("svg")]
    #[case::empty("")]
    #[case::typo("PNGG")]
    fn test_unknown_format(#[case] name: &str) {
        let err = get_converter(name).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::UnknownFormat(_)));
    }
}
