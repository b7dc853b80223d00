use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Bounding rectangle of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Length of the rectangle's diagonal.
    pub fn diagonal(&self) -> f64 {
        let w = self.width as f64;
        let h = self.height as f64;
        (w * w + h * h).sqrt()
    }

    /// Center point as `(x, y)` in pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// An immutable RGBA8 bitmap.
///
/// Cloning is cheap: the pixel buffer is shared, so the same image can be
/// handed to a filter as both the working image and the source image without
/// copying. [`Image::into_pixels`] hands the buffer over without a copy when
/// it holds the last handle; any other writer has to copy, since the working
/// image usually still shares its buffer with the source.
#[derive(Debug, Clone)]
pub struct Image {
    pixels: Arc<RgbaImage>,
}

impl Image {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Take the pixel buffer, copying it only if another handle still shares it.
    pub fn into_pixels(self) -> RgbaImage {
        Arc::try_unwrap(self.pixels).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Returns `true` if both handles point at the same pixel buffer.
    pub fn shares_buffer(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    // -- File I/O ---------------------------------------------------------------

    /// Decode an image file. The format is guessed from the file contents.
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        let decoded = image::open(path).map_err(|source| ImageError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let image = Self::from_dynamic(decoded);
        if image.extent().width == 0 || image.extent().height == 0 {
            return Err(ImageError::EmptyImage);
        }
        debug!(
            path = %path.display(),
            width = image.extent().width,
            height = image.extent().height,
            "decoded image"
        );
        Ok(image)
    }

    /// Encode to `path`, choosing the format from the file extension.
    ///
    /// JPEG output drops the alpha channel and uses `jpeg_quality` (1..=100).
    /// Every other format is written by the `image` crate's defaults.
    pub fn save(&self, path: &Path, jpeg_quality: u8) -> Result<(), ImageError> {
        let save_err = |source| ImageError::Save {
            path: path.display().to_string(),
            source,
        };

        match ImageFormat::from_path(path) {
            Ok(ImageFormat::Jpeg) => {
                let file = File::create(path).map_err(|e| save_err(image::ImageError::IoError(e)))?;
                let rgb = DynamicImage::ImageRgba8((*self.pixels).clone()).into_rgb8();
                let mut encoder =
                    JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality.clamp(1, 100));
                encoder.encode_image(&rgb).map_err(save_err)?;
            }
            _ => {
                self.pixels.save(path).map_err(save_err)?;
            }
        }

        debug!(path = %path.display(), jpeg_quality, "encoded image");
        Ok(())
    }

    /// Downscale so the longest side is at most `max_dimension`, keeping the
    /// aspect ratio. Returns a clone of `self` when no scaling is needed or
    /// `max_dimension` is zero.
    pub fn downscaled(&self, max_dimension: u32) -> Image {
        let Extent { width, height } = self.extent();
        let longest = width.max(height);
        if max_dimension == 0 || longest <= max_dimension {
            return self.clone();
        }

        let scale = max_dimension as f64 / longest as f64;
        let new_width = ((width as f64 * scale).round() as u32).max(1);
        let new_height = ((height as f64 * scale).round() as u32).max(1);
        debug!(width, height, new_width, new_height, "downscaling image");
        Image::new(image::imageops::resize(
            self.pixels.as_ref(),
            new_width,
            new_height,
            FilterType::Triangle,
        ))
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.shares_buffer(other)
            || (self.extent() == other.extent() && self.pixels.as_raw() == other.pixels.as_raw())
    }
}

impl Eq for Image {}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to open image {path}: {source}")]
    Open {
        path: String,
        source: image::ImageError,
    },
    #[error("failed to save image {path}: {source}")]
    Save {
        path: String,
        source: image::ImageError,
    },
    #[error("image has no pixels")]
    EmptyImage,
}
