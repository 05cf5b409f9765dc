//! Background image ingestion.
//!
//! Raster formats are decoded with the `image` crate. PDF rendering is left
//! to the host through [`PdfRasterizer`]; only the first page is used.

use image::{DynamicImage, GenericImageView, ImageFormat};
use plantrace_core::IngestError;
use std::path::Path;
use std::sync::Arc;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Renders PDF pages to raster images.
pub trait PdfRasterizer {
    /// Renders page 1 at `scale` times its natural size.
    fn rasterize_first_page(&self, bytes: &[u8], scale: f32) -> Result<DynamicImage, IngestError>;
}

/// Detected kind of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Raster(ImageFormat),
}

/// Classifies bytes by content, not by file extension.
pub fn detect_source(bytes: &[u8]) -> Result<SourceKind, IngestError> {
    if bytes.starts_with(PDF_MAGIC) {
        return Ok(SourceKind::Pdf);
    }
    image::guess_format(bytes)
        .map(SourceKind::Raster)
        .map_err(|e| IngestError::UnsupportedFormat {
            detail: e.to_string(),
        })
}

/// A decoded background ready to trace over.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    pub image: Arc<DynamicImage>,
}

impl BackgroundImage {
    pub fn from_image(image: DynamicImage) -> Result<Self, IngestError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(IngestError::EmptyImage { width, height });
        }
        Ok(Self {
            width,
            height,
            image: Arc::new(image),
        })
    }

    /// Size as model-space extents.
    pub fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}

/// Decodes an in-memory file into a background image.
pub fn decode_background(
    bytes: &[u8],
    rasterizer: Option<&dyn PdfRasterizer>,
    pdf_scale: f32,
) -> Result<BackgroundImage, IngestError> {
    let image = match detect_source(bytes)? {
        SourceKind::Pdf => {
            let rasterizer = rasterizer.ok_or(IngestError::PdfRasterizerUnavailable)?;
            tracing::debug!("Rasterizing PDF page 1 at {}x", pdf_scale);
            rasterizer
                .rasterize_first_page(bytes, pdf_scale)
                .map_err(|e| match e {
                    IngestError::CorruptPdf { .. } => e,
                    other => IngestError::CorruptPdf {
                        reason: other.to_string(),
                    },
                })?
        }
        SourceKind::Raster(format) => {
            tracing::debug!("Decoding {:?} image ({} bytes)", format, bytes.len());
            image::load_from_memory_with_format(bytes, format).map_err(|e| {
                IngestError::Decode {
                    reason: e.to_string(),
                }
            })?
        }
    };

    let background = BackgroundImage::from_image(image)?;
    tracing::info!(
        "Loaded background {}x{}",
        background.width,
        background.height
    );
    Ok(background)
}

/// Reads and decodes a file from disk.
pub fn load_background(
    path: &Path,
    rasterizer: Option<&dyn PdfRasterizer>,
    pdf_scale: f32,
) -> Result<BackgroundImage, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    decode_background(&bytes, rasterizer, pdf_scale)
}
