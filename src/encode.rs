use image::RgbaImage;
use qrcode::types::QrError;
use qrcode::QrCode;

use crate::config::Palette;
use crate::error::{EmblemError, EmblemResult};

// Matrix spec
//------------------------------------------------------------------------------

/// Error correction level of the encoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EcLevel {
    L,
    M,
    Q,
    /// ~30% recoverable damage. The default, so the emblem overlay stays
    /// within the symbol's damage tolerance.
    #[default]
    H,
}

impl EcLevel {
    fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            Self::L => qrcode::EcLevel::L,
            Self::M => qrcode::EcLevel::M,
            Self::Q => qrcode::EcLevel::Q,
            Self::H => qrcode::EcLevel::H,
        }
    }
}

/// Immutable description of the symbol to encode. The version is never
/// forced; the encoder resolves the minimal one that fits `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixSpec {
    pub data: String,
    pub ec_level: EcLevel,
    /// Pixels per module
    pub module_size: u32,
    /// Quiet zone width in modules
    pub quiet_zone: u32,
}

impl MatrixSpec {
    pub fn new(data: impl Into<String>, module_size: u32, quiet_zone: u32) -> Self {
        Self { data: data.into(), ec_level: EcLevel::default(), module_size, quiet_zone }
    }
}

// QR raster
//------------------------------------------------------------------------------

/// The encoded symbol rendered to pixels, plus the module bookkeeping the
/// later stages need for offsets and coverage.
#[derive(Debug, Clone)]
pub struct QrRaster {
    version: u32,
    module_count: u32,
    module_size: u32,
    quiet_zone: u32,
    pub image: RgbaImage,
}

impl QrRaster {
    fn new(version: u32, module_size: u32, quiet_zone: u32, image: RgbaImage) -> Self {
        let module_count = 4 * version + 17;
        debug_assert!(
            image.width() == (module_count + 2 * quiet_zone) * module_size,
            "Raster width {} inconsistent with {module_count} modules of {module_size}px and a \
             {quiet_zone} module quiet zone",
            image.width()
        );
        debug_assert!(image.width() == image.height(), "Symbol raster must be square");

        Self { version, module_count, module_size, quiet_zone, image }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn module_count(&self) -> u32 {
        self.module_count
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    /// Side length of the raster in pixels, quiet zone included.
    pub fn pixel_width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel offset of the symbol's top-left module.
    pub fn symbol_origin(&self) -> u32 {
        self.quiet_zone * self.module_size
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Narrow capability interface over the concrete QR library, so the pipeline
/// never touches it directly.
pub trait MatrixEncoder {
    fn encode(&self, spec: &MatrixSpec, palette: &Palette) -> EmblemResult<QrRaster>;
}

/// `MatrixEncoder` backed by the `qrcode` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeEncoder;

impl MatrixEncoder for QrcodeEncoder {
    fn encode(&self, spec: &MatrixSpec, palette: &Palette) -> EmblemResult<QrRaster> {
        let code = QrCode::with_error_correction_level(&spec.data, spec.ec_level.to_qrcode())
            .map_err(|e| match e {
                QrError::DataTooLong => EmblemError::EncodingError(format!(
                    "data of {} bytes exceeds symbol capacity at level {:?}",
                    spec.data.len(),
                    spec.ec_level
                )),
                other => EmblemError::EncodingError(other.to_string()),
            })?;

        let version = match code.version() {
            qrcode::Version::Normal(v) => v as u32,
            // Never produced without an explicitly requested micro version
            qrcode::Version::Micro(_) => {
                return Err(EmblemError::EncodingError("unexpected micro symbol".to_string()))
            }
        };

        let module_count = code.width() as u32;
        let modules = code.to_colors();

        let qz_sz = spec.quiet_zone * spec.module_size;
        let qr_sz = module_count * spec.module_size;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = RgbaImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, palette.background);
                    continue;
                }
                let r = (i - qz_sz) / spec.module_size;
                let c = (j - qz_sz) / spec.module_size;

                let pixel = match modules[(r * module_count + c) as usize] {
                    qrcode::Color::Dark => palette.module,
                    qrcode::Color::Light => palette.background,
                };

                canvas.put_pixel(j, i, pixel);
            }
        }

        Ok(QrRaster::new(version, spec.module_size, spec.quiet_zone, canvas))
    }
}
