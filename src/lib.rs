//! # emblemqr
//!
//! Generates a print-ready QR code pointing at a URL, restyles the three
//! finder patterns as hollow concentric squares, draws a geometrically
//! accurate soccer-ball emblem, composites a logo onto it and overlays the
//! result on the symbol center — while keeping the symbol scannable.
//!
//! The symbol is always encoded at error correction level H (~30%
//! recoverable damage) so the emblem overlay stays within the reader's
//! damage tolerance, and the pipeline reports how much of the data area the
//! overlay obscures.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use emblemqr::{Generator, QrcodeEncoder, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig {
//!     url: "https://example.org".to_string(),
//!     logo_path: "logo.png".into(),
//!     output_path: "qr_print.png".into(),
//!     ..RenderConfig::default()
//! };
//!
//! let encoder = QrcodeEncoder;
//! let report = Generator::new(&config, &encoder).run()?;
//! println!("version {} symbol, {:.1}% covered", report.version, report.coverage_percent);
//! # Ok(())
//! # }
//! ```
//!
//! ## With the round-trip scan check
//!
//! ```rust,no_run
//! use emblemqr::{Generator, QrcodeEncoder, RenderConfig, RqrrDecoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig::default();
//! let encoder = QrcodeEncoder;
//! let decoder = RqrrDecoder;
//! let report = Generator::new(&config, &encoder).decoder(&decoder).run()?;
//! assert_eq!(report.validated, Some(true));
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline stages
//!
//! 1. [`encode`] — minimal-version QR raster via the wrapped `qrcode` crate
//! 2. [`finder`] — concentric-square finder restyling
//! 3. [`emblem`] — procedural pentagon-and-hexagons ball pattern
//! 4. [`logo`] — aspect-preserving logo scale and alpha paste
//! 5. [`compose`] — centered overlay, coverage metric, border, save
//! 6. [`validate`] — optional decode-back diagnostic

pub mod compose;
pub mod config;
pub mod emblem;
pub mod encode;
pub mod error;
pub mod finder;
pub mod logo;
pub mod pipeline;
pub mod validate;

pub use config::{Palette, RenderConfig};
pub use emblem::EmblemGeometry;
pub use encode::{EcLevel, MatrixEncoder, MatrixSpec, QrRaster, QrcodeEncoder};
pub use error::{EmblemError, EmblemResult};
pub use pipeline::{Generator, RunReport};
pub use validate::{RqrrDecoder, SymbolDecoder};
