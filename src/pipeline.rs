use std::path::PathBuf;

use log::{error, info, warn};

use crate::compose;
use crate::config::RenderConfig;
use crate::emblem::{self, EmblemGeometry};
use crate::encode::{MatrixEncoder, MatrixSpec};
use crate::error::EmblemResult;
use crate::finder;
use crate::logo;
use crate::validate::{self, SymbolDecoder};

// Pipeline
//------------------------------------------------------------------------------

/// Diagnostics of one completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub version: u32,
    pub module_count: u32,
    pub coverage_percent: f32,
    pub output_path: PathBuf,
    /// `None` when no decoder was injected
    pub validated: Option<bool>,
}

/// Runs the whole compositing pipeline: encode, restyle finders, draw the
/// emblem, composite the logo, overlay, frame and save. Stages execute
/// sequentially and fail fast; only the optional scan check is advisory.
pub struct Generator<'a> {
    config: &'a RenderConfig,
    encoder: &'a dyn MatrixEncoder,
    decoder: Option<&'a dyn SymbolDecoder>,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a RenderConfig, encoder: &'a dyn MatrixEncoder) -> Self {
        Self { config, encoder, decoder: None }
    }

    /// Injects the post-hoc scan check. Without it the diagnostic is skipped.
    pub fn decoder(&mut self, decoder: &'a dyn SymbolDecoder) -> &mut Self {
        self.decoder = Some(decoder);
        self
    }

    pub fn run(&self) -> EmblemResult<RunReport> {
        let config = self.config;
        let palette = &config.palette;
        config.validate()?;

        info!("Loading logo {}...", config.logo_path.display());
        let logo = logo::load(&config.logo_path)?;

        info!("Encoding {:?} at level {:?}...", config.url, crate::encode::EcLevel::default());
        let spec = MatrixSpec::new(config.url.clone(), config.module_size, config.quiet_zone);
        let mut qr = self.encoder.encode(&spec, palette)?;
        info!("Encoded version {} symbol, {} modules a side", qr.version(), qr.module_count());

        info!("Repainting finder patterns...");
        finder::paint_finder_patterns(&mut qr, palette);

        info!("Drawing emblem...");
        let geometry = EmblemGeometry::from_config(config, qr.pixel_width());
        let ball = emblem::render(&geometry, palette);
        let ball = logo::composite(ball, &logo, config.logo_relative_size, config.contrast_boost);

        let coverage = compose::coverage_percent(&qr, geometry.diameter);
        info!("Emblem obscures {coverage:.1}% of the data area");
        if coverage > config.coverage_warn_percent {
            warn!(
                "Coverage exceeds {}%; the symbol may scan poorly, consider a smaller emblem",
                config.coverage_warn_percent
            );
        }
        compose::overlay_emblem(&mut qr, &ball);

        let framed = compose::add_outer_border(&qr.image, config.outer_border, palette.background);
        compose::save(&framed, &config.output_path)?;
        info!("Saved {}", config.output_path.display());

        let validated = self.decoder.map(|decoder| self.scan_check(decoder));

        Ok(RunReport {
            version: qr.version(),
            module_count: qr.module_count(),
            coverage_percent: coverage,
            output_path: config.output_path.clone(),
            validated,
        })
    }

    /// Re-reads the saved file and checks it decodes back to the URL.
    fn scan_check(&self, decoder: &dyn SymbolDecoder) -> bool {
        let saved = match image::open(&self.config.output_path) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                error!("Scan check could not reopen {}: {e}", self.config.output_path.display());
                return false;
            }
        };
        match validate::verify(decoder, &saved, &self.config.url) {
            Ok(()) => {
                info!("Scan check passed: symbol decodes to {:?}", self.config.url);
                true
            }
            Err(e) => {
                error!("{e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod pipeline_tests {
    use image::{Rgba, RgbaImage};

    use super::Generator;
    use crate::config::RenderConfig;
    use crate::encode::QrcodeEncoder;
    use crate::error::EmblemError;

    fn test_config(dir: &std::path::Path) -> RenderConfig {
        let logo_path = dir.join("logo.png");
        RgbaImage::from_pixel(64, 64, Rgba([200, 16, 46, 255])).save(&logo_path).unwrap();
        RenderConfig {
            url: "https://example.org".to_string(),
            logo_path,
            output_path: dir.join("out.png"),
            // Keep the raster small for test speed
            module_size: 8,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_run_reports_symbol_facts() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let encoder = QrcodeEncoder;

        let report = Generator::new(&config, &encoder).run().unwrap();
        assert_eq!(report.version, 3);
        assert_eq!(report.module_count, 29);
        assert!(report.coverage_percent > 0.0 && report.coverage_percent < 25.0);
        assert_eq!(report.validated, None);
        assert!(config.output_path.is_file());
    }

    #[test]
    fn test_degenerate_emblem_config_still_completes() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            module_size: 1,
            quiet_zone: 0,
            ball_relative_size: 0.01,
            ..test_config(dir.path())
        };
        let encoder = QrcodeEncoder;

        // Emblem diameter rounds down to nothing; the run must finish
        // with a saved symbol rather than abort mid-composite
        let report = Generator::new(&config, &encoder).run().unwrap();
        assert!(config.output_path.is_file());
        assert!(report.coverage_percent < 1.0);
    }

    #[test]
    fn test_missing_logo_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.logo_path = dir.path().join("absent.png");
        let encoder = QrcodeEncoder;

        let err = Generator::new(&config, &encoder).run().unwrap_err();
        assert_eq!(err, EmblemError::ResourceNotFound(config.logo_path.clone()));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.module_size = 0;
        let encoder = QrcodeEncoder;

        let err = Generator::new(&config, &encoder).run().unwrap_err();
        assert!(matches!(err, EmblemError::InvalidConfig(_)));
        assert!(!config.output_path.exists());
    }
}
