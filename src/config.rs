use std::path::PathBuf;

use image::Rgba;

use crate::error::{EmblemError, EmblemResult};

// Palette
//------------------------------------------------------------------------------

/// Fixed print colors used across every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Data modules
    pub module: Rgba<u8>,
    /// Finder pattern squares
    pub accent: Rgba<u8>,
    /// Quiet zone, emblem fill and outer border
    pub background: Rgba<u8>,
    /// Emblem seam lines
    pub pattern: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            module: Rgba([0, 0, 102, 255]),
            accent: Rgba([200, 16, 46, 255]),
            background: Rgba([255, 255, 255, 255]),
            pattern: Rgba([160, 160, 160, 255]),
        }
    }
}

// Render config
//------------------------------------------------------------------------------

/// Every tunable of a pipeline run, resolved up front and immutable after.
///
/// The ratio defaults (emblem 0.25 of the symbol, logo 0.7 of the emblem,
/// 25% coverage warning) are empirical print-tested values, not invariants;
/// `validate` only range-checks them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub url: String,
    pub logo_path: PathBuf,
    pub output_path: PathBuf,

    /// Pixels per module
    pub module_size: u32,
    /// Quiet zone width in modules
    pub quiet_zone: u32,
    /// Extra background frame around the finished symbol, in pixels
    pub outer_border: u32,

    /// Emblem diameter as a fraction of the symbol height
    pub ball_relative_size: f32,
    /// Logo extent as a fraction of the emblem diameter
    pub logo_relative_size: f32,
    /// Contrast factor applied to the logo for print visibility
    pub contrast_boost: f32,

    pub pentagon_radius_factor: f32,
    pub hexagon_radius_factor: f32,
    pub hexagon_distance_factor: f32,

    /// Advisory data-area coverage threshold in percent
    pub coverage_warn_percent: f32,

    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            url: "https://www.ayso154cypress.org".to_string(),
            logo_path: PathBuf::from("logo_square.png"),
            output_path: PathBuf::from("emblem_qr_print.png"),
            module_size: 35,
            quiet_zone: 6,
            outer_border: 20,
            ball_relative_size: 0.25,
            logo_relative_size: 0.7,
            contrast_boost: 1.1,
            pentagon_radius_factor: 0.18,
            hexagon_radius_factor: 0.16,
            hexagon_distance_factor: 0.3,
            coverage_warn_percent: 25.0,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> EmblemResult<()> {
        if self.url.is_empty() {
            return Err(EmblemError::InvalidConfig("url must not be empty".to_string()));
        }
        if self.module_size == 0 {
            return Err(EmblemError::InvalidConfig("module size must be positive".to_string()));
        }

        let ratios = [
            ("ball relative size", self.ball_relative_size),
            ("logo relative size", self.logo_relative_size),
            ("pentagon radius factor", self.pentagon_radius_factor),
            ("hexagon radius factor", self.hexagon_radius_factor),
            ("hexagon distance factor", self.hexagon_distance_factor),
        ];
        for (name, ratio) in ratios {
            if !(0.0..=1.0).contains(&ratio) || ratio == 0.0 {
                return Err(EmblemError::InvalidConfig(format!(
                    "{name} must lie in (0, 1], got {ratio}"
                )));
            }
        }

        if self.contrast_boost <= 0.0 {
            return Err(EmblemError::InvalidConfig(format!(
                "contrast boost must be positive, got {}",
                self.contrast_boost
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod config_tests {
    use test_case::test_case;

    use super::RenderConfig;
    use crate::error::EmblemError;

    #[test]
    fn test_defaults_are_valid() {
        RenderConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_module_size_rejected() {
        let config = RenderConfig { module_size: 0, ..RenderConfig::default() };
        assert!(matches!(config.validate(), Err(EmblemError::InvalidConfig(_))));
    }

    #[test_case(0.0; "zero ratio")]
    #[test_case(1.5; "ratio above one")]
    #[test_case(-0.25; "negative ratio")]
    fn test_out_of_range_ball_ratio_rejected(ratio: f32) {
        let config = RenderConfig { ball_relative_size: ratio, ..RenderConfig::default() };
        assert!(matches!(config.validate(), Err(EmblemError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_url_rejected() {
        let config = RenderConfig { url: String::new(), ..RenderConfig::default() };
        assert!(matches!(config.validate(), Err(EmblemError::InvalidConfig(_))));
    }
}
