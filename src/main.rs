use std::path::PathBuf;

use clap::Parser;
use emblemqr::{Generator, QrcodeEncoder, RenderConfig, RqrrDecoder};

#[derive(Parser)]
#[command(name = "emblemqr", version, about = "Soccer-ball emblem QR code generator")]
struct Cli {
    /// URL the symbol should point to
    #[arg(long)]
    url: Option<String>,

    /// Logo image composited onto the emblem
    #[arg(long, alias = "logo_path")]
    logo_path: Option<PathBuf>,

    /// Where to write the finished raster
    #[arg(long, alias = "output_path")]
    output_path: Option<PathBuf>,

    /// Re-read the saved file and check it decodes back to the URL
    #[arg(long)]
    validate: bool,
}

impl Cli {
    fn into_config(self) -> (RenderConfig, bool) {
        let mut config = RenderConfig::default();
        if let Some(url) = self.url {
            config.url = url;
        }
        if let Some(logo_path) = self.logo_path {
            config.logo_path = logo_path;
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }
        (config, self.validate)
    }
}


fn main() {
    env_logger::Builder::from_default_env().filter_level(log::LevelFilter::Info).init();

    let (config, validate) = Cli::parse().into_config();

    log::info!("Starting emblem QR generator...");
    if !config.logo_path.exists() {
        log::error!(
            "Logo file {} not found; point --logo-path at a raster image",
            config.logo_path.display()
        );
        return;
    }
    if let Some(parent) = config.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Could not create output directory {}: {e}", parent.display());
                return;
            }
        }
    }

    let encoder = QrcodeEncoder;
    let decoder = RqrrDecoder;
    let mut generator = Generator::new(&config, &encoder);
    if validate {
        generator.decoder(&decoder);
    }

    match generator.run() {
        Ok(report) => {
            log::info!(
                "Generation complete: version {} symbol saved to {}",
                report.version,
                report.output_path.display()
            );
            if report.validated == Some(false) {
                log::error!("Scan check failed; the symbol may be too obscured");
            }
        }
        Err(e) => log::error!("Generation failed: {e}"),
    }
}
