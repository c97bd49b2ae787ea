//! CLI command implementations

pub mod batch;
pub mod contraharmonic;
pub mod info;
pub mod lowpass;
pub mod notch;
pub mod run;
pub mod spectrum;

use anyhow::{Context, Result};
use specfx_io::{bmp, Bitmap};
use specfx_ops::{EngineOptions, LengthPolicy, Notch, PipelineConfig, SpectralPipeline};
use std::path::Path;
use tracing::{info, trace};

/// Load bitmap from path
pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    bmp::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save bitmap to path
pub fn save_bitmap(path: &Path, bitmap: &Bitmap) -> Result<()> {
    bmp::write(path, bitmap).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Engine settings for the `--power-of-two` flag.
pub fn engine_options(power_of_two: bool) -> EngineOptions {
    EngineOptions {
        length_policy: if power_of_two {
            LengthPolicy::PowerOfTwo
        } else {
            LengthPolicy::Any
        },
        ..EngineOptions::default()
    }
}

/// Runs `config` over one file.
///
/// The output is only written once the whole pipeline has succeeded.
pub fn restore_file(input: &Path, output: &Path, config: PipelineConfig, verbose: u8) -> Result<()> {
    trace!(input = %input.display(), output = %output.display(), "restore_file");

    let bitmap = load_bitmap(input)?;
    let filter = config.filter.name();
    let mut pipeline = SpectralPipeline::new(config)?;

    if verbose > 0 {
        println!(
            "Applying {} to {} ({}x{})",
            filter,
            input.display(),
            bitmap.width(),
            bitmap.height()
        );
    }

    let samples = pipeline
        .run(bitmap.samples())
        .with_context(|| format!("Filtering failed: {}", input.display()))?;
    let filtered = bitmap.with_samples(samples)?;
    save_bitmap(output, &filtered)?;

    info!(input = %input.display(), output = %output.display(), filter, "Restored");
    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Parses a notch offset given as `u,v`.
pub fn parse_notch(s: &str) -> std::result::Result<Notch, String> {
    let (u, v) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `u,v`, got `{s}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid notch offset `{}`: {e}", part.trim()))
    };
    Ok(Notch::new(parse(u)?, parse(v)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use specfx_core::SampleBuffer;
    use specfx_ops::FilterConfig;

    #[test]
    fn test_parse_notch() {
        assert_eq!(parse_notch("0,10").unwrap(), Notch::new(0.0, 10.0));
        assert_eq!(parse_notch(" -4.5 , 3 ").unwrap(), Notch::new(-4.5, 3.0));
        assert!(parse_notch("10").is_err());
        assert!(parse_notch("a,1").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(1078), "1.05 KB");
        assert_eq!(format_size(512), "512 B");
    }

    #[test]
    fn test_engine_options() {
        assert_eq!(engine_options(false).length_policy, LengthPolicy::Any);
        assert_eq!(engine_options(true).length_policy, LengthPolicy::PowerOfTwo);
        assert!(engine_options(true).parallel);
    }

    #[test]
    fn test_failed_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.bmp");
        let samples = SampleBuffer::from_pixels(6, 6, &[90u8; 36]).unwrap();
        save_bitmap(&input, &Bitmap::new_grayscale(samples).unwrap()).unwrap();

        // Stride 8 is fine, but a height of 6 is not a power of two.
        let config = PipelineConfig::new(FilterConfig::ideal_low_pass(4.0).unwrap()).with_engine(engine_options(true));
        assert!(restore_file(&input, &output, config, 0).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_restore_preserves_header() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.bmp");
        let samples = SampleBuffer::from_pixels(8, 4, &[42u8; 32]).unwrap();
        save_bitmap(&input, &Bitmap::new_grayscale(samples).unwrap()).unwrap();

        let config = PipelineConfig::new(FilterConfig::ideal_low_pass(50.0).unwrap());
        restore_file(&input, &output, config, 0).unwrap();
        assert_eq!(std::fs::read(&input).unwrap(), std::fs::read(&output).unwrap());
    }
}
