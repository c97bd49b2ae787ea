//! Batch processing command
//!
//! Runs one pipeline per matching file on the rayon pool. Files share no
//! state; a failure is reported and the remaining files still run.

use crate::BatchArgs;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use specfx_ops::PipelineConfig;
use std::path::{Path, PathBuf};
use tracing::{info, trace};

pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    trace!(pattern = %args.input, config = %args.config.display(), "batch::run");

    // Find matching files
    let files: Vec<PathBuf> = glob::glob(&args.input)
        .with_context(|| format!("Invalid pattern: {}", args.input))?
        .filter_map(|r| r.ok())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    let config = PipelineConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;

    info!(files = files.len(), pattern = %args.input, filter = config.filter.name(), "Starting batch processing");

    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create: {}", args.output_dir.display()))?;

    // Process files in parallel
    let results: Vec<Result<()>> = files
        .par_iter()
        .map(|input| process_file(input, &args.output_dir, &config, verbose))
        .collect();

    // Report results
    let mut success = 0;
    let mut failed = 0;
    for r in results {
        match r {
            Ok(_) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {:#}", e);
            }
        }
    }

    info!(success = success, failed = failed, "Batch processing complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} files failed", failed);
    }

    Ok(())
}

fn process_file(input: &Path, output_dir: &Path, config: &PipelineConfig, verbose: u8) -> Result<()> {
    let name = input
        .file_name()
        .with_context(|| format!("Not a file: {}", input.display()))?;
    let output = output_dir.join(name);

    if verbose > 0 {
        println!("Processing {} -> {}", input.display(), output.display());
    }

    super::restore_file(input, &output, config.clone(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use specfx_core::SampleBuffer;
    use specfx_io::Bitmap;
    use specfx_ops::FilterConfig;

    fn write_sample(path: &Path, width: usize, height: usize) {
        let pixels: Vec<u8> = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        let samples = SampleBuffer::from_pixels(width, height, &pixels).unwrap();
        super::super::save_bitmap(path, &Bitmap::new_grayscale(samples).unwrap()).unwrap();
    }

    #[test]
    fn test_batch_processes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(&dir.path().join("a.bmp"), 8, 8);
        write_sample(&dir.path().join("b.bmp"), 12, 6);

        let config = PipelineConfig::new(FilterConfig::ideal_low_pass(1000.0).unwrap());
        let config_path = dir.path().join("lp.yaml");
        std::fs::write(&config_path, config.to_yaml_string().unwrap()).unwrap();

        let out_dir = dir.path().join("out");
        let args = BatchArgs {
            input: dir.path().join("*.bmp").display().to_string(),
            output_dir: out_dir.clone(),
            config: config_path,
        };
        run(args, 0).unwrap();

        for name in ["a.bmp", "b.bmp"] {
            let original = std::fs::read(dir.path().join(name)).unwrap();
            assert_eq!(std::fs::read(out_dir.join(name)).unwrap(), original, "{name}");
        }
    }

    #[test]
    fn test_batch_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(&dir.path().join("good.bmp"), 8, 8);
        std::fs::write(dir.path().join("bad.bmp"), b"not a bitmap").unwrap();

        let config_path = dir.path().join("lp.yaml");
        std::fs::write(&config_path, "filter:\n  type: ideal_low_pass\n  cutoff: 5\n").unwrap();

        let out_dir = dir.path().join("out");
        let args = BatchArgs {
            input: dir.path().join("*.bmp").display().to_string(),
            output_dir: out_dir.clone(),
            config: config_path,
        };
        assert!(run(args, 0).is_err());
        assert!(out_dir.join("good.bmp").exists());
        assert!(!out_dir.join("bad.bmp").exists());
    }

    #[test]
    fn test_batch_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let args = BatchArgs {
            input: dir.path().join("*.bmp").display().to_string(),
            output_dir: dir.path().join("out"),
            config: dir.path().join("missing.yaml"),
        };
        assert!(run(args, 0).is_err());
    }
}
