//! Raster info command.
//!
//! Prints the fields the filters care about: dimensions, row stride, sample
//! depth, color table size and the mean sample value.

use crate::InfoArgs;
use anyhow::{Context, Result};
use specfx_io::Bitmap;
use std::fs;
use std::path::Path;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)
            .with_context(|| format!("Failed to stat: {}", path.display()))?
            .len();
        let bitmap = super::load_bitmap(path)?;

        print_text(path, &bitmap, file_size, verbose);

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}

fn print_text(path: &Path, bitmap: &Bitmap, file_size: u64, verbose: u8) {
    let header = bitmap.header();
    println!("{}", path.display());
    println!("  Resolution: {}x{}", bitmap.width(), bitmap.height());
    println!("  Row stride: {}", bitmap.stride());
    println!("  Bit depth:  {}", header.bit_count());
    println!("  Palette:    {} entries", header.palette_len());
    println!("  Mean value: {:.3}", bitmap.samples().mean());
    println!("  File size:  {}", super::format_size(file_size));

    if verbose > 0 {
        println!("  Data offset: {}", header.data_offset());
        println!("  Row order:   {}", if header.is_top_down() { "top-down" } else { "bottom-up" });
        println!("  Gray ramp:   {}", header.is_identity_grayscale());
    }
}
