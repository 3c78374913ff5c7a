//! Compress and decompress command implementations.

use crate::utils::{BarProgress, create_progress_bar, format_size};
use oxihuff_compressor::{CompressReport, Compressor, CompressorConfig};
use std::path::{Path, PathBuf};

/// Options shared by `compress` and `decompress`.
pub struct FileOptions {
    pub output: Option<PathBuf>,
    pub force: bool,
    pub verbose: bool,
    pub progress: bool,
}

impl FileOptions {
    fn compressor(&self) -> Compressor {
        Compressor::new(CompressorConfig::new().with_overwrite(self.force))
    }
}

pub fn cmd_compress(input: &Path, options: &FileOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut compressor = options.compressor();
    let dest = options
        .output
        .clone()
        .unwrap_or_else(|| compressor.compressed_path(input));

    let len = std::fs::metadata(input)?.len();
    let pb = create_progress_bar(len, options.progress);
    pb.set_message("compressing");
    let report = compressor.compress(input, &dest, &mut BarProgress(&pb));
    pb.finish_and_clear();

    print_report("Compressed", &report?, options.verbose);
    Ok(())
}

pub fn cmd_decompress(
    input: &Path,
    options: &FileOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut compressor = options.compressor();
    let dest = options
        .output
        .clone()
        .unwrap_or_else(|| compressor.decompressed_path(input));

    let len = std::fs::metadata(input)?.len();
    let pb = create_progress_bar(len, options.progress);
    pb.set_message("decompressing");
    let report = compressor.decompress_to(input, &dest, &mut BarProgress(&pb));
    pb.finish_and_clear();

    print_report("Decompressed", &report?, options.verbose);
    Ok(())
}

fn print_report(action: &str, report: &CompressReport, verbose: bool) {
    println!(
        "{} {} -> {}",
        action,
        report.source.display(),
        report.dest.display()
    );
    if verbose {
        eprintln!(
            "  {} -> {} ({:.1}% of input)",
            format_size(report.input_bytes),
            format_size(report.output_bytes),
            report.ratio() * 100.0
        );
    }
}
