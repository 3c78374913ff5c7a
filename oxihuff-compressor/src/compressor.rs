//! File-oriented compression and decompression.

use crate::codec::AnyCodec;
use crate::config::CompressorConfig;
use filetime::FileTime;
use oxihuff_core::error::{OxiHuffError, Result};
use oxihuff_core::{Codec, Progress};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of one file operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressReport {
    /// File that was read.
    pub source: PathBuf,
    /// File that was written.
    pub dest: PathBuf,
    /// Size of the source in bytes.
    pub input_bytes: u64,
    /// Size of the destination in bytes.
    pub output_bytes: u64,
}

impl CompressReport {
    /// Output size divided by input size (1.0 for an empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            1.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Space saved, in percent of the input (negative when output grew).
    pub fn savings_percent(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }
}

/// Compresses and decompresses whole files with one codec.
#[derive(Debug)]
pub struct Compressor {
    codec: AnyCodec,
    config: CompressorConfig,
}

impl Compressor {
    /// Create a compressor for `config`.
    pub fn new(config: CompressorConfig) -> Self {
        Self {
            codec: config.codec.codec(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// `source` with the compressed suffix appended.
    pub fn compressed_path(&self, source: &Path) -> PathBuf {
        append_to_name(source, self.config.suffix)
    }

    /// `source` without the compressed suffix, or with
    /// [`CompressorConfig::FALLBACK_SUFFIX`] appended when it does not carry
    /// the suffix.
    pub fn decompressed_path(&self, source: &Path) -> PathBuf {
        let stripped = source
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(self.config.suffix))
            .filter(|stem| !stem.is_empty());

        match stripped {
            Some(stem) => source.with_file_name(stem),
            None => append_to_name(source, CompressorConfig::FALLBACK_SUFFIX),
        }
    }

    /// Compress `source` into `dest`.
    pub fn compress(
        &mut self,
        source: &Path,
        dest: &Path,
        progress: &mut dyn Progress,
    ) -> Result<CompressReport> {
        let input = File::open(source)?;
        let output = self.create_output(source, dest)?;
        let reader = BufReader::with_capacity(self.config.buffer_size, input);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, output);

        let result = self
            .codec
            .encode(reader, &mut writer, progress)
            .and_then(|()| writer.flush().map_err(OxiHuffError::from));
        drop(writer);

        self.finish(result, source, dest)
    }

    /// Decompress `source` next to itself, see [`decompressed_path`](Self::decompressed_path).
    pub fn decompress(
        &mut self,
        source: &Path,
        progress: &mut dyn Progress,
    ) -> Result<CompressReport> {
        let dest = self.decompressed_path(source);
        self.decompress_to(source, &dest, progress)
    }

    /// Decompress `source` into `dest`.
    ///
    /// A partially written `dest` is removed when decoding fails.
    pub fn decompress_to(
        &mut self,
        source: &Path,
        dest: &Path,
        progress: &mut dyn Progress,
    ) -> Result<CompressReport> {
        let input = File::open(source)?;
        let output = self.create_output(source, dest)?;
        let reader = BufReader::with_capacity(self.config.buffer_size, input);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, output);

        let result = self
            .codec
            .decode(reader, &mut writer, progress)
            .and_then(|()| writer.flush().map_err(OxiHuffError::from));
        drop(writer);

        self.finish(result, source, dest)
    }

    fn create_output(&self, source: &Path, dest: &Path) -> Result<File> {
        if dest.exists() {
            if !self.config.overwrite {
                return Err(OxiHuffError::output_exists(dest.display().to_string()));
            }
            if fs::canonicalize(source)? == fs::canonicalize(dest)? {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} is both source and destination", source.display()),
                )
                .into());
            }
        }
        Ok(File::create(dest)?)
    }

    fn finish(&self, result: Result<()>, source: &Path, dest: &Path) -> Result<CompressReport> {
        if let Err(e) = result {
            log::debug!("{} failed, removing {}: {e}", self.codec.name(), dest.display());
            if let Err(remove) = fs::remove_file(dest) {
                log::warn!("could not remove {}: {remove}", dest.display());
            }
            return Err(e);
        }

        let source_meta = fs::metadata(source)?;
        if self.config.preserve_mtime {
            let mtime = FileTime::from_last_modification_time(&source_meta);
            filetime::set_file_mtime(dest, mtime)?;
        }

        let report = CompressReport {
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            input_bytes: source_meta.len(),
            output_bytes: fs::metadata(dest)?.len(),
        };
        log::debug!(
            "{} -> {}: {} -> {} bytes",
            report.source.display(),
            report.dest.display(),
            report.input_bytes,
            report.output_bytes
        );
        Ok(report)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CompressorConfig::default())
    }
}

fn append_to_name(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
