//! Animated GIF encoding of frames and correlation videos.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::error::{ParameterError, ParameterErrorKind};
use image::{Delay, DynamicImage, GrayImage, ImageError};

use scanpath_common::config::MediaDefaults;
use scanpath_common::error::{ScanpathError, ScanpathResult};
use scanpath_frame_model::{CorrelationSequence, Grid};
use scanpath_processing_core::SequenceSink;

/// GIF output parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Display time of each frame.
    pub frame_delay_ms: u32,

    /// Palette quantizer speed, 1 (best) to 30 (fastest).
    pub quantizer_speed: i32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            frame_delay_ms: 100,
            quantizer_speed: 10,
        }
    }
}

impl From<&MediaDefaults> for EncodeOptions {
    fn from(defaults: &MediaDefaults) -> Self {
        Self {
            frame_delay_ms: defaults.frame_delay_ms,
            quantizer_speed: defaults.quantizer_speed,
        }
    }
}

/// Encode grayscale frames as a looping GIF into `writer`.
pub fn encode_gif<W, G>(writer: W, frames: &[G], options: &EncodeOptions) -> Result<(), ImageError>
where
    W: Write,
    G: AsRef<Grid<u8>>,
{
    let mut encoder = GifEncoder::new_with_speed(writer, options.quantizer_speed.clamp(1, 30));
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(options.frame_delay_ms, 1);
    for grid in frames {
        encoder.encode_frame(animation_frame(grid.as_ref(), delay)?)?;
    }
    Ok(())
}

/// Write frames to a GIF file, creating parent directories as needed.
pub fn write_gif<G: AsRef<Grid<u8>>>(
    path: &Path,
    frames: &[G],
    options: &EncodeOptions,
) -> ScanpathResult<()> {
    if frames.is_empty() {
        return Err(ScanpathError::encode(path, "no frames to write"));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    encode_gif(&mut writer, frames, options)
        .map_err(|e| ScanpathError::encode(path, e.to_string()))?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), frames = frames.len(), "wrote gif");
    Ok(())
}

fn animation_frame(grid: &Grid<u8>, delay: Delay) -> Result<image::Frame, ImageError> {
    let gray = GrayImage::from_raw(grid.cols() as u32, grid.rows() as u32, grid.as_slice().to_vec())
        .ok_or_else(|| {
            ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            ))
        })?;
    let rgba = DynamicImage::ImageLuma8(gray).into_rgba8();
    Ok(image::Frame::from_parts(rgba, 0, 0, delay))
}

/// A `SequenceSink` that writes the correlation video to a GIF file.
#[derive(Debug, Clone)]
pub struct GifSink {
    path: PathBuf,
    options: EncodeOptions,
}

impl GifSink {
    pub fn new(path: impl Into<PathBuf>, options: EncodeOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SequenceSink for GifSink {
    fn write_sequence(&mut self, sequence: &CorrelationSequence) -> ScanpathResult<()> {
        write_gif(&self.path, sequence.as_slice(), &self.options)
    }
}
