//! Animated GIF decoding into intensity frames.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, RgbaImage};

use scanpath_common::error::{ScanpathError, ScanpathResult};
use scanpath_frame_model::Frame;

/// Read every frame of the GIF at `path`, in display order.
pub fn read_gif(path: &Path) -> ScanpathResult<Vec<Frame>> {
    if !path.exists() {
        return Err(ScanpathError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let frames = decode_frames(BufReader::new(file)).map_err(|e| e.at(path))?;
    tracing::debug!(path = %path.display(), frames = frames.len(), "decoded gif");
    Ok(frames)
}

/// Decode a GIF from any seekable reader.
///
/// Frames are composited onto the full canvas and reduced to luma.
pub fn decode_gif<R: BufRead + Seek>(reader: R) -> ScanpathResult<Vec<Frame>> {
    decode_frames(reader).map_err(|e| e.at(Path::new("<stream>")))
}

enum DecodeFailure {
    Image(image::ImageError),
    Shape(String),
}

impl DecodeFailure {
    fn at(self, path: &Path) -> ScanpathError {
        match self {
            Self::Image(e) => ScanpathError::decode(path, e.to_string()),
            Self::Shape(message) => ScanpathError::decode(path, message),
        }
    }
}

impl From<image::ImageError> for DecodeFailure {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

fn decode_frames<R: BufRead + Seek>(reader: R) -> Result<Vec<Frame>, DecodeFailure> {
    let decoder = GifDecoder::new(reader)?;
    let frames = decoder.into_frames().collect_frames()?;
    frames
        .into_iter()
        .map(|frame| luma_frame(frame.into_buffer()))
        .collect()
}

fn luma_frame(buffer: RgbaImage) -> Result<Frame, DecodeFailure> {
    let gray = DynamicImage::ImageRgba8(buffer).into_luma8();
    let (width, height) = gray.dimensions();
    Frame::new(height as usize, width as usize, gray.into_raw())
        .map_err(|e| DecodeFailure::Shape(e.to_string()))
}
