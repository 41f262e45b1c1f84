//! GIF encode/decode round trips through memory and the filesystem.

use std::io::Cursor;
use std::path::PathBuf;

use scanpath_frame_model::{Frame, FRAME_SIDE};
use scanpath_media::synthetic::{render_sweep, SweepPlan};
use scanpath_media::{decode_gif, encode_gif, read_gif, write_gif, EncodeOptions, GifSink};
use scanpath_processing_core::CorrelationSequenceBuilder;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scanpath_media_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn mean_abs_diff(a: &Frame, b: &Frame) -> f64 {
    let total: u64 = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .map(|(&x, &y)| (x as i64 - y as i64).unsigned_abs())
        .sum();
    total as f64 / a.pixels().len() as f64
}

fn short_sweep() -> Vec<Frame> {
    let plan = SweepPlan {
        steps_per_edge: 1,
        ..SweepPlan::default()
    };
    render_sweep(&plan).unwrap()
}

#[test]
fn test_memory_round_trip_keeps_frames() {
    let frames = short_sweep();
    let mut buffer = Vec::new();
    encode_gif(&mut buffer, &frames, &EncodeOptions::default()).unwrap();

    let decoded = decode_gif(Cursor::new(buffer)).unwrap();
    assert_eq!(decoded.len(), frames.len());
    for (original, restored) in frames.iter().zip(&decoded) {
        assert_eq!(restored.shape(), (FRAME_SIDE, FRAME_SIDE));
        let diff = mean_abs_diff(original, restored);
        assert!(diff < 4.0, "mean abs diff {diff}");
    }
}

#[test]
fn test_file_round_trip_creates_parent_dirs() {
    let dir = scratch_dir("file");
    let path = dir.join("nested").join("sweep.gif");
    let frames = short_sweep();

    write_gif(&path, &frames, &EncodeOptions::default()).unwrap();
    let decoded = read_gif(&path).unwrap();
    assert_eq!(decoded.len(), frames.len());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_gif_sink_writes_correlation_video() {
    let dir = scratch_dir("sink");
    let frames = short_sweep();
    let mut sink = GifSink::new(dir.join("correlation.gif"), EncodeOptions::default());

    let sequence = CorrelationSequenceBuilder::default()
        .build_into(&frames, &mut sink)
        .unwrap();

    let video = read_gif(sink.path()).unwrap();
    assert_eq!(video.len(), frames.len() - 1);
    assert_eq!(video.len(), sequence.len());
    assert_eq!(video[0].shape(), sequence.get(0).unwrap().shape());

    let _ = std::fs::remove_dir_all(&dir);
}
