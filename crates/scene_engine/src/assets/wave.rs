//! Wave file description
//!
//! Reads the header of a WAVE file with `hound` to learn its format and
//! length. Samples are never decoded.

use std::io::{Cursor, ErrorKind, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use super::AssetError;

/// Format and length of a WAVE file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveInfo {
    /// Channel count
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Whether samples are IEEE floats rather than integers
    pub float: bool,
    /// Length in sample frames (one sample per channel)
    pub frames: u32,
}

impl WaveInfo {
    /// Describe the WAVE file at `path`
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let reader = WavReader::open(path).map_err(|error| map_error(path, error))?;
        Self::from_reader(&reader).map_err(|reason| AssetError::InvalidFormat {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Describe an in-memory WAVE file
    pub fn parse(bytes: &[u8]) -> Result<Self, String> {
        let reader = WavReader::new(Cursor::new(bytes)).map_err(|error| error.to_string())?;
        Self::from_reader(&reader)
    }

    fn from_reader<R: Read>(reader: &WavReader<R>) -> Result<Self, String> {
        let spec = reader.spec();
        if spec.channels == 0 || spec.sample_rate == 0 {
            return Err("fmt chunk has zero channels or sample rate".to_string());
        }

        Ok(Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            float: spec.sample_format == SampleFormat::Float,
            frames: reader.duration(),
        })
    }

    /// Playback length in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            0.0
        } else {
            (f64::from(self.frames) / f64::from(self.sample_rate)) as f32
        }
    }
}

fn map_error(path: &Path, error: hound::Error) -> AssetError {
    match error {
        hound::Error::IoError(source) if source.kind() != ErrorKind::UnexpectedEof => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => AssetError::InvalidFormat {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}

/// Build an integer PCM WAVE file holding `frames` frames of silence
///
/// Used by tests and by tools that need a placeholder sound.
pub fn pcm_silence(
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
    frames: u32,
) -> Result<Vec<u8>, hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for _ in 0..u64::from(frames) * u64::from(channels) {
        writer.write_sample(0i32)?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_pcm_header() {
        let bytes = pcm_silence(44_100, 2, 16, 44_100).unwrap();
        let info = WaveInfo::parse(&bytes).unwrap();

        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 44_100);
        assert_eq!(info.bits_per_sample, 16);
        assert!(!info.float);
        assert_eq!(info.frames, 44_100);
        assert_relative_eq!(info.duration_secs(), 1.0);
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let plain = pcm_silence(8_000, 1, 8, 800).unwrap();
        let mut bytes = plain[..12].to_vec();
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        bytes.extend_from_slice(&plain[12..]);
        let riff_len = u32::try_from(bytes.len() - 8).unwrap();
        bytes[4..8].copy_from_slice(&riff_len.to_le_bytes());

        let info = WaveInfo::parse(&bytes).unwrap();
        assert_eq!(info.frames, 800);
        assert_relative_eq!(info.duration_secs(), 0.1);
    }

    #[test]
    fn test_duration_of_wide_high_rate_file() {
        let bytes = pcm_silence(384_000, 8, 32, 384_000).unwrap();
        let info = WaveInfo::parse(&bytes).unwrap();

        assert_eq!(info.channels, 8);
        assert_relative_eq!(info.duration_secs(), 1.0);
    }

    #[test]
    fn test_rejects_non_wave() {
        assert!(WaveInfo::parse(b"OggS....").is_err());
        let mut bytes = pcm_silence(8_000, 1, 8, 10).unwrap();
        bytes[8..12].copy_from_slice(b"AVI ");
        assert!(WaveInfo::parse(&bytes).is_err());
    }

    #[test]
    fn test_rejects_impossible_format() {
        let mut bytes = pcm_silence(8_000, 1, 8, 8).unwrap();
        bytes[22..24].copy_from_slice(&64u16.to_le_bytes());
        bytes[24..28].copy_from_slice(&200_000u32.to_le_bytes());
        bytes[34..36].copy_from_slice(&1024u16.to_le_bytes());
        assert!(WaveInfo::parse(&bytes).is_err());
    }

    #[test]
    fn test_missing_data_chunk() {
        let bytes = pcm_silence(8_000, 1, 8, 0).unwrap();
        assert!(WaveInfo::parse(&bytes[..36]).is_err());
    }

    #[test]
    fn test_open_maps_errors() {
        let dir = std::env::temp_dir().join(format!("scene_engine_wave_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let short = dir.join("short.wav");
        std::fs::write(&short, b"RIFF").unwrap();

        assert!(matches!(WaveInfo::open(&short), Err(AssetError::InvalidFormat { .. })));
        assert!(matches!(WaveInfo::open(&dir.join("none.wav")), Err(AssetError::Io { .. })));

        std::fs::remove_dir_all(&dir).ok();
    }
}
