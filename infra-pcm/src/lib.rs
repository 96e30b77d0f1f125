//! Byte-exact slicing of an uncompressed WAV container into standalone
//! clips, one per validated time range.

use async_trait::async_trait;
use dictation_domain::{
    DomainError, ExtractedClip, Extraction, SegmentExtractorPort, TimeRange,
};

const RIFF_MAGIC: &[u8; 4] = b"RIFF";
const WAVE_MAGIC: &[u8; 4] = b"WAVE";
const FMT_CHUNK: &[u8; 4] = b"fmt ";
const DATA_CHUNK: &[u8; 4] = b"data";

const FORMAT_PCM: u16 = 1;
const FORMAT_IEEE_FLOAT: u16 = 3;

/// Sample layout of the source container, read from its `fmt ` chunk.
#[derive(Debug, Clone, Copy)]
struct WavLayout {
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data_offset: usize,
    data_len: usize,
}

impl WavLayout {
    fn bytes_per_frame(&self) -> usize {
        usize::from(self.bits_per_sample / 8) * usize::from(self.channels)
    }

    fn byte_rate(&self) -> usize {
        self.sample_rate as usize * self.bytes_per_frame()
    }

    fn total_duration_secs(&self) -> f64 {
        self.data_len as f64 / self.byte_rate() as f64
    }
}

#[derive(Default)]
pub struct WavSegmentExtractor;

impl WavSegmentExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SegmentExtractorPort for WavSegmentExtractor {
    async fn extract(&self, wav: &[u8], ranges: &[TimeRange]) -> Result<Extraction, DomainError> {
        let layout = parse_layout(wav)?;
        let total_duration_secs = layout.total_duration_secs();

        // The whole batch is checked before a single byte is sliced; one bad
        // range fails the call with zero clips produced.
        for range in ranges {
            let valid = range.start_secs >= 0.0
                && range.start_secs < range.end_secs
                && range.end_secs <= total_duration_secs;
            if !valid {
                return Err(DomainError::invalid_range(
                    range.order,
                    range.start_secs,
                    range.end_secs,
                ));
            }
        }

        let byte_rate = layout.byte_rate() as f64;
        let mut clips = Vec::with_capacity(ranges.len());
        for range in ranges {
            let offset = (range.start_secs * byte_rate).floor() as usize;
            let requested = ((range.end_secs - range.start_secs) * byte_rate).floor() as usize;
            // A trailing range may ask for slightly more than the container
            // holds; hand back the shorter slice instead of failing.
            let available = layout.data_len.saturating_sub(offset);
            let taken = requested.min(available);

            let start = layout.data_offset + offset;
            let slice = &wav[start..start + taken];
            clips.push(ExtractedClip {
                bytes: wrap_pcm(slice, &layout),
                duration_secs: taken as f64 / byte_rate,
            });
        }

        tracing::debug!(
            clip_count = clips.len(),
            sample_rate_hz = layout.sample_rate,
            channels = layout.channels,
            total_duration_secs,
            "segment extraction completed"
        );

        Ok(Extraction {
            clips,
            total_duration_secs,
        })
    }
}

fn parse_layout(wav: &[u8]) -> Result<WavLayout, DomainError> {
    if wav.len() < 12 || &wav[0..4] != RIFF_MAGIC || &wav[8..12] != WAVE_MAGIC {
        return Err(DomainError::invalid_input(
            "buffer is not a RIFF/WAVE container",
        ));
    }

    let mut fmt: Option<(u16, u16, u32, u16)> = None;
    let mut data: Option<(usize, usize)> = None;
    let mut cursor = 12usize;

    while cursor + 8 <= wav.len() {
        let id = &wav[cursor..cursor + 4];
        let declared = u32::from_le_bytes([
            wav[cursor + 4],
            wav[cursor + 5],
            wav[cursor + 6],
            wav[cursor + 7],
        ]) as usize;
        let body = cursor + 8;
        // Streamed encoders write placeholder sizes; trust the buffer bounds.
        let size = declared.min(wav.len().saturating_sub(body));

        if id == FMT_CHUNK {
            if size < 16 {
                return Err(DomainError::invalid_input("fmt chunk is truncated"));
            }
            let format_tag = u16::from_le_bytes([wav[body], wav[body + 1]]);
            let channels = u16::from_le_bytes([wav[body + 2], wav[body + 3]]);
            let sample_rate = u32::from_le_bytes([
                wav[body + 4],
                wav[body + 5],
                wav[body + 6],
                wav[body + 7],
            ]);
            let bits_per_sample = u16::from_le_bytes([wav[body + 14], wav[body + 15]]);
            fmt = Some((format_tag, channels, sample_rate, bits_per_sample));
        } else if id == DATA_CHUNK {
            data = Some((body, size));
        }

        // Chunks are word aligned.
        cursor = body + size + (size & 1);
    }

    let (format_tag, channels, sample_rate, bits_per_sample) =
        fmt.ok_or_else(|| DomainError::invalid_input("container has no fmt chunk"))?;
    let (data_offset, data_len) =
        data.ok_or_else(|| DomainError::invalid_input("container has no data chunk"))?;

    if format_tag != FORMAT_PCM && format_tag != FORMAT_IEEE_FLOAT {
        return Err(DomainError::invalid_input(
            "container is not uncompressed PCM",
        ));
    }
    if channels == 0 || sample_rate == 0 || bits_per_sample < 8 || bits_per_sample % 8 != 0 {
        return Err(DomainError::invalid_input("fmt chunk carries a bad layout"));
    }

    Ok(WavLayout {
        format_tag,
        channels,
        sample_rate,
        bits_per_sample,
        data_offset,
        data_len,
    })
}

/// Wraps raw sample bytes with a canonical 44-byte header carrying the
/// source layout, yielding a standalone playable clip.
fn wrap_pcm(samples: &[u8], layout: &WavLayout) -> Vec<u8> {
    let block_align = layout.bytes_per_frame() as u16;
    let byte_rate = layout.byte_rate() as u32;

    let mut out = Vec::with_capacity(44 + samples.len());
    out.extend_from_slice(RIFF_MAGIC);
    out.extend_from_slice(&(36 + samples.len() as u32).to_le_bytes());
    out.extend_from_slice(WAVE_MAGIC);
    out.extend_from_slice(FMT_CHUNK);
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&layout.format_tag.to_le_bytes());
    out.extend_from_slice(&layout.channels.to_le_bytes());
    out.extend_from_slice(&layout.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&layout.bits_per_sample.to_le_bytes());
    out.extend_from_slice(DATA_CHUNK);
    out.extend_from_slice(&(samples.len() as u32).to_le_bytes());
    out.extend_from_slice(samples);
    out
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use dictation_domain::{SegmentExtractorPort, TimeRange};
    use hound::{SampleFormat, WavSpec, WavWriter};

    use super::WavSegmentExtractor;

    fn two_second_mono_wav() -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut buffer, spec).expect("writer opens");
        for i in 0..16_000i32 {
            writer.write_sample((i % 1_000) as i16).expect("sample");
        }
        writer.finalize().expect("finalize");
        buffer.into_inner()
    }

    fn range(order: u32, start_secs: f64, end_secs: f64) -> TimeRange {
        TimeRange {
            start_secs,
            end_secs,
            order,
            transcript: format!("segment {order}"),
        }
    }

    #[tokio::test]
    async fn extracts_clips_matching_requested_durations() {
        let wav = two_second_mono_wav();
        let extractor = WavSegmentExtractor::new();

        let extraction = extractor
            .extract(&wav, &[range(1, 0.0, 0.5), range(2, 0.5, 2.0)])
            .await
            .expect("extraction succeeds");

        assert_eq!(extraction.total_duration_secs, 2.0);
        assert_eq!(extraction.clips.len(), 2);
        // One sample frame at 8 kHz mono 16-bit.
        let frame_secs = 1.0 / 8_000.0;
        assert!((extraction.clips[0].duration_secs - 0.5).abs() <= frame_secs);
        assert!((extraction.clips[1].duration_secs - 1.5).abs() <= frame_secs);
    }

    #[tokio::test]
    async fn clips_are_standalone_playable_containers() {
        let wav = two_second_mono_wav();
        let extractor = WavSegmentExtractor::new();

        let extraction = extractor
            .extract(&wav, &[range(1, 0.25, 1.25)])
            .await
            .expect("extraction succeeds");

        let clip = &extraction.clips[0];
        let reader = hound::WavReader::new(Cursor::new(clip.bytes.clone())).expect("clip parses");
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 8_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 8_000);
    }

    #[tokio::test]
    async fn one_bad_range_fails_the_whole_batch() {
        let wav = two_second_mono_wav();
        let extractor = WavSegmentExtractor::new();

        let error = extractor
            .extract(&wav, &[range(1, 0.0, 1.0), range(2, 1.5, 2.5)])
            .await
            .expect_err("batch must fail");

        assert_eq!(error.code(), "invalid_range");
        assert!(error.to_string().contains("range 2"));
    }

    #[tokio::test]
    async fn start_at_or_past_end_is_rejected() {
        let wav = two_second_mono_wav();
        let extractor = WavSegmentExtractor::new();

        let error = extractor
            .extract(&wav, &[range(1, 1.0, 1.0)])
            .await
            .expect_err("empty range must fail");
        assert_eq!(error.code(), "invalid_range");

        let error = extractor
            .extract(&wav, &[range(1, -0.5, 1.0)])
            .await
            .expect_err("negative start must fail");
        assert_eq!(error.code(), "invalid_range");
    }

    #[tokio::test]
    async fn trailing_short_read_returns_shorter_clip() {
        let wav = two_second_mono_wav();
        let extractor = WavSegmentExtractor::new();

        // end == total duration; the floor'd byte length may round past the
        // data chunk tail without failing.
        let extraction = extractor
            .extract(&wav, &[range(1, 1.999_9, 2.0)])
            .await
            .expect("tail range succeeds");

        let clip = &extraction.clips[0];
        assert!(clip.duration_secs > 0.0);
        assert!(clip.duration_secs <= 0.000_2);
    }

    #[tokio::test]
    async fn garbage_buffer_is_rejected_not_panicked_on() {
        let extractor = WavSegmentExtractor::new();
        let error = extractor
            .extract(b"definitely not audio", &[range(1, 0.0, 1.0)])
            .await
            .expect_err("garbage must fail");
        assert_eq!(error.code(), "invalid_input");
    }
}
