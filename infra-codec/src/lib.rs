//! Compressed-audio to WAV conversion through an external `ffmpeg` process.

use std::path::PathBuf;

use async_trait::async_trait;
use dictation_domain::{AudioCodecPort, DomainError};
use tokio::process::Command;
use uuid::Uuid;

/// Injected adapter settings. The binary path is explicit constructor input
/// so tests can point at a stub or swap the whole port for a fake.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    pub ffmpeg_path: PathBuf,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
        }
    }
}

pub struct FfmpegCodecAdapter {
    ffmpeg_path: PathBuf,
}

impl FfmpegCodecAdapter {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path,
        }
    }
}

#[async_trait]
impl AudioCodecPort for FfmpegCodecAdapter {
    async fn convert_to_wav(&self, audio: &[u8]) -> Result<Vec<u8>, DomainError> {
        if audio.is_empty() {
            return Err(DomainError::conversion("input audio buffer is empty"));
        }

        // Every call works in its own unique directory; the guard removes it
        // on success, failure and panic alike, so concurrent conversions
        // never collide or leak artifacts.
        let workdir = tempfile::tempdir()
            .map_err(|err| DomainError::conversion(&format!("scratch dir unavailable: {err}")))?;
        let call_id = Uuid::new_v4();
        let input_path = workdir.path().join(format!("{call_id}.in"));
        let output_path = workdir.path().join(format!("{call_id}.wav"));

        tokio::fs::write(&input_path, audio)
            .await
            .map_err(|err| DomainError::conversion(&format!("failed to stage input: {err}")))?;

        let output = Command::new(&self.ffmpeg_path)
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(&input_path)
            // Fixed target container; source sample rate and channel count
            // are preserved for byte-exact slicing downstream.
            .arg("-f")
            .arg("wav")
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg(&output_path)
            .output()
            .await
            .map_err(|err| {
                DomainError::conversion(&format!(
                    "failed to spawn transcoder `{}`: {err}",
                    self.ffmpeg_path.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DomainError::conversion(&format!(
                "transcoder exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let wav = tokio::fs::read(&output_path)
            .await
            .map_err(|err| DomainError::conversion(&format!("no output produced: {err}")))?;
        if wav.is_empty() {
            return Err(DomainError::conversion("transcoder produced empty output"));
        }

        tracing::debug!(
            input_bytes = audio.len(),
            output_bytes = wav.len(),
            "audio conversion completed"
        );

        Ok(wav)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use dictation_domain::AudioCodecPort;

    use super::{CodecConfig, FfmpegCodecAdapter};

    #[tokio::test]
    async fn empty_buffer_is_rejected_before_spawning() {
        let adapter = FfmpegCodecAdapter::new(CodecConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/transcoder"),
        });

        let error = adapter.convert_to_wav(&[]).await.expect_err("must fail");
        assert_eq!(error.code(), "conversion_failed");
        assert!(error.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn missing_binary_surfaces_a_conversion_error() {
        let adapter = FfmpegCodecAdapter::new(CodecConfig {
            ffmpeg_path: PathBuf::from("/nonexistent/transcoder"),
        });

        let error = adapter
            .convert_to_wav(&[0u8; 16])
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), "conversion_failed");
        assert!(error.to_string().contains("spawn"));
    }

    #[tokio::test]
    async fn failing_process_surfaces_exit_status() {
        // `false` accepts any arguments and exits non-zero without writing
        // the requested output file.
        let adapter = FfmpegCodecAdapter::new(CodecConfig {
            ffmpeg_path: PathBuf::from("false"),
        });

        let error = adapter
            .convert_to_wav(&[0u8; 16])
            .await
            .expect_err("must fail");
        assert_eq!(error.code(), "conversion_failed");
    }
}
