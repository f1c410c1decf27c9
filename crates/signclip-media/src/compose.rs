//! Clip composition: splice an ordered clip list into one output video.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use signclip_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Concatenate `clips` into `output`, video and audio tracks in the given
/// order, re-encoded per `encoding`.
///
/// Every input is checked for readability before the backend is spawned,
/// so a missing clip fails fast as [`MediaError::ClipUnavailable`] rather
/// than mid-encode. A partial output left behind by a failed run is
/// removed and never surfaced.
pub async fn concatenate(
    clips: &[PathBuf],
    output: &Path,
    encoding: &EncodingConfig,
    timeout_secs: u64,
) -> MediaResult<()> {
    if clips.is_empty() {
        return Err(MediaError::NoInputClips);
    }

    for clip in clips {
        match fs::metadata(clip).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(MediaError::ClipUnavailable(clip.clone())),
        }
    }

    info!(
        "Concatenating {} clips -> {}",
        clips.len(),
        output.display()
    );

    let mut cmd = FfmpegCommand::new(output)
        .inputs(clips)
        .filter_complex(concat_filter(clips.len()))
        .map("[v]")
        .map("[a]")
        .video_codec(&encoding.codec)
        .audio_codec(&encoding.audio_codec)
        .audio_bitrate(&encoding.audio_bitrate)
        .preset(&encoding.preset);
    if encoding.faststart {
        cmd = cmd.faststart();
    }

    let runner = FfmpegRunner::new().with_timeout(timeout_secs);
    if let Err(e) = runner.run(&cmd).await {
        remove_partial_output(output).await;
        return Err(e);
    }

    info!("Composition complete: {}", output.display());
    Ok(())
}

/// Build the concat filter graph for `n` inputs: each input contributes
/// its video and audio stream, joined into the `[v]`/`[a]` output labels.
fn concat_filter(n: usize) -> String {
    let mut filter = String::new();
    for i in 0..n {
        filter.push_str(&format!("[{i}:v][{i}:a]"));
    }
    filter.push_str(&format!("concat=n={n}:v=1:a=1[v][a]"));
    filter
}

/// Best-effort removal of an invalid output from a failed run.
async fn remove_partial_output(output: &Path) {
    if fs::metadata(output).await.is_ok() {
        if let Err(e) = fs::remove_file(output).await {
            warn!("Failed to remove partial output {}: {}", output.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_concat_filter_shape() {
        assert_eq!(concat_filter(1), "[0:v][0:a]concat=n=1:v=1:a=1[v][a]");
        assert_eq!(
            concat_filter(3),
            "[0:v][0:a][1:v][1:a][2:v][2:a]concat=n=3:v=1:a=1[v][a]"
        );
    }

    #[tokio::test]
    async fn test_empty_input_list_rejected() {
        let dir = TempDir::new().unwrap();
        let err = concatenate(
            &[],
            &dir.path().join("out.mp4"),
            &EncodingConfig::default(),
            10,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::NoInputClips));
    }

    #[tokio::test]
    async fn test_missing_clip_fails_before_backend() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("a.mp4");
        fs::write(&present, b"stub").await.unwrap();
        let missing = dir.path().join("gone.mp4");

        let err = concatenate(
            &[present, missing.clone()],
            &dir.path().join("out.mp4"),
            &EncodingConfig::default(),
            10,
        )
        .await
        .unwrap_err();

        match err {
            MediaError::ClipUnavailable(path) => assert_eq!(path, missing),
            other => panic!("expected ClipUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_directory_input_rejected() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("clips");
        fs::create_dir(&sub).await.unwrap();

        let err = concatenate(
            &[sub.clone()],
            &dir.path().join("out.mp4"),
            &EncodingConfig::default(),
            10,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::ClipUnavailable(p) if p == sub));
    }
}
