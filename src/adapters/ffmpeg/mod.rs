//! Trimming through the ffmpeg command line.

pub mod cmd;
#[cfg(feature = "native-duration")]
pub mod native;

use crate::ports::editor::VideoEditor;
use crate::ports::PortResult;
use async_trait::async_trait;
use cmd::{MediaCommand, RealMediaCommand};
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How the editor learns a clip's duration before cutting it.
///
/// Builds with `native-duration` read through libav by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationSource {
    #[cfg_attr(not(feature = "native-duration"), default)]
    Ffprobe,
    #[cfg(feature = "native-duration")]
    #[default]
    Libav,
}

pub struct FfmpegEditor<C = RealMediaCommand> {
    command: C,
    duration_source: DurationSource,
}

impl FfmpegEditor<RealMediaCommand> {
    pub fn new() -> Self {
        Self::with_command(RealMediaCommand, DurationSource::default())
    }
}

impl Default for FfmpegEditor<RealMediaCommand> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MediaCommand> FfmpegEditor<C> {
    pub fn with_command(command: C, duration_source: DurationSource) -> Self {
        Self {
            command,
            duration_source,
        }
    }

    async fn read_duration(&self, source: &Path) -> PortResult<f64> {
        match self.duration_source {
            DurationSource::Ffprobe => {
                let output = self.command.run_ffprobe_for_duration(source).await?;
                if !output.success {
                    return Err(format!("ffprobe failed: {}", last_line(&output.stderr)).into());
                }
                let duration = output.stdout.trim().parse::<f64>()?;
                Ok(duration)
            }
            #[cfg(feature = "native-duration")]
            DurationSource::Libav => native::read_duration(source).await,
        }
    }
}

#[async_trait]
impl<C: MediaCommand> VideoEditor for FfmpegEditor<C> {
    async fn trim(&self, source: &Path, dest: &Path, offset: Duration) -> PortResult<()> {
        let offset_secs = offset.as_secs_f64();

        match self.read_duration(source).await {
            Ok(duration) if duration <= offset_secs => {
                return Err(format!(
                    "clip is {:.2}s long, cannot cut the first {:.2}s",
                    duration, offset_secs
                )
                .into());
            }
            Ok(duration) => debug!(file = %source.display(), duration, "Read source duration"),
            Err(e) => warn!(file = %source.display(), "Could not read duration: {}", e),
        }

        info!(
            file = %source.display(),
            dest = %dest.display(),
            "Cutting the first {:.3}s",
            offset_secs
        );
        let output = self.command.run_ffmpeg(trim_args(source, dest, offset)).await?;
        if !output.success {
            return Err(format!("ffmpeg failed: {}", last_line(&output.stderr)).into());
        }

        let written = tokio::fs::metadata(dest).await.map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            return Err(format!("ffmpeg produced no output at {}", dest.display()).into());
        }
        Ok(())
    }
}

/// `ffmpeg -y -ss <offset> -i <source> -c:v libx264 -c:a aac -movflags +faststart <dest>`
fn trim_args(source: &Path, dest: &Path, offset: Duration) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-ss"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(format!("{:.3}", offset.as_secs_f64()).into());
    args.push("-i".into());
    args.push(source.into());
    for arg in ["-c:v", "libx264", "-c:a", "aac", "-movflags", "+faststart"] {
        args.push(arg.into());
    }
    args.push(dest.into());
    args
}

fn last_line(stderr: &str) -> &str {
    stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("no output")
}

#[cfg(test)]
mod tests {
    use super::cmd::{CommandOutput, MockMediaCommand};
    use super::*;
    use tempfile::tempdir;

    fn duration_ok(duration: &str) -> CommandOutput {
        CommandOutput {
            success: true,
            stdout: format!("{}\n", duration),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_trim_args() {
        let args = trim_args(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            Duration::from_millis(1500),
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "1.500");
        assert!(args.windows(2).any(|w| w[0] == "-c:v" && w[1] == "libx264"));
        assert!(args.windows(2).any(|w| w[0] == "-c:a" && w[1] == "aac"));
        assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
    }

    #[tokio::test]
    async fn test_trim_runs_ffmpeg() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("clip_edited.mp4");

        let mut command = MockMediaCommand::new();
        command
            .expect_run_ffprobe_for_duration()
            .times(1)
            .returning(|_| Ok(duration_ok("12.4")));
        command.expect_run_ffmpeg().times(1).returning(|args| {
            let dest = args.last().cloned().unwrap();
            std::fs::write(dest, b"encoded")?;
            Ok(CommandOutput {
                success: true,
                ..Default::default()
            })
        });

        let editor = FfmpegEditor::with_command(command, DurationSource::Ffprobe);
        editor
            .trim(Path::new("clip.mp4"), &dest, Duration::from_millis(1500))
            .await
            .unwrap();
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_trim_rejects_clip_shorter_than_offset() {
        let mut command = MockMediaCommand::new();
        command
            .expect_run_ffprobe_for_duration()
            .returning(|_| Ok(duration_ok("1.2")));
        command.expect_run_ffmpeg().times(0);

        let editor = FfmpegEditor::with_command(command, DurationSource::Ffprobe);
        let result = editor
            .trim(Path::new("a.mp4"), Path::new("b.mp4"), Duration::from_millis(1500))
            .await;
        assert!(result.unwrap_err().to_string().contains("cannot cut"));
    }

    #[tokio::test]
    async fn test_trim_reports_ffmpeg_failure() {
        let mut command = MockMediaCommand::new();
        command
            .expect_run_ffprobe_for_duration()
            .returning(|_| Err(std::io::Error::new(std::io::ErrorKind::NotFound, "ffprobe")));
        command.expect_run_ffmpeg().returning(|_| {
            Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: "frame=0\nInvalid data found when processing input\n".to_string(),
            })
        });

        let editor = FfmpegEditor::with_command(command, DurationSource::Ffprobe);
        let err = editor
            .trim(Path::new("a.mp4"), Path::new("b.mp4"), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "ffmpeg failed: Invalid data found when processing input");
    }

    #[cfg(not(feature = "native-duration"))]
    #[test]
    fn test_default_duration_source_is_ffprobe() {
        assert_eq!(DurationSource::default(), DurationSource::Ffprobe);
        assert_eq!(FfmpegEditor::new().duration_source, DurationSource::Ffprobe);
    }

    #[cfg(feature = "native-duration")]
    #[test]
    fn test_native_duration_build_defaults_to_libav() {
        assert_eq!(DurationSource::default(), DurationSource::Libav);
        assert_eq!(FfmpegEditor::new().duration_source, DurationSource::Libav);
    }
}
