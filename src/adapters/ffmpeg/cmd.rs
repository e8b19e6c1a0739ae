use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tokio::process::Command as TokioCommand;

/// Captured result of an ffmpeg/ffprobe invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaCommand: Send + Sync {
    async fn run_ffmpeg(&self, args: Vec<OsString>) -> io::Result<CommandOutput>;
    async fn run_ffprobe_for_duration(&self, media_path: &Path) -> io::Result<CommandOutput>;
}

pub struct RealMediaCommand;

#[async_trait]
impl MediaCommand for RealMediaCommand {
    async fn run_ffmpeg(&self, args: Vec<OsString>) -> io::Result<CommandOutput> {
        let output = TokioCommand::new("ffmpeg")
            .args(args)
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(output.into())
    }

    async fn run_ffprobe_for_duration(&self, media_path: &Path) -> io::Result<CommandOutput> {
        let output = TokioCommand::new("ffprobe")
            .arg("-v").arg("error")
            .arg("-show_entries").arg("format=duration")
            .arg("-of").arg("default=noprint_wrappers=1:nokey=1")
            .arg(media_path)
            .output()
            .await?;
        Ok(output.into())
    }
}
