//! Duration lookup through libav, for hosts without the ffprobe binary.

use ffmpeg_next as ffmpeg;
use std::path::Path;

pub async fn read_duration(
    path: &Path,
) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(
        move || -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
            ffmpeg::init()?;
            let context = ffmpeg::format::input(&path)?;
            let duration = context.duration();
            if duration <= 0 {
                return Err(format!("no duration reported for {}", path.display()).into());
            }
            Ok(duration as f64 / f64::from(ffmpeg::ffi::AV_TIME_BASE))
        },
    )
    .await?
}
