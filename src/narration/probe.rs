use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Probe the duration of a media file through `ffprobe`.
pub fn probe_duration_secs(path: &Path) -> ReelResult<f64> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-print_format",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|e| ReelError::synthesis(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::synthesis(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_duration(&out.stdout)
}

/// Extract `format.duration` from ffprobe JSON output.
pub(crate) fn parse_probe_duration(json: &[u8]) -> ReelResult<f64> {
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| ReelError::synthesis(format!("ffprobe json parse failed: {e}")))?;
    let secs = parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .ok_or_else(|| ReelError::synthesis("ffprobe reported no duration"))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ReelError::synthesis(format!(
            "ffprobe reported invalid duration {secs}"
        )));
    }
    Ok(secs)
}
