use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::ReelResult;
use crate::narration::asset::SubtitleCue;

/// Format `d` as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn format_timestamp(d: Duration) -> String {
    let total_ms = d.as_millis();
    let ms = total_ms % 1000;
    let s = (total_ms / 1000) % 60;
    let m = (total_ms / 60_000) % 60;
    let h = total_ms / 3_600_000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Serialize cues as SubRip text.
pub fn compose_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for cue in cues {
        let _ = writeln!(out, "{}", cue.index);
        let _ = writeln!(
            out,
            "{} --> {}",
            format_timestamp(cue.start),
            format_timestamp(cue.end)
        );
        let _ = writeln!(out, "{}", cue.text);
        out.push('\n');
    }
    out
}

/// Write cues to `path` as an `.srt` file.
pub fn write_srt(path: &Path, cues: &[SubtitleCue]) -> ReelResult<()> {
    crate::encode::ffmpeg::ensure_parent_dir(path)?;
    std::fs::write(path, compose_srt(cues))
        .with_context(|| format!("failed to write subtitles '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/narration/srt.rs"]
mod tests;
