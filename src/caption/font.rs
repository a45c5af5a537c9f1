use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Environment variable that overrides caption font discovery.
pub const FONT_ENV_VAR: &str = "REELSMITH_FONT";

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Resolve the caption font file.
///
/// Order: explicit path, then `REELSMITH_FONT`, then well-known system sans-serif fonts.
pub fn resolve_font_path(explicit: Option<&Path>) -> ReelResult<PathBuf> {
    if let Some(p) = explicit {
        if p.is_file() {
            return Ok(p.to_path_buf());
        }
        return Err(ReelError::render(format!(
            "caption font '{}' does not exist",
            p.display()
        )));
    }

    if let Some(p) = std::env::var_os(FONT_ENV_VAR).map(PathBuf::from)
        && p.is_file()
    {
        return Ok(p);
    }

    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
        .ok_or_else(|| {
            ReelError::render(format!(
                "no caption font found; set caption.font_path or {FONT_ENV_VAR}"
            ))
        })
}

/// Read font bytes for the caption renderer.
pub fn load_font_bytes(explicit: Option<&Path>) -> ReelResult<Vec<u8>> {
    let path = resolve_font_path(explicit)?;
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read caption font '{}'", path.display()))?;
    tracing::debug!(font = %path.display(), bytes = bytes.len(), "loaded caption font");
    Ok(bytes)
}
