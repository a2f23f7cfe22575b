use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assets::text::FontBytes;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PatchError, PatchResult};
use crate::progress::state::{DEFAULT_GOAL, DEMO_TOTAL};
use crate::scene::layout::{AssetStrategy, PatchVariant};

/// Overrides [`PatchConfig::assets_dir`].
pub const ENV_ASSETS_DIR: &str = "VEGPATCH_ASSETS_DIR";
/// Overrides [`PatchConfig::font_path`].
pub const ENV_FONT: &str = "VEGPATCH_FONT";

/// Engine configuration, usually read from a JSON file. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Size class.
    pub variant: PatchVariant,
    /// Canvas width; the variant's default when absent.
    pub width: Option<u32>,
    /// Canvas height; the variant's default when absent.
    pub height: Option<u32>,
    /// Total shown before the first sync.
    pub initial_total: u64,
    /// Campaign goal.
    pub goal: u64,
    /// Sprite directory. Setting it switches to sprite rendering.
    pub assets_dir: Option<PathBuf>,
    /// Caption font (TTF/OTF). A system sans-serif face is used when absent.
    pub font_path: Option<PathBuf>,
    /// Base seed for the soil speckles.
    pub noise_seed: u64,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            variant: PatchVariant::Full,
            width: None,
            height: None,
            initial_total: DEMO_TOTAL,
            goal: DEFAULT_GOAL,
            assets_dir: None,
            font_path: None,
            noise_seed: 0,
        }
    }
}

impl PatchConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PatchResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PatchError::validation(format!("parse patch config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PatchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PatchError::validation(format!("open patch config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply `VEGPATCH_ASSETS_DIR` and `VEGPATCH_FONT` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|k| std::env::var(k).ok())
    }

    pub(crate) fn with_overrides_from(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = get(ENV_ASSETS_DIR).filter(|v| !v.trim().is_empty()) {
            self.assets_dir = Some(PathBuf::from(dir));
        }
        if let Some(font) = get(ENV_FONT).filter(|v| !v.trim().is_empty()) {
            self.font_path = Some(PathBuf::from(font));
        }
        self
    }

    /// Check goal and canvas.
    pub fn validate(&self) -> PatchResult<()> {
        if self.goal == 0 {
            return Err(PatchError::validation("config goal must be > 0"));
        }
        self.canvas()?;
        Ok(())
    }

    /// Canvas from the explicit size or the variant default.
    pub fn canvas(&self) -> PatchResult<Canvas> {
        let d = self.variant.default_canvas();
        Canvas::new(
            self.width.unwrap_or(d.width),
            self.height.unwrap_or(d.height),
        )
    }

    /// Sprites when an asset directory is configured, shapes otherwise.
    pub fn asset_strategy(&self) -> AssetStrategy {
        if self.assets_dir.is_some() {
            AssetStrategy::Raster
        } else {
            AssetStrategy::Procedural
        }
    }

    /// Load the caption font. A configured path must be readable; without one the first
    /// system sans-serif face is used, and `None` means captions are skipped.
    pub fn caption_font(&self) -> PatchResult<Option<FontBytes>> {
        match &self.font_path {
            Some(path) => FontBytes::from_path(path).map(Some),
            None => Ok(FontBytes::system_sans()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
