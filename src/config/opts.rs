use crate::config::profile::RenderProfile;
use crate::foundation::core::Fps;
use crate::foundation::error::{StoryError, StoryResult};
use crate::script::StoryScript;
use std::path::Path;

/// Options for the offline export sweep.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// Output frame rate.
    pub fps: Fps,
    /// Frames rendered between two cooperative yields.
    pub batch_frames: u32,
    /// Background fill (straight RGBA8).
    pub background_rgba: [u8; 4],
    /// Text color (straight RGBA8).
    pub ink_rgba: [u8; 4],
    /// Pause taken at each yield point, in milliseconds.
    pub yield_pause_ms: u64,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            batch_frames: 60,
            background_rgba: [255, 255, 255, 255],
            ink_rgba: [0, 0, 0, 255],
            yield_pause_ms: 10,
        }
    }
}

impl ExportOpts {
    /// Check option values before an export starts.
    pub fn validate(&self) -> StoryResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.batch_frames == 0 {
            return Err(StoryError::validation("batch_frames must be > 0"));
        }
        Ok(())
    }
}

/// On-disk story description consumed by the CLI.
///
/// ```json
/// { "title": "A Dragon's Tale", "content": "Once...\n\nThe end came.", "profile": { "speed": "slow" } }
/// ```
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StoryDocument {
    /// Title; generated by the caller when absent.
    #[serde(default)]
    pub title: Option<String>,
    /// Raw prose, one paragraph per line.
    pub content: String,
    /// Render selectors.
    #[serde(default)]
    pub profile: RenderProfile,
    /// Export sweep options.
    #[serde(default)]
    pub export: ExportOpts,
}

impl StoryDocument {
    /// Read a document from a JSON file.
    pub fn read_json(path: &Path) -> StoryResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            StoryError::validation(format!("failed to read '{}': {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| StoryError::serde(e.to_string()))
    }

    /// Build the immutable script from this document.
    pub fn script(&self) -> StoryScript {
        let script = StoryScript::from_text(&self.content);
        match self.title.as_deref() {
            Some(t) => script.with_title(t),
            None => script,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/opts.rs"]
mod tests;
