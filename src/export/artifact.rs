use std::path::{Path, PathBuf};

use crate::config::profile::AspectRatio;
use crate::encode::sink::Container;
use crate::foundation::error::{StoryError, StoryResult};

/// Slug used when a title has no ASCII letters or digits left after cleaning.
pub const FALLBACK_SLUG: &str = "untitled";

/// A finished, encoded video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, e.g. `a_dragons_tale_story_16x9.mp4`.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

/// Title slug: ASCII letters, digits and whitespace are kept, whitespace runs become `_`, and
/// the result is lower-cased.
pub fn slugify_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let mut out = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c.to_ascii_lowercase());
            in_space = false;
        }
    }
    out
}

/// `<slug>_story_<tag>.<ext>` for the given title and aspect ratio.
pub fn export_file_name(title: &str, aspect: AspectRatio, container: Container) -> String {
    let slug = slugify_title(title);
    let slug = if slug.chars().all(|c| c == '_') {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    };
    format!(
        "{slug}_story_{}.{}",
        aspect.file_tag(),
        container.extension
    )
}

/// Hands a finished artifact to the user.
pub trait ArtifactSink {
    /// Deliver `artifact`. Returns where it went, when that is a path.
    fn deliver(&mut self, artifact: &ExportArtifact) -> StoryResult<Option<PathBuf>>;
}

/// Writes artifacts into a directory under their suggested name.
#[derive(Clone, Debug)]
pub struct DirectoryDelivery {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryDelivery {
    /// Deliver into `dir`, replacing existing files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
        }
    }

    /// Refuse to replace existing files.
    pub fn no_overwrite(mut self) -> Self {
        self.overwrite = false;
        self
    }
}

impl ArtifactSink for DirectoryDelivery {
    fn deliver(&mut self, artifact: &ExportArtifact) -> StoryResult<Option<PathBuf>> {
        let path = self.dir.join(&artifact.file_name);
        ensure_parent_dir(&path)?;
        if !self.overwrite && path.exists() {
            return Err(StoryError::validation(format!(
                "output file '{}' already exists",
                path.display()
            )));
        }
        use anyhow::Context as _;
        std::fs::write(&path, &artifact.bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "artifact written");
        Ok(Some(path))
    }
}

/// Keeps delivered artifacts in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryDelivery {
    /// Everything delivered, in order.
    pub delivered: Vec<ExportArtifact>,
}

impl ArtifactSink for MemoryDelivery {
    fn deliver(&mut self, artifact: &ExportArtifact) -> StoryResult<Option<PathBuf>> {
        self.delivered.push(artifact.clone());
        Ok(None)
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StoryResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/artifact.rs"]
mod tests;
