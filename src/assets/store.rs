use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode::decode_image,
    composition::model::TimelineDocument,
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Fonts and images a timeline needs, loaded before any frame is drawn.
///
/// Remote image URLs are never fetched; frames show a placeholder panel for them, as they do for
/// local files that are missing or fail to decode.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    font: Option<Arc<Vec<u8>>>,
    images: HashMap<String, PreparedImage>,
}

impl AssetStore {
    /// Store with no font and no images.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every local scene image of `doc`, resolving relative paths against `root`.
    #[tracing::instrument(skip(doc, root))]
    pub fn prepare(doc: &TimelineDocument, root: impl Into<PathBuf>) -> ReelResult<Self> {
        let mut out = Self {
            root: root.into(),
            ..Self::default()
        };

        for (i, scene) in doc.scenes.iter().enumerate() {
            let Some(source) = scene.image.as_deref() else {
                continue;
            };
            if out.images.contains_key(source) {
                continue;
            }
            if is_remote_source(source) {
                tracing::debug!(scene = i, source, "remote image left as placeholder");
                continue;
            }

            let path = out.resolve(source);
            let prepared = std::fs::read(&path)
                .with_context(|| format!("read image '{}'", path.display()))
                .map_err(ReelError::from)
                .and_then(|bytes| decode_image(&bytes));
            match prepared {
                Ok(img) => {
                    out.images.insert(source.to_string(), img);
                }
                Err(e) => {
                    tracing::warn!(
                        scene = i,
                        source,
                        error = %e,
                        "image unavailable, using placeholder"
                    );
                }
            }
        }

        Ok(out)
    }

    /// Attach font bytes used for every text block.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.font = Some(Arc::new(bytes));
        self
    }

    /// Read a font file and attach it.
    pub fn with_font_file(self, path: &Path) -> ReelResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(ReelError::validation(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(self.with_font_bytes(bytes))
    }

    /// Font bytes, when a font was attached.
    pub fn font_bytes(&self) -> Option<&Arc<Vec<u8>>> {
        self.font.as_ref()
    }

    /// Decoded image for a scene's `image` value.
    pub fn image(&self, source: &str) -> Option<&PreparedImage> {
        self.images.get(source)
    }

    /// Number of decoded images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let source = source.strip_prefix("file://").unwrap_or(source);
        let p = Path::new(source);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

/// Return `true` for sources that would need network access.
pub fn is_remote_source(source: &str) -> bool {
    let s = source.trim_start().to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
