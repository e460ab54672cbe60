//! Local Image Library
//!
//! `ImageSource` over the bundled goddess artwork. Card names map to
//! asset folder slugs; each folder holds a small set of numbered webp
//! variants and one is picked at random per load so repeated draws of
//! the same card show different artwork. Unknown names fall back to a
//! shared default folder.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;
use shintaku::{Card, ErrorKind, ImageSource, OracleError};

const DEFAULT_IMAGES_PER_CARD: u32 = 5;
const DEFAULT_FALLBACK_SLUG: &str = "amenouzume";

/// Card images resolved from a local directory tree shaped as
/// `<root>/images/<slug>/<index>.webp`.
pub struct AssetLibrary {
    root: PathBuf,
    /// Prefix for returned URLs, typically empty or a CDN base.
    url_base: String,
    images_per_card: u32,
    fallback_slug: String,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            url_base: String::new(),
            images_per_card: DEFAULT_IMAGES_PER_CARD,
            fallback_slug: DEFAULT_FALLBACK_SLUG.to_string(),
        }
    }

    pub fn with_url_base(mut self, base: impl Into<String>) -> Self {
        self.url_base = base.into();
        self
    }

    pub fn with_images_per_card(mut self, count: u32) -> Self {
        self.images_per_card = count.max(1);
        self
    }

    /// Folder slug for a card name: lowercased ASCII letters and
    /// digits only, so "Amaterasu Ōmikami" and "amaterasu omikami"
    /// land in the same folder.
    pub fn slug_for(name: &str) -> String {
        name.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    fn folder(&self, slug: &str) -> PathBuf {
        self.root.join("images").join(slug)
    }

    async fn resolve_slug(&self, card: &Card) -> Result<String, OracleError> {
        let slug = Self::slug_for(&card.name);
        if !slug.is_empty() && dir_exists(&self.folder(&slug)).await {
            return Ok(slug);
        }
        if dir_exists(&self.folder(&self.fallback_slug)).await {
            tracing::debug!(card = card.name, "no dedicated artwork, using fallback");
            return Ok(self.fallback_slug.clone());
        }
        Err(OracleError::new(
            ErrorKind::NetworkError,
            format!("no artwork folder for card '{}'", card.name),
        ))
    }
}

async fn dir_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

#[async_trait]
impl ImageSource for AssetLibrary {
    async fn load(&self, card: &Card) -> Result<String, OracleError> {
        let slug = self.resolve_slug(card).await?;
        let index = rand::thread_rng().gen_range(1..=self.images_per_card);

        // The variant file must actually exist before we hand the URL
        // to the UI; a half-populated folder degrades to variant 1.
        let chosen = self.folder(&slug).join(format!("{index}.webp"));
        let index = if tokio::fs::metadata(&chosen).await.is_ok() {
            index
        } else {
            1
        };

        Ok(format!(
            "{base}/images/{slug}/{index}.webp",
            base = self.url_base
        ))
    }
}
