use discovery_core::{ItemId, MediaKind};

pub const POSTER_SIZE: &str = "w500";
pub const THUMBNAIL_SIZE: &str = "w92";
pub const BACKDROP_SIZE: &str = "w1280";

/// Turns provider image paths and ids into absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    pub image_base: String,
    pub embed_base: String,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self {
            image_base: "https://image.tmdb.org/t/p".to_string(),
            embed_base: "https://vidsrc.to/embed".to_string(),
        }
    }
}

impl AssetResolver {
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        let path = path.filter(|path| !path.is_empty())?;
        let separator = if path.starts_with('/') { "" } else { "/" };
        Some(format!(
            "{}/{size}{separator}{path}",
            self.image_base.trim_end_matches('/')
        ))
    }

    pub fn poster_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, POSTER_SIZE)
    }

    pub fn thumbnail_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, THUMBNAIL_SIZE)
    }

    pub fn backdrop_url(&self, path: Option<&str>) -> Option<String> {
        self.image_url(path, BACKDROP_SIZE)
    }

    /// URL of the external player page for a title.
    pub fn embed_url(&self, kind: MediaKind, id: ItemId) -> String {
        let segment = match kind {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        };
        format!("{}/{segment}/{id}", self.embed_base.trim_end_matches('/'))
    }
}
