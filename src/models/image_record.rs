use serde::Deserialize;

/// Identifier as emitted by the backend. Older endpoints send integers,
/// newer ones send UUID strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One entry of the image-listing response before normalization.
///
/// The listing endpoint sends `filename` and its legacy alias `image` side by
/// side, and nulls where a field is unset.
#[derive(Debug, Deserialize)]
struct WireImage {
    id: WireId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    is_about: Option<bool>,
}

/// An image as received from the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireImage")]
pub struct ImageRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub filename: String,
    pub url: Option<String>,
    pub categories: Vec<String>,
    pub is_about: bool,
}

impl From<WireImage> for ImageRecord {
    fn from(wire: WireImage) -> Self {
        let id = wire.id.into_string();
        let title = match wire.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => format!("Image {}", id),
        };

        Self {
            title,
            description: wire.description.unwrap_or_default(),
            filename: wire.filename.or(wire.image).unwrap_or_default(),
            url: wire.url.filter(|url| !url.trim().is_empty()),
            categories: normalize_tags(wire.categories.unwrap_or_default()),
            is_about: wire.is_about.unwrap_or(false),
            id,
        }
    }
}

/// Trim tags and drop empty or repeated ones, keeping first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

impl ImageRecord {
    /// Create a portfolio image with just the fields the gallery needs
    #[cfg(test)]
    pub fn new(id: impl Into<String>, title: impl Into<String>, categories: &[&str]) -> Self {
        let id = id.into();
        Self {
            filename: format!("{}.jpg", id),
            id,
            title: title.into(),
            description: String::new(),
            url: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            is_about: false,
        }
    }

    /// Check whether this image carries the given category tag
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Reference used to display the image.
    ///
    /// A server-provided absolute `url` wins; otherwise the filename is
    /// joined onto `asset_base` with exactly one slash between them.
    pub fn display_url(&self, asset_base: &str) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        if asset_base.is_empty() {
            return self.filename.clone();
        }
        format!(
            "{}/{}",
            asset_base.trim_end_matches('/'),
            self.filename.trim_start_matches('/')
        )
    }
}
