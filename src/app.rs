use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::controller::PortfolioController;
use crate::source::{FileSource, HttpSource, RetryingSource, Source};
use crate::ui::{render_page, Browser};

/// Which view `show` should print.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    /// Shareable link to reproduce; takes precedence over the other fields
    pub url: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
    pub search: Option<String>,
}

pub struct FolioApp {
    config: Config,
    file: Option<PathBuf>,
}

impl FolioApp {
    /// `file`, when set, replaces the HTTP endpoint with a saved listing.
    pub fn new(config: Config, file: Option<PathBuf>) -> Self {
        Self { config, file }
    }

    fn source(&self) -> Result<RetryingSource<Source>> {
        let source = match &self.file {
            Some(path) => {
                info!("Reading image listing from {:?}", path);
                Source::File(FileSource::new(path))
            }
            None => {
                let endpoint = Url::parse(&self.config.endpoint)
                    .with_context(|| format!("Invalid endpoint URL: {}", self.config.endpoint))?;
                let http = HttpSource::new(endpoint, Duration::from_secs(self.config.timeout_secs))?;
                info!("Reading image listing from {}", http.endpoint());
                Source::Http(http)
            }
        };

        Ok(RetryingSource::new(
            source,
            self.config.retries,
            Duration::from_millis(self.config.retry_delay_ms),
        ))
    }

    /// The gallery URL to start from: a user-supplied link, or the
    /// configured site URL.
    fn location(&self, url: Option<&str>) -> Result<Url> {
        let raw = url.unwrap_or(&self.config.site_url);
        Url::parse(raw).with_context(|| format!("Invalid portfolio URL: {}", raw))
    }

    /// Relative asset bases are served from the same host as the gallery.
    fn asset_base(&self) -> String {
        let base = &self.config.asset_base;
        match Url::parse(&self.config.site_url).and_then(|site| site.join(base)) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                warn!("Cannot resolve asset base {:?}: {}", base, e);
                base.clone()
            }
        }
    }

    /// Build a controller for `url` and run its one-shot load.
    pub async fn load_controller(&self, url: Option<&str>) -> Result<PortfolioController> {
        let source = self.source()?;
        let mut controller =
            PortfolioController::new(self.location(url)?, self.config.page_size, self.asset_base());
        controller.load(&source).await;
        Ok(controller)
    }

    /// Render one page as text.
    pub async fn show(&self, request: &ViewRequest) -> Result<String> {
        let mut controller = self.load_controller(request.url.as_deref()).await?;

        if request.url.is_none() {
            if let Some(category) = &request.category {
                controller.select_category(category);
            }
            if let Some(search) = &request.search {
                controller.set_search(search);
            }
            if let Some(page) = request.page {
                controller.set_page(page);
            }
        }

        Ok(render_page(&controller, self.config.display_mode))
    }

    /// Run the interactive browser on stdin/stdout.
    pub async fn browse(&self, url: Option<&str>) -> Result<()> {
        let controller = self.load_controller(url).await?;
        let browser = Browser::new(controller, self.config.display_mode);

        let stdin = std::io::BufReader::new(std::io::stdin());
        let stdout = std::io::stdout();
        browser.run(stdin, stdout.lock()).await?;
        stdout.lock().flush().context("Failed to flush output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::DisplayMode;
    use tempfile::tempdir;

    const LISTING: &str = r#"[
        {"id": "1", "title": "Sunset Over Lake A1B2C3", "filename": "sunset.jpg", "categories": ["Landscape"]},
        {"id": "2", "title": "Heron", "filename": "heron.jpg", "categories": ["Wildlife"]},
        {"id": "3", "title": "The Photographer", "filename": "me.jpg", "categories": ["Landscape"], "is_about": true}
    ]"#;

    fn app_with_listing(dir: &std::path::Path, body: &str) -> FolioApp {
        let path = dir.join("listing.json");
        std::fs::write(&path, body).unwrap();
        let config = Config {
            site_url: "https://mindseye.example/portfolio".to_string(),
            display_mode: DisplayMode::List,
            ..Config::default()
        };
        FolioApp::new(config, Some(path))
    }

    #[tokio::test]
    async fn test_show_with_filters() {
        let dir = tempdir().unwrap();
        let app = app_with_listing(dir.path(), LISTING);

        let request = ViewRequest {
            category: Some("Landscape".to_string()),
            ..ViewRequest::default()
        };
        let page = app.show(&request).await.unwrap();

        assert!(page.contains("Sunset Over Lake\n"));
        assert!(page.contains("https://mindseye.example/data/sunset.jpg"));
        assert!(!page.contains("Heron"));
        assert!(!page.contains("The Photographer"));
        assert!(page.contains("Link: https://mindseye.example/portfolio?category=Landscape"));
    }

    #[tokio::test]
    async fn test_show_from_link_matches_flags() {
        let dir = tempdir().unwrap();
        let app = app_with_listing(dir.path(), LISTING);

        let from_flags = app
            .show(&ViewRequest {
                category: Some("Wildlife".to_string()),
                ..ViewRequest::default()
            })
            .await
            .unwrap();
        let from_link = app
            .show(&ViewRequest {
                url: Some("https://mindseye.example/portfolio?category=Wildlife".to_string()),
                ..ViewRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(from_flags, from_link);
    }

    #[tokio::test]
    async fn test_show_broken_listing_renders_error() {
        let dir = tempdir().unwrap();
        let app = app_with_listing(dir.path(), "not json");

        let page = app.show(&ViewRequest::default()).await.unwrap();
        assert!(page.contains("Error loading portfolio: malformed image listing"));
        assert!(page.contains("Explore my collection of 0 professional photographs"));
    }

    #[test]
    fn test_asset_base_resolution() {
        let mut config = Config {
            site_url: "https://mindseye.example/portfolio".to_string(),
            ..Config::default()
        };
        let app = FolioApp::new(config.clone(), None);
        assert_eq!(app.asset_base(), "https://mindseye.example/data/");

        config.asset_base = "https://cdn.example.com/img/".to_string();
        let app = FolioApp::new(config, None);
        assert_eq!(app.asset_base(), "https://cdn.example.com/img/");
    }

    #[test]
    fn test_invalid_portfolio_url() {
        let app = FolioApp::new(Config::default(), None);
        assert!(app.location(Some("not a url")).is_err());
    }
}
