//! Filtering and pagination over the fetched portfolio.
//!
//! `PortfolioController` owns the image list for one gallery, derives the
//! visible page from `(images, category, search, page)` and keeps a
//! shareable URL describing that page. The URL is rewritten in place on
//! every state change; there is no history of previous URLs.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};
use url::Url;

use super::url_state::UrlState;
use super::ALL_CATEGORY;
use crate::models::{clean_display_text, DisplayImage, ImageRecord, PortfolioView};
use crate::source::ImageSource;

/// Outcome of the one-shot listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

pub struct PortfolioController {
    images: Vec<ImageRecord>,
    state: UrlState,
    page_size: usize,
    asset_base: String,
    location: Url,
    load_state: LoadState,
}

impl PortfolioController {
    /// Create a controller for the gallery at `location`, seeding category,
    /// page and search from its query string.
    pub fn new(location: Url, page_size: usize, asset_base: impl Into<String>) -> Self {
        let state = UrlState::from_url(&location);
        debug!(
            "Seeded view state from {}: category={:?} page={} search={:?}",
            location, state.category, state.page, state.search
        );

        Self {
            images: Vec::new(),
            state,
            page_size: page_size.max(1),
            asset_base: asset_base.into(),
            location,
            load_state: LoadState::Pending,
        }
    }

    /// Fetch the image listing once.
    ///
    /// Failures leave the gallery empty and are recorded in the load state.
    /// Calling this again after the first fetch has settled does nothing.
    pub async fn load<S: ImageSource>(&mut self, source: &S) -> &LoadState {
        if self.is_loaded() {
            debug!("Image listing already loaded, ignoring repeated load");
            return &self.load_state;
        }

        match source.fetch().await {
            Ok(records) => {
                self.install(records);
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                warn!("Error loading portfolio: {}", e);
                self.images.clear();
                self.load_state = LoadState::Failed(e.to_string());
            }
        }

        self.reconcile_seeded_state();
        self.sync_url();
        &self.load_state
    }

    fn install(&mut self, records: Vec<ImageRecord>) {
        let received = records.len();
        self.images = records.into_iter().filter(|r| !r.is_about).collect();
        info!(
            "Loaded {} portfolio images ({} about images excluded)",
            self.images.len(),
            received - self.images.len()
        );
    }

    /// Bring URL-seeded state in line with what was actually fetched.
    fn reconcile_seeded_state(&mut self) {
        if self.state.category != ALL_CATEGORY
            && !self.images.iter().any(|i| i.has_category(&self.state.category))
        {
            warn!(
                "Unknown category {:?} in URL, showing all images",
                self.state.category
            );
            self.state.category = ALL_CATEGORY.to_string();
            self.state.page = 1;
        }
        self.state.page = self.clamp_page(self.state.page);
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state != LoadState::Pending
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn selected_category(&self) -> &str {
        &self.state.category
    }

    pub fn current_page(&self) -> usize {
        self.state.page
    }

    /// `"All"` followed by every distinct category tag, sorted.
    pub fn categories(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .images
            .iter()
            .flat_map(|i| i.categories.iter().map(String::as_str))
            .filter(|tag| *tag != ALL_CATEGORY)
            .collect();

        std::iter::once(ALL_CATEGORY.to_string())
            .chain(tags.into_iter().map(str::to_string))
            .collect()
    }

    /// Image count per entry of [`categories`](Self::categories), in the
    /// same order. Search does not affect these counts.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for image in &self.images {
            let tags: BTreeSet<&str> = image.categories.iter().map(String::as_str).collect();
            for tag in tags {
                *counts.entry(tag).or_default() += 1;
            }
        }

        self.categories()
            .into_iter()
            .map(|category| {
                let count = if category == ALL_CATEGORY {
                    self.images.len()
                } else {
                    counts.get(category.as_str()).copied().unwrap_or(0)
                };
                (category, count)
            })
            .collect()
    }

    /// Switch category and go back to the first page.
    ///
    /// A category nobody carries just produces an empty page.
    pub fn select_category(&mut self, category: &str) {
        self.state.category = if category.is_empty() {
            ALL_CATEGORY.to_string()
        } else {
            category.to_string()
        };
        self.state.page = 1;
        debug!("Selected category {:?}", self.state.category);
        self.sync_url();
    }

    /// Jump to `page`, clamped into the range of existing pages once the
    /// listing has loaded.
    pub fn set_page(&mut self, page: usize) {
        let clamped = self.clamp_page(page);
        if clamped != page {
            debug!("Requested page {} clamped to {}", page, clamped);
        }
        self.state.page = clamped;
        self.sync_url();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.page.saturating_sub(1));
    }

    /// Filter by a free-text term and go back to the first page.
    pub fn set_search(&mut self, term: &str) {
        self.state.search = term.trim().to_string();
        self.state.page = 1;
        debug!("Search term set to {:?}", self.state.search);
        self.sync_url();
    }

    /// `ceil(filtered / page_size)`; zero when nothing matches.
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// The visible page.
    pub fn view(&self) -> PortfolioView {
        let filtered = self.filtered();
        let start = (self.state.page - 1).saturating_mul(self.page_size);

        let page_images = filtered
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|image| self.display_image(image))
            .collect();

        PortfolioView {
            page_images,
            total_count: self.images.len(),
            filtered_count: filtered.len(),
            total_pages: filtered.len().div_ceil(self.page_size),
            current_page: self.state.page,
            page_size: self.page_size,
            selected_category: self.state.category.clone(),
            search: self.state.search.clone(),
        }
    }

    /// Link reproducing the current view.
    pub fn shareable_url(&self) -> &Url {
        &self.location
    }

    fn filtered(&self) -> Vec<&ImageRecord> {
        let needle = self.state.search.to_lowercase();

        self.images
            .iter()
            .filter(|image| {
                self.state.category == ALL_CATEGORY || image.has_category(&self.state.category)
            })
            .filter(|image| needle.is_empty() || matches_search(image, &needle))
            .collect()
    }

    fn display_image(&self, image: &ImageRecord) -> DisplayImage {
        DisplayImage {
            id: image.id.clone(),
            title: clean_display_text(&image.title),
            description: clean_display_text(&image.description),
            categories: image.categories.clone(),
            display_url: image.display_url(&self.asset_base),
        }
    }

    fn clamp_page(&self, page: usize) -> usize {
        if !self.is_loaded() {
            return page.max(1);
        }
        page.clamp(1, self.total_pages().max(1))
    }

    fn sync_url(&mut self) {
        self.state.apply(&mut self.location);
        debug!("URL replaced with {}", self.location);
    }
}

fn matches_search(image: &ImageRecord, needle: &str) -> bool {
    clean_display_text(&image.title)
        .to_lowercase()
        .contains(needle)
        || clean_display_text(&image.description)
            .to_lowercase()
            .contains(needle)
}
