/// An image as it is shown on a portfolio page, with display text cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub display_url: String,
}

/// One page of the filtered portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioView {
    pub page_images: Vec<DisplayImage>,
    /// Portfolio images after excluding about images
    pub total_count: usize,
    /// Images matching the selected category and search
    pub filtered_count: usize,
    /// `ceil(filtered_count / page_size)`, zero when nothing matches
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub selected_category: String,
    pub search: String,
}

impl PortfolioView {
    /// Number of pages to present; an empty result still shows one page.
    pub fn display_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.page_images.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}
