// Text rendering of a portfolio page
// One renderer for both layouts: a compact title grid and a detailed list

use std::fmt::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::controller::{LoadState, PortfolioController, ALL_CATEGORY};
use crate::models::{DisplayImage, PortfolioView};

/// Grid columns in grid mode
const GRID_COLUMNS: usize = 3;

/// Width of one grid cell, in characters
const CELL_WIDTH: usize = 28;

/// How page images are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Grid,
    List,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Render the controller's current page as text.
pub fn render_page(controller: &PortfolioController, mode: DisplayMode) -> String {
    let mut out = String::new();
    let view = controller.view();

    let _ = writeln!(out, "Portfolio");
    let _ = writeln!(
        out,
        "Explore my collection of {} professional photographs",
        view.total_count
    );
    out.push('\n');

    match controller.load_state() {
        LoadState::Pending => {
            let _ = writeln!(out, "Loading portfolio...");
            return out;
        }
        LoadState::Failed(error) => {
            let _ = writeln!(out, "Error loading portfolio: {}", error);
            return out;
        }
        LoadState::Loaded => {}
    }

    let _ = writeln!(
        out,
        "{}",
        category_bar(&controller.category_counts(), &view.selected_category)
    );
    let _ = writeln!(out, "{}", results_line(&view));
    out.push('\n');

    if view.is_empty() {
        let _ = writeln!(out, "{}", empty_message(&view));
    } else {
        match mode {
            DisplayMode::Grid => render_grid(&mut out, &view.page_images),
            DisplayMode::List => render_list(&mut out, &view),
        }
    }

    if view.total_pages > 1 {
        out.push('\n');
        let _ = writeln!(out, "{}", pagination_bar(&view));
    }

    out.push('\n');
    let _ = writeln!(out, "Link: {}", controller.shareable_url());
    out
}

/// Category filter buttons with image counts; the selected one in brackets.
pub fn category_bar(counts: &[(String, usize)], selected: &str) -> String {
    counts
        .iter()
        .map(|(category, count)| {
            if category == selected {
                format!("[{} ({})]", category, count)
            } else {
                format!(" {} ({}) ", category, count)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn results_line(view: &PortfolioView) -> String {
    let mut line = format!(
        "Showing {} of {} images",
        view.page_images.len(),
        view.filtered_count
    );
    if view.selected_category != ALL_CATEGORY {
        let _ = write!(line, " in \"{}\" category", view.selected_category);
    }
    if !view.search.is_empty() {
        let _ = write!(line, " matching \"{}\"", view.search);
    }
    if view.total_pages > 1 {
        let _ = write!(line, " (Page {} of {})", view.current_page, view.total_pages);
    }
    line
}

pub fn empty_message(view: &PortfolioView) -> String {
    if view.search.is_empty() {
        format!("No images found in \"{}\"", view.selected_category)
    } else {
        format!("No images found for \"{}\"", view.search)
    }
}

/// Previous/next controls around the page numbers, current page bracketed.
pub fn pagination_bar(view: &PortfolioView) -> String {
    let mut parts = Vec::new();
    if view.has_prev() {
        parts.push("< Prev".to_string());
    }
    for page in 1..=view.display_pages() {
        if page == view.current_page {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    if view.has_next() {
        parts.push("Next >".to_string());
    }
    parts.join(" ")
}

fn render_grid(out: &mut String, images: &[DisplayImage]) {
    for row in images.chunks(GRID_COLUMNS) {
        let line = row
            .iter()
            .map(|image| {
                let title = truncate(&image.title, CELL_WIDTH - 2);
                format!("{:<width$}", title, width = CELL_WIDTH)
            })
            .collect::<String>();
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn render_list(out: &mut String, view: &PortfolioView) {
    let first = (view.current_page - 1) * view.page_size;
    for (i, image) in view.page_images.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", first + i + 1, image.title);
        if !image.description.is_empty() {
            let _ = writeln!(out, "     {}", image.description);
        }
        if !image.categories.is_empty() {
            let _ = writeln!(out, "     {}", image.categories.join(", "));
        }
        let _ = writeln!(out, "     {}", image.display_url);
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}
