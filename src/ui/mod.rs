//! Terminal front end for the portfolio.
//!
//! This module provides:
//! - `render_page` - Text rendering of one page in grid or list layout
//! - `Command` / `parse_command` - Input bindings for the browser
//! - `Browser` - Interactive command loop over a loaded controller

pub mod browser;
pub mod keybindings;
pub mod render;

pub use browser::Browser;
pub use render::{render_page, DisplayMode};
