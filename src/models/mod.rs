pub mod display_text;
pub mod image_record;
pub mod view;

pub use display_text::*;
pub use image_record::*;
pub use view::*;
