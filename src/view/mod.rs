//! HTML presentation: markup helpers, page framing and themes.

pub mod frame;
pub mod markup;
pub mod theme;

pub use frame::{default_header, HeaderFn};
pub use markup::{escape_html, highlight, treat_as_code};
pub use theme::{Theme, UnknownTheme};
