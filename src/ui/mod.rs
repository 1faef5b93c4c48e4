pub mod render;
pub mod strings;

pub use strings::{Lang, UiStrings};
