//! Paragraph segmentation and prose cleanup for assembled reports.

pub mod sanitize;
pub mod segmenter;

pub use sanitize::{clean, contains_emoji, contains_markup, contains_placeholder};
pub use segmenter::{rejoin, squeeze_blank_lines, Segmenter};
