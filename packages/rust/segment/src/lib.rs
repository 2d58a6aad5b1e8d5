//! Entry segmentation for scanned reference dictionaries.
//!
//! Recovers the implicit entry structure of extracted document text from
//! typographic cues alone:
//! - [`HeadingPredicate`] / [`HeadingRule`]: which lines open an entry
//! - [`Segmenter`]: the line fold building the ordered [`EntryMap`]
//! - [`split_paragraphs`]: blank-line paragraph boundaries within a body
//!
//! [`EntryMap`]: toponymy_shared::EntryMap

pub mod heading;
pub mod paragraph;
pub mod segmenter;

pub use heading::{HeadingPredicate, HeadingRule};
pub use paragraph::{entry_paragraphs, split_paragraphs};
pub use segmenter::{Segmenter, segment, segment_lines};
