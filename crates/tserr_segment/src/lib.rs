//! tserr_segment: Message segmentation for TypeScript diagnostics.
//!
//! Splits a raw diagnostic message into an ordered sequence of text and
//! code segments. Quoted spans are matched with nesting-aware delimiter
//! tracking and classified as either genuine type syntax (worth running
//! through a code formatter) or plain quoted text.

pub mod classifier;
pub mod matcher;
pub mod segmenter;

pub use classifier::is_pure_type_literal;
pub use matcher::find_closing_quote;
pub use segmenter::segment_message;
