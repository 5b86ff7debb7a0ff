//! Matching strategies for history search.
//!
//! Four interchangeable strategies behind one capability interface:
//! exact substring, fuzzy similarity, word-token, and a hybrid that
//! composes the other three. All are pure over (record, query) and safe
//! to share across threads.

pub mod exact;
pub mod fuzzy;
pub mod hybrid;
pub mod merge;
pub mod similarity;
pub mod strategy;
pub mod word_token;

pub use exact::ExactStrategy;
pub use fuzzy::FuzzyStrategy;
pub use hybrid::HybridStrategy;
pub use merge::merge_overlapping;
pub use strategy::SearchStrategy;
pub use word_token::WordTokenStrategy;
