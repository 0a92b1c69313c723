//! Text normalization and keyword extraction.
//!
//! Pure string predicates used by the turn validator. These are
//! deliberately low-precision pattern matches, not NLP: the goal is to
//! catch obviously weak turns, not to grade quality.

pub mod keywords;
pub mod normalize;

pub use keywords::{extract_keywords, has_keyword_hit};
pub use normalize::normalize_for_comparison;
