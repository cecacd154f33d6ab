//! Canonical activity model and the rules that produce it from raw records.

pub mod category;
pub mod countdown;
pub mod normalize;
pub mod types;

pub use category::{CategoryTranslator, tag_matches, tags};
pub use countdown::{CountdownState, countdown_state, parse_end_date};
pub use normalize::{RecordNormalizer, RecordPredicate, field_equals};
pub use types::{CanonicalActivity, RawRecord};
