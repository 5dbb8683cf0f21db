//! Widgets for the ratings browser

mod key_hints;
mod query_pane;
mod ratings_list;

pub use key_hints::{DEFAULT_HINTS, KeyHints};
pub use query_pane::{QueryPane, query_json};
pub use ratings_list::{MAX_STARS, RatingsList, filled_stars, scroll_offset, tier_at};
