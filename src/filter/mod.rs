//! Star-rating range filter
//!
//! Provides the `RatingsFilter` component and the pieces it is built from:
//! 1. `types` - selections and rating tiers
//! 2. `query` - turning a selection into a range query
//! 3. `props` - configuration and callbacks, including controlled mode
//! 4. `widget` - the stateful component that syncs with a `SearchStore`

pub mod props;
pub mod query;
pub mod types;
pub mod widget;

pub use props::{ChangeCallback, RatingsFilterProps, ValueGate, ValueMode};
pub use query::{CustomQuery, RANGE_BOOST, ResolvedQuery, default_query, options_from_query};
pub use types::{RatingTier, Selection, default_tiers};
pub use widget::RatingsFilter;
