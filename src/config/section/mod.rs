//! Configuration section definitions.

mod categories;
mod content;
mod listing;
mod nav;
mod watch;

pub use categories::CategoriesConfig;
pub use content::ContentConfig;
pub use listing::ListingConfig;
pub use nav::NavConfig;
pub use watch::WatchConfig;
