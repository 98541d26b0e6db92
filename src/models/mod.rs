//! Domain models.

pub mod activity;
pub mod category;
pub mod vector;

pub use activity::ActivityEntry;
pub use category::{Category, CategoryCount};
pub use vector::Vector;

/// Key prefix under which all servable binary assets live. Requests for
/// keys outside this namespace are rejected.
pub const ASSET_NAMESPACE: &str = "assets/";

/// Fixed page size for paginated listings
pub const PAGE_SIZE: usize = 20;

/// Maximum number of activity entries kept in the store
pub const ACTIVITY_LOG_CAP: usize = 100;

/// Number of activity entries returned to the admin panel
pub const ACTIVITY_DISPLAY_LIMIT: usize = 20;

/// Window, in days, for the "recent uploads" dashboard stat
pub const RECENT_UPLOAD_DAYS: i64 = 7;

/// Bucket for vectors without a recognizable category
pub const UNCATEGORIZED: &str = "Miscellaneous";

/// The closed set of valid vector categories.
pub const CATEGORIES: [&str; 30] = [
    "Abstract",
    "Animals/Wildlife",
    "The Arts",
    "Backgrounds/Textures",
    "Beauty/Fashion",
    "Buildings/Landmarks",
    "Business/Finance",
    "Celebrities",
    "Drink",
    "Education",
    "Font",
    "Food",
    "Healthcare/Medical",
    "Holidays",
    "Icon",
    "Industrial",
    "Interiors",
    "Logo",
    "Miscellaneous",
    "Nature",
    "Objects",
    "Parks/Outdoor",
    "People",
    "Religion",
    "Science",
    "Signs/Symbols",
    "Sports/Recreation",
    "Technology",
    "Transportation",
    "Vintage",
];

/// Whether `name` is one of the valid categories.
pub fn is_valid_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}
