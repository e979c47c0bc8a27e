/// Sentinel category that asks for an extra free-text detail
pub const OTHER_CATEGORY: &str = "other";

/// Categories offered by the entry form
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "food",
    "transport",
    "housing",
    "utilities",
    "entertainment",
    "salary",
    OTHER_CATEGORY,
];

pub fn is_other(category: &str) -> bool {
    category.trim().eq_ignore_ascii_case(OTHER_CATEGORY)
}
