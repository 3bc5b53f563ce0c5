//! Category table of the wildlife classifier

pub const CATEGORY_COUNT: usize = 5;

pub const CATEGORY_LABELS: [&str; CATEGORY_COUNT] = ["fox", "bear", "deer", "crocodile", "wolf"];

pub const UNKNOWN_LABEL: &str = "unknown";

pub fn label_for(index: usize) -> &'static str {
    CATEGORY_LABELS.get(index).copied().unwrap_or(UNKNOWN_LABEL)
}
