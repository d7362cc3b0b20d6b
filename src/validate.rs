//! Checks on user-entered values.
//!
//! Parse failures are never errors here; they turn into `false` or into the
//! name of the offending item.

use std::path::Path;

use crate::filter::DisplayItem;

/// Largest tier or subtier magnitude accepted
pub const MAX_TIER: i64 = 999;

pub const MIN_UI_SCALE: i64 = 70;
pub const MAX_UI_SCALE: i64 = 100;

/// Names of items whose tiers are not integers or exceed `MAX_TIER`.
///
/// Keeps item order and does not remove duplicate names.
pub fn verify_tiers<T: DisplayItem>(items: &[T]) -> Vec<String> {
    items
        .iter()
        .filter(|item| match item.tiers() {
            Ok((tier, subtier)) => {
                !(-MAX_TIER..=MAX_TIER).contains(&tier) || !(-MAX_TIER..=MAX_TIER).contains(&subtier)
            }
            Err(_) => true,
        })
        .map(|item| item.unlockable().name.clone())
        .collect()
}

/// Integer syntax with no range limit: optional sign, then ASCII digits
pub fn is_integer_text(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Width and height must be integers, UI scale an integer within 70..=100
pub fn verify_settings_resolution(width: &str, height: &str, ui_scale: &str) -> bool {
    if !is_integer_text(width) || !is_integer_text(height) {
        return false;
    }
    // Anything too large for i64 is out of range anyway
    match ui_scale.trim().parse::<i64>() {
        Ok(scale) => (MIN_UI_SCALE..=MAX_UI_SCALE).contains(&scale),
        Err(_) => false,
    }
}

pub fn verify_path_is_directory(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}
