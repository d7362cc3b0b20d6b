/// Filtering and sorting of displayed unlockables
///
/// - What the user asked for (criteria.rs)
/// - What is displayed (item.rs)
/// - The sort-then-annotate pass (pipeline.rs)

pub mod criteria;
pub mod item;
pub mod pipeline;

pub use criteria::{FilterCriteria, SortKey};
pub use item::{DisplayItem, UnlockableItem};
pub use pipeline::{apply, visible};
