/// Image asset resolution module
///
/// This module handles:
/// - Scanning the user's unlockables folder (index.rs)
/// - The bundled asset layout and path normalization (bundled.rs)
/// - Matching catalog rows to images, with collision rules (resolver.rs)

pub mod bundled;
pub mod index;
pub mod resolver;

pub use bundled::BundledAssets;
pub use index::AssetIndex;
pub use resolver::{AssetResolver, CollisionRule, MarkerRule, DEFAULT_COLLISION_RULES};
