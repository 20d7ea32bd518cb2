//! crates/recovery_companion_core/src/favorites.rs
//!
//! Merges the persisted favorite set into freshly parsed guide sections so
//! favorite status survives regeneration.

use crate::domain::{FavoriteSet, GuideSection};

/// Marks each section favorite exactly when its title is in `favorites`.
///
/// Matching is by exact title string equality. A title that drifts between
/// regenerations (different model wording) silently loses its favorite
/// flag; this is a known fidelity limit of title-based matching, kept as
/// specified. Pure and side-effect-free: persisting the set is the
/// caller's responsibility.
pub fn reconcile(sections: Vec<GuideSection>, favorites: &FavoriteSet) -> Vec<GuideSection> {
    sections
        .into_iter()
        .map(|mut section| {
            section.is_favorite = favorites.contains(&section.title);
            section
        })
        .collect()
}
