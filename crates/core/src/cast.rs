//! Cast reconciliation.
//!
//! A movie's cast is a set of person ids. Updating it takes the client's
//! requested id list, checks that every requested person exists, and then
//! computes the minimal add/remove delta that turns the stored cast into the
//! requested set. Members present on both sides are never touched.
//!
//! Everything here is pure; the repository layer resolves ids against the
//! database and applies the resulting [`CastDelta`] inside a transaction.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Message returned when requested actor ids do not all resolve.
pub const INVALID_ACTORS_MESSAGE: &str = "Invalid Actors assigned";

/// Deduplicate `ids`, keeping the first occurrence of each id in order.
pub fn distinct_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Requested ids (deduplicated) that have no matching resolved record.
pub fn unresolved_ids(requested: &[DbId], resolved: &[DbId]) -> Vec<DbId> {
    let resolved: HashSet<DbId> = resolved.iter().copied().collect();
    distinct_ids(requested)
        .into_iter()
        .filter(|id| !resolved.contains(id))
        .collect()
}

/// Check that the resolved people cover the requested ids exactly.
///
/// Both sides are compared as sets, so a request of `[1, 1, 2]` validates
/// the same way as `[1, 2]`.
pub fn validate_resolution(requested: &[DbId], resolved: &[DbId]) -> Result<(), CoreError> {
    let requested_count = distinct_ids(requested).len();
    let resolved_count = distinct_ids(resolved).len();
    let missing = unresolved_ids(requested, resolved);

    if requested_count == resolved_count && missing.is_empty() {
        return Ok(());
    }

    if missing.is_empty() {
        Err(CoreError::InvalidReference(INVALID_ACTORS_MESSAGE.to_string()))
    } else {
        Err(CoreError::InvalidReference(format!(
            "{INVALID_ACTORS_MESSAGE} (unknown person ids: {missing:?})"
        )))
    }
}

/// The changes needed to turn a current cast into a target cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CastDelta {
    /// Current members absent from the target.
    pub to_remove: Vec<DbId>,
    /// Target members absent from the current cast.
    pub to_add: Vec<DbId>,
}

impl CastDelta {
    /// Compute the delta between `current` and `target`.
    ///
    /// Duplicates on either side are ignored. Output order follows the
    /// order of first appearance in the respective input.
    pub fn compute(current: &[DbId], target: &[DbId]) -> Self {
        let current_set: HashSet<DbId> = current.iter().copied().collect();
        let target_set: HashSet<DbId> = target.iter().copied().collect();

        let to_remove = distinct_ids(current)
            .into_iter()
            .filter(|id| !target_set.contains(id))
            .collect();
        let to_add = distinct_ids(target)
            .into_iter()
            .filter(|id| !current_set.contains(id))
            .collect();

        Self { to_remove, to_add }
    }

    /// `true` when applying the delta would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }

    /// The cast that results from applying this delta to `current`.
    ///
    /// Surviving members keep their position; additions are appended.
    pub fn apply(&self, current: &[DbId]) -> Vec<DbId> {
        let removed: HashSet<DbId> = self.to_remove.iter().copied().collect();
        let mut result: Vec<DbId> = distinct_ids(current)
            .into_iter()
            .filter(|id| !removed.contains(id))
            .collect();
        for id in &self.to_add {
            if !result.contains(id) {
                result.push(*id);
            }
        }
        result
    }
}

/// Validate `requested` against the `resolved` people and compute the delta
/// from `current`.
///
/// The target set is the resolved people, so on success the applied cast
/// equals exactly the distinct requested ids.
pub fn reconcile(
    current: &[DbId],
    requested: &[DbId],
    resolved: &[DbId],
) -> Result<CastDelta, CoreError> {
    validate_resolution(requested, resolved)?;
    Ok(CastDelta::compute(current, resolved))
}
