//! Attach/detach planning for the shop ↔ article association.
//!
//! The only authoritative record of the association is the `shop_id` column
//! on the article row (the owning side). A shop's collection is always
//! derived by query, so the two directions cannot drift apart; what needs
//! care is applying a client-supplied article list to a shop. Every such
//! write goes through [`diff_articles`], and the repository applies the
//! resulting delta in one transaction:
//!
//! - attached ids get `shop_id` set to the shop;
//! - detached ids get `shop_id` cleared **only where it still points at the
//!   shop** (`WHERE shop_id = $shop`), so an article that was concurrently
//!   reassigned to another shop keeps its new owner.

use std::collections::HashSet;

use crate::types::DbId;

/// The article ids to attach to and detach from a shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationDelta {
    /// Ids present in the desired list but not currently attached.
    pub attach: Vec<DbId>,
    /// Ids currently attached but absent from the desired list.
    pub detach: Vec<DbId>,
}

impl AssociationDelta {
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Compute the delta that turns `current` (the shop's attached article ids)
/// into `desired` (the write view's article list).
///
/// Duplicate ids in `desired` count once; relative order of first
/// occurrences is preserved so the applied SQL is deterministic.
pub fn diff_articles(current: &[DbId], desired: &[DbId]) -> AssociationDelta {
    let current_set: HashSet<DbId> = current.iter().copied().collect();

    let mut seen: HashSet<DbId> = HashSet::with_capacity(desired.len());
    let mut attach = Vec::new();
    for &id in desired {
        if seen.insert(id) && !current_set.contains(&id) {
            attach.push(id);
        }
    }

    let detach = current
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    AssociationDelta { attach, detach }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_lists_produce_empty_delta() {
        let delta = diff_articles(&[1, 2, 3], &[1, 2, 3]);
        assert!(delta.is_empty());
    }

    #[test]
    fn new_ids_are_attached() {
        let delta = diff_articles(&[1], &[1, 2, 3]);
        assert_eq!(delta.attach, vec![2, 3]);
        assert!(delta.detach.is_empty());
    }

    #[test]
    fn missing_ids_are_detached() {
        let delta = diff_articles(&[1, 2, 3], &[2]);
        assert!(delta.attach.is_empty());
        assert_eq!(delta.detach, vec![1, 3]);
    }

    #[test]
    fn full_replacement_swaps_both_sides() {
        let delta = diff_articles(&[1, 2], &[3, 4]);
        assert_eq!(delta.attach, vec![3, 4]);
        assert_eq!(delta.detach, vec![1, 2]);
    }

    #[test]
    fn duplicates_in_desired_count_once() {
        let delta = diff_articles(&[], &[5, 5, 6, 5]);
        assert_eq!(delta.attach, vec![5, 6]);
    }

    #[test]
    fn empty_desired_detaches_everything() {
        let delta = diff_articles(&[7, 8], &[]);
        assert_eq!(delta.detach, vec![7, 8]);
    }
}
