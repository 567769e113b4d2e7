//! Section-level change sets between two renders.

use crate::model::item::ItemKey;
use serde::Serialize;
use std::collections::BTreeSet;

/// Sections that appeared or disappeared between two renders.
///
/// Keys are listed in the order they occur in their respective render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedDiff {
    pub inserted: Vec<ItemKey>,
    pub deleted: Vec<ItemKey>,
}

impl FeedDiff {
    pub fn between(old: &[ItemKey], new: &[ItemKey]) -> Self {
        let old_keys: BTreeSet<&ItemKey> = old.iter().collect();
        let new_keys: BTreeSet<&ItemKey> = new.iter().collect();
        Self {
            inserted: new
                .iter()
                .filter(|key| !old_keys.contains(key))
                .copied()
                .collect(),
            deleted: old
                .iter()
                .filter(|key| !new_keys.contains(key))
                .copied()
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.deleted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::FeedDiff;
    use crate::model::item::{ItemKey, ItemKind};

    fn key(kind: ItemKind, date: i64) -> ItemKey {
        ItemKey { kind, date }
    }

    #[test]
    fn reports_new_and_vanished_sections() {
        let old = [key(ItemKind::Weather, 10), key(ItemKind::Journal, 5)];
        let new = [key(ItemKind::Message, 20), key(ItemKind::Weather, 10)];

        let diff = FeedDiff::between(&old, &new);
        assert_eq!(diff.inserted, vec![key(ItemKind::Message, 20)]);
        assert_eq!(diff.deleted, vec![key(ItemKind::Journal, 5)]);
    }

    #[test]
    fn identical_renders_produce_an_empty_diff() {
        let keys = [key(ItemKind::Journal, 1)];
        assert!(FeedDiff::between(&keys, &keys).is_empty());
    }
}
