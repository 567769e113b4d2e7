//! Chronological merge of feed producers.
//!
//! # Invariants
//! - Output length equals the sum of all producer lengths.
//! - Output is sorted non-increasing by timestamp (most recent first).
//! - Equal timestamps keep producer order, then in-producer order.

use crate::model::item::DatedItem;
use crate::source::FeedSource;
use std::cmp::Reverse;

/// Merges every producer's items into one sequence, most recent first.
pub fn aggregate<'a>(sources: &[&'a dyn FeedSource]) -> Vec<DatedItem<'a>> {
    let mut items: Vec<DatedItem<'a>> = Vec::new();
    for source in sources.iter().copied() {
        let produced = source.items();
        log::trace!(
            "event=feed_collect module=feed status=ok source={} items={}",
            source.source_name(),
            produced.len()
        );
        items.extend(produced);
    }
    // Stable sort: ties stay in input order.
    items.sort_by_key(|item| Reverse(item.timestamp()));
    log::trace!(
        "event=feed_aggregate module=feed status=ok sources={} items={}",
        sources.len(),
        items.len()
    );
    items
}

#[cfg(test)]
mod tests {
    use super::aggregate;
    use crate::model::item::DatedItem;
    use crate::model::journal::JournalEntry;
    use crate::source::FeedSource;

    struct Fixed(Vec<JournalEntry>);

    impl FeedSource for Fixed {
        fn source_name(&self) -> &'static str {
            "fixed"
        }

        fn items(&self) -> Vec<DatedItem<'_>> {
            self.0.iter().map(DatedItem::Journal).collect()
        }
    }

    fn texts(items: &[DatedItem<'_>]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                DatedItem::Journal(entry) => entry.text.clone(),
                other => panic!("unexpected item {other:?}"),
            })
            .collect()
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let first = Fixed(vec![JournalEntry::new(5, "a"), JournalEntry::new(5, "b")]);
        let second = Fixed(vec![JournalEntry::new(5, "c"), JournalEntry::new(9, "d")]);

        let items = aggregate(&[&first, &second]);
        assert_eq!(texts(&items), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn no_sources_yield_an_empty_feed() {
        assert!(aggregate(&[]).is_empty());
    }
}
