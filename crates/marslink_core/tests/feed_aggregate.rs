use marslink_core::{
    aggregate, DatedItem, FeedSource, JournalEntry, JournalLoader, Message, Pathfinder, User,
    WeatherScanner,
};

struct Messages(Vec<Message>);

impl FeedSource for Messages {
    fn source_name(&self) -> &'static str {
        "messages"
    }

    fn items(&self) -> Vec<DatedItem<'_>> {
        self.0.iter().map(DatedItem::Message).collect()
    }
}

fn journal_with_dates(dates: &[i64]) -> JournalLoader {
    let entries: Vec<JournalEntry> = dates
        .iter()
        .map(|date| JournalEntry::new(*date, format!("entry {date}")))
        .collect();
    let json = serde_json::to_string(&entries).expect("serialize entries");
    let mut loader = JournalLoader::new();
    loader.load_json(&json).expect("load entries");
    loader
}

#[test]
fn output_length_is_the_sum_of_all_producers() {
    let journal = journal_with_dates(&[3, 1, 4, 1, 5]);
    let weather = WeatherScanner::new(2);
    let pathfinder = Pathfinder::new(9_000_000_000);

    let items = aggregate(&[&journal, &weather, &pathfinder]);
    assert_eq!(
        items.len(),
        journal.entries().len() + 1 + pathfinder.messages().len()
    );
}

#[test]
fn output_is_sorted_most_recent_first() {
    let dates = [17, -4, 250, 0, 99, 99, 3_000, -800];
    let journal = journal_with_dates(&dates);
    let weather = WeatherScanner::new(100);
    let lewis = User::new(2, "cpt.lewis");
    let messages = Messages(vec![
        Message::new(42, "a", lewis.clone()),
        Message::new(1_000, "b", lewis),
    ]);

    let items = aggregate(&[&journal, &weather, &messages]);
    let timestamps: Vec<i64> = items.iter().map(DatedItem::timestamp).collect();
    assert!(timestamps.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(timestamps.first(), Some(&3_000));
    assert_eq!(timestamps.last(), Some(&-800));
}

#[test]
fn aggregation_does_not_touch_sources() {
    let journal = journal_with_dates(&[1, 2]);
    let before = journal.entries().to_vec();
    let _ = aggregate(&[&journal]);
    assert_eq!(journal.entries(), before.as_slice());
}

#[test]
fn ties_across_producers_keep_producer_order() {
    let journal = journal_with_dates(&[50]);
    let messages = Messages(vec![Message::new(50, "same time", User::new(2, "cpt.lewis"))]);

    let items = aggregate(&[&messages, &journal]);
    assert!(matches!(items[0], DatedItem::Message(_)));
    assert!(matches!(items[1], DatedItem::Journal(_)));
}
