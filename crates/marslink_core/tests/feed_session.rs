use marslink_core::{
    FeedConfig, FeedSession, ItemKind, JournalLoader, MessagesObserver, Pathfinder, RenderedCell,
    SelectionEffect, StrategyKind, WeatherScanner, WeatherSnapshot,
};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

const START: i64 = 1_700_000_000_000;

fn session() -> FeedSession {
    FeedSession::new(FeedConfig::starting_at(START)).expect("session should open")
}

fn weather_section(session: &FeedSession) -> usize {
    session
        .sections()
        .iter()
        .position(|section| section.key().kind == ItemKind::Weather)
        .expect("weather section present")
}

#[test]
fn opens_with_weather_journal_and_history_sorted() {
    let session = session();
    let sections = session.sections();

    assert_eq!(
        sections.len(),
        1 + session.journal().entries().len() + session.pathfinder().messages().len()
    );
    assert_eq!(sections[0].key().kind, ItemKind::Weather);
    assert!(sections
        .windows(2)
        .all(|pair| pair[0].key().date >= pair[1].key().date));
}

#[test]
fn scripted_messages_refresh_the_feed() {
    let mut session = session();
    assert!(session.connect());

    assert!(session.advance(1_000).is_none());
    let diff = session.advance(1_300).expect("first message triggers refresh");
    assert_eq!(diff.inserted.len(), 1);
    assert_eq!(diff.inserted[0].kind, ItemKind::Message);
    assert_eq!(diff.inserted[0].date, START + 2_300);
    assert!(diff.deleted.is_empty());

    let top = session.sections()[0].strategy().render(0);
    assert_eq!(top.primary_text(), "Liftoff in 3...");
}

#[test]
fn countdown_ends_on_top_of_the_feed() {
    let mut session = session();
    session.connect();
    while let Some(wait) = session.next_due_in() {
        session.advance(wait);
    }

    let latest: Vec<String> = session.sections()[..3]
        .iter()
        .map(|section| section.strategy().render(0).primary_text().to_string())
        .collect();
    assert_eq!(latest, vec!["1...", "2...", "Liftoff in 3..."]);
    assert_eq!(session.pathfinder().messages().len(), 5);
}

#[test]
fn weather_expansion_survives_refresh() {
    let mut session = session();
    let index = weather_section(&session);

    assert_eq!(session.select(index, 0), SelectionEffect::ReloadSection);
    session.connect();
    session.advance(2_300).expect("refresh after first message");

    let index = weather_section(&session);
    let strategy = session.sections()[index].strategy();
    assert_eq!(strategy.kind(), StrategyKind::Weather);
    assert_eq!(strategy.item_count(), 5);
}

#[test]
fn rows_flatten_every_cell_with_sizes() {
    let mut session = session();
    let index = weather_section(&session);
    session.select(index, 0);

    let rows = session.rows();
    let expected: usize = session
        .sections()
        .iter()
        .map(|section| section.strategy().item_count())
        .sum();
    assert_eq!(rows.len(), expected);
    assert!(rows
        .iter()
        .all(|row| row.size.width == session.config().container_width));

    let high = rows
        .iter()
        .find(|row| row.section == index && row.index == 3)
        .expect("expanded weather high row");
    assert_eq!(
        high.cell,
        RenderedCell::WeatherDetail {
            title: "HIGH".to_string(),
            detail: format!("{} C", session.weather().current_weather().high),
        }
    );
    assert_eq!(high.section_insets.bottom, 15.0);
}

#[test]
fn selecting_unknown_cells_is_ignored() {
    let mut session = session();
    assert_eq!(session.select(999, 0), SelectionEffect::None);
    let index = weather_section(&session);
    assert_eq!(session.select(index, 4), SelectionEffect::None);
}

#[test]
fn host_observers_share_notifications() {
    #[derive(Default)]
    struct Seen(Cell<usize>);

    impl MessagesObserver for Seen {
        fn on_items_changed(&self, _source: &Pathfinder) {
            self.0.set(self.0.get() + 1);
        }
    }

    let seen = Rc::new(Seen::default());
    let observer: Rc<dyn MessagesObserver> = seen.clone();
    let mut session = session();
    session.register_observer(&observer);
    session.connect();
    session.advance(10_000);

    assert_eq!(seen.0.get(), 3);
}

#[test]
fn custom_sources_and_width_are_respected() {
    let mut config = FeedConfig::starting_at(START).with_container_width(320.0);
    config.landing_ms = Some(START - 10 * marslink_core::SOL_MS);
    let mut journal = JournalLoader::new();
    journal
        .load_json(&format!(r#"[{{"date": {START}, "text": "Sol ten."}}]"#))
        .expect("journal json");
    let weather = WeatherScanner::with_snapshot(WeatherSnapshot {
        date: START - 1,
        sunrise: "06:00".to_string(),
        sunset: "18:00".to_string(),
        high: 10,
        low: -5,
    });

    let mut session =
        FeedSession::with_sources(config, journal, weather, Pathfinder::with_messages(START, vec![]))
            .expect("session should open");
    assert_eq!(session.sections().len(), 2);
    assert_eq!(
        session.sections()[0].strategy().render(0),
        RenderedCell::JournalDate {
            text: "SOL 10".to_string()
        }
    );
    assert!(session.rows().iter().all(|row| row.size.width == 320.0));

    session
        .set_container_width(-1.0)
        .expect_err("negative width must be rejected");
    assert_eq!(session.config().container_width, 320.0);
}

#[test]
fn invalid_config_is_rejected() {
    let config = FeedConfig::starting_at(START).with_container_width(f64::NAN);
    assert!(FeedSession::new(config).is_err());
}

#[test]
fn extreme_session_starts_are_rejected() {
    assert!(FeedSession::new(FeedConfig::starting_at(i64::MIN)).is_err());
    assert!(FeedSession::new(FeedConfig::starting_at(i64::MAX)).is_err());
}

#[test]
fn rows_and_diffs_serialize_for_hosts() {
    let mut session = session();
    let index = weather_section(&session);
    session.select(index, 0);
    let high = session
        .rows()
        .into_iter()
        .find(|row| row.section == index && row.index == 3)
        .expect("expanded weather high row");
    let high_temp = session.weather().current_weather().high;

    let value = serde_json::to_value(&high).expect("row serializes");
    assert_eq!(value["kind"], json!("weather"));
    assert_eq!(value["key"]["kind"], json!("weather"));
    assert_eq!(value["key"]["date"], json!(high.key.date));
    assert_eq!(
        value["cell"],
        json!({ "cell": "weather_detail", "title": "HIGH", "detail": format!("{high_temp} C") })
    );
    assert_eq!(value["size"]["width"], json!(high.size.width));
    assert_eq!(value["size"]["height"], json!(40.0));
    assert_eq!(value["section_insets"]["bottom"], json!(15.0));
    assert_eq!(value["section_insets"]["top"], json!(0.0));

    session.connect();
    let diff = session.advance(2_300).expect("first message triggers refresh");
    let value = serde_json::to_value(&diff).expect("diff serializes");
    assert_eq!(
        value,
        json!({
            "inserted": [{ "kind": "message", "date": START + 2_300 }],
            "deleted": [],
        })
    );
}
