use chrono::{NaiveDate, NaiveTime};
use courtwatch_core::TimeWindow;
use courtwatch_parser::schedule::requires_login;
use courtwatch_parser::{ScheduleRequest, parse_schedule};
use pretty_assertions::assert_eq;

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn request(from: NaiveTime, to: NaiveTime) -> ScheduleRequest<'static> {
    ScheduleRequest {
        resource_id: "mera",
        date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        window: TimeWindow::new(from, to),
        origin: "https://kluby.org",
    }
}

fn schedule_table(rows: &str) -> String {
    format!(
        r#"<table id="grafik"><thead><tr><th>Godzina</th><th>Hala 1 Hala tenis</th><th>Kort 2 Korty otwarte</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}

fn page(title: &str, tables: &str) -> String {
    format!("<html><head><title>{title}</title></head><body>{tables}</body></html>")
}

const EVENING: &str = concat!(
    r#"<tr><td>18:00</td><td><a href="/mera/rezerwuj/1800">Rezerwuj</a></td><td><a href="/mera/rezerwuj/o1800">Rezerwuj</a></td></tr>"#,
    r#"<tr><td>18:30</td><td>Zarezerwowane</td><td><a href="/mera/rezerwuj/o1830">Rezerwuj</a></td></tr>"#,
    r#"<tr><td>19:00</td><td><a href="/mera/rezerwuj/1900">Rezerwuj</a></td><td>-</td></tr>"#,
);

#[test_log::test]
fn test_parse_schedule_emits_indoor_bookable_slots() {
    let html = page("Mera - Rezerwacje ONLINE | Kluby.org", &schedule_table(EVENING));

    let slots = parse_schedule(&html, &request(hm(17, 0), hm(22, 0)));

    let summary: Vec<(String, NaiveTime, String)> = slots
        .iter()
        .map(|s| (s.court_label.clone(), s.time, s.booking_url.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Hala 1".to_string(), hm(18, 0), "https://kluby.org/mera/rezerwuj/1800".to_string()),
            ("Hala 1".to_string(), hm(19, 0), "https://kluby.org/mera/rezerwuj/1900".to_string()),
        ]
    );
    assert!(slots.iter().all(|s| s.resource_name == "Mera"));
}

#[test_log::test]
fn test_parse_schedule_respects_window() {
    let html = page("Mera - Rezerwacje", &schedule_table(EVENING));

    let slots = parse_schedule(&html, &request(hm(18, 30), hm(19, 0)));

    let times: Vec<NaiveTime> = slots.iter().map(|s| s.time).collect();
    assert_eq!(times, vec![hm(19, 0)]);
}

#[test_log::test]
fn test_parse_schedule_deduplicates_across_tables() {
    let html = page(
        "Mera - Rezerwacje",
        &format!("{}{}", schedule_table(EVENING), schedule_table(EVENING)),
    );

    let slots = parse_schedule(&html, &request(hm(17, 0), hm(22, 0)));

    assert_eq!(slots.len(), 2);
}

#[test_log::test]
fn test_parse_schedule_login_wall_yields_nothing() {
    let html = page(
        "Mera - Rezerwacje",
        &format!(
            "<p>Grafik widoczny po zalogowaniu</p>{}",
            schedule_table(EVENING)
        ),
    );

    assert!(parse_schedule(&html, &request(hm(0, 0), hm(23, 59))).is_empty());
}

#[test_log::test]
fn test_parse_schedule_without_table_yields_nothing() {
    let html = page("Mera - Rezerwacje", "<p>Brak grafiku</p>");

    assert!(parse_schedule(&html, &request(hm(0, 0), hm(23, 59))).is_empty());
}

#[test]
fn test_requires_login() {
    assert!(requires_login("<div>Musisz się zalogować, aby zobaczyć grafik</div>"));
    assert!(requires_login("Grafik widoczny po zalogowaniu"));
    assert!(!requires_login(&schedule_table(EVENING)));
}
