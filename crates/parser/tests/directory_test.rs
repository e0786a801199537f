use courtwatch_core::Resource;
use courtwatch_parser::directory::{
    distance_km, district_slug, parse_district_resources, parse_districts,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const CITY_PAGE: &str = r#"
<html><body>
  <a href="/tenis/kluby/warszawa">Warszawa</a>
  <a href="/tenis/kluby/warszawa/mokotow">Mokotów</a>
  <a href="/tenis/kluby/warszawa/praga-poludnie">Praga-Południe</a>
  <a href="/tenis/kluby/warszawa/mokotow">Mokotów</a>
  <a href="/tenis/kluby/warszawa/">Warszawa</a>
  <a href="/padel/kluby/warszawa/wola">Wola</a>
</body></html>
"#;

fn card(href: &str, inner: &str) -> String {
    format!(r#"<a href="{href}">{inner}</a>"#)
}

fn club(name: &str, badge: &str, address: &str) -> String {
    format!("<h4>{name}</h4><span>{badge}</span><p>{address}</p>")
}

#[test]
fn test_parse_districts_unique_in_page_order() {
    assert_eq!(
        parse_districts(CITY_PAGE),
        vec!["Mokotów".to_string(), "Praga-Południe".to_string()]
    );
}

#[rstest]
#[case("Mokotów", "mokotow")]
#[case("Praga-Południe", "praga-poludnie")]
#[case("Żoliborz", "zoliborz")]
#[case("Stare Miasto", "stare-miasto")]
#[case("Białołęka", "bialoleka")]
fn test_district_slug(#[case] district: &str, #[case] expected: &str) {
    assert_eq!(district_slug(district), expected);
}

#[rstest]
#[case("ul. Polna 1 (3,4 km)", Some(3.4))]
#[case("Puławska 100 (12 km)", Some(12.0))]
#[case("Puławska 100", None)]
fn test_distance_km(#[case] address: &str, #[case] expected: Option<f64>) {
    assert_eq!(distance_km(address), expected);
}

#[test]
fn test_parse_district_resources_filters_cards() {
    let html = [
        card("/mera", &club("Klub Mera", "REZERWUJ", "Wółczyńska 128 (4,1 km)")),
        card("/mera?ref=list", &club("Klub Mera", "REZERWUJ", "Wółczyńska 128")),
        card("/daleko", &club("Klub Daleki", "REZERWUJ", "Radom (98,0 km)")),
        card("/turniej", &club("Turniej (2026)", "REZERWUJ", "")),
        card("/bez-rezerwacji", &club("Klub Prywatny", "INFO", "")),
        card("/kat", &format!("<h3>Tenis</h3>{}", club("Kategoria", "REZERWUJ", ""))),
        card("/abc", &club("Abc", "REZERWUJ", "")),
        card("/tenis/kluby/warszawa/wola", &club("Wola Tenis", "REZERWUJ", "")),
        card("/warszawianka/korty", &club("Warszawianka", "REZERWUJ", "")),
        card("https://other.pl/club", &club("Obcy Klub", "REZERWUJ", "")),
        card("/regulamin", &club("Regulamin serwisu", "REZERWUJ", "")),
        card("/legia-tenis", &club("Legia Tenis", "REZERWUJ", "")),
    ]
    .concat();

    let resources = parse_district_resources(&format!("<html><body>{html}</body></html>"), "Wola");

    assert_eq!(
        resources,
        vec![
            Resource {
                id: "mera".to_string(),
                name: "Klub Mera".to_string(),
                district: "Wola".to_string(),
            },
            Resource {
                id: "legia-tenis".to_string(),
                name: "Legia Tenis".to_string(),
                district: "Wola".to_string(),
            },
        ]
    );
}
