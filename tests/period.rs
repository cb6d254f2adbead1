use chrono::NaiveDate;
use ejolie_sales_report::Period;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn keyword_phrases_resolve_relative_to_today() {
    let today = date(2026, 3, 15);

    let azi = Period::parse_at("azi", today).expect("azi");
    assert_eq!((azi.start, azi.end), (today, today));
    assert_eq!(azi.label, "Azi (15-03-2026)");

    let ieri = Period::parse_at("ieri", today).expect("ieri");
    assert_eq!((ieri.start, ieri.end), (date(2026, 3, 14), date(2026, 3, 14)));

    let luna_asta = Period::parse_at("luna asta", today).expect("luna asta");
    assert_eq!((luna_asta.start, luna_asta.end), (date(2026, 3, 1), today));

    let luna_trecuta = Period::parse_at("luna trecuta", today).expect("luna trecuta");
    assert_eq!(
        (luna_trecuta.start, luna_trecuta.end),
        (date(2026, 2, 1), date(2026, 2, 28))
    );

    for phrase in ["azi", "astazi", "ieri", "luna aceasta", "luna anterioara"] {
        let p = Period::parse_at(phrase, today).expect("keyword phrase");
        assert!(p.start <= p.end, "start > end pentru '{phrase}'");
        assert!(p.end <= today);
    }
}

#[test]
fn english_synonyms_are_accepted() {
    let today = date(2026, 3, 15);
    assert_eq!(
        Period::parse_at("today", today).expect("today").start,
        today
    );
    assert_eq!(
        Period::parse_at("last month", today).expect("last month").end,
        date(2026, 2, 28)
    );
}

#[test]
fn named_month_resolves_to_most_recent_occurrence() {
    // Ianuarie deja trecut: anul curent.
    let p = Period::parse_at("ianuarie", date(2026, 3, 15)).expect("ianuarie");
    assert_eq!((p.start, p.end), (date(2026, 1, 1), date(2026, 1, 31)));
    assert_eq!(p.label, "Ianuarie 2026 (01-01-2026 - 31-01-2026)");

    // Ianuarie cerut în decembrie: apariția trecută, nu cea viitoare.
    let p = Period::parse_at("ianuarie", date(2025, 12, 10)).expect("ianuarie");
    assert_eq!((p.start, p.end), (date(2025, 1, 1), date(2025, 1, 31)));

    // Luna curentă, încă neîncheiată: anul curent.
    let p = Period::parse_at("martie", date(2026, 3, 15)).expect("martie");
    assert_eq!((p.start, p.end), (date(2026, 3, 1), date(2026, 3, 31)));

    // Lună viitoare în anul curent: anul precedent.
    let p = Period::parse_at("decembrie", date(2026, 3, 15)).expect("decembrie");
    assert_eq!((p.start, p.end), (date(2025, 12, 1), date(2025, 12, 31)));

    // Prefixul "luna " se ignoră.
    let p = Period::parse_at("luna februarie", date(2026, 3, 15)).expect("luna februarie");
    assert_eq!((p.start, p.end), (date(2026, 2, 1), date(2026, 2, 28)));
}

#[test]
fn explicit_range_returns_dates_verbatim() {
    let today = date(2026, 6, 1);
    let p = Period::parse_at("de la 01-01-2026 pana la 31-01-2026", today).expect("range");
    assert_eq!((p.start, p.end), (date(2026, 1, 1), date(2026, 1, 31)));
    assert_eq!(p.label, "01-01-2026 - 31-01-2026");

    // Diacriticele din "până" se normalizează.
    let p = Period::parse_at("de la 01-01-2026 până la 31-01-2026", today).expect("diacritice");
    assert_eq!((p.start, p.end), (date(2026, 1, 1), date(2026, 1, 31)));
}

#[test]
fn bare_and_separator_ranges_are_accepted() {
    let today = date(2026, 6, 1);

    let p = Period::parse_at("01-01-2026 pana la 31-01-2026", today).expect("bare range");
    assert_eq!((p.start, p.end), (date(2026, 1, 1), date(2026, 1, 31)));

    let p = Period::parse_at("01-01-2026 - 31-01-2026", today).expect("dash");
    assert_eq!((p.start, p.end), (date(2026, 1, 1), date(2026, 1, 31)));

    let p = Period::parse_at("01.02.2026 – 28.02.2026", today).expect("en dash");
    assert_eq!((p.start, p.end), (date(2026, 2, 1), date(2026, 2, 28)));

    let p = Period::parse_at("01/01/2026 la 31/01/2026", today).expect("la");
    assert_eq!((p.start, p.end), (date(2026, 1, 1), date(2026, 1, 31)));
}

#[test]
fn single_literal_date_spans_one_day() {
    let today = date(2026, 6, 1);
    for phrase in ["05-02-2026", "05.02.2026", "05/02/2026"] {
        let p = Period::parse_at(phrase, today).expect("single date");
        assert_eq!((p.start, p.end), (date(2026, 2, 5), date(2026, 2, 5)));
        assert_eq!(p.label, "05-02-2026");
    }
}

#[test]
fn invalid_calendar_dates_are_rejected() {
    let today = date(2026, 6, 1);
    assert!(Period::parse_at("32-01-2026", today).is_err());
    assert!(Period::parse_at("de la 30-02-2026 pana la 31-03-2026", today).is_err());
}

#[test]
fn unrecognized_phrase_errors_and_fallback_flags() {
    let today = date(2026, 6, 1);
    assert!(Period::parse_at("saptamana viitoare", today).is_err());

    let (period, defaulted) = Period::parse_or_today("ceva fara sens");
    assert!(defaulted);
    assert_eq!(period.start, period.end);
    assert!(period.label.starts_with("Azi ("));
}

#[test]
fn api_params_use_dd_mm_yyyy() {
    let p = Period::parse_at("ianuarie", date(2026, 3, 15)).expect("ianuarie");
    assert_eq!(p.start_param(), "01-01-2026");
    assert_eq!(p.end_param(), "31-01-2026");
}
