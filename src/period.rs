//! Interpretarea perioadelor exprimate liber în limba română.

use std::sync::LazyLock;

use chrono::{Datelike, Days, Local, NaiveDate};
use regex::Regex;

use crate::error::ReportError;
use crate::utils::{format_api_date, parse_date_any};

/// Numele românești ale lunilor, în ordine calendaristică.
const MONTHS_RO: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

static EXPLICIT_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"de la\s+(\d{1,2}-\d{1,2}-\d{4})\s+pana(?:\s+la)?\s+(\d{1,2}-\d{1,2}-\d{4})")
        .expect("valid explicit range regex")
});

static BARE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}-\d{1,2}-\d{4})\s+pana(?:\s+la)?\s+(\d{1,2}-\d{1,2}-\d{4})")
        .expect("valid bare range regex")
});

static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\d{1,2}[-./]\d{1,2}[-./]\d{4})(?:\s*[–—-]\s*|\s+(?:to|la)\s+)(\d{1,2}[-./]\d{1,2}[-./]\d{4})",
    )
    .expect("valid date pair regex")
});

/// O perioadă de raportare rezolvată: interval închis de zile plus eticheta
/// afișată în raport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// Prima zi a perioadei.
    pub start: NaiveDate,
    /// Ultima zi a perioadei. Invariant: `start <= end`.
    pub end: NaiveDate,
    /// Eticheta lizibilă, de ex. `Luna trecută (01-02-2026 - 28-02-2026)`.
    pub label: String,
}

impl Period {
    /// Interpretează fraza relativ la data de azi.
    ///
    /// Frazele relative („azi", „luna trecuta") se rezolvă la momentul
    /// apelului; rularea aceleiași fraze în altă zi dă alt interval.
    pub fn parse(phrase: &str) -> Result<Self, ReportError> {
        Self::parse_at(phrase, Local::now().date_naive())
    }

    /// Interpretează fraza relativ la o zi dată (pentru teste și reluări).
    ///
    /// Formele recunoscute, în ordinea priorității: cuvintele-cheie pentru
    /// zi și lună, un nume de lună românesc (cel mai recent trecut, niciodată
    /// viitor), un interval explicit `de la D pana la D`, o pereche de date
    /// separate prin cratimă/`to`/`la`, respectiv o singură dată literală.
    pub fn parse_at(phrase: &str, today: NaiveDate) -> Result<Self, ReportError> {
        let text = normalize_phrase(phrase);

        match text.as_str() {
            "azi" | "astazi" | "today" => return Ok(Self::single_day(today, Some("Azi"))),
            "ieri" | "yesterday" => {
                let d = today - Days::new(1);
                return Ok(Self::single_day(d, Some("Ieri")));
            }
            "luna asta" | "luna aceasta" | "this month" => {
                let start = first_of_month(today);
                return Ok(Self::range(start, today, Some("Luna aceasta")));
            }
            "luna trecuta" | "luna anterioara" | "last month" => {
                let end = first_of_month(today) - Days::new(1);
                let start = first_of_month(end);
                return Ok(Self::range(start, end, Some("Luna trecută")));
            }
            _ => {}
        }

        // Numele de lună poate veni și ca „luna ianuarie".
        let month_text = text.strip_prefix("luna ").unwrap_or(&text);
        if let Some(period) = Self::named_month(month_text, today) {
            return Ok(period);
        }

        // Intervalele explicite au prioritate peste perechile generice, ca să
        // nu fie interpretat greșit textul din jurul datelor.
        for re in [&*EXPLICIT_RANGE_RE, &*BARE_RANGE_RE, &*PAIR_RE] {
            if let Some(caps) = re.captures(&text) {
                let start = parse_date_caps(&caps[1])?;
                let end = parse_date_caps(&caps[2])?;
                return Ok(Self::range(start, end, None));
            }
        }

        if let Some(d) = parse_date_any(&text) {
            return Ok(Self::single_day(d, None));
        }

        Err(ReportError::Period {
            value: phrase.trim().to_string(),
        })
    }

    /// Contract total: fraza nerecunoscută devine azi/azi. Al doilea element
    /// semnalează că s-a aplicat valoarea implicită, ca apelantul să poată
    /// avertiza utilizatorul.
    #[must_use]
    pub fn parse_or_today(phrase: &str) -> (Self, bool) {
        Self::parse(phrase).map_or_else(
            |_| (Self::single_day(Local::now().date_naive(), Some("Azi")), true),
            |period| (period, false),
        )
    }

    /// Data de început în formatul cerut de API (`DD-MM-YYYY`).
    #[must_use]
    pub fn start_param(&self) -> String {
        format_api_date(self.start)
    }

    /// Data de sfârșit în formatul cerut de API (`DD-MM-YYYY`).
    #[must_use]
    pub fn end_param(&self) -> String {
        format_api_date(self.end)
    }

    /// Rezolvă un nume de lună la cea mai recentă apariție trecută sau
    /// curentă: dacă luna numită este după luna de azi, se ia anul precedent.
    fn named_month(name: &str, today: NaiveDate) -> Option<Self> {
        let idx = MONTHS_RO.iter().position(|m| *m == name)?;
        let month = u32::try_from(idx).ok()? + 1;
        let year = if month > today.month() {
            today.year() - 1
        } else {
            today.year()
        };

        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year, 12, 31)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)? - Days::new(1)
        };

        let label = format!(
            "{} {year} ({} - {})",
            capitalize(name),
            format_api_date(start),
            format_api_date(end)
        );
        Some(Self { start, end, label })
    }

    fn single_day(day: NaiveDate, prefix: Option<&str>) -> Self {
        let formatted = format_api_date(day);
        let label = prefix.map_or_else(|| formatted.clone(), |p| format!("{p} ({formatted})"));
        Self {
            start: day,
            end: day,
            label,
        }
    }

    fn range(start: NaiveDate, end: NaiveDate, prefix: Option<&str>) -> Self {
        let span = format!("{} - {}", format_api_date(start), format_api_date(end));
        let label = prefix.map_or_else(|| span.clone(), |p| format!("{p} ({span})"));
        Self { start, end, label }
    }
}

/// O dată care a trecut de regexul structural, dar poate fi invalidă
/// calendaristic (de ex. `30-02-2026`).
fn parse_date_caps(value: &str) -> Result<NaiveDate, ReportError> {
    parse_date_any(value).ok_or_else(|| ReportError::Date {
        value: value.to_string(),
    })
}

/// Normalizează fraza: spații, majuscule și variantele diacritice ale
/// cuvântului „până".
fn normalize_phrase(phrase: &str) -> String {
    phrase
        .trim()
        .to_lowercase()
        .replace("până", "pana")
        .replace("pînă", "pana")
}

/// Prima zi a lunii în care cade data dată.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Prima literă mare, restul mici (pentru numele lunii din etichetă).
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
