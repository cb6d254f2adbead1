//! Parsere de numere localizate, date calendaristice și contorul de frecvențe.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Interpretează un număr în format local, acceptând `.` sau `,` ca separator
/// zecimal. Spațiile (inclusiv NBSP) și semnul plus sunt ignorate.
///
/// Returnează `None` pentru valori goale sau neinterpretabile, astfel încât
/// apelantul poate distinge „lipsă/coruptă" de un zero real.
#[must_use]
pub fn parse_localized(value: &str) -> Option<Decimal> {
    let normalized: String = value
        .chars()
        .filter(|ch| !matches!(*ch, ' ' | '\u{a0}' | '\u{202f}' | '+'))
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Extrage un `Decimal` dintr-o valoare JSON care poate fi număr sau șir
/// formatat local. Orice alt tip returnează `None`.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_localized(s),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// Formatele de dată acceptate de API-ul Extended.
const DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d.%m.%Y", "%d/%m/%Y"];

/// Interpretează o dată în oricare din formatele `DD-MM-YYYY`,
/// `DD.MM.YYYY` sau `DD/MM/YYYY`.
#[must_use]
pub(crate) fn parse_date_any(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
}

/// Formatează o dată pentru parametrii API și pentru etichete: `DD-MM-YYYY`.
#[must_use]
pub(crate) fn format_api_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Contor de frecvențe cu chei text și cantități exacte.
///
/// Folosește `BTreeMap` pentru iterare deterministă; clasamentul descrescător
/// se obține prin [`Tally::most_common`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(BTreeMap<String, Decimal>);

impl Tally {
    /// Adaugă o cantitate la cheia dată.
    pub fn add(&mut self, key: &str, amount: Decimal) {
        *self.0.entry(key.to_string()).or_insert(Decimal::ZERO) += amount;
    }

    /// Cantitatea acumulată pentru o cheie.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Primele `n` chei, descrescător după cantitate; egalitățile se rup
    /// alfabetic pentru un rezultat stabil.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(String, Decimal)> {
        let mut entries: Vec<(String, Decimal)> =
            self.0.iter().map(|(k, v)| (k.clone(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    /// Toate intrările, în aceeași ordine ca [`Tally::most_common`].
    #[must_use]
    pub fn ranked(&self) -> Vec<(String, Decimal)> {
        self.most_common(self.0.len())
    }

    /// Suma tuturor cantităților.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    /// Numărul de chei distincte.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` dacă nu s-a numărat nimic.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
