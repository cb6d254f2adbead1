//! Modelul normalizat al comenzilor din exportul JSON al API-ului Extended.
//!
//! API-ul livrează un map `id comandă → comandă`, cu câmpuri numerice care
//! sosesc fie ca numere, fie ca șiruri cu virgulă zecimală, și cu datele de
//! client uneori aplatizate, alteori imbricate sub `client`/`livrare`.
//! Normalizarea se face o singură dată aici; agregatoarele lucrează numai cu
//! structurile tipizate.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ReportError;
use crate::utils::decimal_from_value;

/// Valoare bănească în RON; `Decimal` pentru calcule exacte.
pub type Money = Decimal;

/// Datele de contact și livrare ale clientului.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    /// Numele complet al clientului.
    pub name: String,
    /// Telefonul de contact.
    pub phone: String,
    /// Județul de livrare.
    pub county: String,
}

/// O linie de produs dintr-o comandă.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Numele produsului; poate include mărimea, de ex. `(Marime: 38)`.
    pub name: String,
    /// Numele brandului, text liber.
    pub brand: String,
    /// Categoria produsului.
    pub category: String,
    /// Cantitatea comandată.
    pub quantity: Decimal,
    /// Prețul unitar de vânzare.
    pub unit_price: Money,
    /// Prețul de listă înainte de reducere.
    pub list_price: Money,
    /// Identificatorul opțiunii (mărimii), cheia în nomenclatorul de costuri.
    pub option_id: Option<String>,
}

impl LineItem {
    /// Valoarea liniei: preț unitar înmulțit cu cantitatea.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Liniile de discount sunt ajustări sintetice injectate de platformă,
    /// nu produse reale; se exclud din orice numărătoare de produse.
    #[must_use]
    pub fn is_discount(&self) -> bool {
        self.name.to_lowercase().contains("discount")
    }

    /// Construiește o linie din valoarea JSON brută; `None` dacă nu e obiect.
    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Some(Self {
            name: field_text(value, &["nume"]).unwrap_or_else(|| "Produs necunoscut".to_string()),
            brand: field_text(value, &["brand_nume"])
                .or_else(|| nested_text(value, &["brand", "nume"]))
                .unwrap_or_default(),
            category: field_text(value, &["categorie_nume", "categorie"]).unwrap_or_default(),
            quantity: field_decimal(value, "cantitate").unwrap_or(Decimal::ONE),
            unit_price: field_decimal(value, "pret_unitar").unwrap_or(Decimal::ZERO),
            list_price: field_decimal(value, "pret_intreg")
                .or_else(|| field_decimal(value, "pret"))
                .unwrap_or(Decimal::ZERO),
            option_id: field_text(value, &["id_optiune", "idoptiune"]),
        })
    }
}

/// O comandă normalizată.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Identificatorul comenzii (cheia din exportul JSON).
    pub id: String,
    /// Numărul afișat al comenzii; cade înapoi pe identificator.
    pub number: String,
    /// Data comenzii, ca șir brut din API.
    pub date: String,
    /// Totalul comenzii.
    pub total: Money,
    /// Costul de livrare.
    pub shipping: Money,
    /// Metoda de plată, text liber și nenormalizat (ambiguitate moștenită
    /// din sursă: „Card" și „card" se numără separat).
    pub payment_method: String,
    /// Statusul comenzii, text liber.
    pub status: String,
    /// Codul numeric de status, dacă API-ul l-a furnizat.
    pub status_id: Option<String>,
    /// Datele clientului.
    pub customer: Customer,
    /// Liniile de produs.
    pub items: Vec<LineItem>,
}

impl Order {
    /// Construiește o comandă din valoarea JSON brută; `None` dacă intrarea
    /// nu este un obiect (exportul conține uneori chei de serviciu scalare).
    fn from_value(id: &str, value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        let customer = Customer {
            name: flat_name(value)
                .or_else(|| nested_text(value, &["client", "nume"]))
                .unwrap_or_default(),
            phone: field_text(value, &["telefon"])
                .or_else(|| nested_text(value, &["client", "telefon"]))
                .unwrap_or_default(),
            county: field_text(value, &["judet"])
                .or_else(|| nested_text(value, &["client", "livrare", "judet"]))
                .or_else(|| nested_text(value, &["client", "judet"]))
                .unwrap_or_default(),
        };

        let items = value
            .get("produse")
            .and_then(Value::as_object)
            .map(|produse| {
                produse
                    .values()
                    .filter_map(LineItem::from_value)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Some(Self {
            id: id.to_string(),
            number: field_text(value, &["numar_comanda"]).unwrap_or_else(|| id.to_string()),
            date: field_text(value, &["data_comanda", "data"]).unwrap_or_default(),
            total: field_decimal(value, "total_comanda").unwrap_or(Decimal::ZERO),
            shipping: field_decimal(value, "pret_livrare").unwrap_or(Decimal::ZERO),
            payment_method: field_text(value, &["metoda_plata"])
                .unwrap_or_else(|| "Necunoscut".to_string()),
            status: field_text(value, &["status_comanda", "status"]).unwrap_or_default(),
            status_id: field_text(value, &["idstatus", "id_status"]),
            customer,
            items,
        })
    }
}

/// Colecția de comenzi a unei perioade, cu iterare deterministă.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSet {
    /// Comenzile, indexate după identificator.
    pub orders: BTreeMap<String, Order>,
}

impl OrderSet {
    /// Decodează exportul de comenzi dintr-un șir JSON.
    ///
    /// Un răspuns de eroare al API-ului (`{"eroare": 1, ...}`) produce un set
    /// gol, nu o eroare: raportul pe zero comenzi rămâne valid.
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Citește exportul de comenzi dintr-un `Read` arbitrar.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ReportError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Citește exportul de comenzi dintr-un fișier.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    fn from_value(value: &Value) -> Self {
        if is_api_error(value) {
            return Self::default();
        }
        let orders = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(id, v)| Order::from_value(id, v).map(|o| (id.clone(), o)))
                    .collect()
            })
            .unwrap_or_default();
        Self { orders }
    }

    /// Numărul de comenzi.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// `true` dacă nu există comenzi.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Iterator peste comenzi, în ordinea identificatorilor.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }
}

/// Marcajul de eroare al API-ului: `eroare` diferit de zero/fals.
fn is_api_error(value: &Value) -> bool {
    value.get("eroare").is_some_and(|flag| match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() != Some(0),
        Value::String(s) => !s.is_empty() && s != "0",
        _ => false,
    })
}

/// Primul câmp text nevid dintre cheile date; numerele se convertesc la text.
fn field_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_of(value.get(key)?))
}

/// Coboară pe un lanț de chei imbricate și extrage textul frunzei.
fn nested_text(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    text_of(current)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numele clientului din forma aplatizată `prenume` + `nume`.
fn flat_name(value: &Value) -> Option<String> {
    let first = field_text(value, &["prenume"]).unwrap_or_default();
    let last = field_text(value, &["nume"]).unwrap_or_default();
    let full = format!("{first} {last}").trim().to_string();
    (!full.is_empty()).then_some(full)
}

fn field_decimal(value: &Value, key: &str) -> Option<Decimal> {
    decimal_from_value(value.get(key)?)
}
