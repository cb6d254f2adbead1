//! Nomenclatorul de costuri de achiziție, întreținut extern și citit
//! doar-pentru-citire la calculul de profit.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::order::Money;
use crate::utils::decimal_from_value;

/// O intrare brută din fișierul de costuri: `{"pret_lista": număr-sau-șir}`.
#[derive(Debug, Deserialize)]
struct CostEntry {
    #[serde(default)]
    pret_lista: Value,
}

/// Maparea id opțiune → cost de achiziție (`pret_lista`).
///
/// Intrările cu valori neinterpretabile se omit, nu se tratează ca zero: un
/// cost zero inventat ar umfla tăcut marja raportată.
#[derive(Debug, Clone, Default)]
pub struct CostCache {
    costs: HashMap<String, Money>,
}

impl CostCache {
    /// Încarcă nomenclatorul dintr-un șir JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let raw: HashMap<String, CostEntry> = serde_json::from_str(json)?;
        let costs = raw
            .into_iter()
            .filter_map(|(option_id, entry)| {
                decimal_from_value(&entry.pret_lista).map(|cost| (option_id, cost))
            })
            .collect();
        Ok(Self { costs })
    }

    /// Încarcă nomenclatorul dintr-un fișier JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Costul de achiziție pentru o opțiune, dacă este cunoscut.
    #[must_use]
    pub fn get(&self, option_id: &str) -> Option<Money> {
        self.costs.get(option_id).copied()
    }

    /// Numărul de opțiuni cu cost cunoscut.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// `true` dacă nomenclatorul este gol.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}
