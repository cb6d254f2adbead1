//! Erorile de încărcare a datelor și de generare a rapoartelor.

/// Eroare la citirea datelor sursă sau la randarea unui raport.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// Eroare de intrare/ieșire la citirea fișierelor sursă.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Exportul de comenzi sau nomenclatorul de costuri nu este JSON valid.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Perioada cerută nu se potrivește cu niciuna din formele cunoscute.
    #[error("Unrecognized period phrase '{value}'")]
    Period {
        /// Fraza primită de la utilizator.
        value: String,
    },
    /// Eroare de parsare a unei date calendaristice.
    #[error("Invalid date '{value}'")]
    Date {
        /// Valoarea care nu a putut fi interpretată.
        value: String,
    },
    /// Eroare la scrierea registrului Excel.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
