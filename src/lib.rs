#![warn(missing_docs)]
//! Bibliotecă pentru rapoartele de vânzări ejolie.ro: interpretarea
//! perioadelor în limba română, agregarea exportului de comenzi din API-ul
//! Extended și randarea rapoartelor ca text sau registru Excel.

mod aggregate;
mod cost;
mod error;
mod format;
mod order;
mod period;
mod utils;
mod xlsx;

pub use crate::aggregate::{
    ProductMetrics, ProductProfit, ProfitMetrics, SalesMetrics, aggregate_products,
    aggregate_profit, aggregate_sales, filter_by_brand, filter_by_status,
};
pub use crate::cost::CostCache;
pub use crate::error::ReportError;
pub use crate::format::{ReportKind, format_number, format_products, format_profit, format_sales};
pub use crate::order::{Customer, LineItem, Money, Order, OrderSet};
pub use crate::period::Period;
pub use crate::utils::{Tally, parse_localized};
pub use crate::xlsx::export_sales;
