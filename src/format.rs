//! Randarea metricilor ca rapoarte text în stilul mesajelor WhatsApp.

use rust_decimal::Decimal;

use crate::aggregate::{ProductMetrics, ProfitMetrics, SalesMetrics};
use crate::order::Money;

/// Linia despărțitoare a rapoartelor.
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Lungimea maximă a unui nume de produs în listele „top".
const NAME_WIDTH: usize = 40;

/// Tipul raportului de vânzări, cu filtrul de status asociat din platformă.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Toate comenzile perioadei.
    Vanzari,
    /// Comenzile încasate (status 14).
    Incasate,
    /// Comenzile returnate (status 9).
    Returnate,
}

impl ReportKind {
    /// Eticheta din antetul raportului.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vanzari => "VÂNZĂRI",
            Self::Incasate => "ÎNCASATE",
            Self::Returnate => "RETURNATE",
        }
    }

    /// Pictograma din antetul raportului.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Vanzari => "📊",
            Self::Incasate => "💰",
            Self::Returnate => "🔄",
        }
    }

    /// Codul de status al platformei, pentru filtrarea comenzilor;
    /// `None` înseamnă toate comenzile.
    #[must_use]
    pub const fn status_id(self) -> Option<&'static str> {
        match self {
            Self::Vanzari => None,
            Self::Incasate => Some("14"),
            Self::Returnate => Some("9"),
        }
    }
}

/// Formatează o sumă în stil românesc: `1.234,56`.
#[must_use]
pub fn format_number(value: Money) -> String {
    let rendered = format!("{:.2}", value.round_dp(2));
    let (int_part, frac_part) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), "00"));
    let (sign, digits) = int_part
        .strip_prefix('-')
        .map_or(("", int_part), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped},{frac_part}")
}

/// Raportul de vânzări ca bloc de text.
#[must_use]
pub fn format_sales(kind: ReportKind, period_label: &str, metrics: &SalesMetrics) -> String {
    let mut lines = vec![
        format!("{} RAPORT {} - {}", kind.emoji(), kind.label(), period_label),
        RULE.to_string(),
        format!("📦 Total comenzi: {}", metrics.total_orders),
        format!(
            "💰 Valoare totală: {} RON",
            format_number(metrics.total_value)
        ),
        format!(
            "🚚 Transport total: {} RON",
            format_number(metrics.shipping_total)
        ),
        format!("💵 Valoare netă: {} RON", format_number(metrics.net_value)),
        format!(
            "📈 Medie per comandă: {} RON",
            format_number(metrics.average_order)
        ),
    ];

    if !metrics.payment_methods.is_empty() {
        lines.push(RULE.to_string());
        lines.push("💳 Metode plată:".to_string());
        for (method, count) in metrics.payment_methods.ranked() {
            lines.push(format!("  • {method}: {count} comenzi"));
        }
    }

    if !metrics.top_products.is_empty() {
        lines.push(RULE.to_string());
        lines.push("🏆 Top produse:".to_string());
        for (i, (name, qty)) in metrics.top_products.iter().enumerate() {
            lines.push(format!(
                "  {}. {} - {} buc",
                i + 1,
                truncate_name(name),
                qty.normalize()
            ));
        }
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

/// Raportul de produse ca bloc de text.
#[must_use]
pub fn format_products(
    period_label: &str,
    brand: Option<&str>,
    metrics: &ProductMetrics,
) -> String {
    let mut lines = vec![
        format!("📊 RAPORT PRODUSE - {}{}", period_label, brand_suffix(brand)),
        RULE.to_string(),
        format!(
            "📦 Total articole: {} bucăți",
            metrics.total_items.normalize()
        ),
        format!("🏷️ Produse distincte: {}", metrics.products.len()),
    ];

    if !metrics.models.is_empty() {
        lines.push(RULE.to_string());
        lines.push("🏆 Top modele:".to_string());
        for (i, (model, qty)) in metrics.models.most_common(5).iter().enumerate() {
            lines.push(format!(
                "  {}. {} - {} buc",
                i + 1,
                truncate_name(model),
                qty.normalize()
            ));
        }
    }

    if !metrics.sizes.is_empty() {
        lines.push(RULE.to_string());
        lines.push("📏 Top mărimi:".to_string());
        for (size, qty) in metrics.sizes.most_common(10) {
            lines.push(format!("  • {size}: {} buc", qty.normalize()));
        }
    }

    if !metrics.brands.is_empty() {
        lines.push(RULE.to_string());
        lines.push("🏭 Pe branduri:".to_string());
        for (brand_name, qty) in metrics.brands.ranked() {
            lines.push(format!("  • {brand_name}: {} buc", qty.normalize()));
        }
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

/// Analiza de profit ca bloc de text. Venitul fără cost cunoscut și liniile
/// lipsă din nomenclator se afișează explicit, niciodată topite în marja
/// cunoscută.
#[must_use]
pub fn format_profit(period_label: &str, brand: Option<&str>, metrics: &ProfitMetrics) -> String {
    let mut lines = vec![
        format!("💰 ANALIZĂ PROFIT - {}{}", period_label, brand_suffix(brand)),
        RULE.to_string(),
        format!(
            "📈 Venit (cost cunoscut): {} RON",
            format_number(metrics.known_revenue)
        ),
        format!("📉 Cost achiziție: {} RON", format_number(metrics.known_cost)),
        format!("💵 Profit net: {} RON", format_number(metrics.known_profit)),
        format!("📊 Marjă: {}%", metrics.margin_pct.round_dp(1)),
        RULE.to_string(),
        format!(
            "❓ Venit fără cost în nomenclator: {} RON ({} linii)",
            format_number(metrics.unknown_revenue),
            metrics.missing_cost
        ),
        format!(
            "🔄 Retururi/storno: {} linii, {} RON",
            metrics.returns_count,
            format_number(metrics.returns_revenue)
        ),
    ];

    if !metrics.top_profit.is_empty() {
        lines.push(RULE.to_string());
        lines.push("🏆 Top produse după profit:".to_string());
        for (i, (name, p)) in metrics.top_profit.iter().enumerate() {
            let margin = if p.revenue.is_zero() {
                Decimal::ZERO
            } else {
                p.profit / p.revenue * Decimal::ONE_HUNDRED
            };
            lines.push(format!("  {}. {}", i + 1, truncate_name(name)));
            lines.push(format!(
                "     Profit: {} RON | Marjă: {}% | Unități: {}",
                format_number(p.profit),
                margin.round_dp(1),
                p.units.normalize()
            ));
        }
    }

    lines.push(RULE.to_string());
    lines.join("\n")
}

fn brand_suffix(brand: Option<&str>) -> String {
    brand.map_or_else(String::new, |b| format!(" - {}", b.to_uppercase()))
}

/// Scurtează numele de produs la lățimea listelor, cu sufix `...`.
fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let short: String = name.chars().take(NAME_WIDTH).collect();
        format!("{short}...")
    } else {
        name.to_string()
    }
}
