//! Agregarea comenzilor în metrici de vânzări, produse și profit.
//!
//! Toate reducerile sunt pure și în memorie: nicio linie coruptă nu oprește
//! agregarea, câmpurile numerice nevalide au fost deja aduse la zero la
//! ingestie, iar rularea repetată pe același set produce metrici identice.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::cost::CostCache;
use crate::order::{LineItem, Money, Order, OrderSet};
use crate::utils::Tally;

/// Câte produse intră în clasamentele „top" ale rapoartelor.
const TOP_N: usize = 5;

/// Aliasurile sub care apar brandurile proprii în câmpul liber `brand_nume`.
const BRAND_ALIASES: [(&str, &[&str]); 3] = [
    ("ejolie", &["ejolie", "e-jolie"]),
    ("trendya", &["trendya"]),
    ("artista", &["artista"]),
];

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Marime[^:)]*:\s*([^)]*)\)").expect("valid size regex"));

static SIZE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(Marime[^)]*\)").expect("valid size suffix regex"));

/// Metricile raportului de vânzări.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesMetrics {
    /// Numărul de comenzi.
    pub total_orders: u64,
    /// Valoarea totală a comenzilor.
    pub total_value: Money,
    /// Costul total de transport.
    pub shipping_total: Money,
    /// Valoarea netă: total minus transport.
    pub net_value: Money,
    /// Valoarea medie pe comandă; zero când nu există comenzi.
    pub average_order: Money,
    /// Frecvența metodelor de plată, pe textul brut din API.
    pub payment_methods: Tally,
    /// Cantitățile vândute pe produs, fără liniile de discount.
    pub product_quantities: Tally,
    /// Primele cinci produse după cantitate.
    pub top_products: Vec<(String, Decimal)>,
}

/// Reduce setul de comenzi la metricile de vânzări.
#[must_use]
pub fn aggregate_sales(orders: &OrderSet) -> SalesMetrics {
    let mut total_value = Decimal::ZERO;
    let mut shipping_total = Decimal::ZERO;
    let mut payment_methods = Tally::default();
    let mut product_quantities = Tally::default();

    for order in orders.iter() {
        total_value += order.total;
        shipping_total += order.shipping;
        payment_methods.add(&order.payment_method, Decimal::ONE);
        for item in real_items(order) {
            product_quantities.add(&item.name, item.quantity);
        }
    }

    let total_orders = u64::try_from(orders.len()).unwrap_or(u64::MAX);
    let average_order = if total_orders == 0 {
        Decimal::ZERO
    } else {
        total_value / Decimal::from(total_orders)
    };
    let top_products = product_quantities.most_common(TOP_N);

    SalesMetrics {
        total_orders,
        total_value,
        shipping_total,
        net_value: total_value - shipping_total,
        average_order,
        payment_methods,
        product_quantities,
        top_products,
    }
}

/// Păstrează doar liniile al căror brand se potrivește cu unul din aliasurile
/// brandului cerut (potrivire prin conținere, fără majuscule/minuscule).
///
/// Comenzile rămase fără nicio linie se elimină complet. Totalul comenzilor
/// păstrate se recalculează din liniile rămase, iar transportul devine zero:
/// la comenzile mixte transportul nu se poate împărți pe branduri, aproximare
/// asumată.
#[must_use]
pub fn filter_by_brand(orders: &OrderSet, brand: &str) -> OrderSet {
    let wanted = brand.trim().to_lowercase();
    let aliases: Vec<&str> = BRAND_ALIASES
        .iter()
        .find(|(canonical, _)| *canonical == wanted)
        .map_or_else(|| vec![wanted.as_str()], |(_, aliases)| aliases.to_vec());

    let mut kept = BTreeMap::new();
    for (id, order) in &orders.orders {
        let items: Vec<LineItem> = order
            .items
            .iter()
            .filter(|item| {
                let item_brand = item.brand.to_lowercase();
                aliases.iter().any(|alias| item_brand.contains(alias))
            })
            .cloned()
            .collect();
        if items.is_empty() {
            continue;
        }
        let total = items.iter().map(LineItem::line_total).sum();
        kept.insert(
            id.clone(),
            Order {
                total,
                shipping: Decimal::ZERO,
                items,
                ..order.clone()
            },
        );
    }
    OrderSet { orders: kept }
}

/// Păstrează comenzile cu codul de status dat. Comenzile fără cod de status
/// se elimină: un status necunoscut nu este statusul cerut.
#[must_use]
pub fn filter_by_status(orders: &OrderSet, status_id: &str) -> OrderSet {
    let orders = orders
        .orders
        .iter()
        .filter(|(_, order)| order.status_id.as_deref() == Some(status_id))
        .map(|(id, order)| (id.clone(), order.clone()))
        .collect();
    OrderSet { orders }
}

/// Metricile raportului de produse: patru numărători paralele din aceeași
/// parcurgere a liniilor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMetrics {
    /// Totalul articolelor vândute.
    pub total_items: Decimal,
    /// Cantități pe numele exact al produsului (poate include mărimea).
    pub products: Tally,
    /// Cantități pe mărimea extrasă din nume.
    pub sizes: Tally,
    /// Cantități pe modelul de bază, cu sufixul `(Marime...)` eliminat.
    pub models: Tally,
    /// Cantități pe brand.
    pub brands: Tally,
}

/// Reduce setul de comenzi la metricile de produse.
#[must_use]
pub fn aggregate_products(orders: &OrderSet) -> ProductMetrics {
    let mut metrics = ProductMetrics::default();

    for order in orders.iter() {
        for item in real_items(order) {
            metrics.products.add(&item.name, item.quantity);
            if let Some(size) = extract_size(&item.name) {
                metrics.sizes.add(&size, item.quantity);
            }
            metrics.models.add(&base_model(&item.name), item.quantity);
            if !item.brand.is_empty() {
                metrics.brands.add(&item.brand, item.quantity);
            }
        }
    }

    metrics.total_items = metrics.products.total();
    metrics
}

/// Profitul acumulat pentru un produs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductProfit {
    /// Profitul total al produsului.
    pub profit: Money,
    /// Venitul total al produsului.
    pub revenue: Money,
    /// Unitățile vândute.
    pub units: Decimal,
}

/// Metricile analizei de profit.
///
/// Veniturile cu cost cunoscut se țin separat de cele fără intrare în
/// nomenclator; lipsa costului nu se tratează niciodată ca un cost zero,
/// altfel marja raportată ar fi umflată.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfitMetrics {
    /// Venitul liniilor cu cost cunoscut.
    pub known_revenue: Money,
    /// Costul de achiziție al liniilor cu cost cunoscut.
    pub known_cost: Money,
    /// Profitul liniilor cu cost cunoscut.
    pub known_profit: Money,
    /// Marja procentuală pe venitul cu cost cunoscut; zero la venit zero.
    pub margin_pct: Decimal,
    /// Venitul liniilor fără cost în nomenclator.
    pub unknown_revenue: Money,
    /// Numărul liniilor fără cost în nomenclator.
    pub missing_cost: u64,
    /// Numărul liniilor cu preț negativ (retururi, storno).
    pub returns_count: u64,
    /// Valoarea liniilor cu preț negativ.
    pub returns_revenue: Money,
    /// Profitul acumulat pe produs (numai linii cu cost cunoscut).
    pub per_product: BTreeMap<String, ProductProfit>,
    /// Primele cinci produse după profit.
    pub top_profit: Vec<(String, ProductProfit)>,
}

/// Reduce setul de comenzi la analiza de profit, pe baza nomenclatorului de
/// costuri de achiziție.
#[must_use]
pub fn aggregate_profit(orders: &OrderSet, costs: &CostCache) -> ProfitMetrics {
    let mut metrics = ProfitMetrics::default();

    for order in orders.iter() {
        for item in real_items(order) {
            let revenue = item.line_total();
            if item.unit_price < Decimal::ZERO {
                metrics.returns_count += 1;
                metrics.returns_revenue += revenue;
                continue;
            }

            let cost = item
                .option_id
                .as_deref()
                .and_then(|option_id| costs.get(option_id));
            let Some(cost) = cost else {
                metrics.missing_cost += 1;
                metrics.unknown_revenue += revenue;
                continue;
            };

            let line_cost = cost * item.quantity;
            let line_profit = (item.unit_price - cost) * item.quantity;
            metrics.known_revenue += revenue;
            metrics.known_cost += line_cost;
            metrics.known_profit += line_profit;

            let entry = metrics.per_product.entry(item.name.clone()).or_default();
            entry.profit += line_profit;
            entry.revenue += revenue;
            entry.units += item.quantity;
        }
    }

    if !metrics.known_revenue.is_zero() {
        metrics.margin_pct = metrics.known_profit / metrics.known_revenue * Decimal::ONE_HUNDRED;
    }

    let mut ranked: Vec<(String, ProductProfit)> = metrics
        .per_product
        .iter()
        .map(|(name, profit)| (name.clone(), profit.clone()))
        .collect();
    ranked.sort_by(|a, b| b.1.profit.cmp(&a.1.profit).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_N);
    metrics.top_profit = ranked;

    metrics
}

/// Liniile de produs reale ale unei comenzi, fără ajustările de discount.
fn real_items(order: &Order) -> impl Iterator<Item = &LineItem> {
    order.items.iter().filter(|item| !item.is_discount())
}

/// Extrage mărimea din numele produsului: textul dintre `Marime:` și
/// următoarea paranteză închisă. Mărimile compuse („Marime Sacou: 46,
/// Marime Fusta: 46") conțin virgulă și se omit intenționat din numărătoare.
fn extract_size(name: &str) -> Option<String> {
    let caps = SIZE_RE.captures(name)?;
    let size = caps[1].trim().to_string();
    if size.is_empty() || size.contains(',') {
        return None;
    }
    Some(size)
}

/// Numele modelului de bază: numele produsului fără sufixul `(Marime...)`.
fn base_model(name: &str) -> String {
    SIZE_SUFFIX_RE.replace_all(name, "").trim().to_string()
}
