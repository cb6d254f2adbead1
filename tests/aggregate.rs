use ejolie_sales_report::{
    CostCache, Money, OrderSet, aggregate_products, aggregate_profit, aggregate_sales,
    filter_by_brand, filter_by_status,
};

fn load_fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

fn fixture_orders() -> OrderSet {
    OrderSet::from_json_str(&load_fixture("comenzi.json")).expect("parse fixture")
}

fn fixture_costs() -> CostCache {
    CostCache::from_json_str(&load_fixture("pret_lista.json")).expect("parse costs")
}

fn dec(s: &str) -> Money {
    s.parse().expect("valid decimal")
}

#[test]
fn empty_order_set_yields_zero_metrics() {
    let orders = OrderSet::from_json_str("{}").expect("empty map");
    let metrics = aggregate_sales(&orders);
    assert_eq!(metrics.total_orders, 0);
    assert_eq!(metrics.total_value, Money::ZERO);
    assert_eq!(metrics.average_order, Money::ZERO);
    assert!(metrics.top_products.is_empty());
}

#[test]
fn api_error_payload_yields_empty_set() {
    let orders =
        OrderSet::from_json_str(r#"{"eroare": 1, "mesaj": "Lipsa apikey"}"#).expect("error payload");
    assert!(orders.is_empty());
}

#[test]
fn sales_metrics_over_fixture() {
    let orders = fixture_orders();
    assert_eq!(orders.len(), 3);

    let metrics = aggregate_sales(&orders);
    assert_eq!(metrics.total_orders, 3);
    // 450,50 + 320 + "abc" (corupt, devine zero)
    assert_eq!(metrics.total_value, dec("770.50"));
    assert_eq!(metrics.shipping_total, dec("35"));
    assert_eq!(metrics.net_value, dec("735.50"));
    assert_eq!(metrics.average_order.round_dp(2), dec("256.83"));

    assert_eq!(metrics.payment_methods.get("Card online"), Some(dec("2")));
    assert_eq!(metrics.payment_methods.get("Ramburs"), Some(dec("1")));
}

#[test]
fn comma_decimals_are_coerced() {
    let orders = fixture_orders();
    let metrics = aggregate_sales(&orders);
    // cantitate "2,5" și pret_unitar "199,90" trebuie citite ca 2.5 / 199.90.
    assert_eq!(
        metrics
            .product_quantities
            .get("Rochie Eleganta Verde (Marime: 38)"),
        Some(dec("2.5"))
    );
    let rochie = orders
        .iter()
        .flat_map(|o| o.items.iter())
        .find(|i| i.name.starts_with("Rochie"))
        .expect("linia cu rochia");
    assert_eq!(rochie.unit_price, dec("199.90"));
}

#[test]
fn discount_lines_never_reach_product_counts() {
    let orders = fixture_orders();
    let metrics = aggregate_sales(&orders);
    assert!(metrics.product_quantities.get("Discount comanda").is_none());
    assert!(
        metrics
            .top_products
            .iter()
            .all(|(name, _)| !name.to_lowercase().contains("discount"))
    );

    let products = aggregate_products(&orders);
    assert!(products.products.get("Discount comanda").is_none());
}

#[test]
fn aggregation_is_idempotent() {
    let orders = fixture_orders();
    assert_eq!(aggregate_sales(&orders), aggregate_sales(&orders));
    assert_eq!(aggregate_products(&orders), aggregate_products(&orders));
    let costs = fixture_costs();
    assert_eq!(
        aggregate_profit(&orders, &costs),
        aggregate_profit(&orders, &costs)
    );
}

#[test]
fn brand_filter_matches_aliases_and_recomputes_totals() {
    let orders = fixture_orders();
    let filtered = filter_by_brand(&orders, "ejolie");

    // "Ejolie" și "E-Jolie" se potrivesc; "Trendya" nu.
    assert_eq!(filtered.len(), 2);
    assert!(filtered.orders.contains_key("1001"));
    assert!(filtered.orders.contains_key("1002"));

    let order = &filtered.orders["1001"];
    // Linia de discount nu are brand, deci dispare; totalul se recalculează
    // din liniile rămase, iar transportul devine zero.
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.total, dec("499.75"));
    assert_eq!(order.shipping, Money::ZERO);
}

#[test]
fn brand_filter_drops_orders_without_matching_items() {
    let orders = fixture_orders();
    let filtered = filter_by_brand(&orders, "trendya");
    assert_eq!(filtered.len(), 1);
    assert!(filtered.orders.contains_key("1003"));
}

#[test]
fn status_filter_keeps_only_requested_status() {
    let orders = fixture_orders();
    let incasate = filter_by_status(&orders, "14");
    assert_eq!(incasate.len(), 1);
    assert!(incasate.orders.contains_key("1001"));

    // Comanda 1003 nu are idstatus, deci nu trece de niciun filtru de status.
    let returnate = filter_by_status(&orders, "9");
    assert_eq!(returnate.len(), 1);
    assert!(returnate.orders.contains_key("1002"));
}

#[test]
fn product_metrics_split_sizes_models_and_brands() {
    let orders = fixture_orders();
    let metrics = aggregate_products(&orders);

    assert_eq!(metrics.total_items, dec("4.5"));
    assert_eq!(metrics.sizes.get("38"), Some(dec("2.5")));
    assert_eq!(metrics.sizes.get("40"), Some(dec("1")));
    // Mărimile compuse (sacou + fustă) se omit intenționat.
    assert_eq!(metrics.sizes.len(), 2);

    assert_eq!(metrics.models.get("Rochie Eleganta Verde"), Some(dec("2.5")));
    assert_eq!(metrics.models.get("Compleu Dama"), Some(dec("1")));
    assert_eq!(metrics.models.get("Palton Trendy"), Some(dec("1")));

    assert_eq!(metrics.brands.get("Ejolie"), Some(dec("2.5")));
    assert_eq!(metrics.brands.get("E-Jolie"), Some(dec("1")));
    assert_eq!(metrics.brands.get("Trendya"), Some(dec("1")));
}

#[test]
fn profit_separates_known_and_unknown_cost_buckets() {
    let orders = fixture_orders();
    let costs = fixture_costs();
    let metrics = aggregate_profit(&orders, &costs);

    // opt-38 și opt-40 au cost; opt-nolista lipsește din nomenclator.
    assert_eq!(metrics.missing_cost, 1);
    assert_eq!(metrics.unknown_revenue, dec("320"));

    assert_eq!(metrics.known_revenue, dec("999.75"));
    assert_eq!(metrics.known_cost, dec("474.75"));
    assert_eq!(metrics.known_profit, dec("525.00"));
    assert_eq!(metrics.margin_pct.round_dp(1), dec("52.5"));

    // Rochia (275 RON profit) înaintea paltonului (250 RON).
    assert_eq!(metrics.top_profit.len(), 2);
    assert!(metrics.top_profit[0].0.starts_with("Rochie"));
    assert_eq!(metrics.top_profit[0].1.profit, dec("275.00"));
}

#[test]
fn unreadable_cost_entries_are_skipped_not_zeroed() {
    let costs = fixture_costs();
    assert_eq!(costs.len(), 2);
    assert!(costs.get("opt-necitibil").is_none());
}

#[test]
fn negative_prices_are_bucketed_as_returns() {
    let json = r#"{
        "2001": {
            "total_comanda": "-100",
            "metoda_plata": "Card online",
            "produse": {
                "1": {
                    "nume": "Retur Rochie Neagra (Marime: 36)",
                    "brand_nume": "Ejolie",
                    "cantitate": "1",
                    "pret_unitar": "-100",
                    "id_optiune": "opt-36"
                }
            }
        }
    }"#;
    let orders = OrderSet::from_json_str(json).expect("retur");
    let metrics = aggregate_profit(&orders, &fixture_costs());

    assert_eq!(metrics.returns_count, 1);
    assert_eq!(metrics.returns_revenue, dec("-100"));
    assert_eq!(metrics.known_revenue, Money::ZERO);
    assert_eq!(metrics.missing_cost, 0);
}
