use ejolie_sales_report::{
    Money, OrderSet, ReportKind, aggregate_sales, format_number, format_sales,
};

fn dec(s: &str) -> Money {
    s.parse().expect("valid decimal")
}

#[test]
fn numbers_use_romanian_separators() {
    assert_eq!(format_number(dec("1234.5")), "1.234,50");
    assert_eq!(format_number(dec("0")), "0,00");
    assert_eq!(format_number(dec("999")), "999,00");
    assert_eq!(format_number(dec("1234567.891")), "1.234.567,89");
    assert_eq!(format_number(dec("-1234.5")), "-1.234,50");
}

#[test]
fn sales_report_renders_every_metric() {
    let json = r#"{
        "1": {
            "numar_comanda": "EJ1",
            "total_comanda": "1250,00",
            "pret_livrare": "25",
            "metoda_plata": "Card online",
            "produse": {
                "1": {
                    "nume": "Rochie Lunga de Seara cu Paiete si Trena Detasabila (Marime: 38)",
                    "brand_nume": "Ejolie",
                    "cantitate": "1",
                    "pret_unitar": "1225,00"
                }
            }
        }
    }"#;
    let orders = OrderSet::from_json_str(json).expect("comenzi");
    let metrics = aggregate_sales(&orders);
    let report = format_sales(ReportKind::Vanzari, "Azi (15-03-2026)", &metrics);

    assert!(report.starts_with("📊 RAPORT VÂNZĂRI - Azi (15-03-2026)"));
    assert!(report.contains("📦 Total comenzi: 1"));
    assert!(report.contains("💰 Valoare totală: 1.250,00 RON"));
    assert!(report.contains("🚚 Transport total: 25,00 RON"));
    assert!(report.contains("💵 Valoare netă: 1.225,00 RON"));
    assert!(report.contains("📈 Medie per comandă: 1.250,00 RON"));
    assert!(report.contains("• Card online: 1 comenzi"));
    // Numele lungi se scurtează la 40 de caractere.
    assert!(report.contains("1. Rochie Lunga de Seara cu Paiete si Trena..."));
}

#[test]
fn report_kinds_carry_platform_status_codes() {
    assert_eq!(ReportKind::Vanzari.status_id(), None);
    assert_eq!(ReportKind::Incasate.status_id(), Some("14"));
    assert_eq!(ReportKind::Returnate.status_id(), Some("9"));
    assert_eq!(ReportKind::Incasate.label(), "ÎNCASATE");
}
