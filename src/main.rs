//! CLI: generează rapoarte de vânzări/produse/profit dintr-un export JSON de
//! comenzi deja preluat din API-ul Extended.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ejolie_sales_report::{
    CostCache, OrderSet, Period, ReportKind, aggregate_products, aggregate_profit,
    aggregate_sales, export_sales, filter_by_brand, filter_by_status, format_products,
    format_profit, format_sales,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Tip {
    /// Toate comenzile perioadei.
    Vanzari,
    /// Comenzile încasate (status 14).
    Incasate,
    /// Comenzile returnate (status 9).
    Returnate,
    /// Raport pe produse, mărimi și modele.
    Produse,
    /// Analiza de profit pe nomenclatorul de costuri.
    Profit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Bloc de text pe stdout.
    Text,
    /// Registru Excel.
    Xlsx,
}

#[derive(Parser)]
#[command(
    name = "ejolie-sales-report",
    about = "Rapoarte de vânzări ejolie.ro dintr-un export JSON de comenzi"
)]
struct Cli {
    /// Tipul raportului.
    #[arg(long, value_enum, default_value_t = Tip::Vanzari)]
    tip: Tip,
    /// Perioada: "azi", "ieri", "luna asta", "luna trecuta", un nume de lună
    /// sau "de la DD-MM-YYYY pana la DD-MM-YYYY".
    #[arg(long, default_value = "azi")]
    perioada: String,
    /// Filtrare pe brand: ejolie, trendya, artista.
    #[arg(long)]
    brand: Option<String>,
    /// Exportul JSON de comenzi (map id → comandă).
    #[arg(long)]
    comenzi: PathBuf,
    /// Nomenclatorul de costuri (id opțiune → pret_lista); obligatoriu
    /// pentru raportul de profit.
    #[arg(long)]
    costuri: Option<PathBuf>,
    /// Formatul de ieșire.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Calea fișierului Excel.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (period, defaulted) = Period::parse_or_today(&cli.perioada);
    if defaulted {
        eprintln!(
            "⚠️ Nu am putut interpreta perioada '{}'. Folosesc data de azi.",
            cli.perioada
        );
    }

    let mut orders = OrderSet::from_file(&cli.comenzi)?;

    let kind = match cli.tip {
        Tip::Incasate => ReportKind::Incasate,
        Tip::Returnate => ReportKind::Returnate,
        Tip::Vanzari | Tip::Produse | Tip::Profit => ReportKind::Vanzari,
    };
    if let Some(status_id) = kind.status_id() {
        orders = filter_by_status(&orders, status_id);
    }
    if let Some(brand) = &cli.brand {
        orders = filter_by_brand(&orders, brand);
    }

    match cli.tip {
        Tip::Produse => {
            let metrics = aggregate_products(&orders);
            println!(
                "{}",
                format_products(&period.label, cli.brand.as_deref(), &metrics)
            );
        }
        Tip::Profit => {
            let costs_path = cli
                .costuri
                .ok_or("--costuri este obligatoriu pentru raportul de profit")?;
            let costs = CostCache::from_file(&costs_path)?;
            let metrics = aggregate_profit(&orders, &costs);
            println!(
                "{}",
                format_profit(&period.label, cli.brand.as_deref(), &metrics)
            );
        }
        Tip::Vanzari | Tip::Incasate | Tip::Returnate => {
            let metrics = aggregate_sales(&orders);
            match cli.format {
                OutputFormat::Text => {
                    println!("{}", format_sales(kind, &period.label, &metrics));
                }
                OutputFormat::Xlsx => {
                    let output = cli
                        .output
                        .unwrap_or_else(|| PathBuf::from("raport_vanzari.xlsx"));
                    export_sales(&orders, &metrics, &period.label, &output)?;
                    println!("✅ Fișier Excel salvat: {}", output.display());
                }
            }
        }
    }

    Ok(())
}
