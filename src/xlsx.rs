//! Exportul raportului de vânzări într-un registru Excel cu trei foi:
//! Sumar, Comenzi și Produse. Strict prezentare, fără invariante proprii —
//! fiecare câmp produs de agregator apare în foaia de sumar.

use std::path::Path;

use chrono::Local;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{
    Color, ConditionalFormatCell, ConditionalFormatCellRule, Format, FormatAlign, FormatBorder,
    Workbook, Worksheet,
};

use crate::aggregate::SalesMetrics;
use crate::error::ReportError;
use crate::order::{Money, OrderSet};

/// Albastrul antetelor, același cu șabloanele istorice de raport.
const HEADER_BLUE: Color = Color::RGB(0x4472C4);
/// Fundalul subtitlurilor din foaia de sumar.
const SUBHEADER_FILL: Color = Color::RGB(0xD6E4F0);
/// Pragul de evidențiere a comenzilor mari în foaia de comenzi, în RON.
const HIGH_ORDER_THRESHOLD: f64 = 500.0;

/// Scrie registrul Excel al raportului de vânzări la calea dată.
pub fn export_sales(
    orders: &OrderSet,
    metrics: &SalesMetrics,
    period_label: &str,
    path: &Path,
) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();

    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_font_color(Color::White)
        .set_background_color(HEADER_BLUE)
        .set_align(FormatAlign::Center);
    let stamp_format = Format::new()
        .set_italic()
        .set_font_size(9)
        .set_font_color(Color::RGB(0x88_88_88));
    let bold = Format::new().set_bold();
    let subheader = Format::new().set_bold().set_background_color(SUBHEADER_FILL);
    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(HEADER_BLUE)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let bordered = Format::new().set_border(FormatBorder::Thin);
    let money = Format::new()
        .set_num_format("#,##0.00")
        .set_border(FormatBorder::Thin);
    let money_plain = Format::new().set_num_format("#,##0.00");

    write_summary_sheet(
        workbook.add_worksheet(),
        metrics,
        period_label,
        &title_format,
        &stamp_format,
        &bold,
        &subheader,
        &money_plain,
    )?;
    write_orders_sheet(workbook.add_worksheet(), orders, &header, &bordered, &money)?;
    write_products_sheet(workbook.add_worksheet(), orders, &header, &bordered, &money)?;

    workbook.save(path)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_summary_sheet(
    sheet: &mut Worksheet,
    metrics: &SalesMetrics,
    period_label: &str,
    title_format: &Format,
    stamp_format: &Format,
    bold: &Format,
    subheader: &Format,
    money: &Format,
) -> Result<(), ReportError> {
    sheet.set_name("Sumar")?;

    sheet.merge_range(
        0,
        0,
        0,
        3,
        &format!("📊 RAPORT VÂNZĂRI — {period_label}"),
        title_format,
    )?;
    sheet.write_string_with_format(
        1,
        0,
        &format!("Generat: {}", Local::now().format("%d.%m.%Y %H:%M")),
        stamp_format,
    )?;

    let mut row: u32 = 3;
    sheet.write_string_with_format(row, 0, "📦 Total comenzi", bold)?;
    #[allow(clippy::cast_precision_loss)]
    sheet.write_number(row, 1, metrics.total_orders as f64)?;
    row += 1;

    let money_rows = [
        ("💰 Valoare totală (RON)", metrics.total_value),
        ("🚚 Transport total (RON)", metrics.shipping_total),
        ("💵 Valoare netă (RON)", metrics.net_value),
        ("📈 Medie per comandă (RON)", metrics.average_order),
    ];
    for (label, value) in money_rows {
        sheet.write_string_with_format(row, 0, label, bold)?;
        sheet.write_number_with_format(row, 1, to_cell(value), money)?;
        row += 1;
    }

    row += 1;
    sheet.write_string_with_format(row, 0, "💳 Metode plată", subheader)?;
    sheet.write_string_with_format(row, 1, "Comenzi", subheader)?;
    row += 1;
    for (method, count) in metrics.payment_methods.ranked() {
        sheet.write_string(row, 0, &method)?;
        sheet.write_number(row, 1, to_cell(count))?;
        row += 1;
    }

    row += 1;
    sheet.write_string_with_format(row, 0, "🏆 Top produse", subheader)?;
    sheet.write_string_with_format(row, 1, "Cantitate", subheader)?;
    row += 1;
    for (name, qty) in &metrics.top_products {
        sheet.write_string(row, 0, name)?;
        sheet.write_number(row, 1, to_cell(*qty))?;
        row += 1;
    }

    sheet.set_column_width(0, 45)?;
    sheet.set_column_width(1, 20)?;
    sheet.set_column_width(2, 15)?;
    sheet.set_column_width(3, 15)?;
    Ok(())
}

fn write_orders_sheet(
    sheet: &mut Worksheet,
    orders: &OrderSet,
    header: &Format,
    bordered: &Format,
    money: &Format,
) -> Result<(), ReportError> {
    sheet.set_name("Comenzi")?;

    let headers = [
        "Nr. Comandă",
        "Data",
        "Client",
        "Telefon",
        "Județ",
        "Total (RON)",
        "Transport (RON)",
        "Metodă plată",
        "Status",
    ];
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_idx(col), *title, header)?;
    }

    let mut row: u32 = 1;
    for order in orders.iter() {
        sheet.write_string_with_format(row, 0, &order.number, bordered)?;
        sheet.write_string_with_format(row, 1, &order.date, bordered)?;
        sheet.write_string_with_format(row, 2, &order.customer.name, bordered)?;
        sheet.write_string_with_format(row, 3, &order.customer.phone, bordered)?;
        sheet.write_string_with_format(row, 4, &order.customer.county, bordered)?;
        sheet.write_number_with_format(row, 5, to_cell(order.total), money)?;
        sheet.write_number_with_format(row, 6, to_cell(order.shipping), money)?;
        sheet.write_string_with_format(row, 7, &order.payment_method, bordered)?;
        sheet.write_string_with_format(row, 8, &order.status, bordered)?;
        row += 1;
    }

    let widths = [15, 18, 25, 15, 15, 15, 15, 30, 20];
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col_idx(col), f64::from(*width))?;
    }
    if row > 1 {
        sheet.autofilter(0, 0, row - 1, 8)?;

        // Comenzile mari cu verde, storno-urile cu roșu, pe coloana de total.
        let high = Format::new()
            .set_background_color(Color::RGB(0xC6EFCE))
            .set_font_color(Color::RGB(0x006100));
        let negative = Format::new()
            .set_background_color(Color::RGB(0xFFC7CE))
            .set_font_color(Color::RGB(0x9C0006));
        sheet.add_conditional_format(
            1,
            5,
            row - 1,
            5,
            &ConditionalFormatCell::new()
                .set_rule(ConditionalFormatCellRule::GreaterThanOrEqualTo(
                    HIGH_ORDER_THRESHOLD,
                ))
                .set_format(high),
        )?;
        sheet.add_conditional_format(
            1,
            5,
            row - 1,
            5,
            &ConditionalFormatCell::new()
                .set_rule(ConditionalFormatCellRule::LessThan(0.0))
                .set_format(negative),
        )?;
    }
    Ok(())
}

fn write_products_sheet(
    sheet: &mut Worksheet,
    orders: &OrderSet,
    header: &Format,
    bordered: &Format,
    money: &Format,
) -> Result<(), ReportError> {
    sheet.set_name("Produse")?;

    let headers = [
        "Nr. Comandă",
        "Produs",
        "Brand",
        "Cantitate",
        "Preț unitar (RON)",
        "Total (RON)",
    ];
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_idx(col), *title, header)?;
    }

    let mut row: u32 = 1;
    for order in orders.iter() {
        for item in &order.items {
            if item.is_discount() {
                continue;
            }
            sheet.write_string_with_format(row, 0, &order.number, bordered)?;
            sheet.write_string_with_format(row, 1, &item.name, bordered)?;
            sheet.write_string_with_format(row, 2, &item.brand, bordered)?;
            sheet.write_number_with_format(row, 3, to_cell(item.quantity), bordered)?;
            sheet.write_number_with_format(row, 4, to_cell(item.unit_price), money)?;
            sheet.write_number_with_format(row, 5, to_cell(item.line_total()), money)?;
            row += 1;
        }
    }

    let widths = [15, 50, 15, 12, 18, 15];
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col_idx(col), f64::from(*width))?;
    }
    if row > 1 {
        sheet.autofilter(0, 0, row - 1, 5)?;
    }
    Ok(())
}

/// Conversia exact-zecimal → celulă Excel; doar la graniță se pierde precizia.
fn to_cell(value: Money) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn col_idx(col: usize) -> u16 {
    u16::try_from(col).unwrap_or(u16::MAX)
}
