// 🧮 Report - tablas ordenadas en consola
// Vistas ordenadas de los agregados: productos y categorías por total
// descendente, fechas cronológicas, promedios descendentes

use crate::aggregate::Accumulator;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;

// ============================================================================
// SORTED VIEWS
// ============================================================================

/// Totals sorted descending by sum.
/// Empates se rompen por clave ascendente para que dos corridas sobre el
/// mismo archivo impriman exactamente lo mismo.
pub fn totals_descending(groups: &HashMap<String, Accumulator>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = groups
        .iter()
        .map(|(key, acc)| (key.clone(), acc.sum))
        .collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    rows
}

/// Totals in ascending key order (el orden de barras de los gráficos)
pub fn totals_by_key_ascending(groups: &HashMap<String, Accumulator>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = groups
        .iter()
        .map(|(key, acc)| (key.clone(), acc.sum))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

/// Totals in chronological order
pub fn totals_by_date_ascending(groups: &HashMap<NaiveDate, Accumulator>) -> Vec<(NaiveDate, f64)> {
    let mut rows: Vec<(NaiveDate, f64)> = groups
        .iter()
        .map(|(date, acc)| (*date, acc.sum))
        .collect();
    rows.sort_by_key(|(date, _)| *date);
    rows
}

/// Means sorted descending; grupos sin valores (media indefinida, NaN)
/// quedan al final, entre ellos por clave ascendente.
pub fn means_descending(groups: &HashMap<String, Accumulator>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = groups
        .iter()
        .map(|(key, acc)| (key.clone(), acc.mean().unwrap_or(f64::NAN)))
        .collect();
    rows.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => a.0.cmp(&b.0),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.1
            .partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0)),
    });
    rows
}

// ============================================================================
// CONSOLE TABLES
// ============================================================================

/// Format one table value: dos decimales, NaN para media indefinida
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

pub fn print_table(title: &str, key_header: &str, rows: &[(String, f64)]) {
    println!("\n{}:", title);
    println!("  {:<24} {:>10}", key_header, "Total");
    for (key, value) in rows {
        println!("  {:<24} {:>10}", key, format_value(*value));
    }
}

pub fn print_date_table(title: &str, rows: &[(NaiveDate, f64)]) {
    println!("\n{}:", title);
    println!("  {:<24} {:>10}", "Fecha", "Total");
    for (date, value) in rows {
        println!(
            "  {:<24} {:>10}",
            date.format("%Y-%m-%d").to_string(),
            format_value(*value)
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
