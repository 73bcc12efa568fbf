// 🔍 Diagnostics - exploración del dataset
// Vista previa, esquema de columnas, estadística descriptiva y nulos

use crate::parser::Sale;
use std::cmp::Ordering;

// ============================================================================
// FIELD SCHEMA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
    Date,
}

impl FieldKind {
    /// Human-readable type name for display
    pub fn name(&self) -> &str {
        match self {
            FieldKind::Text => "texto",
            FieldKind::Numeric => "numérico",
            FieldKind::Date => "fecha",
        }
    }
}

/// FieldSummary - Una columna: nombre, tipo y cuántos valores presentes
#[derive(Debug, Clone)]
pub struct FieldSummary {
    pub name: &'static str,
    pub kind: FieldKind,
    pub non_null: usize,
}

/// Per-field type and non-null count, en el orden del CSV
pub fn schema_summary(sales: &[Sale]) -> Vec<FieldSummary> {
    let rows = sales.len();
    vec![
        FieldSummary { name: "Producto", kind: FieldKind::Text, non_null: rows },
        FieldSummary { name: "Categoria", kind: FieldKind::Text, non_null: rows },
        FieldSummary {
            name: "Precio_unitario",
            kind: FieldKind::Numeric,
            non_null: sales.iter().filter(|s| s.unit_price.is_some()).count(),
        },
        FieldSummary {
            name: "Total",
            kind: FieldKind::Numeric,
            non_null: sales.iter().filter(|s| s.total.is_some()).count(),
        },
        FieldSummary { name: "Fecha", kind: FieldKind::Date, non_null: rows },
    ]
}

/// Per-field count of null values, en el orden del CSV.
/// Texto y fecha nunca son nulos: una fecha inválida aborta la carga.
pub fn missing_counts(sales: &[Sale]) -> Vec<(&'static str, usize)> {
    vec![
        ("Producto", 0),
        ("Categoria", 0),
        (
            "Precio_unitario",
            sales.iter().filter(|s| s.unit_price.is_none()).count(),
        ),
        ("Total", sales.iter().filter(|s| s.total.is_none()).count()),
        ("Fecha", 0),
    ]
}

// ============================================================================
// DESCRIPTIVE STATISTICS
// ============================================================================

/// Stats - count, mean, std, min, cuartiles, max de una columna numérica
///
/// Campos en NaN cuando no hay datos suficientes (std necesita 2 valores).
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Descriptive statistics over the non-null values of a column.
///
/// std usa ddof = 1 (muestral); los cuartiles interpolan linealmente.
pub fn describe(values: &[f64]) -> Stats {
    let count = values.len();
    if count == 0 {
        return Stats {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        f64::NAN
    } else {
        let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (squared / (count - 1) as f64).sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Stats {
        count,
        mean,
        std,
        min: sorted[0],
        q25: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.50),
        q75: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linearly interpolated percentile over sorted values
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ============================================================================
// CONSOLE OUTPUT
// ============================================================================

/// Format an optional numeric cell the way the tables do
fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "NaN".to_string(),
    }
}

/// Print the full exploration block: preview, schema, stats, nulls.
/// El orden es fijo y forma parte del contrato de salida.
pub fn print_exploration(sales: &[Sale]) {
    // 1. First rows, original order
    println!("Primeras filas:");
    println!(
        "  {:<16} {:<14} {:>15} {:>10} {:>12}",
        "Producto", "Categoria", "Precio_unitario", "Total", "Fecha"
    );
    for sale in sales.iter().take(5) {
        println!(
            "  {:<16} {:<14} {:>15} {:>10} {:>12}",
            sale.product,
            sale.category,
            cell(sale.unit_price),
            cell(sale.total),
            sale.date.format("%Y-%m-%d").to_string(),
        );
    }

    // 2. Column schema
    println!("\nInformación de columnas:");
    println!("  {:<16} {:<10} {:>10}", "Columna", "Tipo", "No nulos");
    for field in schema_summary(sales) {
        println!("  {:<16} {:<10} {:>10}", field.name, field.kind.name(), field.non_null);
    }
    println!("  {} filas en total", sales.len());

    // 3. Descriptive statistics for the numeric columns
    println!("\nDescripción estadística:");
    let prices: Vec<f64> = sales.iter().filter_map(|s| s.unit_price).collect();
    let totals: Vec<f64> = sales.iter().filter_map(|s| s.total).collect();
    print_stats("Precio_unitario", &describe(&prices));
    print_stats("Total", &describe(&totals));

    // 4. Null counts
    println!("\nValores nulos por columna:");
    for (name, nulls) in missing_counts(sales) {
        println!("  {:<16} {:>6}", name, nulls);
    }
}

fn print_stats(name: &str, stats: &Stats) {
    println!("  {}:", name);
    println!("    count  {:>10}", stats.count);
    println!("    mean   {:>10.2}", stats.mean);
    println!("    std    {:>10.2}", stats.std);
    println!("    min    {:>10.2}", stats.min);
    println!("    25%    {:>10.2}", stats.q25);
    println!("    50%    {:>10.2}", stats.median);
    println!("    75%    {:>10.2}", stats.q75);
    println!("    max    {:>10.2}", stats.max);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(unit_price: Option<f64>, total: Option<f64>) -> Sale {
        Sale {
            product: "ProductA".to_string(),
            category: "Cat1".to_string(),
            unit_price,
            total,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_describe_known_values() {
        let stats = describe(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 2.5).abs() < 1e-9);
        assert!((stats.std - 1.2909944487358056).abs() < 1e-9);
        assert_eq!(stats.min, 1.0);
        assert!((stats.q25 - 1.75).abs() < 1e-9);
        assert!((stats.median - 2.5).abs() < 1e-9);
        assert!((stats.q75 - 3.25).abs() < 1e-9);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn test_describe_single_value() {
        let stats = describe(&[7.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.0);
        assert!(stats.std.is_nan());
        assert_eq!(stats.median, 7.0);
    }

    #[test]
    fn test_describe_empty() {
        let stats = describe(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.max.is_nan());
    }

    #[test]
    fn test_schema_counts_non_null() {
        let sales = vec![
            sale(Some(1.0), Some(2.0)),
            sale(None, Some(3.0)),
            sale(Some(2.0), None),
        ];

        let schema = schema_summary(&sales);
        assert_eq!(schema.len(), 5);
        assert_eq!(schema[0].non_null, 3); // Producto
        assert_eq!(schema[2].non_null, 2); // Precio_unitario
        assert_eq!(schema[3].non_null, 2); // Total
        assert_eq!(schema[2].kind.name(), "numérico");
    }

    #[test]
    fn test_missing_counts() {
        let sales = vec![sale(None, Some(2.0)), sale(None, None)];

        let nulls = missing_counts(&sales);
        assert_eq!(nulls[0], ("Producto", 0));
        assert_eq!(nulls[2], ("Precio_unitario", 2));
        assert_eq!(nulls[3], ("Total", 1));
        assert_eq!(nulls[4], ("Fecha", 0));
    }
}
