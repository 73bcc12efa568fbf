// 🧾 Parser - ventas.csv → registros tipados
// Carga el CSV de ventas y convierte texto a tipos (números, fechas)

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// ============================================================================
// CORE TYPES
// ============================================================================

/// RawSale - Una fila del CSV tal cual viene del archivo
/// Todos los campos son texto; la coerción de tipos ocurre después
#[derive(Debug, Clone, Deserialize)]
pub struct RawSale {
    #[serde(rename = "Producto")]
    pub product: String,

    #[serde(rename = "Categoria")]
    pub category: String,

    #[serde(rename = "Precio_unitario")]
    pub unit_price: String,

    #[serde(rename = "Total")]
    pub total: String,

    #[serde(rename = "Fecha")]
    pub date: String,
}

/// Sale - Registro tipado después de la coerción
///
/// `unit_price` y `total` son `None` cuando la celda no se pudo
/// interpretar como número (valor nulo, distinto de cero).
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub product: String,
    pub category: String,
    pub unit_price: Option<f64>,
    pub total: Option<f64>,
    pub date: NaiveDate,
}

// ============================================================================
// LOADING
// ============================================================================

/// Accepted date formats, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Load the sales ledger from a CSV file.
///
/// El archivo usa coma decimal ("1,50") y puede empezar con BOM UTF-8.
/// Celdas numéricas inválidas se convierten en nulos; una fecha inválida
/// aborta la carga completa.
pub fn load_sales(csv_path: &Path) -> Result<Vec<Sale>> {
    let bytes = fs::read(csv_path)
        .with_context(|| format!("Failed to open sales file: {}", csv_path.display()))?;

    let mut rdr = csv::Reader::from_reader(strip_bom(&bytes));

    let mut sales = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let raw: RawSale = result
            .with_context(|| format!("Failed to deserialize row {} of {}", row + 2, csv_path.display()))?;
        sales.push(coerce(raw, row + 2)?);
    }

    info!("Loaded {} sales from {}", sales.len(), csv_path.display());
    Ok(sales)
}

/// Strip a UTF-8 byte-order mark if present
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// Coerce one raw row into a typed record.
///
/// `row` is the 1-based line number in the file (header = line 1),
/// solo se usa en mensajes de error y de log.
fn coerce(raw: RawSale, row: usize) -> Result<Sale> {
    let unit_price = parse_decimal(&raw.unit_price);
    if unit_price.is_none() && !raw.unit_price.trim().is_empty() {
        debug!(
            "row {}: Precio_unitario '{}' is not numeric, coerced to null",
            row, raw.unit_price
        );
    }

    let total = parse_decimal(&raw.total);
    if total.is_none() && !raw.total.trim().is_empty() {
        debug!("row {}: Total '{}' is not numeric, coerced to null", row, raw.total);
    }

    let date = parse_date(&raw.date)
        .with_context(|| format!("row {}: invalid Fecha", row))?;

    Ok(Sale {
        product: raw.product,
        category: raw.category,
        unit_price,
        total,
        date,
    })
}

/// Parse a decimal-comma number ("1,50" → 1.5).
///
/// Returns `None` for anything that is not a number, incluido el texto
/// vacío. Nunca falla: una celda mala nunca tumba la corrida.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.replace(',', ".").parse::<f64>().ok()
}

/// Parse a calendar date, trying each accepted format in order.
///
/// A diferencia de los números, una fecha inválida es un error fatal.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(date);
        }
    }
    Err(anyhow!("Unrecognized date: '{}'", text))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal("1,50"), Some(1.5));
        assert_eq!(parse_decimal("3,00"), Some(3.0));
        assert_eq!(parse_decimal("12"), Some(12.0));
    }

    #[test]
    fn test_parse_decimal_point_still_works() {
        assert_eq!(parse_decimal("2.75"), Some(2.75));
    }

    #[test]
    fn test_parse_decimal_invalid_is_null() {
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("1.234,56"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("15/01/2024").unwrap(), expected);
        assert_eq!(parse_date("15-01-2024").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_invalid_fails() {
        assert!(parse_date("not a date").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2024-13-40").is_err());
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom(b"\xEF\xBB\xBFProducto"), b"Producto");
        assert_eq!(strip_bom(b"Producto"), b"Producto");
    }

    #[test]
    fn test_load_sales_basic() {
        let file = write_csv(
            "Producto,Categoria,Precio_unitario,Total,Fecha\n\
             Manzanas,Frutas,\"1,50\",\"3,00\",2024-01-01\n\
             Pan,Panaderia,\"2,00\",\"4,00\",2024-01-02\n",
        );

        let sales = load_sales(file.path()).unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].product, "Manzanas");
        assert_eq!(sales[0].unit_price, Some(1.5));
        assert_eq!(sales[0].total, Some(3.0));
        assert_eq!(sales[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(sales[1].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_load_sales_with_bom() {
        let file = write_csv(
            "\u{FEFF}Producto,Categoria,Precio_unitario,Total,Fecha\n\
             Leche,Lacteos,\"1,20\",\"2,40\",2024-02-10\n",
        );

        let sales = load_sales(file.path()).unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product, "Leche");
        assert_eq!(sales[0].total, Some(2.4));
    }

    #[test]
    fn test_load_sales_bad_cell_keeps_rest_of_row() {
        let file = write_csv(
            "Producto,Categoria,Precio_unitario,Total,Fecha\n\
             Queso,Lacteos,abc,\"5,00\",2024-03-01\n",
        );

        let sales = load_sales(file.path()).unwrap();
        assert_eq!(sales.len(), 1);
        // bad cell becomes null, the other fields survive untouched
        assert_eq!(sales[0].unit_price, None);
        assert_eq!(sales[0].total, Some(5.0));
        assert_eq!(sales[0].product, "Queso");
        assert_eq!(sales[0].category, "Lacteos");
    }

    #[test]
    fn test_load_sales_bad_date_is_fatal() {
        let file = write_csv(
            "Producto,Categoria,Precio_unitario,Total,Fecha\n\
             Queso,Lacteos,\"1,00\",\"5,00\",mañana\n",
        );

        let result = load_sales(file.path());
        assert!(result.is_err());
        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains("row 2"), "error should name the row: {}", msg);
    }

    #[test]
    fn test_load_sales_missing_file_is_fatal() {
        let result = load_sales(Path::new("no_such_ventas.csv"));
        assert!(result.is_err());
    }
}
