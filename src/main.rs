use anyhow::Result;
use std::path::Path;

use analisis_ventas::{charts, diagnostics, report};
use analisis_ventas::{load_sales, means_by_product, totals_by_category, totals_by_date, totals_by_product};

/// Input file, by convention in the working directory
const SALES_FILE: &str = "ventas.csv";

fn main() -> Result<()> {
    env_logger::init();

    println!("🛒 Análisis de Ventas - Supermercado");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load + coerce
    println!("\n📂 Cargando {}...", SALES_FILE);
    let sales = load_sales(Path::new(SALES_FILE))?;
    println!("✓ {} registros cargados\n", sales.len());

    // 2. Exploration diagnostics
    diagnostics::print_exploration(&sales);

    // 3. Aggregates (cuatro reducciones independientes)
    let by_product = totals_by_product(&sales);
    let by_category = totals_by_category(&sales);
    let by_date = totals_by_date(&sales);
    let product_means = means_by_product(&sales);

    // 4. Charts
    println!("\n📊 Generando gráficos...");
    charts::save_product_chart(
        &report::totals_by_key_ascending(&by_product),
        Path::new(charts::PRODUCT_CHART),
    )?;
    println!("✓ {}", charts::PRODUCT_CHART);
    charts::save_category_chart(
        &report::totals_by_key_ascending(&by_category),
        Path::new(charts::CATEGORY_CHART),
    )?;
    println!("✓ {}", charts::CATEGORY_CHART);
    charts::save_date_chart(
        &report::totals_by_date_ascending(&by_date),
        Path::new(charts::DATE_CHART),
    )?;
    println!("✓ {}", charts::DATE_CHART);

    // 5. Sorted tables
    report::print_table(
        "Ventas totales por producto",
        "Producto",
        &report::totals_descending(&by_product),
    );
    report::print_table(
        "Ventas totales por categoría",
        "Categoría",
        &report::totals_descending(&by_category),
    );
    report::print_date_table(
        "Ventas totales por fecha",
        &report::totals_by_date_ascending(&by_date),
    );
    report::print_table(
        "Ventas promedio por producto",
        "Producto",
        &report::means_descending(&product_means),
    );

    Ok(())
}
