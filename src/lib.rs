// Análisis de Ventas - Core Library
// Exposes the pipeline stages for the CLI and for tests

pub mod aggregate;
pub mod charts;
pub mod diagnostics;
pub mod parser;
pub mod report;

// Re-export commonly used types
pub use aggregate::{
    means_by_product, totals_by_category, totals_by_date, totals_by_product, Accumulator,
};
pub use charts::{
    save_category_chart, save_date_chart, save_product_chart, CATEGORY_CHART, DATE_CHART,
    PRODUCT_CHART,
};
pub use diagnostics::{describe, missing_counts, print_exploration, schema_summary, Stats};
pub use parser::{load_sales, parse_date, parse_decimal, RawSale, Sale};
pub use report::{
    means_descending, print_date_table, print_table, totals_by_date_ascending,
    totals_by_key_ascending, totals_descending,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
