// 📊 Aggregate - reducciones de ventas por clave
// Suma y promedio de Total agrupado por producto, categoría y fecha

use crate::parser::Sale;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::hash::Hash;

// ============================================================================
// ACCUMULATOR
// ============================================================================

/// Accumulator - Estado de un grupo durante la reducción
///
/// `sum` y `count` solo cuentan valores de Total presentes; un nulo
/// nunca aporta a la suma ni al conteo (nulo ≠ cero).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    pub count: usize,
}

impl Accumulator {
    pub fn add(&mut self, total: Option<f64>) {
        if let Some(value) = total {
            self.sum += value;
            self.count += 1;
        }
    }

    /// Mean of the group, `None` when the group has no usable values
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

// ============================================================================
// REDUCTIONS
// ============================================================================

/// Single-pass reduction of `Total` over an arbitrary group key
fn accumulate_by<K, F>(sales: &[Sale], key_of: F) -> HashMap<K, Accumulator>
where
    K: Eq + Hash,
    F: Fn(&Sale) -> K,
{
    let mut groups: HashMap<K, Accumulator> = HashMap::new();
    for sale in sales {
        groups.entry(key_of(sale)).or_default().add(sale.total);
    }
    groups
}

/// Sum of Total by product
pub fn totals_by_product(sales: &[Sale]) -> HashMap<String, Accumulator> {
    accumulate_by(sales, |sale| sale.product.clone())
}

/// Sum of Total by category
pub fn totals_by_category(sales: &[Sale]) -> HashMap<String, Accumulator> {
    accumulate_by(sales, |sale| sale.category.clone())
}

/// Sum of Total by calendar date
pub fn totals_by_date(sales: &[Sale]) -> HashMap<NaiveDate, Accumulator> {
    accumulate_by(sales, |sale| sale.date)
}

/// Mean of Total by product (independent pass, mismo acumulador)
pub fn means_by_product(sales: &[Sale]) -> HashMap<String, Accumulator> {
    accumulate_by(sales, |sale| sale.product.clone())
}

// ============================================================================
// TESTS
// ============================================================================
