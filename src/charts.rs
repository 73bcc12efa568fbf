// 📈 Charts - gráficos PNG de los agregados
// Barras por producto y categoría, línea por fecha

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use log::debug;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, FontTransform};
use std::path::Path;

// ============================================================================
// OUTPUT FILES & STYLE
// ============================================================================

/// Fixed output file names, overwritten on each run
pub const PRODUCT_CHART: &str = "ventas_por_producto.png";
pub const CATEGORY_CHART: &str = "ventas_por_categoria.png";
pub const DATE_CHART: &str = "ventas_por_fecha.png";

const Y_LABEL: &str = "Total vendido (€)";

// Una paleta por gráfico, como en el informe original
const PRODUCT_COLOR: RGBColor = RGBColor(33, 145, 140);
const CATEGORY_COLOR: RGBColor = RGBColor(70, 130, 180);
const DATE_COLOR: RGBColor = RGBColor(128, 0, 128);

// ============================================================================
// PUBLIC API
// ============================================================================

/// Bar chart of summed totals by product, bars in key order
pub fn save_product_chart(rows: &[(String, f64)], path: &Path) -> Result<()> {
    draw_bar_chart(
        path,
        "Ventas totales por producto",
        "Producto",
        (800, 500),
        rows,
        PRODUCT_COLOR,
    )
}

/// Bar chart of summed totals by category
pub fn save_category_chart(rows: &[(String, f64)], path: &Path) -> Result<()> {
    draw_bar_chart(
        path,
        "Ventas totales por categoría",
        "Categoría",
        (600, 400),
        rows,
        CATEGORY_COLOR,
    )
}

/// Line chart of summed totals over time, markers at each date.
/// `rows` debe venir en orden cronológico.
pub fn save_date_chart(rows: &[(NaiveDate, f64)], path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    if rows.is_empty() {
        root.present()?;
        return Ok(());
    }

    let start = rows[0].0;
    let mut end = rows[rows.len() - 1].0;
    if end <= start {
        // a un solo punto le damos un eje de un día para poder dibujarlo
        end = start + Duration::days(1);
    }
    let y_max = axis_max(rows.iter().map(|(_, v)| *v));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Evolución de ventas por fecha",
            ("sans-serif", 26).into_font().style(FontStyle::Bold),
        )
        .margin(10)
        .x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d(start..end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(rows.len().min(12))
        .x_label_formatter(&|date: &NaiveDate| date.format("%Y-%m-%d").to_string())
        .x_label_style(
            TextStyle::from(("sans-serif", 12).into_font()).transform(FontTransform::Rotate90),
        )
        .x_desc("Fecha")
        .y_desc(Y_LABEL)
        .draw()?;

    chart.draw_series(LineSeries::new(
        rows.iter().map(|(date, value)| (*date, *value)),
        &DATE_COLOR,
    ))?;
    chart.draw_series(
        rows.iter()
            .map(|(date, value)| Circle::new((*date, *value), 4, DATE_COLOR.filled())),
    )?;

    root.present()?;
    debug!("wrote {}", path.display());
    Ok(())
}

// ============================================================================
// DRAWING
// ============================================================================

fn draw_bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    size: (u32, u32),
    rows: &[(String, f64)],
    color: RGBColor,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    if rows.is_empty() {
        root.present()?;
        return Ok(());
    }

    let n = rows.len() as u32;
    let y_max = axis_max(rows.iter().map(|(_, v)| *v));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26).into_font().style(FontStyle::Bold))
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) => rows
                .get(*i as usize)
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc(x_desc)
        .y_desc(Y_LABEL)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(color.mix(0.85).filled())
            .margin(8)
            .data(rows.iter().enumerate().map(|(i, (_, value))| (i as u32, *value))),
    )?;

    // Valor encima de cada barra, dos decimales
    let label_style = TextStyle::from(("sans-serif", 14).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(rows.iter().enumerate().map(|(i, (_, value))| {
        Text::new(
            format!("{:.2}", value),
            (SegmentValue::CenterOf(i as u32), *value + y_max * 0.01),
            label_style.clone(),
        )
    }))?;

    root.present()?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// Top of the y axis: 15% de aire por encima del máximo
fn axis_max<I: Iterator<Item = f64>>(values: I) -> f64 {
    let max = values.fold(0.0f64, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.15
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_max_adds_headroom() {
        let max = axis_max([3.0, 10.0, 7.5].into_iter());
        assert!((max - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_axis_max_empty_or_zero_defaults_to_one() {
        assert_eq!(axis_max(std::iter::empty()), 1.0);
        assert_eq!(axis_max([0.0].into_iter()), 1.0);
    }
}
