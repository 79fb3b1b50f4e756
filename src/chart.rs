//! Stacked bar chart rendering with plotters (SVG backend).

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::full_palette::{GREY, ORANGE, PURPLE};
use tracing::info;

use crate::aggregate::UsageTable;
use crate::models::Role;

/// Chart canvas size in pixels.
pub const DEFAULT_SIZE: (u32, u32) = (1200, 600);

/// Fill color for a role's chart segments. Fixed per role so colors
/// stay stable across runs.
fn role_color(role: Role) -> RGBColor {
    match role {
        Role::User => BLUE,
        Role::Assistant => GREEN,
        Role::System => ORANGE,
        Role::Tool => PURPLE,
        Role::Other => GREY,
    }
}

/// Draw one stacked bar per bucket row into an SVG file at `path`.
/// Segments stack in [`Role::ALL`] order; the legend lists only roles
/// that actually contributed tokens. An empty table still produces a
/// valid, empty chart.
pub fn render_svg(table: &UsageTable, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("drawing chart background for {}", path.display()))?;

    let bars = table.rows.len();
    let headroom = table.max_row_total().max(1);
    let y_max = headroom + headroom.div_ceil(10);
    let title = format!("Token Count by {} and Role", table.bucket.axis_label());

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((0..bars.max(1)).into_segmented(), 0u64..y_max)
        .context("building chart axes")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(table.bucket.axis_label())
        .y_desc("Number of Tokens")
        .x_labels(bars.clamp(1, 16))
        .x_label_formatter(&|segment: &SegmentValue<usize>| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => table
                .rows
                .get(*i)
                .map(|row| row.key.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&format_axis_tokens)
        .draw()
        .context("drawing chart mesh")?;

    for role in Role::ALL {
        let color = role_color(role);
        let series = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.get(role) > 0)
            .map(|(i, row)| {
                let base: u64 = row.tokens[..role.index()].iter().sum();
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i), base),
                        (SegmentValue::Exact(i + 1), base + row.get(role)),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bar
            });

        let anno = chart
            .draw_series(series)
            .with_context(|| format!("drawing {} segments", role))?;
        if table.role_total(role) > 0 {
            anno.label(role.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
        }
    }

    if table.total_tokens() > 0 {
        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .context("drawing chart legend")?;
    }

    root.present()
        .with_context(|| format!("writing chart to {}", path.display()))?;
    info!("chart written to {}", path.display());
    Ok(())
}

/// Y-axis labels in multiples of 1000 once values get big.
fn format_axis_tokens(value: &u64) -> String {
    if *value >= 10_000 {
        format!("{}k", value / 1000)
    } else {
        value.to_string()
    }
}
