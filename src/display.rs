//! Terminal rendering of the aggregated table.
//!
//! When no output file is requested the chart is drawn straight into
//! the terminal: one horizontal stacked bar per bucket, colored per
//! role, with a legend and per-bucket totals.

use owo_colors::{AnsiColors, OwoColorize};

use crate::aggregate::UsageTable;
use crate::models::Role;

const BLOCK: &str = "█";
const MIN_BAR_WIDTH: usize = 10;

/// Terminal color for a role's segments, matching the hues used in the
/// SVG chart.
fn role_color(role: Role) -> AnsiColors {
    match role {
        Role::User => AnsiColors::Blue,
        Role::Assistant => AnsiColors::Green,
        Role::System => AnsiColors::Yellow,
        Role::Tool => AnsiColors::Magenta,
        Role::Other => AnsiColors::White,
    }
}

/// Render the table as colored text, `width` columns wide.
pub fn render_table(table: &UsageTable, width: usize) -> String {
    if table.is_empty() {
        return "no messages to chart\n".to_string();
    }

    let key_width = table
        .rows
        .iter()
        .map(|row| row.key.len())
        .max()
        .unwrap_or(0);
    let max_total = table.max_row_total().max(1);
    // key + two separators + total column
    let bar_width = width
        .saturating_sub(key_width + 2 + 8)
        .max(MIN_BAR_WIDTH);

    let mut out = String::new();
    for row in &table.rows {
        out.push_str(&format!("{:>key_width$}  ", row.key));
        for role in Role::ALL {
            let tokens = row.get(role);
            if tokens == 0 {
                continue;
            }
            let cells = segment_width(tokens, max_total, bar_width);
            out.push_str(
                &BLOCK
                    .repeat(cells)
                    .color(role_color(role))
                    .to_string(),
            );
        }
        out.push_str(&format!(" {}\n", format_tokens(row.total())));
    }

    out.push('\n');
    let mut legend = Vec::new();
    for role in Role::ALL {
        let total = table.role_total(role);
        if total == 0 {
            continue;
        }
        legend.push(format!(
            "{} {} ({})",
            BLOCK.color(role_color(role)),
            role,
            format_tokens(total)
        ));
    }
    out.push_str(&legend.join("   "));
    out.push('\n');
    out
}

/// Columns for one segment, at least one so a non-zero segment is
/// always visible.
fn segment_width(tokens: u64, max_total: u64, bar_width: usize) -> usize {
    let exact = (tokens as f64 / max_total as f64) * bar_width as f64;
    (exact.round() as usize).max(1)
}

/// Compact token formatting for totals and legends.
pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}
