//! Plain-text seller table for terminal output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use salesboard_analytics::SalesReport;

const NAME_WIDTH: usize = 24;
const PRODUCT_WIDTH: usize = 28;

/// Render the ranked sellers as an aligned table followed by a totals line.
pub(crate) fn render_report(report: &SalesReport) -> String {
    let header = [
        pad_left("#", 3),
        pad_right("Seller", NAME_WIDTH),
        pad_left("Revenue", 12),
        pad_left("Profit", 12),
        pad_left("Sales", 7),
        pad_left("Bonus", 10),
        "Top product".to_string(),
    ]
    .join("  ");

    let mut out = String::new();
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(display_width(header.trim_end())));
    out.push('\n');

    for (rank, s) in report.sellers.iter().enumerate() {
        let top = s
            .top_products
            .first()
            .map(|t| format!("{} ({})", t.name, t.quantity))
            .unwrap_or_else(|| "-".to_string());
        let row = [
            pad_left(&(rank + 1).to_string(), 3),
            pad_right(&s.name, NAME_WIDTH),
            pad_left(&format!("{:.2}", s.revenue), 12),
            pad_left(&format!("{:.2}", s.profit), 12),
            pad_left(&s.sales_count.to_string(), 7),
            pad_left(&format!("{:.2}", s.bonus), 10),
            truncate_display(&top, PRODUCT_WIDTH),
        ]
        .join("  ");
        out.push_str(row.trim_end());
        out.push('\n');
    }

    let t = &report.summary;
    out.push_str(&format!(
        "\ntotal: revenue {:.2}, profit {:.2}, bonus {:.2}, sales {}\n",
        t.total_revenue, t.total_profit, t.total_bonus, t.total_sales_count
    ));
    out
}

/// Display width of a string, accounting for CJK double-width, emoji, etc.
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to `width` display columns, ending in ".." when cut.
fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }

    let budget = width.saturating_sub(2);
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate to exactly `width` display columns, text on the left.
fn pad_right(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw > width {
        let cut = truncate_display(s, width);
        let cw = display_width(&cut);
        format!("{}{}", cut, " ".repeat(width.saturating_sub(cw)))
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

/// Right-align within `width` columns. Longer text is left as is.
fn pad_left(s: &str, width: usize) -> String {
    let sw = display_width(s);
    format!("{}{}", " ".repeat(width.saturating_sub(sw)), s)
}
