//! Text formatting for command-line output.

use ndarray::Array1;
use unicode_width::UnicodeWidthStr;

/// Format a value with smart precision.
pub fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format coordinates as `[a, b, ..., z] (n)`, eliding the middle past `max_shown`.
pub fn format_coordinates(values: &Array1<f64>, max_shown: usize) -> String {
    let n = values.len();
    let parts: Vec<String> = if n <= max_shown || max_shown < 2 {
        values.iter().map(|&v| format_value(v)).collect()
    } else {
        let head = max_shown - 1;
        let mut parts: Vec<String> = values.iter().take(head).map(|&v| format_value(v)).collect();
        parts.push("...".to_string());
        parts.push(format_value(values[n - 1]));
        parts
    };
    format!("[{}] ({})", parts.join(", "), n)
}

/// Left-align text in a column of `width` terminal cells.
pub fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// Render rows as columns separated by two spaces.
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(cell, w))
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let mut out = render(header.to_vec());
    out.push('\n');
    for row in rows {
        out.push_str(&render(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}
