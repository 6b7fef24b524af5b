//! Output formatting for the CLI.

use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::prelude::*;

/// Terminal renderer for the storefront pages.
///
/// Human-readable lines go to stdout, problems to stderr. In JSON mode only
/// [`Output::json`] and [`Output::error`] print anything.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn mark(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", marker, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.mark(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.mark(style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Errors are printed in both modes; JSON mode wraps them in an object.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    /// Page title.
    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!(error = %e, "failed to render JSON output"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        self.mark(style("  •").dim(), item);
    }

    /// Columns padded to `widths`; a zero width leaves the column unpadded.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let row: Vec<String> = cols
            .iter()
            .zip(widths.iter().chain(std::iter::repeat(&0)))
            .map(|(col, &width)| pad(col, width))
            .collect();
        println!("  {}", row.join("  ").trim_end());
    }

    /// Render a toast the way the page banner would.
    pub fn notification(&self, toast: &Notification) {
        match toast.kind {
            NotificationKind::Success => self.success(&toast.message),
            NotificationKind::Error => self.warn(&toast.message),
        }
    }

    /// Spinner shown while a page loads; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Pad by display width so styled and wide glyphs line up.
fn pad(col: &str, width: usize) -> String {
    let visible = console::measure_text_width(col);
    format!("{}{}", col, " ".repeat(width.saturating_sub(visible)))
}

/// Price column: sale price, with the original struck through when discounted.
pub fn price_label(product: &Product) -> String {
    match product.discount_percentage() {
        Some(pct) => format!(
            "{} {} {}",
            style(product.sale_price()).green().bold(),
            style(product.price()).dim().strikethrough(),
            style(format!("-{}%", pct)).yellow()
        ),
        None => product.sale_price().to_string(),
    }
}

/// Star rating out of five.
pub fn rating_stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
