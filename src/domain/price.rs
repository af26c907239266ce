use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel every store's free-to-play label is normalized to.
pub const FREE: &str = "Free";
/// Placeholder used when a result carries no price element.
pub const NOT_AVAILABLE: &str = "N/A";

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.]").unwrap());
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)").unwrap());

/// Maps the raw price text of a result to what the API reports.
pub fn normalize_price(raw: Option<String>) -> String {
    match raw.as_deref() {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some("Free") | Some("Free to Play") => FREE.to_string(),
        Some(price) => price.to_string(),
    }
}

/// Pulls the numeric amount out of a formatted price.
///
/// Every character that is not a digit or a dot is dropped first, then the
/// longest leading decimal number is parsed, so `"$1,299.99"` reads as
/// `1299.99` and `"$19.99 $9.99"` (stripped to `"19.999.99"`) as `19.999`.
/// Prices without any digits (`"N/A"`, `"Free"`) yield `None`.
pub fn parse_amount(price: &str) -> Option<f64> {
    let digits = NON_NUMERIC.replace_all(price, "");
    LEADING_NUMBER
        .find(&digits)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Lowest parseable price across all given prices, formatted for display.
/// `"Free"` entries are ignored rather than counted as zero.
pub fn best_price<'a>(prices: impl IntoIterator<Item = &'a str>) -> Option<String> {
    prices
        .into_iter()
        .filter(|price| *price != FREE)
        .filter_map(parse_amount)
        .min_by(|a, b| a.total_cmp(b))
        .map(format_amount)
}
