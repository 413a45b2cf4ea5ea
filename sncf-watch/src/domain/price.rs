//! Price label parsing.
//!
//! SNCF Connect returns prices as free-text display labels (e.g. "45,00 €"
//! or "à partir de 29,00 €"). This module extracts the numeric value by
//! keeping only digits and the comma decimal separator.

/// Parse a free-text price label into a numeric value in euros.
///
/// Every character that is not an ASCII digit or a comma is stripped, then
/// the comma is treated as a decimal separator. Labels whose residue is not
/// a single valid decimal number (empty, or containing more than one comma)
/// yield `None`; callers treat such offers as failing any price ceiling.
///
/// # Examples
///
/// ```
/// use sncf_watch::domain::parse_price;
///
/// assert_eq!(parse_price("45,00 €"), Some(45.0));
/// assert_eq!(parse_price("à partir de 29,50 €"), Some(29.5));
/// assert_eq!(parse_price("Complet"), None);
/// ```
pub fn parse_price(label: &str) -> Option<f64> {
    let stripped: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    if stripped.is_empty() {
        return None;
    }

    stripped.replace(',', ".").parse::<f64>().ok()
}
