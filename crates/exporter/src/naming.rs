//! Report naming.
//!
//! Responsibilities:
//! - Resolve the human-readable report name for a descriptor.
//! - Derive translation-key segments from (possibly namespaced) model names.
//! - Make report names safe for use in filenames.
//!
//! Does NOT handle:
//! - Storing names; everything here is a pure function of its inputs.
//!
//! Invariants:
//! - Resolution order: explicit name, keyed default filter, model report
//!   title, generic custom-report label.
//! - Translation failures propagate; no step silently skips a missing key.

use crate::constants::{KEY_CUSTOM_REPORT, KEY_DEFAULT_FILTERS, KEY_REPORT_TITLES};
use crate::filter::FilterDescriptor;
use crate::locale::{Catalog, LocaleError};

/// Resolve the report name shown in exports.
pub fn resolve_report_name(
    descriptor: &FilterDescriptor,
    catalog: &Catalog,
) -> Result<String, LocaleError> {
    if let Some(name) = &descriptor.name {
        return Ok(name.clone());
    }

    match (descriptor.model.as_deref(), descriptor.default_filter_key()) {
        (Some(model), Some(key)) => catalog.translate(&format!(
            "{}.{}.{}",
            KEY_DEFAULT_FILTERS,
            demodulize(model).to_lowercase(),
            key
        )),
        (Some(model), None) => catalog.translate(&format!(
            "{}.{}",
            KEY_REPORT_TITLES,
            underscore(demodulize(model))
        )),
        (None, _) => catalog.translate(KEY_CUSTOM_REPORT),
    }
}

/// Strip the module path from a constant name: `Billing::Invoice` -> `Invoice`.
pub fn demodulize(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// Convert a CamelCase name to snake_case: `LineItem` -> `line_item`,
/// `HTTPRequest` -> `http_request`. Module separators become `/`.
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.replace("::", "/").chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                out.push('_');
            }
        }
        match c {
            '-' => out.push('_'),
            _ => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}

/// Turn a field identifier into a label: `created_at` -> `Created at`,
/// `customer_id` -> `Customer`.
pub fn humanize(field: &str) -> String {
    let base = field.strip_suffix("_id").unwrap_or(field);
    let spaced = base.replace('_', " ");
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Lowercase a name and replace whitespace and `/ \ : * ? " < > | -` with `_`.
pub fn file_system_safe(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '-' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RequestParams;

    fn descriptor(params: RequestParams) -> FilterDescriptor {
        FilterDescriptor::deserialize_from_params(&params.with("wf_fields", "name")).unwrap()
    }

    #[test]
    fn test_explicit_name_wins() {
        let catalog = Catalog::builtin().unwrap();
        let d = descriptor(
            RequestParams::new()
                .with("wf_name", "My Report")
                .with("wf_model", "Order")
                .with("wf_key", "recent"),
        );
        assert_eq!(resolve_report_name(&d, &catalog).unwrap(), "My Report");
    }

    #[test]
    fn test_keyed_default_filter() {
        let catalog = Catalog::builtin().unwrap();
        let d = descriptor(
            RequestParams::new()
                .with("wf_model", "Billing::Invoice")
                .with("wf_key", "overdue"),
        );
        assert_eq!(resolve_report_name(&d, &catalog).unwrap(), "Overdue Invoices");
    }

    #[test]
    fn test_sentinel_key_falls_back_to_title() {
        let catalog = Catalog::builtin().unwrap();
        let d = descriptor(
            RequestParams::new()
                .with("wf_model", "Sales::LineItem")
                .with("wf_key", "-1"),
        );
        assert_eq!(resolve_report_name(&d, &catalog).unwrap(), "Line Items Report");
    }

    #[test]
    fn test_no_model_uses_generic_label() {
        let catalog = Catalog::builtin().unwrap();
        let d = descriptor(RequestParams::new());
        assert_eq!(resolve_report_name(&d, &catalog).unwrap(), "Custom Report");
    }

    #[test]
    fn test_missing_translation_propagates() {
        let catalog = Catalog::builtin().unwrap();
        let d = descriptor(
            RequestParams::new()
                .with("wf_model", "Order")
                .with("wf_key", "nonexistent"),
        );
        assert!(matches!(
            resolve_report_name(&d, &catalog),
            Err(LocaleError::MissingTranslation { .. })
        ));

        let d = descriptor(RequestParams::new().with("wf_model", "Shipment"));
        assert!(resolve_report_name(&d, &catalog).is_err());
    }

    #[test]
    fn test_demodulize() {
        assert_eq!(demodulize("Billing::Invoice"), "Invoice");
        assert_eq!(demodulize("A::B::LineItem"), "LineItem");
        assert_eq!(demodulize("Order"), "Order");
    }

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("LineItem"), "line_item");
        assert_eq!(underscore("HTTPRequest"), "http_request");
        assert_eq!(underscore("Order2Go"), "order2_go");
        assert_eq!(underscore("order"), "order");
        assert_eq!(underscore("Admin::UserRole"), "admin/user_role");
        assert_eq!(underscore("multi-word"), "multi_word");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("created_at"), "Created at");
        assert_eq!(humanize("customer_id"), "Customer");
        assert_eq!(humanize("amount"), "Amount");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_file_system_safe() {
        assert_eq!(
            file_system_safe("Q1 Sales/Returns: \"Final\" - v2?"),
            "q1_sales_returns___final____v2_"
        );
        assert_eq!(file_system_safe("a\\b*c<d>e|f"), "a_b_c_d_e_f");
    }
}
