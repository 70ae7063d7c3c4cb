//! Export form rendering for the index page.
//!
//! Responsibilities:
//! - Render an HTML fragment that posts the current filter state to the
//!   export endpoint with a format picker.
//!
//! Does NOT handle:
//! - Page layout or styling; the fragment is embedded by the host page.
//!
//! Invariants:
//! - Every hidden input comes from `FilterDescriptor::to_params`, so posting
//!   the form rebuilds the same descriptor.
//! - All attribute values and text are escaped.

use crate::backend::FilterBackend;
use crate::constants::{KEY_EXPORT_SUBMIT, PARAM_EXPORT_FORMAT};
use crate::error::Result;
use crate::filter::{ExportFormat, FilterDescriptor};
use crate::formatters::escape_xml;
use crate::locale::Catalog;
use crate::naming::resolve_report_name;

/// Render the export form for `descriptor`, posting to `action`.
pub fn render_export_form(
    descriptor: &FilterDescriptor,
    backend: &dyn FilterBackend,
    catalog: &Catalog,
    action: &str,
) -> Result<String> {
    let report_name = resolve_report_name(descriptor, catalog)?;
    let submit = catalog.translate(KEY_EXPORT_SUBMIT)?;

    let mut html = format!(
        "<form class=\"wf_export\" action=\"{}\" method=\"post\">\n",
        escape_xml(action)
    );
    html.push_str(&format!("  <h3>{}</h3>\n", escape_xml(&report_name)));

    for (name, value) in descriptor.to_params().iter() {
        html.push_str(&format!(
            "  <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            escape_xml(name),
            escape_xml(value)
        ));
    }

    html.push_str(&format!("  <select name=\"{PARAM_EXPORT_FORMAT}\">\n"));
    let standard = ExportFormat::ALL
        .iter()
        .filter(|f| **f != ExportFormat::Custom)
        .map(|f| f.as_str().to_string());
    for option in standard.chain(backend.custom_formats(descriptor)) {
        let selected = if option.eq_ignore_ascii_case(&descriptor.format) {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "    <option value=\"{}\"{selected}>{}</option>\n",
            escape_xml(&option),
            escape_xml(&option.to_uppercase())
        ));
    }
    html.push_str("  </select>\n");
    html.push_str(&format!(
        "  <input type=\"submit\" value=\"{}\">\n</form>\n",
        escape_xml(&submit)
    ));
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::filter::RequestParams;

    fn backend() -> InMemoryBackend {
        InMemoryBackend::from_json_str(
            r#"{"Order": {"rows": [], "custom_formats": {"kml": "{name}"}}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_form_carries_filter_state() {
        let params = RequestParams::new()
            .with("wf_model", "Order")
            .with("wf_fields", "name,amount")
            .with("wf_export_format", "csv")
            .with("wf_status", "\"open\" & <new>");
        let descriptor = FilterDescriptor::deserialize_from_params(&params).unwrap();
        let catalog = Catalog::builtin().unwrap();

        let html =
            render_export_form(&descriptor, &backend(), &catalog, "/exporter/export").unwrap();

        assert!(html.starts_with(
            "<form class=\"wf_export\" action=\"/exporter/export\" method=\"post\">"
        ));
        assert!(html.contains("<h3>Orders Report</h3>"));
        assert!(html.contains("name=\"wf_fields\" value=\"name,amount\""));
        assert!(html.contains("value=\"&quot;open&quot; &amp; &lt;new&gt;\""));
        assert!(html.contains("<option value=\"csv\" selected>CSV</option>"));
        assert!(html.contains("<option value=\"kml\">KML</option>"));
        assert!(!html.contains("value=\"custom\""));
        assert!(html.contains("<input type=\"submit\" value=\"Export\">"));
    }

    #[test]
    fn test_form_requires_translations() {
        let params = RequestParams::new()
            .with("wf_model", "Shipment")
            .with("wf_fields", "name");
        let descriptor = FilterDescriptor::deserialize_from_params(&params).unwrap();
        let catalog = Catalog::builtin().unwrap();
        assert!(render_export_form(&descriptor, &backend(), &catalog, "/x").is_err());
    }
}
