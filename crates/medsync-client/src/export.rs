//! # Export Surface
//!
//! Two export paths exist:
//!
//! - **CSV** is assembled locally from whatever rows a view currently
//!   holds; no network involved.
//! - **XLSX/PDF** are rendered server-side and streamed back inside the
//!   response envelope as a base64 blob, decoded here into a downloadable
//!   file.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use medsync_core::ReportType;

use crate::error::{SyncError, SyncResult};
use crate::protocol::Action;

// =============================================================================
// Local CSV Assembly
// =============================================================================

/// Quotes one CSV field when it contains a delimiter, quote, or newline.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Assembles a CSV document from in-memory rows.
///
/// Every row is padded or truncated to the header width so a ragged input
/// cannot shift columns.
pub fn csv_document(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();

    let header_line: Vec<String> = headers.iter().map(|h| csv_field(h)).collect();
    out.push_str(&header_line.join(","));
    out.push('\n');

    for row in rows {
        let mut line: Vec<String> = row.iter().take(headers.len()).map(|f| csv_field(f)).collect();
        while line.len() < headers.len() {
            line.push(String::new());
        }
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

// =============================================================================
// Server-Rendered Exports
// =============================================================================

/// Wire shape of a server-rendered export payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportPayload {
    /// Base64-encoded file body.
    content: String,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

/// A downloadable file produced by an export action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Decodes the export payload of a successful export action.
    pub(crate) fn from_wire(
        action: Action,
        report_type: ReportType,
        extension: &str,
        data: Value,
    ) -> SyncResult<Self> {
        let payload: ExportPayload =
            serde_json::from_value(data).map_err(|e| SyncError::UnexpectedPayload {
                action: action.to_string(),
                reason: e.to_string(),
            })?;

        let bytes = BASE64
            .decode(payload.content.as_bytes())
            .map_err(|e| SyncError::UnexpectedPayload {
                action: action.to_string(),
                reason: format!("export content is not valid base64: {}", e),
            })?;

        Ok(ExportFile {
            file_name: payload
                .file_name
                .unwrap_or_else(|| format!("report_{}.{}", report_type, extension)),
            mime_type: payload
                .mime_type
                .unwrap_or_else(|| default_mime(extension).to_string()),
            bytes,
        })
    }
}

fn default_mime(extension: &str) -> &'static str {
    match extension {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_plain_rows() {
        let doc = csv_document(
            &["id", "name", "stock"],
            &[
                vec!["INV001".into(), "Paracetamol 500mg".into(), "450".into()],
                vec!["INV002".into(), "Insulin Vials".into(), "25".into()],
            ],
        );
        assert_eq!(
            doc,
            "id,name,stock\nINV001,Paracetamol 500mg,450\nINV002,Insulin Vials,25\n"
        );
    }

    #[test]
    fn test_csv_quoting() {
        let doc = csv_document(
            &["name", "note"],
            &[vec!["Gauze, sterile".into(), "say \"hi\"".into()]],
        );
        assert_eq!(doc, "name,note\n\"Gauze, sterile\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_csv_pads_short_rows() {
        let doc = csv_document(&["a", "b", "c"], &[vec!["1".into()]]);
        assert_eq!(doc, "a,b,c\n1,,\n");
    }

    #[test]
    fn test_export_file_decodes_base64() {
        let data = json!({
            "content": BASE64.encode(b"%PDF-1.4 fake"),
            "fileName": "report_inventory.pdf",
            "mimeType": "application/pdf"
        });
        let file =
            ExportFile::from_wire(Action::ExportReportAsPdf, ReportType::Inventory, "pdf", data)
                .unwrap();
        assert_eq!(file.file_name, "report_inventory.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.bytes, b"%PDF-1.4 fake");
    }

    #[test]
    fn test_export_file_defaults_name_and_mime() {
        let data = json!({ "content": BASE64.encode(b"PK\x03\x04") });
        let file = ExportFile::from_wire(
            Action::ExportReportAsExcel,
            ReportType::Financial,
            "xlsx",
            data,
        )
        .unwrap();
        assert_eq!(file.file_name, "report_financial.xlsx");
        assert!(file.mime_type.contains("spreadsheetml"));
    }

    #[test]
    fn test_export_file_rejects_bad_base64() {
        let data = json!({ "content": "not-base64!!!" });
        let err = ExportFile::from_wire(
            Action::ExportReportAsExcel,
            ReportType::Inventory,
            "xlsx",
            data,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::UnexpectedPayload { .. }));
    }
}
