//! One-page service agreement rendering.
//!
//! Layout (A4, Helvetica 12pt, 10 mm rows):
//!
//! ```text
//!            Service Agreement - {company}
//!
//! Driver: {driver}
//! License Plate: {plate}
//! Mileage: {mileage}
//! Total Agreed Cost: ${total:.2}
//! Signed: _______________________
//! ```

pub mod encoding;
mod metrics;
pub mod pdf;

pub use encoding::EncodingError;

use crate::config::Settings;
use crate::domain::AgreementDocument;
use crate::report::{fmt_mileage, fmt_money};

use pdf::{Align, PageWriter};

const FONT_SIZE_PT: f64 = 12.0;
const CELL_WIDTH_MM: f64 = 200.0;
const ROW_HEIGHT_MM: f64 = 10.0;
const TITLE_GAP_MM: f64 = 10.0;

pub const SIGNATURE_LINE: &str = "Signed: _______________________";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("failed to assemble agreement PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Text content of an agreement, before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementText {
    pub title: String,
    /// Label/value lines followed by the signature line.
    pub lines: Vec<String>,
}

/// Build the agreement text. Used by the renderer and by on-screen previews.
pub fn agreement_lines(
    driver_name: &str,
    plate: &str,
    mileage: f64,
    total_cost: f64,
    settings: &Settings,
) -> AgreementText {
    AgreementText {
        title: format!("Service Agreement - {}", settings.company_name),
        lines: vec![
            format!("Driver: {driver_name}"),
            format!("License Plate: {plate}"),
            format!("Mileage: {}", fmt_mileage(mileage)),
            format!("Total Agreed Cost: {}", fmt_money(total_cost)),
            SIGNATURE_LINE.to_string(),
        ],
    }
}

/// Render the agreement as PDF bytes.
///
/// Fails with `RenderError::Encoding` if the company name, driver name or
/// plate contains a character the document font cannot encode.
pub fn render_agreement(
    driver_name: &str,
    plate: &str,
    mileage: f64,
    total_cost: f64,
    settings: &Settings,
) -> Result<AgreementDocument, RenderError> {
    encoding::check("company name", &settings.company_name)?;
    encoding::check("driver name", driver_name)?;
    encoding::check("license plate", plate)?;

    let text = agreement_lines(driver_name, plate, mileage, total_cost, settings);

    let mut page = PageWriter::new(FONT_SIZE_PT);
    page.cell(
        CELL_WIDTH_MM,
        ROW_HEIGHT_MM,
        &encoding::encode("title", &text.title)?,
        Align::Center,
    );
    page.line_break(TITLE_GAP_MM);
    for line in &text.lines {
        page.cell(
            CELL_WIDTH_MM,
            ROW_HEIGHT_MM,
            &encoding::encode("agreement line", line)?,
            Align::Left,
        );
    }

    let document = AgreementDocument::new(page.finish()?);
    tracing::debug!(bytes = document.byte_len(), "rendered agreement");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            company_name: "Acme Freight".to_string(),
            base_rate: 2.0,
            surcharge_threshold: 100.0,
            high_surcharge_rate: 0.10,
            low_surcharge_rate: 0.05,
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    fn position(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .position(|w| w == needle.as_bytes())
            .unwrap_or_else(|| panic!("{needle:?} not found"))
    }

    #[test]
    fn lines_are_in_fixed_order() {
        let text = agreement_lines("Dana Reyes", "TRK-042", 50.0, 105.0, &settings());
        assert_eq!(text.title, "Service Agreement - Acme Freight");
        assert_eq!(
            text.lines,
            vec![
                "Driver: Dana Reyes",
                "License Plate: TRK-042",
                "Mileage: 50.0",
                "Total Agreed Cost: $105.00",
                SIGNATURE_LINE,
            ]
        );
    }

    #[test]
    fn document_contains_total_line() {
        let doc = render_agreement("Dana Reyes", "TRK-042", 50.0, 105.0, &settings()).unwrap();
        let bytes = doc.as_bytes();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(bytes, "Total Agreed Cost: $105.00"));
    }

    #[test]
    fn document_text_follows_layout_order() {
        let doc = render_agreement("Dana Reyes", "TRK-042", 50.0, 105.0, &settings()).unwrap();
        let bytes = doc.as_bytes();
        let order = [
            "(Service Agreement - Acme Freight)",
            "(Driver: Dana Reyes)",
            "(License Plate: TRK-042)",
            "(Mileage: 50.0)",
            "(Total Agreed Cost: $105.00)",
            "(Signed: _______________________)",
        ];
        let positions: Vec<usize> = order.iter().map(|s| position(bytes, s)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn rendering_is_byte_for_byte_deterministic() {
        let a = render_agreement("Dana Reyes", "TRK-042", 50.0, 105.0, &settings()).unwrap();
        let b = render_agreement("Dana Reyes", "TRK-042", 50.0, 105.0, &settings()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_plate_still_renders_label() {
        let doc = render_agreement("Dana Reyes", "", 50.0, 105.0, &settings()).unwrap();
        assert!(contains(doc.as_bytes(), "(License Plate: )"));
    }

    fn page_strings(pdf: &[u8]) -> Vec<Vec<u8>> {
        let doc = lopdf::Document::load_mem(pdf).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let data = doc.get_page_content(page_id).unwrap();
        lopdf::content::Content::decode(&data)
            .unwrap()
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect()
    }

    #[test]
    fn latin1_names_are_single_byte_encoded() {
        let doc = render_agreement("Zoë", "", 1.0, 1.05, &settings()).unwrap();
        let strings = page_strings(doc.as_bytes());
        assert_eq!(strings[1], b"Driver: Zo\xEB");
    }

    #[test]
    fn page_holds_title_and_five_lines() {
        let doc = render_agreement("Dana Reyes", "TRK-042", 150.0, 330.0, &settings()).unwrap();
        let strings = page_strings(doc.as_bytes());
        assert_eq!(strings.len(), 6);
        assert_eq!(strings[0], b"Service Agreement - Acme Freight");
        assert_eq!(strings[4], b"Total Agreed Cost: $330.00");
    }

    #[test]
    fn unsupported_driver_name_is_an_error() {
        let err = match render_agreement("Łukasz", "", 50.0, 105.0, &settings()) {
            Err(RenderError::Encoding(err)) => err,
            other => panic!("expected an encoding error, got {other:?}"),
        };
        assert_eq!(err.field, "driver name");
        assert_eq!(err.character, 'Ł');
        assert_eq!(err.position, 0);
    }

    #[test]
    fn unsupported_company_name_is_an_error() {
        let mut s = settings();
        s.company_name = "Fracht 🚚".to_string();
        let err = render_agreement("Dana", "", 50.0, 105.0, &s).unwrap_err();
        assert!(matches!(err, RenderError::Encoding(e) if e.field == "company name"));
    }

    #[test]
    fn unsupported_plate_is_an_error() {
        let err = render_agreement("Dana", "ТРК-1", 50.0, 105.0, &settings()).unwrap_err();
        assert!(matches!(err, RenderError::Encoding(e) if e.field == "license plate"));
    }
}
