//! Single-page PDF assembly on top of `lopdf`.
//!
//! Supports exactly what the agreement needs: one A4 page, one Type1 font
//! (Helvetica, WinAnsi), and text cells laid out top to bottom. Positions are
//! in millimetres from the top-left corner and converted to PDF points when
//! the text operators are emitted.
//!
//! No creation date or document ID is written and the content stream is left
//! uncompressed, so equal input gives equal bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::metrics::string_width_pt;

/// Points per millimetre.
const SCALE: f64 = 72.0 / 25.4;

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_MM: f64 = 10.0;
/// Horizontal padding inside a cell for left-aligned text.
const CELL_PADDING_MM: f64 = MARGIN_MM / 10.0;

const FONT_NAME: &str = "F1";
const PRODUCER: &str = "shipment-agreement";

/// Horizontal alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Collects the text operations of a single page.
#[derive(Debug, Clone)]
pub struct PageWriter {
    font_size_pt: f64,
    y_mm: f64,
    operations: Vec<Operation>,
}

impl PageWriter {
    pub fn new(font_size_pt: f64) -> Self {
        Self {
            font_size_pt,
            y_mm: MARGIN_MM,
            operations: Vec::new(),
        }
    }

    /// Draw `text` (already single-byte encoded) in a `width` × `height` cell
    /// at the left margin, then move to the next line.
    pub fn cell(&mut self, width: f64, height: f64, text: &[u8], align: Align) {
        if !text.is_empty() {
            let text_width_mm = string_width_pt(text, self.font_size_pt) / SCALE;
            let x_mm = match align {
                Align::Left => MARGIN_MM + CELL_PADDING_MM,
                Align::Center => MARGIN_MM + (width - text_width_mm) / 2.0,
            };
            // Baseline sits slightly below the vertical centre of the cell.
            let font_size_mm = self.font_size_pt / SCALE;
            let baseline_mm = self.y_mm + 0.5 * height + 0.3 * font_size_mm;

            self.operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![FONT_NAME.into(), points(self.font_size_pt)]),
                Operation::new(
                    "Td",
                    vec![
                        points(x_mm * SCALE),
                        points((PAGE_HEIGHT_MM - baseline_mm) * SCALE),
                    ],
                ),
                Operation::new("Tj", vec![Object::string_literal(text.to_vec())]),
                Operation::new("ET", vec![]),
            ]);
        }
        self.line_break(height);
    }

    /// Move down by `height` millimetres.
    pub fn line_break(&mut self, height: f64) {
        self.y_mm += height;
    }

    /// Assemble the complete PDF file.
    pub fn finish(self) -> Result<Vec<u8>, lopdf::Error> {
        let stream = Content {
            operations: self.operations,
        }
        .encode()?;

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let contents_id = doc.add_object(Stream::new(dictionary! {}, stream));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                points(PAGE_WIDTH_MM * SCALE),
                points(PAGE_HEIGHT_MM * SCALE),
            ],
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_NAME => font_id },
            },
            "Contents" => contents_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut out = Vec::new();
        doc.save_to(&mut out)?;
        Ok(out)
    }
}

/// A coordinate or size in points, rounded to two decimals.
fn points(value: f64) -> Object {
    Object::Real(((value * 100.0).round() / 100.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_text_ops(pdf: &[u8]) -> Vec<(Vec<Object>, Vec<u8>)> {
        let doc = Document::load_mem(pdf).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

        let mut texts = Vec::new();
        let mut position = Vec::new();
        for op in content.operations {
            match op.operator.as_str() {
                "Td" => position = op.operands,
                "Tj" => texts.push((position.clone(), op.operands[0].as_str().unwrap().to_vec())),
                _ => {}
            }
        }
        texts
    }

    fn x_of(position: &[Object]) -> f32 {
        position[0].as_float().unwrap()
    }

    fn sample_pdf() -> Vec<u8> {
        let mut page = PageWriter::new(12.0);
        page.cell(200.0, 10.0, b"Title (draft)", Align::Center);
        page.line_break(10.0);
        page.cell(200.0, 10.0, b"Body", Align::Left);
        page.finish().unwrap()
    }

    #[test]
    fn output_reloads_as_a_single_page_document() {
        let pdf = sample_pdf();
        assert!(pdf.starts_with(b"%PDF-1.4"));

        let texts = page_text_ops(&pdf);
        let strings: Vec<&[u8]> = texts.iter().map(|(_, s)| s.as_slice()).collect();
        assert_eq!(strings, vec![&b"Title (draft)"[..], &b"Body"[..]]);
    }

    #[test]
    fn font_and_producer_are_declared() {
        let pdf = sample_pdf();
        let doc = Document::load_mem(&pdf).unwrap();
        let font = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .find(|dict| dict.get(b"Type").and_then(Object::as_name).ok() == Some(&b"Font"[..]))
            .unwrap();
        assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");

        let info_ref = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_ref).unwrap();
        assert_eq!(info.get(b"Producer").unwrap().as_str().unwrap(), PRODUCER.as_bytes());
    }

    #[test]
    fn rows_move_down_the_page() {
        let mut page = PageWriter::new(12.0);
        page.cell(200.0, 10.0, b"one", Align::Left);
        page.line_break(10.0);
        page.cell(200.0, 10.0, b"two", Align::Left);
        let texts = page_text_ops(&page.finish().unwrap());

        let y = |idx: usize| texts[idx].0[1].as_float().unwrap();
        let step_pt = (20.0 * SCALE) as f32;
        assert!((y(0) - y(1) - step_pt).abs() < 0.05, "{} vs {}", y(0), y(1));
    }

    #[test]
    fn centered_text_is_right_of_left_aligned_text() {
        let mut page = PageWriter::new(12.0);
        page.cell(200.0, 10.0, b"Centered", Align::Center);
        page.cell(200.0, 10.0, b"Left", Align::Left);
        let texts = page_text_ops(&page.finish().unwrap());

        let left_x = ((MARGIN_MM + CELL_PADDING_MM) * SCALE) as f32;
        assert!((x_of(&texts[1].0) - left_x).abs() < 0.01);
        assert!(x_of(&texts[0].0) > left_x);
    }
}
