//! PDF canvas emitter built on `lopdf`.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::encoding::{encode, encode_text_string};
use super::font::FontFace;
use super::layout::{Layout, Page, PositionedItem, Rect, TextLine, HEADER_SHADE};
use super::options::EmitOptions;
use super::PRODUCER;
use crate::error::Result;

/// Serialize a layout as a PDF file.
///
/// Only the faces that appear in the layout are registered as fonts. The
/// output is deterministic: the same layout and options produce identical
/// bytes (set [`EmitOptions::created`] to stamp a creation date).
pub fn write_pdf(layout: &Layout, title: &str, options: &EmitOptions) -> Result<Vec<u8>> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let faces: BTreeSet<FontFace> = layout
        .pages
        .iter()
        .flat_map(|page| page.text_lines())
        .flat_map(|line| line.pieces.iter().map(|piece| piece.face))
        .collect();

    let mut font_names = BTreeMap::new();
    let mut font_dict = Dictionary::new();
    for (i, face) in faces.iter().enumerate() {
        let name = format!("F{}", i + 1);
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(name.clone(), font_id);
        font_names.insert(*face, name);
    }
    let resources_id = document.add_object(dictionary! { "Font" => font_dict });

    let mut page_ids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = PageCanvas::new(&font_names).paint(page);
        let bytes = content.encode()?;
        let stream = if options.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&bytes)?;
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, encoder.finish()?)
        } else {
            Stream::new(dictionary! {}, bytes)
        };
        let content_id = document.add_object(stream);

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page.size.width.into(), page.size.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);

    let info_id = document.add_object(info_dictionary(title, options));
    document.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    log::debug!(
        "Wrote PDF: {} pages, {} fonts, {} bytes",
        page_ids.len(),
        font_names.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn info_dictionary(title: &str, options: &EmitOptions) -> Dictionary {
    let mut info = Dictionary::new();
    if !title.trim().is_empty() {
        let format = if title.is_ascii() {
            StringFormat::Literal
        } else {
            StringFormat::Hexadecimal
        };
        info.set("Title", Object::String(encode_text_string(title.trim()), format));
    }
    info.set(
        "Producer",
        Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
    );
    if let Some(created) = options.created {
        let stamp = created.format("D:%Y%m%d%H%M%SZ").to_string();
        info.set("CreationDate", Object::String(stamp.into_bytes(), StringFormat::Literal));
    }
    info
}

/// Turns one page's items into content stream operations.
struct PageCanvas<'f> {
    fonts: &'f BTreeMap<FontFace, String>,
    operations: Vec<Operation>,
}

impl<'f> PageCanvas<'f> {
    fn new(fonts: &'f BTreeMap<FontFace, String>) -> Self {
        Self {
            fonts,
            operations: Vec::new(),
        }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn paint(mut self, page: &Page) -> Content {
        for item in &page.items {
            match item {
                PositionedItem::Text(line) => self.text(line),
                PositionedItem::Rule { from, to, width } => {
                    self.op("q", vec![]);
                    self.op("w", vec![(*width).into()]);
                    self.op("RG", vec![0.7_f32.into(), 0.7_f32.into(), 0.7_f32.into()]);
                    self.op("m", vec![from.0.into(), from.1.into()]);
                    self.op("l", vec![to.0.into(), to.1.into()]);
                    self.op("S", vec![]);
                    self.op("Q", vec![]);
                }
                PositionedItem::Cell { rect, header } => {
                    if *header {
                        self.fill(rect, HEADER_SHADE);
                    }
                    self.op("q", vec![]);
                    self.op("w", vec![0.5_f32.into()]);
                    self.op("RG", vec![0.6_f32.into(), 0.6_f32.into(), 0.6_f32.into()]);
                    self.op("re", rect_operands(rect));
                    self.op("S", vec![]);
                    self.op("Q", vec![]);
                }
                PositionedItem::Shade { rect, gray } => self.fill(rect, *gray),
            }
        }
        Content {
            operations: self.operations,
        }
    }

    fn fill(&mut self, rect: &Rect, gray: f32) {
        self.op("q", vec![]);
        self.op("rg", vec![gray.into(), gray.into(), gray.into()]);
        self.op("re", rect_operands(rect));
        self.op("f", vec![]);
        self.op("Q", vec![]);
    }

    fn text(&mut self, line: &TextLine) {
        let pieces: Vec<_> = line.pieces.iter().filter(|p| !p.text.is_empty()).collect();
        if pieces.is_empty() {
            return;
        }

        self.op("BT", vec![]);
        // Td is relative to the start of the previous text line.
        let mut origin = (0.0_f32, 0.0_f32);
        for piece in pieces {
            let Some(name) = self.fonts.get(&piece.face) else {
                continue;
            };
            let name = name.clone();
            let target = (line.x + piece.x, line.baseline);
            self.op("Tf", vec![name.as_str().into(), piece.size.into()]);
            self.op(
                "Td",
                vec![(target.0 - origin.0).into(), (target.1 - origin.1).into()],
            );
            self.op(
                "Tj",
                vec![Object::String(encode(&piece.text), StringFormat::Literal)],
            );
            origin = target;
        }
        self.op("ET", vec![]);
    }
}

fn rect_operands(rect: &Rect) -> Vec<Object> {
    vec![
        rect.x.into(),
        rect.y.into(),
        rect.width.into(),
        rect.height.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, StructuredDocument, StyledRun, TitleSource};
    use crate::render::layout::LayoutEngine;
    use crate::render::options::PageSize;
    use crate::render::template::CLASSIC;
    use chrono::{TimeZone, Utc};

    fn sample_layout() -> (StructuredDocument, Layout) {
        let mut doc = StructuredDocument::with_title("Sample", TitleSource::Hint);
        doc.push(Block::paragraph(vec![
            StyledRun::plain("Hello "),
            StyledRun::bold("bold"),
            StyledRun::plain(" (world)"),
        ]));
        doc.push(Block::code(vec!["let x = 1;".to_string()], None));
        let layout = LayoutEngine::new(&CLASSIC, PageSize::A4).layout(&doc);
        (doc, layout)
    }

    #[test]
    fn test_pdf_header_and_trailer() {
        let (doc, layout) = sample_layout();
        let bytes = write_pdf(&layout, &doc.title, &EmitOptions::new()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_only_used_fonts_registered() {
        let (doc, layout) = sample_layout();
        let bytes = write_pdf(&layout, &doc.title, &EmitOptions::new()).unwrap();

        let loaded = Document::load_mem(&bytes).unwrap();
        let mut base_fonts: Vec<String> = loaded
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font".as_slice()))
            .filter_map(|dict| dict.get(b"BaseFont").and_then(|b| b.as_name()).ok())
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect();
        base_fonts.sort();

        assert_eq!(base_fonts, vec!["Courier", "Times-Bold", "Times-Roman"]);
    }

    #[test]
    fn test_page_count_matches_layout() {
        let (doc, layout) = sample_layout();
        let bytes = write_pdf(&layout, &doc.title, &EmitOptions::new()).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), layout.pages.len());
    }

    #[test]
    fn test_uncompressed_content_has_text_operators() {
        let (doc, layout) = sample_layout();
        let options = EmitOptions::new().with_compression(false);
        let bytes = write_pdf(&layout, &doc.title, &options).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.contains("BT"));
        assert!(text.contains("Tj"));
        assert!(text.contains("(bold)"));
        assert!(text.contains(" re"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let (doc, layout) = sample_layout();
        let first = write_pdf(&layout, &doc.title, &EmitOptions::new()).unwrap();
        let second = write_pdf(&layout, &doc.title, &EmitOptions::new()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_info_dictionary() {
        let created = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap();
        let info = info_dictionary("Report", &EmitOptions::new().with_created(created));

        assert_eq!(
            info.get(b"Title").unwrap().as_str().unwrap(),
            b"Report".as_slice()
        );
        assert_eq!(
            info.get(b"CreationDate").unwrap().as_str().unwrap(),
            b"D:20240517083000Z".as_slice()
        );
        assert!(info.get(b"Producer").is_ok());
    }

    #[test]
    fn test_info_without_title_or_date() {
        let info = info_dictionary("  ", &EmitOptions::new());
        assert!(info.get(b"Title").is_err());
        assert!(info.get(b"CreationDate").is_err());
    }
}
