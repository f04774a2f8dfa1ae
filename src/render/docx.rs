//! DOCX structural emitter.
//!
//! Writes a minimal WordprocessingML package with `zip` and `quick-xml`.
//! Blocks map onto named paragraph styles instead of positioned text, so
//! the word processor does its own line breaking and pagination.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::font::FontFamily;
use super::layout::{CODE_SHADE, HEADER_SHADE};
use super::options::EmitOptions;
use super::template::Template;
use super::wrap::TAB_WIDTH;
use super::PRODUCER;
use crate::error::Result;
use crate::model::{Block, StructuredDocument, StyledRun, Table};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

/// Numbering instance used by bullet paragraphs.
const BULLET_NUM_ID: &str = "1";

/// Deepest heading style Word defines.
const MAX_WORD_HEADING: u8 = 9;

/// Serialize a structured document as a DOCX package.
pub fn write_docx(
    doc: &StructuredDocument,
    template: &Template,
    options: &EmitOptions,
) -> Result<Vec<u8>> {
    let parts: [(&str, Vec<u8>); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
        ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec()),
        ("word/document.xml", document_xml(doc, template, options)?),
        ("word/styles.xml", styles_xml(template)?),
        ("word/numbering.xml", numbering_xml()?),
        ("docProps/core.xml", core_xml(doc, options)?),
    ];

    let file_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in &parts {
        zip.start_file(*name, file_options)?;
        zip.write_all(bytes)?;
    }
    let bytes = zip.finish()?.into_inner();

    log::debug!("Wrote DOCX: {} blocks, {} bytes", doc.blocks.len(), bytes.len());
    Ok(bytes)
}

/// Points to twentieths of a point.
fn twips(points: f32) -> String {
    ((points * 20.0).round() as i64).to_string()
}

/// Points to half-points (run font size).
fn half_points(points: f32) -> String {
    ((points * 2.0).round() as i64).to_string()
}

/// Gray level to an RGB hex fill.
fn gray_hex(gray: f32) -> String {
    let level = (gray.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("{level:02X}{level:02X}{level:02X}")
}

/// Replace characters XML 1.0 cannot carry (C0 controls other than tab,
/// newline and carriage return, U+FFFE, U+FFFF) with a space.
fn xml_safe(text: &str) -> Cow<'_, str> {
    fn illegal(c: char) -> bool {
        matches!(
            c,
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
        )
    }
    if text.contains(illegal) {
        Cow::Owned(text.chars().map(|c| if illegal(c) { ' ' } else { c }).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Thin wrapper over the quick-xml writer for WordprocessingML markup.
struct XmlBuilder {
    writer: Writer<Vec<u8>>,
}

impl XmlBuilder {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(element))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(element))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        let text = xml_safe(text);
        self.writer.write_event(Event::Text(BytesText::new(&text)))?;
        Ok(())
    }

    /// `<name w:val="value"/>`
    fn val(&mut self, name: &str, value: &str) -> Result<()> {
        self.empty(name, &[("w:val", value)])
    }

    /// `<name>text</name>`
    fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    fn fonts(&mut self, family: FontFamily) -> Result<()> {
        let name = family.word_name();
        self.empty(
            "w:rFonts",
            &[("w:ascii", name), ("w:hAnsi", name), ("w:cs", name)],
        )
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn document_xml(
    doc: &StructuredDocument,
    template: &Template,
    options: &EmitOptions,
) -> Result<Vec<u8>> {
    let mut xml = XmlBuilder::new()?;
    xml.start("w:document", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;
    xml.start("w:body", &[])?;

    if options.show_title && doc.needs_title_line() {
        styled_paragraph(&mut xml, "Title", &[StyledRun::plain(doc.title.trim())], template)?;
    }

    for block in &doc.blocks {
        match block {
            Block::Heading { level, runs } => {
                let style = format!("Heading{}", (*level).clamp(1, MAX_WORD_HEADING));
                styled_paragraph(&mut xml, &style, runs, template)?;
            }
            Block::Paragraph { runs } => {
                xml.start("w:p", &[])?;
                write_runs(&mut xml, runs, template, false)?;
                xml.end("w:p")?;
            }
            Block::Bullet { runs, depth } => {
                xml.start("w:p", &[])?;
                xml.start("w:pPr", &[])?;
                xml.val("w:pStyle", "ListBullet")?;
                xml.start("w:numPr", &[])?;
                xml.val("w:ilvl", &depth.to_string())?;
                xml.val("w:numId", BULLET_NUM_ID)?;
                xml.end("w:numPr")?;
                xml.end("w:pPr")?;
                write_runs(&mut xml, runs, template, false)?;
                xml.end("w:p")?;
            }
            Block::Quote { runs } => styled_paragraph(&mut xml, "Quote", runs, template)?,
            Block::Code { lines, .. } => line_paragraph(&mut xml, "Code", lines)?,
            Block::StructuralText { lines } => line_paragraph(&mut xml, "StructuralText", lines)?,
            Block::Table(table) => write_table(&mut xml, table, template, options)?,
        }
    }

    let page = options.page_size;
    let margin = twips(template.margin);
    xml.start("w:sectPr", &[])?;
    xml.empty(
        "w:pgSz",
        &[("w:w", twips(page.width).as_str()), ("w:h", twips(page.height).as_str())],
    )?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")?;

    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

fn styled_paragraph(
    xml: &mut XmlBuilder,
    style: &str,
    runs: &[StyledRun],
    template: &Template,
) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.val("w:pStyle", style)?;
    xml.end("w:pPr")?;
    write_runs(xml, runs, template, false)?;
    xml.end("w:p")
}

/// One paragraph holding verbatim lines separated by line breaks.
fn line_paragraph(xml: &mut XmlBuilder, style: &str, lines: &[String]) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.val("w:pStyle", style)?;
    xml.end("w:pPr")?;
    xml.start("w:r", &[])?;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            xml.empty("w:br", &[])?;
        }
        let expanded = line.replace('\t', &" ".repeat(TAB_WIDTH));
        xml.element("w:t", &[("xml:space", "preserve")], &expanded)?;
    }
    xml.end("w:r")?;
    xml.end("w:p")
}

fn write_runs(
    xml: &mut XmlBuilder,
    runs: &[StyledRun],
    template: &Template,
    force_bold: bool,
) -> Result<()> {
    for run in runs.iter().filter(|run| !run.is_empty()) {
        let bold = run.bold || force_bold;
        xml.start("w:r", &[])?;
        if run.code || bold || run.italic {
            xml.start("w:rPr", &[])?;
            if run.code {
                xml.fonts(template.code_font)?;
            }
            if bold {
                xml.empty("w:b", &[])?;
            }
            if run.italic {
                xml.empty("w:i", &[])?;
            }
            xml.end("w:rPr")?;
        }
        xml.element("w:t", &[("xml:space", "preserve")], &run.text)?;
        xml.end("w:r")?;
    }
    Ok(())
}

fn write_table(
    xml: &mut XmlBuilder,
    table: &Table,
    template: &Template,
    options: &EmitOptions,
) -> Result<()> {
    let columns = table.column_count();
    if columns == 0 {
        return Ok(());
    }

    let content_width = options.page_size.width - 2.0 * template.margin;
    let column_width = twips(content_width / columns as f32);
    let header_fill = gray_hex(HEADER_SHADE);

    xml.start("w:tbl", &[])?;
    xml.start("w:tblPr", &[])?;
    xml.val("w:tblStyle", "TableGrid")?;
    xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    xml.end("w:tblPr")?;

    xml.start("w:tblGrid", &[])?;
    for _ in 0..columns {
        xml.empty("w:gridCol", &[("w:w", column_width.as_str())])?;
    }
    xml.end("w:tblGrid")?;

    for (r, row) in table.rows().iter().enumerate() {
        let header = r == 0;
        xml.start("w:tr", &[])?;
        if header {
            xml.start("w:trPr", &[])?;
            xml.empty("w:tblHeader", &[])?;
            xml.end("w:trPr")?;
        }
        for cell in row {
            xml.start("w:tc", &[])?;
            xml.start("w:tcPr", &[])?;
            xml.empty("w:tcW", &[("w:w", column_width.as_str()), ("w:type", "dxa")])?;
            if header {
                xml.empty(
                    "w:shd",
                    &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", header_fill.as_str())],
                )?;
            }
            xml.end("w:tcPr")?;
            xml.start("w:p", &[])?;
            write_runs(xml, cell, template, header)?;
            xml.end("w:p")?;
            xml.end("w:tc")?;
        }
        xml.end("w:tr")?;
    }

    xml.end("w:tbl")?;
    // Word merges adjacent tables without a paragraph between them.
    xml.empty("w:p", &[])
}

fn styles_xml(template: &Template) -> Result<Vec<u8>> {
    let mut xml = XmlBuilder::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_MAIN)])?;

    let line = (((template.line_spacing / template.body_size) * 240.0).round() as i64).to_string();
    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.fonts(template.body_font)?;
    xml.val("w:sz", &half_points(template.body_size))?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[("w:after", "120"), ("w:line", line.as_str()), ("w:lineRule", "auto")],
    )?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.val("w:name", "Normal")?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;

    paragraph_style(&mut xml, "Title", "Title", None, |xml| {
        xml.start("w:pPr", &[])?;
        xml.empty("w:spacing", &[("w:after", "240")])?;
        xml.val("w:jc", "center")?;
        xml.end("w:pPr")?;
        xml.start("w:rPr", &[])?;
        xml.fonts(template.head_font)?;
        xml.empty("w:b", &[])?;
        xml.val("w:sz", &half_points(template.title_size))?;
        xml.end("w:rPr")
    })?;

    for level in 1..=MAX_WORD_HEADING {
        let id = format!("Heading{level}");
        let name = format!("heading {level}");
        let size = template.heading_size(level);
        paragraph_style(&mut xml, &id, &name, Some("Normal"), |xml| {
            xml.start("w:pPr", &[])?;
            xml.empty("w:keepNext", &[])?;
            xml.empty("w:spacing", &[("w:before", "240"), ("w:after", "60")])?;
            xml.val("w:outlineLvl", &(level - 1).to_string())?;
            xml.end("w:pPr")?;
            xml.start("w:rPr", &[])?;
            xml.fonts(template.head_font)?;
            xml.empty("w:b", &[])?;
            xml.val("w:sz", &half_points(size))?;
            xml.end("w:rPr")
        })?;
    }

    paragraph_style(&mut xml, "ListBullet", "List Bullet", None, |xml| {
        xml.start("w:pPr", &[])?;
        xml.empty("w:spacing", &[("w:after", "60")])?;
        xml.end("w:pPr")
    })?;

    paragraph_style(&mut xml, "Quote", "Quote", None, |xml| {
        xml.start("w:pPr", &[])?;
        xml.start("w:pBdr", &[])?;
        xml.empty(
            "w:left",
            &[("w:val", "single"), ("w:sz", "12"), ("w:space", "8"), ("w:color", "B3B3B3")],
        )?;
        xml.end("w:pBdr")?;
        xml.empty("w:ind", &[("w:left", "360")])?;
        xml.end("w:pPr")?;
        xml.start("w:rPr", &[])?;
        xml.empty("w:i", &[])?;
        xml.end("w:rPr")
    })?;

    let code_fill = gray_hex(CODE_SHADE);
    paragraph_style(&mut xml, "Code", "Code", None, |xml| {
        xml.start("w:pPr", &[])?;
        xml.empty(
            "w:shd",
            &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", code_fill.as_str())],
        )?;
        xml.empty("w:spacing", &[("w:line", "240"), ("w:lineRule", "auto")])?;
        xml.end("w:pPr")?;
        xml.start("w:rPr", &[])?;
        xml.fonts(template.code_font)?;
        xml.val("w:sz", &half_points(template.code_size))?;
        xml.end("w:rPr")
    })?;

    paragraph_style(&mut xml, "StructuralText", "Structural Text", None, |xml| {
        xml.start("w:pPr", &[])?;
        xml.empty("w:spacing", &[("w:line", "240"), ("w:lineRule", "auto")])?;
        xml.end("w:pPr")?;
        xml.start("w:rPr", &[])?;
        xml.fonts(template.code_font)?;
        xml.val("w:sz", &half_points(template.code_size))?;
        xml.end("w:rPr")
    })?;

    xml.start("w:style", &[("w:type", "table"), ("w:styleId", "TableGrid")])?;
    xml.val("w:name", "Table Grid")?;
    xml.start("w:tblPr", &[])?;
    xml.start("w:tblBorders", &[])?;
    for edge in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        xml.empty(
            edge,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "999999")],
        )?;
    }
    xml.end("w:tblBorders")?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.finish())
}

/// A paragraph style based on Normal. `body` writes its `w:pPr`/`w:rPr`,
/// which must follow `w:qFormat` in a style definition.
fn paragraph_style<F>(
    xml: &mut XmlBuilder,
    id: &str,
    name: &str,
    next: Option<&str>,
    body: F,
) -> Result<()>
where
    F: FnOnce(&mut XmlBuilder) -> Result<()>,
{
    xml.start("w:style", &[("w:type", "paragraph"), ("w:styleId", id)])?;
    xml.val("w:name", name)?;
    xml.val("w:basedOn", "Normal")?;
    if let Some(next) = next {
        xml.val("w:next", next)?;
    }
    xml.empty("w:qFormat", &[])?;
    body(xml)?;
    xml.end("w:style")
}

fn numbering_xml() -> Result<Vec<u8>> {
    let mut xml = XmlBuilder::new()?;
    xml.start("w:numbering", &[("xmlns:w", NS_MAIN)])?;

    xml.start("w:abstractNum", &[("w:abstractNumId", "0")])?;
    xml.val("w:multiLevelType", "hybridMultilevel")?;
    for (level, marker, indent) in [("0", "•", "720"), ("1", "◦", "1440")] {
        xml.start("w:lvl", &[("w:ilvl", level)])?;
        xml.val("w:start", "1")?;
        xml.val("w:numFmt", "bullet")?;
        xml.val("w:lvlText", marker)?;
        xml.val("w:lvlJc", "left")?;
        xml.start("w:pPr", &[])?;
        xml.empty("w:ind", &[("w:left", indent), ("w:hanging", "360")])?;
        xml.end("w:pPr")?;
        xml.end("w:lvl")?;
    }
    xml.end("w:abstractNum")?;

    xml.start("w:num", &[("w:numId", BULLET_NUM_ID)])?;
    xml.val("w:abstractNumId", "0")?;
    xml.end("w:num")?;

    xml.end("w:numbering")?;
    Ok(xml.finish())
}

fn core_xml(doc: &StructuredDocument, options: &EmitOptions) -> Result<Vec<u8>> {
    let mut xml = XmlBuilder::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;

    let title = doc.title.trim();
    if !title.is_empty() {
        xml.element("dc:title", &[], title)?;
    }
    xml.element("dc:creator", &[], PRODUCER)?;
    if let Some(created) = options.created {
        let stamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        xml.element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &stamp)?;
    }

    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}
