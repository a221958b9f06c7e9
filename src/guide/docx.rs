//! WordprocessingML rendering
//!
//! Writes the minimum package Word and LibreOffice accept: content types,
//! package relationships, the main document and a style sheet.

use std::fmt::Write as _;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::document::{Align, Block, Document, Paragraph, Table, ACCENT, BORDER, FONT, GRAY_DARK, GRAY_LIGHT, LIGHT, PRIMARY};
use crate::common::{Error, Result};

const TWIPS_PER_INCH: f32 = 1440.0;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Escape text for element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round() as u32
}

fn styles_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}" w:cs="{FONT}"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="es-CL"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="264" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="360" w:after="80"/><w:outlineLvl w:val="0"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:outlineLvl w:val="2"/></w:pPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="{BORDER}"/><w:left w:val="single" w:sz="4" w:space="0" w:color="{BORDER}"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="{BORDER}"/><w:right w:val="single" w:sz="4" w:space="0" w:color="{BORDER}"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="{BORDER}"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="{BORDER}"/></w:tblBorders><w:tblCellMar><w:left w:w="108" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style></w:styles>"#
    )
}

/// One `<w:r>` with explicit font, weight, size and colour
fn run(out: &mut String, text: &str, bold: bool, points: u32, color: &str) {
    let half_points = points * 2;
    out.push_str("<w:r><w:rPr>");
    let _ = write!(out, r#"<w:rFonts w:ascii="{FONT}" w:hAnsi="{FONT}" w:cs="{FONT}"/>"#);
    if bold {
        out.push_str("<w:b/>");
    }
    let _ = write!(
        out,
        r#"<w:color w:val="{color}"/><w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(text)
    );
}

fn paragraph(out: &mut String, p: &Paragraph) {
    out.push_str("<w:p>");
    if p.align == Align::Center {
        out.push_str(r#"<w:pPr><w:jc w:val="center"/></w:pPr>"#);
    }
    run(out, &p.text, p.bold, p.size, p.color);
    out.push_str("</w:p>");
}

fn heading(out: &mut String, level: u8, text: &str) {
    let level = level.clamp(1, 3);
    let (points, color) = match level {
        1 => (24, PRIMARY),
        2 => (16, GRAY_DARK),
        _ => (12, GRAY_DARK),
    };
    let _ = write!(out, r#"<w:p><w:pPr><w:pStyle w:val="Heading{level}"/></w:pPr>"#);
    run(out, text, true, points, color);
    out.push_str("</w:p>");
}

fn cell(out: &mut String, width: Option<u32>, fill: &str, body: impl FnOnce(&mut String)) {
    out.push_str("<w:tc><w:tcPr>");
    if let Some(w) = width {
        let _ = write!(out, r#"<w:tcW w:w="{w}" w:type="dxa"/>"#);
    }
    let _ = write!(out, r#"<w:shd w:val="clear" w:color="auto" w:fill="{fill}"/></w:tcPr>"#);
    body(out);
    out.push_str("</w:tc>");
}

fn table(out: &mut String, t: &Table) {
    let widths: Vec<u32> = t.widths.iter().map(|w| twips(*w)).collect();
    let columns = t.headers.len();

    out.push_str(r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0"/></w:tblPr><w:tblGrid>"#);
    for col in 0..columns {
        let w = widths.get(col).copied().unwrap_or(twips(1.0));
        let _ = write!(out, r#"<w:gridCol w:w="{w}"/>"#);
    }
    out.push_str("</w:tblGrid>");

    out.push_str(r#"<w:tr><w:trPr><w:tblHeader/></w:trPr>"#);
    for (col, header) in t.headers.iter().enumerate() {
        cell(out, widths.get(col).copied(), ACCENT, |out| {
            out.push_str(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#);
            run(out, header, true, 10, PRIMARY);
            out.push_str("</w:p>");
        });
    }
    out.push_str("</w:tr>");

    for (i, row) in t.rows.iter().enumerate() {
        let fill = if i % 2 == 0 { LIGHT } else { GRAY_LIGHT };
        out.push_str("<w:tr>");
        for col in 0..columns {
            let text = row.get(col).map(String::as_str).unwrap_or("");
            cell(out, widths.get(col).copied(), fill, |out| {
                out.push_str("<w:p>");
                run(out, text, false, 9, PRIMARY);
                out.push_str("</w:p>");
            });
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
}

/// 0.05 inch tall full-width bar
fn accent_line(out: &mut String) {
    let _ = write!(
        out,
        r#"<w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/></w:tblPr><w:tblGrid><w:gridCol w:w="{}"/></w:tblGrid><w:tr><w:trPr><w:trHeight w:val="72" w:hRule="exact"/></w:trPr>"#,
        twips(6.5)
    );
    cell(out, None, ACCENT, |out| out.push_str("<w:p/>"));
    out.push_str("</w:tr></w:tbl>");
}

/// Serialize `word/document.xml`
pub fn document_xml(doc: &Document) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}"><w:body>"#
    );

    for block in &doc.blocks {
        match block {
            Block::Heading { level, text } => heading(&mut out, *level, text),
            Block::Paragraph(p) => paragraph(&mut out, p),
            Block::Table(t) => table(&mut out, t),
            Block::AccentLine => accent_line(&mut out),
            Block::Spacer => out.push_str("<w:p/>"),
            Block::PageBreak => out.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }

    // A table can't be the last body element before sectPr.
    out.push_str("<w:p/>");
    out.push_str(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#);
    out.push_str("</w:body></w:document>");
    out
}

/// Package the document as `.docx` bytes
pub fn to_bytes(doc: &Document) -> Result<Vec<u8>> {
    let parts: [(&str, String); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", PACKAGE_RELS.to_string()),
        ("word/document.xml", document_xml(doc)),
        ("word/styles.xml", styles_xml()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
    ];

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(contents.as_bytes())?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Write the document to `path`, creating parent directories
pub fn write_docx(doc: &Document, path: &Path) -> Result<()> {
    let bytes = to_bytes(doc)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_write(path, e))?;
    }
    std::fs::write(path, &bytes).map_err(|e| Error::file_write(path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote guide document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.heading(1, "Sección 1: Introducción");
        doc.paragraph(Paragraph::new("GENERA").bold().size(18).centered());
        doc.table(Table::new(&["Rol", "Email"], &[1.5, 2.5]).row(["Docente", "docente.qa@fne.cl"]).row(["Admin", "a&b <x>"]));
        doc.page_break();
        doc
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a & <b> "c" 'd'"#), "a &amp; &lt;b&gt; &quot;c&quot; &apos;d&apos;");
        assert_eq!(escape("Sección — ñ"), "Sección — ñ");
    }

    #[test]
    fn test_document_xml_content() {
        let xml = document_xml(&sample());

        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains("Sección 1: Introducción"));
        // 18pt is 36 half-points
        assert!(xml.contains(r#"<w:sz w:val="36"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        // 1.5in and 2.5in columns
        assert!(xml.contains(r#"<w:gridCol w:w="2160"/>"#));
        assert!(xml.contains(r#"<w:gridCol w:w="3600"/>"#));
        assert!(xml.contains(r#"w:fill="fbbf24""#));
        assert!(xml.contains(r#"w:fill="ffffff""#));
        assert!(xml.contains(r#"w:fill="f9fafb""#));
        assert!(xml.contains("a&amp;b &lt;x&gt;"));
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
        assert!(xml.ends_with("</w:body></w:document>"));
    }

    #[test]
    fn test_write_docx_package() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs/qa-system/GUIA_QA_TESTER.docx");
        write_docx(&sample(), &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/styles.xml",
            ]
        );

        let mut xml = String::new();
        archive.by_name("word/document.xml").unwrap().read_to_string(&mut xml).unwrap();
        assert!(xml.contains("docente.qa@fne.cl"));
    }
}
