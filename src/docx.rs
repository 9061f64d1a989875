//! HTML → Word-compatible container.
//!
//! Word opens an OOXML package whose `word/document.xml` contains a single
//! `<w:altChunk>` reference to an embedded MHT part and renders that HTML
//! itself on load. Emitting an altChunk package instead of translating HTML
//! into native WordprocessingML keeps the converter a pure packaging step:
//! the fidelity of the result is Word's own HTML import, which handles the
//! full range of constructs the Markdown renderer can emit.
//!
//! One wrinkle: Word's HTML importer does not resolve `data:` URIs inside an
//! altChunk. Every embedded data-URI image is therefore lifted out of the
//! HTML into its own MIME part of the MHT multipart, and the `src` attribute
//! is pointed at the part's content location.

use crate::config::{Margins, Orientation};
use crate::error::Docs2DocxError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Boundary separating parts of the MHT multipart.
const MHT_BOUNDARY: &str = "NEXT.ITEM-BOUNDARY";

/// Content location of the HTML part; image parts are numbered siblings.
const DOCUMENT_LOCATION: &str = "file:///C:/fake/document.html";

static CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="mht" ContentType="message/rfc822"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>
"#;

static PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document.xml"/>
</Relationships>
"#;

static DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="htmlChunk" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/aFChunk" Target="/word/afchunk.mht"/>
</Relationships>
"#;

/// Convert a complete HTML document into docx container bytes.
///
/// `orientation` selects the page size; `margins` land on `<w:pgMar>`
/// unvalidated. Out-of-range values are Word's problem, matching the
/// no-validation contract of the config layer.
pub fn html_to_docx(
    html: &str,
    orientation: Orientation,
    margins: &Margins,
) -> Result<Vec<u8>, Docs2DocxError> {
    let mht = build_mht(html);
    let document_xml = build_document_xml(orientation, margins);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", PACKAGE_RELS_XML),
        ("word/document.xml", document_xml.as_str()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
        ("word/afchunk.mht", mht.as_str()),
    ] {
        zip.start_file(name, deflated).map_err(zip_error)?;
        zip.write_all(content.as_bytes())
            .map_err(|e| Docs2DocxError::DocxConversionFailed {
                detail: e.to_string(),
            })?;
    }

    let cursor = zip.finish().map_err(zip_error)?;
    Ok(cursor.into_inner())
}

fn zip_error(e: zip::result::ZipError) -> Docs2DocxError {
    Docs2DocxError::DocxConversionFailed {
        detail: e.to_string(),
    }
}

// ── document.xml ─────────────────────────────────────────────────────────

fn build_document_xml(orientation: Orientation, margins: &Margins) -> String {
    let (width, height) = orientation.page_size();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>
    <w:altChunk r:id="htmlChunk"/>
    <w:sectPr>
      <w:pgSz w:w="{width}" w:h="{height}" w:orient="{orientation}"/>
      <w:pgMar w:top="{top}" w:right="{right}" w:bottom="{bottom}" w:left="{left}"
               w:header="{header}" w:footer="{footer}" w:gutter="{gutter}"/>
    </w:sectPr>
  </w:body>
</w:document>
"#,
        top = margins.top,
        right = margins.right,
        bottom = margins.bottom,
        left = margins.left,
        header = margins.header,
        footer = margins.footer,
        gutter = margins.gutter,
    )
}

// ── MHT assembly ─────────────────────────────────────────────────────────

/// A quoted data URI inside an HTML attribute value.
static RE_DATA_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""data:(image/[a-zA-Z+.-]+);base64,([^"]*)""#).unwrap());

struct ImagePart {
    location: String,
    content_type: String,
    base64: String,
}

/// Lift embedded data-URI images out of the HTML into MIME parts, pointing
/// each `src` at the part's content location instead.
fn extract_image_parts(html: &str) -> (String, Vec<ImagePart>) {
    let mut parts = Vec::new();
    let rewritten = RE_DATA_URI
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let location = format!("file:///C:/fake/image{}.png", parts.len());
            parts.push(ImagePart {
                location: location.clone(),
                content_type: caps[1].to_string(),
                base64: caps[2].to_string(),
            });
            format!("\"{location}\"")
        })
        .into_owned();
    (rewritten, parts)
}

fn build_mht(html: &str) -> String {
    let (html, images) = extract_image_parts(html);

    // Minimal quoted-printable pass: `=` is the only byte that must be
    // escaped for the UTF-8 HTML part to survive the encoding.
    let escaped = html.replace('=', "=3D");

    let mut mht = String::with_capacity(escaped.len() + images.len() * 256 + 512);
    mht.push_str(&format!(
        "MIME-Version: 1.0\n\
         Content-Type: multipart/related;\n\
         \ttype=\"text/html\";\n\
         \tboundary=\"{MHT_BOUNDARY}\"\n\
         \n\
         --{MHT_BOUNDARY}\n\
         Content-Type: text/html;\n\
         \tcharset=\"utf-8\"\n\
         Content-Transfer-Encoding: quoted-printable\n\
         Content-Location: {DOCUMENT_LOCATION}\n\
         \n\
         {escaped}\n"
    ));

    for part in &images {
        mht.push_str(&format!(
            "\n--{MHT_BOUNDARY}\n\
             Content-Location: {}\n\
             Content-Type: {}\n\
             Content-Transfer-Encoding: base64\n\
             \n\
             {}\n",
            part.location, part.content_type, part.base64
        ));
    }

    mht.push_str(&format!("\n--{MHT_BOUNDARY}--\n"));
    mht
}
