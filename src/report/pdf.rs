//! Minimal PDF 1.4 writer for [`Document`].
//!
//! Uses the standard Type1 Helvetica faces with `WinAnsiEncoding`, so no font
//! data is embedded. Text is encoded as Latin-1; anything outside it is an
//! [`ExportError::UnsupportedCharacter`].

use std::io::Write;

use super::ExportError;
use super::document::{
    BODY_SIZE, Document, FOOTER_BASELINE, FOOTER_SIZE, HEADER_SIZE, LINE_HEIGHT, MARGIN,
    PAGE_HEIGHT, PAGE_WIDTH, body_top, text_width,
};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const FONT_ITALIC_ID: usize = 5;
const FIRST_PAGE_ID: usize = 6;

/// Serialise a document to PDF bytes.
pub fn render(document: &Document) -> Result<Vec<u8>, ExportError> {
    // Encode every string up front so a bad character fails before any output.
    let header = encode_latin1(&document.header)?;
    let mut streams = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let mut lines = Vec::with_capacity(page.lines.len());
        for line in &page.lines {
            lines.push(encode_latin1(line)?);
        }
        let footer_text = document.footer(page);
        let footer = encode_latin1(&footer_text)?;
        streams.push(page_stream(
            &header,
            text_width(&document.header, HEADER_SIZE),
            &lines,
            &footer,
            text_width(&footer_text, FOOTER_SIZE),
        )?);
    }

    let page_ids: Vec<usize> = (0..streams.len()).map(|i| FIRST_PAGE_ID + 2 * i).collect();
    let mut out = PdfWriter::new(FIRST_PAGE_ID + 2 * streams.len());

    out.object(CATALOG_ID, format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").as_bytes())?;

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
    out.object(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        )
        .as_bytes(),
    )?;

    for (id, face) in [
        (FONT_REGULAR_ID, "Helvetica"),
        (FONT_BOLD_ID, "Helvetica-Bold"),
        (FONT_ITALIC_ID, "Helvetica-Oblique"),
    ] {
        out.object(
            id,
            format!("<< /Type /Font /Subtype /Type1 /BaseFont /{face} /Encoding /WinAnsiEncoding >>")
                .as_bytes(),
        )?;
    }

    for (page_id, stream) in page_ids.iter().zip(&streams) {
        let content_id = page_id + 1;
        out.object(
            *page_id,
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 {FONT_REGULAR_ID} 0 R /F2 {FONT_BOLD_ID} 0 R \
                 /F3 {FONT_ITALIC_ID} 0 R >> >> /Contents {content_id} 0 R >>"
            )
            .as_bytes(),
        )?;
        out.stream(content_id, stream)?;
    }

    out.finish(CATALOG_ID)
}

fn page_stream(
    header: &[u8],
    header_width: f64,
    lines: &[Vec<u8>],
    footer: &[u8],
    footer_width: f64,
) -> Result<Vec<u8>, ExportError> {
    let mut s = Vec::new();

    let header_x = ((PAGE_WIDTH - header_width) / 2.0).max(MARGIN);
    let header_y = PAGE_HEIGHT - MARGIN - LINE_HEIGHT / 2.0 - HEADER_SIZE / 3.0;
    text_op(&mut s, "F2", HEADER_SIZE, header_x, header_y, header)?;

    let mut y = body_top();
    for line in lines {
        if !line.is_empty() {
            text_op(&mut s, "F1", BODY_SIZE, MARGIN, y, line)?;
        }
        y -= LINE_HEIGHT;
    }

    let footer_x = (PAGE_WIDTH - footer_width) / 2.0;
    text_op(&mut s, "F3", FOOTER_SIZE, footer_x, FOOTER_BASELINE, footer)?;
    Ok(s)
}

fn text_op(
    out: &mut Vec<u8>,
    font: &str,
    size: f64,
    x: f64,
    y: f64,
    text: &[u8],
) -> Result<(), ExportError> {
    write!(out, "BT /{font} {size:.2} Tf {x:.2} {y:.2} Td (")?;
    for &b in text {
        if matches!(b, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out.extend_from_slice(b") Tj ET\n");
    Ok(())
}

/// Encode text as Latin-1 bytes (identical to WinAnsi for the accepted range).
fn encode_latin1(text: &str) -> Result<Vec<u8>, ExportError> {
    text.chars()
        .map(|ch| match ch as u32 {
            0x09 => Ok(b' '),
            0x20..=0x7E | 0xA0..=0xFF => Ok(ch as u32 as u8),
            _ => Err(ExportError::UnsupportedCharacter {
                ch,
                text: text.to_string(),
            }),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Object / xref bookkeeping
// ---------------------------------------------------------------------------

struct PdfWriter {
    buf: Vec<u8>,
    /// Byte offset of each object, indexed by object id (id 0 unused).
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new(object_count: usize) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        PdfWriter {
            buf,
            offsets: vec![0; object_count],
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) -> Result<(), ExportError> {
        self.offsets[id] = self.buf.len();
        writeln!(self.buf, "{id} 0 obj")?;
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
        Ok(())
    }

    fn stream(&mut self, id: usize, data: &[u8]) -> Result<(), ExportError> {
        self.offsets[id] = self.buf.len();
        write!(self.buf, "{id} 0 obj\n<< /Length {} >>\nstream\n", data.len())?;
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
        Ok(())
    }

    fn finish(mut self, root: usize) -> Result<Vec<u8>, ExportError> {
        let xref_offset = self.buf.len();
        write!(self.buf, "xref\n0 {}\n", self.offsets.len())?;
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets[1..] {
            write!(self.buf, "{offset:010} 00000 n \n")?;
        }
        write!(
            self.buf,
            "trailer\n<< /Size {} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            self.offsets.len()
        )?;
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::{HEADER_TEXT, Page};

    fn doc(lines: &[&str], pages: usize) -> Document {
        Document {
            header: HEADER_TEXT.to_string(),
            pages: (1..=pages)
                .map(|number| Page {
                    number,
                    lines: lines.iter().map(|l| l.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn writes_header_footer_and_body_per_page() {
        let bytes = render(&doc(&["Categoria: Ação", "", "Ano: 2020"], 2)).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"(An\xE1lise de Desempenho de Bilheteria) Tj"));
        assert!(contains(&bytes, b"(Categoria: A\xE7\xE3o) Tj"));
        assert!(contains(&bytes, b"(P\xE1gina 1) Tj"));
        assert!(contains(&bytes, b"(P\xE1gina 2) Tj"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = render(&doc(&["x"], 1)).unwrap();

        let marker = bytes
            .windows(10)
            .rposition(|w| w == b"startxref\n")
            .unwrap();
        let tail = std::str::from_utf8(&bytes[marker + 10..]).unwrap();
        let startxref: usize = tail.lines().next().unwrap().parse().unwrap();

        let table = std::str::from_utf8(&bytes[startxref..marker]).unwrap();
        assert!(table.starts_with("xref\n0 8\n"));
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take(7)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }

    #[test]
    fn parentheses_are_escaped() {
        let bytes = render(&doc(&[r"Gross (USD) \ total"], 1)).unwrap();
        assert!(contains(&bytes, br"(Gross \(USD\) \\ total) Tj"));
    }

    #[test]
    fn non_latin_text_is_rejected() {
        let err = render(&doc(&["Genre: アクション"], 1)).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedCharacter { ch: 'ア', .. }));
    }
}
