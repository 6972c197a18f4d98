//! Paginated layout of the PDF report.
//!
//! Geometry is in PDF points (1/72 inch) on an A4 page, with the origin at
//! the bottom-left corner as PDF expects.

use super::ReportPayload;

pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;
/// 10 mm side/top margin.
pub const MARGIN: f64 = 28.35;
/// Height of one text line (10 mm).
pub const LINE_HEIGHT: f64 = 28.35;
/// Body lines stop this far above the page bottom (20 mm).
pub const BOTTOM_MARGIN: f64 = 56.69;
/// Baseline of the footer text, inside the 15 mm footer band.
pub const FOOTER_BASELINE: f64 = 22.68;

pub const HEADER_SIZE: f64 = 12.0;
pub const BODY_SIZE: f64 = 12.0;
pub const FOOTER_SIZE: f64 = 8.0;

pub const HEADER_TEXT: &str = "Análise de Desempenho de Bilheteria";
pub const FOOTER_PREFIX: &str = "Página";

const EXPLANATION: &str = "Este resultado reflete o comportamento do público em relação aos \
títulos lançados nesse período, considerando fatores como recepção crítica, estratégias de \
marketing, distribuição e tendências do mercado cinematográfico.\n\n\
A análise contribui para a compreensão do impacto comercial da categoria no ano em questão, \
servindo como referência para estudos de mercado, projeções futuras e estratégias de produção e \
lançamento de novos títulos.";

/// One page: the body lines that fit on it, top to bottom. Empty strings are
/// blank lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub lines: Vec<String>,
}

/// A laid-out report with a fixed header and a numbered footer on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub header: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// Lay out the report body for a payload.
    pub fn compose(payload: &ReportPayload<'_>) -> Self {
        let max_width = PAGE_WIDTH - 2.0 * MARGIN;
        let summary = [
            format!("Categoria: {}", payload.selected_genre),
            format!("Ano: {}", payload.selected_year),
            format!(
                "Bilheteria Total Estimada: {} USD",
                format_usd(payload.total_gross)
            ),
        ];
        let mut body: Vec<String> = summary
            .iter()
            .flat_map(|line| wrap(line, BODY_SIZE, max_width))
            .collect();
        body.push(String::new());
        for paragraph in EXPLANATION.split('\n') {
            body.extend(wrap(paragraph, BODY_SIZE, max_width));
        }
        Self::paginate(HEADER_TEXT, body)
    }

    /// Split body lines into pages. A document always has at least one page.
    pub fn paginate(header: &str, body: Vec<String>) -> Self {
        let per_page = lines_per_page();
        let mut pages: Vec<Page> = Vec::new();
        let mut lines = body.into_iter().peekable();
        loop {
            let chunk: Vec<String> = lines.by_ref().take(per_page).collect();
            pages.push(Page {
                number: pages.len() + 1,
                lines: chunk,
            });
            if lines.peek().is_none() {
                break;
            }
        }
        Document {
            header: header.to_string(),
            pages,
        }
    }

    pub fn footer(&self, page: &Page) -> String {
        format!("{FOOTER_PREFIX} {}", page.number)
    }
}

/// Baseline of the first body line.
pub fn body_top() -> f64 {
    PAGE_HEIGHT - MARGIN - 2.0 * LINE_HEIGHT
}

fn lines_per_page() -> usize {
    (((body_top() - BOTTOM_MARGIN) / LINE_HEIGHT).floor() as usize + 1).max(1)
}

/// Thousands-separated amount with two decimals, e.g. `1,234,567.89`.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

// ---------------------------------------------------------------------------
// Text metrics (Helvetica, approximate)
// ---------------------------------------------------------------------------

/// Approximate advance width of one Helvetica glyph, in 1/1000 em.
fn glyph_width(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 250.0,
        ' ' | 'f' | 't' | 'I' | 'r' | '(' | ')' | '-' | '/' => 300.0,
        'm' | 'M' | 'W' => 850.0,
        'w' => 722.0,
        c if c.is_uppercase() => 680.0,
        _ => 556.0,
    }
}

/// Approximate rendered width of `text` at `size` points.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().map(glyph_width).sum::<f64>() * size / 1000.0
}

/// Greedy word wrap to `max_width` points. An empty paragraph yields one
/// blank line; a single overlong word is kept on its own line.
pub fn wrap(paragraph: &str, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
