//! Minimal single-page PDF writer for text-only letters.
//!
//! Uses the standard Helvetica fonts with WinAnsiEncoding so no font data is
//! embedded. Text outside that encoding is rejected rather than substituted.

use std::fmt::Write as _;

use thiserror::Error;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 72;
const BODY_SIZE: u32 = 11;
const LEADING: u32 = 15;
const TITLE_SIZE: u32 = 18;
const WRAP_COLUMNS: usize = 88;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("character '{0}' cannot be written with the standard PDF fonts")]
pub struct Unencodable(pub char);

/// Renders `title` followed by `paragraphs` into a complete PDF file.
/// An empty paragraph produces a blank line.
pub fn render_text_pdf(title: &str, paragraphs: &[String]) -> Result<Vec<u8>, Unencodable> {
    let mut lines = Vec::new();
    for paragraph in paragraphs {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            for line in wrap(paragraph, WRAP_COLUMNS) {
                lines.push(escape(&line)?);
            }
        }
    }

    let content = content_stream(&escape(title)?, &lines);
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>"
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{}\nendobj\n", index + 1, body);
    }

    let xref_offset = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in &offsets {
        let _ = writeln!(out, "{offset:010} 00000 n ");
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    );

    Ok(out.into_bytes())
}

/// `title` and `lines` must already be escaped.
fn content_stream(title: &str, lines: &[String]) -> String {
    let top = PAGE_HEIGHT - MARGIN;
    let mut stream = String::new();
    let _ = write!(
        stream,
        "BT\n/F2 {TITLE_SIZE} Tf\n{MARGIN} {top} Td\n({title}) Tj\nET\n"
    );
    let _ = write!(
        stream,
        "BT\n/F1 {BODY_SIZE} Tf\n{LEADING} TL\n{MARGIN} {} Td\n",
        top - TITLE_SIZE - 2 * LEADING
    );
    for line in lines {
        let _ = writeln!(stream, "({line}) Tj T*");
    }
    stream.push_str("ET");
    stream
}

/// WinAnsiEncoding code for `c`. Latin-1 maps to itself; the 0x80..0x9F
/// block holds typographic punctuation and a few extra letters.
fn win_ansi(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Escapes a string for use inside a PDF literal string. Codes above 0x7E
/// are written as octal escapes so the file body stays ASCII.
fn escape(text: &str) -> Result<String, Unencodable> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let code = win_ansi(c).ok_or(Unencodable(c))?;
        match code {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(c);
            }
            0x20..=0x7E => out.push(c),
            _ => {
                let _ = write!(out, "\\{code:03o}");
            }
        }
    }
    Ok(out)
}

/// Greedy word wrap. Words longer than `columns` are split.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > columns {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(columns)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
