//! CSV decoding.
//!
//! Keyword exports come in several dialects: Ahrefs writes UTF-16 with tabs,
//! French Search Console exports use semicolons, SEMrush writes plain UTF-8
//! with commas. The reader sniffs the encoding from the BOM and the delimiter
//! from the header line.

use std::borrow::Cow;

use csv::ReaderBuilder;
use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::debug;

use crate::error::{IngestError, Result};

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Headers and rows decoded from a CSV payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvContent {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decodes bytes to text, honoring a UTF-8/UTF-16 BOM.
///
/// Without a BOM the payload is read as UTF-8, falling back to Windows-1252
/// for legacy spreadsheet exports.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Picks the delimiter that occurs most often, outside quotes, on the first
/// non-blank line. Defaults to a comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let Some(line) = text.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };
    let mut counts = [0usize; CANDIDATE_DELIMITERS.len()];
    let mut in_quotes = false;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(idx) = CANDIDATE_DELIMITERS.iter().position(|d| *d == byte) {
            counts[idx] += 1;
        }
    }
    let mut best = 0usize;
    for idx in 1..CANDIDATE_DELIMITERS.len() {
        if counts[idx] > counts[best] {
            best = idx;
        }
    }
    CANDIDATE_DELIMITERS[best]
}

/// Reads a CSV payload. The first non-blank row is the header row; blank rows
/// are skipped and every data row is padded or truncated to the header width.
pub fn read_csv_bytes(file: &str, bytes: &[u8]) -> Result<CsvContent> {
    let text = decode_text(bytes);
    let delimiter = sniff_delimiter(&text);
    debug!(file, delimiter = %char::from(delimiter).escape_default(), "reading csv");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            file: file.to_string(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }

    let mut rows_iter = raw_rows.into_iter();
    let Some(header_row) = rows_iter.next() else {
        return Err(IngestError::EmptyFile {
            file: file.to_string(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let rows = rows_iter
        .map(|mut row| {
            row.resize(headers.len(), String::new());
            row
        })
        .collect();
    Ok(CsvContent { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn reads_comma_separated_export() {
        let content = read_csv_bytes("a.csv", b"Keyword,Position,URL\nshoes,3,https://a.com/\n")
            .unwrap();
        assert_eq!(content.headers, vec!["Keyword", "Position", "URL"]);
        assert_eq!(content.rows, vec![vec!["shoes", "3", "https://a.com/"]]);
    }

    #[test]
    fn sniffs_semicolons_and_tabs() {
        assert_eq!(sniff_delimiter("Requête;Position;Page\n"), b';');
        assert_eq!(sniff_delimiter("Keyword\tVolume\tPosition\n"), b'\t');
        assert_eq!(sniff_delimiter("\"a;b\",c\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn decodes_utf16_exports() {
        let bytes = utf16le_with_bom("Keyword\tPosition\nchaussures été\t4\n");
        let content = read_csv_bytes("ahrefs.csv", &bytes).unwrap();
        assert_eq!(content.headers, vec!["Keyword", "Position"]);
        assert_eq!(content.rows[0], vec!["chaussures été", "4"]);
    }

    #[test]
    fn strips_utf8_bom_from_first_header() {
        let content = read_csv_bytes("gsc.csv", "\u{feff}Query,Page\nshoes,/a\n".as_bytes())
            .unwrap();
        assert_eq!(content.headers, vec!["Query", "Page"]);
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let bytes = b"Keyword,Position\ncaf\xe9,2\n";
        let content = read_csv_bytes("legacy.csv", bytes).unwrap();
        assert_eq!(content.rows[0][0], "café");
    }

    #[test]
    fn skips_blank_rows_and_pads_short_rows() {
        let content =
            read_csv_bytes("a.csv", b"\nKeyword,Position,URL\n,,\nshoes,3\nboots,1,/b,extra\n")
                .unwrap();
        assert_eq!(content.headers, vec!["Keyword", "Position", "URL"]);
        assert_eq!(
            content.rows,
            vec![vec!["shoes", "3", ""], vec!["boots", "1", "/b"]]
        );
    }

    #[test]
    fn collapses_header_whitespace() {
        let content = read_csv_bytes("a.csv", b"  Search   Volume ,Keyword\n10,x\n").unwrap();
        assert_eq!(content.headers, vec!["Search Volume", "Keyword"]);
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(matches!(
            read_csv_bytes("empty.csv", b"\n\n"),
            Err(IngestError::EmptyFile { .. })
        ));
    }
}
