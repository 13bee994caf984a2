//! Delimited text reader with encoding auto-detection.
//!
//! Files are read as bytes, decoded (UTF-8, ISO-8859-1, Windows-1252) and
//! split into records of string fields. Records may have different lengths;
//! normalizing them into a rectangle is the grid's job.

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Options for reading delimited input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter (single byte)
    pub delimiter: char,
    /// Trim whitespace around fields
    pub trim: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: true,
        }
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        // UTF-8 and anything unknown: lossy UTF-8
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn delimiter_byte(delimiter: char) -> CsvResult<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CsvError::Delimiter(delimiter))
    }
}

/// Split decoded text into records.
pub fn parse_records(content: &str, options: &ReadOptions) -> CsvResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter_byte(options.delimiter)?)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|record| -> CsvResult<Vec<String>> {
            Ok(record?.iter().map(String::from).collect())
        })
        .collect()
}

/// Decode and split raw bytes into records.
pub fn parse_bytes(bytes: &[u8], options: &ReadOptions) -> CsvResult<Vec<Vec<String>>> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    parse_records(&content, options)
}

/// Read a file into records.
pub fn read_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> CsvResult<Vec<Vec<String>>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| CsvError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_bytes(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(delimiter: char, trim: bool) -> ReadOptions {
        ReadOptions { delimiter, trim }
    }

    #[test]
    fn test_simple_csv() {
        let rows = parse_records("a,b\n1,2\n", &ReadOptions::default()).unwrap();
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_ragged_records_kept() {
        let rows = parse_records("a\n1,2,3\n", &ReadOptions::default()).unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_trim_option() {
        let trimmed = parse_records(" a , b ", &opts(',', true)).unwrap();
        assert_eq!(trimmed[0], vec!["a", "b"]);
        let raw = parse_records(" a , b ", &opts(',', false)).unwrap();
        assert_eq!(raw[0], vec![" a ", " b "]);
    }

    #[test]
    fn test_custom_delimiter_and_quotes() {
        let rows = parse_records("\"x;y\";z", &opts(';', true)).unwrap();
        assert_eq!(rows[0], vec!["x;y", "z"]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        assert!(matches!(
            parse_records("a", &opts('§', true)),
            Err(CsvError::Delimiter('§'))
        ));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_missing_file() {
        let err = read_file("/definitely/not/here.csv", &ReadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("not/here.csv"));
    }
}
