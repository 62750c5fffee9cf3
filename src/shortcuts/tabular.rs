use crate::errors::AppResult;
use csv::{ReaderBuilder, Trim};

/// Delimited-text parser options forwarded to the CSV reader.
///
/// Defaults follow the usual dialect: comma separated, `"` quoted, doubled quotes
/// as escapes, no header handling. Blank lines never produce a row, whatever the
/// options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    /// When `false`, quote characters are plain data
    pub quoting: bool,
    pub double_quote: bool,
    pub escape: Option<u8>,
    /// Lines starting with this byte are skipped
    pub comment: Option<u8>,
    /// Strip surrounding whitespace from every field
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            quoting: true,
            double_quote: true,
            escape: None,
            comment: None,
            trim: false,
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_quoting(mut self, quoting: bool) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quoting(self.quoting)
            .double_quote(self.double_quote)
            .escape(self.escape)
            .comment(self.comment)
            .trim(if self.trim { Trim::All } else { Trim::None });
        builder
    }
}

/// Parses `text` into rows of string fields. The first line is a row like any other.
///
/// Blank lines are skipped rather than returned as empty rows.
pub fn parse_csv(text: &str, options: &CsvOptions) -> AppResult<Vec<Vec<String>>> {
    let mut reader = options.reader_builder().from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
