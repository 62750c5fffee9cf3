//! Fixed-width record layouts.
//!
//! A [`FileDescriptor`] says which [`RowDescriptor`] applies to each line: an optional
//! header for the first line, an optional footer for the last, and detail layouts
//! for the rest. Detail layouts are tried in order and selected by `prefix`.

use crate::errors::{AppError, AppResult};

/// Anything that can turn the lines of a fixed-width file into records.
pub trait FwfDescriptor {
    fn parse_lines(&self, lines: &[&str]) -> AppResult<Vec<FwfRecord>>;
}

/// One fixed-width field: `size` characters starting at character offset `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub start: usize,
    pub size: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, start: usize, size: usize) -> Self {
        Self {
            name: name.into(),
            start,
            size,
        }
    }

    /// Column placed right after `previous`.
    pub fn after(previous: &Column, name: impl Into<String>, size: usize) -> Self {
        Self::new(name, previous.end(), size)
    }

    pub fn end(&self) -> usize {
        self.start + self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub name: String,
    /// Line prefix that selects this layout; `None` matches any line
    pub prefix: Option<String>,
    pub columns: Vec<Column>,
}

impl RowDescriptor {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            columns,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Builds columns back to back from `(name, size)` pairs.
    pub fn sequential(name: impl Into<String>, widths: &[(&str, usize)]) -> Self {
        let mut start = 0;
        let columns = widths
            .iter()
            .map(|(column, size)| {
                let column = Column::new(*column, start, *size);
                start = column.end();
                column
            })
            .collect();
        Self::new(name, columns)
    }

    fn matches(&self, line: &str) -> bool {
        self.prefix
            .as_deref()
            .map_or(true, |prefix| line.starts_with(prefix))
    }

    /// Slices `line` into this layout's fields. `line_no` is 1-based, for errors.
    pub fn parse(&self, line_no: usize, line: &str) -> AppResult<FwfRecord> {
        let chars: Vec<char> = line.chars().collect();
        let mut fields = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            if column.start > chars.len() {
                return Err(AppError::Fwf {
                    line: line_no,
                    message: format!(
                        "column '{}' starts at {} but the {} row has {} characters",
                        column.name,
                        column.start,
                        self.name,
                        chars.len()
                    ),
                });
            }
            let end = column.end().min(chars.len());
            let value: String = chars[column.start..end].iter().collect();
            fields.push((column.name.clone(), value.trim_end().to_string()));
        }

        Ok(FwfRecord {
            row: self.name.clone(),
            fields,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDescriptor {
    pub header: Option<RowDescriptor>,
    pub details: Vec<RowDescriptor>,
    pub footer: Option<RowDescriptor>,
}

impl FileDescriptor {
    pub fn new(details: Vec<RowDescriptor>) -> Self {
        Self {
            header: None,
            details,
            footer: None,
        }
    }

    pub fn with_header(mut self, header: RowDescriptor) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_footer(mut self, footer: RowDescriptor) -> Self {
        self.footer = Some(footer);
        self
    }

    fn detail_for(&self, line_no: usize, line: &str) -> AppResult<&RowDescriptor> {
        self.details
            .iter()
            .find(|row| row.matches(line))
            .ok_or_else(|| AppError::Fwf {
                line: line_no,
                message: "no detail layout matches the line".into(),
            })
    }
}

impl FwfDescriptor for FileDescriptor {
    fn parse_lines(&self, lines: &[&str]) -> AppResult<Vec<FwfRecord>> {
        let last = lines.len().saturating_sub(1);
        let mut records = Vec::with_capacity(lines.len());

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let layout = match (&self.header, &self.footer) {
                (Some(header), _) if idx == 0 => header,
                (_, Some(footer)) if idx == last && (idx > 0 || self.header.is_none()) => footer,
                _ => self.detail_for(line_no, line)?,
            };
            records.push(layout.parse(line_no, line)?);
        }

        Ok(records)
    }
}

/// Record produced from one line, fields kept in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FwfRecord {
    /// Name of the row layout that produced the record
    pub row: String,
    pub fields: Vec<(String, String)>,
}

impl FwfRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// Splits `text` into non-empty lines.
///
/// `None` accepts `\r\n`, `\r` and `\n`; `Some(sep)` splits on `sep` only and leaves
/// any other line-ending characters in place.
pub fn split_lines<'a>(text: &'a str, newline: Option<&str>) -> Vec<&'a str> {
    match newline {
        Some(sep) if !sep.is_empty() => text.split(sep).filter(|l| !l.is_empty()).collect(),
        _ => text
            .split(|c: char| c == '\r' || c == '\n')
            .filter(|l| !l.is_empty())
            .collect(),
    }
}
