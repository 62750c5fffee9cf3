//! One-shot fetch-and-unpack helpers for HTTP(S) and FTP resources.
//!
//! Every function performs a single blocking request, reads the whole body and
//! returns an owned value. There are no retries and no timeouts beyond the
//! transport defaults. The free functions build a default [`Fetcher`] per call; build
//! one yourself to reuse the HTTP client or change [`FetcherConfig`].
//!
//! ```no_run
//! use brfied::shortcuts::{self, CsvOptions};
//!
//! # fn main() -> brfied::errors::AppResult<()> {
//! let rows = shortcuts::get_zip_csv_content(
//!     "http://localhost:8000/file01.zip",
//!     None,
//!     &CsvOptions::default().with_delimiter(b';'),
//! )?;
//! println!("{} rows", rows.len());
//! # Ok(())
//! # }
//! ```

mod archive;
mod decode;
pub mod fwf;
mod tabular;
mod transport;

pub use archive::{ArchiveEntry, ZipHandle};
pub use decode::{decode, lookup_encoding};
pub use fwf::{Column, FileDescriptor, FwfDescriptor, FwfRecord, RowDescriptor};
pub use tabular::{parse_csv, CsvOptions};

use crate::config::FetcherConfig;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Body of a fetch: raw bytes, or text when an encoding was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Bytes(bytes) => bytes,
            Payload::Text(text) => text.as_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Bytes(bytes) => bytes,
            Payload::Text(text) => text.into_bytes(),
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Bytes(_) => None,
        }
    }
}

/// HTTP client plus the settings applied to every fetch.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Uses an existing client; `config.user_agent` is then left to the client.
    pub fn with_client(client: Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Whole body of `url`, undecoded.
    pub fn get_bytes(&self, url: &str) -> AppResult<Vec<u8>> {
        let bytes = transport::fetch_bytes(&self.client, &self.config, url)?;
        info!(url, bytes = bytes.len(), "Fetched resource");
        Ok(bytes)
    }

    /// Whole body of `url` decoded with `encoding`, or raw bytes when `None`.
    ///
    /// # Errors
    ///
    /// `Http` for non-success statuses (with status, reason, headers and URL),
    /// `Transport`/`Ftp` for connection failures, `Decode` when the body is not valid
    /// in `encoding`.
    pub fn get(&self, url: &str, encoding: Option<&str>) -> AppResult<Payload> {
        let bytes = self.get_bytes(url)?;
        match encoding {
            Some(label) => Ok(Payload::Text(decode(&bytes, label)?)),
            None => Ok(Payload::Bytes(bytes)),
        }
    }

    pub fn get_text(&self, url: &str, encoding: &str) -> AppResult<String> {
        let bytes = self.get_bytes(url)?;
        decode(&bytes, encoding)
    }

    /// Body decoded with the default encoding and parsed as JSON.
    pub fn get_json(&self, url: &str) -> AppResult<serde_json::Value> {
        self.get_json_as(url)
    }

    pub fn get_json_as<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let text = self.get_text(url, &self.config.default_encoding)?;
        debug!(url, "Parsing JSON body");
        Ok(serde_json::from_str(&text)?)
    }

    /// Body opened as an in-memory ZIP archive, nothing extracted yet.
    pub fn get_zip(&self, url: &str) -> AppResult<ZipHandle> {
        ZipHandle::from_bytes(self.get_bytes(url)?)
    }

    /// Decompressed bytes of `member`, or of the first entry when `None`.
    pub fn get_zip_bytes(&self, url: &str, member: Option<&str>) -> AppResult<Vec<u8>> {
        self.get_zip(url)?.read_member(member)
    }

    /// Archive member decoded with the default encoding.
    pub fn get_zip_content(&self, url: &str, member: Option<&str>) -> AppResult<String> {
        let bytes = self.get_zip_bytes(url, member)?;
        decode(&bytes, &self.config.default_encoding)
    }

    /// Archive member parsed as delimited text, one `Vec<String>` per row.
    pub fn get_zip_csv_content(
        &self,
        url: &str,
        member: Option<&str>,
        options: &CsvOptions,
    ) -> AppResult<Vec<Vec<String>>> {
        let text = self.get_zip_content(url, member)?;
        let rows = parse_csv(&text, options)?;
        debug!(url, rows = rows.len(), "Parsed CSV member");
        Ok(rows)
    }

    /// Archive member parsed line by line with `descriptor`.
    ///
    /// `newline` of `None` accepts any of `\r\n`, `\r`, `\n`; otherwise lines are split
    /// on the given separator only.
    pub fn get_zip_fwf_content<D: FwfDescriptor + ?Sized>(
        &self,
        url: &str,
        descriptor: &D,
        member: Option<&str>,
        newline: Option<&str>,
    ) -> AppResult<Vec<FwfRecord>> {
        let text = self.get_zip_content(url, member)?;
        let lines = fwf::split_lines(&text, newline);
        let records = descriptor.parse_lines(&lines)?;
        debug!(url, records = records.len(), "Parsed fixed-width member");
        Ok(records)
    }
}

fn default_fetcher() -> AppResult<Fetcher> {
    Fetcher::new(FetcherConfig::default())
}

/// See [`Fetcher::get`].
pub fn get(url: &str, encoding: Option<&str>) -> AppResult<Payload> {
    default_fetcher()?.get(url, encoding)
}

/// See [`Fetcher::get_bytes`].
pub fn get_bytes(url: &str) -> AppResult<Vec<u8>> {
    default_fetcher()?.get_bytes(url)
}

/// See [`Fetcher::get_text`].
pub fn get_text(url: &str, encoding: &str) -> AppResult<String> {
    default_fetcher()?.get_text(url, encoding)
}

/// See [`Fetcher::get_json`].
pub fn get_json(url: &str) -> AppResult<serde_json::Value> {
    default_fetcher()?.get_json(url)
}

/// See [`Fetcher::get_json_as`].
pub fn get_json_as<T: DeserializeOwned>(url: &str) -> AppResult<T> {
    default_fetcher()?.get_json_as(url)
}

/// See [`Fetcher::get_zip`].
pub fn get_zip(url: &str) -> AppResult<ZipHandle> {
    default_fetcher()?.get_zip(url)
}

/// See [`Fetcher::get_zip_bytes`].
pub fn get_zip_bytes(url: &str, member: Option<&str>) -> AppResult<Vec<u8>> {
    default_fetcher()?.get_zip_bytes(url, member)
}

/// See [`Fetcher::get_zip_content`].
pub fn get_zip_content(url: &str, member: Option<&str>) -> AppResult<String> {
    default_fetcher()?.get_zip_content(url, member)
}

/// See [`Fetcher::get_zip_csv_content`].
pub fn get_zip_csv_content(
    url: &str,
    member: Option<&str>,
    options: &CsvOptions,
) -> AppResult<Vec<Vec<String>>> {
    default_fetcher()?.get_zip_csv_content(url, member, options)
}

/// See [`Fetcher::get_zip_fwf_content`].
pub fn get_zip_fwf_content<D: FwfDescriptor + ?Sized>(
    url: &str,
    descriptor: &D,
    member: Option<&str>,
    newline: Option<&str>,
) -> AppResult<Vec<FwfRecord>> {
    default_fetcher()?.get_zip_fwf_content(url, descriptor, member, newline)
}
