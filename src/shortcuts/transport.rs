use crate::config::FetcherConfig;
use crate::constants::FTP_DEFAULT_PORT;
use crate::errors::{AppError, AppResult};
use hyper::ext::ReasonPhrase;
use percent_encoding::percent_decode_str;
use reqwest::blocking::{Client, Response};
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use tracing::{debug, warn};
use url::Url;

/// Fetches the whole body behind `raw_url` in a single blocking request.
///
/// `http`/`https` go through `client`; `ftp` opens its own session with a binary
/// `RETR`. Any other scheme is rejected before connecting.
pub(crate) fn fetch_bytes(
    client: &Client,
    config: &FetcherConfig,
    raw_url: &str,
) -> AppResult<Vec<u8>> {
    let url = Url::parse(raw_url)?;
    match url.scheme() {
        "http" | "https" => http_get(client, url, raw_url),
        "ftp" => ftp_get(config, &url, raw_url),
        other => Err(AppError::UnsupportedScheme {
            url: raw_url.to_string(),
            scheme: other.to_string(),
        }),
    }
}

fn http_get(client: &Client, url: Url, raw_url: &str) -> AppResult<Vec<u8>> {
    debug!(url = raw_url, "Sending HTTP request");

    let response = client.get(url).send().map_err(|source| AppError::Transport {
        url: raw_url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Http {
            url: raw_url.to_string(),
            status: status.as_u16(),
            reason: reason_phrase(&response),
            headers: response.headers().clone(),
        });
    }

    let body = response.bytes().map_err(|source| AppError::Transport {
        url: raw_url.to_string(),
        source,
    })?;
    Ok(body.to_vec())
}

/// Reason phrase sent by the server, or the canonical one for the status.
///
/// hyper records the phrase in the response extensions only when it differs from the
/// canonical text.
fn reason_phrase(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

fn ftp_get(config: &FetcherConfig, url: &Url, raw_url: &str) -> AppResult<Vec<u8>> {
    let ftp_error = |e: FtpError| AppError::Ftp {
        url: raw_url.to_string(),
        message: e.to_string(),
    };

    let host = url.host_str().ok_or_else(|| AppError::Ftp {
        url: raw_url.to_string(),
        message: "URL has no host".into(),
    })?;
    let port = url.port().unwrap_or(FTP_DEFAULT_PORT);
    let (dirs, file_name) = ftp_path(url).ok_or_else(|| AppError::Ftp {
        url: raw_url.to_string(),
        message: "URL does not name a file".into(),
    })?;
    let (user, password) = ftp_credentials(url, config);

    debug!(host, port, file = %file_name, "Opening FTP session");
    let mut stream = FtpStream::connect((host, port)).map_err(ftp_error)?;
    stream.login(user.as_str(), password.as_str()).map_err(ftp_error)?;
    stream.transfer_type(FileType::Binary).map_err(ftp_error)?;
    for dir in &dirs {
        stream.cwd(dir.as_str()).map_err(ftp_error)?;
    }
    let buffer = stream.retr_as_buffer(file_name.as_str()).map_err(ftp_error)?;

    if let Err(e) = stream.quit() {
        warn!(url = raw_url, error = %e, "FTP QUIT failed after a complete transfer");
    }

    Ok(buffer.into_inner())
}

/// Splits an FTP URL path into the directories to enter and the file to retrieve.
fn ftp_path(url: &Url) -> Option<(Vec<String>, String)> {
    let mut segments: Vec<String> = url
        .path_segments()?
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect();
    let file_name = segments.pop().filter(|name| !name.is_empty())?;
    segments.retain(|segment| !segment.is_empty());
    Some((segments, file_name))
}

/// URL credentials when present, else the configured anonymous login.
fn ftp_credentials(url: &Url, config: &FetcherConfig) -> (String, String) {
    let user = match url.username() {
        "" => config.ftp_user.clone(),
        user => percent_decode_str(user).decode_utf8_lossy().into_owned(),
    };
    let password = match url.password() {
        Some(password) => percent_decode_str(password).decode_utf8_lossy().into_owned(),
        None => config.ftp_password.clone(),
    };
    (user, password)
}
