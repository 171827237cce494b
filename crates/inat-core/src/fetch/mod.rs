//! Blocking HTTP GET via the curl crate (libcurl).
//!
//! Used for both the observation API lookup and the photo downloads. The body
//! is collected in memory; photos and API documents are small.

mod error;

pub use error::FetchError;

use std::str;
use std::time::Duration;

/// Connection and stall limits applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Abort if throughput stays below this many bytes/sec for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Hard wall-clock cap per request (None = unbounded).
    pub timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            timeout: None,
        }
    }
}

/// Successful (2xx) response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a GET and returns the full body. Follows redirects.
///
/// `headers` are sent as `Name: value`; pass an empty slice for none.
/// Non-2xx statuses are returned as `FetchError::Http`.
pub fn get(
    url: &str,
    headers: &[(&str, &str)],
    opts: &HttpOptions,
) -> Result<HttpResponse, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let mut header_lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }

    if !headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    Ok(HttpResponse {
        content_type: content_type(&header_lines),
        body,
    })
}

/// Last `Content-Type` among the collected header lines (redirect hops come first).
fn content_type(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .filter_map(|line| line.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.trim().to_string())
        .last()
}
