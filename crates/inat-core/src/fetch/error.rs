//! Fetch error type: transport failure vs HTTP status.

use thiserror::Error;

/// Error returned by a single GET (curl failure or non-2xx status).
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
}

impl FetchError {
    /// True for transport-level failures (as opposed to an HTTP error status
    /// or a local curl setup problem).
    pub fn is_network(&self) -> bool {
        match self {
            FetchError::Curl(e) => {
                e.is_operation_timedout()
                    || e.is_couldnt_connect()
                    || e.is_couldnt_resolve_host()
                    || e.is_couldnt_resolve_proxy()
                    || e.is_ssl_connect_error()
                    || e.is_read_error()
                    || e.is_recv_error()
                    || e.is_send_error()
                    || e.is_got_nothing()
                    || e.is_partial_file()
            }
            FetchError::Http(_) => false,
        }
    }
}
