//! Shared HTTP client configuration and bounded response helpers.

use std::io::{self, Read};
use std::sync::OnceLock;

/// Return the shared blocking HTTP client.
///
/// Requests deliberately carry no timeout: a training call can legitimately
/// run for minutes and the UI stays responsive while it is pending.
pub fn client() -> &'static reqwest::blocking::Client {
    static CLIENT: OnceLock<reqwest::blocking::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::blocking::Client::new)
}

/// Read a response body into memory, enforcing a maximum byte size.
pub fn read_response_bytes(
    response: reqwest::blocking::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    if let Some(length) = response.content_length() {
        if length > max_bytes as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Response too large: {length} bytes"),
            ));
        }
    }
    let mut limited = response.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response exceeded {max_bytes} bytes"),
        ));
    }
    Ok(bytes)
}
