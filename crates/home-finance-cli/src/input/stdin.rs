use log::debug;
use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a calculator input piped on stdin.
/// Returns None when stdin is an interactive terminal or empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    debug!("read {} bytes of JSON from stdin", trimmed.len());
    Ok(Some(serde_json::from_str(trimmed)?))
}
