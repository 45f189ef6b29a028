pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Input from `--input <file>` when given, else JSON piped on stdin.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => file::read_json(p).map(Some),
        None => stdin::read_stdin(),
    }
}
