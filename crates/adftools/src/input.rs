use std::io::{IsTerminal, Read};
use std::path::Path;

use crate::prelude::*;

/// Read the whole input from `path`, or from stdin when no path is given.
///
/// Reading from an interactive terminal is refused so the command never
/// blocks waiting for input the user did not mean to type.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            log::debug!("reading input from {}", path.display());
            std::fs::read(path).with_context(|| f!("Failed to read {}", path.display()))
        }
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(Error::EmptyInput.into());
            }
            log::debug!("reading input from stdin");
            let mut buffer = Vec::new();
            stdin
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_from_file() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# Title\n").unwrap();

        // Act
        let bytes = read_input(Some(file.path())).unwrap();

        // Assert
        assert_eq!(bytes, b"# Title\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.md");

        let err = read_input(Some(&missing)).unwrap_err();

        assert!(err.to_string().contains("missing.md"));
    }
}
