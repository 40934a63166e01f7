use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Load a `.env` file into the process environment.
///
/// With `path` unset the file is searched from the working directory
/// upwards. A missing file is `Ok(None)`.
///
/// # Errors
/// Returns the dotenvy error when the file exists but cannot be read or
/// parsed.
pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn env_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".env");

        assert!(load_dotenv(Some(&missing)).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let file = env_file("NOWIP_TEST_BROKEN value\n");

        assert!(load_dotenv(Some(file.path())).is_err());
    }

    #[test]
    fn valid_file_is_loaded() {
        let file = env_file("NOWIP_TEST_DOTENV_LOADED=yes\n");

        let loaded = load_dotenv(Some(file.path())).unwrap();

        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(std::env::var("NOWIP_TEST_DOTENV_LOADED").as_deref(), Ok("yes"));
    }
}
