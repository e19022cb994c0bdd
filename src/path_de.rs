use std::fmt;

use serde::de::DeserializeOwned;

/// Deserialization failure plus the JSON path of the value that failed.
#[derive(Debug)]
pub struct PathError {
    pub path: String,
    pub inner: serde_json::Error,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // syntax errors fail before any path is entered
        if self.path == "." {
            write!(f, "{}", self.inner)
        } else {
            write!(f, "at JSON path {} → {}", self.path, self.inner)
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PathError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|err| PathError {
        path: err.path().to_string(),
        inner: err.into_inner(),
    })?;
    // reject trailing garbage the same way `serde_json::from_slice` does
    de.end().map_err(|inner| PathError { path: ".".into(), inner })?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Outer { inner: Inner }

    #[derive(Debug, Deserialize)]
    struct Inner { n: u32 }

    #[test]
    fn reports_nested_path() {
        let err = from_slice_with_path::<Outer>(br#"{"inner": {"n": "x"}}"#).unwrap_err();
        assert_eq!(err.path, "inner.n");
        assert!(err.to_string().starts_with("at JSON path inner.n → "));
    }

    #[test]
    fn syntax_errors_have_line_and_column() {
        let err = from_slice_with_path::<Outer>(b"{\n  \"inner\": ").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn trailing_characters_rejected() {
        assert!(from_slice_with_path::<Inner>(br#"{"n": 1} x"#).is_err());
    }
}
