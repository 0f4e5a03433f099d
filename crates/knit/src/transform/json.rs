use std::path::Path;

use super::{TransformError, TransformedModule};

/// Wrap a JSON document as a module whose exports are the parsed value.
///
/// The document is validated but emitted as written so key order survives.
pub fn transform_json(path: &Path, source: &str) -> Result<TransformedModule, TransformError> {
    let text = source.trim_start_matches('\u{feff}').trim();

    serde_json::from_str::<serde_json::Value>(text).map_err(|source| TransformError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(TransformedModule {
        code: format!("module.exports = {text};"),
        imports: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = transform_json(Path::new("/p/bad.json"), "{ \"a\": }").unwrap_err();
        assert!(matches!(err, TransformError::Json { .. }));
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let module = transform_json(Path::new("/p/a.json"), "\u{feff}[1, 2]").unwrap();
        assert_eq!(module.code, "module.exports = [1, 2];");
    }
}
