/// Parse one `--extensions` value.
///
/// Extensions are written bare: `js`, not `.js`.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.trim();

    if ext.is_empty() {
        return Err("Extension cannot be empty".to_string());
    }

    if ext.starts_with('.') {
        return Err(format!(
            "Extension '{}' must be written without a leading dot (try '{}')",
            ext,
            ext.trim_start_matches('.')
        ));
    }

    if ext.contains(['/', '\\']) {
        return Err(format!("Extension '{}' cannot contain a path separator", ext));
    }

    Ok(ext.to_string())
}
