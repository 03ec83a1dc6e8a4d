use std::fs;

use anyhow::{Context, Result};
use notifications_client::Identity;

/// Reads the identity token from `path`, trimming surrounding whitespace.
pub fn load(path: Option<&str>) -> Result<Identity> {
    let path = path.context(
        "No identity file configured. Use --identity-file, set NOTIFICATIONS_IDENTITY_FILE, \
         or run: notifications config set identity_file <path>",
    )?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read identity file: {path}"))?;
    let token = content.trim();
    if token.is_empty() {
        anyhow::bail!("Identity file {path} is empty");
    }
    Ok(Identity::new(token))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn token_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  eyJpZGVudGl0eSI6e319  ").unwrap();
        let identity = load(file.path().to_str()).unwrap();
        assert_eq!(identity.as_str(), "eyJpZGVudGl0eSI6e319");
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load(file.path().to_str()).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn missing_path_is_rejected() {
        assert!(load(None).is_err());
    }
}
