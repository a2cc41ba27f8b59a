//! Settings loading.
//!
//! Sources are merged lowest to highest: built-in defaults, a YAML file,
//! then `DOCINGEST_*` environment variables. The result is validated before
//! it is returned.

pub mod schema;

pub use schema::Settings;

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "docingest.yaml";

/// Load settings from `config_path` (or `./docingest.yaml` if present) and
/// the process environment.
///
/// An explicit `config_path` that does not exist is an error; a missing
/// default file is not.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let mut settings = match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(IngestError::NotFound(path.to_path_buf()));
            }
            read_settings_file(path)?
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_settings_file(default_path)?
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    settings.validate()?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| {
        IngestError::Config(format!("Failed to parse {}: {e}", path.display()))
    })
}

/// Apply `DOCINGEST_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("DOCINGEST_CHUNK_SIZE") {
        settings.chunk_size = parse_usize("DOCINGEST_CHUNK_SIZE", &v)?;
    }
    if let Some(v) = lookup("DOCINGEST_CHUNK_OVERLAP") {
        settings.chunk_overlap = parse_usize("DOCINGEST_CHUNK_OVERLAP", &v)?;
    }
    if let Some(v) = lookup("DOCINGEST_MAX_CODE_CHUNK_SIZE") {
        settings.max_code_chunk_size = parse_usize("DOCINGEST_MAX_CODE_CHUNK_SIZE", &v)?;
    }
    if let Some(v) = lookup("DOCINGEST_TOKENIZER_MODEL") {
        settings.tokenizer_model = v;
    }
    if let Some(v) = lookup("DOCINGEST_DATA_RAW_DIR") {
        settings.data_raw_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("DOCINGEST_DATA_PROCESSED_DIR") {
        settings.data_processed_dir = Some(PathBuf::from(v));
    }
    Ok(())
}

fn parse_usize(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|e| IngestError::Config(format!("{key}={value:?} is not a valid count: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut s = Settings::default();
        apply_env_overrides(
            &mut s,
            env(&[
                ("DOCINGEST_CHUNK_SIZE", "800"),
                ("DOCINGEST_CHUNK_OVERLAP", " 80 "),
                ("DOCINGEST_TOKENIZER_MODEL", "o200k_base"),
                ("DOCINGEST_DATA_RAW_DIR", "/in"),
            ]),
        )
        .unwrap();
        assert_eq!(s.chunk_size, 800);
        assert_eq!(s.chunk_overlap, 80);
        assert_eq!(s.max_code_chunk_size, 1000);
        assert_eq!(s.tokenizer_model, "o200k_base");
        assert_eq!(s.raw_dir(), PathBuf::from("/in"));
    }

    #[test]
    fn env_override_with_garbage_number_fails() {
        let mut s = Settings::default();
        let err = apply_env_overrides(&mut s, env(&[("DOCINGEST_CHUNK_SIZE", "big")])).unwrap_err();
        assert!(err.to_string().contains("DOCINGEST_CHUNK_SIZE"));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.yaml");
        assert!(matches!(
            load_settings(Some(&missing)),
            Err(IngestError::NotFound(_))
        ));
    }

    #[test]
    fn file_values_are_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docingest.yaml");
        std::fs::write(&path, "chunk_size: 300\nchunk_overlap: 30\n").unwrap();
        let s = read_settings_file(&path).unwrap();
        assert_eq!(s.chunk_size, 300);
        assert_eq!(s.chunk_overlap, 30);
    }

    #[test]
    fn empty_file_means_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docingest.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(read_settings_file(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docingest.yaml");
        std::fs::write(&path, "chunk_size: [1, 2]\n").unwrap();
        assert!(matches!(
            read_settings_file(&path),
            Err(IngestError::Config(_))
        ));
    }
}
