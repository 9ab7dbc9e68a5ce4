use serde::Deserialize;
use tracing::warn;

use crate::error::TweetError;

/// Limits applied to tweet text on create and update.
///
/// Harnesses either build this directly, parse it from command-line style
/// flags, or embed it in their own config file (every field has a default).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Maximum text length in characters (not bytes).
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Reject empty text. When set, text must be at least 1 character.
    #[serde(default = "default_require_text")]
    pub require_text: bool,
}

fn default_max_text_len() -> usize {
    280
}

fn default_require_text() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_text_len: default_max_text_len(),
            require_text: default_require_text(),
        }
    }
}

impl StoreConfig {
    /// Parse configuration from command-line arguments.
    ///
    /// Supported flags:
    /// - `--max-text-len=N`
    /// - `--allow-empty-text`
    ///
    /// Unknown flags are ignored so the harness can share its argv.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = StoreConfig::default();

        for arg in args {
            if let Some(val) = arg.strip_prefix("--max-text-len=") {
                match val.parse() {
                    Ok(n) => config.max_text_len = n,
                    Err(_) => warn!("ignoring invalid --max-text-len value {:?}", val),
                }
            } else if arg == "--allow-empty-text" {
                config.require_text = false;
            }
        }

        config
    }

    /// Check `text` against the configured bounds.
    pub fn validate_text(&self, text: &str) -> Result<(), TweetError> {
        if self.require_text && text.is_empty() {
            return Err(TweetError::Validation("tweet text must not be empty".into()));
        }
        let len = text.chars().count();
        if len > self.max_text_len {
            return Err(TweetError::Validation(format!(
                "tweet text is {} characters, limit is {}",
                len, self.max_text_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.max_text_len, 280);
        assert!(config.require_text);
    }

    #[test]
    fn test_from_args() {
        let args = vec![
            "--listen=127.0.0.1:9090".to_string(),
            "--max-text-len=10".to_string(),
            "--allow-empty-text".to_string(),
        ];
        let config = StoreConfig::from_args(&args);
        assert_eq!(config.max_text_len, 10);
        assert!(!config.require_text);
    }

    #[test]
    fn test_from_args_keeps_default_on_bad_number() {
        let config = StoreConfig::from_args(&["--max-text-len=lots".to_string()]);
        assert_eq!(config.max_text_len, 280);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"maxTextLen": 140}"#).unwrap();
        assert_eq!(config.max_text_len, 140);
        assert!(config.require_text);
    }

    #[test]
    fn test_validate_text() {
        let config = StoreConfig {
            max_text_len: 4,
            require_text: true,
        };
        assert!(config.validate_text("John").is_ok());
        // Counted in characters: 4 chars, 8 bytes.
        assert!(config.validate_text("éééé").is_ok());
        assert_eq!(
            config.validate_text("Johnny").unwrap_err().error_code(),
            "VALIDATION_FAILED"
        );
        assert!(config.validate_text("").is_err());

        let lenient = StoreConfig {
            require_text: false,
            ..config
        };
        assert!(lenient.validate_text("").is_ok());
    }
}
