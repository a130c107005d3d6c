//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Matches `${VAR}` and `${VAR:-fallback}`.
fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("static regex")
    })
}

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}` or `${VAR:-default}`.
    ///
    /// Comment lines are left untouched.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = String::with_capacity(content.len());

        for (index, line) in content.split_inclusive('\n').enumerate() {
            if line.trim_start().starts_with('#') {
                result.push_str(line);
                continue;
            }
            let mut last = 0;
            for cap in env_pattern().captures_iter(line) {
                let var_name = &cap[1];
                let var_value = match (std::env::var(var_name), cap.get(2)) {
                    (Ok(value), _) => value,
                    (Err(_), Some(fallback)) => fallback.as_str().to_string(),
                    (Err(_), None) => {
                        return Err(ConfigError::EnvVarNotSet {
                            name: var_name.to_string(),
                            line: index + 1,
                        });
                    }
                };
                let whole = cap.get(0).map_or(0..0, |m| m.range());
                result.push_str(&line[last..whole.start]);
                result.push_str(&var_value);
                last = whole.end;
            }
            result.push_str(&line[last..]);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.formpilot`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
