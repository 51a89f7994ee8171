use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{DevconfError, DevconfResult};

/// How generated macro names are spelled.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Leading path segment of every macro.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Joins path segments.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_prefix() -> String {
    "DC".to_owned()
}

fn default_separator() -> String {
    "_".to_owned()
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            separator: default_separator(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_json_str(s: &str) -> DevconfResult<Self> {
        let opts: Self = serde_json::from_str(s)
            .map_err(|e| DevconfError::config(format!("parse generator options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DevconfResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| DevconfError::io(path, e))?;
        let opts: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            DevconfError::config(format!("parse generator options '{}': {e}", path.display()))
        })?;
        opts.validate()?;
        Ok(opts)
    }

    /// Both parts must keep the generated names valid C identifiers.
    pub fn validate(&self) -> DevconfResult<()> {
        let ident_char = |c: char| c.is_ascii_alphanumeric() || c == '_';
        match self.prefix.chars().next() {
            None => return Err(DevconfError::config("prefix must be non-empty")),
            Some(c) if c.is_ascii_digit() => {
                return Err(DevconfError::config("prefix must not start with a digit"));
            }
            Some(_) => {}
        }
        if !self.prefix.chars().all(ident_char) {
            return Err(DevconfError::config(format!(
                "prefix '{}' contains non-identifier characters",
                self.prefix
            )));
        }
        if !self.separator.chars().all(ident_char) {
            return Err(DevconfError::config(format!(
                "separator '{}' contains non-identifier characters",
                self.separator
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
