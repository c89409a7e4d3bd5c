//! `${key}` substitution for command parameters.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expansions(HashMap<String, String>);

impl Expansions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a flat JSON object of string values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read expansions {}", path.display()))?;
        let map: HashMap<String, String> = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse expansions {}", path.display()))?;
        Ok(Self(map))
    }

    pub fn put(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parse a `key=value` pair from the command line.
    pub fn put_pair(&mut self, pair: &str) -> Result<()> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expansion `{}` must be key=value", pair))?;
        if key.is_empty() {
            return Err(anyhow!("expansion `{}` has an empty key", pair));
        }
        self.put(key, value);
        Ok(())
    }

    /// Replace `${key}` with its value (empty when unset) and `${key|default}`
    /// with its value or `default`.
    pub fn expand(&self, input: &str) -> Result<String> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or_else(|| anyhow!("unterminated expansion in `{}`", input))?;
            let body = &after[..end];
            let value = match body.split_once('|') {
                Some((key, default)) => self.get(key).unwrap_or(default),
                None => self.get(body).unwrap_or(""),
            };
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "tests/expansions_tests.rs"]
mod tests;
