//! Translation files.
//!
//! Releases for Minecraft 1.13+ ship JSON lang files (a flat object of
//! translation keys). 1.12.2 uses `.lang` files: one `key=value` per line with
//! `#` comments. [`LangFile`] keeps the original line order and comments so
//! that an edited file diffs cleanly against the original.

use std::fmt;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Entry { key: String, value: String },
    Other(String),
}

/// A `.lang` translation file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangFile {
    lines: Vec<Line>,
}

impl LangFile {
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let lines = text
            .lines()
            .map(|line| {
                let trimmed = line.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return Line::Other(line.to_string());
                }
                match line.split_once('=') {
                    Some((key, value)) => Line::Entry {
                        key: key.trim().to_string(),
                        value: value.to_string(),
                    },
                    None => Line::Other(line.to_string()),
                }
            })
            .collect();

        LangFile { lines }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Entry { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set a key, replacing it in place or appending it at the end
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for line in &mut self.lines {
            if let Line::Entry { key: k, value: v } = line {
                if k == key {
                    *v = value;
                    return;
                }
            }
        }
        self.lines.push(Line::Entry {
            key: key.to_string(),
            value,
        });
    }

    /// Apply every (key, value) pair in order
    pub fn extend<K, V, I>(&mut self, entries: I)
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.set(key.as_ref(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, Line::Entry { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for LangFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            match line {
                Line::Entry { key, value } => writeln!(f, "{}={}", key, value)?,
                Line::Other(text) => writeln!(f, "{}", text)?,
            }
        }
        Ok(())
    }
}

/// Merge translation layers into a JSON lang object; later layers win
pub fn merge_json(base: &mut Map<String, Value>, layers: &[&[(String, String)]]) {
    for layer in layers {
        for (key, value) in layer.iter() {
            base.insert(key.clone(), Value::String(value.clone()));
        }
    }
}
