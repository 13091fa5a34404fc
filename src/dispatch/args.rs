/// Module argument normalization: `key=value` parameters and bare flags.
use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Value of one module argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// `key=value`: everything after the first `=`.
    Text(String),
    /// Bare token, serialized as `true`.
    Flag,
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::Flag => serializer.serialize_bool(true),
        }
    }
}

/// Normalized module arguments, keyed by option name, in command-line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModuleArgs(IndexMap<String, ArgValue>);

impl ModuleArgs {
    /// Text value of `key`, if it was given as `key=value`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ArgValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether `key` was given at all.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModuleArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Normalize raw `-r` tokens.
///
/// A token containing `=` is split once, at the first `=`; the rest is kept
/// verbatim. Any other token becomes a flag. Nothing is rejected. A repeated
/// key keeps its first position and its last value.
#[must_use]
pub fn normalize<S: AsRef<str>>(raw: &[S]) -> ModuleArgs {
    let mut args = IndexMap::new();
    for token in raw {
        let token = token.as_ref();
        match token.split_once('=') {
            Some((key, value)) => args.insert(key.to_owned(), ArgValue::Text(value.to_owned())),
            None => args.insert(token.to_owned(), ArgValue::Flag),
        };
    }
    ModuleArgs(args)
}
