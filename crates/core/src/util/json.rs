//! JSON encoding and decoding with process-wide options.
//!
//! Options are installed once, either explicitly at startup via [`configure`]
//! or implicitly with defaults on first use, and never change afterwards.
//!
//! Beyond the options, the encoding rules are fixed: non-ASCII characters are
//! written literally, timestamps use their serde representation (RFC 3339 for
//! `chrono`), and unknown fields are ignored on decode. Field-level decode
//! leniency lives in [`de`].

use std::sync::OnceLock;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, error::Category};

use crate::error::JsonError;
use crate::util::object::is_blank;

/// Process-wide JSON encoding options.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JsonOptions {
    /// Drop object members whose value is `null`.
    pub omit_nulls: bool,
    /// Indent output.
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            omit_nulls: true,
            pretty: false,
        }
    }
}

static OPTIONS: OnceLock<JsonOptions> = OnceLock::new();

/// Install the process-wide options.
///
/// Must run before the first encode; fails if options are already in place.
pub fn configure(options: JsonOptions) -> Result<(), JsonError> {
    OPTIONS
        .set(options)
        .map_err(|_| JsonError::AlreadyConfigured)
}

/// Options in effect (defaults if [`configure`] was never called).
pub fn options() -> &'static JsonOptions {
    OPTIONS.get_or_init(JsonOptions::default)
}

/// Encode `value`, logging and swallowing any failure.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    match encode(value, options()) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!(error = %e, "JSON serialization failed");
            None
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T, options: &JsonOptions) -> serde_json::Result<String> {
    let mut tree = serde_json::to_value(value)?;
    if options.omit_nulls {
        strip_nulls(&mut tree);
    }
    if options.pretty {
        serde_json::to_string_pretty(&tree)
    } else {
        serde_json::to_string(&tree)
    }
}

// Nulls inside arrays are kept; only object members are dropped.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// Decode `json` into `T`, logging and swallowing any failure.
///
/// Syntax errors are logged as parse failures (warn); input that is valid
/// JSON but does not fit `T` is logged as a mapping failure (error).
pub fn from_json<T: DeserializeOwned>(json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            log_decode_failure(&e);
            None
        }
    }
}

fn log_decode_failure(e: &serde_json::Error) {
    match e.classify() {
        Category::Syntax | Category::Eof => {
            tracing::warn!(line = e.line(), column = e.column(), error = %e, "JSON parse failure");
        }
        Category::Data => {
            tracing::error!(line = e.line(), column = e.column(), error = %e, "JSON mapping failure");
        }
        Category::Io => {
            tracing::error!(error = %e, "JSON I/O failure");
        }
    }
}

/// Collect the values found at a colon-delimited path.
///
/// Each segment names an object member. Arrays met along the way are
/// flattened, so `items:id` over `{"items":[{"id":1},{"id":2}]}` yields
/// `["1", "2"]`. Terminal values are rendered as JSON text with double quotes
/// removed. A blank document or path, or a path that does not resolve,
/// yields an empty list; only malformed JSON is an error.
pub fn read_value_from_json(json: &str, path: &str) -> Result<Vec<String>, JsonError> {
    let mut values = Vec::new();
    if is_blank_text(json) || is_blank_text(path) {
        return Ok(values);
    }

    let mut segments: Vec<&str> = path.split(':').collect();
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }

    let root: Value = serde_json::from_str(json).map_err(JsonError::Parse)?;
    collect_path(&root, &segments, &mut values);
    Ok(values)
}

fn is_blank_text(s: &str) -> bool {
    is_blank(Some(&Value::String(s.to_string())))
}

fn collect_path(node: &Value, path: &[&str], out: &mut Vec<String>) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        let mut push = |child: &Value| out.push(child.to_string().replace('"', ""));
        match node {
            Value::Array(items) => items.iter().filter_map(|i| i.get(segment)).for_each(&mut push),
            _ => node.get(segment).into_iter().for_each(&mut push),
        }
        return;
    }

    match node.get(segment) {
        Some(Value::Array(items)) => items.iter().for_each(|i| collect_path(i, rest, out)),
        Some(child) => collect_path(child, rest, out),
        None => {}
    }
}

/// Field-level decode helpers, used with `#[serde(deserialize_with = ..)]`.
pub mod de {
    use serde::{Deserialize, Deserializer, de::Error as _};
    use serde_json::Value;

    /// Treat an empty string (or a missing/null value) as `None`.
    ///
    /// Pair with `#[serde(default)]` so absent fields are accepted too.
    pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(D::Error::custom),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    /// Accept either a sequence or a single value standing for a
    /// one-element sequence.
    pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        })
    }
}
