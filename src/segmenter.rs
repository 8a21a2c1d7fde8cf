//! Structural segmentation: splits input into JSON and prose regions (stage 2).
//!
//! Scans left to right. Each `{` or `[` is a candidate JSON opener; a
//! matching closer is located by depth tracking that understands string
//! literals (a `"` toggles in-string mode, `\` escapes the next character
//! while in-string). If the enclosed substring parses as JSON, it becomes a
//! `Json` segment holding the minified, pruned encoding; otherwise the
//! opener is just more prose. Consecutive prose runs merge into one
//! `Prose` segment.

use serde_json::{Map, Value};
use std::sync::LazyLock;

use regex::Regex;

static COLLAPSE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());
static COLLAPSE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n(\s*\n)+").unwrap());

/// Which kind of region a [`Segment`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A region that parsed as JSON; `content` is its minified, pruned form.
    Json,
    /// A region of ordinary text; `content` is whitespace-normalized.
    Prose,
}

/// A tagged portion of the input produced by [`split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Whether this segment is JSON or prose.
    pub kind: SegmentKind,
    /// The (already transformed) content of this segment.
    pub content: String,
}

/// Split `text` into an ordered list of JSON/prose segments and return the
/// concatenation of their transformed contents as a single string, the form
/// stage 2 actually feeds forward (§4.4/§4.7).
pub fn split(text: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut prose_buf = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut consumed = false;
        if c == '{' || c == '[' {
            if let Some(end) = find_matching_closer(&chars, i) {
                let candidate: String = chars[i..=end].iter().collect();
                if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
                    if !prose_buf.is_empty() {
                        segments.push(Segment {
                            kind: SegmentKind::Prose,
                            content: normalize_prose(&prose_buf),
                        });
                        prose_buf.clear();
                    }
                    segments.push(Segment {
                        kind: SegmentKind::Json,
                        content: minify_pruned(value),
                    });
                    i = end + 1;
                    consumed = true;
                }
            }
        }
        if !consumed {
            prose_buf.push(c);
            i += 1;
        }
    }

    if !prose_buf.is_empty() {
        segments.push(Segment {
            kind: SegmentKind::Prose,
            content: normalize_prose(&prose_buf),
        });
    }

    segments
}

/// [`split`] followed by concatenation — the text stage 2 emits.
pub fn transform(text: &str) -> String {
    split(text)
        .into_iter()
        .map(|s| s.content)
        .collect::<Vec<_>>()
        .concat()
}

/// Find the index (into `chars`) of the closing bracket that balances the
/// opener at `start`, respecting string literals. Depth is tracked
/// generically across `{`/`[`/`}`/`]` — a real type mismatch is caught by
/// the subsequent `serde_json` parse, not by this scan.
fn find_matching_closer(chars: &[char], start: usize) -> Option<usize> {
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape = false;

    for (j, &c) in chars.iter().enumerate().skip(start) {
        if in_string {
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
    }

    None
}

/// Recursively prune a parsed JSON value (§4.4), then serialize it minified.
fn minify_pruned(value: Value) -> String {
    let fallback_shell = match &value {
        Value::Array(_) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    };
    let pruned = prune(value).unwrap_or(fallback_shell);
    serde_json::to_string(&pruned).expect("pruned JSON value always serializes")
}

/// Returns `None` when `value` "prunes to undefined": `null`, an empty or
/// whitespace-only string, an empty array, or an empty object (after
/// recursively pruning its own contents). Numeric zero, `false`, and
/// non-empty nested structures are preserved as-is.
fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            if s.trim().is_empty() {
                None
            } else {
                Some(Value::String(s))
            }
        }
        Value::Array(arr) => {
            let pruned: Vec<Value> = arr.into_iter().filter_map(prune).collect();
            if pruned.is_empty() { None } else { Some(Value::Array(pruned)) }
        }
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| prune(v).map(|pv| (k, pv)))
                .collect();
            if pruned.is_empty() { None } else { Some(Value::Object(pruned)) }
        }
        other => Some(other),
    }
}

/// Stage 2 prose normalization (§4.4): tabs become a single space, runs of
/// 2+ interior spaces collapse to one, runs of 3+ consecutive newlines
/// collapse to exactly two.
fn normalize_prose(text: &str) -> String {
    let tabs_replaced = text.replace('\t', " ");
    let spaces_collapsed = COLLAPSE_SPACES.replace_all(&tabs_replaced, " ");
    COLLAPSE_NEWLINES
        .replace_all(&spaces_collapsed, "\n\n")
        .to_string()
}
