//! Phrase substitution table (stage 1).
//!
//! Holds an ordered map of verbose source phrase → shorter replacement,
//! matched case-insensitively on the source and inserted verbatim. A
//! pluggable [`SubstitutionLoader`] supplies the table; on any failure the
//! table falls back to [`BuiltinLoader`]'s fixed set (§7 `LoaderUnavailable`
//! is never surfaced).

use std::fmt;

/// Supplies a `source phrase -> replacement phrase` map from an external
/// source. Transport is free to choose (file, HTTP, embedded asset); the
/// core only depends on this one method.
pub trait SubstitutionLoader {
    /// Returns the substitution map, or an error description on failure.
    fn load(&self) -> Result<Vec<(String, String)>, String>;
}

/// Fallback loader: a fixed set of verbose English phrases mapped to
/// shorter equivalents, shipped with the core (§4.2).
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinLoader;

/// The fallback phrase set named verbatim in §4.2.
const BUILTIN_PHRASES: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("at this point in time", "now"),
    ("for the purpose of", "for"),
    ("with regard to", "regarding"),
    ("in the event that", "if"),
    ("it is important to note that", "note:"),
    ("as previously mentioned", "previously"),
    ("in spite of the fact that", "although"),
];

impl SubstitutionLoader for BuiltinLoader {
    fn load(&self) -> Result<Vec<(String, String)>, String> {
        Ok(BUILTIN_PHRASES
            .iter()
            .map(|(s, r)| (s.to_string(), r.to_string()))
            .collect())
    }
}

/// The loaded substitution table, ordered by source-phrase length
/// descending so longer phrases always win over shorter substrings that
/// would otherwise match first (§3 "Substitution entry").
#[derive(Clone)]
pub struct SubstitutionTable {
    entries: Vec<(String, String)>,
}

impl fmt::Debug for SubstitutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl SubstitutionTable {
    /// Load from `loader`, falling back to [`BuiltinLoader`] on failure.
    /// Idempotent in the sense that repeated calls with the same loader
    /// produce the same table; there is no persistent load-once state here,
    /// construction is cheap and side-effect free.
    pub fn load(loader: &dyn SubstitutionLoader) -> Self {
        let raw = match loader.load() {
            Ok(entries) if !entries.is_empty() => entries,
            Ok(_) => {
                tracing::debug!("substitution loader returned an empty table, using builtin");
                BuiltinLoader.load().expect("builtin loader cannot fail")
            }
            Err(reason) => {
                tracing::debug!(reason, "substitution loader failed, using builtin");
                BuiltinLoader.load().expect("builtin loader cannot fail")
            }
        };
        Self::from_entries(raw)
    }

    /// Build directly from an unsorted list of `(source, replacement)`
    /// pairs, sorting by source length descending.
    fn from_entries(mut entries: Vec<(String, String)>) -> Self {
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    /// The built-in fallback table, bypassing any loader.
    pub fn builtin() -> Self {
        Self::from_entries(BuiltinLoader.load().expect("builtin loader cannot fail"))
    }

    /// Source-length-descending view of the table.
    pub fn mappings(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Add an entry for test augmentation. Not safe to call concurrently
    /// with `compress` (§5): intended for test setup or pre-serving only.
    pub fn add(&mut self, source: impl Into<String>, replacement: impl Into<String>) {
        self.entries.push((source.into(), replacement.into()));
        self.entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }
}
