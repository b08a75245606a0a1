//! # Path patterns
//!
//! Compiles a [`PathSpec`] into a [`Pattern`]: an anchored regular
//! expression plus the ordered list of parameter [`Key`]s it captures.
//!
//! # Path syntax
//!
//! | Spec | Matches | Params |
//! |------|---------|--------|
//! | `/about` | `/about`, `/about/` | - |
//! | `/users/:id` | `/users/42` | `id = "42"` |
//! | `/users/:id(\d+)` | `/users/42`, not `/users/bob` | `id = "42"` |
//! | `/posts/:slug?` | `/posts`, `/posts/hello` | `slug` when present |
//! | `/files/:path*` | `/files`, `/files/a/b` | `path = "a/b"` |
//! | `/files/:path+` | `/files/a/b`, not `/files` | `path = "a/b"` |
//! | `/(.*)` | everything starting with `/` | `0 = "..."` |
//! | `/assets/*` | `/assets/css/site.css` | `0 = "css/site.css"` |
//!
//! Unnamed groups are keyed by their position among unnamed groups.
//! Backslash escapes a special character (`/\:literal`).
//!
//! A [`regex::Regex`] can be used directly as a spec. It is matched as-is;
//! named groups become keys with their name, other groups are keyed by
//! position.
//!
//! # Options
//!
//! See [`PatternOptions`]. By default matching is case-insensitive and a
//! single trailing `/` is tolerated.

mod parse;

use regex::Regex;
use std::fmt;
use thiserror::Error;

/// A path specification as given at registration time.
///
/// Two specs are equal when their text is equal (for regexes, their source).
#[derive(Debug, Clone)]
pub enum PathSpec {
    /// A literal or parameterized path such as `/users/:id`.
    Path(String),
    /// A pre-built regular expression.
    Regex(Regex),
}

impl PathSpec {
    /// The spec's source text.
    pub fn as_str(&self) -> &str {
        match self {
            PathSpec::Path(path) => path,
            PathSpec::Regex(regex) => regex.as_str(),
        }
    }
}

impl PartialEq for PathSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathSpec::Path(a), PathSpec::Path(b)) => a == b,
            (PathSpec::Regex(a), PathSpec::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for PathSpec {}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSpec::Path(path) => f.write_str(path),
            PathSpec::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        PathSpec::Path(path.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        PathSpec::Path(path)
    }
}

impl From<&String> for PathSpec {
    fn from(path: &String) -> Self {
        PathSpec::Path(path.clone())
    }
}

impl From<Regex> for PathSpec {
    fn from(regex: Regex) -> Self {
        PathSpec::Regex(regex)
    }
}

/// Compile options for path specs.
///
/// Options do not apply to [`PathSpec::Regex`] specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternOptions {
    /// Match case-sensitively.
    pub sensitive: bool,
    /// Do not tolerate a trailing `/` that the spec does not have.
    pub strict: bool,
}

impl PatternOptions {
    /// Default options: case-insensitive, trailing `/` tolerated.
    pub const fn new() -> Self {
        Self {
            sensitive: false,
            strict: false,
        }
    }

    /// Set case sensitivity.
    pub const fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// Set trailing-slash strictness.
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Errors raised while compiling a path spec.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The spec produced an invalid regular expression.
    #[error("invalid path pattern `{spec}`: {source}")]
    Invalid {
        /// The offending spec.
        spec: String,
        /// The regex compile error.
        #[source]
        source: regex::Error,
    },
}

/// The name of a parameter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// A `:name` parameter or a named regex group.
    Named(String),
    /// An unnamed group, by position.
    Index(usize),
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Named(name) => f.write_str(name),
            KeyName::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Descriptor of one capturing parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Parameter name.
    pub name: KeyName,
    /// Literal prefix consumed with the parameter (`/` or `.`), if any.
    pub prefix: String,
    /// Segment delimiter.
    pub delimiter: String,
    /// `?` or `*` modifier.
    pub optional: bool,
    /// `+` or `*` modifier.
    pub repeat: bool,
    /// Parameter is followed by more text in the same segment.
    pub partial: bool,
    /// Bare `*` wildcard.
    pub asterisk: bool,
    /// Regex source matched by a single occurrence.
    pub pattern: String,
}

impl Key {
    fn group(name: KeyName) -> Self {
        Self {
            name,
            prefix: String::new(),
            delimiter: String::new(),
            optional: false,
            repeat: false,
            partial: false,
            asterisk: false,
            pattern: String::new(),
        }
    }
}

/// Raw match data: the whole match, each capture group, offset and input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    groups: Vec<Option<String>>,
    index: usize,
    input: String,
}

impl Matches {
    /// Build match data by hand.
    ///
    /// `groups[0]` is the whole matched substring.
    pub fn new(groups: Vec<Option<String>>, index: usize, input: impl Into<String>) -> Self {
        Self {
            groups,
            index,
            input: input.into(),
        }
    }

    /// Group `i`; `0` is the whole match. `None` if the group did not take part.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.groups.get(i).and_then(Option::as_deref)
    }

    /// The whole matched substring.
    pub fn full(&self) -> &str {
        self.get(0).unwrap_or_default()
    }

    /// All groups, whole match first.
    pub fn groups(&self) -> &[Option<String>] {
        &self.groups
    }

    /// Number of groups including the whole match.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Byte offset of the match in the input.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The input the pattern was run against.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Extracted parameters, in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    /// No parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter. Unnamed groups are looked up by index (`"0"`).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Iterate `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// A compiled path spec.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    keys: Vec<Key>,
}

impl Pattern {
    /// Compile `spec` with `options`.
    pub fn compile(spec: &PathSpec, options: &PatternOptions) -> Result<Self, PatternError> {
        match spec {
            PathSpec::Path(path) => {
                let (source, keys) = parse::to_regex_source(path, options);
                let regex = Regex::new(&source).map_err(|source| PatternError::Invalid {
                    spec: path.clone(),
                    source,
                })?;
                Ok(Self { regex, keys })
            }
            PathSpec::Regex(regex) => {
                let mut position = 0;
                let keys = regex
                    .capture_names()
                    .skip(1)
                    .map(|name| match name {
                        Some(name) => Key::group(KeyName::Named(name.to_string())),
                        None => {
                            position += 1;
                            Key::group(KeyName::Index(position - 1))
                        }
                    })
                    .collect();
                Ok(Self {
                    regex: regex.clone(),
                    keys,
                })
            }
        }
    }

    /// Run the pattern against `path`.
    pub fn exec(&self, path: &str) -> Option<Matches> {
        let caps = self.regex.captures(path)?;
        let index = caps.get(0).map_or(0, |m| m.start());
        let groups = caps
            .iter()
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect();
        Some(Matches::new(groups, index, path))
    }

    /// Parameter keys, in capture order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Map capture groups onto key names. Groups that did not take part are
    /// left out.
    pub fn params(&self, matches: &Matches) -> Params {
        self.keys
            .iter()
            .enumerate()
            .filter_map(|(i, key)| matches.get(i + 1).map(|value| (key.name.to_string(), value)))
            .collect()
    }

    /// The generated regular expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}
