//! # Extended Properties
//!
//! [`ExtendedProperties`] is an ordered, multi-valued key/value container
//! with a line-based text format. It extends the usual `key=value`
//! properties file with:
//!
//! - **Lists**: a key may hold several values, written either as repeated
//!   `key=` lines or as comma-separated values on one line.
//! - **Escaping**: `\,` is a literal comma and `\\` a literal backslash.
//! - **Continuation**: a line ending in an unescaped `\` continues on the
//!   next line.
//! - **Interpolation**: `${other.key}` inside a value is replaced by the
//!   value of `other.key` when the value is read.
//! - **Includes**: a line `include=path` (the key is configurable per
//!   container) loads another file into the same container.
//! - **Subsets**: [`subset`](ExtendedProperties::subset) views the keys
//!   under a prefix without copying them.
//!
//! ## Example
//!
//! ```
//! use collection_kit::properties::ExtendedProperties;
//!
//! let mut props = ExtendedProperties::new();
//! props.load_str("root=/srv\ndb.path=${root}/db\ndb.hosts=a,b\n").unwrap();
//!
//! assert_eq!(props.get_string("db.path").as_deref(), Some("/srv/db"));
//! assert_eq!(props.get_string_array("db.hosts"), vec!["a", "b"]);
//!
//! let db = props.subset("db").unwrap();
//! assert_eq!(db.get_string("path").as_deref(), Some("/srv/db"));
//! ```
//!
//! ## Text format
//!
//! Lines are trimmed. Blank lines and lines starting with `#` or `!` are
//! ignored. A line without an `=` (or with nothing before it) is skipped.
//! The key ends at the first unescaped `=`. A continuation still pending at
//! end of input is kept as the final line rather than dropped.

mod flat;
mod interpolate;
mod reader;
mod subset;
pub mod tokenizer;
mod value;

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

pub use flat::FlatProperties;
pub use interpolate::{END_TOKEN, START_TOKEN};
pub use reader::PropertiesReader;
pub use subset::{Subset, SubsetMut};
pub use value::{test_boolean, Entry, FromPropertyValue, PropertyValue};

/// Default name of the key that includes another properties file.
pub const DEFAULT_INCLUDE_KEY: &str = "include";

/// Ordered multi-valued properties. See the [module documentation](self).
#[derive(Debug, Clone)]
pub struct ExtendedProperties {
    entries: IndexMap<String, Entry>,
    include: Option<String>,
    base_path: Option<PathBuf>,
    defaults: Option<Box<ExtendedProperties>>,
    initialized: bool,
}

impl Default for ExtendedProperties {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            include: Some(DEFAULT_INCLUDE_KEY.to_string()),
            base_path: None,
            defaults: None,
            initialized: false,
        }
    }
}

impl ExtendedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a properties file. Relative includes resolve against the
    /// file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut props = Self::new();
        props.load_file(path)?;
        Ok(props)
    }

    /// Loads `path`, then `defaults_path` as the fallback container.
    pub fn from_file_with_defaults<P: AsRef<Path>, D: AsRef<Path>>(
        path: P,
        defaults_path: D,
    ) -> Result<Self> {
        let defaults = Self::from_file(defaults_path)?;
        Ok(Self::from_file(path)?.with_defaults(defaults))
    }

    /// Sets the fallback container consulted for keys missing here.
    pub fn with_defaults(mut self, defaults: ExtendedProperties) -> Self {
        self.defaults = Some(Box::new(defaults));
        self
    }

    pub fn defaults(&self) -> Option<&ExtendedProperties> {
        self.defaults.as_deref()
    }

    /// The key that triggers file inclusion while loading, if any.
    pub fn include(&self) -> Option<&str> {
        self.include.as_deref()
    }

    /// Changes the include key; `None` disables inclusion.
    pub fn set_include(&mut self, include: Option<impl Into<String>>) {
        self.include = include.map(Into::into);
    }

    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    pub fn set_base_path(&mut self, base_path: impl Into<PathBuf>) {
        self.base_path = Some(base_path.into());
    }

    /// `true` once any property has been added or loaded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ------------------------------------------------------------------
    // Loading and saving
    // ------------------------------------------------------------------

    /// Loads properties from a reader, appending to existing values.
    ///
    /// Lines committed before an I/O error stay in the container.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut stack = Vec::new();
        self.load_from(BufReader::new(reader), &mut stack)
    }

    pub fn load_str(&mut self, text: &str) -> Result<()> {
        self.load(text.as_bytes())
    }

    /// Loads a file and makes its directory the base path for includes.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref().canonicalize()?;
        if let Some(parent) = path.parent() {
            self.base_path = Some(parent.to_path_buf());
        }
        let file = File::open(&path)?;
        let mut stack = vec![path];
        self.load_from(BufReader::new(file), &mut stack)
    }

    fn load_from<B: BufRead>(&mut self, source: B, stack: &mut Vec<PathBuf>) -> Result<()> {
        let mut lines = PropertiesReader::new(source);
        let before = self.entries.len();

        while let Some(line) = lines.read_property()? {
            let Some((key, value)) = reader::split_key_value(&line) else {
                debug!(
                    "Skipping malformed property line {}: {}",
                    lines.line_number(),
                    line
                );
                continue;
            };

            if self.is_include_key(&key) {
                self.load_include(&value, stack)?;
            } else {
                self.add_property(key, value);
            }
        }

        self.initialized = true;
        debug!(
            "Loaded {} lines, {} new keys",
            lines.line_number(),
            self.entries.len().saturating_sub(before)
        );
        Ok(())
    }

    fn is_include_key(&self, key: &str) -> bool {
        self.include
            .as_deref()
            .is_some_and(|include| key.eq_ignore_ascii_case(include))
    }

    fn resolve_include(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        let relative = value.strip_prefix("./").unwrap_or(value);
        match &self.base_path {
            Some(base) => base.join(relative),
            None => PathBuf::from(relative),
        }
    }

    fn load_include(&mut self, value: &str, stack: &mut Vec<PathBuf>) -> Result<()> {
        let path = self.resolve_include(value);
        if !path.is_file() {
            warn!(
                "Included properties file {} does not exist or is not a file; skipping",
                path.display()
            );
            return Ok(());
        }

        let path = path.canonicalize()?;
        if stack.contains(&path) {
            let cycle = stack
                .iter()
                .chain(std::iter::once(&path))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::IncludeCycle { cycle });
        }

        debug!("Including properties from {}", path.display());
        let file = File::open(&path)?;
        stack.push(path);
        let result = self.load_from(BufReader::new(file), stack);
        stack.pop();
        result
    }

    /// Writes all properties in the text format.
    ///
    /// Each line of `header` is written as a `#` comment first. Lists are
    /// written as one line per value. Commas and backslashes in values are
    /// escaped so that [`load`](Self::load) reads back the same values.
    /// Keys are escaped the same way (see [`tokenizer::escape_key`]), so any
    /// non-empty key without control characters reads back unchanged.
    ///
    /// Two things do not survive a round trip. Values are trimmed on load,
    /// so leading and trailing whitespace of a value is lost. Non-string
    /// scalars are written as text and reload as strings: after
    /// `add_property("k", 5i64)`, `get_string("k")` is `None` before the
    /// round trip and `Some("5")` after it.
    pub fn save<W: Write>(&self, mut writer: W, header: Option<&str>) -> Result<()> {
        if let Some(header) = header {
            for line in header.lines() {
                if line.starts_with(['#', '!']) {
                    writeln!(writer, "{}", line)?;
                } else {
                    writeln!(writer, "# {}", line)?;
                }
            }
        }

        for (key, entry) in &self.entries {
            let key = tokenizer::escape_key(key);
            for value in entry.values() {
                writeln!(
                    writer,
                    "{}={}",
                    key,
                    tokenizer::escape_value(&value.to_string())
                )?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Appends a value to `key`.
    ///
    /// A string value is split at unescaped commas into several values and
    /// unescaped (see [`tokenizer::split_values`]). Other values are
    /// appended unchanged. Existing values are never replaced.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        match value.into() {
            PropertyValue::String(raw) => {
                for token in tokenizer::split_values(&raw) {
                    self.add_property_direct(key.clone(), PropertyValue::String(token));
                }
            }
            other => self.add_property_direct(key, other),
        }
    }

    /// Appends a value to `key` without splitting or unescaping it.
    pub fn add_property_direct(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            MapEntry::Occupied(mut occupied) => occupied.get_mut().push(value),
            MapEntry::Vacant(vacant) => {
                vacant.insert(Entry::Single(value));
            }
        }
        self.initialized = true;
    }

    /// Replaces all values of `key` with `value`, split like
    /// [`add_property`](Self::add_property).
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        self.clear_property(&key);
        self.add_property(key, value);
    }

    /// Removes `key` and all its values.
    pub fn clear_property(&mut self, key: &str) {
        self.entries.shift_remove(key);
    }

    /// Removes `key`, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.entries.shift_remove(key)
    }

    /// Appends every value of `other`, key by key, without re-splitting.
    pub fn combine(&mut self, other: &ExtendedProperties) {
        for (key, entry) in &other.entries {
            for value in entry.values() {
                self.add_property_direct(key.as_str(), value.clone());
            }
        }
    }

    /// Builds a container from flat properties.
    ///
    /// The defaults chain is applied first, deepest level first, and each
    /// level replaces the values of the one below. String values are split
    /// like [`set_property`](Self::set_property). Other values are stored
    /// as-is; since they are not strings, [`get_string`](Self::get_string)
    /// reports them as absent.
    pub fn convert_properties(flat: &FlatProperties) -> ExtendedProperties {
        let mut props = ExtendedProperties::new();
        for level in flat.levels().into_iter().rev() {
            for (key, value) in level.iter() {
                match value {
                    PropertyValue::String(s) => props.set_property(key, s.as_str()),
                    other => {
                        props.clear_property(key);
                        props.add_property_direct(key, other.clone());
                    }
                }
            }
        }
        props
    }

    // ------------------------------------------------------------------
    // Raw access
    // ------------------------------------------------------------------

    /// The raw values of `key`, ignoring defaults and interpolation.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Keys starting with `prefix`, in first-insertion order.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.keys().filter(move |key| key.starts_with(prefix))
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A view of the keys under `prefix.`, or `None` if there are none.
    pub fn subset(&self, prefix: &str) -> Option<Subset<'_>> {
        let view = Subset::new(self, prefix);
        if view.is_empty() {
            None
        } else {
            Some(view)
        }
    }

    /// A writable view of the keys under `prefix.`. The view may start
    /// empty.
    pub fn subset_mut(&mut self, prefix: &str) -> SubsetMut<'_> {
        SubsetMut::new(self, prefix)
    }

    // ------------------------------------------------------------------
    // Interpolated access
    // ------------------------------------------------------------------

    fn lookup(&self, key: &str) -> Option<&Entry> {
        self.entries
            .get(key)
            .or_else(|| self.defaults.as_ref().and_then(|d| d.lookup(key)))
    }

    /// Replaces `${key}` references in `base` with the current values.
    pub fn interpolate(&self, base: &str) -> String {
        let lookup = |name: &str| {
            self.lookup(name)
                .and_then(Entry::first)
                .map(PropertyValue::to_string)
        };
        interpolate::interpolate(base, &lookup)
    }

    fn resolve(&self, value: &PropertyValue) -> PropertyValue {
        match value {
            PropertyValue::String(s) => PropertyValue::String(self.interpolate(s)),
            other => other.clone(),
        }
    }

    /// The first value of `key` as text, whatever its type, interpolated.
    pub fn get_property(&self, key: &str) -> Option<String> {
        let value = self.lookup(key)?.first()?;
        Some(self.interpolate(&value.to_string()))
    }

    /// The first value of `key` if it is a string, interpolated.
    ///
    /// Returns `None` if the key is absent or its first value is not a
    /// string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        let value = self.lookup(key)?.first()?.as_str()?;
        Some(self.interpolate(value))
    }

    /// Like [`get_string`](Self::get_string), falling back to the
    /// interpolated `default`.
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key)
            .unwrap_or_else(|| self.interpolate(default))
    }

    /// A copy of all values of `key`, strings interpolated. Empty if absent.
    pub fn get_vector(&self, key: &str) -> Vec<PropertyValue> {
        self.lookup(key)
            .map(|entry| entry.values().iter().map(|v| self.resolve(v)).collect())
            .unwrap_or_default()
    }

    /// Same as [`get_vector`](Self::get_vector).
    pub fn get_list(&self, key: &str) -> Vec<PropertyValue> {
        self.get_vector(key)
    }

    /// All values of `key` as interpolated text. Empty if absent.
    pub fn get_string_array(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .map(|entry| {
                entry
                    .values()
                    .iter()
                    .map(|v| self.interpolate(&v.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Interprets each value of `key` as `name=value` and collects them.
    pub fn get_properties(&self, key: &str) -> Result<FlatProperties> {
        let mut properties = FlatProperties::new();
        for token in self.get_string_array(key) {
            match token.find('=') {
                Some(pos) if pos > 0 => {
                    properties.set_property(token[..pos].trim(), token[pos + 1..].trim());
                }
                _ => {
                    return Err(Error::MalformedToken {
                        key: key.to_string(),
                        token,
                    })
                }
            }
        }
        Ok(properties)
    }

    // ------------------------------------------------------------------
    // Typed access
    // ------------------------------------------------------------------

    /// The first value of `key` converted to `T`.
    pub fn get_as<T: FromPropertyValue>(&self, key: &str) -> Result<T> {
        let value = self
            .lookup(key)
            .and_then(Entry::first)
            .ok_or_else(|| Error::MissingKey {
                key: key.to_string(),
            })?;
        T::convert(key, &self.resolve(value))
    }

    /// Like [`get_as`](Self::get_as), returning `default` if `key` is absent.
    pub fn get_as_or<T: FromPropertyValue>(&self, key: &str, default: T) -> Result<T> {
        match self.lookup(key).and_then(Entry::first) {
            Some(value) => T::convert(key, &self.resolve(value)),
            None => Ok(default),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_as(key)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        self.get_as_or(key, default)
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        self.get_as(key)
    }

    pub fn get_int_or(&self, key: &str, default: i32) -> Result<i32> {
        self.get_as_or(key, default)
    }

    pub fn get_long(&self, key: &str) -> Result<i64> {
        self.get_as(key)
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> Result<i64> {
        self.get_as_or(key, default)
    }

    pub fn get_float(&self, key: &str) -> Result<f32> {
        self.get_as(key)
    }

    pub fn get_float_or(&self, key: &str, default: f32) -> Result<f32> {
        self.get_as_or(key, default)
    }

    pub fn get_double(&self, key: &str) -> Result<f64> {
        self.get_as(key)
    }

    pub fn get_double_or(&self, key: &str, default: f64) -> Result<f64> {
        self.get_as_or(key, default)
    }
}

impl Serialize for ExtendedProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}
