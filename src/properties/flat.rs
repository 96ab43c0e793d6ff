//! Flat single-valued properties with a fallback chain
//!
//! [`FlatProperties`] is the plain key/value shape most configuration
//! sources produce: one value per key, plus an optional set of defaults
//! consulted for keys the properties do not define. It is the input to
//! [`ExtendedProperties::convert_properties`](super::ExtendedProperties::convert_properties)
//! and the output of
//! [`ExtendedProperties::get_properties`](super::ExtendedProperties::get_properties).

use indexmap::IndexMap;

use super::value::PropertyValue;

/// Ordered single-valued properties with optional defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatProperties {
    values: IndexMap<String, PropertyValue>,
    defaults: Option<Box<FlatProperties>>,
}

impl FlatProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates empty properties that fall back to `defaults`.
    pub fn with_defaults(defaults: FlatProperties) -> Self {
        Self {
            values: IndexMap::new(),
            defaults: Some(Box::new(defaults)),
        }
    }

    /// Sets `key`, replacing any previous value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Looks up `key` here, then in the defaults chain.
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.values
            .get(key)
            .or_else(|| self.defaults.as_ref().and_then(|d| d.get_property(key)))
    }

    /// Looks up `key` without consulting defaults.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn defaults(&self) -> Option<&FlatProperties> {
        self.defaults.as_deref()
    }

    /// Entries defined directly on this level, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All keys visible through this level and its defaults, deepest
    /// defaults first, without duplicates.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for level in self.levels().into_iter().rev() {
            for key in level.values.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }
        names
    }

    /// This level followed by each defaults level, outermost first.
    pub(crate) fn levels(&self) -> Vec<&FlatProperties> {
        let mut levels = Vec::new();
        let mut current = Some(self);
        while let Some(level) = current {
            levels.push(level);
            current = level.defaults();
        }
        levels
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FlatProperties
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut properties = FlatProperties::new();
        for (key, value) in iter {
            properties.set_property(key, value);
        }
        properties
    }
}
