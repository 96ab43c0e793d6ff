//! Prefix views over an [`ExtendedProperties`] container
//!
//! A subset for prefix `db` exposes every parent key `db.<name>` as
//! `<name>`. Views borrow the parent and hold no values of their own, so
//! writes through [`SubsetMut`] land on the parent immediately and reads
//! always see the parent's current state.

use super::value::{Entry, FromPropertyValue, PropertyValue};
use super::ExtendedProperties;
use crate::error::Result;

fn qualified_prefix(prefix: &str) -> String {
    format!("{}.", prefix)
}

/// Read-only view of the keys under a prefix.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    parent: &'a ExtendedProperties,
    prefix: String,
}

impl<'a> Subset<'a> {
    pub(super) fn new(parent: &'a ExtendedProperties, prefix: &str) -> Self {
        Self {
            parent,
            prefix: qualified_prefix(prefix),
        }
    }

    /// The parent key a subset key maps to.
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// The prefix, without the trailing `.`.
    pub fn prefix(&self) -> &str {
        &self.prefix[..self.prefix.len() - 1]
    }

    pub fn parent(&self) -> &'a ExtendedProperties {
        self.parent
    }

    pub fn get(&self, key: &str) -> Option<&'a Entry> {
        self.parent.get(&self.full_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.parent.contains_key(&self.full_key(key))
    }

    pub fn get_property(&self, key: &str) -> Option<String> {
        self.parent.get_property(&self.full_key(key))
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.parent.get_string(&self.full_key(key))
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.parent.get_string_or(&self.full_key(key), default)
    }

    pub fn get_vector(&self, key: &str) -> Vec<PropertyValue> {
        self.parent.get_vector(&self.full_key(key))
    }

    pub fn get_list(&self, key: &str) -> Vec<PropertyValue> {
        self.parent.get_list(&self.full_key(key))
    }

    pub fn get_string_array(&self, key: &str) -> Vec<String> {
        self.parent.get_string_array(&self.full_key(key))
    }

    pub fn get_as<T: FromPropertyValue>(&self, key: &str) -> Result<T> {
        self.parent.get_as(&self.full_key(key))
    }

    pub fn get_as_or<T: FromPropertyValue>(&self, key: &str, default: T) -> Result<T> {
        self.parent.get_as_or(&self.full_key(key), default)
    }

    /// Subset keys in the parent's insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parent
            .keys()
            .filter_map(move |key| key.strip_prefix(self.prefix.as_str()))
    }

    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().next().is_none()
    }

    /// A nested view; `subset("a")` of the `db` view covers `db.a.*`.
    pub fn subset(&self, prefix: &str) -> Option<Subset<'a>> {
        self.parent.subset(&self.full_key(prefix))
    }
}

/// Read/write view of the keys under a prefix.
#[derive(Debug)]
pub struct SubsetMut<'a> {
    parent: &'a mut ExtendedProperties,
    prefix: String,
}

impl<'a> SubsetMut<'a> {
    pub(super) fn new(parent: &'a mut ExtendedProperties, prefix: &str) -> Self {
        Self {
            parent,
            prefix: qualified_prefix(prefix),
        }
    }

    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// A read-only view of the same keys.
    pub fn view(&self) -> Subset<'_> {
        Subset {
            parent: &*self.parent,
            prefix: self.prefix.clone(),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.parent.get_string(&self.full_key(key))
    }

    pub fn get_vector(&self, key: &str) -> Vec<PropertyValue> {
        self.parent.get_vector(&self.full_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.parent.contains_key(&self.full_key(key))
    }

    pub fn add_property(&mut self, key: &str, value: impl Into<PropertyValue>) {
        let key = self.full_key(key);
        self.parent.add_property(key, value);
    }

    pub fn add_property_direct(&mut self, key: &str, value: impl Into<PropertyValue>) {
        let key = self.full_key(key);
        self.parent.add_property_direct(key, value);
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<PropertyValue>) {
        let key = self.full_key(key);
        self.parent.set_property(key, value);
    }

    pub fn clear_property(&mut self, key: &str) {
        let key = self.full_key(key);
        self.parent.clear_property(&key);
    }

    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let key = self.full_key(key);
        self.parent.remove(&key)
    }
}
