//! The per-protocol type-key to method table.

use std::collections::HashMap;

use super::implementation::Implementation;
use crate::type_key::{BuiltinType, TypeKey};
use crate::types::Identity;

/// Method name to implementation for one bucket.
pub(crate) type MethodTable = HashMap<String, Implementation>;

/// Built-in buckets plus the `Other` bucket subdivided by identity.
#[derive(Debug)]
pub(crate) struct DispatchTable {
    builtin: HashMap<BuiltinType, MethodTable>,
    other: HashMap<Identity, MethodTable>,
}

impl DispatchTable {
    /// Creates a table with one empty method table per built-in bucket and
    /// an empty `Other` bucket.
    pub(crate) fn seeded() -> Self {
        let builtin = BuiltinType::ALL
            .into_iter()
            .filter(|bucket| *bucket != BuiltinType::Other)
            .map(|bucket| (bucket, MethodTable::new()))
            .collect();
        Self {
            builtin,
            other: HashMap::new(),
        }
    }

    /// Returns the method table for `key`, if one exists yet.
    pub(crate) fn bucket(&self, key: &TypeKey) -> Option<&MethodTable> {
        match key {
            TypeKey::Builtin(bucket) => self.builtin.get(bucket),
            TypeKey::Other(Some(identity)) => self.other.get(identity),
            TypeKey::Other(None) => None,
        }
    }

    /// Returns the method table for `key`, creating identity tables on first
    /// use. Keys without an identity have no table.
    pub(crate) fn bucket_mut(&mut self, key: &TypeKey) -> Option<&mut MethodTable> {
        match key {
            TypeKey::Builtin(bucket) => Some(self.builtin.entry(*bucket).or_default()),
            TypeKey::Other(Some(identity)) => Some(self.other.entry(identity.clone()).or_default()),
            TypeKey::Other(None) => None,
        }
    }

    /// Looks up `method` in a built-in bucket. Never falls back.
    pub(crate) fn builtin_method(&self, bucket: BuiltinType, method: &str) -> Option<&Implementation> {
        self.builtin.get(&bucket)?.get(method)
    }

    /// Looks up `method` for the first identity in `chain` that has it.
    pub(crate) fn identity_method<'a>(
        &self,
        chain: impl IntoIterator<Item = &'a Identity>,
        method: &str,
    ) -> Option<(&Identity, &Implementation)> {
        chain.into_iter().find_map(|identity| {
            self.other
                .get_key_value(identity)
                .and_then(|(key, table)| table.get(method).map(|found| (key, found)))
        })
    }

    /// Returns `true` when `key`'s own table holds `method`.
    pub(crate) fn contains(&self, key: &TypeKey, method: &str) -> bool {
        self.bucket(key).is_some_and(|table| table.contains_key(method))
    }

    /// Returns the identities that have a table, sorted.
    pub(crate) fn identities(&self) -> Vec<Identity> {
        let mut identities: Vec<Identity> = self.other.keys().cloned().collect();
        identities.sort();
        identities
    }
}
