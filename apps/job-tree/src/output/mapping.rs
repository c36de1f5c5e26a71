#![allow(dead_code)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Job role → raw classification URI, kept in the order roles were processed.
///
/// Serialized as a JSON object whose keys appear in that same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleUriMapping(IndexMap<String, String>);

impl RoleUriMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `uri` for `role`. A role seen again keeps its position and
    /// takes the newer URI.
    pub fn insert(&mut self, role: String, uri: String) {
        self.0.insert(role, uri);
    }

    pub fn get(&self, role: &str) -> Option<&str> {
        self.0.get(role).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(r, u)| (r.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for RoleUriMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        RoleUriMapping(iter.into_iter().collect())
    }
}
