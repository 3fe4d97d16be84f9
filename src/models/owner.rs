use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an `OwnerConfig` of the same trip.
///
/// `shared` is reserved: it is the bucket split evenly between every real
/// owner and it can never be removed from a trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub const SHARED: &'static str = "shared";

    pub fn shared() -> Self {
        Self(Self::SHARED.to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_shared(&self) -> bool {
        self.0 == Self::SHARED
    }

    /// Referential check against an owner list.
    pub fn is_known(&self, owners: &[OwnerConfig]) -> bool {
        owners.iter().any(|o| &o.id == self)
    }

    /// Resolve user input (owner id, id prefix or display name) to an id
    /// present in `owners`.
    pub fn resolve(owners: &[OwnerConfig], input: &str) -> Option<OwnerId> {
        let needle = input.trim();
        if needle.is_empty() {
            return None;
        }
        if let Some(o) = owners.iter().find(|o| o.id.as_str() == needle) {
            return Some(o.id.clone());
        }
        if let Some(o) = owners
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(needle))
        {
            return Some(o.id.clone());
        }
        let mut prefixed = owners.iter().filter(|o| o.id.as_str().starts_with(needle));
        match (prefixed.next(), prefixed.next()) {
            (Some(o), None) => Some(o.id.clone()),
            _ => None,
        }
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::shared()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A party expenses can be billed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerConfig {
    pub id: OwnerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl OwnerConfig {
    pub fn shared() -> Self {
        Self {
            id: OwnerId::shared(),
            name: "Shared".to_string(),
            color: "#9e9e9e".to_string(),
        }
    }

    /// Display name, falling back to the id.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Make sure exactly one `shared` owner exists, placed first.
pub(crate) fn normalize_owners(owners: &mut Vec<OwnerConfig>) {
    let mut seen_shared = false;
    owners.retain(|o| {
        if o.id.is_shared() {
            if seen_shared {
                return false;
            }
            seen_shared = true;
        }
        true
    });
    if !seen_shared {
        owners.insert(0, OwnerConfig::shared());
    }
}
