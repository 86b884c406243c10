//! Product domain models.
//!
//! `RemoteProduct` is what the on-premise product source hands back. The
//! three served shapes (`Product`, `MixinProduct`, `CustomProduct`) are
//! projections of it, two of which carry a field copied from a local book.

use serde::{Deserialize, Serialize};

/// A product as delivered by the remote (on-premise) source.
///
/// Built fresh for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProduct {
    pub id: i64,
    pub name: String,
    /// Bulk reads only select id and name, so this may be unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RemoteProduct {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Plain projection served as `Products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    pub fn from_remote(remote: &RemoteProduct) -> Self {
        Self {
            id: remote.id,
            name: remote.name.clone(),
            description: remote.description.clone(),
        }
    }
}

/// Projection served as `MixinProducts`: the remote fields plus the title of
/// the book sharing the product's id, exposed under the `hoge` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixinProduct {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoge: Option<String>,
}

impl MixinProduct {
    pub fn from_remote(remote: &RemoteProduct, title: Option<String>) -> Self {
        Self {
            id: remote.id,
            name: remote.name.clone(),
            description: remote.description.clone(),
            hoge: title,
        }
    }
}

/// Projection served as `CustomProducts`: id and name plus an optional book
/// title. An absent title means no book matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProduct {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CustomProduct {
    pub fn from_remote(remote: &RemoteProduct, title: Option<String>) -> Self {
        Self {
            id: remote.id,
            name: remote.name.clone(),
            title,
        }
    }
}
