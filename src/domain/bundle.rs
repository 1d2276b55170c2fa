//! Transaction bundle
//!
//! A bundle is built once and never mutated; its entries are only reachable
//! through read-only accessors.

use super::resource::{Resource, ResourceType};
use serde::Serialize;

/// Bundle type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Transaction,
}

/// HTTP verb of a bundle entry request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Post,
}

/// Request metadata of a bundle entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleRequest {
    pub method: HttpVerb,
    pub url: String,
}

/// One resource with its request metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleEntry {
    pub resource: Resource,
    pub request: BundleRequest,
}

impl BundleEntry {
    /// Entry creating `resource` in the collection named after its type
    pub fn create(resource: Resource) -> Self {
        let url = resource.resource_type().as_str().to_string();
        Self {
            resource,
            request: BundleRequest {
                method: HttpVerb::Post,
                url,
            },
        }
    }
}

/// Ordered transaction bundle
///
/// Serializes as `{"resourceType": "Bundle", "type": "transaction", "entry": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,

    #[serde(rename = "type")]
    bundle_type: BundleType,

    entry: Vec<BundleEntry>,
}

impl Bundle {
    pub(crate) fn new(bundle_type: BundleType, entry: Vec<BundleEntry>) -> Self {
        Self {
            resource_type: "Bundle",
            bundle_type,
            entry,
        }
    }

    /// Bundle type tag
    pub fn bundle_type(&self) -> BundleType {
        self.bundle_type
    }

    /// Entries in creation order
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entry
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    /// Whether the bundle has no entries
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Entries whose resource has the given type
    pub fn entries_of(&self, resource_type: ResourceType) -> impl Iterator<Item = &BundleEntry> {
        self.entry
            .iter()
            .filter(move |e| e.resource.resource_type() == resource_type)
    }
}
