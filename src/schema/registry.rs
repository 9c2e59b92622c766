// Schema registry for the Tellus data format
//
// A host-owned catalog mapping record-type names to shared schema
// instances. The registry is an explicit object with a controlled
// lifecycle, never process-wide state: independent configurations can
// coexist, which keeps record types testable in isolation. The record layer
// does not depend on the registry for correctness of load/build/validate.

use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::types::SchemaNode;

/// A registry of shared schema instances, keyed by record-type name.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<SchemaNode>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under `name`, returning the shared handle.
    /// Re-registering a name replaces the previous schema.
    pub fn register(&mut self, name: impl Into<String>, schema: SchemaNode) -> Arc<SchemaNode> {
        let schema = Arc::new(schema);
        self.schemas.insert(name.into(), schema.clone());
        schema
    }

    /// Gets the schema registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaNode>> {
        self.schemas.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Iterates over the registered record-type names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
