// Schema module for the Tellus data format
//
// This module provides the declarative shape language a record type uses to
// describe the tag tree it expects, and the verifier that checks a tree
// against it. It includes:
//
// 1. Schema node tree (scalar, list, compound) with per-node option flags
// 2. Default value synthesis for nodes marked create-on-missing
// 3. The schema verifier with violation reporting and default backfill
// 4. A host-owned registry for sharing schema instances across record types

// Re-export public types and functions
pub use self::defaults::default_for;
pub use self::registry::SchemaRegistry;
pub use self::types::{SchemaFlags, SchemaNode, Shape};
pub use self::validator::{
    verify, SchemaValidator, ValidationReport, ValidatorConfig, Violation, ViolationKind,
};

// Sub-modules
pub mod types;
pub mod defaults;
pub mod validator;
pub mod registry;
