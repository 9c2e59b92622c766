// Round-trip record protocol for the Tellus data format
//
// A record is a typed domain object backed by a tag tree. Besides its typed
// fields it owns an opaque `source` compound: the raw tree from its last
// successful load, kept solely to resurrect fields the typed view does not
// model. Load replaces `source` wholesale; build writes the modeled fields
// fresh and then merges `source` back in, so unknown fields written by a
// newer or older producer survive a read-modify-write cycle untouched.

use std::sync::Arc;

use crate::internal::error::{Error, Result};
use crate::schema::{SchemaNode, SchemaValidator, ValidationReport};
use crate::tag::{Compound, Tag};

/// The load/validate/build contract of a concrete record type.
///
/// Implementors provide [`schema`](TreeRecord::schema),
/// [`load_tree`](TreeRecord::load_tree) and
/// [`build_tree`](TreeRecord::build_tree); the safe-load and validation
/// entry points are derived from those. Records deep-copy through `Clone`:
/// typed fields and the `source` compound are owned exclusively, never
/// shared between instances.
///
/// A subtype embeds its base record as a field, composes its schema with
/// [`SchemaNode::compose`], and delegates: `load_tree` decodes the
/// subtype's own fields into temporaries, calls the base `load_tree`, then
/// commits; `build_tree` calls the base `build_tree` and `put`s its own
/// fields over the result. Base fields are never re-decoded or re-encoded
/// by the subtype, and `put`'s in-place replacement overwrites any stale
/// values the base merge resurrected from `source`.
pub trait TreeRecord: Clone {
    /// The shared schema instance for this record type. Built once as a
    /// construction-time literal; every record of the type holds the same
    /// `Arc`.
    fn schema() -> Arc<SchemaNode>;

    /// Decodes every modeled field from `tree` and replaces `source` with a
    /// deep copy of it.
    ///
    /// Fails with [`Error::StructuralMismatch`] if `tree` is not a
    /// compound, [`Error::MissingField`] if a required modeled field is
    /// absent, and [`Error::TypeMismatch`] if one holds the wrong variant —
    /// a mis-typed required field is never replaced by a garbage value. On
    /// any failure the record keeps its previous state: implementations
    /// decode into temporaries and commit last.
    ///
    /// This is the unsafe path: it does not verify `tree` against the
    /// schema first, so a field the schema marks create-on-missing is
    /// simply absent here unless the caller verified beforehand. Use
    /// [`load_tree_safe`](TreeRecord::load_tree_safe) for untrusted input.
    fn load_tree(&mut self, tree: &Tag) -> Result<()>;

    /// Builds a fresh compound holding every modeled field under its
    /// canonical key, then merges `source` so unmodeled fields survive.
    /// Building twice without intervening mutation yields structurally
    /// equal trees.
    fn build_tree(&self) -> Tag;

    /// Verifies `tree` against this record type's schema without touching
    /// any record. Absent create-on-missing fields are backfilled into
    /// `tree` as part of verification.
    fn validate_tree(tree: &mut Tag) -> ValidationReport {
        SchemaValidator::new().verify(tree, &Self::schema())
    }

    /// Verifies `tree` first and only then decodes. On violations the
    /// record is left untouched and no decode is attempted.
    fn load_tree_safe(&mut self, tree: &mut Tag) -> Result<()> {
        let report = Self::validate_tree(tree);
        if !report.is_ok() {
            return Err(Error::SchemaViolation(report.to_string()));
        }
        self.load_tree(tree)
    }
}

/// Borrows a record tree as a compound, reporting anything else as a
/// structural mismatch (the expected failure mode for untrusted persisted
/// data).
pub fn expect_compound(tree: &Tag) -> Result<&Compound> {
    tree.as_compound().map_err(|_| {
        Error::StructuralMismatch(format!(
            "record tree must be a compound, got {}",
            tree.kind()
        ))
    })
}

/// Looks up a required field, reporting absence as [`Error::MissingField`].
pub fn require<'a>(tree: &'a Compound, key: &str) -> Result<&'a Tag> {
    tree.get(key)
        .ok_or_else(|| Error::MissingField(key.to_string()))
}

/// Completes a build: merges the record's `source` into the freshly written
/// fields and wraps the result. Every key present in `source` but not among
/// the fields survives from the last successful load.
pub fn finish_build(mut fields: Compound, source: &Compound) -> Tag {
    fields.merge_missing_from(source);
    Tag::Compound(fields)
}
