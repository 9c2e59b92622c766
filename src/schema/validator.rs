// Schema verifier for the Tellus data format
//
// Walks a tag tree against a schema tree and reports every violation found.
// Verification is read-mostly, with one documented side effect: a node
// flagged CREATE_ON_MISSING whose key is absent has a default-valued tag
// synthesized and inserted into the tree being verified. The repair is
// idempotent. Keys present in the tree but absent from the schema are never
// inspected; that tolerance is what lets unknown fields survive a
// read-modify-write cycle.

use std::fmt;

use crate::schema::defaults::default_for;
use crate::schema::types::{SchemaNode, Shape};
use crate::tag::{Tag, TagKind};

/// Configuration for schema verification.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Maximum nesting depth before the walk is cut off.
    pub max_nesting_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 32,
        }
    }
}

/// One conformance failure at one position of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Dotted path of the offending position, `[i]`-indexed for list
    /// elements; empty for the root.
    pub path: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// The tree handed to the verifier was not a compound.
    NotACompound { actual: TagKind },
    /// A required field is absent.
    MissingField,
    /// A field holds a different variant kind than expected.
    KindMismatch { expected: TagKind, actual: TagKind },
    /// A list holds elements of a different kind than expected.
    ElementKindMismatch { expected: TagKind, actual: TagKind },
    /// A list's length differs from the declared fixed length.
    LengthMismatch { expected: usize, actual: usize },
    /// The tree nests deeper than the configured limit.
    DepthExceeded { limit: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.path.is_empty() { "$root" } else { &self.path };
        match &self.kind {
            ViolationKind::NotACompound { actual } => {
                write!(f, "at '{}': expected a compound, got {}", at, actual)
            }
            ViolationKind::MissingField => {
                write!(f, "at '{}': required field is missing", at)
            }
            ViolationKind::KindMismatch { expected, actual } => {
                write!(f, "at '{}': expected {}, got {}", at, expected, actual)
            }
            ViolationKind::ElementKindMismatch { expected, actual } => {
                write!(
                    f,
                    "at '{}': expected {} elements, got {}",
                    at, expected, actual
                )
            }
            ViolationKind::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "at '{}': expected {} elements, got {}",
                    at, expected, actual
                )
            }
            ViolationKind::DepthExceeded { limit } => {
                write!(f, "at '{}': nesting deeper than {} levels", at, limit)
            }
        }
    }
}

/// The outcome of a verification walk. Converts to the boolean view via
/// [`ValidationReport::is_ok`]; renders every violation via `Display`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("no violations");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Schema verifier.
#[derive(Debug, Default)]
pub struct SchemaValidator {
    config: ValidatorConfig,
}

impl SchemaValidator {
    /// Creates a verifier with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a verifier with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Verifies `tree` against `schema`, collecting every violation.
    ///
    /// `tree` is mutable because absent CREATE_ON_MISSING fields are
    /// backfilled with their defaults during the walk.
    pub fn verify(&self, tree: &mut Tag, schema: &SchemaNode) -> ValidationReport {
        let mut violations = Vec::new();
        // The root position must be a compound regardless of schema shape.
        if tree.kind() != TagKind::Compound {
            violations.push(Violation {
                path: String::new(),
                kind: ViolationKind::NotACompound { actual: tree.kind() },
            });
            return ValidationReport { violations };
        }
        self.verify_node(tree, schema, "", 0, &mut violations);
        ValidationReport { violations }
    }

    fn verify_node(
        &self,
        tree: &mut Tag,
        node: &SchemaNode,
        path: &str,
        depth: usize,
        out: &mut Vec<Violation>,
    ) {
        if depth > self.config.max_nesting_depth {
            out.push(Violation {
                path: path.to_string(),
                kind: ViolationKind::DepthExceeded {
                    limit: self.config.max_nesting_depth,
                },
            });
            return;
        }

        match node.shape() {
            Shape::Scalar { kind } => {
                if tree.kind() != *kind {
                    out.push(Violation {
                        path: path.to_string(),
                        kind: ViolationKind::KindMismatch {
                            expected: *kind,
                            actual: tree.kind(),
                        },
                    });
                }
            }
            Shape::List { elem_kind, len } => {
                let list = match tree {
                    Tag::List(list) => list,
                    other => {
                        out.push(Violation {
                            path: path.to_string(),
                            kind: ViolationKind::KindMismatch {
                                expected: TagKind::List,
                                actual: other.kind(),
                            },
                        });
                        return;
                    }
                };
                if let Some(expected_len) = len {
                    if list.len() != *expected_len {
                        out.push(Violation {
                            path: path.to_string(),
                            kind: ViolationKind::LengthMismatch {
                                expected: *expected_len,
                                actual: list.len(),
                            },
                        });
                    }
                }
                // Lists are homogeneous by construction, so the container
                // kind speaks for every element. An empty list satisfies
                // any element expectation vacuously.
                if !list.is_empty() && list.elem_kind() != *elem_kind {
                    out.push(Violation {
                        path: format!("{}[0]", path),
                        kind: ViolationKind::ElementKindMismatch {
                            expected: *elem_kind,
                            actual: list.elem_kind(),
                        },
                    });
                }
            }
            Shape::Compound { children } => {
                let compound = match tree {
                    Tag::Compound(compound) => compound,
                    other => {
                        out.push(Violation {
                            path: path.to_string(),
                            kind: ViolationKind::KindMismatch {
                                expected: TagKind::Compound,
                                actual: other.kind(),
                            },
                        });
                        return;
                    }
                };
                for child in children {
                    let child_path = make_path(path, child.name());
                    if !compound.contains_key(child.name()) {
                        if child.creates_on_missing() {
                            // Backfill; the synthesized value is not
                            // re-walked (defaults already satisfy their own
                            // node).
                            compound.put(child.name().to_string(), default_for(child));
                        } else if child.is_required() {
                            out.push(Violation {
                                path: child_path,
                                kind: ViolationKind::MissingField,
                            });
                        }
                        continue;
                    }
                    if let Some(value) = compound.get_mut(child.name()) {
                        self.verify_node(value, child, &child_path, depth + 1, out);
                    }
                }
                // Keys in the compound that no child describes are left
                // uninspected on purpose.
            }
        }
    }
}

/// Verifies `tree` against `schema` with the default configuration,
/// reporting only whether the tree conforms. The backfill side effect
/// applies exactly as in [`SchemaValidator::verify`].
pub fn verify(tree: &mut Tag, schema: &SchemaNode) -> bool {
    SchemaValidator::new().verify(tree, schema).is_ok()
}

fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::SchemaFlags;
    use crate::tag::{Compound, List};

    fn item_schema() -> SchemaNode {
        SchemaNode::root(vec![
            SchemaNode::scalar("type", TagKind::Byte),
            SchemaNode::scalar("id", TagKind::Short),
            SchemaNode::scalar("Count", TagKind::Byte),
            SchemaNode::scalar("Damage", TagKind::Short)
                .with_flags(SchemaFlags::CREATE_ON_MISSING),
        ])
        .unwrap()
    }

    fn item_tree() -> Tag {
        let mut c = Compound::new();
        c.put("type", Tag::Byte(1));
        c.put("id", Tag::Short(5));
        c.put("Count", Tag::Byte(3));
        Tag::Compound(c)
    }

    #[test]
    fn test_conforming_tree_passes() {
        let mut tree = item_tree();
        let report = SchemaValidator::new().verify(&mut tree, &item_schema());
        assert!(report.is_ok(), "unexpected violations: {}", report);
    }

    #[test]
    fn test_backfill_inserts_default() {
        let mut tree = item_tree();
        assert!(verify(&mut tree, &item_schema()));

        // Damage was absent; verification synthesized its zero default.
        let damage = tree.as_compound().unwrap().get("Damage").unwrap();
        assert_eq!(damage, &Tag::Short(0));
    }

    #[test]
    fn test_backfill_is_idempotent() {
        let mut tree = item_tree();
        assert!(verify(&mut tree, &item_schema()));
        let after_first = tree.clone();
        assert!(verify(&mut tree, &item_schema()));
        assert_eq!(tree, after_first);
    }

    #[test]
    fn test_missing_required_field_fails() {
        let mut c = Compound::new();
        c.put("type", Tag::Byte(1));
        c.put("Count", Tag::Byte(3));
        let mut tree = Tag::Compound(c);

        let report = SchemaValidator::new().verify(&mut tree, &item_schema());
        assert_eq!(
            report.violations(),
            &[Violation {
                path: "id".to_string(),
                kind: ViolationKind::MissingField,
            }]
        );
    }

    #[test]
    fn test_wrong_kind_fails_exactly_by_width() {
        let mut c = Compound::new();
        c.put("type", Tag::Byte(1));
        c.put("id", Tag::Byte(5)); // Byte never satisfies Short
        c.put("Count", Tag::Byte(3));
        let mut tree = Tag::Compound(c);

        let report = SchemaValidator::new().verify(&mut tree, &item_schema());
        assert_eq!(
            report.violations(),
            &[Violation {
                path: "id".to_string(),
                kind: ViolationKind::KindMismatch {
                    expected: TagKind::Short,
                    actual: TagKind::Byte,
                },
            }]
        );
    }

    #[test]
    fn test_report_collects_multiple_violations() {
        let mut tree = Tag::Compound(Compound::new());
        let report = SchemaValidator::new().verify(&mut tree, &item_schema());
        // type, id, Count all missing; Damage is backfilled instead.
        assert_eq!(report.violations().len(), 3);
        assert!(tree.as_compound().unwrap().contains_key("Damage"));
    }

    #[test]
    fn test_non_compound_root_fails() {
        let mut tree = Tag::Int(7);
        let report = SchemaValidator::new().verify(&mut tree, &item_schema());
        assert_eq!(
            report.violations(),
            &[Violation {
                path: String::new(),
                kind: ViolationKind::NotACompound {
                    actual: TagKind::Int,
                },
            }]
        );
    }

    #[test]
    fn test_unknown_keys_are_never_inspected() {
        let mut tree = item_tree();
        // An extra key of an arbitrary kind passes untouched.
        tree.as_compound_mut()
            .unwrap()
            .put("Foo", Tag::Int(42));
        assert!(verify(&mut tree, &item_schema()));
        assert_eq!(
            tree.as_compound().unwrap().get("Foo").unwrap(),
            &Tag::Int(42)
        );
    }

    #[test]
    fn test_empty_compound_schema_accepts_any_compound() {
        let schema = SchemaNode::root(vec![]).unwrap();
        let mut tree = item_tree();
        assert!(verify(&mut tree, &schema));
    }

    #[test]
    fn test_fixed_length_list() {
        let schema = SchemaNode::root(vec![SchemaNode::fixed_list(
            "Pos",
            TagKind::Double,
            3,
        )])
        .unwrap();

        let mut c = Compound::new();
        c.put(
            "Pos",
            Tag::List(
                List::from_vec(TagKind::Double, vec![Tag::Double(0.5), Tag::Double(64.0)])
                    .unwrap(),
            ),
        );
        let mut tree = Tag::Compound(c);

        let report = SchemaValidator::new().verify(&mut tree, &schema);
        assert_eq!(
            report.violations(),
            &[Violation {
                path: "Pos".to_string(),
                kind: ViolationKind::LengthMismatch {
                    expected: 3,
                    actual: 2,
                },
            }]
        );
    }

    #[test]
    fn test_list_element_kind_mismatch() {
        let schema =
            SchemaNode::root(vec![SchemaNode::list("Motion", TagKind::Double)]).unwrap();

        let mut c = Compound::new();
        c.put(
            "Motion",
            Tag::List(List::from_vec(TagKind::Float, vec![Tag::Float(0.1)]).unwrap()),
        );
        let mut tree = Tag::Compound(c);

        let report = SchemaValidator::new().verify(&mut tree, &schema);
        assert_eq!(
            report.violations(),
            &[Violation {
                path: "Motion[0]".to_string(),
                kind: ViolationKind::ElementKindMismatch {
                    expected: TagKind::Double,
                    actual: TagKind::Float,
                },
            }]
        );
    }

    #[test]
    fn test_nested_compound_paths() {
        let schema = SchemaNode::root(vec![SchemaNode::compound(
            "tag",
            vec![SchemaNode::scalar("RepairCost", TagKind::Int)],
        )
        .unwrap()])
        .unwrap();

        let mut inner = Compound::new();
        inner.put("RepairCost", Tag::Short(1)); // wrong width
        let mut c = Compound::new();
        c.put("tag", Tag::Compound(inner));
        let mut tree = Tag::Compound(c);

        let report = SchemaValidator::new().verify(&mut tree, &schema);
        assert_eq!(report.violations()[0].path, "tag.RepairCost");
    }

    #[test]
    fn test_depth_limit_cuts_off_walk() {
        // Schema nesting one compound under another, validated with a
        // depth limit of 1, flags the inner position.
        let schema = SchemaNode::root(vec![SchemaNode::compound(
            "a",
            vec![SchemaNode::compound("b", vec![]).unwrap()],
        )
        .unwrap()])
        .unwrap();

        let mut b = Compound::new();
        b.put("b", Tag::Compound(Compound::new()));
        let mut a = Compound::new();
        a.put("a", Tag::Compound(b));
        let mut tree = Tag::Compound(a);

        let validator = SchemaValidator::with_config(ValidatorConfig {
            max_nesting_depth: 1,
        });
        let report = validator.verify(&mut tree, &schema);
        assert!(matches!(
            report.violations()[0].kind,
            ViolationKind::DepthExceeded { limit: 1 }
        ));
    }
}
