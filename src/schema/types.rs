// Schema description model for the Tellus data format
//
// A schema is a tree of expectation nodes describing the shape a tag tree
// must have. Each record type builds its schema once as a construction-time
// literal, wraps it in an `Arc`, and shares that one instance across every
// record of the type. There is no runtime mutation API beyond construction.

use bitflags::bitflags;

use crate::internal::error::{Error, Result};
use crate::tag::TagKind;

bitflags! {
    /// Option flags recognized on any schema node.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SchemaFlags: u8 {
        /// Absence of the field is not a validation failure.
        const OPTIONAL = 0b0000_0001;
        /// If the field is absent, the verifier synthesizes a default-valued
        /// tag of the expected kind and inserts it before proceeding.
        /// Implies `OPTIONAL`; the bit is folded in.
        const CREATE_ON_MISSING = 0b0000_0010 | Self::OPTIONAL.bits();
    }
}

impl Default for SchemaFlags {
    fn default() -> Self {
        SchemaFlags::empty()
    }
}

/// The expected shape at one position of a tag tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A single tag of exactly `kind`.
    Scalar { kind: TagKind },
    /// A homogeneous list of `elem_kind` elements, optionally constrained
    /// to a fixed length.
    List {
        elem_kind: TagKind,
        len: Option<usize>,
    },
    /// A compound with the given child expectations, keys unique. Children
    /// are evaluated in declaration order; lookup is by key, so validation
    /// itself is order-independent.
    Compound { children: Vec<SchemaNode> },
}

/// Describes the expected shape of one position in a tag tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    name: String,
    flags: SchemaFlags,
    shape: Shape,
}

impl SchemaNode {
    /// A required scalar expectation.
    pub fn scalar(name: impl Into<String>, kind: TagKind) -> Self {
        Self {
            name: name.into(),
            flags: SchemaFlags::empty(),
            shape: Shape::Scalar { kind },
        }
    }

    /// A required list expectation with no length constraint.
    pub fn list(name: impl Into<String>, elem_kind: TagKind) -> Self {
        Self {
            name: name.into(),
            flags: SchemaFlags::empty(),
            shape: Shape::List {
                elem_kind,
                len: None,
            },
        }
    }

    /// A required list expectation constrained to exactly `len` elements.
    pub fn fixed_list(name: impl Into<String>, elem_kind: TagKind, len: usize) -> Self {
        Self {
            name: name.into(),
            flags: SchemaFlags::empty(),
            shape: Shape::List {
                elem_kind,
                len: Some(len),
            },
        }
    }

    /// A required compound expectation. Fails if two children share a key.
    pub fn compound(name: impl Into<String>, children: Vec<SchemaNode>) -> Result<Self> {
        check_unique_keys(&children)?;
        Ok(Self {
            name: name.into(),
            flags: SchemaFlags::empty(),
            shape: Shape::Compound { children },
        })
    }

    /// A root compound expectation (empty name).
    pub fn root(children: Vec<SchemaNode>) -> Result<Self> {
        Self::compound("", children)
    }

    /// Returns the node with the given option flags set.
    pub fn with_flags(mut self, flags: SchemaFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Concatenates a base compound schema with derived-only children,
    /// producing the composed schema of a record subtype. Key uniqueness is
    /// re-checked across the combined set.
    pub fn compose(base: &SchemaNode, extra: Vec<SchemaNode>) -> Result<SchemaNode> {
        let base_children = match &base.shape {
            Shape::Compound { children } => children,
            _ => {
                return Err(Error::StructuralMismatch(
                    "schema composition requires a compound base".to_string(),
                ))
            }
        };
        let mut children = base_children.clone();
        children.extend(extra);
        check_unique_keys(&children)?;
        Ok(SchemaNode {
            name: base.name.clone(),
            flags: base.flags,
            shape: Shape::Compound { children },
        })
    }

    /// The key this node is looked up under (empty for a root).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> SchemaFlags {
        self.flags
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// A node without `OPTIONAL` is required: its absence is a validation
    /// failure.
    pub fn is_required(&self) -> bool {
        !self.flags.contains(SchemaFlags::OPTIONAL)
    }

    pub fn creates_on_missing(&self) -> bool {
        self.flags.contains(SchemaFlags::CREATE_ON_MISSING)
    }

    /// The tag kind a value at this position must have.
    pub fn expected_kind(&self) -> TagKind {
        match &self.shape {
            Shape::Scalar { kind } => *kind,
            Shape::List { .. } => TagKind::List,
            Shape::Compound { .. } => TagKind::Compound,
        }
    }

    /// The child expectations of a compound node, empty for other shapes.
    pub fn children(&self) -> &[SchemaNode] {
        match &self.shape {
            Shape::Compound { children } => children,
            _ => &[],
        }
    }
}

fn check_unique_keys(children: &[SchemaNode]) -> Result<()> {
    for (i, child) in children.iter().enumerate() {
        if children[..i].iter().any(|c| c.name == child.name) {
            return Err(Error::DuplicateKey(child.name.clone()));
        }
    }
    Ok(())
}
