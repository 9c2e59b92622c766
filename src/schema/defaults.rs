// Default value synthesis for the Tellus schema system
//
// When a node carries CREATE_ON_MISSING and the field is absent, the
// verifier inserts the default produced here. Defaults are chosen so the
// repair is idempotent: a tree that was just backfilled verifies cleanly
// again without further insertion.

use bytes::Bytes;

use crate::schema::types::{SchemaNode, Shape};
use crate::tag::{Compound, List, Tag, TagKind};

/// Produces the zero/default tag for a schema node.
///
/// Scalars get their numeric zero or empty payload. A list node yields an
/// empty list of its element kind, except under a fixed-length constraint,
/// where it is filled to the declared length so the result still satisfies
/// the constraint. A compound node yields a compound holding defaults for
/// its own CREATE_ON_MISSING children, recursively.
pub fn default_for(node: &SchemaNode) -> Tag {
    match node.shape() {
        Shape::Scalar { kind } => default_for_kind(*kind),
        Shape::List { elem_kind, len } => {
            let mut list = List::new(*elem_kind);
            if let Some(len) = len {
                for _ in 0..*len {
                    // Elements of the right kind by construction; push
                    // cannot fail here.
                    let _ = list.push(default_for_kind(*elem_kind));
                }
            }
            Tag::List(list)
        }
        Shape::Compound { children } => {
            let mut compound = Compound::new();
            for child in children {
                if child.creates_on_missing() {
                    compound.put(child.name().to_string(), default_for(child));
                }
            }
            Tag::Compound(compound)
        }
    }
}

/// The zero/default tag for a bare kind, used for scalar positions and list
/// element fill. An empty list defaults to Byte elements; the element kind
/// of an empty list is unobservable until the first push.
pub fn default_for_kind(kind: TagKind) -> Tag {
    match kind {
        TagKind::Byte => Tag::Byte(0),
        TagKind::Short => Tag::Short(0),
        TagKind::Int => Tag::Int(0),
        TagKind::Long => Tag::Long(0),
        TagKind::Float => Tag::Float(0.0),
        TagKind::Double => Tag::Double(0.0),
        TagKind::ByteArray => Tag::ByteArray(Bytes::new()),
        TagKind::String => Tag::String(String::new()),
        TagKind::List => Tag::List(List::new(TagKind::Byte)),
        TagKind::Compound => Tag::Compound(Compound::new()),
    }
}
