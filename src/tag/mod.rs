// Tag value model for the Tellus tag tree format.
//
// This module defines the recursive value model every structured world
// record is persisted through:
//
// 1. `Tag` — the tagged union over the closed variant set
// 2. `TagKind` — the byte-stable variant vocabulary shared with codecs
// 3. `List` — a homogeneous ordered sequence of tags
// 4. `Compound` — an ordered string-keyed mapping of tags

// Re-export public types
pub use self::compound::Compound;
pub use self::list::List;
pub use self::types::{Tag, TagKind};

// Sub-modules
pub mod types;
pub mod list;
pub mod compound;
