// Tellus library entry point
//
// Tellus is a self-describing, dynamically-typed tag tree format for
// persisting structured game-world state (entities, items, blocks, world
// metadata). The crate provides the tag value model, the declarative schema
// description language, the schema verifier, and the round-trip
// load/build/merge protocol that concrete record types implement on top of
// it. Byte-level framing and compression belong to a collaborator that turns
// bytes into a root tag and back.

pub mod tag;
pub mod schema;
pub mod record;
pub mod internal;
