// Internal shared infrastructure for the Tellus library.

pub mod error;

pub use self::error::{Error, Result};
