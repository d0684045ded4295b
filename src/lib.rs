//! Persist an ordered sequence of values in a single file.
//!
//! A [`SequenceStore`] is bound to one path. [`SequenceStore::read`] loads the
//! whole sequence, [`SequenceStore::write`] replaces it, and
//! [`SequenceStore::append`] / [`SequenceStore::prepend`] compose the two.
//!
//! Invariant: only construction can fail. Missing, empty or corrupt files read
//! as an empty sequence, and failed writes report `false`.

pub mod codec;
pub mod config;

mod error;
mod paths;
mod store;
mod value;

pub use config::StoreOptions;
pub use error::{StoreError, StoreResult};
pub use store::SequenceStore;
pub use value::{Sequence, Value};
