//! Serialization of heat pump settings and status records into compact JSON.
//!
//! Records are first laid out as an ordered [`Tree`](tree::Tree) and the tree is then encoded
//! as text by a [`Serializer`](serializer::Serializer).

pub mod commands;
pub mod output;
pub mod record;
pub mod serializer;
pub mod tree;

pub use record::{Record, Settings, Status};
pub use serializer::{
    BuildTree, Config, DEFAULT_MAX_SIZE, Error, Serializer, serialize_settings, serialize_status,
};
pub use tree::{Scalar, Tree};
