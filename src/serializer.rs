use tracing::trace;

use crate::record::{Record, Settings, Status};
use crate::tree::Tree;

/// The encoded text limit used unless configured otherwise.
pub const DEFAULT_MAX_SIZE: usize = 1024;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not encode the tree as JSON")]
    EncodeJson(#[source] serde_json::Error),
    #[error("encoded JSON is {len} bytes long, which exceeds the limit of {max_size} bytes")]
    TooLarge { len: usize, max_size: usize },
}

#[derive(clap::Parser, Clone, Debug)]
#[group(id = "serializer::Args")]
pub struct Args {
    /// The maximum length of the encoded JSON text, in bytes.
    ///
    /// Records that would encode to more than this are rejected.
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,
}

impl Args {
    pub fn to_serializer(&self) -> Serializer {
        Serializer::new(Config {
            max_size: self.max_size,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Records that can be laid out as a [`Tree`].
pub trait BuildTree {
    fn build_tree(&self) -> Tree;
}

impl BuildTree for Settings {
    fn build_tree(&self) -> Tree {
        let mut tree = Tree::new();
        tree.insert("power", self.power.as_str());
        tree.insert("mode", self.mode.as_str());
        tree.insert("temperature_c", self.temperature);
        tree.insert("fan", self.fan.as_str());
        tree.insert("vane", self.vane.as_str());
        tree.insert("wide_vane", self.wide_vane.as_str());
        tree
    }
}

impl BuildTree for Status {
    fn build_tree(&self) -> Tree {
        let mut tree = Tree::new();
        tree.insert("room_temperature_c", self.room_temperature);
        tree.insert("is_operating", self.operating);
        tree.insert("compressor_frequency", self.compressor_frequency);
        tree
    }
}

impl BuildTree for Record {
    fn build_tree(&self) -> Tree {
        match self {
            Record::Settings(settings) => settings.build_tree(),
            Record::Status(status) => status.build_tree(),
        }
    }
}

/// Encodes records and trees as compact JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct Serializer {
    config: Config,
}

impl Serializer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the contents of `text` with the JSON encoding of `tree`.
    ///
    /// Keys are written in insertion order without any whitespace. On error `text` is left
    /// empty.
    pub fn tree_to_text(&self, tree: &Tree, text: &mut String) -> Result<(), Error> {
        text.clear();
        let encoded = serde_json::to_string(tree).map_err(Error::EncodeJson)?;
        if encoded.len() > self.config.max_size {
            return Err(Error::TooLarge {
                len: encoded.len(),
                max_size: self.config.max_size,
            });
        }
        trace!(keys = tree.len(), bytes = encoded.len(), "encoded tree as JSON");
        *text = encoded;
        Ok(())
    }

    pub fn serialize<R: BuildTree + ?Sized>(
        &self,
        record: &R,
        text: &mut String,
    ) -> Result<(), Error> {
        let tree = record.build_tree();
        self.tree_to_text(&tree, text)
    }

    pub fn serialize_settings(&self, settings: &Settings, text: &mut String) -> Result<(), Error> {
        self.serialize(settings, text)
    }

    pub fn serialize_status(&self, status: &Status, text: &mut String) -> Result<(), Error> {
        self.serialize(status, text)
    }
}

/// Serialize `settings` into `text` with the default [`Config`].
pub fn serialize_settings(settings: &Settings, text: &mut String) -> Result<(), Error> {
    Serializer::default().serialize_settings(settings, text)
}

/// Serialize `status` into `text` with the default [`Config`].
pub fn serialize_status(status: &Status, text: &mut String) -> Result<(), Error> {
    Serializer::default().serialize_status(status, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            power: "ON".into(),
            mode: "HEAT".into(),
            temperature: 21.5,
            fan: "AUTO".into(),
            vane: "AUTO".into(),
            wide_vane: "CENTER".into(),
        }
    }

    #[test]
    fn settings_tree_layout() {
        let tree = settings().build_tree();
        assert_eq!(
            tree.keys().collect::<Vec<_>>(),
            ["power", "mode", "temperature_c", "fan", "vane", "wide_vane"]
        );
    }

    #[test]
    fn status_tree_layout() {
        let tree = Status::default().build_tree();
        assert_eq!(
            tree.keys().collect::<Vec<_>>(),
            ["room_temperature_c", "is_operating", "compressor_frequency"]
        );
    }

    #[test]
    fn record_dispatches_on_variant() {
        let status = Status {
            room_temperature: 19.0,
            operating: false,
            compressor_frequency: 0,
        };
        assert_eq!(Record::from(settings()).build_tree(), settings().build_tree());
        assert_eq!(Record::from(status).build_tree(), status.build_tree());
    }

    #[test]
    fn too_large_leaves_text_empty() {
        let serializer = Serializer::new(Config { max_size: 16 });
        let mut text = String::from("stale");
        let err = serializer.serialize_settings(&settings(), &mut text).unwrap_err();
        assert!(matches!(err, Error::TooLarge { max_size: 16, .. }));
        assert!(text.is_empty());
    }

    #[test]
    fn exact_limit_is_accepted() {
        let mut text = String::new();
        serialize_settings(&settings(), &mut text).unwrap();
        let serializer = Serializer::new(Config {
            max_size: text.len(),
        });
        let mut again = String::new();
        serializer.serialize_settings(&settings(), &mut again).unwrap();
        assert_eq!(text, again);
    }
}
