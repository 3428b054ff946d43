//! Serde shapes of the on-card JSON documents.
//!
//! These are transient parse artifacts; everything past the loaders works on
//! the typed records in the parent module.

use alloc::{string::String, vec::Vec};

use foldhash::fast::FixedState;
use indexmap::IndexMap;
use serde::Deserialize;

/// JSON object that keeps its keys in document order.
///
/// Category listing order and enabled-language order both come from object
/// key order, and rewrites of the config must not reorder anything.
pub(crate) type OrderedMap<V> = IndexMap<String, V, FixedState>;

#[derive(Debug, Deserialize)]
pub(crate) struct IndexDocument {
    pub(crate) metadata: IndexMetadata,
    #[serde(default)]
    pub(crate) categories: OrderedMap<CategoryDocument>,
    pub(crate) cards: Vec<CardEntryDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndexMetadata {
    pub(crate) total_cards: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryDocument {
    #[serde(default)]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardEntryDocument {
    pub(crate) id: String,
    pub(crate) folder: String,
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) thumbnail: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CardDocument {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) main_image: String,
    #[serde(default)]
    pub(crate) languages: OrderedMap<FaceDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FaceDocument {
    #[serde(default)]
    pub(crate) big_file: String,
    #[serde(default)]
    pub(crate) small_file: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfigDocument {
    pub(crate) languages: LanguagesDocument,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguagesDocument {
    pub(crate) default: String,
    pub(crate) supported: OrderedMap<LanguageDocument>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageDocument {
    pub(crate) enabled: bool,
    #[serde(default)]
    pub(crate) english_name: Option<String>,
}
