//! Read-only view of the card index and per-card descriptors.

pub(crate) mod document;

use alloc::{string::String, vec::Vec};

use log::{info, warn};

use crate::{
    error::{DocumentKind, LoadError, RangeError},
    filter,
    storage::{self, DocumentStore},
};

use document::{CardDocument, IndexDocument};

/// One card as listed in the index. Order in [`Catalog`] is the global index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CardRecord {
    pub id: String,
    pub folder: String,
    pub category: String,
    pub title: String,
    pub thumbnail: String,
}

impl CardRecord {
    pub fn new(id: &str, folder: &str, category: &str) -> Self {
        Self {
            id: String::from(id),
            folder: String::from(folder),
            category: String::from(category),
            title: String::new(),
            thumbnail: String::new(),
        }
    }

}

/// Category as declared in the index, before counting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
}

/// Category with its derived card count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CategoryRecord<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub count: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Catalog {
    cards: Vec<CardRecord>,
    categories: Vec<CategoryEntry>,
}

impl Catalog {
    /// Read and parse the index document.
    pub fn load<ST>(store: &mut ST) -> Result<Self, LoadError>
    where
        ST: DocumentStore,
    {
        let bytes = store.read(storage::INDEX_PATH).map_err(|err| {
            warn!("catalog: read {} failed: {:?}", storage::INDEX_PATH, err);
            LoadError::unreadable(DocumentKind::Index)
        })?;
        let catalog = Self::from_index_bytes(&bytes)?;
        info!(
            "catalog: loaded cards={} categories={} grid_pages={}",
            catalog.total(),
            catalog.categories.len(),
            filter::grid_page_count(&catalog.cards, None)
        );
        Ok(catalog)
    }

    pub fn from_index_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let doc: IndexDocument = serde_json::from_slice(bytes)
            .map_err(|err| LoadError::malformed(DocumentKind::Index, err))?;

        if doc.metadata.total_cards as usize != doc.cards.len() {
            warn!(
                "catalog: metadata.total_cards={} but {} cards listed; using card list",
                doc.metadata.total_cards,
                doc.cards.len()
            );
        }

        let mut cards = Vec::with_capacity(doc.cards.len());
        for entry in doc.cards {
            if entry.id.is_empty() || entry.folder.is_empty() {
                return Err(LoadError::invalid(
                    DocumentKind::Index,
                    "card id and folder must be non-empty",
                ));
            }
            cards.push(CardRecord {
                id: entry.id,
                folder: entry.folder,
                category: entry.category,
                title: entry.title,
                thumbnail: entry.thumbnail,
            });
        }

        let categories = doc
            .categories
            .into_iter()
            .map(|(id, category)| {
                let name = category.name.unwrap_or_else(|| id.clone());
                CategoryEntry { id, name }
            })
            .collect();

        Ok(Self { cards, categories })
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Result<&CardRecord, RangeError> {
        self.cards.get(index).ok_or(RangeError {
            index,
            total: self.cards.len(),
        })
    }

    /// Card at `index`, or the first card when `index` is out of range.
    pub fn card_or_first(&self, index: usize) -> Option<&CardRecord> {
        match self.card(index) {
            Ok(card) => Some(card),
            Err(err) => {
                warn!("catalog: {}; falling back to first card", err);
                self.cards.first()
            }
        }
    }

    /// Number of categories declared in the index.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }

    /// Declared categories in index order, with counts derived now.
    pub fn categories(&self) -> Vec<CategoryRecord<'_>> {
        self.categories
            .iter()
            .map(|category| CategoryRecord {
                id: category.id.as_str(),
                name: category.name.as_str(),
                count: filter::filtered_count(&self.cards, Some(category.id.as_str())),
            })
            .collect()
    }
}

/// Per-language images of a card.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LanguageFace {
    pub big_file: String,
    pub small_file: String,
}

/// Contents of a card's own descriptor, loaded when the card is shown.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CardDetail {
    pub title: String,
    pub main_image: String,
    faces: Vec<(String, LanguageFace)>,
}

impl CardDetail {
    pub fn load<ST>(store: &mut ST, card: &CardRecord) -> Result<Self, LoadError>
    where
        ST: DocumentStore,
    {
        let path = storage::card_path(&card.folder);
        let bytes = store.read(&path).map_err(|err| {
            warn!("catalog: read {} failed: {:?}", path, err);
            LoadError::unreadable(DocumentKind::Card)
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let doc: CardDocument = serde_json::from_slice(bytes)
            .map_err(|err| LoadError::malformed(DocumentKind::Card, err))?;
        let faces = doc
            .languages
            .into_iter()
            .map(|(key, face)| {
                (
                    key,
                    LanguageFace {
                        big_file: face.big_file,
                        small_file: face.small_file,
                    },
                )
            })
            .collect();

        Ok(Self {
            title: doc.title,
            main_image: doc.main_image,
            faces,
        })
    }

    pub fn face(&self, language: &str) -> Option<&LanguageFace> {
        self.faces
            .iter()
            .find(|(key, _)| key == language)
            .map(|(_, face)| face)
    }
}
