//! Language configuration: the enabled set, the default, and persisting a
//! new default back into the config document.

use alloc::{boxed::Box, string::String, vec::Vec};

use log::{info, warn};
use serde::de::IgnoredAny;
use serde_json::value::RawValue;

use crate::{
    catalog::document::{ConfigDocument, OrderedMap},
    error::{DocumentKind, LoadError, PersistError},
    storage::{self, DocumentStore},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LanguageInfo {
    pub key: String,
    pub name: String,
}

/// Enabled languages in config order plus the configured default.
///
/// The default key may name a disabled or unknown language; lookups then
/// fall back to the first enabled entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LanguageSet {
    enabled: Vec<LanguageInfo>,
    default_key: String,
}

impl LanguageSet {
    pub fn new(enabled: Vec<LanguageInfo>, default_key: &str) -> Self {
        Self {
            enabled,
            default_key: String::from(default_key),
        }
    }

    pub fn load<ST>(store: &mut ST) -> Result<Self, LoadError>
    where
        ST: DocumentStore,
    {
        let bytes = store.read(storage::CONFIG_PATH).map_err(|err| {
            warn!("config: read {} failed: {:?}", storage::CONFIG_PATH, err);
            LoadError::unreadable(DocumentKind::Config)
        })?;
        let set = Self::from_config_bytes(&bytes)?;
        info!(
            "config: languages enabled={} default={}",
            set.len(),
            set.default_key
        );
        Ok(set)
    }

    pub fn from_config_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let doc: ConfigDocument = serde_json::from_slice(bytes)
            .map_err(|err| LoadError::malformed(DocumentKind::Config, err))?;

        let enabled = doc
            .languages
            .supported
            .into_iter()
            .filter(|(_, language)| language.enabled)
            .map(|(key, language)| {
                let name = language.english_name.unwrap_or_else(|| key.clone());
                LanguageInfo { key, name }
            })
            .collect::<Vec<_>>();

        if enabled.is_empty() {
            warn!("config: no enabled languages");
        }

        Ok(Self::new(enabled, &doc.languages.default))
    }

    pub fn enabled(&self) -> &[LanguageInfo] {
        &self.enabled
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    /// Position of the default among enabled languages, or 0.
    pub fn default_index(&self) -> usize {
        self.enabled
            .iter()
            .position(|language| language.key == self.default_key)
            .unwrap_or(0)
    }

    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.enabled.get(index).map(|language| language.key.as_str())
    }

    pub fn info_at(&self, index: usize) -> Option<&LanguageInfo> {
        self.enabled.get(index)
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.enabled.iter().any(|language| language.key == key)
    }

    /// Next enabled language after `current`, wrapping. Unchanged with fewer
    /// than two languages.
    pub fn next_index(&self, current: usize) -> usize {
        if self.enabled.len() < 2 {
            return current;
        }
        (current + 1) % self.enabled.len()
    }

    pub fn set_default_key(&mut self, key: &str) {
        self.default_key = String::from(key);
    }
}

/// Rewrite `languages.default` in a config document.
///
/// Every other value is carried over as its raw source text and objects keep
/// their key order, so only whitespace between tokens may change.
pub fn rewrite_default_language(bytes: &[u8], key: &str) -> Result<Vec<u8>, PersistError> {
    let mut root: OrderedMap<Box<RawValue>> =
        serde_json::from_slice(bytes).map_err(|_| PersistError::Malformed)?;

    let languages_raw = root.get("languages").ok_or(PersistError::Malformed)?;
    let mut languages: OrderedMap<Box<RawValue>> =
        serde_json::from_str(languages_raw.get()).map_err(|_| PersistError::Malformed)?;

    let supported_raw = languages.get("supported").ok_or(PersistError::Malformed)?;
    let supported: OrderedMap<IgnoredAny> =
        serde_json::from_str(supported_raw.get()).map_err(|_| PersistError::Malformed)?;
    if !supported.contains_key(key) {
        return Err(PersistError::UnknownLanguage);
    }

    let default = serde_json::value::to_raw_value(key).map_err(PersistError::Encode)?;
    languages.insert(String::from("default"), default);

    let languages = serde_json::value::to_raw_value(&languages).map_err(PersistError::Encode)?;
    root.insert(String::from("languages"), languages);

    serde_json::to_vec(&root).map_err(PersistError::Encode)
}

/// Read the config, set its default language to `key`, and write it back.
pub fn persist_default_language<ST>(store: &mut ST, key: &str) -> Result<(), PersistError>
where
    ST: DocumentStore,
{
    let current = store.read(storage::CONFIG_PATH).map_err(|err| {
        warn!("config: read for rewrite failed: {:?}", err);
        PersistError::Read
    })?;
    let updated = rewrite_default_language(&current, key)?;
    store.write(storage::CONFIG_PATH, &updated).map_err(|err| {
        warn!("config: write failed: {:?}", err);
        PersistError::Write
    })?;
    info!("config: default language saved key={}", key);
    Ok(())
}
