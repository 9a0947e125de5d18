use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Teradata type keywords and their Talend type tags.
const TERADATA_TO_TALEND: &[(&str, &str)] = &[
    ("CHAR", "id_String"),
    ("VARCHAR", "id_String"),
    ("CLOB", "id_String"),
    ("JSON", "id_String"),
    ("BYTEINT", "id_Byte"),
    ("SMALLINT", "id_Integer"),
    ("INTEGER", "id_Integer"),
    ("BIGINT", "id_Integer"),
    ("DECIMAL", "id_Float"),
    ("NUMERIC", "id_Float"),
    ("FLOAT", "id_Double"),
    ("DATE", "id_Date"),
    ("TIME", "id_String"),
    ("TIMESTAMP", "id_String"),
];

/// A type keyword with no entry in the [`TypeMap`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Data type '{type_name}' is not a valid data type")]
pub struct UnknownType {
    /// The keyword as it was looked up.
    pub type_name: String,
}

/// Source type keyword → target type tag lookup table.
///
/// Keys are stored uppercase and lookups are case-insensitive on the keyword.
/// Serializes as a plain JSON object, the same shape [`TypeMap::load_from_json`] reads.
///
/// The `Default` map is empty; see [`TypeMap::teradata`] for the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap {
    /// Uppercase keyword → target tag.
    pub types: HashMap<String, String>,
}

impl TypeMap {
    /// The built-in Teradata → Talend mapping.
    pub fn teradata() -> Self {
        let mut map = Self::default();
        for (keyword, tag) in TERADATA_TO_TALEND {
            map.insert(keyword, tag);
        }
        map
    }

    /// Load entries from a JSON object such as `{"BLOB": "id_byte[]"}`.
    ///
    /// Entries from the document replace existing ones with the same keyword.
    pub fn load_from_json(&mut self, json: &str) -> Result<(), Error> {
        let parsed: TypeMap = serde_json::from_str(json)?;
        for (keyword, tag) in parsed.types {
            if keyword.trim().is_empty() || tag.trim().is_empty() {
                return Err(Error::TypeMapEntry { keyword });
            }
            self.insert(keyword.trim(), tag.trim());
        }
        Ok(())
    }

    /// Add or replace a single mapping.
    pub fn insert(&mut self, keyword: &str, tag: &str) {
        self.types.insert(keyword.to_ascii_uppercase(), tag.to_string());
    }

    /// Resolve a type keyword to its target tag.
    pub fn lookup(&self, raw_type: &str) -> Result<&str, UnknownType> {
        self.types
            .get(&raw_type.to_ascii_uppercase())
            .map(String::as_str)
            .ok_or_else(|| UnknownType {
                type_name: raw_type.to_string(),
            })
    }

    /// Number of mapped keywords.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no keyword is mapped.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for TypeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (keyword, tag) in iter {
            map.insert(keyword.as_ref(), tag.as_ref());
        }
        map
    }
}
