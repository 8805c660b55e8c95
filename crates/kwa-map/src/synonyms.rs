use std::collections::BTreeMap;

use kwa_model::Role;
use serde::{Deserialize, Serialize};

use crate::utils::normalize_text;

const KEYWORD_SYNONYMS: &[&str] = &[
    "keyword",
    "keywords",
    "mot-clé",
    "mots-clés",
    "mot-cle",
    "query",
    "top queries",
    "requête",
    "requêtes les plus fréquentes",
    "search term",
    "search query",
];

const POSITION_SYNONYMS: &[&str] = &[
    "position",
    "current position",
    "average position",
    "avg. position",
    "rank",
    "ranking",
    "classement",
    "pos",
];

const URL_SYNONYMS: &[&str] = &[
    "url",
    "current url",
    "page",
    "landing page",
    "top pages",
    "pages les plus populaires",
    "address",
    "adresse",
    "link",
];

const VOLUME_SYNONYMS: &[&str] = &[
    "volume",
    "search volume",
    "avg. monthly searches",
    "volume de recherche",
    "monthly searches",
    "vol",
];

/// Additional synonyms per role, as read from a config file.
pub type SynonymOverrides = BTreeMap<Role, Vec<String>>;

/// Ordered synonym tokens per role. Earlier tokens do not outrank later ones;
/// column order decides ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymTable {
    tokens: BTreeMap<Role, Vec<String>>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        let mut table = Self {
            tokens: BTreeMap::new(),
        };
        table.extend(Role::Keyword, KEYWORD_SYNONYMS.iter().copied());
        table.extend(Role::Position, POSITION_SYNONYMS.iter().copied());
        table.extend(Role::Url, URL_SYNONYMS.iter().copied());
        table.extend(Role::Volume, VOLUME_SYNONYMS.iter().copied());
        table
    }
}

impl SynonymTable {
    /// Table with no tokens at all; nothing will be detected.
    pub fn empty() -> Self {
        Self {
            tokens: BTreeMap::new(),
        }
    }

    /// Appends tokens for `role`, skipping blanks and duplicates.
    pub fn extend<I, S>(&mut self, role: Role, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.tokens.entry(role).or_default();
        for token in tokens {
            let normalized = normalize_text(token.as_ref());
            if normalized.is_empty() || entry.contains(&normalized) {
                continue;
            }
            entry.push(normalized);
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: &SynonymOverrides) -> Self {
        for (role, tokens) in overrides {
            self.extend(*role, tokens);
        }
        self
    }

    pub fn tokens(&self, role: Role) -> &[String] {
        self.tokens.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokens_are_normalized() {
        let table = SynonymTable::default();
        assert!(table.tokens(Role::Keyword).contains(&"mot clé".to_string()));
        assert!(table
            .tokens(Role::Volume)
            .contains(&"avg monthly searches".to_string()));
    }

    #[test]
    fn overrides_append_without_duplicates() {
        let mut overrides = SynonymOverrides::new();
        overrides.insert(
            Role::Volume,
            vec!["Impressions".to_string(), "volume".to_string(), " ".to_string()],
        );
        let table = SynonymTable::default().with_overrides(&overrides);
        let tokens = table.tokens(Role::Volume);
        assert_eq!(tokens.last().map(String::as_str), Some("impressions"));
        assert_eq!(tokens.iter().filter(|t| t.as_str() == "volume").count(), 1);
    }

    #[test]
    fn empty_table_has_no_tokens() {
        assert!(SynonymTable::empty().tokens(Role::Url).is_empty());
    }
}
