//! Shared fixtures for tests across this module.
//!
//! Tests exercising the catalog traits need a concrete, in-memory
//! implementation rather than one of the always-empty `No*` defaults; the
//! ones here are deliberately minimal (`HashMap` lookups, literal prefix
//! matching) since populating a catalog with real LaTeX package definitions
//! is outside this crate's scope.

use std::collections::HashMap;

use crate::latexnodes::catalog::{EnvSpec, EnvironmentCatalog, MacroCatalog, MacroSpec, SpecialsCatalog};
use crate::latexnodes::parsing_state::ParsingState;
use crate::latexnodes::token_reader::TokenReader;

#[derive(Debug, Default)]
pub struct MapMacroCatalog(pub HashMap<String, MacroSpec>);

impl MacroCatalog for MapMacroCatalog {
    fn lookup(&self, name: &str) -> Option<MacroSpec> {
        self.0.get(name).cloned()
    }
}

#[derive(Debug, Default)]
pub struct MapEnvironmentCatalog(pub HashMap<String, EnvSpec>);

impl EnvironmentCatalog for MapEnvironmentCatalog {
    fn lookup(&self, name: &str) -> Option<EnvSpec> {
        self.0.get(name).cloned()
    }
}

/// Matches the longest of a fixed list of literal specials strings.
#[derive(Debug, Default)]
pub struct ListSpecialsCatalog(pub Vec<String>);

impl SpecialsCatalog for ListSpecialsCatalog {
    fn match_at(&self, upcoming: &str) -> Option<(String, usize)> {
        self.0
            .iter()
            .filter(|s| upcoming.starts_with(s.as_str()))
            .max_by_key(|s| s.len())
            .map(|s| (s.clone(), s.chars().count()))
    }
}

/// Builds a default `ParsingState` plus a `TokenReader` over the same
/// `source`, matching the constructor pattern used throughout the ported
/// tokenizer test suite.
pub fn reader_and_state(source: &str) -> (TokenReader, ParsingState) {
    (TokenReader::new(source), ParsingState::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_specials_catalog_prefers_longest_match() {
        let catalog = ListSpecialsCatalog(vec!["-".to_string(), "--".to_string(), "---".to_string()]);
        assert_eq!(
            catalog.match_at("---more"),
            Some(("---".to_string(), 3))
        );
        assert_eq!(catalog.match_at("-more"), Some(("-".to_string(), 1)));
        assert_eq!(catalog.match_at("xyz"), None);
    }
}
