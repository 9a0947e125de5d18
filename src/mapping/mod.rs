/// Source type keyword → target type tag table, with the built-in Teradata → Talend defaults.
pub mod type_map;
