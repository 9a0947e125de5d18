#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ddl2xml::mapping::type_map::TypeMap;
use ddl2xml::parser::column_extractor::{ErrorPolicy, Extraction};
use ddl2xml::parser::parse_ddl;

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn fixture_sql_path(fixture: &str) -> PathBuf {
    fixture_dir(fixture).join("input.sql")
}

pub(crate) fn read_fixture_sql(fixture: &str) -> String {
    std::fs::read_to_string(fixture_sql_path(fixture)).expect("fixture SQL should be readable")
}

pub(crate) fn parse_fixture(fixture: &str, policy: ErrorPolicy) -> Extraction {
    parse_ddl(&read_fixture_sql(fixture), &TypeMap::teradata(), policy)
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
