use std::env;

const DEFAULT_TABLE_NAME: &str = "users-table";

/// Which storage backend the handler talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl StoreBackend {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("memory") => StoreBackend::Memory,
            _ => StoreBackend::DynamoDb,
        }
    }
}

/// Settings read once per cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub backend: StoreBackend,
}

impl Config {
    /// Reads `TABLE_NAME` and `STORE_BACKEND`, falling back to defaults when unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let table_name = lookup("TABLE_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        let backend = StoreBackend::parse(lookup("STORE_BACKEND").as_deref());
        Self {
            table_name,
            backend,
        }
    }
}
