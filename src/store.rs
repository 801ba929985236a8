use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::generator::Joke;

/// Key the corpus is saved under after every generated joke.
pub const STORED_JOKES: &str = "stored_jokes";

/// Where generated corpora end up. The generator only ever writes.
pub trait JokeStore {
    fn set(&mut self, key: &str, value: &[Joke]) -> Result<()>;
}

/// Key-value table in SQLite, values stored as JSON.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
            );",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<Joke>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl JokeStore for SqliteStore {
    fn set(&mut self, key: &str, value: &[Joke]) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, json],
        )?;
        Ok(())
    }
}

/// Keeps everything in memory; handy for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<Joke>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&[Joke]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// How many times `set` has been called.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl JokeStore for MemoryStore {
    fn set(&mut self, key: &str, value: &[Joke]) -> Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        self.writes += 1;
        Ok(())
    }
}
