//! store — SQLite-хранилище переводов.
//!
//! Схема (одна БД):
//!   Japanese(ID, string, debug)                    — исходный японский текст
//!   Text(ID, StringID -> Japanese.ID, english, comment, updated, status,
//!        PointerRef, IdentifyString, IdentifyPointerRef)
//!
//! merge читает только `english, PointerRef` из Text по возрастанию PointerRef;
//! export заполняет обе таблицы строками export_rows().

use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::{ChtxError, Result};
use crate::merge::{ExportEntry, StoreRow};

fn store_err(context: &'static str) -> impl Fn(rusqlite::Error) -> ChtxError {
    move |e| ChtxError::Store {
        context,
        reason: e.to_string(),
    }
}

pub struct TextStore {
    conn: Connection,
}

impl TextStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(store_err("open database"))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err("open database"))?;
        Ok(Self { conn })
    }

    /// Создать таблицы, если их ещё нет.
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS Japanese (
                    ID INTEGER PRIMARY KEY AUTOINCREMENT,
                    string TEXT,
                    debug INTEGER NOT NULL DEFAULT 0
                );
                CREATE TABLE IF NOT EXISTS Text (
                    ID INTEGER PRIMARY KEY AUTOINCREMENT,
                    StringID INTEGER,
                    english TEXT,
                    comment TEXT,
                    updated INTEGER NOT NULL DEFAULT 0,
                    status INTEGER NOT NULL DEFAULT 0,
                    PointerRef INTEGER NOT NULL,
                    IdentifyString TEXT,
                    IdentifyPointerRef INTEGER NOT NULL DEFAULT 0,
                    FOREIGN KEY(StringID) REFERENCES Japanese(ID)
                );
                CREATE INDEX IF NOT EXISTS idx_text_pointer_ref ON Text(PointerRef);",
            )
            .map_err(store_err("create schema"))
    }

    /// Записать строки выгрузки одной транзакцией; возвращает число вставленных строк Text.
    pub fn insert_entries(&mut self, entries: &[ExportEntry]) -> Result<usize> {
        let tx = self.conn.transaction().map_err(store_err("begin transaction"))?;
        {
            let mut jp = tx
                .prepare("INSERT INTO Japanese (string, debug) VALUES (?1, 0)")
                .map_err(store_err("prepare insert"))?;
            let mut text = tx
                .prepare(
                    "INSERT INTO Text (StringID, english, comment, updated, status, PointerRef,
                                       IdentifyString, IdentifyPointerRef)
                     VALUES (?1, ?2, '', 0, ?3, ?4, '', 0)",
                )
                .map_err(store_err("prepare insert"))?;

            for e in entries {
                let string_id = jp
                    .insert(params![e.jp])
                    .map_err(store_err("insert Japanese row"))?;
                text.execute(params![string_id, e.en, e.status, e.pointer_ref])
                    .map_err(store_err("insert Text row"))?;
            }
        }
        tx.commit().map_err(store_err("commit"))?;

        debug!("store: inserted {} rows", entries.len());
        Ok(entries.len())
    }

    /// Строки для merge: `SELECT english, PointerRef FROM Text ORDER BY PointerRef`.
    /// Нетекстовый english (NULL, BLOB) читается как отсутствующий текст.
    pub fn rows(&self) -> Result<Vec<StoreRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT english, PointerRef FROM Text ORDER BY PointerRef")
            .map_err(store_err("prepare select"))?;
        let rows = stmt
            .query_map([], |row| {
                let text = match row.get_ref(0)? {
                    ValueRef::Text(b) => std::str::from_utf8(b).ok().map(str::to_string),
                    _ => None,
                };
                Ok(StoreRow {
                    text,
                    pointer_ref: row.get(1)?,
                })
            })
            .map_err(store_err("query Text"))?;

        let out = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(store_err("read Text row"))?;
        Ok(out)
    }

    /// Прямой доступ к соединению (для своих запросов поверх схемы).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
