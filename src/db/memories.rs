//! Memory queries
//!
//! Every function runs a single statement against the given connection and
//! reports a missing row as `CoreError::NotFound`.

use crate::error::{CoreError, Result};
use crate::models::{CreateMemoryRequest, Memory, MemoryId, UpdateMemoryRequest};
use chrono::{SecondsFormat, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};

const MEMORY_COLUMNS: &str = "id, content, cover_url, is_public, created_at, user_id";

impl ToSql for MemoryId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for MemoryId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<MemoryId>()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn map_memory(row: &Row<'_>) -> rusqlite::Result<Memory> {
    Ok(Memory {
        id: row.get(0)?,
        content: row.get(1)?,
        cover_url: row.get(2)?,
        is_public: row.get(3)?,
        created_at: row.get(4)?,
        user_id: row.get(5)?,
    })
}

fn not_found(id: &MemoryId) -> CoreError {
    CoreError::NotFound("Memory", id.to_string())
}

/// All memories, oldest first. Rows sharing a timestamp keep insertion order.
pub fn list_memories(conn: &Connection) -> Result<Vec<Memory>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEMORY_COLUMNS} FROM memories ORDER BY created_at ASC, rowid ASC"
    ))?;

    let memories = stmt
        .query_map([], map_memory)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(memories)
}

/// Fetch one memory or fail with `NotFound`
pub fn get_memory(conn: &Connection, id: &MemoryId) -> Result<Memory> {
    conn.query_row(
        &format!("SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?"),
        [id],
        map_memory,
    )
    .optional()?
    .ok_or_else(|| not_found(id))
}

/// Insert a new memory owned by `user_id`. The id and timestamp are assigned here.
pub fn insert_memory(
    conn: &Connection,
    req: CreateMemoryRequest,
    user_id: &str,
) -> Result<Memory> {
    let memory = Memory {
        id: MemoryId::new(),
        content: req.content,
        cover_url: req.cover_url,
        is_public: req.is_public,
        created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        user_id: user_id.to_string(),
    };

    conn.execute(
        &format!("INSERT INTO memories ({MEMORY_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)"),
        params![
            memory.id,
            memory.content,
            memory.cover_url,
            memory.is_public,
            memory.created_at,
            memory.user_id
        ],
    )?;

    Ok(memory)
}

/// Apply the fields present in `req` and return the resulting record
pub fn update_memory(
    conn: &Connection,
    id: &MemoryId,
    req: UpdateMemoryRequest,
) -> Result<Memory> {
    if req.is_empty() {
        return get_memory(conn, id);
    }

    let mut updates = vec![];
    let mut params: Vec<Box<dyn ToSql>> = vec![];

    if let Some(content) = req.content {
        updates.push("content = ?");
        params.push(Box::new(content));
    }
    if let Some(cover_url) = req.cover_url {
        updates.push("cover_url = ?");
        params.push(Box::new(cover_url));
    }
    if let Some(is_public) = req.is_public {
        updates.push("is_public = ?");
        params.push(Box::new(is_public));
    }

    params.push(Box::new(*id));

    let query = format!(
        "UPDATE memories SET {} WHERE id = ? RETURNING {MEMORY_COLUMNS}",
        updates.join(", ")
    );
    let params_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

    conn.query_row(&query, params_refs.as_slice(), map_memory)
        .optional()?
        .ok_or_else(|| not_found(id))
}

/// Permanently remove a memory
pub fn delete_memory(conn: &Connection, id: &MemoryId) -> Result<()> {
    match conn.execute("DELETE FROM memories WHERE id = ?", [id])? {
        0 => Err(not_found(id)),
        _ => Ok(()),
    }
}
