//! SQLite schema for Memories

use rusqlite::{Connection, Result};

/// Initialize the database with required tables
pub fn init_db(conn: &Connection) -> Result<()> {
    // Memories table
    // id is a lowercase hyphenated UUID; created_at is fixed-width RFC 3339 so
    // that text ordering matches chronological ordering.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS memories (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            cover_url TEXT NOT NULL,
            is_public BOOLEAN NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            user_id TEXT NOT NULL
        )",
        [],
    )?;

    create_indexes(conn)?;

    Ok(())
}

/// Create database indexes for query performance
fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_memories_created ON memories(created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_memories_user ON memories(user_id)",
        [],
    )?;

    Ok(())
}
