//! Memory handling logic
//!
//! One storage call per operation; results are projected into the shape each
//! endpoint returns.

use crate::db::{memories, Database};
use crate::error::Result;
use crate::models::{
    CreateMemoryRequest, Memory, MemoryDetail, MemoryId, MemorySummary, UpdateMemoryRequest,
};

/// Memory handler for business logic
#[derive(Clone)]
pub struct MemoryHandler {
    db: Database,
}

impl MemoryHandler {
    pub fn new(db: Database) -> Self {
        MemoryHandler { db }
    }

    /// Summaries of every memory, oldest first
    pub async fn list(&self) -> Result<Vec<MemorySummary>> {
        let all = self.db.with_conn(memories::list_memories).await?;
        Ok(all.iter().map(Memory::summary).collect())
    }

    pub async fn get(&self, id: MemoryId) -> Result<Memory> {
        self.db
            .with_conn(move |conn| memories::get_memory(conn, &id))
            .await
    }

    /// Create a memory attributed to `owner_id`
    pub async fn create(&self, req: CreateMemoryRequest, owner_id: String) -> Result<MemoryDetail> {
        let memory = self
            .db
            .with_conn(move |conn| memories::insert_memory(conn, req, &owner_id))
            .await?;
        tracing::debug!("Created memory {} for {}", memory.id, memory.user_id);
        Ok(memory.detail())
    }

    pub async fn update(&self, id: MemoryId, req: UpdateMemoryRequest) -> Result<MemoryDetail> {
        let memory = self
            .db
            .with_conn(move |conn| memories::update_memory(conn, &id, req))
            .await?;
        Ok(memory.detail())
    }

    pub async fn delete(&self, id: MemoryId) -> Result<()> {
        self.db
            .with_conn(move |conn| memories::delete_memory(conn, &id))
            .await?;
        tracing::debug!("Deleted memory {}", id);
        Ok(())
    }
}
