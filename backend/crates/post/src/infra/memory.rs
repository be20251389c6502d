//! In-memory Repository
//!
//! Backs tests and database-less runs. Insertion order is kept so `list`
//! matches the Postgres `ORDER BY created_at`.

use std::sync::Arc;

use kernel::id::PostId;
use tokio::sync::RwLock;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

#[derive(Default)]
struct Table {
    rows: Vec<Post>,
    dropped: bool,
}

impl Table {
    fn check(&self) -> PostResult<()> {
        if self.dropped {
            Err(PostError::TableMissing)
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryPostRepository {
    table: Arc<RwLock<Table>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for MemoryPostRepository {
    async fn list(&self) -> PostResult<Vec<Post>> {
        let table = self.table.read().await;
        table.check()?;
        Ok(table.rows.clone())
    }

    async fn find_by_id(&self, id: &PostId) -> PostResult<Option<Post>> {
        let table = self.table.read().await;
        table.check()?;
        Ok(table.rows.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_by_image(&self, image: &str) -> PostResult<Option<Post>> {
        let table = self.table.read().await;
        table.check()?;
        Ok(table.rows.iter().find(|p| p.image == image).cloned())
    }

    async fn create(&self, post: &Post) -> PostResult<()> {
        let mut table = self.table.write().await;
        table.check()?;
        if table.rows.iter().any(|p| p.id == post.id) {
            return Err(PostError::Internal(format!("duplicate post id {}", post.id)));
        }
        table.rows.push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> PostResult<()> {
        let mut table = self.table.write().await;
        table.check()?;
        let slot = table
            .rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(PostError::NotFound)?;
        *slot = post.clone();
        Ok(())
    }

    async fn delete(&self, id: &PostId) -> PostResult<()> {
        let mut table = self.table.write().await;
        table.check()?;
        table.rows.retain(|p| &p.id != id);
        Ok(())
    }

    async fn drop_table(&self) -> PostResult<()> {
        let mut table = self.table.write().await;
        table.rows.clear();
        table.dropped = true;
        Ok(())
    }
}
