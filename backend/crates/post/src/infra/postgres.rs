//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

/// Postgres error code for `undefined_table`
const UNDEFINED_TABLE: &str = "42P01";

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgPostRepository {
    async fn list(&self) -> PostResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, image, user_id, created_at, updated_at
            FROM posts
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_by_id(&self, id: &PostId) -> PostResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, image, user_id, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(PostRow::into_post))
    }

    async fn find_by_image(&self, image: &str) -> PostResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, image, user_id, created_at, updated_at
            FROM posts
            WHERE image = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(image)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(PostRow::into_post))
    }

    async fn create(&self, post: &Post) -> PostResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                id,
                title,
                content,
                image,
                user_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image)
        .bind(post.user_id.map(UserId::into_uuid))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    async fn update(&self, post: &Post) -> PostResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                content = $3,
                image = $4,
                user_id = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image)
        .bind(post.user_id.map(UserId::into_uuid))
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if affected == 0 {
            return Err(PostError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &PostId) -> PostResult<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    async fn drop_table(&self) -> PostResult<()> {
        sqlx::query("DROP TABLE IF EXISTS posts")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_db_error(err: sqlx::Error) -> PostError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNDEFINED_TABLE) => {
            PostError::TableMissing
        }
        _ => PostError::Database(err),
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    image: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: PostId::from_uuid(self.id),
            title: self.title,
            content: self.content,
            image: self.image,
            user_id: self.user_id.map(UserId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
