use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::forms::{CommentForm, PostForm};
use crate::models::{Comment, Post, User};
use crate::{Error, Result};

/// Explicit data-access layer: every operation is a single query against the
/// pool, and a missing row on an identifier lookup is `Error::NotFound`.
#[derive(Clone)]
pub struct Repo {
    db: PgPool,
}

impl Repo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // Posts

    pub async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts
             WHERE published_date IS NOT NULL AND published_date <= $1
             ORDER BY published_date DESC",
        )
        .bind(now)
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    pub async fn list_drafts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE published_date IS NULL ORDER BY created_date ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(Error::NotFound)
    }

    pub async fn create_post(&self, author_id: Uuid, form: &PostForm) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (author_id, title, text) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(author_id)
        .bind(&form.title)
        .bind(&form.text)
        .fetch_one(&self.db)
        .await?;

        Ok(post)
    }

    pub async fn update_post(&self, id: Uuid, form: &PostForm) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = $2, text = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&form.title)
        .bind(&form.text)
        .fetch_optional(&self.db)
        .await?
        .ok_or(Error::NotFound)
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    pub async fn publish_post(&self, id: Uuid, now: DateTime<Utc>) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET published_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.db)
        .await?
        .ok_or(Error::NotFound)
    }

    // Comments

    pub async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = $1 ORDER BY created_date ASC",
        )
        .bind(post_id)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    pub async fn create_comment(&self, post_id: Uuid, form: &CommentForm) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (post_id, author, text) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(post_id)
        .bind(&form.author)
        .bind(&form.text)
        .fetch_one(&self.db)
        .await?;

        Ok(comment)
    }

    pub async fn approve_comment(&self, id: Uuid) -> Result<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET approved = true WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(Error::NotFound)
    }

    /// Deletes a comment and returns the parent post id, captured before the
    /// row is gone so the caller can still redirect to the post.
    pub async fn delete_comment(&self, id: Uuid) -> Result<Uuid> {
        let post_id: Option<(Uuid,)> =
            sqlx::query_as("DELETE FROM comments WHERE id = $1 RETURNING post_id")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        post_id.map(|(id,)| id).ok_or(Error::NotFound)
    }

    // Users and sessions

    pub async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    pub async fn create_session(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query("INSERT INTO sessions (user_id, token, expires_at) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(token)
            .bind(expires_at)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Resolves a session token to its user, ignoring expired sessions.
    pub async fn session_user(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.password_hash, u.created_at
             FROM users u
             JOIN sessions s ON s.user_id = u.id
             WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn delete_session(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
