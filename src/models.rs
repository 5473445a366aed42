use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    /// A post is public once its publication timestamp exists and has passed.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        matches!(self.published_date, Some(date) if date <= now)
    }

    pub fn is_draft(&self) -> bool {
        self.published_date.is_none()
    }

    pub fn preview(&self, length: usize) -> String {
        let chars: String = self.text.chars().take(length).collect();
        if self.text.chars().count() > length {
            format!("{}...", chars)
        } else {
            chars
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(published_date: Option<DateTime<Utc>>) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "title".to_string(),
            text: "text".to_string(),
            created_date: Utc::now(),
            published_date,
        }
    }

    #[test]
    fn draft_is_not_published() {
        let now = Utc::now();
        let draft = post(None);

        assert!(draft.is_draft());
        assert!(!draft.is_published(now));
    }

    #[test]
    fn future_publication_date_is_not_published() {
        let now = Utc::now();
        let scheduled = post(Some(now + Duration::hours(1)));

        assert!(!scheduled.is_draft());
        assert!(!scheduled.is_published(now));
    }

    #[test]
    fn past_publication_date_is_published() {
        let now = Utc::now();
        let published = post(Some(now - Duration::hours(1)));

        assert!(published.is_published(now));
        assert!(!published.is_draft());
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let mut p = post(None);
        p.text = "日本語のテキスト".to_string();

        assert_eq!(p.preview(3), "日本語...");
        assert_eq!(p.preview(100), "日本語のテキスト");
    }
}
