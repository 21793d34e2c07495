//! Editorial posts published alongside the containment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::identity::generate_id;

/// Editorial category, serialized with the Russian display strings of the
/// persisted slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostCategory {
    #[serde(rename = "Новости")]
    News,
    #[serde(rename = "Исследования")]
    Research,
    #[serde(rename = "Полевой отчет")]
    FieldReport,
    #[serde(rename = "Объявление")]
    Announcement,
}

impl PostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostCategory::News => "Новости",
            PostCategory::Research => "Исследования",
            PostCategory::FieldReport => "Полевой отчет",
            PostCategory::Announcement => "Объявление",
        }
    }
}

impl std::fmt::Display for PostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post as persisted in the `sce_posts` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: PostCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: PostCategory,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<PostCategory>,
}

impl Post {
    pub fn new(fields: NewPost, author: &str) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: fields.title,
            content: fields.content,
            author: author.to_string(),
            category: fields.category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_patch(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_russian_labels() {
        let json = serde_json::to_string(&PostCategory::FieldReport).unwrap();
        assert_eq!(json, "\"Полевой отчет\"");
        assert_eq!(
            serde_json::from_str::<PostCategory>(&json).unwrap(),
            PostCategory::FieldReport
        );
    }

    #[test]
    fn patch_only_overwrites_supplied_fields() {
        let mut post = Post::new(
            NewPost {
                title: "Briefing".to_string(),
                content: "All hands".to_string(),
                category: PostCategory::Announcement,
            },
            "alice",
        );

        post.apply_patch(PostPatch {
            content: Some("All hands, updated".to_string()),
            ..Default::default()
        });

        assert_eq!(post.title, "Briefing");
        assert_eq!(post.content, "All hands, updated");
        assert_eq!(post.category, PostCategory::Announcement);
    }
}
