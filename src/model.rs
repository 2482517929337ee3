use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    #[serde(other)]
    Unknown,
}

/// Document id. Records may carry `_id`, `id` or both; `_id` wins when both
/// are present. Always serialized as `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdKeys", into = "IdKey")]
pub struct RecordId(String);

#[derive(Deserialize)]
struct IdKeys {
    #[serde(rename = "_id", default)]
    mongo: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Serialize)]
struct IdKey {
    id: String,
}

impl TryFrom<IdKeys> for RecordId {
    type Error = &'static str;

    fn try_from(keys: IdKeys) -> Result<Self, Self::Error> {
        keys.mongo
            .or(keys.id)
            .map(RecordId)
            .ok_or("missing field `id` or `_id`")
    }
}

impl From<RecordId> for IdKey {
    fn from(id: RecordId) -> Self {
        IdKey { id: id.0 }
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
}

/// `authorId` is either a bare id or the populated user document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthorRef {
    Populated(Author),
    Id(String),
}

impl AuthorRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            AuthorRef::Populated(author) => author.name.as_deref().filter(|n| !n.is_empty()),
            AuthorRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeoFields {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default)]
    pub meta_image: Option<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub twitter_card: Option<String>,
    #[serde(default)]
    pub twitter_title: Option<String>,
    #[serde(default)]
    pub twitter_description: Option<String>,
    #[serde(default)]
    pub twitter_image: Option<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
    #[serde(default)]
    pub reading_time: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(flatten)]
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub status: PostStatus,
    #[serde(default)]
    pub category_ids: Vec<Category>,
    #[serde(default)]
    pub tag_ids: Vec<Tag>,
    #[serde(default)]
    pub author_id: Option<AuthorRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(flatten)]
    pub seo: SeoFields,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    pub fn has_images(&self) -> bool {
        !self.image_urls.is_empty()
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author_id.as_ref().and_then(AuthorRef::name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// Envelope returned by `GET /posts?page=&limit=`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Keep only published posts, preserving order.
pub fn published(posts: Vec<Post>) -> Vec<Post> {
    posts.into_iter().filter(Post::is_published).collect()
}
