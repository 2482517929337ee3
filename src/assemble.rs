//! Server-side data assembly for category and post pages.
//!
//! Both paths fan out their upstream lookups concurrently and fail fast: if
//! any lookup is absent the whole assembly fails and the page is treated as
//! not found.

use anyhow::{anyhow, Result};
use futures::future::try_join3;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::context::ResolutionContext;
use crate::model::{Category, Post, Tag};
use crate::resolve::find_top_level_category;

/// Props bundle for a category listing page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryPage {
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub category: Category,
    /// Always null on a top-level category page.
    pub subcategory: Option<Category>,
}

/// Props bundle for an article page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PostPage {
    pub post: Post,
    /// Published posts from the feed, excluding `post` itself.
    pub posts: Vec<Post>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedEntity {
    Category(CategoryPage),
    Post(PostPage),
}

impl PostPage {
    /// Newest `n` related posts by creation date.
    pub fn latest_news(&self, n: usize) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(n);
        posts
    }

    /// The newest related post created before the current one, falling back
    /// to the newest related post.
    pub fn up_next(&self) -> Option<&Post> {
        match self.post.created_at {
            Some(current) => self
                .posts
                .iter()
                .filter(|p| p.created_at.is_some_and(|t| t < current))
                .max_by_key(|p| p.created_at)
                .or_else(|| self.latest_news(1).into_iter().next()),
            None => self.latest_news(1).into_iter().next(),
        }
    }
}

fn required<T>(what: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| anyhow!("{} unavailable", what))
}

/// Assemble the listing for the category named by the context's segment.
#[instrument(skip_all, fields(segment = %ctx.segment()))]
pub async fn category_page(ctx: &ResolutionContext<'_>) -> Result<CategoryPage> {
    let (categories, by_category, tags) = try_join3(
        async { required("categories", ctx.categories().await) },
        async { required("posts_by_category", ctx.posts_by_category().await) },
        async { required("tags", ctx.tags().await) },
    )
    .await?;

    let category = find_top_level_category(categories, ctx.segment())
        .ok_or_else(|| anyhow!("no top-level category with slug '{}'", ctx.segment()))?
        .clone();

    let posts: Vec<Post> = by_category
        .iter()
        .filter(|p| p.is_published() && p.has_images())
        .cloned()
        .collect();
    debug!(
        fetched = by_category.len(),
        listed = posts.len(),
        "category posts filtered"
    );

    Ok(CategoryPage {
        posts,
        categories: categories.to_vec(),
        tags: tags.to_vec(),
        category,
        subcategory: None,
    })
}

/// Assemble the article page for the post named by the context's segment.
#[instrument(skip_all, fields(segment = %ctx.segment()))]
pub async fn post_page(ctx: &ResolutionContext<'_>) -> Result<PostPage> {
    let (post, feed, categories) = try_join3(
        async { required("post", ctx.post().await) },
        async { required("posts", ctx.feed().await) },
        async { required("categories", ctx.categories().await) },
    )
    .await?;

    let posts: Vec<Post> = feed
        .data
        .iter()
        .filter(|p| p.is_published() && p.id != post.id)
        .cloned()
        .collect();
    debug!(
        fetched = feed.data.len(),
        related = posts.len(),
        "feed posts filtered"
    );

    Ok(PostPage {
        post: post.clone(),
        posts,
        categories: categories.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostStatus;
    use chrono::{TimeZone, Utc};

    fn post(id: &str, day: u32) -> Post {
        Post {
            id: id.into(),
            title: id.into(),
            slug: id.into(),
            content: String::new(),
            excerpt: None,
            status: PostStatus::Published,
            category_ids: vec![],
            tag_ids: vec![],
            author_id: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap()),
            updated_at: None,
            image_urls: vec![],
            seo: Default::default(),
        }
    }

    #[test]
    fn latest_news_is_newest_first() {
        let page = PostPage {
            post: post("current", 10),
            posts: vec![post("a", 1), post("b", 12), post("c", 5)],
            categories: vec![],
        };
        let ids: Vec<&str> = page.latest_news(2).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn up_next_is_the_next_older_post() {
        let page = PostPage {
            post: post("current", 10),
            posts: vec![post("a", 1), post("b", 12), post("c", 5)],
            categories: vec![],
        };
        assert_eq!(page.up_next().unwrap().id, "c");

        let page = PostPage {
            post: post("oldest", 1),
            posts: vec![post("b", 12), post("c", 5)],
            categories: vec![],
        };
        assert_eq!(page.up_next().unwrap().id, "b");

        let page = PostPage {
            post: post("alone", 1),
            posts: vec![],
            categories: vec![],
        };
        assert!(page.up_next().is_none());
    }
}
