//! Category/post disambiguation for a single URL path segment.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::context::ResolutionContext;
use crate::model::{Category, Post};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlugKind {
    Category,
    Post,
    NotFound,
}

/// Outcome of looking a segment up both as a category and as a post.
#[derive(Debug, Clone)]
pub struct Disambiguation<'c> {
    /// Category whose slug equals the segment, preferring a top-level one.
    pub category: Option<&'c Category>,
    pub post: Option<&'c Post>,
}

impl<'c> Disambiguation<'c> {
    /// Any category, nested or not, carries this slug.
    pub fn is_category(&self) -> bool {
        self.category.is_some()
    }

    pub fn is_post(&self) -> bool {
        self.post.is_some()
    }

    pub fn top_level_category(&self) -> Option<&'c Category> {
        self.category.filter(|c| c.is_top_level())
    }

    /// A top-level category wins over a post with the same slug. A slug that
    /// only names a subcategory falls through to the post lookup.
    pub fn kind(&self) -> SlugKind {
        if self.top_level_category().is_some() {
            SlugKind::Category
        } else if self.is_post() {
            SlugKind::Post
        } else {
            SlugKind::NotFound
        }
    }
}

/// Find the category carrying `slug`, preferring a top-level match.
pub fn find_category<'c>(categories: &'c [Category], slug: &str) -> Option<&'c Category> {
    categories
        .iter()
        .find(|c| c.slug == slug && c.is_top_level())
        .or_else(|| categories.iter().find(|c| c.slug == slug))
}

/// Strict lookup used when assembling a category page.
pub fn find_top_level_category<'c>(categories: &'c [Category], slug: &str) -> Option<&'c Category> {
    categories
        .iter()
        .find(|c| c.slug == slug && c.is_top_level())
}

/// Run the category and post lookups concurrently. Upstream failures degrade
/// to "absent" for the affected branch.
#[instrument(skip_all, fields(segment = %ctx.segment()))]
pub async fn disambiguate<'c>(ctx: &'c ResolutionContext<'_>) -> Disambiguation<'c> {
    let (categories, post) = tokio::join!(ctx.categories(), ctx.post());
    let category = categories.and_then(|all| find_category(all, ctx.segment()));
    let result = Disambiguation { category, post };
    debug!(
        is_category = result.is_category(),
        is_post = result.is_post(),
        kind = ?result.kind(),
        "segment disambiguated"
    );
    result
}
