//! Per-request resolution context.
//!
//! One context serves one path segment. Every upstream lookup is issued at
//! most once and memoised, so the disambiguator, the assembler and the
//! metadata synthesizer all observe the same answers within a request.
//! Failures are memoised as absent.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::OnceCell;
use tracing::warn;

use crate::api::BlogApi;
use crate::config::{Config, Revalidate};
use crate::model::{Category, Paginated, Post, Tag};

pub struct ResolutionContext<'a> {
    api: &'a dyn BlogApi,
    segment: String,
    posts_limit: u32,
    revalidate: Revalidate,
    min_revalidate: AtomicU64,
    categories: OnceCell<Option<Vec<Category>>>,
    tags: OnceCell<Option<Vec<Tag>>>,
    post: OnceCell<Option<Post>>,
    posts_by_category: OnceCell<Option<Vec<Post>>>,
    feed: OnceCell<Option<Paginated<Post>>>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(api: &'a dyn BlogApi, cfg: &Config, segment: &str) -> Self {
        Self::with_settings(api, segment, cfg.api.posts_limit, cfg.revalidate)
    }

    pub fn with_settings(
        api: &'a dyn BlogApi,
        segment: &str,
        posts_limit: u32,
        revalidate: Revalidate,
    ) -> Self {
        Self {
            api,
            segment: segment.to_string(),
            posts_limit,
            revalidate,
            min_revalidate: AtomicU64::new(u64::MAX),
            categories: OnceCell::new(),
            tags: OnceCell::new(),
            post: OnceCell::new(),
            posts_by_category: OnceCell::new(),
            feed: OnceCell::new(),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Smallest revalidation window among the endpoints consulted so far.
    pub fn revalidate_secs(&self) -> Option<u64> {
        match self.min_revalidate.load(Ordering::Relaxed) {
            u64::MAX => None,
            secs => Some(secs),
        }
    }

    fn consulted(&self, secs: u64) {
        self.min_revalidate.fetch_min(secs, Ordering::Relaxed);
    }

    pub async fn categories(&self) -> Option<&[Category]> {
        self.categories
            .get_or_init(|| async {
                self.consulted(self.revalidate.categories);
                absent_on_error("categories", self.api.categories().await)
            })
            .await
            .as_deref()
    }

    pub async fn tags(&self) -> Option<&[Tag]> {
        self.tags
            .get_or_init(|| async {
                self.consulted(self.revalidate.tags);
                absent_on_error("tags", self.api.tags().await)
            })
            .await
            .as_deref()
    }

    /// The post whose slug equals the segment, if any.
    pub async fn post(&self) -> Option<&Post> {
        self.post
            .get_or_init(|| async {
                self.consulted(self.revalidate.post);
                absent_on_error("post_by_slug", self.api.post_by_slug(&self.segment).await)
                    .flatten()
            })
            .await
            .as_ref()
    }

    /// Posts filed under the category whose slug equals the segment.
    pub async fn posts_by_category(&self) -> Option<&[Post]> {
        self.posts_by_category
            .get_or_init(|| async {
                self.consulted(self.revalidate.posts_by_category);
                absent_on_error(
                    "posts_by_category",
                    self.api.posts_by_category(&self.segment).await,
                )
            })
            .await
            .as_deref()
    }

    /// First page of the post collection.
    pub async fn feed(&self) -> Option<&Paginated<Post>> {
        self.feed
            .get_or_init(|| async {
                self.consulted(self.revalidate.posts);
                absent_on_error("posts", self.api.posts(1, self.posts_limit).await)
            })
            .await
            .as_ref()
    }
}

fn absent_on_error<T>(what: &'static str, res: anyhow::Result<T>) -> Option<T> {
    match res {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(?err, endpoint = what, "upstream lookup failed; treating as absent");
            None
        }
    }
}
