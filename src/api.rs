use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::model::{Category, Paginated, Post, Tag};

/// Read-only view of the content API consumed while rendering pages.
#[async_trait]
pub trait BlogApi: Send + Sync {
    /// `GET /categories`
    async fn categories(&self) -> Result<Vec<Category>>;

    /// `GET /posts/slug/{slug}`; `Ok(None)` when the API answers 404.
    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// `GET /posts/by-category/{categorySlug}`
    async fn posts_by_category(&self, category_slug: &str) -> Result<Vec<Post>>;

    /// `GET /posts?page=&limit=`
    async fn posts(&self, page: u32, limit: u32) -> Result<Paginated<Post>>;

    /// `GET /tags`
    async fn tags(&self) -> Result<Vec<Tag>>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// List endpoints answer either with a bare array or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) => items,
            ListBody::Wrapped { data } => data,
        }
    }
}

impl ApiClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let base_url = Url::parse(cfg.api.base_url.trim()).context("invalid api.base_url")?;
        Self::with_base_url(base_url, cfg.timeout())
    }

    pub fn with_base_url(base_url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("newsroom-ssr/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Build `{base}/{segments...}` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| anyhow!("api base URL cannot be a base: {}", self.base_url))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    pub fn build_request(&self, url: Url) -> Result<reqwest::Request> {
        self.http
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .build()
            .context("failed to build API request")
    }

    /// Issue a GET and decode the body; `Ok(None)` on 404.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        let request = self.build_request(url)?;
        debug!(url=%request.url(), "sending api request");
        let res = self
            .http
            .execute(request)
            .await
            .context("failed to reach content API")?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%status, "api resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body = %body, "content API error");
            return Err(anyhow!("content API error {}: {}", status, body));
        }

        let body = res.text().await.context("failed to read API response")?;
        let payload: Option<T> =
            serde_json::from_str(&body).context("invalid API response JSON")?;
        Ok(payload)
    }

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let what = url.path().to_string();
        let body: ListBody<T> = self
            .get_json(url)
            .await?
            .ok_or_else(|| anyhow!("{} returned no list", what))?;
        Ok(body.into_vec())
    }
}

#[async_trait]
impl BlogApi for ApiClient {
    async fn categories(&self) -> Result<Vec<Category>> {
        let url = self.endpoint(&["categories"])?;
        self.get_list(url).await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let url = self.endpoint(&["posts", "slug", slug])?;
        self.get_json(url).await
    }

    async fn posts_by_category(&self, category_slug: &str) -> Result<Vec<Post>> {
        let url = self.endpoint(&["posts", "by-category", category_slug])?;
        self.get_list(url).await
    }

    async fn posts(&self, page: u32, limit: u32) -> Result<Paginated<Post>> {
        let mut url = self.endpoint(&["posts"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        let what = url.path().to_string();
        self.get_json(url)
            .await?
            .ok_or_else(|| anyhow!("{} returned no page", what))
    }

    async fn tags(&self) -> Result<Vec<Tag>> {
        let url = self.endpoint(&["tags"])?;
        self.get_list(url).await
    }
}
