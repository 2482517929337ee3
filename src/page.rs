//! Per-request entry point: turns one URL segment into a renderable page or
//! a not-found outcome. Nothing here returns an error; upstream failures and
//! missing entities both end as [`PageOutcome::NotFound`].

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::api::BlogApi;
use crate::assemble::{self, ResolvedEntity};
use crate::config::{Config, Revalidate};
use crate::context::ResolutionContext;
use crate::metadata::{self, PageMetadata, SiteInfo};
use crate::resolve::{self, SlugKind};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub props: ResolvedEntity,
    pub metadata: PageMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidate_secs: Option<u64>,
}

impl RenderedPage {
    /// `Cache-Control` value honouring the shortest upstream window.
    pub fn cache_control(&self) -> Option<String> {
        self.revalidate_secs
            .map(|secs| format!("public, s-maxage={}", secs))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    Found(Box<RenderedPage>),
    NotFound { metadata: PageMetadata },
}

impl PageOutcome {
    pub fn kind(&self) -> SlugKind {
        match self {
            PageOutcome::Found(page) => match page.props {
                ResolvedEntity::Category(_) => SlugKind::Category,
                ResolvedEntity::Post(_) => SlugKind::Post,
            },
            PageOutcome::NotFound { .. } => SlugKind::NotFound,
        }
    }

    pub fn metadata(&self) -> &PageMetadata {
        match self {
            PageOutcome::Found(page) => &page.metadata,
            PageOutcome::NotFound { metadata } => metadata,
        }
    }

    pub fn props(&self) -> Option<&ResolvedEntity> {
        match self {
            PageOutcome::Found(page) => Some(&page.props),
            PageOutcome::NotFound { .. } => None,
        }
    }
}

pub struct PageResolver<A> {
    api: A,
    site: SiteInfo,
    posts_limit: u32,
    revalidate: Revalidate,
}

impl<A: BlogApi> PageResolver<A> {
    pub fn new(api: A, cfg: &Config) -> Self {
        Self::with_site(
            api,
            SiteInfo::from_config(cfg),
            cfg.api.posts_limit,
            cfg.revalidate,
        )
    }

    pub fn with_site(api: A, site: SiteInfo, posts_limit: u32, revalidate: Revalidate) -> Self {
        Self {
            api,
            site,
            posts_limit,
            revalidate,
        }
    }

    fn context(&self, segment: &str) -> ResolutionContext<'_> {
        ResolutionContext::with_settings(&self.api, segment, self.posts_limit, self.revalidate)
    }

    /// Resolve a segment and assemble everything its page needs.
    #[instrument(skip(self))]
    pub async fn resolve(&self, segment: &str) -> PageOutcome {
        let slug = normalize_segment(segment);
        if slug.is_empty() {
            return PageOutcome::NotFound {
                metadata: metadata::not_found_metadata(slug),
            };
        }

        let ctx = self.context(slug);
        let found = resolve::disambiguate(&ctx).await;
        let metadata = metadata::synthesize(&self.site, &found, slug);

        let assembled = match found.kind() {
            SlugKind::Category => assemble::category_page(&ctx)
                .await
                .map(ResolvedEntity::Category),
            SlugKind::Post => assemble::post_page(&ctx).await.map(ResolvedEntity::Post),
            SlugKind::NotFound => {
                info!(slug, "segment matches neither a category nor a post");
                return PageOutcome::NotFound { metadata };
            }
        };

        match assembled {
            Ok(props) => PageOutcome::Found(Box::new(RenderedPage {
                props,
                metadata,
                revalidate_secs: ctx.revalidate_secs(),
            })),
            Err(err) => {
                warn!(?err, slug, "page assembly failed; rendering not found");
                PageOutcome::NotFound { metadata }
            }
        }
    }

    /// Metadata only, for callers that render `<head>` separately.
    #[instrument(skip(self))]
    pub async fn metadata(&self, segment: &str) -> PageMetadata {
        let slug = normalize_segment(segment);
        if slug.is_empty() {
            return metadata::not_found_metadata(slug);
        }
        let ctx = self.context(slug);
        let found = resolve::disambiguate(&ctx).await;
        metadata::synthesize(&self.site, &found, slug)
    }
}

/// Strip surrounding whitespace and slashes from a path segment.
pub fn normalize_segment(segment: &str) -> &str {
    segment.trim().trim_matches('/')
}
