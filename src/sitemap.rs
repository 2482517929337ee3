//! Sitemap rendering over top-level categories and published posts.

use anyhow::{Context, Result};
use tracing::debug;

use crate::api::BlogApi;
use crate::model::{self, Category, Post};

/// Upper bound on pages walked, in case the API never reports the last page.
const MAX_PAGES: u32 = 1_000;

/// Walk `GET /posts` page by page and keep the published posts.
pub async fn collect_published_posts(api: &dyn BlogApi, limit: u32) -> Result<Vec<Post>> {
    let mut out = Vec::new();
    let mut page = 1;
    loop {
        let batch = api
            .posts(page, limit)
            .await
            .with_context(|| format!("failed to fetch posts page {}", page))?;
        let fetched = batch.data.len();
        out.extend(model::published(batch.data));
        debug!(page, fetched, total_pages = batch.pagination.total_pages, "posts page fetched");

        if fetched == 0 || page >= batch.pagination.total_pages || page >= MAX_PAGES {
            break;
        }
        page += 1;
    }
    Ok(out)
}

/// Render a `urlset` document. Only top-level categories and published posts
/// are listed.
pub fn render(base_url: &str, categories: &[Category], posts: &[Post]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut body = String::new();
    body.push_str(&url_entry(&format!("{}/", base), None));
    for category in categories.iter().filter(|c| c.is_top_level()) {
        body.push_str(&url_entry(&format!("{}/{}", base, category.slug), None));
    }
    for post in posts.iter().filter(|p| p.is_published()) {
        let lastmod = post
            .updated_at
            .or(post.created_at)
            .map(|t| t.format("%Y-%m-%d").to_string());
        body.push_str(&url_entry(
            &format!("{}/{}", base, post.slug),
            lastmod.as_deref(),
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}</urlset>
"#,
        body
    )
}

fn url_entry(loc: &str, lastmod: Option<&str>) -> String {
    match lastmod {
        Some(date) => format!(
            "  <url><loc>{}</loc><lastmod>{}</lastmod></url>\n",
            xml_escape(loc),
            date
        ),
        None => format!("  <url><loc>{}</loc></url>\n", xml_escape(loc)),
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
