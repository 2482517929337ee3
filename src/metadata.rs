//! Page `<head>` metadata and JSON-LD synthesis.
//!
//! Every optional field is resolved through an ordered fallback list; keys
//! whose source value is absent are left out entirely instead of being
//! emitted as null.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::config::Config;
use crate::model::{Category, Post};
use crate::resolve::Disambiguation;

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;
pub const DEFAULT_TWITTER_CARD: &str = "summary_large_image";
pub const DEFAULT_SECTION: &str = "News";
pub const NOT_FOUND_DESCRIPTION: &str = "The page you are looking for could not be found.";

/// Site-wide values the synthesizer falls back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    /// Public origin, without the `/api` suffix and trailing slash.
    pub base_url: String,
    pub name: String,
    pub locale: String,
    pub default_description: String,
    pub logo_url: Option<String>,
}

impl SiteInfo {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            base_url: cfg.public_base_url(),
            name: cfg.site.name.clone(),
            locale: cfg.site.locale.clone(),
            default_description: cfg.site.default_description.clone(),
            logo_url: cfg.site.logo_url.clone().filter(|u| !u.trim().is_empty()),
        }
    }

    pub fn page_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub og_type: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GoogleBot {
    pub index: bool,
    pub follow: bool,
    #[serde(rename = "max-video-preview")]
    pub max_video_preview: i32,
    #[serde(rename = "max-image-preview")]
    pub max_image_preview: String,
    #[serde(rename = "max-snippet")]
    pub max_snippet: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub google_bot: GoogleBot,
}

impl Default for Robots {
    fn default() -> Self {
        Self {
            index: true,
            follow: true,
            google_bot: GoogleBot {
                index: true,
                follow: true,
                max_video_preview: -1,
                max_image_preview: "large".into(),
                max_snippet: -1,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<TwitterCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<Robots>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_ld: Option<Value>,
}

/// First candidate that is present and not blank.
pub fn first_non_empty<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

/// `"mon-super-article"` -> `"Mon Super Article"`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn iso(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn post_title(post: &Post) -> String {
    match first_non_empty([post.seo.meta_title.as_deref(), Some(post.title.as_str())]) {
        Some(title) => title.to_string(),
        None => title_case_slug(&post.slug),
    }
}

fn post_description<'a>(post: &'a Post, site: &'a SiteInfo) -> &'a str {
    first_non_empty([
        post.seo.meta_description.as_deref(),
        post.excerpt.as_deref(),
        Some(site.default_description.as_str()),
    ])
    .unwrap_or(site.default_description.as_str())
}

fn post_canonical(post: &Post, site: &SiteInfo) -> String {
    match first_non_empty([post.seo.canonical_url.as_deref()]) {
        Some(url) => url.to_string(),
        None => site.page_url(&post.slug),
    }
}

fn section(post: &Post) -> &str {
    first_non_empty([post.category_ids.first().map(|c| c.name.as_str())]).unwrap_or(DEFAULT_SECTION)
}

/// Comma-joined tag names, or `None` when no tag has a name.
pub fn tag_keywords(post: &Post) -> Option<String> {
    let names: Vec<&str> = post
        .tag_ids
        .iter()
        .map(|t| t.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Metadata for a category listing. `category` may be absent when only the
/// slug is known.
pub fn category_metadata(site: &SiteInfo, category: Option<&Category>, slug: &str) -> PageMetadata {
    let title = first_non_empty([category.map(|c| c.name.as_str()), Some(slug)])
        .unwrap_or(slug)
        .to_string();
    let description = format!("Latest articles in {}", title);
    let url = site.page_url(slug);

    PageMetadata {
        title: title.clone(),
        description: description.clone(),
        keywords: None,
        canonical: Some(url.clone()),
        open_graph: Some(OpenGraph {
            title: title.clone(),
            description: description.clone(),
            og_type: "website".into(),
            url,
            site_name: site.name.clone(),
            locale: site.locale.clone(),
            images: vec![],
            published_time: None,
            modified_time: None,
            authors: vec![],
        }),
        twitter: Some(TwitterCard {
            card: DEFAULT_TWITTER_CARD.into(),
            title,
            description,
            images: vec![],
        }),
        robots: Some(Robots::default()),
        other: locale_pair(site),
        json_ld: None,
    }
}

fn locale_pair(site: &SiteInfo) -> BTreeMap<String, String> {
    let mut other = BTreeMap::new();
    other.insert("og:locale".to_string(), site.locale.clone());
    other.insert("og:site_name".to_string(), site.name.clone());
    other
}

/// Metadata for an article page, including its JSON-LD object.
pub fn post_metadata(site: &SiteInfo, post: &Post) -> PageMetadata {
    let title = post_title(post);
    let title = title.as_str();
    let description = post_description(post, site);
    let canonical = post_canonical(post, site);
    let meta_image = first_non_empty([post.seo.meta_image.as_deref()]);

    let og_title = first_non_empty([post.seo.og_title.as_deref(), Some(title)]).unwrap_or(title);
    let og_description =
        first_non_empty([post.seo.og_description.as_deref(), Some(description)])
            .unwrap_or(description);

    let open_graph = OpenGraph {
        title: og_title.to_string(),
        description: og_description.to_string(),
        og_type: "article".into(),
        url: canonical.clone(),
        site_name: site.name.clone(),
        locale: site.locale.clone(),
        images: meta_image
            .map(|url| OgImage {
                url: url.to_string(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: og_title.to_string(),
            })
            .into_iter()
            .collect(),
        published_time: iso(post.created_at),
        modified_time: iso(post.updated_at),
        authors: post.author_name().map(str::to_string).into_iter().collect(),
    };

    let twitter = TwitterCard {
        card: first_non_empty([post.seo.twitter_card.as_deref()])
            .unwrap_or(DEFAULT_TWITTER_CARD)
            .to_string(),
        title: first_non_empty([post.seo.twitter_title.as_deref(), Some(og_title)])
            .unwrap_or(og_title)
            .to_string(),
        description: first_non_empty([
            post.seo.twitter_description.as_deref(),
            Some(og_description),
        ])
        .unwrap_or(og_description)
        .to_string(),
        images: first_non_empty([post.seo.twitter_image.as_deref(), meta_image])
            .map(str::to_string)
            .into_iter()
            .collect(),
    };

    let mut other = BTreeMap::new();
    if let Some(keyword) = first_non_empty([post.seo.focus_keyword.as_deref()]) {
        other.insert("article:tag".to_string(), keyword.to_string());
    }
    other.insert(
        "article:author".to_string(),
        post.author_name().unwrap_or(site.name.as_str()).to_string(),
    );
    other.insert("article:section".to_string(), section(post).to_string());
    other.extend(locale_pair(site));
    if let Some(minutes) = post.seo.reading_time {
        other.insert("article:reading_time".to_string(), minutes.to_string());
    }

    PageMetadata {
        title: title.to_string(),
        description: description.to_string(),
        keywords: first_non_empty([post.seo.meta_keywords.as_deref()]).map(str::to_string),
        canonical: Some(canonical),
        open_graph: Some(open_graph),
        twitter: Some(twitter),
        robots: Some(Robots::default()),
        other,
        json_ld: Some(article_json_ld(site, post)),
    }
}

/// Fallback when the segment names neither a category nor a post.
pub fn not_found_metadata(slug: &str) -> PageMetadata {
    PageMetadata {
        title: title_case_slug(slug),
        description: NOT_FOUND_DESCRIPTION.to_string(),
        keywords: None,
        canonical: None,
        open_graph: None,
        twitter: None,
        robots: None,
        other: BTreeMap::new(),
        json_ld: None,
    }
}

/// schema.org `Article` object for a post.
pub fn article_json_ld(site: &SiteInfo, post: &Post) -> Value {
    let canonical = post_canonical(post, site);
    let mut ld = Map::new();
    ld.insert("@context".into(), json!("https://schema.org"));
    ld.insert("@type".into(), json!("Article"));
    ld.insert("headline".into(), json!(post_title(post)));
    ld.insert("description".into(), json!(post_description(post, site)));
    ld.insert(
        "author".into(),
        json!({
            "@type": "Person",
            "name": post.author_name().unwrap_or(site.name.as_str()),
        }),
    );

    let mut publisher = Map::new();
    publisher.insert("@type".into(), json!("Organization"));
    publisher.insert("name".into(), json!(site.name));
    if let Some(logo) = site.logo_url.as_deref() {
        publisher.insert(
            "logo".into(),
            json!({ "@type": "ImageObject", "url": logo }),
        );
    }
    ld.insert("publisher".into(), Value::Object(publisher));

    if let Some(published) = iso(post.created_at) {
        ld.insert("datePublished".into(), json!(published));
    }
    if let Some(modified) = iso(post.updated_at) {
        ld.insert("dateModified".into(), json!(modified));
    }
    ld.insert(
        "mainEntityOfPage".into(),
        json!({ "@type": "WebPage", "@id": canonical }),
    );
    if let Some(image) = first_non_empty([post.seo.meta_image.as_deref()]) {
        ld.insert(
            "image".into(),
            json!({
                "@type": "ImageObject",
                "url": image,
                "width": OG_IMAGE_WIDTH,
                "height": OG_IMAGE_HEIGHT,
            }),
        );
    }

    let sections: Vec<&str> = post
        .category_ids
        .iter()
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    ld.insert("articleSection".into(), json!(sections));

    if let Some(keywords) = tag_keywords(post) {
        ld.insert("keywords".into(), json!(keywords));
    }
    if let Some(minutes) = post.seo.reading_time {
        ld.insert("timeRequired".into(), json!(format!("PT{}M", minutes)));
    }
    Value::Object(ld)
}

/// Pick the metadata flavour for a disambiguated segment. Any category match,
/// nested or not, is described as a category; otherwise the post, otherwise
/// the not-found fallback.
pub fn synthesize(site: &SiteInfo, found: &Disambiguation<'_>, slug: &str) -> PageMetadata {
    if let Some(category) = found.top_level_category() {
        return category_metadata(site, Some(category), slug);
    }
    if let Some(post) = found.post {
        return post_metadata(site, post);
    }
    if let Some(category) = found.category {
        return category_metadata(site, Some(category), slug);
    }
    not_found_metadata(slug)
}

impl PageMetadata {
    /// Render as a `<head>` fragment. Every value is HTML-escaped.
    pub fn to_head_html(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("<title>{}</title>\n", html_escape(&self.title)));
        push_meta(&mut out, "name", "description", &self.description);
        if let Some(keywords) = &self.keywords {
            push_meta(&mut out, "name", "keywords", keywords);
        }
        if let Some(canonical) = &self.canonical {
            out.push_str(&format!(
                "<link rel=\"canonical\" href=\"{}\" />\n",
                html_attr(canonical)
            ));
        }
        if let Some(robots) = &self.robots {
            push_meta(&mut out, "name", "robots", &directives(robots.index, robots.follow));
            let gb = &robots.google_bot;
            let google = format!(
                "{}, max-video-preview:{}, max-image-preview:{}, max-snippet:{}",
                directives(gb.index, gb.follow),
                gb.max_video_preview,
                gb.max_image_preview,
                gb.max_snippet
            );
            push_meta(&mut out, "name", "googlebot", &google);
        }
        if let Some(og) = &self.open_graph {
            push_meta(&mut out, "property", "og:title", &og.title);
            push_meta(&mut out, "property", "og:description", &og.description);
            push_meta(&mut out, "property", "og:type", &og.og_type);
            push_meta(&mut out, "property", "og:url", &og.url);
            for image in &og.images {
                push_meta(&mut out, "property", "og:image", &image.url);
                push_meta(&mut out, "property", "og:image:width", &image.width.to_string());
                push_meta(&mut out, "property", "og:image:height", &image.height.to_string());
                push_meta(&mut out, "property", "og:image:alt", &image.alt);
            }
            if let Some(t) = &og.published_time {
                push_meta(&mut out, "property", "article:published_time", t);
            }
            if let Some(t) = &og.modified_time {
                push_meta(&mut out, "property", "article:modified_time", t);
            }
            for author in &og.authors {
                push_meta(&mut out, "property", "article:author", author);
            }
        }
        if let Some(tw) = &self.twitter {
            push_meta(&mut out, "name", "twitter:card", &tw.card);
            push_meta(&mut out, "name", "twitter:title", &tw.title);
            push_meta(&mut out, "name", "twitter:description", &tw.description);
            for image in &tw.images {
                push_meta(&mut out, "name", "twitter:image", image);
            }
        }
        for (key, value) in &self.other {
            // Open Graph already emits the author list when it is known.
            let duplicate = key == "article:author"
                && self
                    .open_graph
                    .as_ref()
                    .is_some_and(|og| og.authors.iter().any(|a| a == value));
            if !duplicate {
                push_meta(&mut out, "property", key, value);
            }
        }
        if let Some(ld) = &self.json_ld {
            // `<` can only occur inside JSON strings here.
            let body = serde_json::to_string(ld)
                .unwrap_or_default()
                .replace('<', "\\u003c");
            out.push_str(&format!(
                "<script type=\"application/ld+json\">{}</script>\n",
                body
            ));
        }
        out
    }
}

fn directives(index: bool, follow: bool) -> String {
    format!(
        "{}, {}",
        if index { "index" } else { "noindex" },
        if follow { "follow" } else { "nofollow" }
    )
}

fn push_meta(out: &mut String, attr: &str, key: &str, content: &str) {
    out.push_str(&format!(
        "<meta {}=\"{}\" content=\"{}\" />\n",
        attr,
        html_attr(key),
        html_attr(content)
    ));
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn html_attr(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, AuthorRef, PostStatus, SeoFields, Tag};
    use chrono::TimeZone;

    fn site() -> SiteInfo {
        SiteInfo {
            base_url: "https://example.com".into(),
            name: "Le Journal".into(),
            locale: "fr_FR".into(),
            default_description: "Toute l'actualité".into(),
            logo_url: None,
        }
    }

    fn post() -> Post {
        Post {
            id: "p1".into(),
            title: "Mon article".into(),
            slug: "mon-article".into(),
            content: "<p>corps</p>".into(),
            excerpt: None,
            status: PostStatus::Published,
            category_ids: vec![],
            tag_ids: vec![],
            author_id: None,
            created_at: None,
            updated_at: None,
            image_urls: vec![],
            seo: SeoFields::default(),
        }
    }

    fn tag(name: &str) -> Tag {
        Tag {
            id: name.into(),
            name: name.into(),
            slug: name.into(),
        }
    }

    #[test]
    fn first_non_empty_skips_missing_and_blank() {
        assert_eq!(first_non_empty([None, Some(""), Some("  "), Some("b")]), Some("b"));
        assert_eq!(first_non_empty([None::<&str>, None]), None);
    }

    #[test]
    fn title_case_slug_capitalizes_each_word() {
        assert_eq!(title_case_slug("mon-super-article"), "Mon Super Article");
        assert_eq!(title_case_slug("été--chaud"), "Été Chaud");
        assert_eq!(title_case_slug(""), "");
    }

    #[test]
    fn title_falls_back_to_post_title() {
        let meta = post_metadata(&site(), &post());
        assert_eq!(meta.title, "Mon article");
        assert_eq!(meta.description, "Toute l'actualité");

        let mut p = post();
        p.seo.meta_title = Some("Titre SEO".into());
        p.excerpt = Some("Résumé".into());
        let meta = post_metadata(&site(), &p);
        assert_eq!(meta.title, "Titre SEO");
        assert_eq!(meta.description, "Résumé");
        let og = meta.open_graph.unwrap();
        assert_eq!(og.title, "Titre SEO");
        assert_eq!(og.description, "Résumé");
        assert_eq!(og.og_type, "article");
    }

    #[test]
    fn empty_titles_fall_back_to_slug() {
        let mut p = post();
        p.title = "".into();
        p.seo.meta_title = Some(" ".into());
        let meta = post_metadata(&site(), &p);
        assert_eq!(meta.title, "Mon Article");
        assert_eq!(meta.json_ld.unwrap()["headline"], "Mon Article");
    }

    #[test]
    fn optional_open_graph_keys_are_omitted() {
        let meta = post_metadata(&site(), &post());
        let value = serde_json::to_value(&meta).unwrap();
        let og = &value["openGraph"];
        assert!(og.get("images").is_none());
        assert!(og.get("publishedTime").is_none());
        assert!(og.get("modifiedTime").is_none());
        assert!(og.get("authors").is_none());
        assert!(value["twitter"].get("images").is_none());
        assert_eq!(value["twitter"]["card"], "summary_large_image");
        assert!(meta.other.get("article:tag").is_none());
        assert!(meta.other.get("article:reading_time").is_none());
        assert_eq!(meta.other["article:author"], "Le Journal");
        assert_eq!(meta.other["article:section"], "News");
        assert_eq!(meta.other["og:locale"], "fr_FR");
    }

    #[test]
    fn full_post_populates_every_block() {
        let mut p = post();
        p.seo.meta_image = Some("https://cdn/og.jpg".into());
        p.seo.focus_keyword = Some("santé".into());
        p.seo.reading_time = Some(6);
        p.seo.twitter_card = Some("summary".into());
        p.author_id = Some(AuthorRef::Populated(Author {
            id: "u1".into(),
            name: Some("Awa Diop".into()),
        }));
        p.created_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
        p.updated_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap());
        p.category_ids = vec![Category {
            id: "c1".into(),
            name: "Santé".into(),
            slug: "sante".into(),
            parent_id: None,
        }];

        let meta = post_metadata(&site(), &p);
        let og = meta.open_graph.as_ref().unwrap();
        assert_eq!(og.images.len(), 1);
        assert_eq!(og.images[0].width, 1200);
        assert_eq!(og.images[0].height, 630);
        assert_eq!(og.published_time.as_deref(), Some("2024-03-01T10:00:00.000Z"));
        assert_eq!(og.modified_time.as_deref(), Some("2024-03-02T09:30:00.000Z"));
        assert_eq!(og.authors, vec!["Awa Diop".to_string()]);

        let tw = meta.twitter.as_ref().unwrap();
        assert_eq!(tw.card, "summary");
        assert_eq!(tw.images, vec!["https://cdn/og.jpg".to_string()]);

        assert_eq!(meta.other["article:tag"], "santé");
        assert_eq!(meta.other["article:author"], "Awa Diop");
        assert_eq!(meta.other["article:section"], "Santé");
        assert_eq!(meta.other["article:reading_time"], "6");
    }

    #[test]
    fn canonical_prefers_explicit_url() {
        let mut p = post();
        p.seo.canonical_url = Some("https://elsewhere.org/a".into());
        let meta = post_metadata(&site(), &p);
        assert_eq!(meta.open_graph.unwrap().url, "https://elsewhere.org/a");

        let meta = post_metadata(&site(), &post());
        assert_eq!(meta.canonical.as_deref(), Some("https://example.com/mon-article"));
    }

    #[test]
    fn json_ld_keywords_and_duration() {
        let mut p = post();
        p.tag_ids = vec![tag("covid"), tag(""), tag("vaccin")];
        p.seo.reading_time = Some(4);
        let ld = article_json_ld(&site(), &p);
        assert_eq!(ld["@type"], "Article");
        assert_eq!(ld["keywords"], "covid, vaccin");
        assert_eq!(ld["timeRequired"], "PT4M");
        assert_eq!(ld["author"]["name"], "Le Journal");
        assert_eq!(ld["publisher"]["name"], "Le Journal");
        assert!(ld["publisher"].get("logo").is_none());
        assert!(ld.get("image").is_none());
        assert!(ld.get("datePublished").is_none());
        assert_eq!(ld["articleSection"], json!([]));
    }

    #[test]
    fn only_empty_names_are_dropped_from_keywords_and_sections() {
        let mut p = post();
        p.tag_ids = vec![tag("covid"), tag(""), tag(" ")];
        p.category_ids = vec![
            Category {
                id: "c1".into(),
                name: "".into(),
                slug: "vide".into(),
                parent_id: None,
            },
            Category {
                id: "c2".into(),
                name: " ".into(),
                slug: "blanc".into(),
                parent_id: None,
            },
        ];
        assert_eq!(tag_keywords(&p).as_deref(), Some("covid,  "));
        let ld = article_json_ld(&site(), &p);
        assert_eq!(ld["keywords"], "covid,  ");
        assert_eq!(ld["articleSection"], json!([" "]));
    }

    #[test]
    fn json_ld_omits_keywords_without_tags() {
        let ld = article_json_ld(&site(), &post());
        assert!(ld.get("keywords").is_none());
        assert!(ld.get("timeRequired").is_none());
    }

    #[test]
    fn category_metadata_falls_back_to_slug() {
        let meta = category_metadata(&site(), None, "sante");
        assert_eq!(meta.title, "sante");
        assert_eq!(meta.open_graph.unwrap().url, "https://example.com/sante");
    }

    #[test]
    fn not_found_uses_title_cased_slug() {
        let meta = not_found_metadata("page-introuvable");
        assert_eq!(meta.title, "Page Introuvable");
        assert_eq!(meta.description, NOT_FOUND_DESCRIPTION);
        assert!(meta.open_graph.is_none());
    }

    #[test]
    fn head_html_escapes_values_and_embeds_json_ld() {
        let mut p = post();
        p.title = "Tom & \"Jerry\" <script>".into();
        let html = post_metadata(&site(), &p).to_head_html();
        assert!(html.contains("<title>Tom &amp; \"Jerry\" &lt;script&gt;</title>"));
        assert!(html.contains(
            "<meta property=\"og:title\" content=\"Tom &amp; &quot;Jerry&quot; &lt;script&gt;\" />"
        ));
        assert!(html.contains("<script type=\"application/ld+json\">"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(
            "<meta name=\"googlebot\" content=\"index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1\" />"
        ));
    }
}
