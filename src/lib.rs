//! Slug resolution and server-side data assembly for a news site backed by a
//! remote content API.
//!
//! A request path segment is looked up as a category and as a post
//! ([`resolve`]), the matching page bundle is fetched ([`assemble`]), and the
//! page `<head>` metadata plus JSON-LD are derived from it ([`metadata`]).
//! [`page::PageResolver`] ties the three together per request.

pub mod api;
pub mod assemble;
pub mod config;
pub mod context;
pub mod metadata;
pub mod model;
pub mod page;
pub mod resolve;
pub mod sitemap;
