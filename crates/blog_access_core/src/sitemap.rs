//! sitemaps.org XML rendering for the public blog.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;

use crate::ports::PostRecord;

/// Pages that exist regardless of content.
pub const STATIC_PATHS: [&str; 3] = ["/", "/pricing", "/blog"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub path: String,
    pub last_modified: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    pub fn for_post(post: &PostRecord) -> Self {
        Self {
            path: format!("/blog/{}", post.slug),
            last_modified: Some(post.updated_at),
        }
    }
}

/// Static pages followed by one entry per published post.
pub fn entries_for(posts: &[PostRecord]) -> Vec<SitemapEntry> {
    STATIC_PATHS
        .iter()
        .map(|p| SitemapEntry {
            path: (*p).to_string(),
            last_modified: None,
        })
        .chain(
            posts
                .iter()
                .filter(|p| p.published)
                .map(SitemapEntry::for_post),
        )
        .collect()
}

pub fn render_sitemap(base_url: &str, entries: &[SitemapEntry]) -> Result<String, std::fmt::Error> {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::new();

    writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        xml,
        r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#
    )?;
    for entry in entries {
        let loc = format!("{base}{}", entry.path);
        writeln!(xml, "  <url>")?;
        writeln!(xml, "    <loc>{}</loc>", escape(loc.as_str()))?;
        if let Some(ts) = entry.last_modified {
            writeln!(xml, "    <lastmod>{}</lastmod>", ts.format("%Y-%m-%d"))?;
        }
        writeln!(xml, "  </url>")?;
    }
    writeln!(xml, "</urlset>")?;

    Ok(xml)
}
