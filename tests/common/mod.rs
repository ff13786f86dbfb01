//! Common test utilities for integration tests

/// Builds a tag-archive listing page with one `article > h2 > a` heading
/// per (title, href) pair.
#[allow(dead_code)]
pub fn listing_page_html(entries: &[(&str, &str)]) -> String {
    let articles: String = entries
        .iter()
        .map(|(title, href)| {
            format!("<article><h2><a href=\"{href}\">{title}</a></h2></article>\n")
        })
        .collect();
    format!("<html><body>\n{articles}</body></html>")
}

/// Builds an archive post page with one `li > a` entry per href.
#[allow(dead_code)]
pub fn archive_page_html(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!("<li><a href=\"{href}\">{href}</a></li>\n"))
        .collect();
    format!("<html><body><ul>\n{items}</ul></body></html>")
}
