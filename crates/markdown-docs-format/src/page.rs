//! HTML page templates for the listing, detail and not-found views.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::escape::escape_html;

use crate::model::Catalog;
use crate::names::format_name;

/// Characters that must be encoded inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#f1f5f9;color:#1e293b}\
main{max-width:80rem;margin:0 auto;padding:3rem 2rem}\
header.hub{text-align:center;margin-bottom:4rem}\
header.hub h1{font-size:3rem;margin:0 0 1rem}\
header.hub p{font-size:1.25rem;color:#475569}\
.grid{display:grid;gap:2rem;grid-template-columns:repeat(auto-fill,minmax(20rem,1fr))}\
.card{background:#fff;border-radius:.5rem;box-shadow:0 4px 6px rgba(0,0,0,.1);padding:1.5rem}\
.card h2{margin:0 0 1rem;padding-bottom:.75rem;border-bottom:2px solid #3b82f6}\
.card a{display:block;padding:.5rem 1rem;color:#334155;text-decoration:none;border-radius:.375rem}\
.card a:hover{background:#eff6ff;color:#2563eb}\
.empty{color:#64748b;font-style:italic}\
article.markdown{background:#fff;padding:2rem 3rem;border-radius:.5rem}\
article.markdown pre{background:#0f172a;color:#e2e8f0;padding:1rem;overflow-x:auto}\
nav.back{margin-bottom:1.5rem}";

pub(crate) fn push_escaped(out: &mut String, text: &str) {
    // Writes into a String cannot fail.
    let _ = escape_html(&mut *out, text);
}

/// Build the link target for a descriptor path under `route_prefix`.
pub fn document_href(route_prefix: &str, descriptor_path: &str) -> String {
    let mut href = String::from(route_prefix);
    for segment in descriptor_path.split('/').filter(|s| !s.is_empty()) {
        href.push('/');
        href.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    href
}

pub(crate) fn layout(title: &str, body: &str) -> String {
    let mut page = String::with_capacity(body.len() + STYLE.len() + 256);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str("<title>");
    push_escaped(&mut page, title);
    page.push_str("</title>\n<style>");
    page.push_str(STYLE);
    page.push_str("</style>\n</head>\n<body>\n<main>\n");
    page.push_str(body);
    page.push_str("</main>\n</body>\n</html>\n");
    page
}

pub(crate) fn index_body(
    catalog: &Catalog,
    title: &str,
    tagline: &str,
    category_suffix: &str,
    route_prefix: &str,
) -> String {
    let mut body = String::new();
    body.push_str("<header class=\"hub\">\n<h1>");
    push_escaped(&mut body, title);
    body.push_str("</h1>\n");
    if !tagline.is_empty() {
        body.push_str("<p>");
        push_escaped(&mut body, tagline);
        body.push_str("</p>\n");
    }
    body.push_str("</header>\n");

    if catalog.is_empty() {
        body.push_str("<p class=\"empty\">No documentation found</p>\n");
        return body;
    }

    body.push_str("<div class=\"grid\">\n");
    for (category, documents) in catalog {
        body.push_str("<section class=\"card\">\n<h2>");
        let heading = if category_suffix.is_empty() {
            format_name(category)
        } else {
            format!("{} {}", format_name(category), category_suffix)
        };
        push_escaped(&mut body, &heading);
        body.push_str("</h2>\n");

        if documents.is_empty() {
            body.push_str("<p class=\"empty\">No documents available</p>\n");
        } else {
            body.push_str("<nav>\n");
            for document in documents {
                body.push_str("<a href=\"");
                push_escaped(&mut body, &document_href(route_prefix, &document.path));
                body.push_str("\">");
                push_escaped(&mut body, &format_name(&document.name));
                body.push_str("</a>\n");
            }
            body.push_str("</nav>\n");
        }
        body.push_str("</section>\n");
    }
    body.push_str("</div>\n");
    body
}

pub(crate) fn document_body(site_title: &str, html: &str) -> String {
    let mut body = String::with_capacity(html.len() + 128);
    body.push_str("<nav class=\"back\"><a href=\"/\">&larr; ");
    push_escaped(&mut body, site_title);
    body.push_str("</a></nav>\n<article class=\"markdown\">\n");
    body.push_str(html);
    body.push_str("</article>\n");
    body
}

pub(crate) fn not_found_body(site_title: &str) -> String {
    let mut body = String::from("<header class=\"hub\">\n<h1>404</h1>\n");
    body.push_str("<p>This document could not be found.</p>\n");
    body.push_str("<p><a href=\"/\">Back to ");
    push_escaped(&mut body, site_title);
    body.push_str("</a></p>\n</header>\n");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_encodes_each_segment() {
        assert_eq!(document_href("/docs", "/dart/sub/topic"), "/docs/dart/sub/topic");
        assert_eq!(
            document_href("/docs", "/c++/what is #1?"),
            "/docs/c++/what%20is%20%231%3F"
        );
    }

    #[test]
    fn escapes_markup_characters() {
        let mut out = String::new();
        push_escaped(&mut out, "<a & \"b\">");
        assert_eq!(out, "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
