//! Server-rendered pages. Every value coming from a record or a request is
//! escaped except rich-text post bodies, which are authored in the admin.

pub(crate) mod admin;
pub(crate) mod blog;
pub(crate) mod error;
pub(crate) mod guestbook;

use axum::response::Html;

use super::flash::Flash;
use super::forms::FieldErrors;
use crate::domain::pagination::Paginated;

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn layout(title: &str, head: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head}</head>
<body>
<nav><a href="/">Guestbook</a> | <a href="/blogDisplay">Blog</a> | <a href="/admin">Admin</a></nav>
<main>
{body}</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

pub(crate) fn flash_notice(flash: Option<Flash>) -> String {
    flash
        .map(|flash| format!("<p class=\"flash\">{}</p>\n", escape(flash.text())))
        .unwrap_or_default()
}

pub(crate) fn field_errors(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .iter()
        .map(|message| format!("<span class=\"error\">{}</span>", escape(message)))
        .collect()
}

/// Prev/next links plus "page X of Y". `base` must already carry its `?` or `&`.
pub(crate) fn pager<T>(page: &Paginated<T>, base: &str) -> String {
    let mut out = String::from("<nav class=\"pager\">");
    if page.has_prev() {
        out.push_str(&format!(
            "<a href=\"{base}page={}\">&laquo; Previous</a> ",
            page.page - 1
        ));
    }
    out.push_str(&format!(
        "<span>Page {} of {}</span>",
        page.page,
        page.total_pages().max(1)
    ));
    if page.has_next() {
        out.push_str(&format!(
            " <a href=\"{base}page={}\">Next &raquo;</a>",
            page.page + 1
        ));
    }
    out.push_str("</nav>\n");
    out
}
