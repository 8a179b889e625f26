use axum::response::Html;
use chrono::{DateTime, FixedOffset};

use super::{TIMESTAMP_FORMAT, escape, layout, pager};
use crate::domain::blog::Blog;
use crate::domain::pagination::Paginated;

/// Post list. Timestamps are shown as stored (UTC), without the display
/// offset the single-post view applies.
pub(crate) fn blog_list_page(posts: &Paginated<Blog>) -> Html<String> {
    let mut body = String::from("<h1>Blog</h1>\n");
    if posts.items.is_empty() {
        body.push_str("<p>No posts on this page.</p>\n");
    }
    for post in &posts.items {
        body.push_str(&format!(
            "<article><h2><a href=\"/blogContent/{id}\">{title}</a></h2><time>{at}</time></article>\n",
            id = post.id,
            title = escape(&post.title),
            at = post.created_at.format(TIMESTAMP_FORMAT),
        ));
    }
    body.push_str(&pager(posts, "/blogDisplay?"));

    layout("Blog", "", &body)
}

pub(crate) fn blog_content_page(post: &Blog, shown_at: DateTime<FixedOffset>) -> Html<String> {
    let body = format!(
        "<article>\n<h1>{title}</h1>\n<time>{at}</time>\n<div class=\"content\">{text}</div>\n</article>\n<p><a href=\"/blogDisplay\">Back to all posts</a></p>\n",
        title = escape(&post.title),
        at = shown_at.format(TIMESTAMP_FORMAT),
        text = post.text,
    );

    layout(&post.title, "", &body)
}
