use axum::{
    extract::{Path, Query, State},
    response::Html,
};

use super::{PageQuery, parse_id};
use crate::domain::blog::BLOG_PAGE_SIZE;
use crate::domain::pagination::PageRequest;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::views::blog::{blog_content_page, blog_list_page};

pub(crate) async fn blog_display(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let request = PageRequest::from_query(query.page.as_deref(), BLOG_PAGE_SIZE);
    let posts = state.blog_service.list_posts(request).await?;

    Ok(blog_list_page(&posts))
}

pub(crate) async fn blog_content(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Html<String>> {
    let id = parse_id(&raw_id)?;
    let post = state.blog_service.get_post(id).await?;
    let shown_at = state.site.display_offset.apply(post.created_at);

    Ok(blog_content_page(&post, shown_at))
}
