use axum::http::StatusCode;
use axum::response::Html;

use super::{escape, layout};

pub(crate) fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n",
        status.as_u16(),
        escape(reason),
        escape(message)
    );
    layout(reason, "", &body)
}
