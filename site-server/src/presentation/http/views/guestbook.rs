use axum::response::Html;

use super::{TIMESTAMP_FORMAT, escape, field_errors, flash_notice, layout, pager};
use crate::domain::message::Message;
use crate::domain::pagination::Paginated;
use crate::presentation::http::flash::Flash;
use crate::presentation::http::forms::FieldErrors;

/// Values echoed back into the form after a failed submission.
#[derive(Debug, Default, Clone)]
pub(crate) struct GuestbookForm<'a> {
    pub(crate) name: &'a str,
    pub(crate) mail: &'a str,
    pub(crate) content: &'a str,
}

pub(crate) fn guestbook_page(
    form: &GuestbookForm<'_>,
    errors: &FieldErrors,
    flash: Option<Flash>,
    messages: &Paginated<Message>,
) -> Html<String> {
    let mut body = String::from("<h1>Guestbook</h1>\n");
    body.push_str(&flash_notice(flash));
    body.push_str(&format!(
        r#"<form method="post" action="/">
<p><label>Name <input name="name" maxlength="20" value="{name}"></label>{name_err}</p>
<p><label>Mail <input name="mail" type="email" maxlength="40" value="{mail}"></label>{mail_err}</p>
<p><label>Message <textarea name="content" maxlength="200">{content}</textarea></label>{content_err}</p>
<p><button type="submit">Submit</button></p>
</form>
"#,
        name = escape(form.name),
        mail = escape(form.mail),
        content = escape(form.content),
        name_err = field_errors(errors, "name"),
        mail_err = field_errors(errors, "mail"),
        content_err = field_errors(errors, "content"),
    ));

    // Bodies are shown as text even after an admin edits them through the
    // rich-text widget; visitors submit these, so markup is never trusted.
    body.push_str(&format!("<h2>Messages ({})</h2>\n", messages.total));
    if messages.items.is_empty() {
        body.push_str("<p>No messages yet.</p>\n");
    } else {
        body.push_str("<ul class=\"messages\">\n");
        for message in &messages.items {
            body.push_str(&format!(
                "<li><strong>{}</strong> <time>{}</time><p>{}</p></li>\n",
                escape(&message.name),
                message.created_at.format(TIMESTAMP_FORMAT),
                escape(&message.body)
            ));
        }
        body.push_str("</ul>\n");
        body.push_str(&pager(messages, "/?"));
    }

    layout("Guestbook", "", &body)
}
