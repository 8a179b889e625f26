use std::sync::Arc;

use axum::response::Html;

use super::{escape, field_errors, flash_notice, layout, pager};
use crate::domain::pagination::Paginated;
use crate::presentation::http::admin::{AdminRow, AdminView, FieldKind, FormField};
use crate::presentation::http::flash::Flash;
use crate::presentation::http::forms::{FieldErrors, FormValues};

pub(crate) enum FormMode {
    Create,
    Edit(i64),
}

pub(crate) fn index_page(views: &[Arc<dyn AdminView>], username: &str) -> Html<String> {
    let mut body = format!(
        "<h1>Admin</h1>\n<p>Signed in as {}.</p>\n<form method=\"post\" action=\"/admin/logout\"><button type=\"submit\">Log out</button></form>\n<ul>\n",
        escape(username)
    );
    for view in views {
        body.push_str(&format!(
            "<li><a href=\"/admin/{}\">{}</a></li>\n",
            view.slug(),
            escape(view.name())
        ));
    }
    body.push_str("</ul>\n");

    layout("Admin", "", &body)
}

pub(crate) fn list_page(
    view: &dyn AdminView,
    rows: &Paginated<AdminRow>,
    flash: Option<Flash>,
) -> Html<String> {
    let slug = view.slug();
    let mut body = format!(
        "<h1>{}</h1>\n<p><a href=\"/admin\">Admin</a> | <a href=\"/admin/{slug}/new\">Create</a></p>\n",
        escape(view.name())
    );
    body.push_str(&flash_notice(flash));

    body.push_str("<table>\n<tr>");
    for column in view.columns() {
        body.push_str(&format!("<th>{}</th>", escape(column)));
    }
    body.push_str("<th></th></tr>\n");

    for row in &rows.items {
        body.push_str("<tr>");
        for cell in &row.cells {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str(&format!(
            "<td><a href=\"/admin/{slug}/{id}/edit\">Edit</a> \
             <form method=\"post\" action=\"/admin/{slug}/{id}/delete\" style=\"display:inline\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            id = row.id
        ));
    }
    body.push_str("</table>\n");
    body.push_str(&pager(rows, &format!("/admin/{slug}?")));

    layout(view.name(), "", &body)
}

/// Shared create/edit form.
pub(crate) fn form_page(
    view: &dyn AdminView,
    mode: &FormMode,
    values: &FormValues,
    errors: &FieldErrors,
    editor_url: Option<&str>,
) -> Html<String> {
    let slug = view.slug();
    let (heading, action) = match mode {
        FormMode::Create => (
            format!("Create {}", view.name()),
            format!("/admin/{slug}/new"),
        ),
        FormMode::Edit(id) => (
            format!("Edit {} #{id}", view.name()),
            format!("/admin/{slug}/{id}/edit"),
        ),
    };

    let mut body = format!("<h1>{}</h1>\n", escape(&heading));
    if !errors.is_empty() {
        body.push_str("<p class=\"error\">Please correct the errors below.</p>\n");
    }
    body.push_str(&format!("<form method=\"post\" action=\"{action}\">\n"));
    for field in view.form_fields() {
        let value = values.get(field.name).map(String::as_str).unwrap_or_default();
        body.push_str(&format!(
            "<p><label>{label} {input}</label>{errors}</p>\n",
            label = escape(field.label),
            input = field_input(field, value),
            errors = field_errors(errors, field.name),
        ));
    }
    body.push_str(&format!(
        "<p><button type=\"submit\">Save</button> <a href=\"/admin/{slug}\">Cancel</a></p>\n</form>\n"
    ));

    let has_rich_text = view
        .form_fields()
        .iter()
        .any(|field| field.kind == FieldKind::RichText);
    let head = match editor_url {
        Some(url) if has_rich_text => {
            format!("<script src=\"{}\"></script>\n", escape(url))
        }
        _ => String::new(),
    };

    layout(&heading, &head, &body)
}

fn field_input(field: &FormField, value: &str) -> String {
    // The editor widget hides its textarea, so browser-side `required` would
    // block submission; the server-side draft validation covers it.
    let required = if field.required && field.kind != FieldKind::RichText {
        " required"
    } else {
        ""
    };
    let maxlength = field
        .max_chars
        .map(|max| format!(" maxlength=\"{max}\""))
        .unwrap_or_default();
    match field.kind {
        FieldKind::Text => format!(
            "<input name=\"{}\" value=\"{}\"{maxlength}{required}>",
            field.name,
            escape(value)
        ),
        FieldKind::Email => format!(
            "<input type=\"email\" name=\"{}\" value=\"{}\"{maxlength}{required}>",
            field.name,
            escape(value)
        ),
        FieldKind::RichText => format!(
            "<textarea class=\"ckeditor\" data-rich-text=\"true\" name=\"{}\" rows=\"16\"{required}>{}</textarea>",
            field.name,
            escape(value)
        ),
    }
}

pub(crate) fn login_page(username: &str, error: Option<&str>) -> Html<String> {
    let error = error
        .map(|message| format!("<p class=\"error\">{}</p>\n", escape(message)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Admin login</h1>
{error}<form method="post" action="/admin/login">
<p><label>Username <input name="username" maxlength="20" value="{username}" required></label></p>
<p><label>Password <input type="password" name="password" required></label></p>
<p><button type="submit">Log in</button></p>
</form>
"#,
        username = escape(username),
    );

    layout("Admin login", "", &body)
}

#[cfg(test)]
mod tests {
    use super::field_input;
    use crate::presentation::http::admin::{FieldKind, FormField};

    #[test]
    fn rich_text_fields_render_as_editor_textarea() {
        let field = FormField {
            name: "text",
            label: "Text",
            kind: FieldKind::RichText,
            required: true,
            max_chars: None,
        };

        let html = field_input(&field, "<p>hi</p>");
        assert!(html.starts_with("<textarea class=\"ckeditor\""));
        assert!(html.contains("&lt;p&gt;hi&lt;/p&gt;"));
        assert!(!html.contains("required"));
    }

    #[test]
    fn text_fields_carry_their_bounds() {
        let field = FormField {
            name: "title",
            label: "Title",
            kind: FieldKind::Text,
            required: true,
            max_chars: Some(120),
        };

        let html = field_input(&field, "a \"quoted\" title");
        assert!(html.contains("maxlength=\"120\""));
        assert!(html.contains("value=\"a &quot;quoted&quot; title\""));
        assert!(html.ends_with(" required>"));
    }
}
