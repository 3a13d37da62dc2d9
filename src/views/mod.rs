//! Server-rendered HTML pages.
//!
//! Pages are assembled from plain strings; every value that came from a
//! user goes through [`escape`] first.

pub mod format;
pub mod pages;

use axum::http::StatusCode;
use axum::response::Html;

pub use pages::{dashboard_page, index_page, users_page};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
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

/// Wrap page content in the shared document shell.
pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Job Tracker</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
    ))
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let heading = status.canonical_reason().unwrap_or("Error");
    layout(
        heading,
        &format!(
            "<main>\n<h1>{} {}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>\n</main>",
            status.as_u16(),
            escape(heading),
            escape(message)
        ),
    )
}
