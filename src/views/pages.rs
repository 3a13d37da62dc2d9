use std::fmt::Write as _;

use axum::response::Html;

use super::format::{dollar, mmddyyyy};
use super::{escape, layout};
use crate::db::{DbApplication, DbUser, Page};

/// Labels offered by the status picker. Stored as free text.
pub const STATUS_OPTIONS: [&str; 5] = ["Applied", "Interviewing", "Offer", "Rejected", "Ghosted"];

/// Landing page with the login and register forms.
pub fn index_page(error: Option<&str>) -> Html<String> {
    let mut body = String::from("<main>\n<h1>Job Tracker</h1>\n");
    if let Some(error) = error {
        let _ = writeln!(body, r#"<p class="error" role="alert">{}</p>"#, escape(error));
    }
    for (action, label) in [("/login", "Log in"), ("/register", "Register")] {
        let _ = write!(
            body,
            r#"<form method="post" action="{action}">
<h2>{label}</h2>
<label>Username <input type="text" name="username" maxlength="25"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">{label}</button>
</form>
"#
        );
    }
    body.push_str("</main>");
    layout("Welcome", &body)
}

pub fn dashboard_page(username: &str, applications: &Page<DbApplication>) -> Html<String> {
    let mut body = format!(
        "<header>\n<h1>{}'s applications</h1>\n<a href=\"/logout\">Log out</a>\n</header>\n<main>\n",
        escape(username)
    );
    body.push_str(&add_form());

    if applications.items.is_empty() {
        body.push_str("<p>No applications yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Company</th><th>Job title</th><th>Salary</th>\
             <th>Location</th><th>Status</th><th>Date</th><th></th></tr></thead>\n<tbody>\n",
        );
        for app in &applications.items {
            let _ = writeln!(
                body,
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><form method="post" action="/delete_application/{}"><button type="submit">Delete</button></form></td></tr>"#,
                escape(&app.company),
                escape(&app.job_title),
                dollar(app.salary),
                escape(&app.location),
                escape(&app.application_status),
                mmddyyyy(app.application_date),
                app.id,
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }
    body.push_str(&pager("/dashboard", applications));
    body.push_str("</main>");
    layout("Dashboard", &body)
}

pub fn users_page(users: &Page<DbUser>) -> Html<String> {
    let mut body = format!("<main>\n<h1>Users ({})</h1>\n<ul>\n", users.total);
    for user in &users.items {
        let _ = writeln!(body, "<li>{}</li>", escape(&user.username));
    }
    body.push_str("</ul>\n");
    body.push_str(&pager("/users", users));
    body.push_str("</main>");
    layout("Users", &body)
}

fn add_form() -> String {
    let mut options = String::new();
    for status in STATUS_OPTIONS {
        let _ = write!(options, r#"<option value="{status}">{status}</option>"#);
    }
    format!(
        r#"<form method="post" action="/add_application">
<label>Company <input type="text" name="company" maxlength="30" required></label>
<label>Job title <input type="text" name="jobTitle" maxlength="30" required></label>
<label>Salary <input type="number" name="salary" min="0" step="any" value="0"></label>
<label>Location <input type="text" name="location" maxlength="50" required></label>
<label>Status <select name="select-status">{options}</select></label>
<label>Date <input type="date" name="application-date" required></label>
<button type="submit">Add application</button>
</form>
"#
    )
}

fn pager<T>(path: &str, page: &Page<T>) -> String {
    if page.pages() <= 1 {
        return String::new();
    }
    let mut nav = String::from("<nav class=\"pager\">");
    if let Some(prev) = page.prev_num() {
        let _ = write!(nav, r#"<a href="{path}?page={prev}">Previous</a> "#);
    }
    let _ = write!(nav, "Page {} of {}", page.page, page.pages());
    if let Some(next) = page.next_num() {
        let _ = write!(nav, r#" <a href="{path}?page={next}">Next</a>"#);
    }
    nav.push_str("</nav>\n");
    nav
}
