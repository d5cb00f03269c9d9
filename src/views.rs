//! Page templates. Sources live in `templates/` and are compiled in by askama.

use askama::Template;
use axum::response::Html;

use crate::error::AppResult;
use crate::models::entry::Entry;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub today: String,
    pub entries: Vec<Entry>,
}

#[derive(Template)]
#[template(path = "entries.html")]
pub struct EntriesTemplate {
    pub entries: Vec<Entry>,
}

#[derive(Template)]
#[template(path = "entry.html")]
pub struct EntryTemplate {
    pub entry: Entry,
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct EntryFormTemplate {
    pub today: String,
}

#[derive(Template)]
#[template(path = "update_form.html")]
pub struct UpdateFormTemplate {
    pub entry: Entry,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate<'a> {
    pub message: &'a str,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

/// Renders a page into an HTML response, surfacing template failures as errors.
pub fn render<T: Template>(template: T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}
