use axum::{
    extract::{Path, State},
    response::Html,
    Form,
};
use validator::Validate;

use crate::db::entries as store;
use crate::error::{AppError, AppResult};
use crate::models::entry::{today_key, CreateEntryRequest, EntryFields, UpdateEntryRequest};
use crate::views::{
    render, EntriesTemplate, EntryFormTemplate, EntryTemplate, HomeTemplate, SuccessTemplate,
    UpdateFormTemplate,
};
use crate::AppState;

pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = store::list_entries(&state.db).await?;
    render(HomeTemplate {
        today: today_key(),
        entries,
    })
}

pub async fn new_entry_form() -> AppResult<Html<String>> {
    render(EntryFormTemplate { today: today_key() })
}

pub async fn submit_entry(
    State(state): State<AppState>,
    Form(body): Form<CreateEntryRequest>,
) -> AppResult<Html<String>> {
    body.validate()?;
    let (date, fields) = body.into_parts();

    store::create_entry(&state.db, &date, &fields).await?;

    render(SuccessTemplate {
        message: "Progress entry saved successfully!",
    })
}

pub async fn list_entries(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = store::list_entries(&state.db).await?;
    render(EntriesTemplate { entries })
}

pub async fn view_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Html<String>> {
    let entry = store::find_entry(&state.db, &date).await?;
    render(EntryTemplate { entry })
}

pub async fn edit_entry_form(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Html<String>> {
    let entry = store::find_entry(&state.db, &date).await?;
    render(UpdateFormTemplate { entry })
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Form(body): Form<UpdateEntryRequest>,
) -> AppResult<Html<String>> {
    // Past entries are locked whatever the form holds
    let today = today_key();
    if date != today {
        return Err(AppError::Forbidden(
            "You can only update today's entries.".into(),
        ));
    }
    body.validate()?;
    let fields = EntryFields::from(body);

    store::update_entry(&state.db, &date, &today, &fields).await?;

    render(SuccessTemplate {
        message: "Entry updated successfully!",
    })
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Html<String>> {
    store::delete_entry(&state.db, &date).await?;

    render(SuccessTemplate {
        message: "Entry deleted successfully!",
    })
}
