use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Storage format of `Entry::date`. Zero-padded, so string order is date order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, FromRow)]
pub struct Entry {
    pub id: i64,
    pub date: String,
    pub goals: String,
    pub achievements: String,
    pub challenges: String,
    pub lessons: String,
    pub tasks: String,
    pub notes: String,
    pub mood: Option<i32>,
    pub reflection: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    pub fn is_complete(&self) -> bool {
        !self.goals.is_empty()
    }

    pub fn is_editable(&self) -> bool {
        self.date == today_key()
    }

    pub fn mood_label(&self) -> String {
        match self.mood {
            Some(mood) => mood.to_string(),
            None => "-".into(),
        }
    }
}

/// Writable columns of an entry, already normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFields {
    pub goals: String,
    pub achievements: String,
    pub challenges: String,
    pub lessons: String,
    pub tasks: String,
    pub notes: String,
    pub mood: Option<i32>,
    pub reflection: String,
}

/// POST /submit
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(required(message = "Date is required"), custom = "validate_entry_date")]
    pub date: Option<String>,
    #[validate(
        required(message = "Goals are required"),
        length(max = 10000, message = "Goals are too long")
    )]
    pub goals: Option<String>,
    #[validate(length(max = 10000))]
    pub achievements: Option<String>,
    #[validate(length(max = 10000))]
    pub challenges: Option<String>,
    #[validate(length(max = 10000))]
    pub lessons: Option<String>,
    #[validate(length(max = 10000))]
    pub tasks: Option<String>,
    #[validate(length(max = 10000))]
    pub notes: Option<String>,
    pub mood: Option<String>,
    #[validate(length(max = 10000))]
    pub reflection: Option<String>,
}

impl CreateEntryRequest {
    /// Splits a validated request into its date key and fields.
    pub fn into_parts(self) -> (String, EntryFields) {
        let fields = EntryFields {
            goals: self.goals.unwrap_or_default(),
            achievements: self.achievements.unwrap_or_default(),
            challenges: self.challenges.unwrap_or_default(),
            lessons: self.lessons.unwrap_or_default(),
            tasks: self.tasks.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            mood: parse_mood(self.mood.as_deref()),
            reflection: self.reflection.unwrap_or_default(),
        };
        (self.date.unwrap_or_default(), fields)
    }
}

/// POST /update/{date}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    #[validate(
        required(message = "Goals are required"),
        length(max = 10000, message = "Goals are too long")
    )]
    pub goals: Option<String>,
    #[validate(length(max = 10000))]
    pub achievements: Option<String>,
    #[validate(length(max = 10000))]
    pub challenges: Option<String>,
    #[validate(length(max = 10000))]
    pub lessons: Option<String>,
    #[validate(length(max = 10000))]
    pub tasks: Option<String>,
    #[validate(length(max = 10000))]
    pub notes: Option<String>,
    pub mood: Option<String>,
    #[validate(length(max = 10000))]
    pub reflection: Option<String>,
}

impl From<UpdateEntryRequest> for EntryFields {
    fn from(req: UpdateEntryRequest) -> Self {
        Self {
            goals: req.goals.unwrap_or_default(),
            achievements: req.achievements.unwrap_or_default(),
            challenges: req.challenges.unwrap_or_default(),
            lessons: req.lessons.unwrap_or_default(),
            tasks: req.tasks.unwrap_or_default(),
            notes: req.notes.unwrap_or_default(),
            mood: parse_mood(req.mood.as_deref()),
            reflection: req.reflection.unwrap_or_default(),
        }
    }
}

/// Mood is optional and never rejects a request: only a plain run of
/// ASCII digits that fits an `i32` is kept; whitespace or a sign means no mood.
pub fn parse_mood(raw: Option<&str>) -> Option<i32> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Today's local calendar date as a storage key.
pub fn today_key() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

fn validate_entry_date(date: &str) -> Result<(), ValidationError> {
    // parse_from_str accepts "2024-1-5"; require the canonical padded form too
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) if parsed.format(DATE_FORMAT).to_string() == date => Ok(()),
        _ => {
            let mut err = ValidationError::new("date_format");
            err.message = Some("Date must be formatted as YYYY-MM-DD".into());
            Err(err)
        }
    }
}
