use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::AppError;

/// Database model for events table
///
/// `date` and `end_date` hold ISO-8601 strings as sent by the client, either a
/// plain date (`2026-02-12`) or a full timestamp (`2026-02-12T10:00:00Z`).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct EventModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub end_date: Option<String>,
    pub location: String,
    pub image_url: Option<String>,
    pub max_participants: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventModel {
    /// Builds the stored row for a freshly created event
    pub fn from_new(id: i64, event: &NewEvent, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            end_date: event.end_date.clone(),
            location: event.location.clone(),
            image_url: event.image_url.clone(),
            max_participants: event.max_participants,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field present in `input`, keeping the rest
    pub fn apply(&mut self, input: &EventInput, now: DateTime<Utc>) {
        if let Some(title) = &input.title {
            self.title = title.clone();
        }
        if let Some(description) = &input.description {
            self.description = description.clone();
        }
        if let Some(date) = &input.date {
            self.date = date.clone();
        }
        if input.end_date.is_some() {
            self.end_date = input.end_date.clone();
        }
        if let Some(location) = &input.location {
            self.location = location.clone();
        }
        if input.image_url.is_some() {
            self.image_url = input.image_url.clone();
        }
        if input.max_participants.is_some() {
            self.max_participants = input.max_participants;
        }
        self.updated_at = now;
    }

    /// Whether the event starts on or after `today` (formatted `YYYY-MM-DD`)
    ///
    /// ISO-8601 strings sort chronologically, and any timestamp within `today`
    /// sorts after the bare date.
    pub fn is_upcoming(&self, today: &str) -> bool {
        self.date.as_str() >= today
    }
}

/// Today's date in UTC, in the format used by [`EventModel::is_upcoming`]
pub fn today(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Request payload for creating or updating an event
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EventInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub max_participants: Option<i32>,
}

impl EventInput {
    /// Rejects explicitly blank required fields
    pub fn check_not_blank(&self) -> Result<(), AppError> {
        if self.title.as_deref().is_some_and(is_blank) {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        if self.date.as_deref().is_some_and(is_blank) {
            return Err(AppError::BadRequest("date must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Event payload that passed the create-time presence checks
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub end_date: Option<String>,
    pub location: String,
    pub image_url: Option<String>,
    pub max_participants: Option<i32>,
}

impl TryFrom<EventInput> for NewEvent {
    type Error = AppError;

    fn try_from(input: EventInput) -> Result<Self, Self::Error> {
        input.check_not_blank()?;

        let (Some(title), Some(date)) = (input.title, input.date) else {
            return Err(AppError::BadRequest(
                "title and date are required".to_string(),
            ));
        };

        Ok(Self {
            title,
            description: input.description.unwrap_or_default(),
            date,
            end_date: input.end_date,
            location: input.location.unwrap_or_default(),
            image_url: input.image_url,
            max_participants: input.max_participants,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
