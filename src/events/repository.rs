use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

use super::models::{today, EventInput, EventModel, NewEvent};
use crate::session::{Clock, SystemClock};
use crate::shared::AppError;

/// Trait for event repository operations
#[async_trait]
pub trait EventRepository {
    /// Lists events ordered by date. Past events are left out unless `include_past`.
    async fn list_events(&self, include_past: bool) -> Result<Vec<EventModel>, AppError>;
    async fn get_event(&self, id: i64) -> Result<Option<EventModel>, AppError>;
    async fn create_event(&self, event: &NewEvent) -> Result<EventModel, AppError>;
    /// Returns `None` when no event has that id
    async fn update_event(
        &self,
        id: i64,
        input: &EventInput,
    ) -> Result<Option<EventModel>, AppError>;
    /// Returns whether an event was removed
    async fn delete_event(&self, id: i64) -> Result<bool, AppError>;
}

/// In-memory implementation of EventRepository for development and testing
///
/// Data is lost when the application restarts. New ids continue from the
/// highest id currently stored.
pub struct InMemoryEventRepository {
    events: Mutex<BTreeMap<i64, EventModel>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            events: Mutex::new(BTreeMap::new()),
            clock,
        }
    }

    /// Creates an in-memory repository with pre-populated events
    pub fn with_events(events: Vec<EventModel>) -> Self {
        let repo = Self::new();
        {
            let mut stored = repo.events();
            for event in events {
                stored.insert(event.id, event);
            }
        }
        repo
    }

    /// Returns the current number of events in the repository
    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    fn events(&self) -> MutexGuard<'_, BTreeMap<i64, EventModel>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    #[instrument(skip(self))]
    async fn list_events(&self, include_past: bool) -> Result<Vec<EventModel>, AppError> {
        debug!("Listing events in memory");

        let today = today(self.clock.now());
        let mut events: Vec<EventModel> = self
            .events()
            .values()
            .filter(|event| include_past || event.is_upcoming(&today))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

        debug!(event_count = events.len(), "Events listed in memory");
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn get_event(&self, id: i64) -> Result<Option<EventModel>, AppError> {
        debug!(event_id = id, "Fetching event from memory");

        let event = self.events().get(&id).cloned();

        match &event {
            Some(e) => debug!(event_id = id, title = %e.title, "Event found in memory"),
            None => debug!(event_id = id, "Event not found in memory"),
        }

        Ok(event)
    }

    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn create_event(&self, event: &NewEvent) -> Result<EventModel, AppError> {
        let now = self.clock.now();
        let mut events = self.events();

        let id = match events.keys().next_back() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                warn!(max_id = max, "Event id space exhausted");
                AppError::Internal
            })?,
            None => 1,
        };
        let created = EventModel::from_new(id, event, now);
        events.insert(id, created.clone());

        debug!(event_id = id, "Event created successfully in memory");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    async fn update_event(
        &self,
        id: i64,
        input: &EventInput,
    ) -> Result<Option<EventModel>, AppError> {
        let now = self.clock.now();
        let mut events = self.events();

        let Some(event) = events.get_mut(&id) else {
            debug!(event_id = id, "Event not found for update in memory");
            return Ok(None);
        };
        event.apply(input, now);

        debug!(event_id = id, "Event updated successfully in memory");
        Ok(Some(event.clone()))
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: i64) -> Result<bool, AppError> {
        let removed = self.events().remove(&id).is_some();

        if removed {
            debug!(event_id = id, "Event deleted successfully from memory");
        } else {
            debug!(event_id = id, "Event not found for deletion in memory");
        }
        Ok(removed)
    }
}

const EVENT_COLUMNS: &str = "id, title, description, date, end_date, location, image_url, \
                             max_participants, created_at, updated_at";

/// PostgreSQL implementation of event repository
pub struct PostgresEventRepository {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Cut-off date for the upcoming filter
    fn today(&self) -> String {
        today(self.clock.now())
    }

    /// Creates the events table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS events (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                date TEXT NOT NULL,
                end_date TEXT,
                location TEXT NOT NULL DEFAULT '',
                image_url TEXT,
                max_participants INTEGER,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create events table");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!("Events table ready");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    #[instrument(skip(self))]
    async fn list_events(&self, include_past: bool) -> Result<Vec<EventModel>, AppError> {
        debug!("Listing events from database");

        let events = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE $1 OR date >= $2 ORDER BY date, id"
        ))
        .bind(include_past)
        .bind(self.today())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list events from database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(event_count = events.len(), "Events listed from database");
        Ok(events)
    }

    #[instrument(skip(self))]
    async fn get_event(&self, id: i64) -> Result<Option<EventModel>, AppError> {
        debug!(event_id = id, "Fetching event from database");

        let event = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, event_id = id, "Failed to fetch event from database");
            AppError::DatabaseError(e.to_string())
        })?;

        match &event {
            Some(e) => debug!(event_id = id, title = %e.title, "Event found in database"),
            None => debug!(event_id = id, "Event not found in database"),
        }

        Ok(event)
    }

    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn create_event(&self, event: &NewEvent) -> Result<EventModel, AppError> {
        let created = sqlx::query_as::<_, EventModel>(&format!(
            "INSERT INTO events (title, description, date, end_date, location, image_url, max_participants)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.date)
        .bind(&event.end_date)
        .bind(&event.location)
        .bind(&event.image_url)
        .bind(event.max_participants)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create event in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(event_id = created.id, "Event created successfully in database");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    async fn update_event(
        &self,
        id: i64,
        input: &EventInput,
    ) -> Result<Option<EventModel>, AppError> {
        let updated = sqlx::query_as::<_, EventModel>(&format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                end_date = COALESCE($5, end_date),
                location = COALESCE($6, location),
                image_url = COALESCE($7, image_url),
                max_participants = COALESCE($8, max_participants),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.date)
        .bind(&input.end_date)
        .bind(&input.location)
        .bind(&input.image_url)
        .bind(input.max_participants)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, event_id = id, "Failed to update event in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if updated.is_none() {
            debug!(event_id = id, "Event not found for update");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, event_id = id, "Failed to delete event from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
