use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{EventInput, EventModel, NewEvent},
    repository::EventRepository,
};
use crate::shared::AppError;

/// Service for handling event business logic
pub struct EventService {
    repository: Arc<dyn EventRepository + Send + Sync>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Lists events, upcoming only unless `include_past`
    #[instrument(skip(self))]
    pub async fn list_events(&self, include_past: bool) -> Result<Vec<EventModel>, AppError> {
        let events = self.repository.list_events(include_past).await?;

        info!(event_count = events.len(), "Events retrieved successfully");
        Ok(events)
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: i64) -> Result<EventModel, AppError> {
        self.repository
            .get_event(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates an event after checking that title and date are present
    #[instrument(skip(self, input))]
    pub async fn create_event(&self, input: EventInput) -> Result<EventModel, AppError> {
        let new_event = NewEvent::try_from(input).map_err(|e| {
            warn!(error = %e, "Rejected event creation");
            e
        })?;
        debug!(title = %new_event.title, date = %new_event.date, "Validated new event");

        let event = self.repository.create_event(&new_event).await?;

        info!(event_id = event.id, title = %event.title, "Event created successfully");
        Ok(event)
    }

    /// Applies a partial update; absent fields keep their stored value
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: i64, input: EventInput) -> Result<EventModel, AppError> {
        input.check_not_blank()?;

        let event = self
            .repository
            .update_event(id, &input)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!(event_id = event.id, "Event updated successfully");
        Ok(event)
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete_event(id).await? {
            return Err(not_found(id));
        }

        info!(event_id = id, "Event deleted successfully");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    debug!(event_id = id, "Event not found");
    AppError::NotFound("Event not found".to_string())
}
