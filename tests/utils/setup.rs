use axum::Router;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use club_events::{
    events::models::EventModel, routes, AppState, InMemoryEventRepository, InMemorySessionStore,
    ManualClock,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const ADMIN_PASSWORD: &str = "poisson-admin";

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub session_store: Arc<InMemorySessionStore>,
    pub event_repository: Arc<InMemoryEventRepository>,
}

pub struct TestAppBuilder {
    events: Vec<EventModel>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self { events: vec![] }
    }

    pub fn with_events(mut self, events: Vec<EventModel>) -> Self {
        self.events = events;
        self
    }

    /// One past event and two upcoming ones
    pub fn with_sample_events(self) -> Self {
        self.with_events(vec![
            sample_event(1, "Assemblée générale", "2020-03-01T18:00:00Z"),
            sample_event(2, "Pêche de nuit", "2099-06-21T21:00:00Z"),
            sample_event(3, "Concours de pêche", "2099-05-01"),
        ])
    }

    pub fn build(self) -> TestApp {
        let clock = Arc::new(ManualClock::starting_now());
        let session_store = Arc::new(InMemorySessionStore::with_clock(clock.clone()));
        let event_repository = Arc::new(InMemoryEventRepository::with_events(self.events));

        let app_state = AppState::new(
            session_store.clone(),
            event_repository.clone(),
            ADMIN_PASSWORD,
        );

        TestApp {
            router: routes::app(app_state),
            clock,
            session_store,
            event_repository,
        }
    }
}

pub fn sample_event(id: i64, title: &str, date: &str) -> EventModel {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    EventModel {
        id,
        title: title.to_string(),
        description: String::new(),
        date: date.to_string(),
        end_date: None,
        location: "Nancy".to_string(),
        image_url: None,
        max_participants: None,
        created_at: created,
        updated_at: created,
    }
}
