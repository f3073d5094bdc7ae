use uuid::Uuid;

/// Trait for generating opaque session tokens
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// UUID v4 token generator (122 random bits, 32 hex chars)
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenGenerator;

impl UuidTokenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
