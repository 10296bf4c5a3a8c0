//! Mock OpMigrate translation backend.
//!
//! Serves `POST /translate` with canned, deterministic responses so clients of
//! a code-translation service can be tested without a real engine.

pub mod backend_client;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod translate;

pub use backend_client::BackendClient;
pub use config::Config;
pub use state::AppState;
pub use translate::{
    stub_translate, StubBackend, TranslationBackend, TranslationRequest, TranslationResponse,
    VerificationResult,
};
