//! Common test utilities and fixtures for integration tests.
//!
//! Everything runs in memory: the router is built from a fixed comparison
//! config and an inline passage file, so no external services are needed.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use readalong_backend::build_router;
use readalong_backend::services::comparison::ComparisonService;
use readalong_backend::services::passages::PassageLibrary;
use readalong_backend::AppState;
use readalong_core::ComparisonConfig;

/// Test context holding the router under test.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Context with the server defaults and the sample passages.
    pub fn new() -> Self {
        Self::with_config(fixtures::comparison_config())
    }

    /// Context with a custom comparison config and the sample passages.
    ///
    /// # Panics
    /// Panics if the config or the sample passage file is invalid.
    pub fn with_config(config: ComparisonConfig) -> Self {
        let comparison = ComparisonService::new(config).expect("Invalid comparison config");
        let passages = PassageLibrary::from_content(fixtures::SAMPLE_PASSAGES)
            .expect("Sample passages must parse");

        let state = AppState {
            comparison: Arc::new(comparison),
            passages: Arc::new(passages),
        };

        Self {
            app: build_router(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}
