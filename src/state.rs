//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{config::Config, db::ExerciseStore, llm::ChatCompletions, tasks::TaskQueue};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn ExerciseStore>,
    tasks: Arc<dyn TaskQueue>,
    /// Absent when no chat-completion credentials are configured
    llm: Option<Arc<dyn ChatCompletions>>,
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        store: Arc<dyn ExerciseStore>,
        tasks: Arc<dyn TaskQueue>,
        llm: Option<Arc<dyn ChatCompletions>>,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                tasks,
                llm,
                config,
            }),
        }
    }

    /// Exercise and submission persistence
    pub fn store(&self) -> &dyn ExerciseStore {
        self.inner.store.as_ref()
    }

    /// Background task queue
    pub fn tasks(&self) -> &dyn TaskQueue {
        self.inner.tasks.as_ref()
    }

    /// Chat-completion client, if configured
    pub fn llm(&self) -> Option<&dyn ChatCompletions> {
        self.inner.llm.as_deref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
