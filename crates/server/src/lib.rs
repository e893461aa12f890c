use std::sync::Arc;

use db::DBService;
use services::services::notify::{Notifier, TracingNotifier};

pub mod error;
pub mod file_logging;
pub mod middleware;
pub mod routes;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        Self {
            db,
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
}
