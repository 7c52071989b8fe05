use crate::config::config::AppConfig;
use crate::observability::AppMetrics;
use crate::security::RequestValidator;
use crate::services::counselor::CounselorService;
use crate::services::earnings::EarningsService;
use crate::services::events::EventBus;
use crate::services::session::{SessionService, SessionStore};
use std::sync::Arc;

/// Application state containing all shared services
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// In-memory session store shared by all services
    pub session_store: Arc<SessionStore>,
    /// Session service for lifecycle operations
    pub session_service: Arc<dyn SessionService>,
    /// Counselor service for message handling and reply scheduling
    pub counselor_service: Arc<dyn CounselorService>,
    /// Earnings service for therapist payment summaries
    pub earnings_service: Arc<dyn EarningsService>,
    /// Event bus for out-of-band session notifications
    pub events: EventBus,
    /// Application metrics
    pub metrics: Arc<AppMetrics>,
    /// Request validator for message and name fields
    pub validator: RequestValidator,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &"Arc<AppConfig>")
            .field("session_store", &"Arc<SessionStore>")
            .field("session_service", &"Arc<dyn SessionService>")
            .field("counselor_service", &"Arc<dyn CounselorService>")
            .field("earnings_service", &"Arc<dyn EarningsService>")
            .field("events", &"EventBus")
            .field("validator", &self.validator)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: AppConfig,
        session_store: Arc<SessionStore>,
        session_service: Box<dyn SessionService>,
        counselor_service: Box<dyn CounselorService>,
        earnings_service: Arc<dyn EarningsService>,
        events: EventBus,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        let validator = RequestValidator::new(config.counselor.max_message_len);
        Self {
            config: Arc::new(config),
            session_store,
            session_service: Arc::from(session_service),
            counselor_service: Arc::from(counselor_service),
            earnings_service,
            events,
            metrics,
            validator,
        }
    }
}
