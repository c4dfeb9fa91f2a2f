//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::{Mutex, RwLock};

use fincalc_config::Settings;
use fincalc_llm::TextToNumberResolver;
use fincalc_session::{CalculationService, CalculatorSession};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    /// Resolves form inputs and computes reports
    pub service: Arc<CalculationService>,
    /// Calculator state; never held across an `.await`
    pub session: Arc<Mutex<CalculatorSession>>,
    /// Prometheus handle, `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: Settings, resolver: TextToNumberResolver) -> Self {
        let session = CalculatorSession::from_config(&config.session);
        Self {
            config: Arc::new(RwLock::new(config)),
            service: Arc::new(CalculationService::new(resolver)),
            session: Arc::new(Mutex::new(session)),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Snapshot of the current settings
    pub fn get_config(&self) -> Settings {
        self.config.read().clone()
    }
}
