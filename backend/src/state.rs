use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::DashboardState;
use crate::store::SaleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SaleStore>,
    pub dashboard: Arc<Mutex<DashboardState>>,
    pub default_rate: f64,
}

impl AppState {
    pub fn new(store: Arc<dyn SaleStore>, dashboard: DashboardState) -> Self {
        Self {
            store,
            default_rate: dashboard.default_rate,
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }

    pub async fn dashboard_snapshot(&self) -> DashboardState {
        self.dashboard.lock().await.clone()
    }

    pub async fn replace_dashboard(&self, next: DashboardState) -> DashboardState {
        let mut guard = self.dashboard.lock().await;
        *guard = next;
        guard.clone()
    }
}
