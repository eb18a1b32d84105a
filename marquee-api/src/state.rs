use std::sync::Arc;

use marquee_catalog::{MovieCatalog, ShowCatalog};
use marquee_reserve::ReservationCoordinator;

#[derive(Clone)]
pub struct WebhookConfig {
    pub secret: String,
    pub tolerance_secs: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<MovieCatalog>,
    pub shows: Arc<ShowCatalog>,
    pub coordinator: Arc<ReservationCoordinator>,
    pub webhook: WebhookConfig,
}
