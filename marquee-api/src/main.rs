use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use marquee_api::{app, state::WebhookConfig, AppState};
use marquee_catalog::{MovieCatalog, ShowCatalog, TmdbProvider};
use marquee_reserve::{
    LogNotifier, MockPaymentGateway, ReservationCoordinator, ReservationPolicy, TokioScheduler,
};
use marquee_store::{app_config::Config, InMemoryBookingRepo, InMemoryMovieRepo, InMemoryShowRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Marquee API on port {}", config.server.port);

    let movie_repo = Arc::new(InMemoryMovieRepo::new());
    let show_repo = Arc::new(InMemoryShowRepo::new());
    let booking_repo = Arc::new(InMemoryBookingRepo::new());

    let provider = Arc::new(TmdbProvider::new(&config.tmdb.api_base, &config.tmdb.api_key));
    let movies = Arc::new(MovieCatalog::new(movie_repo.clone(), provider));
    let shows = Arc::new(ShowCatalog::new(show_repo.clone(), movie_repo.clone()));

    let (scheduler, release_rx) = TokioScheduler::new();
    let coordinator = Arc::new(ReservationCoordinator::new(
        show_repo,
        booking_repo,
        Arc::new(MockPaymentGateway::new()),
        Arc::new(scheduler),
        Arc::new(LogNotifier),
        ReservationPolicy {
            max_seats_per_booking: config.business_rules.max_seats_per_booking,
            payment_window: Duration::from_secs(config.business_rules.payment_window_secs),
            currency: config.gateway.currency.clone(),
            success_url: config.gateway.success_url.clone(),
            cancel_url: config.gateway.cancel_url.clone(),
        },
    ));

    tokio::spawn(marquee_api::worker::run_release_worker(
        release_rx,
        coordinator.clone(),
    ));

    let state = AppState {
        movies,
        shows,
        coordinator,
        webhook: WebhookConfig {
            secret: config.gateway.webhook_secret.clone(),
            tolerance_secs: config.business_rules.webhook_tolerance_secs,
        },
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
