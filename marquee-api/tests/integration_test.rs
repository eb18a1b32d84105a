use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use marquee_api::{app, state::WebhookConfig, AppState};
use marquee_catalog::{MovieCatalog, ShowCatalog};
use marquee_core::signature::{sign_payload, SIGNATURE_HEADER};
use marquee_core::{BookingRepository, MetadataProvider, MovieDetails, ShowRepository};
use marquee_domain::{CastMember, MarqueeError};
use marquee_reserve::{
    LogNotifier, MockPaymentGateway, ReservationCoordinator, ReservationPolicy, TokioScheduler,
};
use marquee_store::{InMemoryBookingRepo, InMemoryMovieRepo, InMemoryShowRepo};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const WEBHOOK_SECRET: &str = "whsec_integration";

struct StaticProvider;

#[async_trait]
impl MetadataProvider for StaticProvider {
    async fn details(&self, external_id: i64) -> Result<MovieDetails, MarqueeError> {
        Ok(MovieDetails {
            id: external_id,
            title: "Interstellar".to_string(),
            overview: "A team travels through a wormhole.".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            genres: Vec::new(),
            release_date: Some("2014-11-05".to_string()),
            original_language: "en".to_string(),
            tagline: None,
            vote_average: 8.4,
            runtime: 169,
        })
    }

    async fn credits(&self, _external_id: i64) -> Result<Vec<CastMember>, MarqueeError> {
        Ok(vec![CastMember {
            name: "Matthew McConaughey".to_string(),
            profile_path: None,
        }])
    }
}

struct TestApp {
    state: AppState,
    show_repo: Arc<InMemoryShowRepo>,
    booking_repo: Arc<InMemoryBookingRepo>,
}

fn test_app(payment_window: Duration) -> TestApp {
    let movie_repo = Arc::new(InMemoryMovieRepo::new());
    let show_repo = Arc::new(InMemoryShowRepo::new());
    let booking_repo = Arc::new(InMemoryBookingRepo::new());

    let movies = Arc::new(MovieCatalog::new(movie_repo.clone(), Arc::new(StaticProvider)));
    let shows = Arc::new(ShowCatalog::new(show_repo.clone(), movie_repo));

    let (scheduler, release_rx) = TokioScheduler::new();
    let coordinator = Arc::new(ReservationCoordinator::new(
        show_repo.clone(),
        booking_repo.clone(),
        Arc::new(MockPaymentGateway::new()),
        Arc::new(scheduler),
        Arc::new(LogNotifier),
        ReservationPolicy {
            max_seats_per_booking: 5,
            payment_window,
            currency: "usd".to_string(),
            success_url: "http://localhost:3000/loading/my-bookings".to_string(),
            cancel_url: "http://localhost:3000/my-bookings".to_string(),
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
            secret: WEBHOOK_SECRET.to_string(),
            tolerance_secs: 300,
        },
    };

    TestApp {
        state,
        show_repo,
        booking_repo,
    }
}

async fn send_json(state: &AppState, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, request).await
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn webhook_request(body: &Value, secret: &str) -> Request<Body> {
    let raw = body.to_string();
    let header = sign_payload(secret, Utc::now().timestamp(), raw.as_bytes());
    Request::builder()
        .method("POST")
        .uri("/v1/webhooks/payments")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, header)
        .body(Body::from(raw))
        .unwrap()
}

fn completed_event(booking_id: Uuid) -> Value {
    json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_test_1",
                "metadata": { "bookingId": booking_id }
            }
        }
    })
}

/// Seed one show through the admin surface and return (movie_id, show_id).
async fn seed_show(state: &AppState) -> (Uuid, Uuid) {
    let (status, body) = send_json(
        state,
        "POST",
        "/v1/admin/shows",
        json!({
            "movie_id": 157336,
            "show_price": 1500,
            "shows": [{ "date": "2099-05-01", "times": ["14:00"] }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 1);
    let movie_id: Uuid = body["movie_id"].as_str().unwrap().parse().unwrap();

    let (status, shows) = send_json(state, "GET", "/v1/shows", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    let show_id: Uuid = shows[0]["show"]["id"].as_str().unwrap().parse().unwrap();
    (movie_id, show_id)
}

#[tokio::test]
async fn test_reserve_and_confirm_flow() {
    let t = test_app(Duration::from_secs(600));
    let (movie_id, show_id) = seed_show(&t.state).await;

    // Availability groups the show under its calendar date
    let (status, availability) =
        send_json(&t.state, "GET", &format!("/v1/shows/{movie_id}"), Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(availability["dates"]["2099-05-01"][0]["show_id"], json!(show_id));

    // Reserve two seats
    let (status, booking) = send_json(
        &t.state,
        "POST",
        "/v1/bookings",
        json!({ "show_id": show_id, "user_id": "user-1", "seat_labels": ["A1", "A2"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["amount"], 3000);
    let booking_id: Uuid = booking["booking_id"].as_str().unwrap().parse().unwrap();
    assert!(booking["payment_link"].as_str().unwrap().starts_with("https://"));

    // Overlapping reservation is rejected with a conflict
    let (status, err) = send_json(
        &t.state,
        "POST",
        "/v1/bookings",
        json!({ "show_id": show_id, "user_id": "user-2", "seat_labels": ["A2", "A3"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["error"].as_str().unwrap().contains("A2"));

    // Unsigned and badly signed webhooks never reach the coordinator
    let event = completed_event(booking_id);
    let unsigned = Request::builder()
        .method("POST")
        .uri("/v1/webhooks/payments")
        .header("content-type", "application/json")
        .body(Body::from(event.to_string()))
        .unwrap();
    let (status, _) = send(&t.state, unsigned).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&t.state, webhook_request(&event, "whsec_wrong")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!t.booking_repo.get(booking_id).await.unwrap().unwrap().is_paid);

    // Properly signed confirmation, delivered twice (gateway retry)
    for _ in 0..2 {
        let (status, body) = send(&t.state, webhook_request(&event, WEBHOOK_SECRET)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["received"], true);
    }

    let paid = t.booking_repo.get(booking_id).await.unwrap().unwrap();
    assert!(paid.is_paid);
    assert!(paid.payment_link.is_empty());

    // The release check after confirmation keeps the seats
    t.state.coordinator.release_if_unpaid(booking_id).await.unwrap();
    let show = t.show_repo.get(show_id).await.unwrap().unwrap();
    assert_eq!(show.occupied_seats.len(), 2);
}

#[tokio::test]
async fn test_unpaid_booking_is_released_after_window() {
    let t = test_app(Duration::from_millis(50));
    let (_, show_id) = seed_show(&t.state).await;

    let (status, booking) = send_json(
        &t.state,
        "POST",
        "/v1/bookings",
        json!({ "show_id": show_id, "user_id": "user-1", "seat_labels": ["B1"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let booking_id: Uuid = booking["booking_id"].as_str().unwrap().parse().unwrap();

    // Window elapses with no confirmation; the worker reclaims the hold
    tokio::time::sleep(Duration::from_millis(300)).await;

    let show = t.show_repo.get(show_id).await.unwrap().unwrap();
    assert!(show.occupied_seats.is_empty());
    assert!(t.booking_repo.get(booking_id).await.unwrap().is_none());

    // A stale payment link now lands on a deleted booking: webhook no-ops
    let (status, body) = send(
        &t.state,
        webhook_request(&completed_event(booking_id), WEBHOOK_SECRET),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
    assert!(t.booking_repo.get(booking_id).await.unwrap().is_none());

    // The seats are free for the next customer
    let (status, _) = send_json(
        &t.state,
        "POST",
        "/v1/bookings",
        json!({ "show_id": show_id, "user_id": "user-2", "seat_labels": ["B1"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_batch_is_all_or_nothing() {
    let t = test_app(Duration::from_secs(600));

    let (status, _) = send_json(
        &t.state,
        "POST",
        "/v1/admin/shows",
        json!({
            "movie_id": 157336,
            "show_price": 1500,
            "shows": [
                { "date": "2099-06-01", "times": ["14:00"] },
                { "date": "2099-06-02", "times": ["not-a-time"] }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, shows) = send_json(&t.state, "GET", "/v1/shows", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shows.as_array().unwrap().len(), 0);
}
