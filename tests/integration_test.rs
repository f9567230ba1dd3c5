use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use yumpdum::clients::{RestaurantApiClient, ViewModelHandle};
use yumpdum::config::AppConfig;
use yumpdum::framework::{FetchError, FetchState};
use yumpdum::lifecycle::AppSystem;
use yumpdum::model::RestaurantId;
use yumpdum::onboarding::OnboardingFlow;
use yumpdum::session::Session;

#[derive(Clone, Default)]
struct Backend {
    /// Answer this many list requests with HTTP 500 before succeeding.
    failures_left: Arc<AtomicUsize>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

fn catalogue() -> Vec<Value> {
    vec![
        json!({
            "restaurant_id": 1,
            "name": "ABC Pizzeria",
            "description": "Wood-fired pizza",
            "location": "Connaught Place",
            "phone_number": "+91 11 2345 6789",
            "thumbnail": " `https://cdn.example.com/abc.jpg` ",
            "image_links": ["https://cdn.example.com/abc-1.jpg", "``"],
            "cuisine": "Italian",
            "total_reviews": 3,
            "user_reviews": [
                { "user_id": "u1", "username": "asha", "stars": 5, "review": "Great crust" },
                { "user_id": "u2", "username": "ravi", "stars": 5, "review": "Loved it" },
                { "user_id": "u3", "username": "meera", "stars": 4, "review": "Good" }
            ],
            "order": { "menu_items": [
                { "item_id": "p1", "name": "Margherita", "category": "Pizza", "price": 399.0 }
            ] },
            "video_links": [
                { "link": "https://video.example.com/abc", "title": "Tour", "subtitle": "Kitchen" }
            ]
        }),
        json!({
            "restaurant_id": 2,
            "name": "Sushi House",
            "description": "Fresh nigiri",
            "location": "Hauz Khas",
            "cuisine": "Japanese",
            "user_reviews": []
        }),
    ]
}

async fn list(
    State(backend): State<Backend>,
    headers: HeaderMap,
) -> Result<Json<Vec<Value>>, (StatusCode, &'static str)> {
    *backend.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let failing = backend
        .failures_left
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"));
    }
    Ok(Json(catalogue()))
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Vec<Value>> {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    Json(
        catalogue()
            .into_iter()
            .filter(|r| r["name"].as_str().unwrap_or("").to_lowercase().contains(&q))
            .collect(),
    )
}

async fn detail(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    catalogue()
        .into_iter()
        .find(|r| r["restaurant_id"] == json!(id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn reviews(Path(id): Path<u64>) -> Json<Value> {
    let found = catalogue().into_iter().find(|r| r["restaurant_id"] == json!(id));
    Json(found.map(|r| r["user_reviews"].clone()).unwrap_or(json!([])))
}

async fn menu(Path(id): Path<u64>) -> Json<Value> {
    let found = catalogue().into_iter().find(|r| r["restaurant_id"] == json!(id));
    Json(found.map(|r| r["order"].clone()).unwrap_or(json!({ "menu_items": [] })))
}

fn backend_router(backend: Backend) -> Router {
    Router::new()
        .route("/api/restaurants", get(list))
        .route("/api/restaurants/search", get(search))
        .route("/api/restaurants/:id", get(detail))
        .route("/api/restaurants/:id/reviews", get(reviews))
        .route("/api/restaurants/:id/menu", get(menu))
        .with_state(backend)
}

async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

fn config_for(base: &Url, dir: &tempfile::TempDir) -> AppConfig {
    let onboarding = dir.path().join("onboarding.json");
    let base = base.to_string();
    AppConfig::from_lookup(move |key| match key {
        "YUMPDUM_API_BASE_URL" => Some(base.clone()),
        "YUMPDUM_ONBOARDING_FILE" => Some(onboarding.display().to_string()),
        "YUMPDUM_API_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_api_client_endpoints() {
    let backend = Backend::default();
    let base = serve(backend_router(backend.clone())).await;
    let api = RestaurantApiClient::new(&base, Session::signed_in("tok_abc"), None).unwrap();

    let all = api.list_restaurants().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name.as_deref(), Some("ABC Pizzeria"));
    assert_eq!(
        backend.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer tok_abc")
    );

    let one = api.get_restaurant(RestaurantId(2)).await.unwrap();
    assert_eq!(one.location.as_deref(), Some("Hauz Khas"));

    let found = api.search_restaurants("sushi house").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].restaurant_id, Some(2));

    assert_eq!(api.restaurant_reviews(RestaurantId(1)).await.unwrap().len(), 3);
    let menu = api.restaurant_menu(RestaurantId(1)).await.unwrap();
    assert_eq!(menu.menu_items.unwrap()[0].name.as_deref(), Some("Margherita"));

    match api.get_restaurant(RestaurantId(404)).await {
        Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_anonymous_session_sends_no_token() {
    let backend = Backend::default();
    let base = serve(backend_router(backend.clone())).await;
    let api = RestaurantApiClient::new(&base, Session::anonymous(), None).unwrap();
    api.list_restaurants().await.unwrap();
    assert_eq!(*backend.last_authorization.lock().unwrap(), None);
}

#[tokio::test]
async fn test_status_and_parse_failures_keep_cause() {
    let app = Router::new()
        .route("/api/restaurants", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }))
        .route("/api/restaurants/:id", get(|| async { "<html>not json</html>" }));
    let base = serve(app).await;
    let api = RestaurantApiClient::new(&base, Session::anonymous(), None).unwrap();

    match api.list_restaurants().await {
        Err(FetchError::HttpStatus { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status failure, got {:?}", other),
    }

    let err = api.get_restaurant(RestaurantId(1)).await.unwrap_err();
    assert_eq!(err.kind(), "parse");
    assert!(std::error::Error::source(&err).is_some());
}

/// Full system against a local backend: failure, retry, filtering, detail, onboarding.
#[tokio::test]
async fn test_app_system_end_to_end() {
    let backend = Backend::default();
    backend.failures_left.store(2, Ordering::SeqCst);
    let base = serve(backend_router(backend.clone())).await;
    let dir = tempfile::tempdir().unwrap();

    let mut system = AppSystem::start(config_for(&base, &dir), Session::anonymous())
        .await
        .unwrap();
    assert!(system.should_show_onboarding());

    // Listing and map each hit the failing endpoint once.
    let state = system.listing.wait_until_settled().await.unwrap();
    assert_eq!(state.fetch.error_message(), Some("Failed to load restaurants"));
    let state = system.map.wait_until_settled().await.unwrap();
    assert_eq!(state.fetch.error_message(), Some("Failed to load restaurants"));

    system.listing.retry().await.unwrap();
    let state = system.listing.wait_until_settled().await.unwrap();
    assert!(matches!(state.fetch, FetchState::Success(ref items) if items.len() == 2));

    let pizza = &state.projection[0];
    assert_eq!(pizza.thumbnail.as_deref(), Some("https://cdn.example.com/abc.jpg"));
    assert_eq!(pizza.image_links, vec!["https://cdn.example.com/abc-1.jpg".to_string()]);
    assert_eq!(pizza.rating.to_string(), "4.7");
    assert_eq!(state.projection[1].rating.to_string(), "not available");

    let shown = system.listing.search("pizza").await.unwrap();
    assert_eq!(shown.len(), 1);
    system.listing.search("").await.unwrap();
    assert_eq!(system.listing.select_category("Mexican").await.unwrap().len(), 2);

    let detail = system.open_detail(RestaurantId(2)).await.unwrap();
    detail.wait_until_settled().await.unwrap();
    assert_eq!(detail.restaurant().map(|r| r.name), Some("Sushi House".to_string()));

    let missing = system.open_detail(RestaurantId(404)).await.unwrap();
    let state = missing.wait_until_settled().await.unwrap();
    assert_eq!(state.fetch.error_message(), Some("Failed to load restaurant details"));

    let results = system.open_search("abc").await.unwrap();
    results.wait_until_settled().await.unwrap();
    assert_eq!(results.restaurants().len(), 1);

    let mut flow = OnboardingFlow::new(system.onboarding_store());
    flow.skip().await;

    drop(detail);
    drop(missing);
    drop(results);
    system.shutdown().await.unwrap();

    // The flag written by the pager is read on the next start.
    let system = AppSystem::start(config_for(&base, &dir), Session::anonymous())
        .await
        .unwrap();
    assert!(!system.should_show_onboarding());
    system.shutdown().await.unwrap();
}

/// Detail screens opened and closed one after another do not pile up task handles.
#[tokio::test]
async fn test_closed_detail_screens_are_pruned() {
    let base = serve(backend_router(Backend::default())).await;
    let dir = tempfile::tempdir().unwrap();
    let mut system = AppSystem::start(config_for(&base, &dir), Session::anonymous())
        .await
        .unwrap();

    for id in [1, 2, 1] {
        let detail = system.open_detail(RestaurantId(id)).await.unwrap();
        detail.wait_until_settled().await.unwrap();
        drop(detail);
    }

    // Listing and map stay up; every closed detail actor exits once its client is gone.
    tokio::time::timeout(Duration::from_secs(5), async {
        while system.running_view_models() > 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    assert_eq!(system.running_view_models(), 2);

    system.shutdown().await.unwrap();
}
