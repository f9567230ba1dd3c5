use yumpdum::clients::{RestaurantDetailClient, RestaurantListClient, ViewModelHandle};
use yumpdum::framework::mock::MockSource;
use yumpdum::framework::{FetchError, FetchState};
use yumpdum::model::{DisplayRating, RawRestaurant, RawReview, Restaurant};
use yumpdum::restaurant_actor::{self, MapContext};

fn review(stars: i64) -> RawReview {
    RawReview {
        user_id: Some(format!("user_{}", stars)),
        username: Some("asha".to_string()),
        stars: Some(stars),
        review: Some("Lovely".to_string()),
    }
}

fn restaurant(id: u64, name: &str, cuisine: &str) -> RawRestaurant {
    RawRestaurant {
        restaurant_id: Some(id),
        name: Some(name.to_string()),
        location: Some("Connaught Place, New Delhi".to_string()),
        description: Some(format!("{} serves {} food", name, cuisine)),
        cuisine: Some(cuisine.to_string()),
        user_reviews: Some(vec![review(5), review(5), review(4)]),
        ..RawRestaurant::default()
    }
}

fn server_error() -> FetchError {
    FetchError::HttpStatus {
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}

async fn wait_for_calls(mock: &MockSource<Restaurant>, calls: usize) {
    while mock.calls() < calls {
        tokio::task::yield_now().await;
    }
}

/// Waits until the actor has dropped `count` stale completions.
async fn wait_for_discards(client: &RestaurantListClient, count: u64) {
    let mut state = client.inner().subscribe();
    state
        .wait_for(|view| view.stale_discarded >= count)
        .await
        .unwrap();
}

/// HTTP 500 surfaces as the listing's failure message; retry goes straight to Success.
#[tokio::test]
async fn test_server_error_then_retry() {
    let mut mock = MockSource::<Restaurant>::new();
    mock.expect_fetch().return_err(server_error());
    mock.expect_fetch()
        .return_ok(vec![restaurant(1, "ABC Pizzeria", "Italian")]);

    let (actor, client) =
        restaurant_actor::new(mock.source(), restaurant_actor::listing_options(8));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantListClient::new(client);

    assert_eq!(client.initialize().await.unwrap(), 1);
    let state = client.wait_until_settled().await.unwrap();
    assert_eq!(state.fetch, FetchState::Error("Failed to load restaurants".to_string()));
    assert!(state.projection.is_empty());

    // Watch every published state from here on.
    let mut updates = client.inner().subscribe();
    let _ = updates.borrow_and_update();

    assert_eq!(client.retry().await.unwrap(), 2);
    let state = client.wait_until_settled().await.unwrap();
    let FetchState::Success(items) = &state.fetch else {
        panic!("expected success, got {:?}", state.fetch);
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].rating, DisplayRating::Rated(4.7));
    assert_eq!(state.projection, *items);
    assert!(updates.has_changed().unwrap());

    // initialize after the first fetch is a no-op.
    assert_eq!(client.initialize().await.unwrap(), 2);
    assert_eq!(mock.calls(), 2);

    mock.verify();
    drop(client);
    actor_handle.await.unwrap();
}

/// An older fetch resolving after a newer one must not overwrite it.
#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mut mock = MockSource::<Restaurant>::new();
    let first = mock.expect_fetch().return_when_released();
    let second = mock.expect_fetch().return_when_released();

    let (actor, client) =
        restaurant_actor::new(mock.source(), restaurant_actor::listing_options(8));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantListClient::new(client);

    client.initialize().await.unwrap();
    wait_for_calls(&mock, 1).await;
    client.retry().await.unwrap();
    wait_for_calls(&mock, 2).await;

    second.ok(vec![restaurant(2, "Sushi House", "Japanese")]);
    let state = client.wait_until_settled().await.unwrap();
    assert_eq!(state.generation, 2);
    assert_eq!(state.projection[0].name, "Sushi House");

    first.ok(vec![restaurant(1, "ABC Pizzeria", "Italian")]);
    wait_for_discards(&client, 1).await;
    let state = client.snapshot().await.unwrap();
    assert_eq!(state.stale_discarded, 1);
    assert_eq!(state.generation, 2);
    assert_eq!(state.projection.len(), 1);
    assert_eq!(state.projection[0].name, "Sushi House");

    drop(client);
    actor_handle.await.unwrap();
}

/// A failing stale fetch must not flip a newer success into Error either.
#[tokio::test]
async fn test_stale_failure_is_discarded() {
    let mut mock = MockSource::<Restaurant>::new();
    let first = mock.expect_fetch().return_when_released();
    mock.expect_fetch()
        .return_ok(vec![restaurant(1, "ABC Pizzeria", "Italian")]);

    let (actor, client) =
        restaurant_actor::new(mock.source(), restaurant_actor::listing_options(8));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantListClient::new(client);

    client.initialize().await.unwrap();
    wait_for_calls(&mock, 1).await;
    client.retry().await.unwrap();
    client.wait_until_settled().await.unwrap();

    first.err(server_error());
    wait_for_discards(&client, 1).await;
    let state = client.snapshot().await.unwrap();
    assert!(matches!(state.fetch, FetchState::Success(_)));
    assert_eq!(state.projection.len(), 1);

    drop(client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_search_and_category_fallback() {
    let mut mock = MockSource::<Restaurant>::new();
    mock.expect_fetch().return_ok(vec![
        restaurant(1, "ABC Pizzeria", "Pizza"),
        restaurant(2, "Sushi House", "Japanese"),
    ]);

    let (actor, client) =
        restaurant_actor::new(mock.source(), restaurant_actor::listing_options(8));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantListClient::new(client);
    client.initialize().await.unwrap();
    client.wait_until_settled().await.unwrap();

    let shown = client.search("pizza").await.unwrap();
    let names: Vec<_> = shown.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ABC Pizzeria"]);

    client.search("   ").await.unwrap();
    // Nothing is tagged Italian: the full collection is shown.
    let shown = client.select_category("Italian").await.unwrap();
    assert_eq!(shown.len(), 2);
    assert_eq!(client.restaurants().len(), 2);

    // Query changes never touch the canonical collection.
    let state = client.snapshot().await.unwrap();
    assert_eq!(state.fetch.collection().map(|c| c.len()), Some(2));

    drop(client);
    actor_handle.await.unwrap();
}

/// Names alone are enough for a stem match: "pizza" finds "ABC Pizzeria".
#[tokio::test]
async fn test_pizza_search_on_names_only() {
    let name_only = |id: u64, name: &str| RawRestaurant {
        restaurant_id: Some(id),
        name: Some(name.to_string()),
        ..RawRestaurant::default()
    };
    let mut mock = MockSource::<Restaurant>::new();
    mock.expect_fetch()
        .return_ok(vec![name_only(1, "ABC Pizzeria"), name_only(2, "Sushi House")]);

    let (actor, client) =
        restaurant_actor::new(mock.source(), restaurant_actor::listing_options(8));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantListClient::new(client);
    client.initialize().await.unwrap();
    client.wait_until_settled().await.unwrap();

    let shown = client.search("pizza").await.unwrap();
    let names: Vec<_> = shown.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["ABC Pizzeria"]);
    assert!(client.search("ramen").await.unwrap().is_empty());

    mock.verify();
    drop(client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_map_matches_menu_items_and_places_markers() {
    let mut mock = MockSource::<Restaurant>::new();
    let mut with_menu = restaurant(1, "Saffron", "Indian");
    with_menu.order = Some(yumpdum::model::RawOrder {
        menu_items: Some(vec![yumpdum::model::RawMenuItem {
            item_id: Some("m1".to_string()),
            name: Some("Butter Chicken".to_string()),
            category: Some("Mains".to_string()),
            image_link: None,
            price: Some(450.0),
        }]),
    });
    let mut pinned = restaurant(2, "Sushi House", "Japanese");
    pinned.latitude = Some(28.55);
    pinned.longitude = Some(77.25);
    mock.expect_fetch().return_ok(vec![with_menu, pinned]);

    let (actor, client) = restaurant_actor::new(mock.source(), restaurant_actor::map_options(8));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantListClient::new(client);
    client.initialize().await.unwrap();
    client.wait_until_settled().await.unwrap();

    let markers = client.markers();
    assert_eq!(markers.len(), 2);
    assert!(markers.iter().all(|m| m.coordinate.is_valid()));
    assert_eq!(markers[1].coordinate.latitude, 28.55);

    let shown = client.search("butter chicken").await.unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(client.markers()[0].title, "Saffron");

    drop(client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_detail_schema_failure_uses_detail_message() {
    let mut mock = MockSource::<Restaurant>::new();
    // Missing name: the record is rejected, not rendered with holes.
    mock.expect_fetch().return_ok(vec![RawRestaurant {
        restaurant_id: Some(9),
        ..RawRestaurant::default()
    }]);
    mock.expect_fetch().return_ok(vec![restaurant(9, "Dosa Corner", "South Indian")]);

    let (actor, client) = restaurant_actor::new(mock.source(), restaurant_actor::detail_options(4));
    let actor_handle = tokio::spawn(actor.run(MapContext::default()));
    let client = RestaurantDetailClient::new(client);

    client.initialize().await.unwrap();
    let state = client.wait_until_settled().await.unwrap();
    assert_eq!(state.fetch.error_message(), Some("Failed to load restaurant details"));
    assert_eq!(client.restaurant(), None);

    client.retry().await.unwrap();
    client.wait_until_settled().await.unwrap();
    let loaded = client.restaurant().unwrap();
    assert_eq!(loaded.name, "Dosa Corner");
    assert_eq!(loaded.rating.to_string(), "4.7");

    mock.verify();
    drop(client);
    actor_handle.await.unwrap();
}
