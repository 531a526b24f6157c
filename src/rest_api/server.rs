//! # REST API HTTP Server
//!
//! Axum router over the core operations. Authentication mechanics live
//! upstream: a gate in front of this service authenticates the owner
//! and forwards the identity in the `x-actor-id` header. Routes that
//! mutate or list owner data refuse to run without it.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::errors::{ApiError, ApiResult};
use crate::listing::ListingReader;
use crate::model::{NewRestaurant, RestaurantView};
use crate::pin::PinManager;
use crate::promotion::PromotionManager;
use crate::store::RestaurantTable;

/// Shared handler state
pub struct AppState {
    table: Arc<RestaurantTable>,
    pins: PinManager,
    promotions: PromotionManager,
    reader: ListingReader,
}

impl AppState {
    pub fn new(table: Arc<RestaurantTable>) -> Self {
        Self {
            pins: PinManager::new(Arc::clone(&table)),
            promotions: PromotionManager::new(Arc::clone(&table)),
            reader: ListingReader::new(Arc::clone(&table)),
            table,
        }
    }
}

/// Builds the Axum router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/restaurants", get(list_public).post(create_restaurant))
        .route("/restaurants/:id", get(get_restaurant))
        .route("/restaurants/:id/pin", patch(toggle_pin))
        .route("/restaurants/:id/promote", patch(promote))
        .route("/owner/restaurants", get(list_owner))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Extracts the pre-authenticated actor identity.
fn actor_from_headers(headers: &HeaderMap) -> ApiResult<Uuid> {
    let raw = headers
        .get("x-actor-id")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingActor)?;
    raw.parse::<Uuid>()
        .map_err(|_| ApiError::InvalidActor(raw.to_string()))
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    raw.parse::<Uuid>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// `GET /restaurants` - public listing, ordered and redacted.
async fn list_public(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<RestaurantView>>> {
    Ok(Json(state.reader.list_public()?))
}

/// `GET /restaurants/:id` - single restaurant, products in menu order.
async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<RestaurantView>> {
    let id = parse_id(&id)?;
    Ok(Json(state.reader.get(id)?))
}

/// `GET /owner/restaurants` - the actor's listings.
async fn list_owner(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<RestaurantView>>> {
    let actor = actor_from_headers(&headers)?;
    Ok(Json(state.reader.list_owner(actor)?))
}

/// `POST /restaurants` - create a listing for the actor.
async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NewRestaurant>,
) -> ApiResult<(StatusCode, Json<RestaurantView>)> {
    let actor = actor_from_headers(&headers)?;
    let created = state.table.create(actor, body)?;
    Ok((StatusCode::CREATED, Json(created.to_view())))
}

/// `PATCH /restaurants/:id/pin` - toggle the pin flag.
async fn toggle_pin(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<RestaurantView>> {
    let actor = actor_from_headers(&headers)?;
    let id = parse_id(&id)?;
    let updated = state.pins.toggle_pin(actor, id)?;
    Ok(Json(updated.to_view()))
}

/// `PATCH /restaurants/:id/promote` - make this the actor's featured
/// listing, demoting the previous one in the same commit.
async fn promote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<RestaurantView>> {
    let actor = actor_from_headers(&headers)?;
    let id = parse_id(&id)?;
    let promoted = state.promotions.promote(actor, id)?;
    Ok(Json(promoted.to_view()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_header_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            actor_from_headers(&headers),
            Err(ApiError::MissingActor)
        ));

        headers.insert("x-actor-id", "not-a-uuid".parse().unwrap());
        assert!(matches!(
            actor_from_headers(&headers),
            Err(ApiError::InvalidActor(_))
        ));

        let actor = Uuid::new_v4();
        headers.insert("x-actor-id", actor.to_string().parse().unwrap());
        assert_eq!(actor_from_headers(&headers).unwrap(), actor);
    }

    #[test]
    fn test_id_parsing() {
        assert!(matches!(parse_id("nope"), Err(ApiError::InvalidId(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
