//! Cart endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Response,
};
use serde::de::DeserializeOwned;

use crate::errors::{AppError, AppResult};
use crate::models::{AddProductRequest, CartCreateRequest};
use crate::web::AppState;
use crate::web::responses::{handle_created, handle_error, handle_result};

/// GET /api/carts
pub async fn list_carts(State(state): State<AppState>) -> Response {
    handle_result(state.carts.get_all().await)
}

/// GET /api/carts/{id}
pub async fn get_cart(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    handle_result(state.carts.get_one_by_id(&id).await)
}

/// POST /api/carts
pub async fn create_cart(State(state): State<AppState>, body: Bytes) -> Response {
    let request: CartCreateRequest = match optional_json(&body) {
        Ok(request) => request,
        Err(e) => return handle_error(e),
    };
    handle_created(state.carts.insert_one(request).await)
}

/// POST /api/carts/{cid}/products/{pid}
pub async fn add_product_to_cart(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    let request: AddProductRequest = match optional_json(&body) {
        Ok(request) => request,
        Err(e) => return handle_error(e),
    };
    handle_result(
        state
            .carts
            .add_one_product(&cart_id, &product_id, request.quantity)
            .await,
    )
}

/// DELETE /api/carts/{cid}/products/{pid}
pub async fn remove_product_from_cart(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
) -> Response {
    handle_result(state.carts.remove_one_product(&cart_id, &product_id).await)
}

/// DELETE /api/carts/{id}
pub async fn delete_cart(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    handle_result(state.carts.delete_one_by_id(&id).await)
}

/// Parse a JSON body, treating an empty one as the default value
fn optional_json<T: DeserializeOwned + Default>(body: &[u8]) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {e}")))
}
