use crate::app_state::AppState;
use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::CartItemInput;
use actix_web::{web, HttpResponse};

pub async fn add_to_cart(
    state: web::Data<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    data: web::Json<CartItemInput>,
) -> Result<HttpResponse, ApiError> {
    state.cart.add_item(&user_id, data.item_id).await?;
    Ok(HttpResponse::Ok().content_type("text/plain").body("Added"))
}

pub async fn remove_from_cart(
    state: web::Data<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    data: web::Json<CartItemInput>,
) -> Result<HttpResponse, ApiError> {
    state.cart.remove_item(&user_id, data.item_id).await?;
    Ok(HttpResponse::Ok().content_type("text/plain").body("Removed"))
}

pub async fn get_cart(
    state: web::Data<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let cart = state.cart.get_cart(&user_id).await?;
    Ok(HttpResponse::Ok().json(cart))
}
