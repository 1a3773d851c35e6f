use crate::app_state::AppState;
use crate::catalog::{self, POPULAR_CATEGORY};
use crate::error::ApiError;
use crate::models::{DeleteProductInput, NewProduct, ProductResponse};
use actix_web::{web, HttpResponse};

fn validate(product: &NewProduct) -> Result<(), ApiError> {
    if product.name.trim().is_empty() {
        return Err(ApiError::bad_request("Product name is required"));
    }
    if product.image.trim().is_empty() {
        return Err(ApiError::bad_request("Product image is required"));
    }
    if product.category.trim().is_empty() {
        return Err(ApiError::bad_request("Product category is required"));
    }
    let valid_price = |price: f64| price.is_finite() && price >= 0.0;
    if !valid_price(product.new_price) || !valid_price(product.old_price) {
        return Err(ApiError::bad_request("Prices must be non-negative numbers"));
    }
    Ok(())
}

pub async fn add_product(
    state: web::Data<AppState>,
    data: web::Json<NewProduct>,
) -> Result<HttpResponse, ApiError> {
    let fields = data.into_inner();
    validate(&fields)?;

    let product = state.products.create_product(fields).await?;
    log::info!("Product {} added as id {}", product.name, product.id);
    Ok(HttpResponse::Ok().json(ProductResponse {
        success: true,
        name: product.name,
    }))
}

pub async fn delete_product(
    state: web::Data<AppState>,
    data: web::Json<DeleteProductInput>,
) -> Result<HttpResponse, ApiError> {
    match state.products.delete_product_by_id(data.id).await? {
        Some(product) => {
            log::info!("Product {} removed", product.id);
            Ok(HttpResponse::Ok().json(ProductResponse {
                success: true,
                name: product.name,
            }))
        }
        None => Err(ApiError::NotFound(format!("Product {} not found", data.id))),
    }
}

pub async fn all_products(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products = state.products.find_all_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

pub async fn new_collection(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products = state.products.find_all_products().await?;
    Ok(HttpResponse::Ok().json(catalog::new_collection(products)))
}

pub async fn popular_in_women(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products = state
        .products
        .find_products_by_category(POPULAR_CATEGORY)
        .await?;
    Ok(HttpResponse::Ok().json(catalog::popular(products)))
}
