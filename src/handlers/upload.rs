use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::UploadResponse;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

pub async fn upload_image(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let file_name = state.images.save(payload).await?;
    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        image_url: state.images.public_url(&file_name),
    }))
}
