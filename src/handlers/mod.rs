use crate::app_state::AppState;
use crate::error::ApiError;
use crate::middleware::AuthMiddleware;
use actix_files::Files;
use actix_web::{web, HttpResponse, Responder};

mod cart;
mod products;
mod upload;
mod users;

async fn root() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to Essentia")
}

/// Registers the whole HTTP surface. Cart resources are wrapped in
/// [`AuthMiddleware`]; everything else is public.
pub fn configure(cfg: &mut web::ServiceConfig, state: AppState) {
    let auth = AuthMiddleware::new(state.tokens.clone());
    let images_dir = state.images.dir().to_path_buf();

    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into());

    cfg.app_data(web::Data::new(state))
        .app_data(json_config)
        .route("/", web::get().to(root))
        .route("/upload", web::post().to(upload::upload_image))
        .route("/add-product", web::post().to(products::add_product))
        .route("/delete-product", web::post().to(products::delete_product))
        .route("/allproducts", web::get().to(products::all_products))
        .route("/newcollection", web::get().to(products::new_collection))
        .route("/popularinwomen", web::get().to(products::popular_in_women))
        .route("/signup", web::post().to(users::sign_up))
        .route("/login", web::post().to(users::login))
        .service(
            web::resource("/addtocart")
                .wrap(auth.clone())
                .route(web::post().to(cart::add_to_cart)),
        )
        .service(
            web::resource("/removefromcart")
                .wrap(auth.clone())
                .route(web::post().to(cart::remove_from_cart)),
        )
        .service(
            web::resource("/getcart")
                .wrap(auth)
                .route(web::post().to(cart::get_cart)),
        )
        .service(Files::new("/images", images_dir));
}
