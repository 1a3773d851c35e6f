use crate::auth::TokenService;
use crate::cart::CartManager;
use crate::store::{ProductStorePtr, UserStorePtr};
use crate::upload::ImageStorage;

/// Shared state handed to every handler through `web::Data`.
///
/// Built once at start-up; the stores are trait objects so the Mongo and
/// in-memory backends are interchangeable.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductStorePtr,
    pub users: UserStorePtr,
    pub tokens: TokenService,
    pub cart: CartManager,
    pub images: ImageStorage,
}

impl AppState {
    pub fn new(
        products: ProductStorePtr,
        users: UserStorePtr,
        tokens: TokenService,
        images: ImageStorage,
    ) -> Self {
        let cart = CartManager::new(users.clone());
        AppState {
            products,
            users,
            tokens,
            cart,
            images,
        }
    }
}
