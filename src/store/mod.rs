//! Persistence contracts for products and users.
//!
//! Handlers and the cart manager only see the [`ProductStore`] and
//! [`UserStore`] traits; the MongoDB and in-memory backends are chosen at
//! start-up and injected through application state.

use crate::models::{Cart, ItemId, NewProduct, NewUser, Product, ProductId, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::{MongoProductStore, MongoUserStore, PRODUCTS_COLLECTION, USERS_COLLECTION};

/// Attempts made to insert a product before giving up on id contention.
pub(crate) const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with the same email address is already registered.
    #[error("existing user found with same email address")]
    DuplicateUser,

    /// The referenced user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// Product id assignment kept colliding with concurrent inserts.
    #[error("could not assign a product id after {0} attempts")]
    IdContention(usize),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id.
    async fn find_all_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Products of one category ordered by id.
    async fn find_products_by_category(&self, category: &str)
        -> Result<Vec<Product>, StoreError>;

    /// Inserts a product with id `max(existing) + 1`, or 1 for an empty store.
    async fn create_product(&self, fields: NewProduct) -> Result<Product, StoreError>;

    /// Removes a product, returning it if it existed.
    async fn delete_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Registers a user with an empty cart. Fails with
    /// [`StoreError::DuplicateUser`] when the email is taken.
    async fn create_user(&self, fields: NewUser) -> Result<User, StoreError>;

    /// Atomically adds one unit of `item` to the user's cart.
    async fn increment_cart_item(&self, user_id: &str, item: ItemId) -> Result<(), StoreError>;

    /// Atomically removes one unit of `item` if the quantity is positive.
    /// Returns whether a unit was removed.
    async fn decrement_cart_item(&self, user_id: &str, item: ItemId)
        -> Result<bool, StoreError>;

    async fn cart(&self, user_id: &str) -> Result<Cart, StoreError>;
}

pub type ProductStorePtr = Arc<dyn ProductStore>;
pub type UserStorePtr = Arc<dyn UserStore>;
