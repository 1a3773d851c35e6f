//! Per-user cart mutations.
//!
//! Each operation is a single atomic store update keyed by the user id, so
//! concurrent requests for the same user never lose increments and a
//! quantity can never drop below zero.

use crate::models::{Cart, ItemId};
use crate::store::{StoreError, UserStorePtr};

#[derive(Clone)]
pub struct CartManager {
    users: UserStorePtr,
}

impl CartManager {
    pub fn new(users: UserStorePtr) -> Self {
        CartManager { users }
    }

    pub async fn add_item(&self, user_id: &str, item: ItemId) -> Result<(), StoreError> {
        self.users.increment_cart_item(user_id, item).await?;
        log::debug!("User {} added item {}", user_id, item);
        Ok(())
    }

    /// Succeeds whether or not a unit was actually removed.
    pub async fn remove_item(&self, user_id: &str, item: ItemId) -> Result<(), StoreError> {
        let removed = self.users.decrement_cart_item(user_id, item).await?;
        if removed {
            log::debug!("User {} removed item {}", user_id, item);
        }
        Ok(())
    }

    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, StoreError> {
        self.users.cart(user_id).await
    }
}
