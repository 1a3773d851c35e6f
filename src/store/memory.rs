use super::{ProductStore, StoreError, UserStore};
use crate::models::{Cart, ItemId, NewProduct, NewUser, Product, ProductId, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    users: HashMap<String, User>,
}

/// Process-local store used with `STORE_BACKEND=memory` and in tests.
///
/// Every operation runs under a single lock, which gives the same
/// atomicity as the single-document updates of the Mongo backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing products, kept as given.
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::default();
        store.lock().products = products;
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sorted_by_id(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by_key(|p| p.id);
    products
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_all_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(sorted_by_id(self.lock().products.clone()))
    }

    async fn find_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        let matching = self
            .lock()
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        Ok(sorted_by_id(matching))
    }

    async fn create_product(&self, fields: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.lock();
        let next_id = inner.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let product = fields.into_product(next_id);
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn delete_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let mut inner = self.lock();
        let position = inner.products.iter().position(|p| p.id == id);
        Ok(position.map(|idx| inner.products.remove(idx)))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, fields: NewUser) -> Result<User, StoreError> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.email == fields.email) {
            return Err(StoreError::DuplicateUser);
        }
        let user = fields.into_user(Uuid::new_v4().to_string());
        inner.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn increment_cart_item(&self, user_id: &str, item: ItemId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let user = inner.users.get_mut(user_id).ok_or(StoreError::UserNotFound)?;
        *user.cart_data.entry(item.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn decrement_cart_item(
        &self,
        user_id: &str,
        item: ItemId,
    ) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        let user = inner.users.get_mut(user_id).ok_or(StoreError::UserNotFound)?;
        match user.cart_data.get_mut(&item.to_string()) {
            Some(qty) if *qty > 0 => {
                *qty -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn cart(&self, user_id: &str) -> Result<Cart, StoreError> {
        let inner = self.lock();
        let user = inner.users.get(user_id).ok_or(StoreError::UserNotFound)?;
        Ok(Cart::from_stored(&user.cart_data))
    }
}
