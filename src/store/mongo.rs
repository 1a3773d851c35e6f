use super::{ProductStore, StoreError, UserStore, MAX_ID_ATTEMPTS};
use crate::models::{Cart, ItemId, NewProduct, NewUser, Product, ProductId, User};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{FindOneOptions, FindOptions};
use mongodb::{Collection, Database};
use uuid::Uuid;

pub const PRODUCTS_COLLECTION: &str = "products";
pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &MongoError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        _ => false,
    }
}

fn cart_field(item: ItemId) -> String {
    format!("cartData.{item}")
}

#[derive(Clone)]
pub struct MongoProductStore {
    products: Collection<Product>,
}

impl MongoProductStore {
    pub fn new(db: &Database) -> Self {
        Self {
            products: db.collection(PRODUCTS_COLLECTION),
        }
    }

    async fn find_sorted(&self, filter: Option<Document>) -> Result<Vec<Product>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let cursor = self.products.find(filter, options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    async fn max_id(&self) -> Result<ProductId, StoreError> {
        let options = FindOneOptions::builder().sort(doc! { "id": -1 }).build();
        let latest = self.products.find_one(None, options).await?;
        Ok(latest.map_or(0, |p| p.id))
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find_all_products(&self) -> Result<Vec<Product>, StoreError> {
        self.find_sorted(None).await
    }

    async fn find_products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, StoreError> {
        self.find_sorted(Some(doc! { "category": category })).await
    }

    // The unique index on `id` turns a lost race into a duplicate-key error,
    // after which the maximum is re-read.
    async fn create_product(&self, fields: NewProduct) -> Result<Product, StoreError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let product = fields.clone().into_product(self.max_id().await? + 1);
            match self.products.insert_one(&product, None).await {
                Ok(_) => return Ok(product),
                Err(e) if is_duplicate_key(&e) => {
                    log::warn!("Product id {} taken, retrying (attempt {attempt})", product.id);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(StoreError::IdContention(MAX_ID_ATTEMPTS))
    }

    async fn delete_product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.find_one_and_delete(doc! { "id": id }, None).await?)
    }
}

#[derive(Clone)]
pub struct MongoUserStore {
    users: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection(USERS_COLLECTION),
        }
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "id": user_id }, None).await?)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "email": email }, None).await?)
    }

    async fn create_user(&self, fields: NewUser) -> Result<User, StoreError> {
        if self.find_user_by_email(&fields.email).await?.is_some() {
            return Err(StoreError::DuplicateUser);
        }
        let user = fields.into_user(Uuid::new_v4().to_string());
        match self.users.insert_one(&user, None).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::DuplicateUser),
            Err(e) => Err(e.into()),
        }
    }

    async fn increment_cart_item(&self, user_id: &str, item: ItemId) -> Result<(), StoreError> {
        let mut inc = Document::new();
        inc.insert(cart_field(item), 1_i64);
        let result = self
            .users
            .update_one(doc! { "id": user_id }, doc! { "$inc": inc }, None)
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::UserNotFound);
        }
        Ok(())
    }

    async fn decrement_cart_item(
        &self,
        user_id: &str,
        item: ItemId,
    ) -> Result<bool, StoreError> {
        let field = cart_field(item);
        let mut filter = doc! { "id": user_id };
        filter.insert(field.clone(), doc! { "$gt": 0_i64 });
        let mut inc = Document::new();
        inc.insert(field, -1_i64);

        let result = self
            .users
            .update_one(filter, doc! { "$inc": inc }, None)
            .await?;
        if result.matched_count > 0 {
            return Ok(true);
        }
        // Nothing matched: either the quantity is already zero or the user is gone.
        match self.find_by_id(user_id).await? {
            Some(_) => Ok(false),
            None => Err(StoreError::UserNotFound),
        }
    }

    async fn cart(&self, user_id: &str) -> Result<Cart, StoreError> {
        let user = self.find_by_id(user_id).await?.ok_or(StoreError::UserNotFound)?;
        Ok(Cart::from_stored(&user.cart_data))
    }
}
