use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ProductId = i64;
pub type ItemId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub category: String,
    pub new_price: f64,
    pub old_price: f64,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Fields accepted by `/add-product`. The id is assigned by the store.
#[derive(Deserialize, Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub image: String,
    pub category: String,
    pub new_price: f64,
    pub old_price: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            image: self.image,
            category: self.category,
            new_price: self.new_price,
            old_price: self.old_price,
            date: Utc::now(),
            available: self.available,
        }
    }
}

/// User document as persisted. `password` holds an argon2 encoded hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "cartData", default)]
    pub cart_data: BTreeMap<String, i64>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

/// Fields needed to register a user; `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password_hash,
            cart_data: BTreeMap::new(),
            date: Utc::now(),
        }
    }
}

/// Sparse per-user cart: only items with a positive quantity are present,
/// everything else reads as zero.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart(BTreeMap<ItemId, u32>);

impl Cart {
    pub fn quantity(&self, item: ItemId) -> u32 {
        self.0.get(&item).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a cart from the stored `cartData` document, whose keys are
    /// strings. Unparseable keys and non-positive quantities are dropped.
    pub fn from_stored(stored: &BTreeMap<String, i64>) -> Self {
        let items = stored
            .iter()
            .filter_map(|(key, qty)| {
                let item = key.parse::<ItemId>().ok()?;
                let qty = u32::try_from(*qty).ok().filter(|q| *q > 0)?;
                Some((item, qty))
            })
            .collect();
        Cart(items)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartItemInput {
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductInput {
    pub id: ProductId,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProductResponse {
    pub success: bool,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
}
