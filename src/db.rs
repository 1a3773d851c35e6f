use crate::config::DatabaseConfig;
use crate::models::{Product, User};
use crate::store::{MongoProductStore, MongoUserStore, PRODUCTS_COLLECTION, USERS_COLLECTION};
use mongodb::bson::Document;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};

pub async fn connect(config: &DatabaseConfig) -> mongodb::error::Result<Database> {
    let client_options = ClientOptions::parse(&config.url).await?;
    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.name))
}

fn unique_on(field: &str) -> IndexModel {
    let mut keys = Document::new();
    keys.insert(field, 1);
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

/// Unique indexes backing email uniqueness and product id assignment.
/// Creating an index that already exists is a no-op on the server.
pub async fn ensure_indexes(db: &Database) -> mongodb::error::Result<()> {
    db.collection::<User>(USERS_COLLECTION)
        .create_index(unique_on("email"), None)
        .await?;
    db.collection::<Product>(PRODUCTS_COLLECTION)
        .create_index(unique_on("id"), None)
        .await?;
    Ok(())
}

/// Connects, prepares indexes and builds both Mongo-backed stores.
pub async fn open_stores(
    config: &DatabaseConfig,
) -> mongodb::error::Result<(MongoProductStore, MongoUserStore)> {
    let db = connect(config).await?;
    ensure_indexes(&db).await?;
    log::info!("Connected to MongoDB database '{}'", config.name);
    Ok((MongoProductStore::new(&db), MongoUserStore::new(&db)))
}
