use actix_web::{middleware::Logger, App, HttpServer};
use essentia::auth::TokenService;
use essentia::config::AppConfig;
use essentia::middleware::cors;
use essentia::store::{MemoryStore, ProductStorePtr, UserStorePtr};
use essentia::upload::ImageStorage;
use essentia::{configure, db, AppState};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok(); // Load environment variables from .env file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    log::info!("Using {:?} store backend", config.backend());

    let (products, users): (ProductStorePtr, UserStorePtr) = match &config.database {
        Some(database) => {
            let (products, users) = db::open_stores(database).await?;
            let products: ProductStorePtr = Arc::new(products);
            let users: UserStorePtr = Arc::new(users);
            (products, users)
        }
        None => {
            log::warn!("Using in-memory store; data is lost on shutdown");
            let store = Arc::new(MemoryStore::new());
            let products: ProductStorePtr = store.clone();
            let users: UserStorePtr = store;
            (products, users)
        }
    };

    std::fs::create_dir_all(&config.upload.dir)?;
    let state = AppState::new(
        products,
        users,
        TokenService::new(&config.jwt_secret),
        ImageStorage::new(&config.upload),
    );

    let bind = (config.bind_addr.clone(), config.port);
    log::info!("Server is running on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .configure(move |cfg| configure(cfg, state))
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
