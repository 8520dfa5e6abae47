//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, HmacAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsEngine, CartsService, CartsStore, PgCartsStore},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        auth: HmacAuthService,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));
        let store: Arc<dyn CartsStore> = Arc::new(PgCartsStore::new(db.clone()));

        Ok(Self {
            users: Arc::new(PgUsersService::new(db, auth.clone())),
            products: Arc::clone(&products),
            carts: Arc::new(CartsEngine::new(store, products)),
            auth: Arc::new(auth),
        })
    }
}
