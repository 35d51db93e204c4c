//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::{DatabaseConfig, DispatchConfig},
    database::{self, Db},
    domain::{
        checkout::{CheckoutService, FulfillmentCheckoutService},
        store::PgFulfillmentStore,
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(
        database: &DatabaseConfig,
        dispatch: &DispatchConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(&database.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let store = PgFulfillmentStore::new(Db::new(pool));

        Ok(Self {
            checkout: Arc::new(FulfillmentCheckoutService::new(
                Arc::new(store),
                dispatch.notifications(),
                dispatch.ledger(),
            )),
        })
    }
}
