use tracing::{error, info, instrument};

use crate::actors::ShopService;
use crate::clients::ShopClient;
use crate::config::ShopConfig;
use crate::error::ShopError;
use crate::shop::{Catalog, ShopState};

/// Owns the running shop service: builds its state from config, spawns it, and shuts it down.
pub struct ShopSystem {
    pub shop_client: ShopClient,
    handle: tokio::task::JoinHandle<()>,
}

impl ShopSystem {
    /// Starts the service. Must be called from within a tokio runtime.
    #[instrument(name = "shop_system", skip(config))]
    pub fn new(config: &ShopConfig) -> Result<Self, ShopError> {
        info!("Starting shop system");

        let catalog = Catalog::new(config.seed_products())?;
        let (service, shop_client) =
            ShopService::new(config.service.buffer_size, ShopState::new(catalog));
        let handle = tokio::spawn(service.run());

        info!("Shop system started successfully");
        Ok(Self {
            shop_client,
            handle,
        })
    }

    /// Stops the service after the requests already queued, then waits for it to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), ShopError> {
        info!("Shutting down shop system");

        if let Err(e) = self.shop_client.shutdown().await {
            // Already stopped; the join below still reports how it ended.
            error!(error = %e, "Shutdown request not delivered");
        }
        drop(self.shop_client);

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(ShopError::ActorCommunicationError(format!(
                "Service task failed: {}",
                e
            )));
        }

        info!("Shop system shutdown complete");
        Ok(())
    }
}
