//! # shopfront
//!
//! An in-memory shop: a product catalog, one shopping cart, and an all-or-nothing checkout.
//!
//! ## Layout
//!
//! - **Domain types** - plain data with no actor concerns → [`domain::Product`], [`domain::CartView`], [`domain::Order`]
//! - **Shop state** - catalog, cart and checkout rules over one owned value → [`shop::ShopState`]
//! - **Service** - the single task that owns the state and handles one request at a time → [`actors::ShopService`]
//! - **Client** - cloneable handle with macro-generated request methods → [`clients::ShopClient`]
//! - **System coordinator** - startup from config and graceful shutdown → [`app_system::ShopSystem`]
//! - **Request boundary** - JSON requests and responses mapped onto client calls → [`api::dispatch`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), shopfront::error::ShopError> {
//! use shopfront::app_system::ShopSystem;
//! use shopfront::config::ShopConfig;
//!
//! let system = ShopSystem::new(&ShopConfig::default())?;
//!
//! system.shop_client.add_item(101, 2).await?;
//! let order = system.shop_client.checkout().await?;
//! println!("charged {}", order.total);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Expected Tracing Output
//!
//! ```text
//! INFO shop_system: Starting shop system
//! INFO shop_service: ShopService starting products=4
//! DEBUG add_item{product_id=101 quantity=2}: Sending request
//! INFO shop_service:handle_add_item{product_id=101 quantity=2}: Item added to cart in_cart=2
//! INFO shop_service:handle_checkout: Processing checkout request lines=1
//! INFO shop_service:handle_checkout: Order placed successfully total_items=2 total=150.00
//! ```

pub mod actors;
pub mod api;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod shop;

#[cfg(test)]
mod mock_framework;
