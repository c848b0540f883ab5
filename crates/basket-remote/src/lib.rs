//! Basket Remote: HTTP adapters for the product and stock service ports.

pub mod http;
pub mod product_client;
pub mod stock_client;

pub use http::build_client;
pub use product_client::HttpProductClient;
pub use stock_client::HttpStockClient;
