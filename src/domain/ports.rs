use crate::domain::model::OrderRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can accept an order submission and hand back the remote order id.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn push_orders(&self, request: OrderRequest) -> Result<i64>;
}
