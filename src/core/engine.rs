use crate::domain::model::OrderRequest;
use crate::domain::ports::OrderService;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Runs a validate-then-push cycle against any [`OrderService`].
pub struct PushEngine<S: OrderService> {
    service: S,
}

impl<S: OrderService> PushEngine<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn check(&self, request: &OrderRequest) -> Result<()> {
        tracing::info!("🔎 Validating {} order item(s)...", request.items.len());
        request.validate()?;
        tracing::info!("✅ Order request is valid");
        Ok(())
    }

    pub async fn run(&self, request: OrderRequest) -> Result<i64> {
        // 先在本地驗證，避免無效請求打到遠端
        self.check(&request)?;

        tracing::info!("🚀 Pushing orders...");
        let order_id = self.service.push_orders(request).await?;
        tracing::info!("📋 Order id: {}", order_id);

        Ok(order_id)
    }
}
