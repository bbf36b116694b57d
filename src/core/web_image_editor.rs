use crate::core::client::Diy99Client;
use crate::domain::model::OrderRequest;
use crate::domain::ports::OrderService;
use crate::utils::error::{Diy99Error, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;

pub const CREATE_ORDERS_PATH: &str = "/order/createOrders";

/// Web image editor endpoints.
#[derive(Clone)]
pub struct WebImageEditorService {
    client: Diy99Client,
}

impl WebImageEditorService {
    pub(crate) fn new(client: Diy99Client) -> Self {
        Self { client }
    }

    /// 推送訂單，成功時回傳遠端訂單號
    pub async fn push_orders(&self, request: &OrderRequest) -> Result<i64> {
        request.validate()?;

        let items = request.wire_items();
        tracing::info!(
            "📦 Pushing {} order item(s) to {}",
            items.len(),
            CREATE_ORDERS_PATH
        );

        let response = self.client.post(CREATE_ORDERS_PATH, &items).await?;

        let order_id = order_id_from(&response.data)?;
        tracing::info!("✅ 99Diy accepted orders, order id {}", order_id);
        Ok(order_id)
    }
}

fn order_id_from(data: &serde_json::Value) -> Result<i64> {
    if let Some(id) = data.as_i64() {
        return Ok(id);
    }
    match data.as_f64() {
        Some(id) => Ok(id as i64),
        None => Err(Diy99Error::MissingOrderIdError),
    }
}

#[async_trait]
impl OrderService for WebImageEditorService {
    async fn push_orders(&self, request: OrderRequest) -> Result<i64> {
        WebImageEditorService::push_orders(self, &request).await
    }
}
