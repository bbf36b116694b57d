pub mod client;
pub mod engine;
pub mod status;
pub mod web_image_editor;

pub use crate::domain::model::{ApiResponse, OrderItem, OrderItemData, OrderRequest};
pub use crate::domain::ports::OrderService;
pub use crate::utils::error::Result;
