pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::ClientConfig;
pub use crate::core::{client::Diy99Client, engine::PushEngine, web_image_editor::WebImageEditorService};
pub use domain::model::{EditorSettings, OrderItem, OrderItemData, OrderRequest};
pub use utils::error::{Diy99Error, Result};
