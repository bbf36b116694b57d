use crate::utils::error::{Diy99Error, Result};
use crate::utils::validation::{
    validate_hex_color, validate_non_empty_list, validate_non_empty_string, validate_one_of,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};

// 資源類型
pub const IMAGE_TYPE: &str = "image";
pub const TEXT_TYPE: &str = "text";
pub const BACKGROUND_COLOR_TYPE: &str = "bgColor";
pub const BACKGROUND_IMAGE_TYPE: &str = "bgImage";
pub const BACKGROUND_COLOR_IMAGE_TYPE: &str = "bgColorImage";

pub const RESOURCE_TYPES: [&str; 5] = [
    IMAGE_TYPE,
    TEXT_TYPE,
    BACKGROUND_COLOR_TYPE,
    BACKGROUND_IMAGE_TYPE,
    BACKGROUND_COLOR_IMAGE_TYPE,
];

/// One customization record of an order item: a text overlay, an image, or a background.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemData {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub font: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "bgColor", default)]
    pub background_color: String,
    /// 當前資源對應的欄位名稱
    #[serde(default)]
    pub direction: String,
}

impl OrderItemData {
    pub fn text(font: &str, color: &str, content: &str) -> Self {
        Self {
            resource_type: TEXT_TYPE.to_string(),
            font: font.to_string(),
            color: color.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    pub fn image(url: &str) -> Self {
        Self {
            resource_type: IMAGE_TYPE.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn background_color(color: &str) -> Self {
        Self {
            resource_type: BACKGROUND_COLOR_TYPE.to_string(),
            background_color: color.to_string(),
            ..Default::default()
        }
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        let field = |name: &str| format!("{}.{}", path, name);

        validate_non_empty_string(&field("type"), &self.resource_type)?;
        validate_one_of(&field("type"), &self.resource_type, &RESOURCE_TYPES)?;

        match self.resource_type.as_str() {
            TEXT_TYPE => {
                validate_non_empty_string(&field("font"), &self.font)?;
                validate_hex_color(&field("color"), &self.color)?;
                validate_non_empty_string(&field("content"), &self.content)?;
            }
            IMAGE_TYPE | BACKGROUND_COLOR_IMAGE_TYPE => {
                validate_url(&field("url"), &self.url)?;
            }
            BACKGROUND_COLOR_TYPE => {
                validate_non_empty_string(&field("bgColor"), &self.background_color)?;
            }
            _ => {}
        }

        Ok(())
    }
}

impl Validate for OrderItemData {
    fn validate(&self) -> Result<()> {
        self.validate_at("data")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub dpi: i32,
    #[serde(default)]
    pub remark: String,
    #[serde(rename = "extraCustomizeInfo", default)]
    pub extra_customize_info: String,
}

/// One customizable product line submitted for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "orderNumber", default)]
    pub order_number: String,
    #[serde(rename = "key", default)]
    pub order_key: String,
    // 遠端欄位就是拼成 templet
    #[serde(rename = "templetId", default)]
    pub template_id: i64,
    #[serde(rename = "preViewPic", default)]
    pub preview_picture_url: String,
    /// Empty means "use the request-wide callback URL".
    #[serde(rename = "callBackUrl", default)]
    pub callback_url: String,
    #[serde(default)]
    pub data: Vec<OrderItemData>,
    #[serde(default)]
    pub state: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub editor: EditorSettings,
}

impl OrderItem {
    fn validate_at(&self, path: &str) -> Result<()> {
        let field = |name: &str| format!("{}.{}", path, name);

        validate_non_empty_string(&field("orderNumber"), &self.order_number)?;
        validate_non_empty_string(&field("key"), &self.order_key)?;
        if self.template_id == 0 {
            return Err(Diy99Error::validation(
                field("templetId"),
                "Template id is required",
            ));
        }
        validate_url(&field("preViewPic"), &self.preview_picture_url)?;
        if !self.callback_url.is_empty() {
            validate_url(&field("callBackUrl"), &self.callback_url)?;
        }
        validate_non_empty_list(&field("data"), &self.data)?;

        for (i, data) in self.data.iter().enumerate() {
            data.validate_at(&format!("{}.data[{}]", path, i))?;
        }

        Ok(())
    }
}

impl Validate for OrderItem {
    fn validate(&self) -> Result<()> {
        self.validate_at("item")
    }
}

/// An order submission: one callback URL shared by every line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "callbackUrl", default)]
    pub callback_url: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderRequest {
    pub fn new(callback_url: impl Into<String>) -> Self {
        Self {
            callback_url: callback_url.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Items as they go over the wire: inherited callback URL filled in.
    pub fn wire_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if item.callback_url.is_empty() {
                    item.callback_url = self.callback_url.clone();
                }
                item
            })
            .collect()
    }
}

impl Validate for OrderRequest {
    fn validate(&self) -> Result<()> {
        validate_url("callbackUrl", &self.callback_url)?;
        validate_non_empty_list("items", &self.items)?;

        for (i, item) in self.items.iter().enumerate() {
            item.validate_at(&format!("items[{}]", i))?;
        }

        Ok(())
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub result: Option<bool>,
    /// `null` 與缺欄位都視為 0
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ApiResponse {
    pub fn status_code(&self) -> i64 {
        self.code.unwrap_or(0)
    }

    pub fn message(&self) -> &str {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or_default()
    }
}
