//! # Configuration State
//!
//! The shop settings the pages read at runtime.
//!
//! ## Thread Safety
//! Read-only after startup, so no mutex needed.

use serde::Serialize;

use crate::config::StorefrontConfig;

/// Shop settings exposed to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shop name shown in the header
    pub shop_name: String,

    /// Digits-only number for the WhatsApp contact link
    pub whatsapp_number: String,

    /// Image shown for products without images
    pub placeholder_image: String,
}

impl From<&StorefrontConfig> for ConfigState {
    fn from(config: &StorefrontConfig) -> Self {
        ConfigState {
            shop_name: config.shop.name.clone(),
            whatsapp_number: config.shop.whatsapp_number.clone(),
            placeholder_image: config.shop.placeholder_image.clone(),
        }
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::from(&StorefrontConfig::default())
    }
}
