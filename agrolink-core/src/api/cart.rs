//! `/api/cart/*`

use serde_json::Value;

use crate::error::Result;
use crate::gateway::{Envelope, HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::item_path;
use super::types::{AddToCart, CartItem, CartQuantity};

const BASE: &str = "/api/cart";

impl HttpGateway {
    pub async fn get_cart(&self) -> Result<Vec<CartItem>> {
        self.call_data(RequestEnvelope::get(BASE)).await
    }

    pub async fn add_to_cart(&self, item: &AddToCart) -> Result<CartItem> {
        item.validate()?;
        let req = RequestEnvelope::post(format!("{BASE}/add")).with_payload(Payload::json(item)?);
        self.call_data(req).await
    }

    pub async fn update_cart_item(&self, id: &str, quantity: f64) -> Result<CartItem> {
        let body = CartQuantity { quantity };
        body.validate()?;
        let req = RequestEnvelope::put(item_path(BASE, id)?).with_payload(Payload::json(&body)?);
        self.call_data(req).await
    }

    pub async fn remove_cart_item(&self, id: &str) -> Result<Envelope<Value>> {
        self.call_envelope(RequestEnvelope::delete(item_path(BASE, id)?))
            .await
    }
}
