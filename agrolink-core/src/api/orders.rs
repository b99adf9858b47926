//! `/api/order/*`

use crate::error::Result;
use crate::gateway::{HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::item_path;
use super::types::{Order, PlaceOrder};

const BASE: &str = "/api/order";

impl HttpGateway {
    /// Turn the current cart into an order
    pub async fn place_order(&self, order: &PlaceOrder) -> Result<Order> {
        order.validate()?;
        let req = RequestEnvelope::post(format!("{BASE}/place")).with_payload(Payload::json(order)?);
        self.call_data(req).await
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>> {
        self.call_data(RequestEnvelope::get(format!("{BASE}/my-orders")))
            .await
    }

    pub async fn get_order(&self, id: &str) -> Result<Order> {
        self.call_data(RequestEnvelope::get(item_path(BASE, id)?)).await
    }
}
