//! `/api/product/*` — inputs sold through the marketplace

use serde_json::Value;

use crate::error::Result;
use crate::gateway::{Attachment, Envelope, HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::item_path;
use super::types::{NewProduct, Product};

const BASE: &str = "/api/product";

pub const PRODUCT_IMAGE_FIELD: &str = "images";

impl HttpGateway {
    pub async fn create_product(&self, product: &NewProduct, images: Vec<Attachment>) -> Result<Product> {
        product.validate()?;
        let images = images
            .into_iter()
            .map(|mut img| {
                img.field = PRODUCT_IMAGE_FIELD.to_string();
                img
            })
            .collect();
        let req = RequestEnvelope::post(format!("{BASE}/create"))
            .with_payload(Payload::with_attachments(product, images)?);
        self.call_data(req).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.call_data(RequestEnvelope::get(format!("{BASE}/all"))).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.call_data(RequestEnvelope::get(item_path(BASE, id)?)).await
    }

    pub async fn update_product(&self, id: &str, product: &NewProduct) -> Result<Product> {
        product.validate()?;
        let req = RequestEnvelope::put(item_path(BASE, id)?).with_payload(Payload::json(product)?);
        self.call_data(req).await
    }

    /// Flip `isActive`; full envelope with the updated product in `data`
    pub async fn toggle_product_status(&self, id: &str) -> Result<Envelope<Product>> {
        let path = format!("{}/toggle-status", item_path(BASE, id)?);
        self.call_envelope(RequestEnvelope::put(path)).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<Envelope<Value>> {
        self.call_envelope(RequestEnvelope::delete(item_path(BASE, id)?))
            .await
    }
}
