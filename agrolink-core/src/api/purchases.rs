//! `/api/purchase/*` — procurement records

use crate::error::Result;
use crate::gateway::{HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::types::{NewPurchase, PurchaseRecord};

impl HttpGateway {
    pub async fn create_purchase(&self, purchase: &NewPurchase) -> Result<PurchaseRecord> {
        purchase.validate()?;
        let req = RequestEnvelope::post("/api/purchase/create").with_payload(Payload::json(purchase)?);
        self.call_data(req).await
    }

    pub async fn list_purchases(&self) -> Result<Vec<PurchaseRecord>> {
        self.call_data(RequestEnvelope::get("/api/purchase/all")).await
    }
}
