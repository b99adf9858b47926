//! `/api/farm/*` and `/api/crop/*` — a farmer's land and what grows on it

use serde_json::Value;

use crate::error::Result;
use crate::gateway::{Envelope, HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::item_path;
use super::types::{Crop, Farm, NewCrop, NewFarm};

const FARM: &str = "/api/farm";
const CROP: &str = "/api/crop";

impl HttpGateway {
    // ─── Farms ───

    pub async fn create_farm(&self, farm: &NewFarm) -> Result<Farm> {
        farm.validate()?;
        let req = RequestEnvelope::post(format!("{FARM}/create")).with_payload(Payload::json(farm)?);
        self.call_data(req).await
    }

    pub async fn list_farms(&self) -> Result<Vec<Farm>> {
        self.call_data(RequestEnvelope::get(format!("{FARM}/all"))).await
    }

    pub async fn get_farm(&self, id: &str) -> Result<Farm> {
        self.call_data(RequestEnvelope::get(item_path(FARM, id)?)).await
    }

    pub async fn update_farm(&self, id: &str, farm: &NewFarm) -> Result<Farm> {
        farm.validate()?;
        let req = RequestEnvelope::put(item_path(FARM, id)?).with_payload(Payload::json(farm)?);
        self.call_data(req).await
    }

    pub async fn delete_farm(&self, id: &str) -> Result<Envelope<Value>> {
        self.call_envelope(RequestEnvelope::delete(item_path(FARM, id)?))
            .await
    }

    // ─── Crops ───

    pub async fn create_crop(&self, crop: &NewCrop) -> Result<Crop> {
        crop.validate()?;
        let req = RequestEnvelope::post(format!("{CROP}/create")).with_payload(Payload::json(crop)?);
        self.call_data(req).await
    }

    pub async fn list_crops(&self) -> Result<Vec<Crop>> {
        self.call_data(RequestEnvelope::get(format!("{CROP}/all"))).await
    }

    pub async fn get_crop(&self, id: &str) -> Result<Crop> {
        self.call_data(RequestEnvelope::get(item_path(CROP, id)?)).await
    }

    pub async fn update_crop(&self, id: &str, crop: &NewCrop) -> Result<Crop> {
        crop.validate()?;
        let req = RequestEnvelope::put(item_path(CROP, id)?).with_payload(Payload::json(crop)?);
        self.call_data(req).await
    }

    pub async fn delete_crop(&self, id: &str) -> Result<Envelope<Value>> {
        self.call_envelope(RequestEnvelope::delete(item_path(CROP, id)?))
            .await
    }
}
