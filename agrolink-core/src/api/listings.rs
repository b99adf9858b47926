//! `/api/crop-listing/*` — produce listed for sale by farmers

use serde_json::Value;

use crate::error::Result;
use crate::gateway::{Attachment, Envelope, HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::item_path;
use super::types::{CropListing, NewListing};

const BASE: &str = "/api/crop-listing";

/// Multipart field for listing photos
pub const LISTING_IMAGE_FIELD: &str = "images";

impl HttpGateway {
    pub async fn create_listing(
        &self,
        listing: &NewListing,
        images: Vec<Attachment>,
    ) -> Result<CropListing> {
        listing.validate()?;
        let images = images
            .into_iter()
            .map(|mut img| {
                img.field = LISTING_IMAGE_FIELD.to_string();
                img
            })
            .collect();
        let req = RequestEnvelope::post(format!("{BASE}/create"))
            .with_payload(Payload::with_attachments(listing, images)?);
        self.call_data(req).await
    }

    /// Every open listing (buyer view)
    pub async fn list_listings(&self) -> Result<Vec<CropListing>> {
        self.call_data(RequestEnvelope::get(format!("{BASE}/all"))).await
    }

    /// Listings owned by the signed-in farmer
    pub async fn my_listings(&self) -> Result<Vec<CropListing>> {
        self.call_data(RequestEnvelope::get(format!("{BASE}/my-listings")))
            .await
    }

    pub async fn get_listing(&self, id: &str) -> Result<CropListing> {
        self.call_data(RequestEnvelope::get(item_path(BASE, id)?)).await
    }

    pub async fn update_listing(&self, id: &str, listing: &NewListing) -> Result<CropListing> {
        listing.validate()?;
        let req = RequestEnvelope::put(item_path(BASE, id)?).with_payload(Payload::json(listing)?);
        self.call_data(req).await
    }

    /// Full envelope; the backend only reports a message
    pub async fn delete_listing(&self, id: &str) -> Result<Envelope<Value>> {
        self.call_envelope(RequestEnvelope::delete(item_path(BASE, id)?))
            .await
    }
}
