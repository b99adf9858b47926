//! `/api/user/*` — authentication and profile

use crate::credentials::UserProfile;
use crate::error::Result;
use crate::gateway::{Attachment, Envelope, HttpGateway, Payload, RequestEnvelope};
use crate::validation::Validate;

use super::types::{AuthPayload, LoginRequest, ProfileUpdate, RegistrationRequest};

/// Multipart field the backend reads the profile photo from
pub const PROFILE_IMAGE_FIELD: &str = "profileImage";

impl HttpGateway {
    /// `POST /api/user/login`, full envelope
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope<AuthPayload>> {
        request.validate()?;
        let req = RequestEnvelope::post("/api/user/login").with_payload(Payload::json(request)?);
        self.call_envelope(req).await
    }

    /// `POST /api/user/register`, full envelope; role travels in the payload
    pub async fn register(&self, request: &RegistrationRequest) -> Result<Envelope<AuthPayload>> {
        request.validate()?;
        let req = RequestEnvelope::post("/api/user/register").with_payload(Payload::json(request)?);
        self.call_envelope(req).await
    }

    /// `GET /api/user/getUserDetails`
    pub async fn get_user_details(&self) -> Result<UserProfile> {
        self.call_data(RequestEnvelope::get("/api/user/getUserDetails"))
            .await
    }

    /// `PUT /api/user/update-profile`, multipart when a photo is attached
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        image: Option<Attachment>,
    ) -> Result<Envelope<UserProfile>> {
        update.validate()?;
        let attachments = image
            .map(|mut img| {
                img.field = PROFILE_IMAGE_FIELD.to_string();
                vec![img]
            })
            .unwrap_or_default();
        let req = RequestEnvelope::put("/api/user/update-profile")
            .with_payload(Payload::with_attachments(update, attachments)?);
        self.call_envelope(req).await
    }

    /// `GET /api/user/getAllFarmers`
    pub async fn get_all_farmers(&self) -> Result<Vec<UserProfile>> {
        self.call_data(RequestEnvelope::get("/api/user/getAllFarmers"))
            .await
    }
}
