//! Local required-field checks, run before anything is dispatched
//!
//! A failure here never reaches the gateway; the screen shows the
//! message straight away.

use crate::api::types::{
    AddToCart, CartQuantity, LoginRequest, NewCrop, NewFarm, NewListing, NewProduct, NewPurchase,
    PlaceOrder, ProfileUpdate, RegistrationRequest,
};
use crate::error::{ClientError, Result};
use crate::router::Role;

pub const MIN_PASSWORD_LEN: usize = 6;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ClientError::validation(field, format!("{field} must be greater than zero")));
    }
    Ok(())
}

/// Indian mobile number: exactly ten digits
pub fn validate_phone(phone: &str) -> Result<()> {
    let phone = phone.trim();
    required("phone", phone)?;
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::validation("phone", "phone must be a 10 digit number"));
    }
    Ok(())
}

fn validate_email(field: &str, email: &str) -> Result<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ClientError::validation(field, "enter a valid email address")),
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<()> {
        validate_phone(&self.phone)?;
        required("password", &self.password)
    }
}

impl Validate for RegistrationRequest {
    fn validate(&self) -> Result<()> {
        required("firstName", &self.first_name)?;
        required("lastName", &self.last_name)?;
        validate_phone(&self.phone)?;
        if let Some(email) = &self.email_id {
            validate_email("emailId", email)?;
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::validation(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if self.role == Role::Fpo {
            required(
                "organizationName",
                self.organization_name.as_deref().unwrap_or_default(),
            )?;
        }
        Ok(())
    }
}

impl Validate for ProfileUpdate {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.first_name {
            required("firstName", name)?;
        }
        if let Some(name) = &self.last_name {
            required("lastName", name)?;
        }
        if let Some(email) = &self.email_id {
            validate_email("emailId", email)?;
        }
        Ok(())
    }
}

impl Validate for NewListing {
    fn validate(&self) -> Result<()> {
        required("cropName", &self.crop_name)?;
        positive("quantity", self.quantity)?;
        required("unit", &self.unit)?;
        positive("pricePerUnit", self.price_per_unit)
    }
}

impl Validate for NewProduct {
    fn validate(&self) -> Result<()> {
        required("name", &self.name)?;
        positive("price", self.price)?;
        if !self.stock.is_finite() || self.stock < 0.0 {
            return Err(ClientError::validation("stock", "stock cannot be negative"));
        }
        required("unit", &self.unit)
    }
}

impl Validate for NewPurchase {
    fn validate(&self) -> Result<()> {
        required("farmerId", &self.farmer_id)?;
        required("cropName", &self.crop_name)?;
        positive("quantity", self.quantity)?;
        required("unit", &self.unit)?;
        positive("pricePerUnit", self.price_per_unit)
    }
}

impl Validate for AddToCart {
    fn validate(&self) -> Result<()> {
        required("productId", &self.product_id)?;
        positive("quantity", self.quantity)
    }
}

impl Validate for CartQuantity {
    fn validate(&self) -> Result<()> {
        positive("quantity", self.quantity)
    }
}

impl Validate for PlaceOrder {
    fn validate(&self) -> Result<()> {
        required("shippingAddress", &self.shipping_address)?;
        required("paymentMethod", &self.payment_method)
    }
}

impl Validate for NewFarm {
    fn validate(&self) -> Result<()> {
        required("name", &self.name)?;
        required("location", &self.location)?;
        positive("area", self.area)?;
        required("areaUnit", &self.area_unit)
    }
}

impl Validate for NewCrop {
    fn validate(&self) -> Result<()> {
        required("farmId", &self.farm_id)?;
        required("name", &self.name)
    }
}
