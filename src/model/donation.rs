use chrono::{NaiveDate, NaiveDateTime};
use entity::donation::{Category, DonationStatus, QuantityUnit};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DonationDto {
    pub donation_id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Quantity in `quantity_unit`, always a canonical unit
    pub quantity_value: f64,
    pub quantity_unit: QuantityUnit,
    pub expiry_date: NaiveDate,
    pub category: Category,
    pub donation_status: DonationStatus,
    pub donation_picture: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<entity::donation::Model> for DonationDto {
    fn from(model: entity::donation::Model) -> Self {
        Self {
            donation_id: model.donation_id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            location: model.location,
            quantity_value: model.quantity_value,
            quantity_unit: model.quantity_unit,
            expiry_date: model.expiry_date,
            category: model.category,
            donation_status: model.donation_status,
            donation_picture: model.donation_picture,
            created_at: model.created_at,
        }
    }
}
