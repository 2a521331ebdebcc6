//! Tests for DonationService.

mod update;

use sharefood::server::service::{
    donation::{CreateDonationInput, UpdateDonationInput},
    image_host::ImageUpload,
};

fn picture() -> ImageUpload {
    ImageUpload {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
        filename: "bread.jpg".to_string(),
        content_type: Some("image/jpeg".to_string()),
    }
}

fn valid_input() -> CreateDonationInput {
    CreateDonationInput {
        title: Some("Sourdough loaves".to_string()),
        description: Some("Three loaves baked this morning".to_string()),
        location: Some("Main street 1".to_string()),
        quantity_value: Some("1500".to_string()),
        quantity_unit: Some("g".to_string()),
        expiry_date: Some("2030-06-01".to_string()),
        category: Some("bakery".to_string()),
        picture: None,
    }
}

fn status_edit(status: entity::donation::DonationStatus) -> UpdateDonationInput {
    UpdateDonationInput {
        status: Some(status),
        picture: None,
    }
}
