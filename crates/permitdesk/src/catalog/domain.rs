use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permits::domain::ApplicationStatus;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(VendorId);
id_newtype!(BrandId);
id_newtype!(FoodTruckId);
id_newtype!(MenuItemId);

/// Business entity owning one or more brands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Partial update for a vendor profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
}

/// Named concept under a vendor; brand names are unique across the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub vendor_id: VendorId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBrand {
    pub name: String,
}

/// A single operating truck under a brand. `application_status` is a
/// denormalized copy of the linked permit application's status, kept in sync
/// by the permits service on every application save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodTruck {
    pub id: FoodTruckId,
    pub brand_id: BrandId,
    pub operating_region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_specialties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_highlights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFoodTruck {
    pub operating_region: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub cuisine_specialties: Option<String>,
    #[serde(default)]
    pub menu_highlights: Option<String>,
}

/// Partial update for a food truck's descriptive fields. The application
/// status is never writable through this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodTruckUpdate {
    pub operating_region: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub cuisine_specialties: Option<String>,
    pub menu_highlights: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub food_truck_id: FoodTruckId,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}
