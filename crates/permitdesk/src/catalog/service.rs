use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::domain::{
    Brand, BrandId, FoodTruck, FoodTruckId, FoodTruckUpdate, MenuItem, MenuItemId, MenuItemUpdate,
    NewBrand, NewFoodTruck, NewMenuItem, NewVendor, Vendor, VendorId, VendorUpdate,
};
use super::repository::{
    BrandRepository, FoodTruckRepository, MenuItemRepository, VendorRepository,
};
use crate::store::{RepositoryError, Sequence};

static VENDOR_SEQUENCE: Sequence = Sequence::new();
static BRAND_SEQUENCE: Sequence = Sequence::new();
static TRUCK_SEQUENCE: Sequence = Sequence::new();
static MENU_ITEM_SEQUENCE: Sequence = Sequence::new();

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: u64 },
    #[error("a vendor with this email already exists")]
    DuplicateEmail,
    #[error("a brand with this name already exists")]
    DuplicateBrandName,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound { .. } | CatalogError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            CatalogError::DuplicateEmail
            | CatalogError::DuplicateBrandName
            | CatalogError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            CatalogError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// CRUD over the vendor → brand → food truck → menu item hierarchy.
/// Deletes cascade down the ownership chain.
pub struct CatalogService {
    vendors: Arc<dyn VendorRepository>,
    brands: Arc<dyn BrandRepository>,
    trucks: Arc<dyn FoodTruckRepository>,
    menu_items: Arc<dyn MenuItemRepository>,
}

impl CatalogService {
    pub fn new(
        vendors: Arc<dyn VendorRepository>,
        brands: Arc<dyn BrandRepository>,
        trucks: Arc<dyn FoodTruckRepository>,
        menu_items: Arc<dyn MenuItemRepository>,
    ) -> Self {
        Self {
            vendors,
            brands,
            trucks,
            menu_items,
        }
    }

    pub fn register_vendor(&self, new_vendor: NewVendor) -> Result<Vendor, CatalogError> {
        if self.vendors.find_by_email(&new_vendor.email)?.is_some() {
            return Err(CatalogError::DuplicateEmail);
        }

        let vendor = Vendor {
            id: VendorId(VENDOR_SEQUENCE.next()),
            name: new_vendor.name,
            email: new_vendor.email,
            password: new_vendor.password,
            address: new_vendor.address,
        };
        Ok(self.vendors.insert(vendor)?)
    }

    pub fn vendor(&self, id: VendorId) -> Result<Vendor, CatalogError> {
        self.vendors
            .fetch(id)?
            .ok_or(CatalogError::NotFound { entity: "vendor", id: id.0 })
    }

    pub fn vendors(&self) -> Result<Vec<Vendor>, CatalogError> {
        Ok(self.vendors.list()?)
    }

    pub fn update_vendor(&self, id: VendorId, update: VendorUpdate) -> Result<Vendor, CatalogError> {
        let mut vendor = self.vendor(id)?;

        if let Some(name) = update.name {
            vendor.name = name;
        }
        if let Some(email) = update.email {
            if let Some(existing) = self.vendors.find_by_email(&email)? {
                if existing.id != id {
                    return Err(CatalogError::DuplicateEmail);
                }
            }
            vendor.email = email;
        }
        if let Some(password) = update.password {
            vendor.password = password;
        }
        if let Some(address) = update.address {
            vendor.address = Some(address);
        }

        self.vendors.update(vendor.clone())?;
        Ok(vendor)
    }

    /// Delete a vendor together with its brands, their trucks, and menu items.
    pub fn delete_vendor(&self, id: VendorId) -> Result<(), CatalogError> {
        self.vendor(id)?;
        for brand in self.brands.list_by_vendor(id)? {
            self.delete_brand(brand.id)?;
        }
        self.vendors.delete(id)?;
        Ok(())
    }

    pub fn create_brand(&self, vendor_id: VendorId, new_brand: NewBrand) -> Result<Brand, CatalogError> {
        self.vendor(vendor_id)?;
        if self.brands.find_by_name(&new_brand.name)?.is_some() {
            return Err(CatalogError::DuplicateBrandName);
        }

        let brand = Brand {
            id: BrandId(BRAND_SEQUENCE.next()),
            vendor_id,
            name: new_brand.name,
        };
        Ok(self.brands.insert(brand)?)
    }

    pub fn brand(&self, id: BrandId) -> Result<Brand, CatalogError> {
        self.brands
            .fetch(id)?
            .ok_or(CatalogError::NotFound { entity: "brand", id: id.0 })
    }

    pub fn brands(&self) -> Result<Vec<Brand>, CatalogError> {
        Ok(self.brands.list()?)
    }

    pub fn brands_by_vendor(&self, vendor_id: VendorId) -> Result<Vec<Brand>, CatalogError> {
        self.vendor(vendor_id)?;
        Ok(self.brands.list_by_vendor(vendor_id)?)
    }

    pub fn rename_brand(&self, id: BrandId, new_brand: NewBrand) -> Result<Brand, CatalogError> {
        let mut brand = self.brand(id)?;
        if let Some(existing) = self.brands.find_by_name(&new_brand.name)? {
            if existing.id != id {
                return Err(CatalogError::DuplicateBrandName);
            }
        }
        brand.name = new_brand.name;
        self.brands.update(brand.clone())?;
        Ok(brand)
    }

    /// Delete a brand together with its trucks and their menu items.
    pub fn delete_brand(&self, id: BrandId) -> Result<(), CatalogError> {
        self.brand(id)?;
        for truck in self.trucks.list_by_brand(id)? {
            self.delete_food_truck(truck.id)?;
        }
        self.brands.delete(id)?;
        Ok(())
    }

    pub fn create_food_truck(
        &self,
        brand_id: BrandId,
        new_truck: NewFoodTruck,
    ) -> Result<FoodTruck, CatalogError> {
        self.brand(brand_id)?;

        let truck = FoodTruck {
            id: FoodTruckId(TRUCK_SEQUENCE.next()),
            brand_id,
            operating_region: new_truck.operating_region,
            location: new_truck.location,
            phone_number: new_truck.phone_number,
            cuisine_specialties: new_truck.cuisine_specialties,
            menu_highlights: new_truck.menu_highlights,
            application_status: None,
        };
        Ok(self.trucks.insert(truck)?)
    }

    pub fn food_truck(&self, id: FoodTruckId) -> Result<FoodTruck, CatalogError> {
        self.trucks
            .fetch(id)?
            .ok_or(CatalogError::NotFound { entity: "food truck", id: id.0 })
    }

    pub fn food_trucks(&self) -> Result<Vec<FoodTruck>, CatalogError> {
        Ok(self.trucks.list()?)
    }

    pub fn food_trucks_by_brand(&self, brand_id: BrandId) -> Result<Vec<FoodTruck>, CatalogError> {
        self.brand(brand_id)?;
        Ok(self.trucks.list_by_brand(brand_id)?)
    }

    pub fn update_food_truck(
        &self,
        id: FoodTruckId,
        update: FoodTruckUpdate,
    ) -> Result<FoodTruck, CatalogError> {
        let mut truck = self.food_truck(id)?;

        if let Some(region) = update.operating_region {
            truck.operating_region = region;
        }
        if let Some(location) = update.location {
            truck.location = Some(location);
        }
        if let Some(phone) = update.phone_number {
            truck.phone_number = Some(phone);
        }
        if let Some(cuisine) = update.cuisine_specialties {
            truck.cuisine_specialties = Some(cuisine);
        }
        if let Some(highlights) = update.menu_highlights {
            truck.menu_highlights = Some(highlights);
        }

        self.trucks.update(truck.clone())?;
        Ok(truck)
    }

    /// Delete a truck together with its menu items.
    pub fn delete_food_truck(&self, id: FoodTruckId) -> Result<(), CatalogError> {
        self.food_truck(id)?;
        for item in self.menu_items.list_by_food_truck(id)? {
            self.menu_items.delete(item.id)?;
        }
        self.trucks.delete(id)?;
        Ok(())
    }

    pub fn create_menu_item(
        &self,
        truck_id: FoodTruckId,
        new_item: NewMenuItem,
    ) -> Result<MenuItem, CatalogError> {
        self.food_truck(truck_id)?;

        let item = MenuItem {
            id: MenuItemId(MENU_ITEM_SEQUENCE.next()),
            food_truck_id: truck_id,
            name: new_item.name,
            price: new_item.price,
            description: new_item.description,
            image_url: new_item.image_url,
        };
        Ok(self.menu_items.insert(item)?)
    }

    pub fn menu_item(&self, id: MenuItemId) -> Result<MenuItem, CatalogError> {
        self.menu_items
            .fetch(id)?
            .ok_or(CatalogError::NotFound { entity: "menu item", id: id.0 })
    }

    pub fn menu_items_by_truck(&self, truck_id: FoodTruckId) -> Result<Vec<MenuItem>, CatalogError> {
        self.food_truck(truck_id)?;
        Ok(self.menu_items.list_by_food_truck(truck_id)?)
    }

    pub fn update_menu_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogError> {
        let mut item = self.menu_item(id)?;

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(description) = update.description {
            item.description = Some(description);
        }
        if let Some(image_url) = update.image_url {
            item.image_url = Some(image_url);
        }

        self.menu_items.update(item.clone())?;
        Ok(item)
    }

    pub fn delete_menu_item(&self, id: MenuItemId) -> Result<(), CatalogError> {
        self.menu_items
            .delete(id)
            .map_err(|_| CatalogError::NotFound { entity: "menu item", id: id.0 })
    }
}
