//! Vendor ownership hierarchy: vendors own brands, brands own food trucks,
//! food trucks carry menu items.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Brand, BrandId, FoodTruck, FoodTruckId, FoodTruckUpdate, MenuItem, MenuItemId, MenuItemUpdate,
    NewBrand, NewFoodTruck, NewMenuItem, NewVendor, Vendor, VendorId, VendorUpdate,
};
pub use repository::{
    BrandRepository, FoodTruckRepository, InMemoryBrandRepository, InMemoryFoodTruckRepository,
    InMemoryMenuItemRepository, InMemoryVendorRepository, MenuItemRepository, VendorRepository,
};
pub use router::catalog_router;
pub use service::{CatalogError, CatalogService};
