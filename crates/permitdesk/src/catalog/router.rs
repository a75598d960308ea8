use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::domain::{
    Brand, BrandId, FoodTruck, FoodTruckId, FoodTruckUpdate, MenuItem, MenuItemId, MenuItemUpdate,
    NewBrand, NewFoodTruck, NewMenuItem, NewVendor, Vendor, VendorId, VendorUpdate,
};
use super::service::{CatalogError, CatalogService};

/// Routes under `/api/vendors`, `/api/brands`, `/api/food-trucks`, and
/// `/api/menu-items`.
pub fn catalog_router(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/vendors", get(list_vendors).post(register_vendor))
        .route(
            "/api/vendors/:id",
            get(get_vendor).put(update_vendor).delete(delete_vendor),
        )
        .route(
            "/api/vendors/:id/brands",
            get(brands_by_vendor).post(create_brand),
        )
        .route("/api/brands", get(list_brands))
        .route(
            "/api/brands/:id",
            get(get_brand).put(rename_brand).delete(delete_brand),
        )
        .route(
            "/api/brands/:id/food-trucks",
            get(trucks_by_brand).post(create_truck),
        )
        .route("/api/food-trucks", get(list_trucks))
        .route(
            "/api/food-trucks/:id",
            get(get_truck).put(update_truck).delete(delete_truck),
        )
        .route(
            "/api/food-trucks/:id/menu-items",
            get(menu_items_by_truck).post(create_menu_item),
        )
        .route(
            "/api/menu-items/:id",
            get(get_menu_item).put(update_menu_item).delete(delete_menu_item),
        )
        .with_state(service)
}

async fn register_vendor(
    State(service): State<Arc<CatalogService>>,
    Json(new_vendor): Json<NewVendor>,
) -> Result<(StatusCode, Json<Vendor>), CatalogError> {
    let vendor = service.register_vendor(new_vendor)?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

async fn list_vendors(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<Vec<Vendor>>, CatalogError> {
    Ok(Json(service.vendors()?))
}

async fn get_vendor(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<Json<Vendor>, CatalogError> {
    Ok(Json(service.vendor(VendorId(id))?))
}

async fn update_vendor(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
    Json(update): Json<VendorUpdate>,
) -> Result<Json<Vendor>, CatalogError> {
    Ok(Json(service.update_vendor(VendorId(id), update)?))
}

async fn delete_vendor(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, CatalogError> {
    service.delete_vendor(VendorId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_brand(
    State(service): State<Arc<CatalogService>>,
    Path(vendor_id): Path<u64>,
    Json(new_brand): Json<NewBrand>,
) -> Result<(StatusCode, Json<Brand>), CatalogError> {
    let brand = service.create_brand(VendorId(vendor_id), new_brand)?;
    Ok((StatusCode::CREATED, Json(brand)))
}

async fn list_brands(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<Vec<Brand>>, CatalogError> {
    Ok(Json(service.brands()?))
}

async fn brands_by_vendor(
    State(service): State<Arc<CatalogService>>,
    Path(vendor_id): Path<u64>,
) -> Result<Json<Vec<Brand>>, CatalogError> {
    Ok(Json(service.brands_by_vendor(VendorId(vendor_id))?))
}

async fn get_brand(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<Json<Brand>, CatalogError> {
    Ok(Json(service.brand(BrandId(id))?))
}

async fn rename_brand(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
    Json(new_brand): Json<NewBrand>,
) -> Result<Json<Brand>, CatalogError> {
    Ok(Json(service.rename_brand(BrandId(id), new_brand)?))
}

async fn delete_brand(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, CatalogError> {
    service.delete_brand(BrandId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_truck(
    State(service): State<Arc<CatalogService>>,
    Path(brand_id): Path<u64>,
    Json(new_truck): Json<NewFoodTruck>,
) -> Result<(StatusCode, Json<FoodTruck>), CatalogError> {
    let truck = service.create_food_truck(BrandId(brand_id), new_truck)?;
    Ok((StatusCode::CREATED, Json(truck)))
}

async fn list_trucks(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<Vec<FoodTruck>>, CatalogError> {
    Ok(Json(service.food_trucks()?))
}

async fn trucks_by_brand(
    State(service): State<Arc<CatalogService>>,
    Path(brand_id): Path<u64>,
) -> Result<Json<Vec<FoodTruck>>, CatalogError> {
    Ok(Json(service.food_trucks_by_brand(BrandId(brand_id))?))
}

async fn get_truck(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<Json<FoodTruck>, CatalogError> {
    Ok(Json(service.food_truck(FoodTruckId(id))?))
}

async fn update_truck(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
    Json(update): Json<FoodTruckUpdate>,
) -> Result<Json<FoodTruck>, CatalogError> {
    Ok(Json(service.update_food_truck(FoodTruckId(id), update)?))
}

async fn delete_truck(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, CatalogError> {
    service.delete_food_truck(FoodTruckId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_menu_item(
    State(service): State<Arc<CatalogService>>,
    Path(truck_id): Path<u64>,
    Json(new_item): Json<NewMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), CatalogError> {
    let item = service.create_menu_item(FoodTruckId(truck_id), new_item)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn menu_items_by_truck(
    State(service): State<Arc<CatalogService>>,
    Path(truck_id): Path<u64>,
) -> Result<Json<Vec<MenuItem>>, CatalogError> {
    Ok(Json(service.menu_items_by_truck(FoodTruckId(truck_id))?))
}

async fn get_menu_item(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<Json<MenuItem>, CatalogError> {
    Ok(Json(service.menu_item(MenuItemId(id))?))
}

async fn update_menu_item(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
    Json(update): Json<MenuItemUpdate>,
) -> Result<Json<MenuItem>, CatalogError> {
    Ok(Json(service.update_menu_item(MenuItemId(id), update)?))
}

async fn delete_menu_item(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, CatalogError> {
    service.delete_menu_item(MenuItemId(id))?;
    Ok(StatusCode::NO_CONTENT)
}
