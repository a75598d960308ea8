use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{
    Brand, BrandId, FoodTruck, FoodTruckId, MenuItem, MenuItemId, Vendor, VendorId,
};
use crate::store::RepositoryError;

pub trait VendorRepository: Send + Sync {
    fn insert(&self, vendor: Vendor) -> Result<Vendor, RepositoryError>;
    fn update(&self, vendor: Vendor) -> Result<(), RepositoryError>;
    fn fetch(&self, id: VendorId) -> Result<Option<Vendor>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, RepositoryError>;
    fn list(&self) -> Result<Vec<Vendor>, RepositoryError>;
    fn delete(&self, id: VendorId) -> Result<(), RepositoryError>;
}

pub trait BrandRepository: Send + Sync {
    fn insert(&self, brand: Brand) -> Result<Brand, RepositoryError>;
    fn update(&self, brand: Brand) -> Result<(), RepositoryError>;
    fn fetch(&self, id: BrandId) -> Result<Option<Brand>, RepositoryError>;
    fn find_by_name(&self, name: &str) -> Result<Option<Brand>, RepositoryError>;
    fn list(&self) -> Result<Vec<Brand>, RepositoryError>;
    fn list_by_vendor(&self, vendor_id: VendorId) -> Result<Vec<Brand>, RepositoryError>;
    fn delete(&self, id: BrandId) -> Result<(), RepositoryError>;
}

pub trait FoodTruckRepository: Send + Sync {
    fn insert(&self, truck: FoodTruck) -> Result<FoodTruck, RepositoryError>;
    fn update(&self, truck: FoodTruck) -> Result<(), RepositoryError>;
    fn fetch(&self, id: FoodTruckId) -> Result<Option<FoodTruck>, RepositoryError>;
    fn list(&self) -> Result<Vec<FoodTruck>, RepositoryError>;
    fn list_by_brand(&self, brand_id: BrandId) -> Result<Vec<FoodTruck>, RepositoryError>;
    fn delete(&self, id: FoodTruckId) -> Result<(), RepositoryError>;
}

pub trait MenuItemRepository: Send + Sync {
    fn insert(&self, item: MenuItem) -> Result<MenuItem, RepositoryError>;
    fn update(&self, item: MenuItem) -> Result<(), RepositoryError>;
    fn fetch(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError>;
    fn list_by_food_truck(&self, truck_id: FoodTruckId) -> Result<Vec<MenuItem>, RepositoryError>;
    fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError>;
}

#[derive(Default, Clone)]
pub struct InMemoryVendorRepository {
    records: Arc<Mutex<HashMap<VendorId, Vendor>>>,
}

impl VendorRepository for InMemoryVendorRepository {
    fn insert(&self, vendor: Vendor) -> Result<Vendor, RepositoryError> {
        let mut guard = self.records.lock().expect("vendor mutex poisoned");
        if guard.contains_key(&vendor.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(vendor.id, vendor.clone());
        Ok(vendor)
    }

    fn update(&self, vendor: Vendor) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("vendor mutex poisoned");
        if guard.contains_key(&vendor.id) {
            guard.insert(vendor.id, vendor);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: VendorId) -> Result<Option<Vendor>, RepositoryError> {
        let guard = self.records.lock().expect("vendor mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Vendor>, RepositoryError> {
        let guard = self.records.lock().expect("vendor mutex poisoned");
        Ok(guard
            .values()
            .find(|vendor| vendor.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Vendor>, RepositoryError> {
        let guard = self.records.lock().expect("vendor mutex poisoned");
        let mut vendors: Vec<Vendor> = guard.values().cloned().collect();
        vendors.sort_by_key(|vendor| vendor.id.0);
        Ok(vendors)
    }

    fn delete(&self, id: VendorId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("vendor mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryBrandRepository {
    records: Arc<Mutex<HashMap<BrandId, Brand>>>,
}

impl BrandRepository for InMemoryBrandRepository {
    fn insert(&self, brand: Brand) -> Result<Brand, RepositoryError> {
        let mut guard = self.records.lock().expect("brand mutex poisoned");
        if guard.contains_key(&brand.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(brand.id, brand.clone());
        Ok(brand)
    }

    fn update(&self, brand: Brand) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("brand mutex poisoned");
        if guard.contains_key(&brand.id) {
            guard.insert(brand.id, brand);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: BrandId) -> Result<Option<Brand>, RepositoryError> {
        let guard = self.records.lock().expect("brand mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Brand>, RepositoryError> {
        let guard = self.records.lock().expect("brand mutex poisoned");
        Ok(guard
            .values()
            .find(|brand| brand.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn list(&self) -> Result<Vec<Brand>, RepositoryError> {
        let guard = self.records.lock().expect("brand mutex poisoned");
        let mut brands: Vec<Brand> = guard.values().cloned().collect();
        brands.sort_by_key(|brand| brand.id.0);
        Ok(brands)
    }

    fn list_by_vendor(&self, vendor_id: VendorId) -> Result<Vec<Brand>, RepositoryError> {
        let mut brands = self.list()?;
        brands.retain(|brand| brand.vendor_id == vendor_id);
        Ok(brands)
    }

    fn delete(&self, id: BrandId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("brand mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryFoodTruckRepository {
    records: Arc<Mutex<HashMap<FoodTruckId, FoodTruck>>>,
}

impl FoodTruckRepository for InMemoryFoodTruckRepository {
    fn insert(&self, truck: FoodTruck) -> Result<FoodTruck, RepositoryError> {
        let mut guard = self.records.lock().expect("food truck mutex poisoned");
        if guard.contains_key(&truck.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(truck.id, truck.clone());
        Ok(truck)
    }

    fn update(&self, truck: FoodTruck) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("food truck mutex poisoned");
        if guard.contains_key(&truck.id) {
            guard.insert(truck.id, truck);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: FoodTruckId) -> Result<Option<FoodTruck>, RepositoryError> {
        let guard = self.records.lock().expect("food truck mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<FoodTruck>, RepositoryError> {
        let guard = self.records.lock().expect("food truck mutex poisoned");
        let mut trucks: Vec<FoodTruck> = guard.values().cloned().collect();
        trucks.sort_by_key(|truck| truck.id.0);
        Ok(trucks)
    }

    fn list_by_brand(&self, brand_id: BrandId) -> Result<Vec<FoodTruck>, RepositoryError> {
        let mut trucks = self.list()?;
        trucks.retain(|truck| truck.brand_id == brand_id);
        Ok(trucks)
    }

    fn delete(&self, id: FoodTruckId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("food truck mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryMenuItemRepository {
    records: Arc<Mutex<HashMap<MenuItemId, MenuItem>>>,
}

impl MenuItemRepository for InMemoryMenuItemRepository {
    fn insert(&self, item: MenuItem) -> Result<MenuItem, RepositoryError> {
        let mut guard = self.records.lock().expect("menu item mutex poisoned");
        if guard.contains_key(&item.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(item.id, item.clone());
        Ok(item)
    }

    fn update(&self, item: MenuItem) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("menu item mutex poisoned");
        if guard.contains_key(&item.id) {
            guard.insert(item.id, item);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let guard = self.records.lock().expect("menu item mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list_by_food_truck(&self, truck_id: FoodTruckId) -> Result<Vec<MenuItem>, RepositoryError> {
        let guard = self.records.lock().expect("menu item mutex poisoned");
        let mut items: Vec<MenuItem> = guard
            .values()
            .filter(|item| item.food_truck_id == truck_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id.0);
        Ok(items)
    }

    fn delete(&self, id: MenuItemId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("menu item mutex poisoned");
        guard.remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}
