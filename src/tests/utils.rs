use std::cell::RefCell;

use tempfile::TempDir;
use uuid::Uuid;

use crate::db::{init_db, Database, Entity};
use crate::domain::catalog::{Make, Model};
use crate::domain::requests::{CreateAdvertisementRequest, VehicleInput};
use crate::domain::user::User;
use crate::domain::vehicle::{Vehicle, VehicleImage};
use crate::errors::{AppError, AppResult};
use crate::images::{vehicle_image_url, ImageStore, ImageUpload, UploadPolicy};

/// A migrated database in its own temp directory. The directory, and the
/// file with it, goes away when this is dropped.
pub struct TestDb {
    pub db: Database,
    _dir: TempDir,
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_db() -> TestDb {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::new(dir.path().join("test.sqlite3"));

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestDb { db, _dir: dir }
}

pub fn add_make(db: &Database, name: &str) -> Make {
    let make = Make::new(name, Some("Germany"));
    let uow = db.unit_of_work().unwrap();
    uow.makes().add(&make).unwrap();
    uow.save_changes().unwrap();
    make
}

pub fn add_model(db: &Database, make: &Make, name: &str) -> Model {
    let model = Model::new(make.id(), name, Some(2013));
    let uow = db.unit_of_work().unwrap();
    uow.models().add(&model).unwrap();
    uow.save_changes().unwrap();
    model
}

/// BMW with its X5.
pub fn bmw_x5(db: &Database) -> (Make, Model) {
    let bmw = add_make(db, "BMW");
    let x5 = add_model(db, &bmw, "X5");
    (bmw, x5)
}

pub fn add_user(db: &Database, username: &str) -> User {
    let user = User::new(username, format!("{username}@example.com"));
    let uow = db.unit_of_work().unwrap();
    uow.users().add(&user).unwrap();
    uow.save_changes().unwrap();
    user
}

pub fn add_vehicle(
    db: &Database,
    model: &Model,
    year: i32,
    mileage: i64,
    price: f64,
    city: &str,
) -> Vehicle {
    let vehicle = Vehicle::new(model.make_id, model.id(), year, mileage, price, city);
    let uow = db.unit_of_work().unwrap();
    uow.vehicles().add(&vehicle).unwrap();
    uow.save_changes().unwrap();
    vehicle
}

/// Inserts images as `(url, display_order, is_main)`.
pub fn add_images(db: &Database, vehicle: &Vehicle, images: &[(&str, i32, bool)]) {
    let uow = db.unit_of_work().unwrap();
    for (url, order, is_main) in images {
        let mut image = VehicleImage::new(vehicle.id(), *url, *order);
        image.is_main = *is_main;
        uow.vehicle_images().add(&image).unwrap();
    }
    uow.save_changes().unwrap();
}

pub fn jpeg(name: &str) -> ImageUpload {
    ImageUpload::new(name, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

pub fn create_request(make_id: Uuid, model_id: Uuid, images: Vec<ImageUpload>) -> CreateAdvertisementRequest {
    CreateAdvertisementRequest {
        vehicle: VehicleInput::new(make_id, model_id, 2020, 50_000, 45_000.0, "Sofia"),
        title: "BMW X5 xDrive30d M Sport".to_string(),
        description: "Single owner, full service history, garage kept.".to_string(),
        is_negotiable: true,
        contact_phone: Some("+359888000000".to_string()),
        images,
    }
}

/// In-memory image store that records every call.
#[derive(Default)]
pub struct FakeImageStore {
    pub policy: UploadPolicy,
    pub fail_save: bool,
    pub fail_delete: bool,
    pub saved: RefCell<Vec<(Uuid, Vec<String>)>>,
    pub deleted: RefCell<Vec<Uuid>>,
}

impl FakeImageStore {
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }

    pub fn save_calls(&self) -> usize {
        self.saved.borrow().len()
    }

    pub fn deleted_owners(&self) -> Vec<Uuid> {
        self.deleted.borrow().clone()
    }
}

impl ImageStore for FakeImageStore {
    fn save_images(&self, owner_id: Uuid, files: &[ImageUpload]) -> AppResult<Vec<String>> {
        if self.fail_save {
            return Err(AppError::ImageStore("disk full".to_string()));
        }
        let urls: Vec<String> = self
            .policy
            .accepted(files)
            .into_iter()
            .map(|file| {
                let ext = file.extension().unwrap_or_default();
                vehicle_image_url(owner_id, &format!("{}{ext}", Uuid::new_v4()))
            })
            .collect();
        self.saved.borrow_mut().push((owner_id, urls.clone()));
        Ok(urls)
    }

    fn delete_images(&self, owner_id: Uuid) -> AppResult<()> {
        self.deleted.borrow_mut().push(owner_id);
        if self.fail_delete {
            return Err(AppError::ImageStore("permission denied".to_string()));
        }
        Ok(())
    }
}
