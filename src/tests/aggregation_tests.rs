use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::config::ListingConfig;
use crate::db::{Database, Entity, Filter};
use crate::domain::enums::AdvertisementStatus;
use crate::domain::listing::Advertisement;
use crate::domain::user::User;
use crate::domain::views::UserStats;
use crate::domain::vehicle::Vehicle;
use crate::services::{engagement, moderation, CatalogService, ListingService, StatsService};
use crate::tests::utils::{add_make, add_model, add_user, add_vehicle, bmw_x5, init_test_db};

fn stats(db: &Database) -> StatsService {
    StatsService::new(db.clone(), ListingConfig::default())
}

/// Inserts an advertisement on `vehicle` with the given status and age.
fn add_ad(db: &Database, vehicle: &Vehicle, user: &User, status: AdvertisementStatus, age_days: i64) -> Advertisement {
    let mut ad = Advertisement::publish(vehicle.id(), user.id(), "Title of the ad", "Description", vehicle.price, 60);
    ad.status = status;
    ad.header.created_at = Utc::now() - Duration::days(age_days);
    let uow = db.unit_of_work().unwrap();
    uow.advertisements().add(&ad).unwrap();
    uow.save_changes().unwrap();
    ad
}

#[test]
fn unknown_make_has_no_details() {
    let t = init_test_db();
    assert!(stats(&t.db).get_make_details(Uuid::new_v4()).unwrap().is_none());

    let gone = add_make(&t.db, "Lada");
    let uow = t.db.unit_of_work().unwrap();
    uow.makes().soft_delete(&gone).unwrap();
    uow.save_changes().unwrap();
    assert!(stats(&t.db).get_make_details(gone.id()).unwrap().is_none());
}

#[test]
fn make_without_vehicles_reports_zeros() {
    let t = init_test_db();
    let (bmw, _) = bmw_x5(&t.db);

    let details = stats(&t.db).get_make_details(bmw.id()).unwrap().unwrap();
    assert_eq!(details.name, "BMW");
    assert_eq!(details.active_advertisements_count, 0);
    assert_eq!(details.average_price, 0.0);
    assert_eq!(details.recent_advertisements_count, 0);
    assert_eq!(details.models.len(), 1);
    assert_eq!(details.models[0].make_name, "BMW");
}

#[test]
fn make_statistics_cover_its_vehicles_and_ads() {
    let t = init_test_db();
    let (bmw, x5) = bmw_x5(&t.db);
    let x3 = add_model(&t.db, &bmw, "X3");
    let audi = add_make(&t.db, "Audi");
    let a4 = add_model(&t.db, &audi, "A4");
    let user = add_user(&t.db, "dealer");

    let v1 = add_vehicle(&t.db, &x5, 2019, 1, 10_000.0, "Sofia");
    let v2 = add_vehicle(&t.db, &x3, 2020, 1, 20_001.0, "Sofia");
    let v3 = add_vehicle(&t.db, &x5, 2021, 1, 30_002.0, "Sofia");
    let audi_car = add_vehicle(&t.db, &a4, 2020, 1, 99_999.0, "Sofia");

    add_ad(&t.db, &v1, &user, AdvertisementStatus::Active, 1);
    add_ad(&t.db, &v2, &user, AdvertisementStatus::Sold, 3);
    let deleted = add_ad(&t.db, &v3, &user, AdvertisementStatus::Active, 20);
    add_ad(&t.db, &audi_car, &user, AdvertisementStatus::Active, 0);

    let uow = t.db.unit_of_work().unwrap();
    uow.advertisements().soft_delete(&deleted).unwrap();
    uow.save_changes().unwrap();

    let details = stats(&t.db).get_make_details(bmw.id()).unwrap().unwrap();
    assert_eq!(details.active_advertisements_count, 1);
    assert_eq!(details.recent_advertisements_count, 2);
    // (10000 + 20001 + 30002) / 3 = 20001
    assert_eq!(details.average_price, 20_001.0);

    let names: Vec<&str> = details.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["X3", "X5"]);
}

#[test]
fn average_price_rounds_half_to_even() {
    let t = init_test_db();
    let (bmw, x5) = bmw_x5(&t.db);
    add_vehicle(&t.db, &x5, 2019, 1, 10_000.0, "Sofia");
    add_vehicle(&t.db, &x5, 2019, 1, 10_001.0, "Sofia");

    let details = stats(&t.db).get_make_details(bmw.id()).unwrap().unwrap();
    assert_eq!(details.average_price, 10_000.0);
}

#[test]
fn user_stats_count_live_ads_views_and_favorites() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let seller = add_user(&t.db, "seller");
    let buyer = add_user(&t.db, "buyer");
    let other = add_user(&t.db, "other");

    let v1 = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let v2 = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let v3 = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let v4 = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");

    let active = add_ad(&t.db, &v1, &seller, AdvertisementStatus::Active, 0);
    let sold = add_ad(&t.db, &v2, &seller, AdvertisementStatus::Sold, 0);
    let removed = add_ad(&t.db, &v3, &seller, AdvertisementStatus::Active, 0);
    let foreign = add_ad(&t.db, &v4, &other, AdvertisementStatus::Active, 0);

    for _ in 0..3 {
        engagement::record_view(&t.db, active.id()).unwrap();
    }
    engagement::record_view(&t.db, sold.id()).unwrap();
    engagement::record_view(&t.db, removed.id()).unwrap();

    engagement::add_favorite(&t.db, buyer.id(), active.id(), None).unwrap();
    engagement::add_favorite(&t.db, other.id(), active.id(), None).unwrap();
    engagement::add_favorite(&t.db, buyer.id(), sold.id(), Some("ask about tyres".into())).unwrap();
    engagement::add_favorite(&t.db, buyer.id(), removed.id(), None).unwrap();
    engagement::add_favorite(&t.db, buyer.id(), foreign.id(), None).unwrap();

    moderation::delete_advertisement(&t.db, removed.id()).unwrap();

    let s = stats(&t.db).get_user_stats(seller.id()).unwrap();
    assert_eq!(s.active_ads, 1);
    assert_eq!(s.total_views, 4);
    assert_eq!(s.total_favorites, 3);

    assert_eq!(stats(&t.db).get_user_stats(Uuid::new_v4()).unwrap(), UserStats::default());
}

#[test]
fn counters_only_grow_and_unknown_ads_are_none() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let user = add_user(&t.db, "seller");
    let v = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let ad = add_ad(&t.db, &v, &user, AdvertisementStatus::Active, 0);

    assert_eq!(engagement::record_view(&t.db, ad.id()).unwrap(), Some(1));
    assert_eq!(engagement::record_view(&t.db, ad.id()).unwrap(), Some(2));
    assert_eq!(engagement::record_contact(&t.db, ad.id()).unwrap(), Some(1));
    assert_eq!(engagement::record_view(&t.db, Uuid::new_v4()).unwrap(), None);
}

#[test]
fn favorite_pair_is_unique_and_counter_stays_consistent() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let seller = add_user(&t.db, "seller");
    let buyer = add_user(&t.db, "buyer");
    let v = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let ad = add_ad(&t.db, &v, &seller, AdvertisementStatus::Active, 0);

    assert!(engagement::add_favorite(&t.db, buyer.id(), ad.id(), None).unwrap().is_some());
    let err = engagement::add_favorite(&t.db, buyer.id(), ad.id(), None).unwrap_err();
    assert!(err.is_constraint_violation());

    let uow = t.db.unit_of_work().unwrap();
    assert_eq!(uow.advertisements().get_by_id(ad.id()).unwrap().unwrap().favorite_count, 1);
    assert_eq!(uow.favorites().count(&Filter::new()).unwrap(), 1);

    assert!(engagement::add_favorite(&t.db, buyer.id(), Uuid::new_v4(), None).unwrap().is_none());
}

#[test]
fn concurrent_favorites_and_views_are_all_counted() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let seller = add_user(&t.db, "seller");
    let v = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let ad = add_ad(&t.db, &v, &seller, AdvertisementStatus::Active, 0);
    let buyers: Vec<User> = (0..8).map(|i| add_user(&t.db, &format!("buyer{i}"))).collect();

    std::thread::scope(|scope| {
        for buyer in &buyers {
            let db = t.db.clone();
            let ad_id = ad.id();
            scope.spawn(move || {
                engagement::record_view(&db, ad_id).unwrap();
                engagement::add_favorite(&db, buyer.id(), ad_id, None).unwrap();
            });
        }
    });

    let uow = t.db.unit_of_work().unwrap();
    let stored = uow.advertisements().get_by_id(ad.id()).unwrap().unwrap();
    assert_eq!(stored.favorite_count, 8);
    assert_eq!(stored.view_count, 8);
    assert_eq!(uow.favorites().count(&Filter::new()).unwrap(), 8);
}

#[test]
fn moderation_approves_deletes_and_restores() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let user = add_user(&t.db, "seller");
    let v = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let ad = add_ad(&t.db, &v, &user, AdvertisementStatus::Pending, 2);

    assert!(moderation::approve_advertisement(&t.db, ad.id()).unwrap());
    let uow = t.db.unit_of_work().unwrap();
    let approved = uow.advertisements().get_by_id(ad.id()).unwrap().unwrap();
    assert_eq!(approved.status, AdvertisementStatus::Active);
    assert!(approved.published_at > ad.published_at);

    assert!(moderation::delete_advertisement(&t.db, ad.id()).unwrap());
    assert!(!moderation::delete_advertisement(&t.db, ad.id()).unwrap());
    assert!(!moderation::approve_advertisement(&t.db, ad.id()).unwrap());

    let deleted = moderation::list_deleted_advertisements(&t.db).unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id(), ad.id());

    assert!(moderation::restore_advertisement(&t.db, ad.id()).unwrap());
    assert!(!moderation::restore_advertisement(&t.db, ad.id()).unwrap());
    assert!(moderation::list_deleted_advertisements(&t.db).unwrap().is_empty());
    assert!(!moderation::restore_advertisement(&t.db, Uuid::new_v4()).unwrap());
}

#[test]
fn vehicle_delete_does_not_cascade_to_its_advertisement() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let user = add_user(&t.db, "seller");
    let v = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    let ad = add_ad(&t.db, &v, &user, AdvertisementStatus::Active, 0);

    ListingService::new(t.db.clone())
        .delete_vehicle(v.id(), &crate::tests::utils::FakeImageStore::default())
        .unwrap();

    let uow = t.db.unit_of_work().unwrap();
    assert!(uow.advertisements().get_by_id(ad.id()).unwrap().is_some());
    assert!(ListingService::new(t.db.clone())
        .get_user_advertisements(user.id())
        .unwrap()
        .is_empty());
}

#[test]
fn user_advertisements_are_newest_first() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let user = add_user(&t.db, "seller");
    let older = add_vehicle(&t.db, &x5, 2015, 1, 10.0, "Sofia");
    let newer = add_vehicle(&t.db, &x5, 2022, 1, 20.0, "Sofia");
    crate::tests::utils::add_images(&t.db, &newer, &[("/n/1.jpg", 1, true)]);

    add_ad(&t.db, &older, &user, AdvertisementStatus::Active, 10);
    add_ad(&t.db, &newer, &user, AdvertisementStatus::Sold, 1);

    let rows = ListingService::new(t.db.clone())
        .get_user_advertisements(user.id())
        .unwrap();
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2022, 2015]);
    assert_eq!(rows[0].main_image.as_deref(), Some("/n/1.jpg"));
    assert_eq!(rows[0].make_name, "BMW");
    assert_eq!(rows[0].status, AdvertisementStatus::Sold);
}

#[test]
fn user_advertisements_pair_each_ad_with_its_own_vehicle() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let user = add_user(&t.db, "dealer");

    let mut expected = std::collections::HashMap::new();
    for i in 0..30 {
        let v = add_vehicle(&t.db, &x5, 1990 + i, 1, 1.0, "Sofia");
        let ad = add_ad(&t.db, &v, &user, AdvertisementStatus::Active, i as i64);
        expected.insert(ad.id(), (v.id(), v.year));
    }

    let rows = ListingService::new(t.db.clone())
        .get_user_advertisements(user.id())
        .unwrap();
    assert_eq!(rows.len(), 30);
    for row in &rows {
        assert_eq!(expected[&row.advertisement_id], (row.vehicle_id, row.year));
    }
    assert_eq!(rows[0].year, 1990);
    assert_eq!(rows[29].year, 2019);
}

#[test]
fn admin_overview_and_user_toggle() {
    let t = init_test_db();
    let (_, x5) = bmw_x5(&t.db);
    let user = add_user(&t.db, "seller");
    let v = add_vehicle(&t.db, &x5, 2019, 1, 1.0, "Sofia");
    add_ad(&t.db, &v, &user, AdvertisementStatus::Pending, 0);

    let overview = moderation::admin_overview(&t.db).unwrap();
    assert_eq!(overview.total_users, 1);
    assert_eq!(overview.total_makes, 1);
    assert_eq!(overview.total_models, 1);
    assert_eq!(overview.total_vehicles, 1);
    assert_eq!(overview.total_advertisements, 1);
    assert_eq!(overview.active_advertisements, 0);

    assert_eq!(moderation::toggle_user_status(&t.db, user.id()).unwrap(), Some(false));
    assert_eq!(moderation::toggle_user_status(&t.db, user.id()).unwrap(), Some(true));
    assert_eq!(moderation::toggle_user_status(&t.db, Uuid::new_v4()).unwrap(), None);
}

#[test]
fn catalog_denormalizes_make_names() {
    let t = init_test_db();
    let (bmw, x5) = bmw_x5(&t.db);
    let audi = add_make(&t.db, "Audi");
    add_model(&t.db, &audi, "A4");

    let catalog = CatalogService::new(t.db.clone());
    assert_eq!(catalog.get_all_makes().unwrap().len(), 2);
    assert_eq!(catalog.get_make_by_id(bmw.id()).unwrap().unwrap().name, "BMW");

    let all = catalog.get_all_models().unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|m| m.name == "A4" && m.make_name == "Audi"));

    let bmw_models = catalog.get_models_by_make(bmw.id()).unwrap();
    assert_eq!(bmw_models.len(), 1);
    assert_eq!(catalog.get_model_by_id(x5.id()).unwrap().unwrap().make_name, "BMW");
    assert!(catalog.get_model_by_id(Uuid::new_v4()).unwrap().is_none());
    assert!(catalog.get_all_vehicle_types().unwrap().is_empty());
}

#[test]
fn seeding_runs_once() {
    let t = init_test_db();
    let written = crate::seed::seed_catalog(&t.db).unwrap();
    assert!(written > 0);
    assert_eq!(crate::seed::seed_catalog(&t.db).unwrap(), 0);

    let catalog = CatalogService::new(t.db.clone());
    let makes = catalog.get_all_makes().unwrap();
    let bmw = makes.iter().find(|m| m.name == "BMW").unwrap();
    let models = catalog.get_models_by_make(bmw.id).unwrap();
    assert!(models.iter().any(|m| m.name == "X5"));

    let vehicle_types = catalog.get_all_vehicle_types().unwrap();
    assert!(!vehicle_types.is_empty());
    assert!(catalog.get_vehicle_type_by_id(vehicle_types[0].id).unwrap().is_some());
}
