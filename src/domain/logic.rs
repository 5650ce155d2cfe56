// src/domain/logic.rs

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::vehicle::VehicleImage;
use crate::domain::views::Page;

/// Picks the representative image of a vehicle.
///
/// The first image flagged main wins; without one, the image with the
/// smallest display order is used.
pub fn select_main_image(images: &[VehicleImage]) -> Option<&VehicleImage> {
    images
        .iter()
        .find(|img| img.is_main)
        .or_else(|| images.iter().min_by_key(|img| img.display_order))
}

/// Turns stored image URLs into image rows numbered 1..=N.
/// Only the first row is flagged main.
pub fn number_images(vehicle_id: Uuid, urls: &[String]) -> Vec<VehicleImage> {
    urls.iter()
        .enumerate()
        .map(|(idx, url)| {
            let mut image = VehicleImage::new(vehicle_id, url.clone(), idx as i32 + 1);
            image.is_main = idx == 0;
            image
        })
        .collect()
}

/// Mean of `prices` rounded to whole units, half to even. Zero when empty.
pub fn average_price(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    let sum: f64 = prices.iter().sum();
    (sum / prices.len() as f64).round_ties_even()
}

/// True when `at` falls within the last `days` days before `now`.
pub fn is_within_days(at: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    at >= now - Duration::days(days)
}

/// Slices an already-filtered listing; `page` is 1-based and clamped to 1.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
    }
}

/// Decodes a stored feature list. Anything that is not a JSON string array
/// reads as empty.
pub fn parse_features(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(order: i32, is_main: bool, url: &str) -> VehicleImage {
        let mut img = VehicleImage::new(Uuid::nil(), url, order);
        img.is_main = is_main;
        img
    }

    #[test]
    fn main_flag_beats_display_order() {
        let images = vec![image(1, false, "a"), image(2, true, "b"), image(3, false, "c")];
        assert_eq!(select_main_image(&images).unwrap().image_url, "b");
    }

    #[test]
    fn falls_back_to_lowest_display_order() {
        let images = vec![image(3, false, "c"), image(1, false, "a"), image(2, false, "b")];
        assert_eq!(select_main_image(&images).unwrap().image_url, "a");
        assert!(select_main_image(&[]).is_none());
    }

    #[test]
    fn numbering_is_dense_and_first_is_main() {
        let id = Uuid::new_v4();
        let urls = vec!["/x/1.jpg".to_string(), "/x/2.jpg".to_string(), "/x/3.jpg".to_string()];
        let rows = number_images(id, &urls);

        let orders: Vec<i32> = rows.iter().map(|r| r.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(rows.iter().filter(|r| r.is_main).count(), 1);
        assert!(rows[0].is_main);
        assert!(rows.iter().all(|r| r.vehicle_id == id));
    }

    #[test]
    fn average_price_rounds_half_to_even() {
        assert_eq!(average_price(&[]), 0.0);
        assert_eq!(average_price(&[10_000.0, 20_001.0]), 15_000.0);
        assert_eq!(average_price(&[10_000.0, 20_003.0]), 15_002.0);
        assert_eq!(average_price(&[45_000.0]), 45_000.0);
    }

    #[test]
    fn paginate_clamps_and_counts() {
        let page = paginate((1..=25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);

        let first = paginate(vec![1, 2, 3], 0, 2);
        assert_eq!(first.page, 1);
        assert_eq!(first.items, vec![1, 2]);
    }

    #[test]
    fn far_out_pages_are_empty() {
        let page = paginate(vec![1, 2, 3], usize::MAX, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, usize::MAX);

        let wide = paginate(vec![1, 2, 3], 2, usize::MAX);
        assert!(wide.items.is_empty());
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let now = Utc::now();
        assert!(is_within_days(now - Duration::days(7), now, 7));
        assert!(!is_within_days(now - Duration::days(8), now, 7));
    }

    #[test]
    fn features_decode_leniently() {
        assert_eq!(parse_features(Some(r#"["LED","Bluetooth"]"#)), vec!["LED", "Bluetooth"]);
        assert!(parse_features(Some("not json")).is_empty());
        assert!(parse_features(None).is_empty());
    }
}
