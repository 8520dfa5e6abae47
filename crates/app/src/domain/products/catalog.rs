//! Built-in starter catalogue.

use crate::domain::products::models::{NewProduct, ProductUuid};

/// Products inserted by `seed_initial_products` when the catalogue is empty.
///
/// Fresh UUIDs are generated per call, so seeding is only safe behind the
/// emptiness check the service performs.
#[must_use]
pub fn initial_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct {
            uuid: ProductUuid::new(),
            title: "Dell Latitude 3540".to_string(),
            image: "https://images.merx.example/products/dell-latitude-3540.jpg".to_string(),
            price: 94_900,
            stock: 100,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            title: "Dell UltraSharp U2723QE".to_string(),
            image: "https://images.merx.example/products/dell-ultrasharp-u2723qe.jpg".to_string(),
            price: 57_900,
            stock: 40,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            title: "Logitech MX Master 3S".to_string(),
            image: "https://images.merx.example/products/logitech-mx-master-3s.jpg".to_string(),
            price: 9_999,
            stock: 250,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            title: "Keychron K8 Pro".to_string(),
            image: "https://images.merx.example/products/keychron-k8-pro.jpg".to_string(),
            price: 10_900,
            stock: 120,
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_is_not_empty() {
        assert!(
            !initial_catalog().is_empty(),
            "seeding an empty catalogue must insert something"
        );
    }

    #[test]
    fn catalog_entries_are_sellable() {
        for product in initial_catalog() {
            assert!(product.price > 0, "{} must have a price", product.title);
            assert!(product.stock > 0, "{} must have stock", product.title);
        }
    }

    #[test]
    fn catalog_titles_are_unique() {
        let catalog = initial_catalog();
        let titles: HashSet<_> = catalog.iter().map(|product| &product.title).collect();

        assert_eq!(titles.len(), catalog.len(), "duplicate titles in catalogue");
    }
}
