//! Static data shown when the storefront cannot be reached.

use bazaar_core::{BranchId, Price, Product, ProductId};

/// Cities offered when `GET /api/cities` fails.
pub const CITIES: [&str; 5] = ["Jalalabad", "Kabul", "Kandahar", "Herat", "Balkh"];

/// Categories offered when `GET /api/categories` fails.
pub const CATEGORIES: [&str; 5] = ["Grocery", "Clothing", "Accessories", "Home", "Electronics"];

#[must_use]
pub fn cities() -> Vec<String> {
    CITIES.iter().map(ToString::to_string).collect()
}

#[must_use]
pub fn categories() -> Vec<String> {
    CATEGORIES.iter().map(ToString::to_string).collect()
}

/// Demo products shown when the product list cannot be loaded.
#[must_use]
pub fn mock_products() -> Vec<Product> {
    [
        (1, "Afghan Rug", 4999, "Home", "Kabul", "Kabul Central"),
        (2, "Green Tea", 599, "Grocery", "Jalalabad", "Jalalabad Branch 1"),
        (3, "Traditional Hat", 1299, "Clothing", "Kandahar", "Kandahar Branch 1"),
        (4, "Handcrafted Jewelry", 2499, "Accessories", "Herat", "Herat Branch 1"),
        (5, "Dried Fruits", 899, "Grocery", "Balkh", "Balkh Branch 1"),
    ]
    .into_iter()
    .map(|(id, name, cents, category, city, branch)| Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents),
        category: Some(category.to_string()),
        location: Some(city.to_string()),
        branch_id: Some(BranchId::new(id)),
        branch_name: Some(branch.to_string()),
        stock: None,
        description: None,
        rating: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_products() {
        let products = mock_products();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].name, "Afghan Rug");
        assert_eq!(products[0].price.to_string(), "49.99");
        assert!(products.iter().all(|p| p.branch_name.is_some()));
    }

    #[test]
    fn test_fallback_lists() {
        assert_eq!(cities().len(), 5);
        assert!(categories().contains(&"Electronics".to_string()));
    }
}
