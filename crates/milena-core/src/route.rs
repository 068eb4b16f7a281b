//! Page routes and the home page selection.

use serde::{Deserialize, Serialize};

use crate::types::Product;
use crate::FEATURED_COUNT;

/// A page of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Catalog,
    /// Not linked from the navigation.
    Admin,
}

impl Route {
    /// Resolves a path, ignoring a trailing slash.
    pub fn parse(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/catalogo" => Some(Route::Catalog),
            "/admin" => Some(Route::Admin),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Catalog => "/catalogo",
            Route::Admin => "/admin",
        }
    }

    /// Routes shown in the header navigation.
    pub fn navigation() -> [Route; 2] {
        [Route::Home, Route::Catalog]
    }
}

/// Products highlighted on the home page: the newest few, as fetched.
pub fn featured(products: &[Product]) -> &[Product] {
    &products[..products.len().min(FEATURED_COUNT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_paths() {
        for route in [Route::Home, Route::Catalog, Route::Admin] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
        assert_eq!(Route::parse("/catalogo/"), Some(Route::Catalog));
        assert_eq!(Route::parse("/carrito"), None);
    }

    #[test]
    fn test_admin_not_in_navigation() {
        assert!(!Route::navigation().contains(&Route::Admin));
    }

    #[test]
    fn test_featured_takes_first_three() {
        let products: Vec<Product> = (1..=5)
            .map(|id| Product {
                id,
                name: format!("p{}", id),
                description: None,
                images: None,
                category_id: None,
                category: None,
                created_at: None,
            })
            .collect();

        let ids: Vec<i64> = featured(&products).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(featured(&products[..2]).len(), 2);
        assert!(featured(&[]).is_empty());
    }
}
