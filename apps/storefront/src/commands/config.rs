//! # Configuration Commands
//!
//! Shop settings and route resolution for the page shell.

use milena_core::route::Route;
use tracing::debug;

use crate::error::{ApiError, ErrorCode};
use crate::state::ConfigState;

/// Gets the shop settings.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Page for `path`; unknown paths are `NOT_FOUND`.
pub fn resolve_route(path: &str) -> Result<Route, ApiError> {
    Route::parse(path).ok_or_else(|| {
        ApiError::new(ErrorCode::NotFound, format!("Página no encontrada: {}", path))
    })
}

/// Routes linked from the header, with their paths.
pub fn navigation() -> Vec<(Route, &'static str)> {
    Route::navigation()
        .into_iter()
        .map(|route| (route, route.path()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_route() {
        assert_eq!(resolve_route("/catalogo").unwrap(), Route::Catalog);
        assert_eq!(resolve_route("/admin/").unwrap(), Route::Admin);
        assert_eq!(resolve_route("/carrito").unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_navigation_hides_admin() {
        let nav = navigation();
        assert_eq!(nav, vec![(Route::Home, "/"), (Route::Catalog, "/catalogo")]);
    }
}
