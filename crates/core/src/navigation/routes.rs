//! Route table

use std::fmt;

/// Access requirements of a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Only for signed-out visitors (login page)
    pub guest: bool,
    pub requires_auth: bool,
    pub requires_admin: bool,
    /// Dealers (or admins) only
    pub requires_dealer: bool,
}

/// Every page of the ordering client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Products,
    Cart,
    Orders,
    Profile,
    Admin,
    AdminProducts,
    AdminOrders,
    AdminDealers,
}

impl Route {
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::Login,
        Self::Products,
        Self::Cart,
        Self::Orders,
        Self::Profile,
        Self::Admin,
        Self::AdminProducts,
        Self::AdminOrders,
        Self::AdminDealers,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Products => "/products",
            Self::Cart => "/cart",
            Self::Orders => "/orders",
            Self::Profile => "/profile",
            Self::Admin => "/admin",
            Self::AdminProducts => "/admin/products",
            Self::AdminOrders => "/admin/orders",
            Self::AdminDealers => "/admin/dealers",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Orders => "orders",
            Self::Profile => "profile",
            Self::Admin => "admin",
            Self::AdminProducts => "admin-products",
            Self::AdminOrders => "admin-orders",
            Self::AdminDealers => "admin-dealers",
        }
    }

    #[must_use]
    pub const fn meta(self) -> RouteMeta {
        const OPEN: RouteMeta = RouteMeta {
            guest: false,
            requires_auth: false,
            requires_admin: false,
            requires_dealer: false,
        };
        match self {
            Self::Home | Self::Products => OPEN,
            Self::Login => RouteMeta { guest: true, ..OPEN },
            Self::Cart | Self::Orders => {
                RouteMeta { requires_auth: true, requires_dealer: true, ..OPEN }
            }
            Self::Profile => RouteMeta { requires_auth: true, ..OPEN },
            Self::Admin | Self::AdminProducts | Self::AdminOrders | Self::AdminDealers => {
                RouteMeta { requires_auth: true, requires_admin: true, ..OPEN }
            }
        }
    }

    /// Route for an exact path (trailing slash tolerated).
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_back_to_routes() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/admin/orders/"), Some(Route::AdminOrders));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/checkout"), None);
    }

    #[test]
    fn admin_area_requires_admin() {
        for route in [Route::Admin, Route::AdminProducts, Route::AdminOrders, Route::AdminDealers] {
            let meta = route.meta();
            assert!(meta.requires_auth && meta.requires_admin);
        }
        assert!(Route::Cart.meta().requires_dealer);
        assert!(Route::Login.meta().guest);
        assert_eq!(Route::Products.meta(), RouteMeta::default());
    }
}
