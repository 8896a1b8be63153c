//! OpenAPI documentation configuration

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for the shop API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pitchkit API",
        version = "0.1.0",
        description = "Football jersey shop: catalog, cart, wishlist, checkout and payments",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::handlers::ApiDoc),
        (path = "/api", api = domain_catalog::handlers::ApiDoc),
        (path = "/api", api = domain_cart::handlers::ApiDoc),
        (path = "/api", api = domain_wishlist::handlers::ApiDoc),
        (path = "/api", api = domain_orders::handlers::ApiDoc),
        (path = "/api", api = domain_payments::handlers::ApiDoc)
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer scheme referenced by the protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
