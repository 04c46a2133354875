use catequesis_auth::{Claims, Role};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::health::HealthResponse;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::users::model::UserProfile;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health::health_check,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
    ),
    components(
        schemas(
            Claims,
            Role,
            LoginRequest,
            LoginResponse,
            UserProfile,
            ErrorResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and current-user endpoints"),
        (name = "Users", description = "User directory endpoints"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Catequesis API",
        version = "0.1.0",
        description = "Authentication API for the parish catechesis dashboard. Routes are protected with HS256 bearer tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

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
            )
        }
    }
}
