use lemon_models::{
    Account, CreateFeedbackDto, ElevateRequest, Feedback, FeedbackCreated, LoginRequest,
    RegisterRequest, Role, TokenResponse, UpdateSaveRequest,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::username_taken,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::elevate,
        crate::modules::accounts::controller::get_save,
        crate::modules::accounts::controller::update_save,
        crate::modules::accounts::controller::delete_save,
        crate::modules::feedback::controller::submit_feedback,
        crate::modules::feedback::controller::list_feedback,
        crate::modules::feedback::controller::get_feedback,
        crate::modules::feedback::controller::mark_feedback_read,
    ),
    components(
        schemas(
            Account,
            Role,
            RegisterRequest,
            LoginRequest,
            UpdateSaveRequest,
            ElevateRequest,
            TokenResponse,
            Feedback,
            CreateFeedbackDto,
            FeedbackCreated,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and role elevation"),
        (name = "Accounts", description = "The caller's own account and save state"),
        (name = "Feedback", description = "Player feedback")
    ),
    info(
        title = "Lemon API",
        version = "0.1.0",
        description = "Account, save-state and feedback service for Lemon.",
        license(name = "MIT")
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
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    lemon_config::cookie::DEFAULT_COOKIE_NAME,
                ))),
            );
        }
    }
}
