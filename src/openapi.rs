use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::Modify;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Journal API",
        version = "1.0.0",
        description = "Backend API for the personal journal"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Auth
        crate::handlers::auth_handler::get_me,

        // Diary
        crate::handlers::diary_handler::list_diaries,
        crate::handlers::diary_handler::create_diary,
        crate::handlers::diary_handler::get_diary,
        crate::handlers::diary_handler::update_diary,
        crate::handlers::diary_handler::delete_diary,
    ),
    components(
        schemas(
            crate::models::User,
            crate::models::DiaryEntry,
            crate::models::DiaryFields,
            crate::models::CreateDiaryInput,
            crate::models::UpdateDiaryInput,
            crate::models::DiaryMutationResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Authenticated user"),
        (name = "diary", description = "Diary entry management"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}
