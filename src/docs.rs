use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::alerts::model::{EmergencyAlert, TriggerAlertDto};
use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto, SessionResponse};
use crate::modules::campaigns::model::{
    Campaign, CampaignCategory, CreateCampaignDto, UpdateCampaignDto,
};
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::reports::model::{
    CreateReportDto, PaginatedReportsResponse, Report, ReportStatus, ReportType,
    UpdateReportStatusDto,
};
use crate::modules::users::model::{
    PaginatedUsersResponse, UpdateRoleDto, UpdateStatusDto, User,
};
use crate::modules::visitors::model::{RegisterVisitorDto, Visitor};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::users::controller::list,
        crate::modules::users::controller::get,
        crate::modules::users::controller::update_role,
        crate::modules::users::controller::update_status,
        crate::modules::users::controller::delete,
        crate::modules::reports::controller::create,
        crate::modules::reports::controller::list,
        crate::modules::reports::controller::get,
        crate::modules::reports::controller::update_status,
        crate::modules::notices::controller::create,
        crate::modules::notices::controller::list,
        crate::modules::notices::controller::update,
        crate::modules::notices::controller::delete,
        crate::modules::visitors::controller::register,
        crate::modules::visitors::controller::list,
        crate::modules::visitors::controller::checkout,
        crate::modules::campaigns::controller::create,
        crate::modules::campaigns::controller::list,
        crate::modules::campaigns::controller::update,
        crate::modules::campaigns::controller::delete,
        crate::modules::alerts::controller::trigger,
        crate::modules::alerts::controller::list,
        crate::modules::alerts::controller::resolve,
    ),
    components(
        schemas(
            RegisterRequestDto,
            LoginRequest,
            AuthResponse,
            SessionResponse,
            User,
            UpdateRoleDto,
            UpdateStatusDto,
            PaginatedUsersResponse,
            Report,
            ReportType,
            ReportStatus,
            CreateReportDto,
            UpdateReportStatusDto,
            PaginatedReportsResponse,
            Notice,
            CreateNoticeDto,
            UpdateNoticeDto,
            Visitor,
            RegisterVisitorDto,
            Campaign,
            CampaignCategory,
            CreateCampaignDto,
            UpdateCampaignDto,
            EmergencyAlert,
            TriggerAlertDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and session inspection"),
        (name = "users", description = "User administration (admin only)"),
        (name = "reports", description = "Incident reports"),
        (name = "notices", description = "Notice board"),
        (name = "visitors", description = "Visitor check-in and check-out"),
        (name = "campaigns", description = "Awareness campaigns"),
        (name = "alerts", description = "Emergency alerts")
    ),
    info(
        title = "Vigia API",
        version = "0.1.0",
        description = "School safety management REST API built with Rust, Axum, and PostgreSQL.",
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
