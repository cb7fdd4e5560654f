use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        CreatePartyRequest, CreateTransactionRequest, CreateWorkspaceRequest, CreateWorkspaceResponse, ErrorResponse,
        HealthResponse, IdResponse, LoginRequest, RegisterRequest, UpdateTransactionRequest,
    },
    core::{
        models::{
            Direction, Membership, Party, PartyBalance, PartyDetail, PartyType, PartyWithTotals, Transaction,
            UserProfile, Workspace, WorkspaceSummary,
        },
        services::{AuthResponse, WorkspaceListing},
    },
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
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

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health,
        super::handlers::register,
        super::handlers::login,
        super::handlers::me,
        super::handlers::create_workspace,
        super::handlers::list_my_workspaces,
        super::handlers::workspace_home,
        super::handlers::create_party,
        super::handlers::list_parties,
        super::handlers::party_detail,
        super::handlers::create_transaction,
        super::handlers::get_transaction,
        super::handlers::update_transaction,
        super::handlers::delete_transaction
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CreateWorkspaceRequest,
        CreateWorkspaceResponse,
        CreatePartyRequest,
        CreateTransactionRequest,
        UpdateTransactionRequest,
        IdResponse,
        HealthResponse,
        ErrorResponse,
        AuthResponse,
        UserProfile,
        WorkspaceListing,
        Workspace,
        Membership,
        Party,
        PartyType,
        Direction,
        Transaction,
        PartyBalance,
        PartyWithTotals,
        PartyDetail,
        WorkspaceSummary
    )),
    modifiers(&BearerAuth),
    info(
        title = "Sitenot API",
        description = "API for workspace ledgers of customers and suppliers",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
