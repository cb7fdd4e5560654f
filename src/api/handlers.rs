use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        errors::LedgerError,
        models::{PartyDetail, PartyWithTotals, Transaction, UserProfile, WorkspaceSummary},
        services::{AuthResponse, LedgerService, WorkspaceListing},
    },
    infrastructure::{cache::in_memory::InMemoryCache, storage::in_memory::InMemoryStorage},
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use std::sync::Arc;

pub type SharedService = Arc<LedgerService<InMemoryStorage, InMemoryCache>>;

// Middleware to validate JWT
async fn auth_middleware(
    State(service): State<SharedService>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(LedgerError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(LedgerError::Unauthorized)?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/workspaces", post(create_workspace))
        .route("/workspaces/mine", get(list_my_workspaces))
        .route("/workspaces/{workspace_id}/home", get(workspace_home))
        .route(
            "/workspaces/{workspace_id}/parties",
            post(create_party).get(list_parties),
        )
        .route("/workspaces/{workspace_id}/parties/{party_id}", get(party_detail))
        .route(
            "/workspaces/{workspace_id}/parties/{party_id}/transactions",
            post(create_transaction),
        )
        .route(
            "/workspaces/{workspace_id}/transactions/{transaction_id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health)) // Unprotected
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .with_state(service)
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found".to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(service): State<SharedService>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = service.register(&req.email, &req.name, &req.password).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn login(
    State(service): State<SharedService>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let response = service.login(&req.email, &req.password).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn me(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = service.get_user(&claims.sub).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/workspaces",
    request_body = CreateWorkspaceRequest,
    responses(
        (status = 201, description = "Workspace created", body = CreateWorkspaceResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_workspace(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    JsonBody(req): JsonBody<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<CreateWorkspaceResponse>), ApiError> {
    let workspace = service
        .create_workspace(&claims.actor(), &req.name, &req.members)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateWorkspaceResponse {
            id: workspace.id,
            name: workspace.name,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/workspaces/mine",
    responses(
        (status = 200, description = "Workspaces the caller owns or belongs to", body = Vec<WorkspaceListing>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_my_workspaces(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<WorkspaceListing>>, ApiError> {
    let workspaces = service.list_my_workspaces(&claims.actor()).await?;
    Ok(Json(workspaces))
}

#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/home",
    params(("workspace_id" = String, Path, description = "Workspace ID")),
    responses(
        (status = 200, description = "Workspace totals and recent activity", body = WorkspaceSummary),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn workspace_home(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path(workspace_id): Path<String>,
) -> Result<Json<WorkspaceSummary>, ApiError> {
    let summary = service
        .workspace_home(&claims.actor(), Some(&workspace_id))
        .await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/parties",
    params(("workspace_id" = String, Path, description = "Workspace ID")),
    request_body = CreatePartyRequest,
    responses(
        (status = 201, description = "Party created", body = IdResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_party(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path(workspace_id): Path<String>,
    JsonBody(req): JsonBody<CreatePartyRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let party = service
        .create_party(
            &claims.actor(),
            Some(&workspace_id),
            &req.name,
            req.phone,
            req.party_type,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id: party.id })))
}

#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/parties",
    params(
        ("workspace_id" = String, Path, description = "Workspace ID"),
        PartyListQuery
    ),
    responses(
        (status = 200, description = "Parties with their totals", body = Vec<PartyWithTotals>),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn list_parties(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path(workspace_id): Path<String>,
    QueryParams(query): QueryParams<PartyListQuery>,
) -> Result<Json<Vec<PartyWithTotals>>, ApiError> {
    let rows = service
        .list_parties(&claims.actor(), Some(&workspace_id), query.party_type)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/parties/{party_id}",
    params(
        ("workspace_id" = String, Path, description = "Workspace ID"),
        ("party_id" = String, Path, description = "Party ID")
    ),
    responses(
        (status = 200, description = "Party with balance and transactions", body = PartyDetail),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace or party not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn party_detail(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path((workspace_id, party_id)): Path<(String, String)>,
) -> Result<Json<PartyDetail>, ApiError> {
    let detail = service
        .party_detail(&claims.actor(), Some(&workspace_id), &party_id)
        .await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/parties/{party_id}/transactions",
    params(
        ("workspace_id" = String, Path, description = "Workspace ID"),
        ("party_id" = String, Path, description = "Party ID")
    ),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = IdResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace or party not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn create_transaction(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path((workspace_id, party_id)): Path<(String, String)>,
    JsonBody(req): JsonBody<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let transaction = service
        .create_transaction(&claims.actor(), Some(&workspace_id), &party_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id: transaction.id })))
}

#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/transactions/{transaction_id}",
    params(
        ("workspace_id" = String, Path, description = "Workspace ID"),
        ("transaction_id" = String, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace or transaction not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn get_transaction(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path((workspace_id, transaction_id)): Path<(String, String)>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = service
        .get_transaction(&claims.actor(), Some(&workspace_id), &transaction_id)
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    put,
    path = "/api/workspaces/{workspace_id}/transactions/{transaction_id}",
    params(
        ("workspace_id" = String, Path, description = "Workspace ID"),
        ("transaction_id" = String, Path, description = "Transaction ID")
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Updated transaction", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace or transaction not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn update_transaction(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path((workspace_id, transaction_id)): Path<(String, String)>,
    JsonBody(req): JsonBody<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = service
        .update_transaction(&claims.actor(), Some(&workspace_id), &transaction_id, req.into())
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/workspaces/{workspace_id}/transactions/{transaction_id}",
    params(
        ("workspace_id" = String, Path, description = "Workspace ID"),
        ("transaction_id" = String, Path, description = "Transaction ID")
    ),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 403, description = "Not a member of this workspace", body = ErrorResponse),
        (status = 404, description = "Workspace or transaction not found", body = ErrorResponse)
    ),
    security(("bearer" = []))
)]
pub async fn delete_transaction(
    State(service): State<SharedService>,
    Extension(claims): Extension<Claims>,
    Path((workspace_id, transaction_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service
        .delete_transaction(&claims.actor(), Some(&workspace_id), &transaction_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
