// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use sitecrew_api::{
    ApiError, AvailabilityQuery, AvailabilityResponse, CreatedResponse, DateQuery,
    EligibleStaffResponse, ListQuery, ListResponse, MessageResponse, ReplaceAssignmentsResponse,
    ReplaceAvailabilityRequest, SaleListQuery, SiteInfo, SiteListQuery,
};
use sitecrew_domain::{
    Client, ClientDraft, Coverage, DayAssignments, DayPlan, Sale, SaleDraft, SiteDraft, SiteId,
    Staff, StaffDraft, StaffId,
};
use sitecrew_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// SiteCrew Server - HTTP server for staff, site and daily assignment records
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    /// With the `mysql` feature a `mysql://` URL selects `MySQL`/`MariaDB`.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// Every request takes the persistence lock for its whole database work, so
/// handlers never interleave on the connection.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Live event fan-out.
    live: Arc<LiveEventBroadcaster>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ReferentialIntegrity { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

type Created = (StatusCode, Json<CreatedResponse>);

fn created(response: CreatedResponse) -> Created {
    (StatusCode::CREATED, Json(response))
}

// ============================================================================
// Daily assignment
// ============================================================================

/// Handler for GET `/assignments/eligible-staff`.
async fn handle_get_eligible_staff(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<EligibleStaffResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::get_eligible_staff(
        &mut persistence,
        &query,
    )?))
}

/// Handler for GET `/assignments/coverage`.
async fn handle_get_coverage(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Coverage>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::get_coverage(&mut persistence, &query)?))
}

/// Handler for GET `/assignments`.
async fn handle_get_assignments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayAssignments>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::get_assignments(
        &mut persistence,
        &query,
    )?))
}

/// Handler for PUT `/assignments`.
///
/// Replaces the whole day and tells live viewers of that date to re-read.
async fn handle_replace_assignments(
    AxumState(app_state): AxumState<AppState>,
    Json(plan): Json<DayPlan>,
) -> Result<Json<ReplaceAssignmentsResponse>, HttpError> {
    info!(
        date = %plan.date,
        assignments = plan.assignments.len(),
        support_assignments = plan.support_assignments.len(),
        "Handling replace_assignments request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ReplaceAssignmentsResponse =
        sitecrew_api::replace_assignments(&mut persistence, &plan)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::AssignmentsReplaced {
        date: response.date,
        assignment_count: response.assignment_count,
        support_assignment_count: response.support_assignment_count,
    });
    Ok(Json(response))
}

// ============================================================================
// Clients
// ============================================================================

async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Client>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::list_clients(&mut persistence, &query)?))
}

async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    Json(draft): Json<ClientDraft>,
) -> Result<Created, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(sitecrew_api::create_client(
        &mut persistence,
        &draft,
    )?))
}

async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<Client>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::get_client(&mut persistence, client_id)?))
}

async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
    Json(draft): Json<ClientDraft>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::update_client(
        &mut persistence,
        client_id,
        &draft,
    )?))
}

async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::delete_client(
        &mut persistence,
        client_id,
    )?))
}

// ============================================================================
// Staff
// ============================================================================

async fn handle_list_staff(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Staff>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::list_staff(&mut persistence, &query)?))
}

async fn handle_create_staff(
    AxumState(app_state): AxumState<AppState>,
    Json(draft): Json<StaffDraft>,
) -> Result<Created, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(sitecrew_api::create_staff(
        &mut persistence,
        &draft,
    )?))
}

async fn handle_get_staff(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
) -> Result<Json<Staff>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::get_staff(&mut persistence, staff_id)?))
}

async fn handle_update_staff(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
    Json(draft): Json<StaffDraft>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::update_staff(
        &mut persistence,
        staff_id,
        &draft,
    )?))
}

/// Handler for DELETE `/staff/{id}`. Soft-deletes.
async fn handle_delete_staff(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::delete_staff(&mut persistence, staff_id)?))
}

async fn handle_list_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::list_availability(
        &mut persistence,
        staff_id,
        &query,
    )?))
}

async fn handle_replace_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(staff_id): Path<i64>,
    Json(request): Json<ReplaceAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilityResponse =
        sitecrew_api::replace_availability(&mut persistence, staff_id, &request)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::AvailabilityReplaced {
        staff_id: StaffId::new(staff_id),
    });
    Ok(Json(response))
}

// ============================================================================
// Sites
// ============================================================================

async fn handle_list_sites(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SiteListQuery>,
) -> Result<Json<ListResponse<SiteInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::list_sites(&mut persistence, &query)?))
}

async fn handle_create_site(
    AxumState(app_state): AxumState<AppState>,
    Json(draft): Json<SiteDraft>,
) -> Result<Created, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreatedResponse = sitecrew_api::create_site(&mut persistence, &draft)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::SiteChanged {
        site_id: SiteId::new(response.id),
    });
    Ok(created(response))
}

async fn handle_get_site(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
) -> Result<Json<SiteInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::get_site(&mut persistence, site_id)?))
}

async fn handle_update_site(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
    Json(draft): Json<SiteDraft>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = sitecrew_api::update_site(&mut persistence, site_id, &draft)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::SiteChanged {
        site_id: SiteId::new(site_id),
    });
    Ok(Json(response))
}

async fn handle_delete_site(
    AxumState(app_state): AxumState<AppState>,
    Path(site_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = sitecrew_api::delete_site(&mut persistence, site_id)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::SiteChanged {
        site_id: SiteId::new(site_id),
    });
    Ok(Json(response))
}

// ============================================================================
// Sales
// ============================================================================

async fn handle_list_sales(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SaleListQuery>,
) -> Result<Json<ListResponse<Sale>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::list_sales(&mut persistence, &query)?))
}

async fn handle_create_sale(
    AxumState(app_state): AxumState<AppState>,
    Json(draft): Json<SaleDraft>,
) -> Result<Created, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(created(sitecrew_api::create_sale(&mut persistence, draft)?))
}

async fn handle_update_sale(
    AxumState(app_state): AxumState<AppState>,
    Path(sale_id): Path<i64>,
    Json(draft): Json<SaleDraft>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::update_sale(
        &mut persistence,
        sale_id,
        draft,
    )?))
}

async fn handle_delete_sale(
    AxumState(app_state): AxumState<AppState>,
    Path(sale_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(sitecrew_api::delete_sale(&mut persistence, sale_id)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/assignments",
            get(handle_get_assignments).put(handle_replace_assignments),
        )
        .route(
            "/assignments/eligible-staff",
            get(handle_get_eligible_staff),
        )
        .route("/assignments/coverage", get(handle_get_coverage))
        .route(
            "/clients",
            get(handle_list_clients).post(handle_create_client),
        )
        .route(
            "/clients/{client_id}",
            get(handle_get_client)
                .put(handle_update_client)
                .delete(handle_delete_client),
        )
        .route("/staff", get(handle_list_staff).post(handle_create_staff))
        .route(
            "/staff/{staff_id}",
            get(handle_get_staff)
                .put(handle_update_staff)
                .delete(handle_delete_staff),
        )
        .route(
            "/staff/{staff_id}/availability",
            get(handle_list_availability).put(handle_replace_availability),
        )
        .route("/sites", get(handle_list_sites).post(handle_create_site))
        .route(
            "/sites/{site_id}",
            get(handle_get_site)
                .put(handle_update_site)
                .delete(handle_delete_site),
        )
        .route("/sales", get(handle_list_sales).post(handle_create_sale))
        .route(
            "/sales/{sale_id}",
            put(handle_update_sale).delete(handle_delete_sale),
        )
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

fn open_persistence(database: Option<&str>) -> Result<Persistence, Box<dyn std::error::Error>> {
    match database {
        #[cfg(feature = "mysql")]
        Some(url) if url.starts_with("mysql://") => {
            info!("Using MySQL database");
            Ok(Persistence::new_with_mysql(url)?)
        }
        Some(db_path) => {
            info!(db_path, "Using file-based database");
            Ok(Persistence::new_with_file(db_path)?)
        }
        None => {
            info!("Using in-memory database");
            Ok(Persistence::new_in_memory()?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing SiteCrew Server");

    let persistence: Persistence = open_persistence(args.database.as_deref())?;

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        live: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
