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

mod cookies;
mod live;
mod session;

use axum::{
    Json, Router,
    extract::{FromRef, Path, State as AxumState},
    http::{HeaderMap, HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stepline::{
    EffectiveDateResolver, LifecycleOrchestrator, SimulationControl, SystemClock,
    ViewInvalidator, WallClock,
};
use stepline_api::{
    ApiError, AuthenticationService, ListMembersResponse, ListPayoutsResponse, LoginRequest,
    LoginResponse, Role, ScenarioResponse, SeedResponse, SetSimulationDateRequest,
    SimulationStatusResponse, TableCountsResponse, WipeResponse,
};
use stepline_persistence::{Persistence, PersistenceError};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::cookies::{ClientOverrides, CookieSettings};
use crate::live::{LiveEventBroadcaster, LiveInvalidator, live_events_handler};
use crate::session::{SESSION_COOKIE, SessionOperator};

/// Stepline Server - HTTP server for studio operators
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone that defines the studio's calendar day
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Login name of the admin created when no operator exists
    #[arg(long)]
    admin_login: Option<String>,

    /// Password of the admin created when no operator exists
    #[arg(long)]
    admin_password: Option<String>,

    /// Mark cookies `Secure` (serve over HTTPS)
    #[arg(long)]
    secure_cookies: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer. Each handler holds the lock for one operation.
    persistence: Arc<Mutex<Persistence>>,
    simulation: SimulationControl,
    lifecycle: Arc<LifecycleOrchestrator>,
    resolver: EffectiveDateResolver,
    broadcaster: Arc<LiveEventBroadcaster>,
    cookies: CookieSettings,
}

impl AppState {
    fn new(persistence: Persistence, clock: Arc<dyn WallClock>, cookies: CookieSettings) -> Self {
        let broadcaster: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
        let invalidator: Arc<dyn ViewInvalidator> =
            Arc::new(LiveInvalidator::new(Arc::clone(&broadcaster)));
        let resolver: EffectiveDateResolver = EffectiveDateResolver::new(clock);

        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            simulation: SimulationControl::new(resolver.clone(), Arc::clone(&invalidator)),
            lifecycle: Arc::new(LifecycleOrchestrator::new(resolver.clone(), invalidator)),
            resolver,
            broadcaster,
            cookies,
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Steps that completed before a multi-step operation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<Vec<String>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    completed: Option<Vec<String>>,
}

impl HttpError {
    const fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            completed: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            completed: self.completed,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ContextUnavailable { .. }
            | ApiError::OperationIncomplete { .. }
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message: String = err.to_string();
        let completed: Option<Vec<String>> = match err {
            ApiError::OperationIncomplete { completed, .. } => Some(completed),
            _ => None,
        };
        Self {
            status,
            message,
            completed,
        }
    }
}

/// Response headers setting one cookie.
fn set_cookie_header(cookie: &str) -> Result<HeaderMap, HttpError> {
    let value: HeaderValue = HeaderValue::from_str(cookie).map_err(|e| {
        error!(error = %e, "Cookie is not a valid header value");
        HttpError::internal(String::from("Failed to build session cookie"))
    })?;
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(SET_COOKIE, value);
    Ok(headers)
}

// ============================================================================
// Sessions
// ============================================================================

/// Handler for POST `/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), HttpError> {
    info!(login_name = %req.login_name, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = stepline_api::login(&mut persistence, &req)?;
    drop(persistence);

    let headers: HeaderMap = set_cookie_header(&app_state.cookies.build(
        SESSION_COOKIE,
        &response.session_token,
        AuthenticationService::SESSION_LIFETIME.whole_seconds(),
    ))?;

    Ok((headers, Json(response)))
}

/// Handler for POST `/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator {
        operator,
        session_token,
        ..
    }: SessionOperator,
) -> Result<(HeaderMap, StatusCode), HttpError> {
    info!(login_name = %operator.login_name, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    stepline_api::logout(&mut persistence, &session_token)?;
    drop(persistence);

    let headers: HeaderMap = set_cookie_header(&app_state.cookies.build(SESSION_COOKIE, "", 0))?;
    Ok((headers, StatusCode::NO_CONTENT))
}

// ============================================================================
// Simulation
// ============================================================================

/// Handler for GET `/simulation`.
async fn handle_simulation_status(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
) -> Json<SimulationStatusResponse> {
    Json(stepline_api::simulation_status(
        &app_state.simulation,
        &overrides,
    ))
}

/// Handler for POST `/simulation`.
async fn handle_set_simulation_date(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator { actor, .. }: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
    Json(req): Json<SetSimulationDateRequest>,
) -> Result<(HeaderMap, Json<SimulationStatusResponse>), HttpError> {
    info!(actor = %actor.id, date = %req.date, "Handling set simulation date request");

    let response: SimulationStatusResponse =
        stepline_api::set_simulation_date(&app_state.simulation, &overrides, &actor, &req)?;
    Ok((overrides.response_headers(), Json(response)))
}

/// Handler for DELETE `/simulation`.
async fn handle_clear_simulation_date(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator { actor, .. }: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
) -> Result<(HeaderMap, Json<SimulationStatusResponse>), HttpError> {
    info!(actor = %actor.id, "Handling clear simulation date request");

    let response: SimulationStatusResponse =
        stepline_api::clear_simulation_date(&app_state.simulation, &overrides, &actor)?;
    Ok((overrides.response_headers(), Json(response)))
}

// ============================================================================
// Data lifecycle
// ============================================================================

/// Handler for POST `/admin/wipe`.
async fn handle_wipe(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator { actor, .. }: SessionOperator,
) -> Result<Json<WipeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: WipeResponse =
        stepline_api::wipe_all_business_data(&app_state.lifecycle, &mut persistence, &actor)?;
    Ok(Json(response))
}

/// Handler for POST `/admin/seed`.
async fn handle_seed(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator { actor, .. }: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
) -> Result<Json<SeedResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SeedResponse = stepline_api::seed_demo_data(
        &app_state.lifecycle,
        &mut persistence,
        &overrides,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/admin/scenarios/{kind}`.
async fn handle_generate_scenario(
    AxumState(app_state): AxumState<AppState>,
    SessionOperator { actor, .. }: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
    Path(kind): Path<String>,
) -> Result<Json<ScenarioResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ScenarioResponse = stepline_api::generate_scenario(
        &app_state.lifecycle,
        &mut persistence,
        &overrides,
        &actor,
        &kind,
    )?;
    Ok(Json(response))
}

/// Handler for GET `/admin/counts`.
async fn handle_table_counts(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
) -> Result<Json<TableCountsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(stepline_api::table_counts(&mut persistence)?))
}

// ============================================================================
// Listings
// ============================================================================

/// Handler for GET `/members`.
async fn handle_list_members(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
) -> Result<Json<ListMembersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListMembersResponse =
        stepline_api::list_members(&mut persistence, &app_state.resolver, &overrides)?;
    Ok(Json(response))
}

/// Handler for GET `/payouts`.
async fn handle_list_payouts(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionOperator,
    ClientOverrides(overrides): ClientOverrides,
) -> Result<Json<ListPayoutsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListPayoutsResponse =
        stepline_api::list_payouts(&mut persistence, &app_state.resolver, &overrides)?;
    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route(
            "/simulation",
            get(handle_simulation_status)
                .post(handle_set_simulation_date)
                .delete(handle_clear_simulation_date),
        )
        .route("/admin/wipe", post(handle_wipe))
        .route("/admin/seed", post(handle_seed))
        .route("/admin/scenarios/{kind}", post(handle_generate_scenario))
        .route("/admin/counts", get(handle_table_counts))
        .route("/members", get(handle_list_members))
        .route("/payouts", get(handle_list_payouts))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Creates the configured admin if the database has no operators.
fn bootstrap_admin(
    persistence: &mut Persistence,
    login: Option<&str>,
    password: Option<&str>,
) -> Result<(), PersistenceError> {
    if persistence.count_operators()? > 0 {
        return Ok(());
    }

    match (login, password) {
        (Some(login), Some(password)) => {
            let operator_id: i64 = persistence.create_operator(
                login,
                "Administrator",
                password,
                Role::Admin.as_str(),
            )?;
            info!(operator_id, login, "Created bootstrap admin");
        }
        _ => warn!(
            "No operators exist; pass --admin-login and --admin-password to create an admin"
        ),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Stepline Server");

    let timezone: chrono_tz::Tz = args
        .timezone
        .parse()
        .map_err(|e| format!("Invalid timezone {}: {e}", args.timezone))?;
    info!(%timezone, "Using studio timezone");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    bootstrap_admin(
        &mut persistence,
        args.admin_login.as_deref(),
        args.admin_password.as_deref(),
    )?;

    let app_state: AppState = AppState::new(
        persistence,
        Arc::new(SystemClock::new(timezone)),
        CookieSettings {
            secure: args.secure_cookies,
        },
    );

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
