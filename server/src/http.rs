use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use directory::{
    Compensation, CompensationDraft, DirectoryError, Employee, ReportingStructure,
    cents_to_salary,
};
use platform_db::{DbPool, EmployeeFields};
use sea_orm::{ConnectionTrait, Statement};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "directory server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let layer = CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET, Method::PUT]);
    if allowed.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_credentials(true)
            .allow_origin(AllowOrigin::list(allowed))
    }
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/employee", post(create_employee))
        .route("/api/employee/{id}", get(get_employee).put(update_employee))
        .route("/api/employee/numberOfReports/{id}", get(number_of_reports))
        .route("/api/compensation", post(create_compensation))
        .route("/api/compensation/{id}", get(get_compensation))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EmployeeInput {
    first_name: String,
    last_name: String,
    position: String,
    department: String,
    direct_reports: Vec<DirectReportRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DirectReportRef {
    employee_id: Option<String>,
}

impl EmployeeInput {
    fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
        }
    }
}

/// Gates every direct-report reference (id shape, then existence) before any
/// write happens, so a bad reference fails the whole request.
async fn resolve_report_refs(
    state: &AppState,
    refs: &[DirectReportRef],
) -> HttpResult<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(refs.len());
    for reference in refs {
        let raw = reference.employee_id.as_deref().unwrap_or("");
        let id = directory::validate_employee_id(raw)?;
        let row = platform_db::find_employee(&state.pool, id)
            .await
            .map_err(|err| HttpError::internal(err.into()))?;
        directory::require_employee(raw, row.map(|model| platform_db::employee_view(&model)))?;
        ids.push(id);
    }
    Ok(ids)
}

async fn load_tree(state: &AppState, id: Uuid) -> HttpResult<Option<Employee>> {
    platform_db::load_employee_tree(&state.pool, id)
        .await
        .map_err(|err| HttpError::internal(err.into()))
}

async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<EmployeeInput>,
) -> HttpResult<(StatusCode, Json<Employee>)> {
    debug!(first_name = %input.first_name, last_name = %input.last_name, "employee create request");
    let report_ids = resolve_report_refs(&state, &input.direct_reports).await?;
    let id = platform_db::insert_employee(&state.pool, input.fields(), &report_ids)
        .await
        .map_err(|err| HttpError::internal(err.into()))?;
    let employee = load_tree(&state, id)
        .await?
        .ok_or_else(|| HttpError::internal(anyhow::anyhow!("employee {id} missing after insert")))?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Employee>> {
    debug!(%id, "employee get request");
    // Unparseable ids fall through to plain not-found on this path.
    let Ok(parsed) = Uuid::try_parse(&id) else {
        return Err(HttpError::not_found());
    };
    let employee = load_tree(&state, parsed)
        .await?
        .ok_or_else(HttpError::not_found)?;
    Ok(Json(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EmployeeInput>,
) -> HttpResult<Json<Employee>> {
    debug!(%id, "employee replace request");
    let Ok(parsed) = Uuid::try_parse(&id) else {
        return Err(HttpError::not_found());
    };
    if platform_db::find_employee(&state.pool, parsed)
        .await
        .map_err(|err| HttpError::internal(err.into()))?
        .is_none()
    {
        return Err(HttpError::not_found());
    }
    let report_ids = resolve_report_refs(&state, &input.direct_reports).await?;
    platform_db::replace_employee(&state.pool, parsed, input.fields(), &report_ids)
        .await
        .map_err(|err| HttpError::internal(err.into()))?;
    let employee = load_tree(&state, parsed)
        .await?
        .ok_or_else(HttpError::not_found)?;
    Ok(Json(employee))
}

async fn number_of_reports(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<ReportingStructure>> {
    debug!(%id, "reporting structure request");
    // Empty-then-format order is contractual on this path.
    let parsed = directory::validate_employee_id(&id)?;
    let found = load_tree(&state, parsed).await?;
    let employee = directory::require_employee(&id, found)?;
    let number_of_reports = directory::count_descendants(&employee)?;
    Ok(Json(ReportingStructure {
        employee,
        number_of_reports,
    }))
}

async fn create_compensation(
    State(state): State<AppState>,
    Json(draft): Json<CompensationDraft>,
) -> HttpResult<(StatusCode, Json<Compensation>)> {
    debug!("compensation create request");
    let (raw, id) = {
        let (raw, id) = directory::screen_compensation(&draft)?;
        (raw.to_string(), id)
    };
    let row = platform_db::find_employee(&state.pool, id)
        .await
        .map_err(|err| HttpError::internal(err.into()))?;
    // The embedded employee keeps an empty reports list on purpose.
    let employee =
        directory::require_employee(&raw, row.map(|model| platform_db::employee_view(&model)))?;
    let admitted = directory::admit_compensation(&draft)?;
    let record = platform_db::insert_compensation(
        &state.pool,
        id,
        admitted.salary_cents,
        admitted.effective_date,
    )
    .await
    .map_err(|err| HttpError::internal(err.into()))?;
    Ok((
        StatusCode::CREATED,
        Json(Compensation {
            compensation_id: record.id,
            employee,
            salary: cents_to_salary(record.salary_cents),
            effective_date: record.effective_date,
        }),
    ))
}

async fn get_compensation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Compensation>> {
    debug!(%id, "compensation get request");
    let parsed = directory::validate_employee_id(&id)?;
    let row = platform_db::find_employee(&state.pool, parsed)
        .await
        .map_err(|err| HttpError::internal(err.into()))?;
    let employee =
        directory::require_employee(&id, row.map(|model| platform_db::employee_view(&model)))?;
    let record = platform_db::compensation_for_employee(&state.pool, parsed)
        .await
        .map_err(|err| HttpError::internal(err.into()))?
        .ok_or_else(HttpError::not_found)?;
    Ok(Json(Compensation {
        compensation_id: record.id,
        employee,
        salary: cents_to_salary(record.salary_cents),
        effective_date: record.effective_date,
    }))
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.pool.get_database_backend();
    let db_ok = state
        .pool
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: String::new(),
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DirectoryError> for HttpError {
    fn from(err: DirectoryError) -> Self {
        let status = match &err {
            DirectoryError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            DirectoryError::CyclicHierarchy(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
