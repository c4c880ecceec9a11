// 🌐 HTTP API - REST surface over the shared registry
//
// The caller address travels in the `x-caller` header. Reads ignore it.
// Every response, including extractor rejections, uses the `ApiResponse` envelope.

use crate::entities::{Student, StudentStatus};
use crate::error::{ErrorKind, RegistryError};
use crate::events::RegistryEvent;
use crate::guard::{ensure_owner, Address};
use crate::shared::SharedRegistry;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{FromRequest, FromRequestParts, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const CALLER_HEADER: &str = "x-caller";

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            kind: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String, code: &str, kind: Option<ErrorKind>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            code: Some(code.to_string()),
            kind: kind.map(|k| k.as_str().to_string()),
        }
    }
}

/// Age arrives signed and wide so out-of-range values reach registry validation
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredResponse {
    pub id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// Status as a name (`"DEFERRED"`, any case) or a wire code (`1`)
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusRequest {
    pub status: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    MissingCaller,
    InvalidStatus(String),
    Rejected { status: StatusCode, message: String },
    Registry(RegistryError),
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        ApiError::Registry(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::InvalidIdentifier => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Bounds => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingCaller => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::err(format!("Missing {} header", CALLER_HEADER), "API_MISSING_CALLER", None),
            ),
            ApiError::InvalidStatus(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::err(message, "API_INVALID_STATUS", Some(ErrorKind::Validation)),
            ),
            ApiError::Rejected { status, message } => {
                (status, ApiResponse::err(message, "API_BAD_REQUEST", None))
            }
            ApiError::Registry(err) => (
                status_for(err.kind()),
                ApiResponse::err(err.to_string(), err.code(), Some(err.kind())),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// EXTRACTORS (rejections rendered as ApiResponse)
// ============================================================================

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

fn caller_from(headers: &HeaderMap) -> Result<Address, ApiError> {
    headers
        .get(CALLER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(Address::new)
        .ok_or(ApiError::MissingCaller)
}

fn parse_status(value: &serde_json::Value) -> Result<StudentStatus, String> {
    match value {
        serde_json::Value::String(text) => text.parse(),
        serde_json::Value::Number(number) => number.to_string().parse(),
        other => Err(format!("Unknown status: {}", other)),
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/owner - Registry owner address
async fn get_owner(State(registry): State<SharedRegistry>) -> Json<ApiResponse<Address>> {
    Json(ApiResponse::ok(registry.owner()))
}

/// GET /api/students - All students in roster order
async fn list_students(State(registry): State<SharedRegistry>) -> Json<ApiResponse<Vec<Student>>> {
    Json(ApiResponse::ok(registry.get_all()))
}

/// POST /api/students - Register a student (owner only)
async fn register_student(
    State(registry): State<SharedRegistry>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredResponse>>), ApiError> {
    let caller = caller_from(&headers)?;
    let age = match u16::try_from(body.age) {
        Ok(age) => age,
        Err(_) => {
            ensure_owner(&registry.owner(), &caller)?;
            return Err(RegistryError::InvalidAge { age: body.age }.into());
        }
    };

    let id = registry.register_student(&caller, &body.name, age)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(RegisteredResponse { id }))))
}

/// GET /api/students/count
async fn student_count(State(registry): State<SharedRegistry>) -> Json<ApiResponse<usize>> {
    Json(ApiResponse::ok(registry.get_student_count()))
}

/// GET /api/students/search?name=...
async fn search_students(
    State(registry): State<SharedRegistry>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Json<ApiResponse<Vec<Student>>> {
    Json(ApiResponse::ok(registry.find_student_by_name(&query.name)))
}

/// GET /api/students/index/:position
async fn student_by_index(
    State(registry): State<SharedRegistry>,
    ApiPath(position): ApiPath<usize>,
) -> Result<Json<ApiResponse<Student>>, ApiError> {
    Ok(Json(ApiResponse::ok(registry.get_student_by_index(position)?)))
}

/// GET /api/students/:id
async fn student_by_id(
    State(registry): State<SharedRegistry>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<ApiResponse<Student>>, ApiError> {
    Ok(Json(ApiResponse::ok(registry.get_by_id(id)?)))
}

/// PUT /api/students/:id - Rename (owner only)
async fn update_student(
    State(registry): State<SharedRegistry>,
    ApiPath(id): ApiPath<u64>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<RenameRequest>,
) -> Result<Json<ApiResponse<Student>>, ApiError> {
    let caller = caller_from(&headers)?;
    let student = registry.update_student_and_fetch(&caller, id, &body.name)?;
    Ok(Json(ApiResponse::ok(student)))
}

/// PUT /api/students/:id/status (owner only)
async fn update_status(
    State(registry): State<SharedRegistry>,
    ApiPath(id): ApiPath<u64>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<StatusRequest>,
) -> Result<Json<ApiResponse<Student>>, ApiError> {
    let caller = caller_from(&headers)?;
    let status = match parse_status(&body.status) {
        Ok(status) => status,
        Err(message) => {
            ensure_owner(&registry.owner(), &caller)?;
            return Err(ApiError::InvalidStatus(message));
        }
    };

    let student = registry.update_status_and_fetch(&caller, id, status)?;
    Ok(Json(ApiResponse::ok(student)))
}

/// DELETE /api/students/:id (owner only)
async fn delete_student(
    State(registry): State<SharedRegistry>,
    ApiPath(id): ApiPath<u64>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let caller = caller_from(&headers)?;
    registry.delete_by_id(&caller, id)?;
    Ok(Json(ApiResponse::ok(id)))
}

/// GET /api/events - Audit trail
async fn list_events(State(registry): State<SharedRegistry>) -> Json<ApiResponse<Vec<RegistryEvent>>> {
    Json(ApiResponse::ok(registry.events()))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(registry: SharedRegistry) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/owner", get(get_owner))
        .route("/students", get(list_students).post(register_student))
        .route("/students/count", get(student_count))
        .route("/students/search", get(search_students))
        .route("/students/index/:position", get(student_by_index))
        .route(
            "/students/:id",
            get(student_by_id).put(update_student).delete(delete_student),
        )
        .route("/students/:id/status", put(update_status))
        .route("/events", get(list_events))
        .with_state(registry);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const OWNER: &str = "0xowner";

    fn app() -> (Router, SharedRegistry) {
        let registry = SharedRegistry::new(Address::new(OWNER));
        (router(registry.clone()), registry)
    }

    async fn send(app: &Router, method: Method, uri: &str, caller: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(caller) = caller {
            builder = builder.header(CALLER_HEADER, caller);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_register_and_fetch() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(OWNER),
            Some(json!({ "name": "Mary Jane", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], 1);

        let (status, body) = send(&app, Method::GET, "/api/students/1", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Mary Jane");
        assert_eq!(body["data"]["status"], "ACTIVE");
    }

    #[tokio::test]
    async fn test_mutations_require_owner() {
        let (app, registry) = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some("0xstranger"),
            Some(json!({ "name": "Mary Jane", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "REGISTRY_UNAUTHORIZED");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/students",
            None,
            Some(json!({ "name": "Mary Jane", "age": 20 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(registry.get_student_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_maps_to_unprocessable() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(OWNER),
            Some(json!({ "name": "John Doe", "age": 200 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "REGISTRY_INVALID_AGE");
    }

    #[tokio::test]
    async fn test_status_update_delete_and_lookup_errors() {
        let (app, registry) = app();
        let owner = Address::new(OWNER);
        registry.register_student(&owner, "Mary Jane", 20).unwrap();
        registry.register_student(&owner, "Joy Okoye", 22).unwrap();
        registry.register_student(&owner, "Lewis John", 19).unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/students/2/status",
            Some(OWNER),
            Some(json!({ "status": "DEFERRED" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "DEFERRED");

        let (status, _) = send(&app, Method::DELETE, "/api/students/2", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/api/students/2", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "REGISTRY_NOT_FOUND");

        let (status, body) = send(&app, Method::GET, "/api/students/999", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "REGISTRY_INVALID_ID");

        let (status, body) = send(&app, Method::GET, "/api/students/index/5", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "REGISTRY_INDEX_OUT_OF_BOUNDS");

        let (_, body) = send(&app, Method::GET, "/api/students", None, None).await;
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Mary Jane", "Lewis John"]);

        let (_, body) = send(&app, Method::GET, "/api/students/count", None, None).await;
        assert_eq!(body["data"], 2);
    }

    #[tokio::test]
    async fn test_rename_and_search() {
        let (app, registry) = app();
        let owner = Address::new(OWNER);
        registry.register_student(&owner, "John Doe", 20).unwrap();
        registry.register_student(&owner, "Jane Smith", 22).unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/students/2",
            Some(OWNER),
            Some(json!({ "name": "John Doe" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "John Doe");

        let (_, body) = send(&app, Method::GET, "/api/students/search?name=John%20Doe", None, None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, Method::GET, "/api/events", None, None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (_, body) = send(&app, Method::GET, "/api/owner", None, None).await;
        assert_eq!(body["data"], OWNER);
    }

    #[tokio::test]
    async fn test_out_of_range_age_uses_envelope() {
        let (app, registry) = app();

        for age in [-1i64, 0, 151, 70000] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/students",
                Some(OWNER),
                Some(json!({ "name": "X", "age": age })),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["success"], false);
            assert_eq!(body["code"], "REGISTRY_INVALID_AGE");
            assert_eq!(body["kind"], "Validation");
        }

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some("0xstranger"),
            Some(json!({ "name": "X", "age": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["kind"], "Authorization");
        assert_eq!(registry.get_student_count(), 0);
    }

    #[tokio::test]
    async fn test_extractor_rejections_use_envelope() {
        let (app, _) = app();

        let (status, body) = send(&app, Method::GET, "/api/students/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "API_BAD_REQUEST");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(OWNER),
            Some(json!({ "name": "X" })),
        )
        .await;
        assert!(status.is_client_error());
        assert_eq!(body["code"], "API_BAD_REQUEST");

        let (status, body) = send(&app, Method::GET, "/api/students/search", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "API_BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_status_accepts_wire_code_and_rejects_unknown() {
        let (app, registry) = app();
        registry.register_student(&Address::new(OWNER), "Test Student", 20).unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/students/1/status",
            Some(OWNER),
            Some(json!({ "status": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "RUSTICATED");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/students/1/status",
            Some(OWNER),
            Some(json!({ "status": "expelled" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "API_INVALID_STATUS");
        assert_eq!(registry.get_by_id(1).unwrap().status, StudentStatus::Rusticated);
    }
}
