// Axum API Server Module
//
// Purpose: REST surface over the suitability, yield and fertilizer engines,
// plus the keyword chatbot and the marketplace catalog.
// All engine routes live under /api/<version>/ (see ServerConfig::api_prefix).

#[cfg(feature = "api")]
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Query, State,
    },
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use std::sync::{Arc, Mutex};

#[cfg(feature = "api")]
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "api")]
use serde::Deserialize;

#[cfg(feature = "api")]
use crate::advisory::{AdvisoryEngine, AdvisoryOutcome};
#[cfg(feature = "api")]
use crate::chatbot::{self, ChatRequest};
#[cfg(feature = "api")]
use crate::conditions::{ConditionVector, SoilType};
#[cfg(feature = "api")]
use crate::config::{CorsOrigins, ServerConfig};
#[cfg(feature = "api")]
use crate::error::CatalogError;
#[cfg(feature = "api")]
use crate::marketplace::{NewProduct, ProductCatalog, ProductQuery};
#[cfg(feature = "api")]
use crate::suitability::SuitabilityEngine;
#[cfg(feature = "api")]
use crate::yield_model::{generate_history, YieldConditions, YieldEngine, DEFAULT_HISTORY_MONTHS};

/// Upper bound on `months` for the history endpoint
#[cfg(feature = "api")]
pub const MAX_HISTORY_MONTHS: u32 = 120;

#[cfg(feature = "api")]
const DEFAULT_SEASON: &str = "Unknown";

// ============================================================================
// Extractors
// ============================================================================

/// `Json` whose rejections render through `AppError`
#[cfg(feature = "api")]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
struct ApiJson<T>(T);

/// `Path` whose rejections render through `AppError`
#[cfg(feature = "api")]
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
struct ApiPath<T>(T);

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub suitability: Arc<SuitabilityEngine>,
    pub yield_engine: YieldEngine,
    pub advisory: AdvisoryEngine,
    pub catalog: Arc<ProductCatalog>,
    /// Jitter source for the mock yield history
    pub history_rng: Arc<Mutex<StdRng>>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Building crop rule table...");
        let suitability = Arc::new(SuitabilityEngine::with_default_crops()?);
        tracing::info!("Loaded {} crop rules", suitability.table().len());

        let history_rng = match config.history_seed {
            Some(seed) => {
                tracing::info!("Yield history seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config: Arc::new(config),
            suitability,
            yield_engine: YieldEngine::new(),
            advisory: AdvisoryEngine::new(),
            catalog: Arc::new(ProductCatalog::new()),
            history_rng: Arc::new(Mutex::new(history_rng)),
        })
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    let prefix = state.config.api_prefix();
    let cors = cors_layer(&state.config.cors_origins);

    let api = Router::new()
        // Crop suitability
        .route("/crops/recommend", get(recommend_crops))
        .route("/crops/list", get(list_crops))

        // Yield prediction
        .route("/predict/yield", post(predict_yield))
        .route("/predict/yield/history", get(yield_history))

        // Fertilizer advisory
        .route("/fertilizer/recommend", get(recommend_fertilizer))

        // Chatbot
        .route("/chatbot/respond", post(chatbot_respond))

        // Marketplace
        .route("/marketplace/products", get(list_products).post(create_product))
        .route("/marketplace/products/:id", get(get_product));

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .nest(&prefix, api)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(feature = "api")]
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any)
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[cfg(feature = "api")]
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Crop advisor API is running"
    }))
}

#[cfg(feature = "api")]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": state.config.api_version,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

// ============================================================================
// Crop Suitability
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendParams {
    soil_type: Option<String>,
    temperature: Option<String>,
    humidity: Option<String>,
}

/// Unparseable numbers count as missing
#[cfg(feature = "api")]
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(feature = "api")]
async fn recommend_crops(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let soil_type = params.soil_type.as_deref().filter(|s| !s.is_empty());
    let temperature = parse_number(params.temperature.as_deref());
    let humidity = parse_number(params.humidity.as_deref());

    let (Some(soil_type), Some(temperature), Some(humidity)) = (soil_type, temperature, humidity) else {
        return Err(AppError::BadRequest(
            "Missing required parameters: soilType, temperature, humidity".to_string(),
        ));
    };

    let conditions = ConditionVector::new(SoilType::parse(soil_type), temperature, humidity);
    let recommendations = state.suitability.recommend(&conditions);

    tracing::debug!(
        "Recommend {}/{}/{} -> {} crops",
        soil_type,
        temperature,
        humidity,
        recommendations.len()
    );

    Ok(Json(serde_json::json!({
        "recommendations": recommendations,
        "query": {
            "soilType": soil_type,
            "temperature": temperature,
            "humidity": humidity,
        }
    })))
}

#[cfg(feature = "api")]
async fn list_crops(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "crops": state.suitability.crop_names()
    }))
}

// ============================================================================
// Yield Prediction
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YieldRequest {
    crop_type: Option<String>,
    field_size: Option<f64>,
    conditions: Option<serde_json::Map<String, serde_json::Value>>,
    season: Option<String>,
}

#[cfg(feature = "api")]
async fn predict_yield(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<YieldRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let crop_type = request.crop_type.as_deref().filter(|s| !s.is_empty());
    let field_size = request.field_size.filter(|f| *f != 0.0);
    let conditions = request.conditions.filter(|c| !c.is_empty());

    let (Some(crop_type), Some(field_size), Some(conditions)) = (crop_type, field_size, conditions) else {
        return Err(AppError::BadRequest(
            "Missing required fields: cropType, fieldSize, conditions".to_string(),
        ));
    };

    if !field_size.is_finite() || field_size < 0.0 {
        return Err(AppError::BadRequest(format!(
            "fieldSize must be positive, got {}",
            field_size
        )));
    }

    let conditions: YieldConditions = serde_json::from_value(serde_json::Value::Object(conditions))
        .map_err(|e| AppError::BadRequest(format!("Invalid conditions: {}", e)))?;

    let season = request.season.as_deref().unwrap_or(DEFAULT_SEASON);
    let estimate = state.yield_engine.predict(crop_type, field_size, &conditions, season);

    Ok(Json(serde_json::to_value(&estimate).map_err(|e| {
        AppError::Internal(format!("JSON serialization error: {}", e))
    })?))
}

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryParams {
    crop_type: Option<String>,
    months: Option<String>,
}

/// Unparseable counts fall back to the default; negative counts yield nothing.
#[cfg(feature = "api")]
fn parse_months(raw: Option<&str>) -> u32 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        None => DEFAULT_HISTORY_MONTHS,
        Some(n) if n < 0 => 0,
        Some(n) => n.min(MAX_HISTORY_MONTHS as i64) as u32,
    }
}

#[cfg(feature = "api")]
async fn yield_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let months = parse_months(params.months.as_deref());
    let crop_type = params.crop_type.as_deref().filter(|s| !s.is_empty());

    let history = {
        let mut rng = state
            .history_rng
            .lock()
            .map_err(|_| AppError::Internal("History generator lock poisoned".to_string()))?;
        generate_history(crop_type, months, chrono::Utc::now(), &mut *rng)
    };

    Ok(Json(serde_json::json!({ "history": history })))
}

// ============================================================================
// Fertilizer Advisory
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FertilizerParams {
    crop_type: Option<String>,
    soil_type: Option<String>,
    soil_ph: Option<String>,
}

#[cfg(feature = "api")]
async fn recommend_fertilizer(
    State(state): State<AppState>,
    Query(params): Query<FertilizerParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let crop_type = params.crop_type.as_deref().filter(|s| !s.is_empty());
    let soil_type = params.soil_type.as_deref().filter(|s| !s.is_empty());

    let (Some(crop_type), Some(soil_type)) = (crop_type, soil_type) else {
        return Err(AppError::BadRequest(
            "Missing required parameters: cropType, soilType".to_string(),
        ));
    };

    let soil_ph = match params.soil_ph.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => Some(
            parse_number(Some(raw))
                .ok_or_else(|| AppError::BadRequest(format!("Invalid soilPh: {}", raw)))?,
        ),
    };

    match state.advisory.recommend(crop_type, &SoilType::parse(soil_type), soil_ph) {
        AdvisoryOutcome::Found(advisory) => Ok(Json(serde_json::to_value(&advisory).map_err(|e| {
            AppError::Internal(format!("JSON serialization error: {}", e))
        })?)),
        AdvisoryOutcome::NotFound { crop } => Err(AppError::NotFound(format!(
            "No fertilizer data available for {}",
            crop
        ))),
    }
}

// ============================================================================
// Chatbot
// ============================================================================

#[cfg(feature = "api")]
async fn chatbot_respond(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(message) = request.message.as_deref().filter(|m| !m.trim().is_empty()) else {
        return Err(AppError::BadRequest("Message is required".to_string()));
    };

    let reply = chatbot::respond(message, request.context.as_deref(), state.suitability.table());

    Ok(Json(serde_json::to_value(&reply).map_err(|e| {
        AppError::Internal(format!("JSON serialization error: {}", e))
    })?))
}

// ============================================================================
// Marketplace
// ============================================================================

#[cfg(feature = "api")]
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let products = state.catalog.list(&query)?;

    Ok(Json(serde_json::json!({
        "total": products.len(),
        "products": products,
    })))
}

#[cfg(feature = "api")]
async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let product = state.catalog.get(id)?;
    Ok(Json(serde_json::json!(product)))
}

#[cfg(feature = "api")]
async fn create_product(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let new_product: NewProduct = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid product: {}", e)))?;

    let product = state.catalog.insert(new_product)?;
    tracing::info!("Created product {} ({})", product.id, product.name);

    Ok((StatusCode::CREATED, Json(serde_json::json!(product))))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::Validation(_) => AppError::BadRequest(err.to_string()),
            CatalogError::Poisoned => AppError::Internal(err.to_string()),
        }
    }
}

#[cfg(feature = "api")]
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

#[cfg(feature = "api")]
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
