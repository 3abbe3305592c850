// API Integration Tests
//
// Purpose: Drive every endpoint through the router in-process
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use crop_advisor_rust::{create_router, AppState, ServerConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app with a fixed history seed
    fn create_test_app() -> axum::Router {
        let config = ServerConfig {
            history_seed: Some(7),
            ..ServerConfig::default()
        };
        let state = AppState::new(config).expect("state should build from default tables");
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, json_response(response).await)
    }

    async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, body.to_string()).await
    }

    // Helper: POST a body verbatim, for payloads that are not valid JSON
    async fn post_raw(app: axum::Router, uri: &str, body: String) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, json_response(response).await)
    }

    // =========================================================================
    // Section 1: Health
    // =========================================================================

    #[tokio::test]
    async fn test_root_and_health() {
        let (status, json) = get(create_test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");

        let (status, json) = get(create_test_app(), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], "v1");
        assert!(json["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Crop Suitability
    // =========================================================================

    #[tokio::test]
    async fn test_recommend_loamy_warm() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/crops/recommend?soilType=Loamy&temperature=22&humidity=65",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let recs = json["recommendations"].as_array().unwrap();
        let crops: Vec<&str> = recs.iter().map(|r| r["crop"].as_str().unwrap()).collect();
        assert_eq!(crops, vec!["Wheat", "Corn", "Tomatoes", "Potatoes"]);

        assert_eq!(recs[0]["score"], 1.0);
        assert_eq!(recs[0]["suitability"], "Excellent");
        assert_eq!(recs[0]["yield"], "High");
        assert_eq!(
            recs[0]["reason"],
            "Wheat is recommended because of optimal Loamy soil, ideal temperature range (15-25°C), suitable humidity (50-70%)."
        );

        assert_eq!(json["query"]["soilType"], "Loamy");
        assert_eq!(json["query"]["temperature"], 22.0);
    }

    #[tokio::test]
    async fn test_recommend_unknown_soil_partial_scores() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/crops/recommend?soilType=Silty&temperature=18&humidity=55",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // No crop accepts Silty; Wheat, Potatoes and Barley fit both bands
        let recs = json["recommendations"].as_array().unwrap();
        for rec in recs {
            assert_eq!(rec["score"], 0.6);
        }
        let crops: Vec<&str> = recs.iter().map(|r| r["crop"].as_str().unwrap()).collect();
        assert_eq!(crops, vec!["Wheat", "Potatoes", "Barley"]);
    }

    #[tokio::test]
    async fn test_recommend_missing_parameter() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/crops/recommend?soilType=Loamy&temperature=22",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "Missing required parameters: soilType, temperature, humidity"
        );
    }

    #[tokio::test]
    async fn test_recommend_no_matches_is_empty() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/crops/recommend?soilType=Rocky&temperature=-20&humidity=5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["recommendations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_crops() {
        let (status, json) = get(create_test_app(), "/api/v1/crops/list").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["crops"],
            json!(["Wheat", "Corn", "Tomatoes", "Potatoes", "Rice", "Barley"])
        );
    }

    // =========================================================================
    // Section 3: Yield Prediction
    // =========================================================================

    #[tokio::test]
    async fn test_predict_yield_optimal() {
        let (status, json) = post_json(
            create_test_app(),
            "/api/v1/predict/yield",
            json!({
                "cropType": "Wheat",
                "fieldSize": 2.0,
                "conditions": {"temperature": 24, "humidity": 65, "soilMoisture": 70, "soilType": "Loamy"},
                "season": "Spring"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["predictedYield"], 9000.0);
        assert_eq!(json["confidence"], 1.0);
        assert_eq!(json["baseYieldPerHectare"], 3000.0);
        assert_eq!(json["season"], "Spring");
        assert_eq!(json["factors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_predict_yield_unknown_crop_default_season() {
        let (status, json) = post_json(
            create_test_app(),
            "/api/v1/predict/yield",
            json!({"cropType": "Quinoa", "fieldSize": 1.0, "conditions": {"temperature": 25}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["baseYieldPerHectare"], 2000.0);
        assert_eq!(json["predictedYield"], 3000.0);
        assert_eq!(json["season"], "Unknown");
    }

    #[tokio::test]
    async fn test_predict_yield_validation() {
        let missing = json!({"cropType": "Wheat", "conditions": {"temperature": 20}});
        let (status, json) = post_json(create_test_app(), "/api/v1/predict/yield", missing).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields: cropType, fieldSize, conditions");

        let empty_conditions = json!({"cropType": "Wheat", "fieldSize": 1.0, "conditions": {}});
        let (status, _) = post_json(create_test_app(), "/api/v1/predict/yield", empty_conditions).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let negative = json!({"cropType": "Wheat", "fieldSize": -1.0, "conditions": {"humidity": 60}});
        let (status, _) = post_json(create_test_app(), "/api/v1/predict/yield", negative).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_yield_wrong_field_type_is_json_error() {
        let body = json!({"cropType": "Wheat", "fieldSize": "two", "conditions": {"humidity": 60}});
        let (status, json) = post_json(create_test_app(), "/api/v1/predict/yield", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn test_yield_history() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/predict/yield/history?cropType=Corn&months=3",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let history = json["history"].as_array().unwrap();
        assert_eq!(history.len(), 3);
        for entry in history {
            assert_eq!(entry["cropType"], "Corn");
            let value = entry["yield"].as_f64().unwrap();
            assert!((7200.0..=8800.0).contains(&value));
        }

        let (_, json) = get(create_test_app(), "/api/v1/predict/yield/history").await;
        let history = json["history"].as_array().unwrap();
        assert_eq!(history.len(), 6);
        assert_eq!(history[0]["cropType"], "Mixed");
    }

    #[tokio::test]
    async fn test_yield_history_lenient_months() {
        let (status, json) = get(create_test_app(), "/api/v1/predict/yield/history?months=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["history"].as_array().unwrap().len(), 6);

        let (status, json) = get(create_test_app(), "/api/v1/predict/yield/history?months=-2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["history"].as_array().unwrap().is_empty());

        let (_, json) = get(create_test_app(), "/api/v1/predict/yield/history?months=500").await;
        assert_eq!(json["history"].as_array().unwrap().len(), 120);
    }

    // =========================================================================
    // Section 4: Fertilizer Advisory
    // =========================================================================

    #[tokio::test]
    async fn test_fertilizer_found() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/fertilizer/recommend?cropType=Wheat&soilType=Clay&soilPh=5.5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["crop"], "Wheat");
        assert_eq!(json["soilType"], "Clay");
        assert_eq!(json["requirements"]["nitrogen"], "high");
        assert_eq!(json["recommendedFertilizers"], json!(["Urea", "DAP", "Potash"]));
        assert_eq!(json["applicationSchedule"].as_array().unwrap().len(), 3);
        assert_eq!(json["notes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fertilizer_unknown_crop_is_404() {
        let (status, json) = get(
            create_test_app(),
            "/api/v1/fertilizer/recommend?cropType=Rice&soilType=Clay",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "No fertilizer data available for Rice");
    }

    #[tokio::test]
    async fn test_fertilizer_missing_soil_is_400() {
        let (status, _) = get(create_test_app(), "/api/v1/fertilizer/recommend?cropType=Wheat").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Section 5: Chatbot
    // =========================================================================

    #[tokio::test]
    async fn test_chatbot() {
        let (status, json) = post_json(
            create_test_app(),
            "/api/v1/chatbot/respond",
            json!({"message": "What about tomatoes?", "conversationHistory": []}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["response"].as_str().unwrap().contains("tomatoes"));
        assert_eq!(json["confidence"], 0.85);
        assert_eq!(json["context"], "agriculture");

        let (status, json) = post_json(create_test_app(), "/api/v1/chatbot/respond", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Message is required");
    }

    // =========================================================================
    // Section 6: Marketplace
    // =========================================================================

    #[tokio::test]
    async fn test_marketplace_create_get_list() {
        let app = create_test_app();

        let (status, created) = post_json(
            app.clone(),
            "/api/v1/marketplace/products",
            json!({"name": "Sweet Corn", "description": "Fresh", "price": 42.0, "stock": 10, "category": "Vegetables"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["farmer"], "Unknown");
        assert_eq!(created["rating"], 4.5);

        let (status, fetched) = get(app.clone(), "/api/v1/marketplace/products/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Sweet Corn");

        let (status, listed) = get(
            app.clone(),
            "/api/v1/marketplace/products?search=corn&priceRange=30-50",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["total"], 1);

        let (status, json) = get(app, "/api/v1/marketplace/products/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Product 99 not found");
    }

    #[tokio::test]
    async fn test_marketplace_rejects_invalid_product() {
        let app = create_test_app();

        let (status, _) = post_json(
            app.clone(),
            "/api/v1/marketplace/products",
            json!({"name": "Seeds", "price": 3.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = post_json(
            app,
            "/api/v1/marketplace/products",
            json!({"name": "Seeds", "description": "x", "price": -3.0, "stock": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid product"));
    }

    #[tokio::test]
    async fn test_malformed_bodies_and_paths_are_json_errors() {
        let (status, json) = post_raw(
            create_test_app(),
            "/api/v1/marketplace/products",
            "{not json".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON body"));

        let (status, json) = post_raw(
            create_test_app(),
            "/api/v1/chatbot/respond",
            "{not json".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());

        let (status, json) = get(create_test_app(), "/api/v1/marketplace/products/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid path"));
    }
}
