//! Pest history integration tests
//!
//! Tests for the detection history including:
//! - Identified pests are recorded, listed, fetched and deleted through the routes
//! - Fallback answers are never recorded
//! - Service-level record, get, list and delete
//!
//! Everything here needs PostgreSQL and is ignored without `DATABASE_URL`.

mod common;

use agrinova_backend::services::PestHistoryService;
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{app_with_database, completion, migrated_database, post_json, send, test_config};
use serde_json::{json, Value};
use shared::NewPestDetection;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARMYWORM: &str = r#"{"pestName": "Fall Armyworm", "scientificName": "Spodoptera frugiperda", "threatLevel": "High", "confidence": "High", "description": "Larvae feeding in the whorl", "damageDescription": "Ragged holes in leaves", "treatment": ["Spray emamectin benzoate", "Hand-pick egg masses"], "prevention": ["Early sowing"]}"#;

async fn gateway_replying(content: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(&server)
        .await;
    server
}

fn leaf_image() -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(b"\xff\xd8\xff\xe0fake-jpeg"))
}

fn detection_for<'a>(history: &'a Value, crop_type: &str) -> Option<&'a Value> {
    history
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["crop_type"] == crop_type)
}

// ============================================================================
// Routes
// ============================================================================

#[cfg(test)]
mod routes {
    use super::*;

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_identified_pest_history_lifecycle() {
        let Some((url, _pool)) = migrated_database().await else {
            return;
        };
        let server = gateway_replying(ARMYWORM).await;
        let app = || app_with_database(test_config(&server.uri(), Some("test-key")), &url);

        // Unique crop label so rows from other runs are ignored
        let crop_type = format!("Maize {}", Uuid::new_v4().simple());

        let (status, _) = post_json(
            app(),
            "/api/v1/functions/identify-pest",
            json!({ "imageBase64": leaf_image(), "cropType": crop_type }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, history) = send(app(), "GET", "/api/v1/pest-detections?limit=100", None).await;
        assert_eq!(status, StatusCode::OK);
        let saved = detection_for(&history, &crop_type).expect("detection was recorded");
        assert_eq!(saved["pest_name"], "Fall Armyworm");
        assert_eq!(saved["threat_level"], "High");
        assert_eq!(saved["damage"], "Ragged holes in leaves");
        assert_eq!(saved["treatment"], "Spray emamectin benzoate; Hand-pick egg masses");
        assert_eq!(saved["prevention"], "Early sowing");

        let id = saved["id"].as_str().unwrap();
        let (status, fetched) = send(app(), "GET", &format!("/api/v1/pest-detections/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&fetched, saved);

        let (status, _) = send(app(), "DELETE", &format!("/api/v1/pest-detections/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(app(), "GET", &format!("/api/v1/pest-detections/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = send(app(), "DELETE", &format!("/api/v1/pest-detections/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_fallback_answer_is_not_recorded() {
        let Some((url, _pool)) = migrated_database().await else {
            return;
        };
        let server = gateway_replying("Could be aphids, hard to tell.").await;
        let app = || app_with_database(test_config(&server.uri(), Some("test-key")), &url);
        let crop_type = format!("Okra {}", Uuid::new_v4().simple());

        let (status, body) = post_json(
            app(),
            "/api/v1/functions/identify-pest",
            json!({ "imageBase64": leaf_image(), "cropType": crop_type }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pestName"], "Unknown");

        let (_, history) = send(app(), "GET", "/api/v1/pest-detections?limit=100", None).await;
        assert!(detection_for(&history, &crop_type).is_none());
    }
}

// ============================================================================
// Service
// ============================================================================

#[cfg(test)]
mod service {
    use super::*;

    fn detection(crop_type: &str) -> NewPestDetection {
        NewPestDetection {
            crop_type: crop_type.to_string(),
            pest_name: "Brown Planthopper".to_string(),
            threat_level: "Medium".to_string(),
            description: "Hoppers at the base of tillers".to_string(),
            damage: "Hopper burn patches".to_string(),
            treatment: "Drain the field; Apply buprofezin".to_string(),
            prevention: "Avoid excess nitrogen".to_string(),
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
    async fn test_record_get_list_delete() {
        let Some((_url, pool)) = migrated_database().await else {
            return;
        };
        let history = PestHistoryService::new(pool);

        let older = history.record(&detection("Rice (Paddy)")).await.unwrap();
        let newer = history.record(&detection("Rice (Paddy)")).await.unwrap();
        assert_eq!(newer.pest_name, "Brown Planthopper");
        assert_eq!(newer.treatment, "Drain the field; Apply buprofezin");

        let fetched = history.get(older.id).await.unwrap();
        assert_eq!(fetched, older);

        // Newest first, and the limit is respected
        let latest = history.list(Some(1)).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert!(latest[0].created_at >= older.created_at);

        let capped = history.list(Some(10_000)).await.unwrap();
        assert!(capped.len() <= 100);

        history.delete(older.id).await.unwrap();
        history.delete(newer.id).await.unwrap();
        assert!(history.get(older.id).await.is_err());
        assert!(history.delete(newer.id).await.is_err());
    }
}
