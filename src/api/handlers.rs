use axum::{extract::State, Json};
use sqlx::SqlitePool;
use utoipa::OpenApi;

use super::{dto::ReadingDto, errors::AppError};
use crate::db::models::Reading;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Fetch the full reading history, oldest first.
#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "All readings in ascending chronological order", body = Vec<ReadingDto>),
        (status = 500, description = "Query failed"),
    ),
    tag = "readings"
)]
pub async fn get_data(State(pool): State<SqlitePool>) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let mut rows = sqlx::query_as::<_, Reading>(
        r#"
        SELECT id, recorded_at, ahtx0_temp, ahtx0_humidity, bmp280_temp,
               bmp280_pressure, light
        FROM readings
        ORDER BY recorded_at DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    // Queried newest-first, flipped here: the chart consumes oldest-first.
    rows.reverse();

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Returns `200 OK` with `{"status":"ok"}` when the server is running.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "system"
)]
pub async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(get_data, health),
    components(schemas(ReadingDto)),
    tags(
        (name = "readings", description = "Sensor reading history"),
        (name = "system", description = "System endpoints"),
    ),
    info(
        title = "Enviro Station API",
        version = "0.1.0",
        description = "Read-only API over the ingested sensor readings"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use sqlx::SqlitePool;

    use crate::api::router;
    use crate::db;
    use crate::ingest::IngestService;
    use crate::mirror::MirrorWriter;
    use crate::mqtt::payload::SensorPayload;

    async fn test_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let path = dir.path().join("sensor_data.db");
        let pool = db::create_pool(path.to_str().unwrap()).await.unwrap();
        db::init_schema(&pool).await.unwrap();
        pool
    }

    fn test_server(pool: SqlitePool, dir: &tempfile::TempDir) -> TestServer {
        TestServer::new(router(pool, dir.path().to_str().unwrap())).unwrap()
    }

    async fn insert_reading(pool: &SqlitePool, recorded_at: &str, ahtx0_temp: f64, light: i64) {
        sqlx::query(
            "INSERT INTO readings \
                 (recorded_at, ahtx0_temp, ahtx0_humidity, bmp280_temp, bmp280_pressure, light) \
             VALUES (?1, ?2, 47.3, 22.4, 100180.5, ?3)",
        )
        .bind(recorded_at)
        .bind(ahtx0_temp)
        .bind(light)
        .execute(pool)
        .await
        .unwrap();
    }

    // -----------------------------------------------------------------------
    // GET /api/data
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn data_empty_returns_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(test_pool(&dir).await, &dir);

        let resp = server.get("/api/data").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn data_returns_ascending_chronological_order() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        // Inserted out of time order on purpose.
        insert_reading(&pool, "2025-01-01 10:00:02", 22.1, 512).await;
        insert_reading(&pool, "2025-01-01 10:00:00", 21.9, 510).await;
        insert_reading(&pool, "2025-01-01 10:00:01", 22.0, 511).await;

        let server = test_server(pool, &dir);
        let resp = server.get("/api/data").await;
        resp.assert_status_ok();

        let body: Vec<Value> = resp.json();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0]["timestamp"], "2025-01-01 10:00:00");
        assert_eq!(body[1]["timestamp"], "2025-01-01 10:00:01");
        assert_eq!(body[2]["timestamp"], "2025-01-01 10:00:02");
        assert_eq!(body[0]["Light"], 510);
        assert_eq!(body[2]["Light"], 512);
    }

    #[tokio::test]
    async fn data_exposes_exact_key_set_without_bmp280_temp() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        insert_reading(&pool, "2025-01-01 10:00:00", 21.9, 512).await;

        let server = test_server(pool, &dir);
        let body: Vec<Value> = server.get("/api/data").await.json();

        let obj = body[0].as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "AHTX0_Humidity",
                "AHTX0_Temp",
                "BMP280_Pressure",
                "Light",
                "id",
                "timestamp"
            ]
        );
        assert!(!obj.contains_key("BMP280_Temp"));
        assert_eq!(obj["id"], 1);
    }

    #[tokio::test]
    async fn data_query_failure_returns_error_body_and_500() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let server = test_server(pool.clone(), &dir);

        pool.close().await;
        let resp = server.get("/api/data").await;
        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = resp.json();
        assert!(body["error"].is_string());
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn data_round_trips_an_ingested_payload() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;
        let service = IngestService::new(
            pool.clone(),
            MirrorWriter::new(dir.path().join("mirror.csv")),
        );
        let payload = SensorPayload::decode(
            br#"{"AHTX0_Temp": 21.9, "AHTX0_Humidity": 47.3, "BMP280_Temp": 22.4,
                "BMP280_Pressure": 100180.5, "Light": 512}"#,
        )
        .unwrap();
        service.store(&payload).await;

        let server = test_server(pool, &dir);
        let body: Vec<Value> = server.get("/api/data").await.json();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["AHTX0_Temp"], 21.9);
        assert_eq!(body[0]["Light"], 512);
        assert!(body[0].get("BMP280_Temp").is_none());
    }

    // -----------------------------------------------------------------------
    // Static assets
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn root_serves_index_html() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("index.html"), "<html>dashboard</html>")
            .await
            .unwrap();
        let server = test_server(test_pool(&dir).await, &dir);

        let resp = server.get("/").await;
        resp.assert_status_ok();
        assert!(resp.text().contains("dashboard"));
    }

    #[tokio::test]
    async fn static_files_served_by_path() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("chart.js"), "// chart code")
            .await
            .unwrap();
        let server = test_server(test_pool(&dir).await, &dir);

        let resp = server.get("/chart.js").await;
        resp.assert_status_ok();
        assert!(resp.text().contains("chart code"));
    }

    #[tokio::test]
    async fn missing_static_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(test_pool(&dir).await, &dir);

        let resp = server.get("/no-such-file.js").await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    // -----------------------------------------------------------------------
    // GET /health
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn health_returns_ok() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(test_pool(&dir).await, &dir);

        let resp = server.get("/health").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["status"], "ok");
    }

    // -----------------------------------------------------------------------
    // GET /api-docs/openapi.json
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn openapi_spec_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let server = test_server(test_pool(&dir).await, &dir);

        let resp = server.get("/api-docs/openapi.json").await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert_eq!(body["info"]["title"], "Enviro Station API");
        assert!(body["paths"]["/api/data"].is_object());
    }
}
