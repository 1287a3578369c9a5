//! End-to-end tests for the resource endpoints
//!
//! The router is driven in-process over the in-memory store.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::TestContext;
use serde_json::{json, Value};

#[tokio::test]
async fn test_root_banner_and_health() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mensaje"].as_str().unwrap().contains("funcionando"));

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route_is_404_json() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ruta no encontrada"}));
}

#[tokio::test]
async fn test_unsupported_method_is_404_json() {
    let ctx = TestContext::new();
    let (_, created) = ctx.post("/api/categories", json!({"nombre": "Ocio"})).await;
    let uri = format!("/api/categories/{}", created["id"].as_str().unwrap());
    let expected = json!({"error": "Ruta no encontrada"});

    for (method, uri) in [
        (Method::PATCH, uri.as_str()),
        (Method::POST, uri.as_str()),
        (Method::DELETE, "/api/categories"),
        (Method::PUT, "/health"),
    ] {
        let (status, body) = ctx.send(method.clone(), uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(body, expected, "{} {}", method, uri);
    }

    // The document was not touched
    let (status, _) = ctx.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_category_lifecycle() {
    let ctx = TestContext::new();

    let (status, created) = ctx.post("/api/categories", json!({"nombre": "Ocio"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created, json!({"id": id, "nombre": "Ocio"}));

    let (status, fetched) = ctx.get(&format!("/api/categories/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = ctx.delete(&format!("/api/categories/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = ctx.get(&format!("/api/categories/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Categoría no encontrada"}));
}

#[tokio::test]
async fn test_category_requires_nombre() {
    let ctx = TestContext::new();

    let (status, body) = ctx.post("/api/categories", json!({"color": "#fff"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "El nombre es obligatorio"}));

    let (_, list) = ctx.get("/api/categories").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_category_search() {
    let ctx = TestContext::new();
    for nombre in ["Trabajo", "Ocio", "Estudio"] {
        ctx.post("/api/categories", json!({"nombre": nombre})).await;
    }

    let (status, found) = ctx.get("/api/categories/search?nombre=tra").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = found.as_array().unwrap().iter().map(|c| c["nombre"].clone()).collect();
    assert_eq!(names, vec![json!("Trabajo")]);

    let (_, all) = ctx.get("/api/categories/search").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_merges_and_guards_server_fields() {
    let ctx = TestContext::new();
    let (_, task) = ctx
        .post(
            "/api/tasks",
            json!({"titulo": "Estudiar", "descripcion": "Capítulo 3"}),
        )
        .await;
    let id = task["id"].as_str().unwrap();

    let (status, updated) = ctx
        .put(
            &format!("/api/tasks/{}", id),
            json!({
                "estado": "completada",
                "id": "forged",
                "fecha_creacion": "1999-01-01",
                "id_usuario": "intruder"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], task["id"]);
    assert_eq!(updated["estado"], "completada");
    assert_eq!(updated["titulo"], "Estudiar");
    assert_eq!(updated["descripcion"], "Capítulo 3");
    assert_eq!(updated["fecha_creacion"], task["fecha_creacion"]);
    assert_eq!(updated["id_usuario"], Value::Null);

    let (_, fetched) = ctx.get(&format!("/api/tasks/{}", id)).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_and_delete_missing_are_404() {
    let ctx = TestContext::new();

    let (status, body) = ctx.put("/api/tasks/nope", json!({"estado": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Tarea no encontrada"}));

    let (status, body) = ctx.delete("/api/habits/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Hábito no encontrado"}));

    let (status, body) = ctx.get("/api/reminders/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Recordatorio no encontrado"}));

    let (status, body) = ctx.get("/api/subtasks/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Subtarea no encontrada"}));
}

#[tokio::test]
async fn test_task_defaults() {
    let ctx = TestContext::new();

    let (status, task) = ctx
        .post(
            "/api/tasks",
            json!({"titulo": "Comprar", "id_usuario": "someone", "fecha_vencimiento": "2025-06-30"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["estado"], "pendiente");
    assert_eq!(task["prioridad"], "normal");
    assert_eq!(task["id_categoria"], Value::Null);
    assert_eq!(task["id_usuario"], Value::Null);
    assert!(task["fecha_creacion"].is_string());
    assert!(task["fecha_vencimiento"]
        .as_str()
        .unwrap()
        .starts_with("2025-06-30T00:00:00"));
}

#[tokio::test]
async fn test_task_search_uses_titulo() {
    let ctx = TestContext::new();
    ctx.post("/api/tasks", json!({"titulo": "Leer libro"})).await;
    ctx.post("/api/tasks", json!({"descripcion": "sin título"})).await;

    let (_, found) = ctx.get("/api/tasks/search?titulo=LIBRO").await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    // Other parameters are ignored: everything matches the empty query
    let (_, found) = ctx.get("/api/tasks/search?nombre=libro").await;
    assert_eq!(found.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_date_is_400() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post("/api/tasks", json!({"titulo": "x", "fecha_vencimiento": "mañana"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Cuerpo JSON inválido"));
}

#[tokio::test]
async fn test_malformed_body_is_400_json() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/categories")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = ctx.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = ctx.post("/api/categories", json!("Ocio")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subtasks() {
    let ctx = TestContext::new();
    let (_, task) = ctx.post("/api/tasks", json!({"titulo": "Mudanza"})).await;
    let task_id = task["id"].as_str().unwrap();

    let (status, body) = ctx.post("/api/subtasks", json!({"nombre": "Cajas"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "nombre e id_tarea son obligatorios"}));

    let (status, sub) = ctx
        .post("/api/subtasks", json!({"nombre": "Cajas", "id_tarea": task_id}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sub["completado"], false);

    ctx.post("/api/subtasks", json!({"nombre": "Otra", "id_tarea": "other"}))
        .await;

    let (status, children) = ctx.get(&format!("/api/tasks/{}/subtasks", task_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(children, json!([sub]));

    let (status, _) = ctx.get("/api/tasks/missing/subtasks").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, done) = ctx
        .put(
            &format!("/api/subtasks/{}", sub["id"].as_str().unwrap()),
            json!({"completado": true}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["completado"], true);
    assert_eq!(done["nombre"], "Cajas");
}

#[tokio::test]
async fn test_habits_and_reminders() {
    let ctx = TestContext::new();

    let (status, body) = ctx.post("/api/habits", json!({"periodo": "diario"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "El nombre es obligatorio"}));

    let (status, habit) = ctx
        .post(
            "/api/habits",
            json!({"nombre": "Meditar", "periodo": "diario", "id_usuario": "u1"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(habit["id_usuario"], "u1");

    let (status, reminder) = ctx
        .post(
            "/api/reminders",
            json!({"nombre": "Meditar", "cuerpo": "10 minutos", "fecha_hora": "2025-01-01T08:00:00Z"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reminder["id_habito"], Value::Null);
    assert!(reminder["fecha_creacion"].is_string());

    let (_, found) = ctx.get("/api/reminders/search?nombre=medit").await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    // Link the habit to its reminder, then clear it again
    let habit_uri = format!("/api/habits/{}", habit["id"].as_str().unwrap());
    let (_, linked) = ctx
        .put(&habit_uri, json!({"id_recordatorio": reminder["id"]}))
        .await;
    assert_eq!(linked["id_recordatorio"], reminder["id"]);

    let (_, cleared) = ctx.put(&habit_uri, json!({"id_recordatorio": null})).await;
    assert!(cleared.get("id_recordatorio").is_none());
    assert_eq!(cleared["nombre"], "Meditar");
}

#[tokio::test]
async fn test_custom_base_path() {
    let ctx = TestContext::with_env(&[("API_BASE_PATH", "/v2")]);

    let (status, _) = ctx.post("/v2/categories", json!({"nombre": "Ocio"})).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = ctx.get("/api/categories").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
