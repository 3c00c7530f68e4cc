#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Mutex;

use axum::{extract::Query, routing::get, Json, Router};
use serde_json::{json, Value};

use usage_dashboard::models::RawRecord;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Records with mixed shapes, as the remote API tends to return them.
pub fn sample_records() -> Vec<RawRecord> {
    vec![
        json!({"usage_date": "2024-01-02", "usage_time": "08:00:00", "utilization_pct": 50, "system_name": "alpha", "department_name": "physics"}),
        json!({"usage_date": "2024-01-01", "usage_time": "09:30:00", "utilization": "80", "system": "beta", "department": "chemistry"}),
        json!({"usage_date": "2024-01-03", "utilization_pct": "n/a", "system_name": "alpha", "department_name": "chemistry"}),
        json!({"utilization_pct": 99, "system_name": "ghost"}),
    ]
    .into_iter()
    .map(RawRecord::new)
    .collect()
}

/// Spawn a stand-in for the remote utilization API on an ephemeral port.
///
/// `/api/utilization/filter` echoes the received query parameters in every
/// record so tests can check what was sent. `/api/broken` answers 500 and
/// `/api/object` answers a JSON object instead of an array.
pub async fn spawn_mock_api() -> SocketAddr {
    let app = Router::new()
        .route(
            "/api/systems",
            get(|| async { Json(json!([{"system_name": "alpha"}, {"system_name": "beta"}])) }),
        )
        .route(
            "/api/departments",
            get(|| async { Json(json!([{"department_name": "physics"}])) }),
        )
        .route(
            "/api/utilization/filter",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!([
                    {
                        "usage_date": "2024-01-01",
                        "utilization_pct": 10,
                        "system_name": params.get("system").cloned().unwrap_or_default(),
                        "department_name": params.get("department").cloned().unwrap_or_default(),
                        "param_count": params.len(),
                    },
                    {"usage_date": "2024-01-02", "utilization_pct": 30}
                ]))
            }),
        )
        .route(
            "/api/broken",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "database down") }),
        )
        .route("/api/object", get(|| async { Json(json!({"rows": []})) }))
        .route("/api/not-json", get(|| async { "plain text" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn field<'a>(record: &'a RawRecord, key: &str) -> &'a Value {
    record.0.get(key).unwrap_or(&Value::Null)
}
