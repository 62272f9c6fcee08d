//! Liveness endpoint.

/// `GET /api/healthz` — always `OK` while the process is serving.
pub async fn healthz() -> &'static str {
    "OK"
}
