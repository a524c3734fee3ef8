use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::broadcast;

use crate::error::AppError;

/// A fully buffered response, handed to every request that joined a flight.
#[derive(Clone)]
struct SharedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl SharedResponse {
    fn to_response(&self) -> Response {
        let mut res = Response::new(Body::from(self.body.clone()));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers.clone();
        res
    }
}

struct Flight {
    id: u64,
    tx: broadcast::Sender<SharedResponse>,
}

enum Role {
    Leader(FlightGuard),
    Follower(broadcast::Receiver<SharedResponse>),
}

/// Merges concurrent identical GET and HEAD requests into one execution.
///
/// Requests are identical when method, URI and `Authorization` header
/// match. The first one runs the inner service; the others wait for its
/// response. Clones share the same in-flight table.
#[derive(Clone, Default)]
pub struct Coalescer {
    inflight: Arc<Mutex<HashMap<String, Flight>>>,
    next_id: Arc<AtomicU64>,
}

impl Coalescer {
    pub fn new() -> Self {
        Self::default()
    }

    fn join(&self, key: String) -> Role {
        let mut inflight = self.lock();
        if let Some(flight) = inflight.get(&key) {
            return Role::Follower(flight.tx.subscribe());
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, _) = broadcast::channel(1);
        inflight.insert(key.clone(), Flight { id, tx });
        Role::Leader(FlightGuard { coalescer: self.clone(), key, id })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Flight>> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.lock().len()
    }
}

/// Owns a flight entry. Dropping it without `finish` (leader cancelled or
/// failed) closes the channel, and waiters fall back to running their own
/// request.
struct FlightGuard {
    coalescer: Coalescer,
    key: String,
    id: u64,
}

impl FlightGuard {
    fn take(&self) -> Option<broadcast::Sender<SharedResponse>> {
        let mut inflight = self.coalescer.lock();
        match inflight.get(&self.key) {
            Some(flight) if flight.id == self.id => inflight.remove(&self.key).map(|f| f.tx),
            _ => None,
        }
    }

    fn finish(self, shared: &SharedResponse) {
        if let Some(tx) = self.take() {
            // No waiters is the common case
            let _ = tx.send(shared.clone());
        }
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.take();
    }
}

fn flight_key(req: &Request) -> String {
    let auth = req.headers().get(header::AUTHORIZATION).map(|v| v.as_bytes()).unwrap_or_default();
    format!("{} {} {}", req.method(), req.uri(), String::from_utf8_lossy(auth))
}

pub async fn coalesce(State(coalescer): State<Coalescer>, req: Request, next: Next) -> Response {
    if !matches!(*req.method(), Method::GET | Method::HEAD) {
        return next.run(req).await;
    }

    match coalescer.join(flight_key(&req)) {
        Role::Follower(mut rx) => match rx.recv().await {
            Ok(shared) => {
                tracing::debug!(uri = %req.uri(), "served by in-flight request");
                shared.to_response()
            }
            Err(_) => next.run(req).await,
        },
        Role::Leader(flight) => {
            let (parts, body) = next.run(req).await.into_parts();
            let body = match axum::body::to_bytes(body, usize::MAX).await {
                Ok(body) => body,
                Err(e) => {
                    return AppError::Internal(anyhow::anyhow!("buffering response failed: {}", e)).into_response()
                }
            };
            flight.finish(&SharedResponse { status: parts.status, headers: parts.headers.clone(), body: body.clone() });
            Response::from_parts(parts, Body::from(body))
        }
    }
}
