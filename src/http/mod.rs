// ============================================================================
// HTTP API - actix-web routes over the order lifecycle
// ============================================================================
//
// GET  /              liveness
// GET  /health        backend readiness
// POST /orders        create
// GET  /orders        list (?cursor=N)
// GET  /orders/{id}   lookup
// PUT  /orders/{id}   status transition
//
// Handlers expect `web::Data<OrderCommandHandler>` and `web::Data<Metrics>`
// in app data.
//
// ============================================================================

mod errors;
mod handlers;

use actix_web::{web, HttpResponse, Responder};

use crate::domain::order::OrderCommandHandler;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .service(
            web::scope("/orders")
                .route("", web::post().to(handlers::create_order))
                .route("", web::get().to(handlers::list_orders))
                .route("/{id}", web::get().to(handlers::get_order))
                .route("/{id}", web::put().to(handlers::update_order)),
        );
}

async fn index() -> impl Responder {
    HttpResponse::Ok().finish()
}

async fn health(handler: web::Data<OrderCommandHandler>) -> impl Responder {
    match handler.check_store().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "service": "order-service"
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "order-service"
            }))
        }
    }
}

// ============================================================================
// Integration Tests - full app against the in-memory backend
// ============================================================================
