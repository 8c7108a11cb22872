use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::order::{CreateOrder, LineItem, Order, OrderCommandHandler, OrderServiceError};
use crate::metrics::Metrics;

// ============================================================================
// Order Request Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

fn parse_order_id(raw: &str) -> Result<u64, OrderServiceError> {
    raw.parse()
        .map_err(|_| OrderServiceError::InvalidInput(format!("invalid order id {:?}", raw)))
}

fn parse_cursor(raw: Option<&str>) -> Result<u64, OrderServiceError> {
    match raw {
        None | Some("") => Ok(0),
        Some(value) => value
            .parse()
            .map_err(|_| OrderServiceError::InvalidInput(format!("invalid cursor {:?}", value))),
    }
}

fn record_failure(metrics: &Metrics, operation: &str, err: &OrderServiceError) {
    metrics
        .requests_failed
        .with_label_values(&[operation, err.kind()])
        .inc();

    match err {
        OrderServiceError::Storage(e) => {
            tracing::error!(operation, kind = e.kind(), error = %e, "Order request failed");
        }
        OrderServiceError::InvalidTransition(e) => {
            if let Some(status) = e.rejected_from() {
                metrics
                    .order_transitions_rejected
                    .with_label_values(&[status.as_str()])
                    .inc();
            }
        }
        _ => {}
    }
}

pub async fn create_order(
    handler: web::Data<OrderCommandHandler>,
    metrics: web::Data<Metrics>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, OrderServiceError> {
    let _timer = metrics.request_duration.with_label_values(&["create"]).start_timer();
    let body = body.into_inner();

    let order = handler
        .create(CreateOrder {
            customer_id: body.customer_id,
            line_items: body.line_items,
        })
        .await
        .inspect_err(|e| record_failure(&metrics, "create", e))?;

    metrics.orders_created.inc();

    Ok(HttpResponse::Created().json(order))
}

pub async fn list_orders(
    handler: web::Data<OrderCommandHandler>,
    metrics: web::Data<Metrics>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, OrderServiceError> {
    let _timer = metrics.request_duration.with_label_values(&["list"]).start_timer();

    let result = async {
        let cursor = parse_cursor(query.cursor.as_deref())?;
        handler.list(cursor).await
    }
    .await
    .inspect_err(|e| record_failure(&metrics, "list", e))?;

    Ok(HttpResponse::Ok().json(ListResponse {
        items: result.orders,
        next: result.cursor,
    }))
}

pub async fn get_order(
    handler: web::Data<OrderCommandHandler>,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
) -> Result<HttpResponse, OrderServiceError> {
    let _timer = metrics.request_duration.with_label_values(&["get"]).start_timer();

    let order = async {
        let order_id = parse_order_id(&path)?;
        handler.find_by_id(order_id).await
    }
    .await
    .inspect_err(|e| record_failure(&metrics, "get", e))?;

    Ok(HttpResponse::Ok().json(order))
}

pub async fn update_order(
    handler: web::Data<OrderCommandHandler>,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, OrderServiceError> {
    let _timer = metrics.request_duration.with_label_values(&["update"]).start_timer();

    let order = async {
        let order_id = parse_order_id(&path)?;
        handler.update_status(order_id, &body.status).await
    }
    .await
    .inspect_err(|e| record_failure(&metrics, "update", e))?;

    metrics
        .order_transitions
        .with_label_values(&[order.status().as_str()])
        .inc();

    Ok(HttpResponse::Ok().json(order))
}
