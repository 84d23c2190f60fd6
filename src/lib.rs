pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use config::Config;
use infra::store::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub config: Arc<Config>,
}

pub fn app(state: AppState) -> Router {
    let cors = state
        .config
        .cors_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
        .map(|origin| {
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        })
        .unwrap_or_else(CorsLayer::permissive);

    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/createStripeCheckout",
            post(adapters::stripe::create_checkout_handler),
        )
        .route("/stripeWebhook", post(adapters::stripe::webhook_handler))
        .route("/paystackWebhook", post(adapters::paystack::webhook_handler))
        .route(
            "/flutterwaveWebhook",
            post(adapters::flutterwave::webhook_handler),
        )
        .route(
            "/nowpaymentsWebhook",
            post(adapters::nowpayments::webhook_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TimeoutLayer::new(Duration::from_secs(15)))
                .layer(cors),
        )
        .with_state(state)
}
