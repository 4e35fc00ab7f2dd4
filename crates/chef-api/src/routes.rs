//! # Routes
//!
//! Axum router configuration for the marketplace API.
//!
//! Routes:
//! - Public:
//!   - GET  /              - Liveness string
//!   - GET  /health        - Health check
//!   - GET  /meals         - List meals
//!   - GET  /meals/top     - Top 6 meals by order count
//!   - GET  /meals/{id}    - Meal detail
//!   - POST /users         - Register (idempotent)
//!
//! - Protected (bearer token):
//!   - POST   /meals                  - Create meal
//!   - GET    /meals/chef/{email}    - Meals by chef
//!   - DELETE /meals/{id}            - Delete meal
//!   - GET    /users                 - List users
//!   - PATCH  /users/admin/{id}      - Set role
//!   - GET    /users/admin/{email}   - Admin check (self-only)
//!   - GET    /users/chef/{email}    - Chef check (self-only)
//!   - POST   /orders                - Place/merge order
//!   - GET    /orders?email=         - Diner's orders (self-only)
//!   - GET    /orders/chef/{email}   - Chef's orders
//!   - PATCH  /orders/status/{id}    - Set workflow status
//!   - GET    /orders/{id}           - Order detail
//!   - DELETE /orders/{id}           - Cancel order
//!   - POST   /create-payment-intent - Obtain payment handle
//!   - POST   /payments              - Record payment
//!   - GET    /payments/{email}      - Payment history (self-only)
//!   - GET    /payments              - All payments

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the browser frontend calls from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Meal routes; the static /meals/top segment takes priority over the
    // {id} capture
    let meal_routes = Router::new()
        .route(
            "/meals",
            get(handlers::meals::list_meals).post(handlers::meals::create_meal),
        )
        .route("/meals/top", get(handlers::meals::top_meals))
        .route("/meals/chef/{email}", get(handlers::meals::meals_by_chef))
        .route(
            "/meals/{id}",
            get(handlers::meals::get_meal).delete(handlers::meals::delete_meal),
        );

    let user_routes = Router::new()
        .route(
            "/users",
            post(handlers::users::register).get(handlers::users::list_users),
        )
        .route(
            "/users/admin/{id}",
            patch(handlers::users::set_user_role).get(handlers::users::check_admin),
        )
        .route("/users/chef/{email}", get(handlers::users::check_chef));

    let order_routes = Router::new()
        .route(
            "/orders",
            post(handlers::orders::place_order).get(handlers::orders::orders_by_user),
        )
        .route("/orders/chef/{email}", get(handlers::orders::orders_by_chef))
        .route(
            "/orders/status/{id}",
            patch(handlers::orders::set_order_status),
        )
        .route(
            "/orders/{id}",
            get(handlers::orders::get_order).delete(handlers::orders::cancel_order),
        );

    let payment_routes = Router::new()
        .route(
            "/create-payment-intent",
            post(handlers::payments::create_payment_intent),
        )
        .route(
            "/payments",
            post(handlers::payments::record_payment).get(handlers::payments::list_payments),
        )
        .route(
            "/payments/{email}",
            get(handlers::payments::payments_by_email),
        );

    // Combine all routes
    Router::new()
        .route("/", get(handlers::health::liveness))
        .route("/health", get(handlers::health::health))
        .merge(meal_routes)
        .merge(user_routes)
        .merge(order_routes)
        .merge(payment_routes)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}
