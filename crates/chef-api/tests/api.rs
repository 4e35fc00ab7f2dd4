//! End-to-end route tests over the in-memory store.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{test_server, token_for};

// --- liveness & auth guard ---

#[tokio::test]
async fn liveness_string_is_served_at_root() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "FoodChef Server is Sitting");
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let server = test_server();
    let response = server.get("/users").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"], "unauthorized access");
    assert_eq!(body["code"], 401);
}

#[tokio::test]
async fn protected_route_rejects_unverifiable_token() {
    let server = test_server();
    let response = server
        .get("/users")
        .authorization_bearer("garbage")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

// --- users ---

#[tokio::test]
async fn duplicate_registration_is_acknowledged_with_null_insert() {
    let server = test_server();

    let first = server
        .post("/users")
        .json(&json!({ "email": "a@x.com", "name": "Ada" }))
        .await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert!(body["insertedId"].is_string());

    let second = server
        .post("/users")
        .json(&json!({ "email": "a@x.com", "name": "Ada again" }))
        .await;
    second.assert_status_ok();
    let body: Value = second.json();
    assert!(body["insertedId"].is_null());
    assert_eq!(body["message"], "User already exists");

    // Exactly one user document survives.
    let users = server
        .get("/users")
        .authorization_bearer(&token_for("a@x.com"))
        .await;
    users.assert_status_ok();
    let users: Vec<Value> = users.json();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn admin_check_is_true_after_role_grant_and_self_only() {
    let server = test_server();

    let registered = server
        .post("/users")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    let registered: Value = registered.json();
    let user_id = registered["insertedId"].as_str().unwrap().to_string();

    // Not an admin yet.
    let check = server
        .get("/users/admin/a@x.com")
        .authorization_bearer(&token_for("a@x.com"))
        .await;
    check.assert_status_ok();
    let body: Value = check.json();
    assert_eq!(body["admin"], false);

    // Grant the role, then the self-check flips.
    let patched = server
        .patch(&format!("/users/admin/{user_id}"))
        .authorization_bearer(&token_for("a@x.com"))
        .json(&json!({ "role": "admin" }))
        .await;
    patched.assert_status_ok();
    let body: Value = patched.json();
    assert_eq!(body["matchedCount"], 1);

    let check = server
        .get("/users/admin/a@x.com")
        .authorization_bearer(&token_for("a@x.com"))
        .await;
    let body: Value = check.json();
    assert_eq!(body["admin"], true);

    // Someone else asking about a@x.com is forbidden.
    let forbidden = server
        .get("/users/admin/a@x.com")
        .authorization_bearer(&token_for("b@x.com"))
        .await;
    forbidden.assert_status(StatusCode::FORBIDDEN);
    let body: Value = forbidden.json();
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn chef_check_reflects_role() {
    let server = test_server();

    let registered = server
        .post("/users")
        .json(&json!({ "email": "chef@x.com" }))
        .await;
    let registered: Value = registered.json();
    let user_id = registered["insertedId"].as_str().unwrap().to_string();

    server
        .patch(&format!("/users/admin/{user_id}"))
        .authorization_bearer(&token_for("chef@x.com"))
        .json(&json!({ "role": "chef" }))
        .await
        .assert_status_ok();

    let check = server
        .get("/users/chef/chef@x.com")
        .authorization_bearer(&token_for("chef@x.com"))
        .await;
    let body: Value = check.json();
    assert_eq!(body["chef"], true);
}

#[tokio::test]
async fn unknown_role_string_coerces_to_unset() {
    let server = test_server();

    let registered = server
        .post("/users")
        .json(&json!({ "email": "a@x.com" }))
        .await;
    let registered: Value = registered.json();
    let user_id = registered["insertedId"].as_str().unwrap().to_string();

    // Unrecognized role strings coerce to "unset" rather than erroring.
    server
        .patch(&format!("/users/admin/{user_id}"))
        .authorization_bearer(&token_for("a@x.com"))
        .json(&json!({ "role": "superuser" }))
        .await
        .assert_status_ok();

    let check = server
        .get("/users/admin/a@x.com")
        .authorization_bearer(&token_for("a@x.com"))
        .await;
    let body: Value = check.json();
    assert_eq!(body["admin"], false);
}

// --- meals ---

#[tokio::test]
async fn created_meal_is_listed_then_deleted() {
    let server = test_server();

    let created = server
        .post("/meals")
        .authorization_bearer(&token_for("chef@x.com"))
        .json(&json!({
            "name": "Biryani",
            "price": 9.5,
            "chefEmail": "chef@x.com",
            "chefName": "Chef"
        }))
        .await;
    created.assert_status_ok();
    let created: Value = created.json();
    let meal_id = created["insertedId"].as_str().unwrap().to_string();

    // Public listing and detail.
    let listed = server.get("/meals").await;
    listed.assert_status_ok();
    let meals: Vec<Value> = listed.json();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0]["orders"], 0);

    let detail = server.get(&format!("/meals/{meal_id}")).await;
    detail.assert_status_ok();
    let detail: Value = detail.json();
    assert_eq!(detail["name"], "Biryani");
    assert_eq!(detail["_id"], meal_id.as_str());

    // By-chef listing.
    let by_chef = server
        .get("/meals/chef/chef@x.com")
        .authorization_bearer(&token_for("chef@x.com"))
        .await;
    let by_chef: Vec<Value> = by_chef.json();
    assert_eq!(by_chef.len(), 1);

    // Delete removes it from subsequent lists.
    let deleted = server
        .delete(&format!("/meals/{meal_id}"))
        .authorization_bearer(&token_for("chef@x.com"))
        .await;
    deleted.assert_status_ok();
    let deleted: Value = deleted.json();
    assert_eq!(deleted["deletedCount"], 1);

    let listed: Vec<Value> = server.get("/meals").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn meal_detail_handles_bad_and_unknown_ids() {
    let server = test_server();

    let malformed = server.get("/meals/not-an-id").await;
    malformed.assert_status(StatusCode::BAD_REQUEST);

    let absent = server.get("/meals/65f000000000000000000001").await;
    absent.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn top_meals_returns_at_most_six_sorted_by_order_count() {
    let server = test_server();

    for i in 0..8 {
        server
            .post("/meals")
            .authorization_bearer(&token_for("chef@x.com"))
            .json(&json!({
                "name": format!("meal-{i}"),
                "price": 5.0,
                "chefEmail": "chef@x.com",
                "orders": i
            }))
            .await
            .assert_status_ok();
    }

    let top = server.get("/meals/top").await;
    top.assert_status_ok();
    let top: Vec<Value> = top.json();
    assert_eq!(top.len(), 6);
    let counters: Vec<i64> = top.iter().map(|m| m["orders"].as_i64().unwrap()).collect();
    assert_eq!(counters, vec![7, 6, 5, 4, 3, 2]);
}

#[tokio::test]
async fn meal_creation_requires_auth_and_valid_price() {
    let server = test_server();

    let unauthenticated = server
        .post("/meals")
        .json(&json!({ "name": "X", "price": 5.0, "chefEmail": "chef@x.com" }))
        .await;
    unauthenticated.assert_status(StatusCode::UNAUTHORIZED);

    let bad_price = server
        .post("/meals")
        .authorization_bearer(&token_for("chef@x.com"))
        .json(&json!({ "name": "X", "price": -2.0, "chefEmail": "chef@x.com" }))
        .await;
    bad_price.assert_status(StatusCode::BAD_REQUEST);
}

// --- orders ---

#[tokio::test]
async fn repeat_order_merges_quantity_and_total() {
    let server = test_server();
    let token = token_for("a@x.com");

    let first = server
        .post("/orders")
        .authorization_bearer(&token)
        .json(&json!({
            "userEmail": "a@x.com",
            "mealId": "m1",
            "quantity": 2,
            "price": 5.0
        }))
        .await;
    first.assert_status_ok();
    let first: Value = first.json();
    assert_eq!(first["merged"], false);
    assert_eq!(first["order"]["totalPrice"], 10.0);

    let second = server
        .post("/orders")
        .authorization_bearer(&token)
        .json(&json!({
            "userEmail": "a@x.com",
            "mealId": "m1",
            "quantity": 1,
            "price": 5.0
        }))
        .await;
    second.assert_status_ok();
    let second: Value = second.json();
    assert_eq!(second["merged"], true);
    assert_eq!(second["order"]["quantity"], 3);
    assert_eq!(second["order"]["totalPrice"], 15.0);
    assert_eq!(second["order"]["status"], "pending");

    // Exactly one order document for the pair.
    let orders = server
        .get("/orders")
        .add_query_param("email", "a@x.com")
        .authorization_bearer(&token)
        .await;
    orders.assert_status_ok();
    let orders: Vec<Value> = orders.json();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["quantity"], 3);
}

#[tokio::test]
async fn orders_listing_is_self_only_and_tolerates_missing_email() {
    let server = test_server();
    let token = token_for("a@x.com");

    // No email parameter: empty list, not an error.
    let empty = server.get("/orders").authorization_bearer(&token).await;
    empty.assert_status_ok();
    let empty: Vec<Value> = empty.json();
    assert!(empty.is_empty());

    // Another diner's email: forbidden.
    let forbidden = server
        .get("/orders")
        .add_query_param("email", "b@x.com")
        .authorization_bearer(&token)
        .await;
    forbidden.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn chef_sees_orders_and_advances_workflow_status() {
    let server = test_server();
    let diner = token_for("a@x.com");
    let chef = token_for("chef@x.com");

    let placed = server
        .post("/orders")
        .authorization_bearer(&diner)
        .json(&json!({
            "userEmail": "a@x.com",
            "mealId": "m1",
            "chefEmail": "chef@x.com",
            "quantity": 1,
            "price": 5.0
        }))
        .await;
    let placed: Value = placed.json();
    let order_id = placed["order"]["_id"].as_str().unwrap().to_string();

    let chef_orders = server
        .get("/orders/chef/chef@x.com")
        .authorization_bearer(&chef)
        .await;
    chef_orders.assert_status_ok();
    let chef_orders: Vec<Value> = chef_orders.json();
    assert_eq!(chef_orders.len(), 1);

    // Any workflow string goes.
    let advanced = server
        .patch(&format!("/orders/status/{order_id}"))
        .authorization_bearer(&chef)
        .json(&json!({ "status": "cooking" }))
        .await;
    advanced.assert_status_ok();

    let detail = server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(&diner)
        .await;
    let detail: Value = detail.json();
    assert_eq!(detail["orderStatus"], "cooking");
}

#[tokio::test]
async fn cancelled_order_disappears() {
    let server = test_server();
    let token = token_for("a@x.com");

    let placed = server
        .post("/orders")
        .authorization_bearer(&token)
        .json(&json!({
            "userEmail": "a@x.com",
            "mealId": "m1",
            "quantity": 1,
            "price": 5.0
        }))
        .await;
    let placed: Value = placed.json();
    let order_id = placed["order"]["_id"].as_str().unwrap().to_string();

    let cancelled = server
        .delete(&format!("/orders/{order_id}"))
        .authorization_bearer(&token)
        .await;
    cancelled.assert_status_ok();
    let cancelled: Value = cancelled.json();
    assert_eq!(cancelled["deletedCount"], 1);

    let gone = server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(&token)
        .await;
    gone.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_placement_validates_quantity() {
    let server = test_server();
    let response = server
        .post("/orders")
        .authorization_bearer(&token_for("a@x.com"))
        .json(&json!({
            "userEmail": "a@x.com",
            "mealId": "m1",
            "quantity": 0,
            "price": 5.0
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

// --- payments ---

#[tokio::test]
async fn payment_intent_converts_price_to_minor_units() {
    let server = test_server();

    let response = server
        .post("/create-payment-intent")
        .authorization_bearer(&token_for("a@x.com"))
        .json(&json!({ "price": 15.99 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    // trunc(15.99 * 100) = 1599, echoed back by the stub gateway.
    assert_eq!(body["clientSecret"], "pi_test_secret_1599");
}

#[tokio::test]
async fn payment_intent_rejects_nonpositive_price() {
    let server = test_server();
    let response = server
        .post("/create-payment-intent")
        .authorization_bearer(&token_for("a@x.com"))
        .json(&json!({ "price": 0.0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recorded_payment_marks_order_paid() {
    let server = test_server();
    let token = token_for("a@x.com");

    let placed = server
        .post("/orders")
        .authorization_bearer(&token)
        .json(&json!({
            "userEmail": "a@x.com",
            "mealId": "m1",
            "quantity": 3,
            "price": 5.0
        }))
        .await;
    let placed: Value = placed.json();
    let order_id = placed["order"]["_id"].as_str().unwrap().to_string();

    let recorded = server
        .post("/payments")
        .authorization_bearer(&token)
        .json(&json!({
            "orderId": order_id,
            "transactionId": "pi_123",
            "email": "a@x.com",
            "amount": 15.0
        }))
        .await;
    recorded.assert_status_ok();
    let recorded: Value = recorded.json();
    assert!(recorded["insertedId"].is_string());
    assert_eq!(recorded["orderUpdated"], true);

    // The order now shows as paid with the supplied transaction id.
    let detail = server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(&token)
        .await;
    let detail: Value = detail.json();
    assert_eq!(detail["paymentStatus"], "paid");
    assert_eq!(detail["transactionId"], "pi_123");

    // And shows up in the diner's history.
    let history = server
        .get("/payments/a@x.com")
        .authorization_bearer(&token)
        .await;
    history.assert_status_ok();
    let history: Vec<Value> = history.json();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["transactionId"], "pi_123");
}

#[tokio::test]
async fn payment_history_is_self_only() {
    let server = test_server();
    let response = server
        .get("/payments/a@x.com")
        .authorization_bearer(&token_for("b@x.com"))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    // The all-payments listing only needs authentication.
    let all = server
        .get("/payments")
        .authorization_bearer(&token_for("b@x.com"))
        .await;
    all.assert_status_ok();
}

#[tokio::test]
async fn recording_payment_with_malformed_order_id_is_rejected() {
    let server = test_server();
    let response = server
        .post("/payments")
        .authorization_bearer(&token_for("a@x.com"))
        .json(&json!({
            "orderId": "garbage",
            "transactionId": "pi_1",
            "email": "a@x.com",
            "amount": 5.0
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
