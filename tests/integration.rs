//! Integration tests for the trip settlement API.
//!
//! This test suite drives `POST /plan` end to end:
//! - Cycle collapse and chain shortening
//! - Tie-break determinism
//! - Settlement absorption and partial settlement
//! - Rounding of uneven splits
//! - Overpayment under both negative-balance policies
//! - Currency handling
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::str::FromStr;
use tower::ServiceExt;

use trip_settlement::api::{AppState, create_router};
use trip_settlement::config::{
    ConfigLoader, CurrencyInfo, EngineSettings, NegativeBalancePolicy, SettlementConfig,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn create_router_with_policy(policy: NegativeBalancePolicy) -> Router {
    let mut currencies = HashMap::new();
    currencies.insert(
        "USD".to_string(),
        CurrencyInfo {
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
        },
    );
    let config = SettlementConfig::new(EngineSettings::default().with_policy(policy), currencies);
    let loader = ConfigLoader::from_config(config).expect("Failed to build config");
    create_router(AppState::new(loader))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_plan(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/plan")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_expense(id: &str, paid_by: &str, shares: &[(&str, &str)]) -> Value {
    let split: Vec<Value> = shares
        .iter()
        .map(|(user, amount)| json!({ "user_id": user, "amount": amount }))
        .collect();
    json!({
        "id": id,
        "paid_by": paid_by,
        "split_between": split
    })
}

fn create_settlement(id: &str, from: &str, to: &str, amount: &str) -> Value {
    json!({ "id": id, "from": from, "to": to, "amount": amount })
}

fn create_request(expenses: Vec<Value>, settlements: Vec<Value>) -> Value {
    json!({
        "trip_id": "trip_001",
        "currency": "USD",
        "expenses": expenses,
        "settlements": settlements
    })
}

/// Returns the plan as `(from, to, amount)` triples.
fn payments(result: &Value) -> Vec<(String, String, Decimal)> {
    result["plan"]["payments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["from"].as_str().unwrap().to_string(),
                p["to"].as_str().unwrap().to_string(),
                decimal(p["amount"].as_str().unwrap()),
            )
        })
        .collect()
}

fn payment(from: &str, to: &str, amount: &str) -> (String, String, Decimal) {
    (from.to_string(), to.to_string(), decimal(amount))
}

fn warning_codes(result: &Value) -> Vec<String> {
    result["audit_trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Simplification
// =============================================================================

#[tokio::test]
async fn test_chain_collapses_to_single_payment() {
    // A owes B $30, B owes C $30
    let router = create_router_for_test();
    let request = create_request(
        vec![
            create_expense("exp_001", "b", &[("a", "30.00")]),
            create_expense("exp_002", "c", &[("b", "30.00")]),
        ],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments(&result), vec![payment("a", "c", "30.00")]);
}

#[tokio::test]
async fn test_full_cycle_needs_no_payments() {
    let router = create_router_for_test();
    let request = create_request(
        vec![
            create_expense("exp_001", "b", &[("a", "25.00")]),
            create_expense("exp_002", "c", &[("b", "25.00")]),
            create_expense("exp_003", "a", &[("c", "25.00")]),
        ],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(payments(&result).is_empty());
    assert_eq!(result["directed_balances"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_equal_creditors_paid_in_encounter_order() {
    // Creditors X:$10 and Y:$10, debtor Z:$20
    let router = create_router_for_test();
    let request = create_request(
        vec![
            create_expense("exp_001", "x", &[("z", "10.00")]),
            create_expense("exp_002", "y", &[("z", "10.00")]),
        ],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payments(&result),
        vec![payment("z", "x", "10.00"), payment("z", "y", "10.00")]
    );
}

#[tokio::test]
async fn test_group_dinner_split() {
    // Alice pays $120 for four, Bob pays $60 for four
    // Nets: bob +15, alice +75, carol -45, dave -45
    let router = create_router_for_test();
    let request = create_request(
        vec![
            create_expense(
                "exp_001",
                "alice",
                &[("alice", "30.00"), ("bob", "30.00"), ("carol", "30.00"), ("dave", "30.00")],
            ),
            create_expense(
                "exp_002",
                "bob",
                &[("alice", "15.00"), ("bob", "15.00"), ("carol", "15.00"), ("dave", "15.00")],
            ),
        ],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payments(&result),
        vec![
            payment("carol", "bob", "15.00"),
            payment("carol", "alice", "30.00"),
            payment("dave", "alice", "45.00"),
        ]
    );
}

// =============================================================================
// SECTION 2: Settlements
// =============================================================================

#[tokio::test]
async fn test_settlement_absorbs_debt() {
    let router = create_router_for_test();
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "50.00")])],
        vec![create_settlement("set_001", "a", "b", "50.00")],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(payments(&result).is_empty());
    assert!(result["directed_balances"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_partial_settlement_reduces_payment() {
    let router = create_router_for_test();
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "50.00")])],
        vec![create_settlement("set_001", "a", "b", "20.00")],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments(&result), vec![payment("a", "b", "30.00")]);
}

#[tokio::test]
async fn test_records_from_other_trips_are_ignored() {
    let router = create_router_for_test();
    let mut other_trip = create_expense("exp_002", "a", &[("b", "99.00")]);
    other_trip["trip_id"] = json!("trip_other");
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "12.00")]), other_trip],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments(&result), vec![payment("a", "b", "12.00")]);
}

#[tokio::test]
async fn test_overpayment_reverses_direction_under_both_policies() {
    for policy in [NegativeBalancePolicy::Normalize, NegativeBalancePolicy::Signed] {
        let router = create_router_with_policy(policy);
        let request = create_request(
            vec![create_expense("exp_001", "b", &[("a", "50.00")])],
            vec![create_settlement("set_001", "a", "b", "65.00")],
        );

        let (status, result) = post_plan(router, request).await;

        assert_eq!(status, StatusCode::OK, "policy {:?}", policy);
        assert_eq!(payments(&result), vec![payment("b", "a", "15.00")]);
        assert!(warning_codes(&result).contains(&"OVERPAYMENT".to_string()));
    }
}

#[tokio::test]
async fn test_normalize_policy_reports_positive_directed_balances() {
    let router = create_router_with_policy(NegativeBalancePolicy::Normalize);
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "50.00")])],
        vec![create_settlement("set_001", "a", "b", "65.00")],
    );

    let (_, result) = post_plan(router, request).await;

    let balances = result["directed_balances"].as_array().unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0]["debtor"], "b");
    assert_eq!(balances[0]["creditor"], "a");
    assert_eq!(decimal(balances[0]["amount"].as_str().unwrap()), decimal("15"));
}

#[tokio::test]
async fn test_signed_policy_keeps_negative_directed_balance() {
    let router = create_router_with_policy(NegativeBalancePolicy::Signed);
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "50.00")])],
        vec![create_settlement("set_001", "a", "b", "65.00")],
    );

    let (_, result) = post_plan(router, request).await;

    let balances = result["directed_balances"].as_array().unwrap();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances[0]["debtor"], "a");
    assert_eq!(decimal(balances[0]["amount"].as_str().unwrap()), decimal("-15"));
}

// =============================================================================
// SECTION 3: Rounding
// =============================================================================

#[tokio::test]
async fn test_uneven_three_way_split_is_exact() {
    let router = create_router_for_test();
    let request = create_request(
        vec![create_expense(
            "exp_001",
            "payer",
            &[("ann", "33.34"), ("ben", "33.33"), ("cat", "33.33")],
        )],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        payments(&result),
        vec![
            payment("ann", "payer", "33.34"),
            payment("ben", "payer", "33.33"),
            payment("cat", "payer", "33.33"),
        ]
    );
    assert!(warning_codes(&result).is_empty());
}

#[tokio::test]
async fn test_amounts_serialize_with_two_decimals() {
    let router = create_router_for_test();
    let request = create_request(vec![create_expense("exp_001", "b", &[("a", "12.3")])], vec![]);

    let (_, result) = post_plan(router, request).await;

    assert_eq!(result["plan"]["payments"][0]["amount"], "12.30");
}

#[tokio::test]
async fn test_sub_cent_share_returns_400() {
    // Three shares of 3.335 would each round up and overpay the payer
    let router = create_router_for_test();
    let request = create_request(
        vec![create_expense(
            "exp_001",
            "p",
            &[("a", "3.335"), ("b", "3.335"), ("c", "3.335")],
        )],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_EXPENSE");
    assert!(result["message"].as_str().unwrap().contains("decimal places"));
}

#[tokio::test]
async fn test_sub_cent_settlement_returns_400() {
    let router = create_router_for_test();
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "10.00")])],
        vec![create_settlement("set_001", "a", "b", "3.335")],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_SETTLEMENT");
}

#[tokio::test]
async fn test_trailing_zeros_are_accepted() {
    let router = create_router_for_test();
    let request = create_request(vec![create_expense("exp_001", "b", &[("a", "4.5000")])], vec![]);

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments(&result), vec![payment("a", "b", "4.50")]);
}

#[tokio::test]
async fn test_huge_share_returns_400() {
    let router = create_router_for_test();
    let request = create_request(
        vec![
            create_expense("exp_001", "b", &[("a", "79228162514264337593543950335")]),
            create_expense("exp_002", "b", &[("a", "79228162514264337593543950335")]),
        ],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_EXPENSE");
}

// =============================================================================
// SECTION 4: Currency
// =============================================================================

#[tokio::test]
async fn test_plan_uses_expense_currency() {
    let router = create_router_for_test();
    let mut expense = create_expense("exp_001", "b", &[("a", "40.00")]);
    expense["currency"] = json!("EUR");
    let request = json!({
        "trip_id": "trip_001",
        "expenses": [expense]
    });

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["currency"], "EUR");
    assert_eq!(result["plan"]["payments"][0]["currency"], "EUR");
}

#[tokio::test]
async fn test_mixed_currencies_raise_warning() {
    let router = create_router_for_test();
    let mut euro_expense = create_expense("exp_002", "a", &[("b", "10.00")]);
    euro_expense["currency"] = json!("EUR");
    let request = create_request(
        vec![create_expense("exp_001", "b", &[("a", "40.00")]), euro_expense],
        vec![],
    );

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["currency"], "USD");
    assert!(warning_codes(&result).contains(&"MIXED_CURRENCY".to_string()));
}

// =============================================================================
// SECTION 5: Audit Trace
// =============================================================================

#[tokio::test]
async fn test_audit_trace_lists_pipeline_steps() {
    let router = create_router_for_test();
    let request = create_request(vec![create_expense("exp_001", "b", &[("a", "40.00")])], vec![]);

    let (_, result) = post_plan(router, request).await;

    let rule_ids: Vec<&str> = result["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(rule_ids, vec!["ledger_aggregation", "netting", "greedy_matching"]);
    assert!(result["calculation_id"].is_string());
    assert_eq!(result["engine_version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// SECTION 6: Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_trip_currency_returns_400() {
    let router = create_router_for_test();
    let mut request = create_request(vec![], vec![]);
    request["currency"] = json!("XYZ");

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNSUPPORTED_CURRENCY");
}

#[tokio::test]
async fn test_self_settlement_returns_400() {
    let router = create_router_for_test();
    let request = create_request(vec![], vec![create_settlement("set_001", "a", "a", "5.00")]);

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_SETTLEMENT");
}

#[tokio::test]
async fn test_empty_split_returns_400() {
    let router = create_router_for_test();
    let request = create_request(vec![create_expense("exp_001", "a", &[])], vec![]);

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_EXPENSE");
}

#[tokio::test]
async fn test_non_numeric_amount_returns_400() {
    let router = create_router_for_test();
    let request = create_request(vec![create_expense("exp_001", "a", &[("b", "ten")])], vec![]);

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_empty_trip_returns_empty_plan() {
    let router = create_router_for_test();
    let request = create_request(vec![], vec![]);

    let (status, result) = post_plan(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(payments(&result).is_empty());
    assert!(result["net_balances"].as_array().unwrap().is_empty());
}
