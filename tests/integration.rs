//! Integration tests for the compensation engine HTTP API.
//!
//! This test suite covers:
//! - CTC breakdowns under both tax regimes
//! - Monthly and annual pay frequencies
//! - Statutory flags and over-allocated component splits
//! - Payroll test runs over recorded and generated attendance
//! - Leave registers
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use ctc_engine::api::{AppState, create_router};
use ctc_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config/fy2025_26").expect("Failed to load config");
    AppState::from_loader(loader)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
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

fn assert_decimal(actual: &Value, expected: &str) {
    let actual = actual
        .as_str()
        .map(decimal)
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", actual));
    assert_eq!(
        actual.normalize(),
        decimal(expected).normalize(),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn component<'a>(result: &'a Value, name: &str) -> &'a Value {
    result["components"]["components"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["component"] == name)
        .unwrap_or_else(|| panic!("Component {} not found", name))
}

fn employee(id: &str, monthly_ctc: &str, all_applicable: bool) -> Value {
    json!({
        "id": id,
        "first_name": "Employee",
        "last_name": id,
        "department": "Assembly",
        "monthly_ctc": monthly_ctc,
        "applicability": {
            "pf": all_applicable,
            "esic": all_applicable,
            "pt": all_applicable,
            "lwf": all_applicable,
            "bonus": all_applicable
        }
    })
}

fn attendance(employee_id: &str, dates: &[&str], status: &str) -> Vec<Value> {
    dates
        .iter()
        .map(|date| json!({ "employee_id": employee_id, "date": date, "status": status }))
        .collect()
}

const WEEK_OF_2_MARCH: [&str; 5] = [
    "2026-03-02",
    "2026-03-03",
    "2026-03-04",
    "2026-03-05",
    "2026-03-06",
];

// =============================================================================
// SECTION 1: CTC Calculator
// =============================================================================

#[tokio::test]
async fn test_ctc_default_split_50000_new_regime() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "50000" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["calculation_id"].is_string());
    assert!(body["engine_version"].is_string());

    let result = &body["result"];
    assert_decimal(&component(result, "basic")["amount"]["monthly"], "20000");
    assert_decimal(&component(result, "house_rent_allowance")["amount"]["monthly"], "10000");
    assert_decimal(&component(result, "dearness_allowance")["amount"]["monthly"], "5000");
    assert_decimal(&component(result, "leave_travel_allowance")["amount"]["monthly"], "2500");
    assert_decimal(&component(result, "performance_bonus")["amount"]["monthly"], "5000");
    assert_decimal(&component(result, "special_allowance")["amount"]["monthly"], "7500");
    assert_decimal(&result["income_tax"]["taxable_income"], "525000");
    assert_eq!(result["income_tax"]["rebate_applied"], true);
    assert_decimal(&result["deductions"]["income_tax"]["monthly"], "0");
    assert_decimal(&result["deductions"]["retirement_employee"]["monthly"], "1800");
    assert_decimal(&result["net_pay"]["monthly"], "48000");
}

#[tokio::test]
async fn test_ctc_200000_new_regime_worked_example() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "200000", "regime": "new" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tax = &body["result"]["income_tax"];
    assert_decimal(&tax["taxable_income"], "2325000");
    assert_decimal(&tax["slab_tax"], "281250");
    assert_decimal(&tax["annual_tax"], "292500");
    assert_decimal(&tax["monthly_tax"], "24375");
    assert_decimal(&body["result"]["net_pay"]["monthly"], "173625");
}

#[tokio::test]
async fn test_ctc_old_regime_with_itemised_deduction() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "100000", "regime": "old" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tax = &body["result"]["income_tax"];
    assert_eq!(tax["regime"], "old");
    assert_decimal(&tax["standard_deduction"], "50000");
    assert_decimal(&tax["itemised_deduction"], "121600");
    assert_decimal(&tax["taxable_income"], "1028400");
    assert_decimal(&tax["annual_tax"], "125860.80");
}

#[tokio::test]
async fn test_ctc_annual_input() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "1000000", "pay_frequency": "annual" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_decimal(&result["gross"]["monthly"], "83333.33");
    assert_decimal(&result["gross"]["annual"], "1000000");
    assert_decimal(&component(result, "basic")["amount"]["annual"], "400000");
}

#[tokio::test]
async fn test_ctc_health_insurance_below_ceiling() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({
            "gross_pay": "18000",
            "flags": { "retirement": true, "professional_tax": true, "health_insurance": true }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let deductions = &body["result"]["deductions"];
    assert_decimal(&deductions["health_insurance_employee"]["monthly"], "135");
    assert_decimal(&deductions["health_insurance_employer"]["monthly"], "585");
    // 18000 - (864 + 200 + 135)
    assert_decimal(&body["result"]["net_pay"]["monthly"], "16801");
}

#[tokio::test]
async fn test_ctc_over_allocation_returns_warning() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({
            "gross_pay": "40000",
            "percentages": { "basic": "60", "hra": "30", "da": "10", "lta": "5", "performance": "5" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_decimal(&component(result, "special_allowance")["amount"]["monthly"], "-4000");
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "NEGATIVE_SPECIAL_ALLOWANCE"));
}

#[tokio::test]
async fn test_ctc_audit_trace_lists_every_rule() {
    let (_, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "75000" }),
    )
    .await;

    let steps = body["result"]["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps.iter().map(|s| s["rule_id"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec![
            "component_split",
            "retirement_contribution",
            "statutory_deductions",
            "income_tax",
            "net_pay"
        ]
    );
}

// =============================================================================
// SECTION 2: Payroll Test Run
// =============================================================================

#[tokio::test]
async fn test_run_recorded_week_all_applicable() {
    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "2026-03-02", "end": "2026-03-06" },
            "include_bonus": true,
            "employees": [employee("1", "30000", true)],
            "attendance": attendance("1", &WEEK_OF_2_MARCH, "present")
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"]["results"][0];
    assert_decimal(&result["attendance"]["days_worked"], "5");
    assert_decimal(&result["gross_salary"], "5000");
    assert_decimal(&result["basic_salary"], "2500");
    assert_decimal(&result["hra"], "1250");
    assert_decimal(&result["da"], "250");
    assert_decimal(&result["other_allowances"], "500");
    assert_decimal(&result["special_allowance"], "500");
    assert_decimal(&result["epf_employee"], "300");
    assert_decimal(&result["epf_employer"], "325");
    assert_decimal(&result["esic_employee"], "38");
    assert_decimal(&result["esic_employer"], "163");
    assert_decimal(&result["professional_tax"], "200");
    assert_decimal(&result["lwf"], "25");
    assert_decimal(&result["bonus"], "208");
    assert_decimal(&result["total_deductions"], "563");
    assert_decimal(&result["net_salary"], "4645");
    assert_eq!(result["department"], "Assembly");
}

#[tokio::test]
async fn test_run_half_days_and_absences() {
    let mut records = attendance("1", &WEEK_OF_2_MARCH[..3], "present");
    records.extend(attendance("1", &["2026-03-05"], "halfday"));
    records.extend(attendance("1", &["2026-03-06"], "absent"));

    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "2026-03-02", "end": "2026-03-06" },
            "employees": [employee("1", "30000", false)],
            "attendance": records
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"]["results"][0];
    assert_decimal(&result["attendance"]["days_worked"], "3.5");
    assert_eq!(result["attendance"]["absent_days"], 1);
    assert_decimal(&result["gross_salary"], "3500");
    assert_decimal(&result["net_salary"], "3500");
}

#[tokio::test]
async fn test_run_skips_inactive_and_totals_match() {
    let mut inactive = employee("3", "80000", true);
    inactive["active"] = json!(false);

    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "today": "2026-03-15",
            "date_range": { "preset": "last15" },
            "seed": 2026,
            "include_bonus": true,
            "employees": [employee("1", "18000", true), inactive, employee("2", "60000", true)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let report = &body["result"];
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(report["summary"]["total_employees"], 2);
    assert_eq!(report["period"]["start"], "2026-03-01");
    assert_eq!(report["period"]["end"], "2026-03-15");

    for field in ["gross_salary", "net_salary", "epf_employee", "esic_employer", "bonus"] {
        let sum: Decimal = results
            .iter()
            .map(|r| decimal(r[field].as_str().unwrap()))
            .sum();
        assert_decimal(&report["summary"][format!("total_{}", field)], &sum.to_string());
    }
}

#[tokio::test]
async fn test_run_same_seed_same_attendance() {
    let request = json!({
        "today": "2026-02-14",
        "date_range": { "preset": "current_month" },
        "seed": 99,
        "employees": [employee("1", "30000", true)]
    });

    let (_, first) = post(create_router_for_test(), "/test-run", request.clone()).await;
    let (_, second) = post(create_router_for_test(), "/test-run", request).await;

    let first_days = &first["result"]["results"][0]["attendance_days"];
    assert_eq!(first_days.as_array().unwrap().len(), 28);
    assert_eq!(first_days, &second["result"]["results"][0]["attendance_days"]);
    assert_eq!(
        first["result"]["summary"],
        second["result"]["summary"]
    );
}

#[tokio::test]
async fn test_run_weekends_marked() {
    let (_, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "2026-03-07", "end": "2026-03-08" },
            "seed": 1,
            "employees": [employee("1", "30000", true)]
        }),
    )
    .await;

    let result = &body["result"]["results"][0];
    assert_eq!(result["attendance"]["weekend_days"], 2);
    assert_eq!(result["attendance"]["working_days"], 0);
    assert_decimal(&result["gross_salary"], "0");
    assert_decimal(&result["leave_daily_rate"], "0");
}

// =============================================================================
// SECTION 3: Leave Register
// =============================================================================

#[tokio::test]
async fn test_leave_register_entry() {
    let present: Vec<String> = (1..=25).map(|d| format!("2026-01-{:02}", d)).collect();
    let present: Vec<&str> = present.iter().map(String::as_str).collect();
    let mut records = attendance("1", &present, "present");
    records.extend(attendance("1", &["2026-02-02"], "layoff"));

    let (status, body) = post(
        create_router_for_test(),
        "/leave-register",
        json!({
            "year": 2026,
            "establishment": "Acme Works",
            "employees": [{
                "id": "1",
                "code": "ASN001",
                "first_name": "Meera",
                "last_name": "Joshi",
                "basic_salary": "13000",
                "join_date": "2021-08-01"
            }],
            "attendance": records,
            "leave_requests": [
                {
                    "employee_id": "1",
                    "leave_type": "casual",
                    "start_date": "2026-03-02",
                    "end_date": "2026-03-03",
                    "status": "approved"
                },
                {
                    "employee_id": "1",
                    "leave_type": "sick",
                    "start_date": "2026-04-06",
                    "end_date": "2026-04-06",
                    "status": "pending"
                }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let register = &body["result"];
    assert_eq!(register["establishment"], "Acme Works");
    assert_eq!(register["department"], "All Departments");

    let entry = &register["entries"][0];
    assert_eq!(entry["serial_number"], 1);
    assert_eq!(entry["employee_code"], "ASN001");
    assert_eq!(entry["years_of_service"], 5);
    assert_eq!(entry["days_worked"], 25);
    assert_eq!(entry["layoff_days"], 1);
    assert_eq!(entry["leave_enjoyed"], 2);
    assert_eq!(entry["total_days"], 28);
    assert_eq!(entry["earned_leave"], 1);
    assert_eq!(entry["balance_leave"], -1);
    assert_decimal(&entry["daily_rate"], "500");
    assert_decimal(&entry["leave_wages"], "1000");
}

// =============================================================================
// SECTION 4: Error Cases
// =============================================================================

#[tokio::test]
async fn test_negative_gross_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "-50000" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "gross_pay");
}

#[tokio::test]
async fn test_unreasonable_allocation_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({
            "gross_pay": "50000",
            "percentages": { "basic": "100", "hra": "100", "da": "50", "lta": "0", "performance": "0" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_negative_percentage_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({
            "gross_pay": "50000",
            "percentages": { "basic": "40", "hra": "-10", "da": "10", "lta": "5", "performance": "10" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "percentages.hra");
}

#[tokio::test]
async fn test_missing_employees_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({ "seed": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("employees"));
}

#[tokio::test]
async fn test_reversed_range_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "2026-03-31", "end": "2026-03-01" },
            "employees": []
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DATE_RANGE");
}

#[tokio::test]
async fn test_negative_ctc_in_test_run_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "2026-03-02", "end": "2026-03-02" },
            "employees": [employee("7", "-1", false)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "employees[7].monthly_ctc");
}

#[tokio::test]
async fn test_gross_above_maximum_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/ctc",
        json!({ "gross_pay": "10000000000000000000000000000" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "gross_pay");
}

#[tokio::test]
async fn test_monthly_ctc_above_maximum_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "2026-03-02", "end": "2026-03-06" },
            "employees": [employee("5", "10000000000000000000000000000", true)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "employees[5].monthly_ctc");
}

#[tokio::test]
async fn test_overlong_custom_range_returns_400() {
    let (status, body) = post(
        create_router_for_test(),
        "/test-run",
        json!({
            "date_range": { "preset": "custom", "start": "0001-01-01", "end": "9999-12-31" },
            "seed": 1,
            "employees": [employee("1", "30000", true)]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "date_range");
}

#[tokio::test]
async fn test_leave_register_long_leave_saturates() {
    // ~2.9 million days each; 1500 of them exceed u32::MAX
    let leave_requests: Vec<Value> = (0..1500)
        .map(|_| {
            json!({
                "employee_id": "1",
                "leave_type": "casual",
                "start_date": "2026-01-01",
                "end_date": "9999-12-31",
                "status": "approved"
            })
        })
        .collect();

    let (status, body) = post(
        create_router_for_test(),
        "/leave-register",
        json!({
            "year": 2026,
            "employees": [{ "id": "1", "first_name": "Meera" }],
            "leave_requests": leave_requests
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let entry = &body["result"]["entries"][0];
    assert_eq!(entry["leave_enjoyed"], u32::MAX);
    assert_eq!(entry["total_days"], u32::MAX);
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/leave-register")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"year\": 2026,"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ctc")
                .body(Body::from(json!({ "gross_pay": "50000" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
