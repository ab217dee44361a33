mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value};

fn employees_uri() -> String {
    format!("/api/companies/{}/employees", MICROSOFT)
}

fn full_names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_defaults_to_name_order() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&employees_uri())).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(full_names(&res.body), ["Mary Poppins", "Nick Carter", "Vince Carter"]);
    assert_eq!(res.body[0]["genderDisplay"], "Female");
}

#[tokio::test]
async fn age_desc_sorts_oldest_first() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&format!("{}?orderBy=age%20desc", employees_uri()))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(full_names(&res.body), ["Nick Carter", "Vince Carter", "Mary Poppins"]);

    let res = send(&app, get(&format!("{}?orderBy=age", employees_uri()))).await;
    assert_eq!(full_names(&res.body), ["Mary Poppins", "Vince Carter", "Nick Carter"]);
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&format!("{}?orderBy=salary", employees_uri()))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "unknown_sort_field");
}

#[tokio::test]
async fn filters_by_gender_and_query() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&format!("{}?gender=female", employees_uri()))).await;
    assert_eq!(full_names(&res.body), ["Mary Poppins"]);

    let res = send(&app, get(&format!("{}?q=carter", employees_uri()))).await;
    assert_eq!(full_names(&res.body), ["Nick Carter", "Vince Carter"]);

    let res = send(&app, get(&format!("{}?gender=robot", employees_uri()))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fields_shape_each_employee() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&format!("{}?fields=name,age", employees_uri()))).await;
    assert_eq!(res.status, StatusCode::OK);
    let first = res.body[0].as_object().unwrap();
    assert_eq!(first.keys().collect::<Vec<_>>(), ["name", "age"]);

    let res = send(&app, get(&format!("{}?fields=salary", employees_uri()))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_company_is_not_found() {
    let (app, _) = seeded_app();
    let uri = format!("/api/companies/{}/employees", uuid::Uuid::new_v4());
    let res = send(&app, get(&uri)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_single_employee() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&format!("{}/{}", employees_uri(), NICK))).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["employeeNo"], "MSFT231");
    assert_eq!(res.body["companyId"], MICROSOFT.to_string());

    let res = send(&app, get(&format!("{}/{}", employees_uri(), uuid::Uuid::new_v4()))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_employee_returns_location() {
    let (app, repo) = seeded_app();
    let body = json!({
        "employeeNo": "MSFT400",
        "firstName": "Ada",
        "lastName": "King",
        "gender": "female",
        "dateOfBirth": "1990-12-10T00:00:00"
    });
    let res = send(&app, with_json("POST", &employees_uri(), &body)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Ada King");
    let location = res.header("location").unwrap().to_string();
    assert_eq!(
        location,
        format!("{}/{}", employees_uri(), res.body["id"].as_str().unwrap())
    );
    assert_eq!(repo.employee_count(), 4);
}

#[tokio::test]
async fn create_employee_validates_body() {
    let (app, repo) = seeded_app();
    let body = json!({ "employeeNo": "Ada", "firstName": "Ada", "lastName": "Ada" });
    let res = send(&app, with_json("POST", &employees_uri(), &body)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = &res.body["error"]["details"];
    assert!(details.get("employeeNo").is_some());
    assert!(details.get("lastName").is_some());
    assert_eq!(repo.employee_count(), 3);
}

#[tokio::test]
async fn put_creates_then_replaces() {
    let (app, _) = seeded_app();
    let id = uuid::Uuid::new_v4();
    let uri = format!("{}/{}", employees_uri(), id);
    let body = json!({
        "employeeNo": "MSFT500",
        "firstName": "Tom",
        "lastName": "Hardy",
        "gender": "male",
        "dateOfBirth": "1977-09-15T00:00:00"
    });
    let res = send(&app, with_json("PUT", &uri, &body)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.header("location"), Some(uri.as_str()));
    assert_eq!(res.body["id"], id.to_string());

    let mut changed = body.clone();
    changed["lastName"] = json!("Holland");
    let res = send(&app, with_json("PUT", &uri, &changed)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = send(&app, get(&uri)).await;
    assert_eq!(res.body["name"], "Tom Holland");
}

#[tokio::test]
async fn patch_updates_existing_employee() {
    let (app, _) = seeded_app();
    let uri = format!("{}/{}", employees_uri(), NICK);
    let patch = json!([{ "op": "replace", "path": "/firstName", "value": "Nicholas" }]);
    let res = send(&app, with_body("PATCH", &uri, "application/json-patch+json", &patch)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = send(&app, get(&uri)).await;
    assert_eq!(res.body["name"], "Nicholas Carter");
    assert_eq!(res.body["employeeNo"], "MSFT231");
}

#[tokio::test]
async fn patch_upserts_missing_employee() {
    let (app, repo) = seeded_app();
    let id = uuid::Uuid::new_v4();
    let uri = format!("{}/{}", employees_uri(), id);
    let patch = json!([
        { "op": "replace", "path": "/employeeNo", "value": "MSFT600" },
        { "op": "replace", "path": "/firstName", "value": "Lin" },
        { "op": "replace", "path": "/lastName", "value": "Wu" }
    ]);
    let res = send(&app, with_json("PATCH", &uri, &patch)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["name"], "Lin Wu");
    assert_eq!(repo.employee_count(), 4);
}

#[tokio::test]
async fn patch_failures_are_unprocessable() {
    let (app, _) = seeded_app();
    let uri = format!("{}/{}", employees_uri(), NICK);

    let bad_path = json!([{ "op": "remove", "path": "/nickname" }]);
    let res = send(&app, with_json("PATCH", &uri, &bad_path)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);

    let invalid = json!([{ "op": "replace", "path": "/firstName", "value": "" }]);
    let res = send(&app, with_json("PATCH", &uri, &invalid)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(res.body["error"]["details"].get("firstName").is_some());

    let res = send(&app, get(&uri)).await;
    assert_eq!(res.body["name"], "Nick Carter");
}

#[tokio::test]
async fn delete_employee_then_not_found() {
    let (app, repo) = seeded_app();
    let uri = format!("{}/{}", employees_uri(), VINCE);
    let res = send(&app, delete(&uri)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(repo.employee_count(), 2);

    let res = send(&app, delete(&uri)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrongly_typed_employee_body_is_unprocessable() {
    let (app, repo) = seeded_app();
    let body = json!({
        "employeeNo": "MSFT700",
        "firstName": "Rob",
        "lastName": "Ott",
        "gender": "robot"
    });
    let res = send(&app, with_json("POST", &employees_uri(), &body)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.body["error"]["code"], "validation_error");
    assert!(res.body["error"]["details"]["body"][0]
        .as_str()
        .unwrap()
        .contains("gender"));

    let mut bad_date = body.clone();
    bad_date["gender"] = json!("male");
    bad_date["dateOfBirth"] = json!("yesterday");
    let uri = format!("{}/{}", employees_uri(), NICK);
    let res = send(&app, with_json("PUT", &uri, &bad_date)).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["error"]["code"], "validation_error");
    assert_eq!(repo.employee_count(), 3);
}

#[tokio::test]
async fn malformed_employee_id_uses_error_body() {
    let (app, _) = seeded_app();
    let res = send(&app, get(&format!("{}/42", employees_uri()))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn malformed_patch_document_is_unprocessable() {
    let (app, _) = seeded_app();
    let uri = format!("{}/{}", employees_uri(), NICK);
    let res = send(&app, with_json("PATCH", &uri, &json!([{ "op": "rename" }]))).await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["error"]["code"], "validation_error");
}
