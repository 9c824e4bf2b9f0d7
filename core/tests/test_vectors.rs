//! Verify the builders against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs and the expected request. Bodies are
//! compared as parsed JSON (not raw strings) so key order does not matter.

use restkit_core::{
    build_delete, build_get, build_write, BuildError, HeaderSet, Headers, HttpMethod, QueryParams,
    Url, WriteMethod,
};
use serde_json::Value;

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn base_url(input: &Value) -> Url {
    Url::parse(input["base_url"].as_str().unwrap()).unwrap()
}

fn headers(input: &Value) -> HeaderSet {
    serde_json::from_value(input["headers"].clone()).unwrap()
}

fn expected_headers(expected: &Value) -> Headers {
    serde_json::from_value(expected["headers"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let raw = include_str!("../../test-vectors/get.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected = &case["expected_request"];
        let query: Option<QueryParams> = serde_json::from_value(input["query"].clone()).unwrap();

        let req = build_get(
            &base_url(input),
            input["path"].as_str().unwrap(),
            query.as_ref(),
            &headers(input),
            None,
            None,
        )
        .unwrap();

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url.as_str(), expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, expected_headers(expected), "{name}: headers");
        assert!(req.body.is_none(), "{name}: body should be None");
    }

    for case in vectors["invalid"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let err = build_get(
            &base_url(case),
            case["path"].as_str().unwrap(),
            None,
            &HeaderSet::new(),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidUrl(_)), "{name}: expected InvalidUrl");
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected = &case["expected_request"];

        let req = build_delete(&base_url(input), input["path"].as_str().unwrap(), &headers(input), None, None);

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url.as_str(), expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, expected_headers(expected), "{name}: headers");
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

#[test]
fn write_test_vectors() {
    let raw = include_str!("../../test-vectors/write.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let expected = &case["expected_request"];
        let method: WriteMethod = serde_json::from_value(input["method"].clone()).unwrap();

        let req = build_write(
            &base_url(input),
            input["path"].as_str().unwrap(),
            method,
            &input["body"],
            &headers(input),
            None,
            None,
        )
        .unwrap();

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url.as_str(), expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, expected_headers(expected), "{name}: headers");

        let body: Value = req.body_json().expect("write carries a body").unwrap();
        assert_eq!(body, expected["body"], "{name}: body");
    }

    let base = Url::parse("https://example.com").unwrap();
    for case in vectors["invalid"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method: WriteMethod = serde_json::from_value(case["method"].clone()).unwrap();
        let err = build_write(&base, "p", method, &case["body"], &HeaderSet::new(), None, None).unwrap_err();
        assert!(matches!(err, BuildError::BodyEncoding(_)), "{name}: expected BodyEncoding");
    }
}
