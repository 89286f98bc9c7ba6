use super::*;

#[test]
fn first_candidate_text_is_returned() {
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"Once upon a time"}]}}]}"#;
    assert_eq!(parse_generated_text(body).unwrap(), "Once upon a time");
}

#[test]
fn missing_candidates_is_an_error() {
    let err = parse_generated_text(r#"{"candidates":[]}"#).unwrap_err();
    assert!(err.message.contains("invalid response structure"));
    assert!(parse_generated_text(r#"{"candidates":[{}]}"#).is_err());
}

#[test]
fn api_error_message_is_surfaced() {
    let body = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
    let err = error_from_body(400, "Bad Request", body);
    assert_eq!(err.message, "Failed to generate content: API key not valid");
}

#[test]
fn status_is_used_without_an_error_body() {
    let err = error_from_body(503, "Service Unavailable", "<html>");
    assert_eq!(err.message, "Failed to generate content: 503 Service Unavailable");
}

#[test]
fn url_joins_endpoint_and_model() {
    let g = GeminiGenerator::new("k", "m").unwrap().with_endpoint("http://localhost:1/");
    assert_eq!(g.url(), "http://localhost:1/models/m:generateContent");
}
