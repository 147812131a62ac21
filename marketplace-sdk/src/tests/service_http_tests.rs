//! End-to-end tests of the domain services over HTTP
//!
//! These tests use WireMock to simulate the marketplace API and verify that
//! usable remote answers pass through untouched and that unusable ones are
//! replaced by local data.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::ClientBuilder;
    use crate::envelope::ApiResponse;
    use crate::models::{SupplierSearchParams, UserAnswers};
    use crate::tests::support::http_client;

    #[tokio::test]
    async fn test_usable_remote_result_is_returned_unchanged() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/search"))
            .and(query_param("q", "acme"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "siren": "111111111", "name": "ACME GARAGE", "address": "1 RUE DU TEST, 75001 PARIS" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.companies().search("acme").await;

        assert_eq!(response.status, 200);
        let companies = response.data.unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].siren, "111111111");
    }

    #[tokio::test]
    async fn test_remote_empty_list_is_usable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/location/postal-codes"))
            .and(query_param("prefix", "75"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.locations().search_postal_codes("75").await;

        assert_eq!(response, ApiResponse::ok(Vec::new(), 200));
    }

    #[tokio::test]
    async fn test_server_error_falls_back_to_local_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "database down" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.questions().list().await;

        assert_eq!(response.status, 200);
        assert!(response.error.is_none());
        assert_eq!(response.data.as_deref(), Some(client.dataset().questions()));
    }

    #[tokio::test]
    async fn test_unparseable_success_falls_back_to_local_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/location/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.locations().countries().await;

        assert_eq!(response.data.as_deref(), Some(client.dataset().countries()));
    }

    #[tokio::test]
    async fn test_configured_content_type_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/location/countries"))
            .and(header("Content-Type", "application/vnd.api+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Belgique"])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ClientBuilder::new()
            .base_url(mock_server.uri())
            .header("Content-Type", "application/vnd.api+json")
            .build()
            .unwrap();
        let response = client.locations().countries().await;

        assert_eq!(response, ApiResponse::ok(vec!["Belgique".to_string()], 200));
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_local_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/suppliers/sup-004"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "remote" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_millis(50));
        let response = client.suppliers().get("sup-004").await;

        assert_eq!(response.status, 200);
        assert_eq!(response.data.unwrap().supplier_name, "Géo Équipements");
    }

    #[tokio::test]
    async fn test_unknown_identifier_everywhere_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/companies/000000000"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "No such company" })))
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.companies().get_by_siren("000000000").await;

        assert_eq!(response, ApiResponse::not_found("Company not found"));
    }

    #[tokio::test]
    async fn test_recommended_sends_one_parameter_per_answer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/suppliers/recommended"))
            .and(query_param("q1", "2-colonnes"))
            .and(query_param("q2", "4t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "recommended": [], "others": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut answers = UserAnswers::new();
        answers.insert(1, vec!["2-colonnes".to_string()]);
        answers.insert(2, vec!["4t".to_string()]);

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.suppliers().recommended(&answers).await;

        let split = response.data.unwrap();
        assert!(split.recommended.is_empty());
        assert!(split.others.is_empty());
    }

    #[tokio::test]
    async fn test_search_forwards_structured_filters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/suppliers/search"))
            .and(query_param("voltage", "400v"))
            .and(query_param("liftType", "2-colonnes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params = SupplierSearchParams {
            voltage: Some("400v".to_string()),
            lift_type: Some("2-colonnes".to_string()),
            ..Default::default()
        };

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        assert_eq!(client.suppliers().search(&params).await, ApiResponse::ok(Vec::new(), 200));
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_client() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/criteria/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "value": "nord", "label": "Nord" }])))
            .expect(8)
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.criteria().zones().await })
            })
            .collect();

        for handle in handles {
            let zones = handle.await.unwrap().data.unwrap();
            assert_eq!(zones.len(), 1);
            assert_eq!(zones[0].value, "nord");
        }
    }
}
