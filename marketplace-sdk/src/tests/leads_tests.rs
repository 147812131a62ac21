//! Tests for lead submission and lookup
//!
//! Submission always reports success; lookup never substitutes.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::envelope::ApiResponse;
    use crate::models::{ContactDetails, LeadSubmission, ProfileData, ProfileType};
    use crate::services::leads::{CONFIRMATION_REDIRECT, LOCAL_CONFIRMATION_MESSAGE};
    use crate::tests::support::{http_client, scripted_client, Outcome};

    fn sample_lead() -> LeadSubmission {
        let mut lead = LeadSubmission {
            contact: ContactDetails {
                email: "jean.dupont@garage-martin.fr".to_string(),
                first_name: "Jean".to_string(),
                last_name: "Dupont".to_string(),
                company: "GARAGE MARTIN".to_string(),
                phone: "06 12 34 56 78".to_string(),
                message: "Installation avant septembre".to_string(),
            },
            supplier_ids: vec!["sup-001".to_string(), "sup-002".to_string()],
            profile: Some(ProfileData {
                profile_type: Some(ProfileType::ProFrance),
                postal_code: Some("69001".to_string()),
                city: Some("Lyon".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        lead.answers.insert(1, vec!["2-colonnes".to_string()]);
        lead
    }

    #[tokio::test]
    async fn test_submit_returns_remote_acknowledgement() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/leads"))
            .and(body_partial_json(json!({
                "supplierIds": ["sup-001", "sup-002"],
                "answers": { "1": ["2-colonnes"] },
                "profile": { "type": "pro_france" }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "leadId": "L-2048",
                "message": "Merci",
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let response = client.leads().submit(&sample_lead()).await;

        assert_eq!(response.status, 201);
        let ack = response.data.unwrap();
        assert_eq!(ack.lead_id, "L-2048");
        assert_eq!(ack.redirect_url, None);
    }

    #[tokio::test]
    async fn test_submit_is_fail_open() {
        for outcome in [Outcome::Fail(500), Outcome::Fail(408), Outcome::Empty(201), Outcome::Raise] {
            let client = scripted_client(outcome);
            let response = client.leads().submit(&sample_lead()).await;

            assert_eq!(response.status, 201);
            assert!(response.error.is_none());

            let ack = response.data.unwrap();
            assert!(ack.success);
            assert!(ack.lead_id.starts_with("LEAD-"));
            assert!(ack.lead_id.len() > "LEAD-".len());
            assert_eq!(ack.message, LOCAL_CONFIRMATION_MESSAGE);
            assert_eq!(ack.redirect_url.as_deref(), Some(CONFIRMATION_REDIRECT));
        }
    }

    #[tokio::test]
    async fn test_submit_survives_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/leads"))
            .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_millis(50));
        let response = client.leads().submit(&sample_lead()).await;

        assert_eq!(response.status, 201);
        assert_eq!(response.data.unwrap().message, LOCAL_CONFIRMATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_get_returns_remote_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leads/L-2048"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contact": { "email": "a@b.fr", "firstName": "A", "lastName": "B" },
                "supplierIds": ["sup-001"],
                "answers": { "1": ["2-colonnes"] },
                "status": "sent"
            })))
            .mount(&mock_server)
            .await;

        let client = http_client(&mock_server.uri(), Duration::from_secs(5));
        let record = client.leads().get("L-2048").await.data.unwrap();

        assert_eq!(record.status, "sent");
        assert_eq!(record.supplier_ids, vec!["sup-001".to_string()]);
    }

    #[tokio::test]
    async fn test_get_is_fail_closed() {
        for outcome in [Outcome::Fail(500), Outcome::Fail(408), Outcome::Empty(200), Outcome::Raise] {
            let client = scripted_client(outcome);
            let response = client.leads().get("LEAD-1700000000000").await;

            assert_eq!(
                response,
                ApiResponse {
                    data: None,
                    error: Some("Lead not found".to_string()),
                    status: 404,
                }
            );
        }
    }
}
