use crate::enrich::enrich_error::EnrichError;
use chrono::NaiveDate;
use serde::Deserialize;

const LINE_TRIPS_QUERY: &str = r#"
    query LineTrips($lineId: ID!, $date: Date!) {
      line(id: $lineId) {
        id
        journeyPatterns {
          serviceJourneysForDate(date: $date) {
            id
          }
        }
      }
    }
"#;

/// client for the journey-planner GraphQL endpoint used to count how many
/// service journeys a line runs on a given date.
pub struct PlannerClient {
    endpoint: String,
    client_name: String,
    http: reqwest::blocking::Client,
}

// response schema, validated at this boundary so nothing untyped leaks
// further in. service journey refs are only counted, never inspected.
#[derive(Debug, Deserialize)]
struct PlannerResponse {
    data: Option<PlannerData>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PlannerData {
    line: Option<PlannerLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlannerLine {
    #[serde(default)]
    journey_patterns: Vec<JourneyPattern>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JourneyPattern {
    #[serde(default)]
    service_journeys_for_date: Vec<serde_json::Value>,
}

impl PlannerClient {
    pub fn new(endpoint: &str, client_name: &str) -> PlannerClient {
        PlannerClient {
            endpoint: endpoint.to_string(),
            client_name: client_name.to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// total service journeys across all journey patterns of `line_id` on
    /// `date`. a line unknown to the planner counts as zero.
    pub fn service_journey_count(
        &self,
        line_id: &str,
        date: NaiveDate,
    ) -> Result<u32, EnrichError> {
        let body = serde_json::json!({
            "query": LINE_TRIPS_QUERY,
            "variables": { "lineId": line_id, "date": date.format("%Y-%m-%d").to_string() },
        });
        let response: PlannerResponse = self
            .http
            .post(&self.endpoint)
            .header("ET-Client-Name", &self.client_name)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(errors) = response.errors {
            return Err(EnrichError::PlannerResponseError {
                line: line_id.to_string(),
                detail: errors.to_string(),
            });
        }
        let count = response
            .data
            .and_then(|data| data.line)
            .map(|line| {
                line.journey_patterns
                    .iter()
                    .map(|jp| jp.service_journeys_for_date.len() as u32)
                    .sum::<u32>()
            })
            .unwrap_or(0);
        log::info!("line {line_id}: {count} service journeys on {date}");
        Ok(count)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_response_counts_across_journey_patterns() {
        let raw = r#"{
            "data": {
                "line": {
                    "id": "L1",
                    "journeyPatterns": [
                        {"serviceJourneysForDate": [{"id": "a"}, {"id": "b"}]},
                        {"serviceJourneysForDate": [{"id": "c"}]},
                        {"serviceJourneysForDate": []}
                    ]
                }
            }
        }"#;
        let response: PlannerResponse = serde_json::from_str(raw).expect("should deserialize");
        let line = response.data.and_then(|d| d.line).expect("line expected");
        let total: u32 = line
            .journey_patterns
            .iter()
            .map(|jp| jp.service_journeys_for_date.len() as u32)
            .sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_unknown_line_deserializes_to_none() {
        let raw = r#"{"data": {"line": null}}"#;
        let response: PlannerResponse = serde_json::from_str(raw).expect("should deserialize");
        assert!(response.data.expect("data expected").line.is_none());
        assert!(response.errors.is_none());
    }
}
