//! Client for the USGS Elevation Point Query Service (EPQS)

use crate::error::{ProcessingError, Result};
use crate::services::ElevationService;
use crate::utils::constants::{EPQS_UNITS, EPQS_URL, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EpqsResponse {
    #[serde(rename = "USGS_Elevation_Point_Query_Service")]
    service: PointQueryService,
}

#[derive(Debug, Deserialize)]
struct PointQueryService {
    #[serde(rename = "Elevation_Query")]
    elevation_query: ElevationQuery,
}

#[derive(Debug, Deserialize)]
struct ElevationQuery {
    #[serde(rename = "Elevation")]
    elevation: f64,
}

/// Extract the elevation from an EPQS JSON body
pub fn parse_elevation_response(body: &str) -> Result<f64> {
    let response: EpqsResponse = serde_json::from_str(body)
        .map_err(|e| ProcessingError::UnexpectedResponse(format!("{}: {}", e, body)))?;
    Ok(response.service.elevation_query.elevation)
}

pub struct EpqsClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl EpqsClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(EPQS_URL, USER_AGENT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, user_agent: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, latitude: f64, longitude: f64) -> Result<f64> {
        debug!(latitude, longitude, endpoint = %self.endpoint, "Querying EPQS");

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("output", "json".to_string()),
                ("x", longitude.to_string()),
                ("y", latitude.to_string()),
                ("units", EPQS_UNITS.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let elevation = parse_elevation_response(&body)?;

        debug!(latitude, longitude, elevation, "EPQS elevation");
        Ok(elevation)
    }
}

impl ElevationService for EpqsClient {
    async fn elevation(&self, latitude: f64, longitude: f64) -> Result<f64> {
        self.query(latitude, longitude).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the request head
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}/epqs/pqs.php", addr), handle)
    }

    #[test]
    fn test_parse_elevation_response() {
        let body = r#"{"USGS_Elevation_Point_Query_Service":{"Elevation_Query":{"x":-89.7,"y":46.1,"Data_Source":"3DEP","Elevation":493.27,"Units":"Meters"}}}"#;
        assert!((parse_elevation_response(body).unwrap() - 493.27).abs() < 1e-9);
    }

    #[test]
    fn test_unexpected_response_shape() {
        let missing_field = r#"{"USGS_Elevation_Point_Query_Service":{"Elevation_Query":{}}}"#;
        assert!(matches!(
            parse_elevation_response(missing_field),
            Err(ProcessingError::UnexpectedResponse(_))
        ));

        let not_json = "<html>Service unavailable</html>";
        assert!(matches!(
            parse_elevation_response(not_json),
            Err(ProcessingError::UnexpectedResponse(_))
        ));

        let string_elevation =
            r#"{"USGS_Elevation_Point_Query_Service":{"Elevation_Query":{"Elevation":"n/a"}}}"#;
        assert!(parse_elevation_response(string_elevation).is_err());
    }

    #[test]
    fn test_client_creation() {
        let client = EpqsClient::new().unwrap();
        assert_eq!(client.endpoint(), EPQS_URL);
    }

    #[tokio::test]
    async fn test_query_sends_expected_parameters() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"{"USGS_Elevation_Point_Query_Service":{"Elevation_Query":{"Elevation":301.5}}}"#,
        )
        .await;

        let client = EpqsClient::with_endpoint(endpoint, USER_AGENT).unwrap();
        let elevation = client.elevation(46.25, -89.5).await.unwrap();
        assert!((elevation - 301.5).abs() < 1e-9);

        let request = server.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert_eq!(
            request_line,
            "GET /epqs/pqs.php?output=json&x=-89.5&y=46.25&units=Meters HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "{}").await;

        let client = EpqsClient::with_endpoint(endpoint, USER_AGENT).unwrap();
        let result = client.elevation(46.25, -89.5).await;
        assert!(matches!(result, Err(ProcessingError::Http(_))));

        server.await.unwrap();
    }
}
