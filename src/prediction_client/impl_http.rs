use crate::file_picker::interface::SelectedFile;
use crate::library::logger::interface::Logger;
use crate::prediction_client::interface::{HistoryItem, PredictionClient, PredictionResult};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::sync::Arc;

pub struct PredictionClientHttp {
    base_url: String,
    client: Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictionClientHttp {
    pub fn new(
        base_url: &str,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        // No request timeout: a slow model is left to the transport.
        let client = Client::builder().timeout(None).build()?;

        Ok(Self::with_client(base_url, client, logger))
    }

    pub fn with_client(
        base_url: &str,
        client: Client,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            logger: logger.with_namespace("prediction_client").with_namespace("http"),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl PredictionClient for PredictionClientHttp {
    fn predict(
        &self,
        file: &SelectedFile,
    ) -> Result<PredictionResult, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.endpoint("predict");
        self.logger
            .info(&format!("POST {} ({}, {} bytes)", url, file.name, file.bytes.len()))?;

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part);

        let body = self
            .client
            .post(&url)
            .multipart(form)
            .send()?
            .error_for_status()?
            .text()?;

        Ok(decode_prediction(&body)?)
    }

    fn history(&self) -> Result<Vec<HistoryItem>, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.endpoint("history");
        self.logger.info(&format!("GET {}", url))?;

        let body = self.client.get(&url).send()?.error_for_status()?.text()?;

        Ok(decode_history(&body)?)
    }
}

pub fn decode_prediction(body: &str) -> Result<PredictionResult, serde_json::Error> {
    serde_json::from_str(body)
}

pub fn decode_history(body: &str) -> Result<Vec<HistoryItem>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use crate::prediction_client::interface::HistoryId;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::JoinHandle;

    struct Captured {
        head: String,
        body: Vec<u8>,
    }

    fn read_request(stream: &mut TcpStream) -> Captured {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before headers");
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);

        while buffer.len() < header_end + content_length {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
        }

        Captured {
            head,
            body: buffer[header_end..].to_vec(),
        }
    }

    /// Serves exactly one request with the given status and JSON body.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let captured = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            captured
        });

        (base_url, handle)
    }

    // Loopback only; ignore any proxy configured in the environment.
    fn client(base_url: &str) -> PredictionClientHttp {
        let client = Client::builder().no_proxy().build().unwrap();
        PredictionClientHttp::with_client(base_url, client, Arc::new(LoggerFake::new()))
    }

    #[test]
    fn test_decode_prediction_ignores_extra_fields() {
        let body = r#"{"filename":"leaf.jpg","prediction":"Healthy","confidence":0.87,"id":4}"#;

        let result = decode_prediction(body).unwrap();

        assert_eq!(
            result,
            PredictionResult {
                prediction: "Healthy".to_string(),
                confidence: 0.87,
            }
        );
    }

    #[test]
    fn test_decode_prediction_rejects_missing_confidence() {
        assert!(decode_prediction(r#"{"prediction":"Healthy"}"#).is_err());
        assert!(decode_prediction(r#"{"detail":"Model not loaded"}"#).is_err());
    }

    #[test]
    fn test_decode_history_keeps_server_order_and_id_shapes() {
        let body = r#"[
            {"id":7,"filename":"a.jpg","prediction":"Blight","confidence":0.6,"timestamp":"2024-01-02T00:00:00"},
            {"id":"abc","prediction":"Healthy","confidence":0.9,"timestamp":"2024-01-01T00:00:00Z"}
        ]"#;

        let items = decode_history(body).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, HistoryId::Number(7));
        assert_eq!(items[0].prediction, "Blight");
        assert_eq!(items[1].id, HistoryId::Text("abc".to_string()));
    }

    #[test]
    fn test_decode_history_empty() {
        assert!(decode_history("[]").unwrap().is_empty());
    }

    #[test]
    fn test_predict_sends_multipart_file_field() {
        let (base_url, server) = serve_once("200 OK", r#"{"prediction":"Healthy","confidence":0.87}"#);
        let file = SelectedFile::new("leaf.png", b"not-really-a-png".to_vec());

        let result = client(&base_url).predict(&file).unwrap();
        let captured = server.join().unwrap();

        assert_eq!(result.prediction, "Healthy");
        assert!(captured.head.starts_with("POST /predict "));
        assert!(captured
            .head
            .to_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&captured.body);
        assert!(body.contains(r#"name="file"; filename="leaf.png""#));
        assert!(body.contains("Content-Type: image/png"));
        assert!(body.contains("not-really-a-png"));
    }

    #[test]
    fn test_predict_server_error_is_an_error() {
        let (base_url, server) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#);
        let file = SelectedFile::new("leaf.png", vec![1, 2, 3]);

        let result = client(&base_url).predict(&file);
        server.join().unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn test_history_hits_history_endpoint() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"prediction":"Blight","confidence":0.6,"timestamp":"2024-01-01T00:00:00Z"}]"#,
        );

        let items = client(&format!("{}/", base_url)).history().unwrap();
        let captured = server.join().unwrap();

        assert!(captured.head.starts_with("GET /history "));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].prediction, "Blight");
    }

    #[test]
    fn test_history_unreachable_server_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        assert!(client(&base_url).history().is_err());
    }
}
