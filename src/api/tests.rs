use super::{ApiClient, TransactionApi};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::models::{ApiError, ResponseCode, TransactionStatus};

/// Serves exactly one canned HTTP response, capturing the raw request.
/// No mock-server crate needed for a fixed three-endpoint contract.
async fn spawn_responder(status_line: &'static str, body: &str) -> Result<(String, oneshot::Receiver<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let (request_sender, request_receiver) = oneshot::channel();
    let body = body.to_string();

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };

        let mut raw_request = Vec::new();
        let mut chunk = [0u8; 8192];

        // Read headers, then drain the announced body before responding so
        // the client never sees the connection close mid-write.
        loop {
            let Ok(read) = stream.read(&mut chunk).await else {
                return;
            };
            if read == 0 {
                break;
            }
            raw_request.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&raw_request);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text.lines()
                    .find_map(|line| {
                        let lowered = line.to_ascii_lowercase();
                        lowered.strip_prefix("content-length:")
                            .and_then(|value| value.trim().parse::<usize>().ok())
                    })
                    .unwrap_or(0);

                if raw_request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
        let _ = request_sender.send(String::from_utf8_lossy(&raw_request).into_owned());
    });

    Ok((format!("http://{address}"), request_receiver))
}

#[tokio::test]
async fn test_balance_success_envelope_is_returned() -> Result<()> {
    let (base_url, request) = spawn_responder("200 OK", r#"{"code":"SUCCESS","message":"SUCCESS","data":1250.75}"#).await?;
    let client = ApiClient::with_base_url(base_url);

    let envelope = client.fetch_balance().await;

    assert!(envelope.is_success());
    assert_eq!(envelope.into_result()?, Decimal::from_str("1250.75")?);
    assert!(request.await?.starts_with("GET /transactions/balance"));

    Ok(())
}

#[tokio::test]
async fn test_failed_transactions_parse_into_rows() -> Result<()> {
    let body = r#"{"code":"SUCCESS","message":"SUCCESS","data":[{
        "id": "a1",
        "name": "Acme",
        "type": "CREDIT",
        "amount": 10.00,
        "status": "FAILED",
        "description": "duplicate reference",
        "transaction_date": "2024-05-01T09:30:00Z"
    }]}"#;
    let (base_url, request) = spawn_responder("200 OK", body).await?;
    let client = ApiClient::with_base_url(base_url);

    let transactions = client.fetch_failed_transactions().await.into_result()?;

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].status, TransactionStatus::Failed);
    assert!(request.await?.starts_with("GET /transactions/issues"));

    Ok(())
}

#[tokio::test]
async fn test_bad_request_envelope_passes_through_unchanged() -> Result<()> {
    let (base_url, _request) = spawn_responder("400 Bad Request", r#"{"code":"BAD_REQUEST","message":"Only CSV files are allowed","data":null}"#).await?;
    let client = ApiClient::with_base_url(base_url);

    let envelope = client.fetch_balance().await;

    assert_eq!(envelope.code, ResponseCode::BadRequest);
    assert_eq!(envelope.message, "Only CSV files are allowed");

    Ok(())
}

#[tokio::test]
async fn test_malformed_body_collapses_to_runtime_error() -> Result<()> {
    let (base_url, _request) = spawn_responder("200 OK", "definitely not json").await?;
    let client = ApiClient::with_base_url(base_url);

    let envelope = client.fetch_balance().await;

    assert_eq!(envelope.code, ResponseCode::RuntimeError);
    assert!(envelope.data.is_none());

    Ok(())
}

#[tokio::test]
async fn test_bare_server_error_collapses_to_runtime_error() -> Result<()> {
    let (base_url, _request) = spawn_responder("500 Internal Server Error", "Internal Server Error").await?;
    let client = ApiClient::with_base_url(base_url);

    let envelope = client.fetch_balance().await;

    assert_eq!(envelope.code, ResponseCode::RuntimeError);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_host_collapses_to_runtime_error() {
    let client = ApiClient::with_base_url("http://127.0.0.1:1");

    let envelope = client.fetch_balance().await;

    assert_eq!(envelope.code, ResponseCode::RuntimeError);
    assert!(envelope.data.is_none());
}

#[tokio::test]
async fn test_upload_posts_multipart_file_field() -> Result<()> {
    let (base_url, request) = spawn_responder("200 OK", r#"{"code":"SUCCESS","message":"Transactions uploaded successfully","data":null}"#).await?;
    let client = ApiClient::with_base_url(base_url);

    let acknowledgement = client.upload_csv("transactions.csv".to_string(), b"id,name\n1,a\n".to_vec()).await.into_ack();

    assert!(acknowledgement.is_ok());

    let raw_request = request.await?;
    assert!(raw_request.starts_with("POST /transactions/upload"));
    assert!(raw_request.contains(r#"name="file""#));
    assert!(raw_request.contains(r#"filename="transactions.csv""#));

    Ok(())
}

#[tokio::test]
async fn test_upload_propagates_backend_rejection() -> Result<()> {
    let (base_url, _request) = spawn_responder("400 Bad Request", r#"{"code":"BAD_REQUEST","message":"CSV file is required","data":null}"#).await?;
    let client = ApiClient::with_base_url(base_url);

    let acknowledgement = client.upload_csv("transactions.csv".to_string(), Vec::new()).await.into_ack();

    assert_eq!(acknowledgement, Err(ApiError::BadRequest("CSV file is required".to_string())));

    Ok(())
}
