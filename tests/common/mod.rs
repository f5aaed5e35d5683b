//! Shared test fixtures for the subscription tracker SDK integration tests.
//!
//! Provides record builders, a small sample snapshot, and `serve()`, a local
//! HTTP responder that replays canned responses and captures the requests it
//! received.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use subtrack_sdk::models::{Category, Currency, Frequency, Status, SubscriptionRecord};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

/// Fixed "today" used across the analytics tests.
pub fn today() -> NaiveDate {
    day(2025, 3, 10)
}

/// An entertainment subscription billed in USD with no dates.
pub fn record(id: &str, name: &str, price: &str, frequency: Frequency, status: Status) -> SubscriptionRecord {
    SubscriptionRecord {
        id: id.to_string(),
        name: name.to_string(),
        price: price.parse().unwrap(),
        currency: Currency::Usd,
        frequency,
        category: Category::Entertainment,
        status,
        payment_method: None,
        start_date: None,
        renewal_date: None,
    }
}

pub fn active_monthly(id: &str, price: &str) -> SubscriptionRecord {
    record(id, id, price, Frequency::Monthly, Status::Active)
}

pub fn renewing(mut rec: SubscriptionRecord, date: NaiveDate) -> SubscriptionRecord {
    rec.renewal_date = Some(date);
    rec
}

pub fn in_category(mut rec: SubscriptionRecord, category: Category) -> SubscriptionRecord {
    rec.category = category;
    rec
}

/// Five records covering every status and several categories.
pub fn sample_records() -> Vec<SubscriptionRecord> {
    vec![
        record("s1", "Netflix", "15.49", Frequency::Monthly, Status::Active),
        in_category(
            record("s2", "Gym Membership", "40", Frequency::Monthly, Status::Cancelled),
            Category::Lifestyle,
        ),
        in_category(
            record("s3", "Financial Times", "120", Frequency::Yearly, Status::Active),
            Category::Finance,
        ),
        in_category(
            record("s4", "GitHub Copilot", "10", Frequency::Monthly, Status::Expired),
            Category::Technology,
        ),
        record("s5", "Netflix Kids", "2.50", Frequency::Weekly, Status::Active),
    ]
}

/// A record as the API sends it, including fields the SDK ignores.
pub fn wire_record(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "name": name,
        "price": 9.99,
        "currency": "USD",
        "frequency": "monthly",
        "category": "entertainment",
        "paymentMethod": "Credit Card",
        "status": "active",
        "startDate": "2025-01-01T00:00:00.000Z",
        "renewalDate": "2025-03-12T00:00:00.000Z",
        "user": "user-001",
        "createdAt": "2025-01-01T10:00:00.000Z",
        "__v": 0
    })
}

pub fn wire_user() -> serde_json::Value {
    serde_json::json!({
        "_id": "user-001",
        "name": "Ada Lovelace",
        "email": "ada@example.com"
    })
}

// ---------------------------------------------------------------------------
// Canned HTTP server
// ---------------------------------------------------------------------------

/// A request as seen by the canned server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub struct CannedServer {
    /// API root served by this instance, e.g. `http://127.0.0.1:41234/api/v1`.
    pub base_url: String,
    requests: mpsc::Receiver<CapturedRequest>,
}

impl CannedServer {
    /// The next request the server answered.
    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request reached the canned server")
    }

    /// True if no further request arrives within a short grace period.
    pub fn is_idle(&self) -> bool {
        self.requests.recv_timeout(Duration::from_millis(200)).is_err()
    }
}

/// Start a server that answers one connection per `(status, body)` pair, in order.
pub fn serve(responses: Vec<(u16, String)>) -> CannedServer {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let mut stream = match listener.accept() {
                Ok((stream, _)) => stream,
                Err(_) => return,
            };
            let request = read_request(&stream);
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
            if tx.send(request).is_err() {
                return;
            }
        }
    });

    CannedServer {
        base_url: format!("http://{}/api/v1", addr),
        requests: rx,
    }
}

/// Shorthand for a `200 OK` with `{ "data": ... }`.
pub fn ok(data: serde_json::Value) -> (u16, String) {
    (200, serde_json::json!({ "success": true, "data": data }).to_string())
}

fn read_request(stream: &TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
