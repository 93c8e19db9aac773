//! In-memory [`HttpSend`] used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Uri};
use jfsign_core::{Error, HttpSend, Result};

/// A request as it reached the transport.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Records every request and answers with queued responses in order.
///
/// Once the queue is empty every send fails with a transport error.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    responses: Arc<Mutex<VecDeque<(u16, &'static str)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockHttpSend {
    pub fn respond(self, status: u16, body: &'static str) -> Self {
        self.responses.lock().unwrap().push_back((status, body));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        let Some((status, body)) = self.responses.lock().unwrap().pop_front() else {
            return Err(Error::transport("connection refused"));
        };
        let mut resp = http::Response::new(Bytes::from_static(body.as_bytes()));
        *resp.status_mut() = StatusCode::from_u16(status).unwrap();
        Ok(resp)
    }
}
