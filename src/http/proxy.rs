//! Forwarding unmatched requests to the dev server.
//!
//! # Responsibilities
//! - Rewrite the request URI onto the dev server's authority
//! - Strip hop-by-hop headers in both directions
//! - Relay the dev server's response verbatim (redirects are not followed)
//! - Map connection failures to 502 Bad Gateway

use std::str::FromStr;

use axum::{
    body::Body,
    http::{
        header::{self, HeaderName, HeaderValue},
        uri::{Authority, Scheme},
        HeaderMap, Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::error::{BridgeError, BridgeResult};

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Headers meaningful only for a single transport hop.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// HTTP client bound to a single dev server.
#[derive(Clone)]
pub struct DevProxy {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl DevProxy {
    pub fn new(target: &Url) -> BridgeResult<Self> {
        let invalid = || BridgeError::InvalidDevServerUrl(target.to_string());
        let host = target.host_str().ok_or_else(invalid)?;
        let port = target.port_or_known_default().ok_or_else(invalid)?;
        let authority =
            Authority::from_str(&format!("{}:{}", host, port)).map_err(|_| invalid())?;

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self { client, authority })
    }

    /// Forward `request` and return whatever the dev server answered.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        let (mut parts, body) = request.into_parts();
        let path = parts.uri.path().to_string();

        let uri = match self.target_uri(&parts.uri) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Cannot build dev server URI");
                return (StatusCode::BAD_GATEWAY, "Invalid dev server request").into_response();
            }
        };

        let original_host = parts.headers.get(header::HOST).cloned();
        strip_hop_by_hop(&mut parts.headers);
        if let Some(host) = original_host {
            parts.headers.insert(X_FORWARDED_HOST, host);
        }
        if let Ok(host) = HeaderValue::from_str(self.authority.as_str()) {
            parts.headers.insert(header::HOST, host);
        }
        parts.uri = uri;
        parts.version = Version::HTTP_11;

        match self.client.request(Request::from_parts(parts, body)).await {
            Ok(response) => {
                let response: Response<Incoming> = response;
                let (mut parts, body) = response.into_parts();
                strip_hop_by_hop(&mut parts.headers);
                tracing::debug!(path = %path, status = %parts.status, "Dev server responded");
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::warn!(
                    path = %path,
                    dev_server = %self.authority,
                    error = %e,
                    "Dev server request failed"
                );
                (StatusCode::BAD_GATEWAY, "Dev server unreachable").into_response()
            }
        }
    }

    fn target_uri(&self, original: &Uri) -> Result<Uri, axum::http::Error> {
        let path_and_query = original
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    // Headers named in `Connection` are hop-by-hop too.
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_str(name.trim()).ok())
        .collect();

    for name in HOP_BY_HOP.iter().chain(listed.iter()) {
        headers.remove(name);
    }
}
