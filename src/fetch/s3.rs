use super::sigv4::{self, Credentials, EMPTY_PAYLOAD_SHA256};
use super::FetchError;
use crate::config::S3Settings;
use chrono::Utc;
use reqwest::{Client, Url};
use std::env;
use tracing::debug;

const DEFAULT_REGION: &str = "us-east-1";

/// Minimal S3 client: a single signed `GetObject`
pub struct S3Client {
    http: Client,
    settings: S3Settings,
    region: String,
    credentials: Option<Credentials>,
}

impl S3Client {
    pub fn new(settings: S3Settings) -> Result<Self, FetchError> {
        let region = settings
            .region
            .clone()
            .or_else(|| env::var("AWS_REGION").ok().filter(|r| !r.is_empty()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let credentials = Credentials::resolve(
            settings.access_key_id.as_deref(),
            settings.secret_access_key.as_deref(),
        );

        let client = Self {
            http: Client::new(),
            settings,
            region,
            credentials,
        };
        // Surface a bad endpoint before any network traffic
        client.object_url()?;
        Ok(client)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Virtual-hosted style unless path style is forced
    pub fn object_url(&self) -> Result<Url, FetchError> {
        let S3Settings {
            bucket,
            key,
            endpoint,
            force_path_style,
            ..
        } = &self.settings;
        let encoded_key = sigv4::uri_encode(key.trim_start_matches('/'), true);

        let base = match endpoint {
            Some(endpoint) => parse_endpoint(endpoint)?,
            None => Url::parse(&format!("https://s3.{}.amazonaws.com", self.region)).map_err(
                |e| FetchError::InvalidEndpoint {
                    endpoint: self.region.clone(),
                    reason: e.to_string(),
                },
            )?,
        };

        let scheme = base.scheme();
        let authority = match base.port() {
            Some(port) => format!("{}:{}", base.host_str().unwrap_or_default(), port),
            None => base.host_str().unwrap_or_default().to_string(),
        };
        let prefix = base.path().trim_end_matches('/');

        let raw = if *force_path_style {
            format!(
                "{}://{}{}/{}/{}",
                scheme,
                authority,
                prefix,
                sigv4::uri_encode(bucket, false),
                encoded_key
            )
        } else {
            format!("{}://{}.{}{}/{}", scheme, bucket, authority, prefix, encoded_key)
        };

        Url::parse(&raw).map_err(|e| FetchError::InvalidEndpoint {
            endpoint: raw.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn get_object(&self) -> Result<Vec<u8>, FetchError> {
        let url = self.object_url()?;
        debug!(url = %url, signed = self.credentials.is_some(), "GetObject");

        let mut request = self.http.get(url.clone());
        if let Some(credentials) = &self.credentials {
            let headers = sigv4::sign_request(
                "GET",
                &url,
                &[],
                EMPTY_PAYLOAD_SHA256,
                credentials,
                &self.region,
                Utc::now(),
            );
            for (name, value) in headers {
                request = request.header(name, value);
            }
        }

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                bucket: self.settings.bucket.clone(),
                key: self.settings.key.clone(),
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        Ok(bytes.to_vec())
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, FetchError> {
    let with_scheme = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    };

    let url = Url::parse(&with_scheme).map_err(|e| FetchError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    if url.host_str().is_none() {
        return Err(FetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}
