// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! reqwest-backed [`IdentityLookup`]

use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::trace;
use url::Url;

use super::{parse_identity, IdentityLookup, LookupOutcome, ParsedIdentity};
use crate::errors::IdentityError;

/// Default identity endpoint
pub const DEFAULT_IDENTITY_URL: &str = "https://monad-games-id-site.vercel.app/api/check-wallet";

/// Identity lookups over HTTP
///
/// Issues `GET {endpoint}?wallet=<lowercase address>&t=<unix millis>`; the
/// timestamp defeats intermediate caches.
#[derive(Debug, Clone)]
pub struct HttpIdentityLookup {
    client: Client,
    endpoint: Url,
}

impl HttpIdentityLookup {
    /// Create a lookup against `endpoint` with a per-request timeout
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, IdentityError> {
        let endpoint = Url::parse(endpoint).map_err(|e| IdentityError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self { client, endpoint })
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, wallet: Address) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("wallet", &format!("{wallet:#x}"))
            .append_pair("t", &Utc::now().timestamp_millis().to_string());
        url
    }
}

#[async_trait]
impl IdentityLookup for HttpIdentityLookup {
    async fn lookup(&self, wallet: Address) -> LookupOutcome {
        let url = self.request_url(wallet);
        trace!(%url, "Identity lookup");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return LookupOutcome::Failed(e.into()),
        };

        let status = response.status();
        if !status.is_success() {
            return LookupOutcome::Rejected {
                status: status.as_u16(),
            };
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return LookupOutcome::Failed(e.into()),
        };

        match serde_json::from_slice(&body) {
            Ok(value) => LookupOutcome::Parsed(parse_identity(&value)),
            Err(_) => LookupOutcome::Parsed(ParsedIdentity::Unrecognized),
        }
    }
}
