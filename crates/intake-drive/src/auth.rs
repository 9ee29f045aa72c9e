//! Service-account authentication.
//!
//! A signed JWT assertion is exchanged at the key's `token_uri` for a
//! short-lived access token. The token is cached and fetched again shortly
//! before it expires, so a long-running server never sends a stale one.

use std::{fmt, path::Path, time::Duration};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, time::Instant};

use crate::{Error, Result, client::check};

/// Full read/write access to Drive files.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Refresh this long before the reported expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

// ─── Key file ────────────────────────────────────────────────────────────────

/// The fields of a service-account JSON key that the token exchange needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
  pub client_email:   String,
  pub private_key:    String,
  #[serde(default)]
  pub private_key_id: Option<String>,
  #[serde(default = "default_token_uri")]
  pub token_uri:      String,
}

fn default_token_uri() -> String { DEFAULT_TOKEN_URI.to_string() }

impl fmt::Debug for ServiceAccountKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ServiceAccountKey")
      .field("client_email", &self.client_email)
      .field("private_key_id", &self.private_key_id)
      .field("token_uri", &self.token_uri)
      .finish_non_exhaustive()
  }
}

impl ServiceAccountKey {
  /// Read and check a service-account key file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
      Error::Credentials(format!("cannot read {}: {e}", path.display()))
    })?;
    let key: Self = serde_json::from_slice(&data).map_err(|e| {
      Error::Credentials(format!("cannot parse {}: {e}", path.display()))
    })?;
    if key.client_email.trim().is_empty() {
      return Err(Error::Credentials(format!(
        "{} has an empty client_email",
        path.display()
      )));
    }
    if key.private_key.trim().is_empty() {
      return Err(Error::Credentials(format!(
        "{} has an empty private_key",
        path.display()
      )));
    }
    Ok(key)
  }
}

// ─── Token source ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Claims<'a> {
  iss:   &'a str,
  scope: &'a str,
  aud:   &'a str,
  iat:   i64,
  exp:   i64,
}

#[derive(Deserialize)]
struct TokenResponse {
  access_token: String,
  expires_in:   u64,
}

struct CachedToken {
  value:      String,
  refresh_at: Instant,
}

/// Access tokens for one service account and scope.
pub struct ServiceAccountTokens {
  client: Client,
  key:    ServiceAccountKey,
  signer: EncodingKey,
  scope:  String,
  cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokens {
  /// Fails if the key's `private_key` is not an RSA PEM key.
  pub fn new(
    client: Client,
    key: ServiceAccountKey,
    scope: impl Into<String>,
  ) -> Result<Self> {
    let signer = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
      .map_err(|e| Error::Credentials(format!("unusable private_key: {e}")))?;
    Ok(Self {
      client,
      key,
      signer,
      scope: scope.into(),
      cached: Mutex::new(None),
    })
  }

  /// A token valid for at least [`REFRESH_MARGIN`], fetching one if needed.
  /// Concurrent callers wait on the same refresh.
  pub async fn access_token(&self) -> Result<String> {
    let mut cached = self.cached.lock().await;
    if let Some(token) = cached.as_ref()
      && Instant::now() < token.refresh_at
    {
      return Ok(token.value.clone());
    }

    let fresh = self.exchange().await?;
    let value = fresh.value.clone();
    *cached = Some(fresh);
    Ok(value)
  }

  async fn exchange(&self) -> Result<CachedToken> {
    let now = Utc::now().timestamp();
    let claims = Claims {
      iss:   &self.key.client_email,
      scope: &self.scope,
      aud:   &self.key.token_uri,
      iat:   now,
      exp:   now + ASSERTION_LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = self.key.private_key_id.clone();
    let assertion = jsonwebtoken::encode(&header, &claims, &self.signer)?;

    let resp = self
      .client
      .post(&self.key.token_uri)
      .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
      .send()
      .await?;
    let token: TokenResponse = check(resp).await?.json().await?;

    tracing::debug!(expires_in = token.expires_in, "drive access token refreshed");
    let lifetime = Duration::from_secs(token.expires_in);
    Ok(CachedToken {
      value:      token.access_token,
      refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN),
    })
  }
}
