//! Gmail OAuth2 authentication
//!
//! Authorization code flow with a loopback redirect: a local listener
//! receives the browser callback. Tokens are cached as JSON in the config
//! directory and refreshed when close to expiry.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use url::Url;

/// Token cache filename in the config directory
const TOKEN_FILE: &str = "gmail-tokens.json";

/// Seconds before expiry at which a cached token is considered stale
const EXPIRY_MARGIN_SECS: i64 = 300;

/// OAuth2 configuration and token management for Gmail
pub struct GmailAuth {
    client_id: String,
    client_secret: String,
    token_path: PathBuf,
}

/// Stored token data
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
}

impl StoredToken {
    fn is_fresh(&self) -> bool {
        self.expires_at
            .is_some_and(|at| at > chrono::Utc::now().timestamp() + EXPIRY_MARGIN_SECS)
    }
}

/// Token response from Google
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

impl GmailAuth {
    const AUTH_URL: &'static str = "https://accounts.google.com/o/oauth2/v2/auth";
    const TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    /// Sending needs `gmail.send`; replying also reads source message headers
    const SCOPES: &'static str = "https://www.googleapis.com/auth/gmail.send https://www.googleapis.com/auth/gmail.readonly";

    /// Port range to try for the local OAuth callback listener
    const PORT_RANGE_START: u16 = 8080;
    const PORT_RANGE_END: u16 = 8090;

    /// Create a new GmailAuth instance using the default token cache
    ///
    /// # Arguments
    /// * `client_id` - OAuth2 client ID from Google Cloud Console
    /// * `client_secret` - OAuth2 client secret from Google Cloud Console
    pub fn new(client_id: String, client_secret: String) -> Result<Self> {
        let token_path =
            config::config_path(TOKEN_FILE).context("Could not determine config directory")?;
        Ok(Self::with_token_path(client_id, client_secret, token_path))
    }

    /// Create a GmailAuth that caches tokens at a specific path
    pub fn with_token_path(client_id: String, client_secret: String, token_path: PathBuf) -> Self {
        Self {
            client_id,
            client_secret,
            token_path,
        }
    }

    /// Get a valid access token, refreshing or re-authenticating as needed
    pub fn get_access_token(&self) -> Result<String> {
        if let Ok(token) = self.load_token() {
            if token.is_fresh() {
                return Ok(token.access_token);
            }

            if let Some(refresh_token) = token.refresh_token {
                match self.refresh_access_token(&refresh_token) {
                    Ok(new_token) => {
                        self.save_token_response(&new_token)?;
                        return Ok(new_token.access_token);
                    }
                    Err(e) => warn!("Token refresh failed, re-authenticating: {:#}", e),
                }
            }
        }

        let token = self.authorization_code_auth()?;
        self.save_token_response(&token)?;
        Ok(token.access_token)
    }

    /// Perform the authorization code flow in the user's browser
    fn authorization_code_auth(&self) -> Result<TokenResponse> {
        let (listener, port) = self.start_local_server()?;
        let redirect_uri = format!("http://localhost:{}", port);

        let auth_url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            Self::AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&redirect_uri),
            urlencoding::encode(Self::SCOPES),
        );

        println!("\n=== Gmail Authentication Required ===");
        println!("If the browser doesn't open, visit: {}", auth_url);

        if let Err(e) = open::that(&auth_url) {
            warn!("Failed to open browser: {}", e);
        }

        info!("Waiting for OAuth callback on port {}", port);
        let code = self.wait_for_callback(listener)?;

        debug!("Exchanging authorization code for tokens");
        let mut response = ureq::post(Self::TOKEN_URL)
            .send_form([
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code.as_str()),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .context("Failed to exchange authorization code")?;

        let token: TokenResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse token response")?;

        info!("Gmail authentication successful");
        Ok(token)
    }

    /// Bind a local TCP listener on the first free port in range
    fn start_local_server(&self) -> Result<(TcpListener, u16)> {
        (Self::PORT_RANGE_START..=Self::PORT_RANGE_END)
            .find_map(|port| {
                TcpListener::bind(("127.0.0.1", port))
                    .ok()
                    .map(|listener| (listener, port))
            })
            .with_context(|| {
                format!(
                    "Could not bind to any port in range {}-{}",
                    Self::PORT_RANGE_START,
                    Self::PORT_RANGE_END
                )
            })
    }

    /// Wait for the OAuth callback and extract the authorization code
    fn wait_for_callback(&self, listener: TcpListener) -> Result<String> {
        let (mut stream, _) = listener.accept().context("Failed to accept connection")?;

        let mut request_line = String::new();
        BufReader::new(&stream)
            .read_line(&mut request_line)
            .context("Failed to read request")?;

        // GET /?code=AUTH_CODE&scope=... HTTP/1.1
        let code = callback_param(&request_line, "code");
        let error = callback_param(&request_line, "error");

        let (status, body) = if code.is_some() {
            ("200 OK", "Authentication successful! You can close this window.")
        } else {
            ("400 Bad Request", "Authentication failed. Please try again.")
        };

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n<html><body><h1>{}</h1></body></html>",
            status, body
        );
        stream.write_all(response.as_bytes()).ok();

        if let Some(err) = error {
            anyhow::bail!("OAuth error: {}", err);
        }

        code.context("No authorization code received")
    }

    /// Refresh an access token using a refresh token
    fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let response = ureq::post(Self::TOKEN_URL)
            .send_form([
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .context("Failed to refresh access token")?;

        let mut token: TokenResponse = response
            .into_body()
            .read_json()
            .context("Failed to parse refresh token response")?;

        // Google omits the refresh token on refresh; keep the one we have
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }

        Ok(token)
    }

    fn load_token(&self) -> Result<StoredToken> {
        let content = fs::read_to_string(&self.token_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save_token_response(&self, token: &TokenResponse) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredToken {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: token
                .expires_in
                .map(|d| chrono::Utc::now().timestamp() + d as i64),
        };

        fs::write(&self.token_path, serde_json::to_string_pretty(&stored)?)
            .with_context(|| format!("Failed to write token cache: {}", self.token_path.display()))
    }

    /// Check for a usable cached token, refreshing it if needed
    pub fn is_authenticated(&self) -> bool {
        match self.load_token() {
            Ok(token) if token.is_fresh() => true,
            Ok(StoredToken {
                refresh_token: Some(refresh_token),
                ..
            }) => match self.refresh_access_token(&refresh_token) {
                Ok(new_token) => self.save_token_response(&new_token).is_ok(),
                Err(_) => false,
            },
            _ => false,
        }
    }

    /// Clear stored tokens (logout)
    pub fn logout(&self) -> Result<()> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)?;
        }
        Ok(())
    }
}

/// Extract a percent-decoded query parameter from an HTTP request line
fn callback_param(request_line: &str, key: &str) -> Option<String> {
    let path = request_line.split_whitespace().nth(1)?;
    let url = Url::parse("http://localhost").ok()?.join(path).ok()?;
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}
