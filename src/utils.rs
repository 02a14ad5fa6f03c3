use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};

/// Length of the opaque `state` value sent with every authorization request.
pub const STATE_LENGTH: usize = 16;

pub fn generate_state() -> String {
    generate_random_string(STATE_LENGTH)
}

pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// `Authorization` header value for the token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {credentials}")
}

pub fn now_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Human readable expiry of a token obtained at `obtained_at` (unix seconds).
pub fn format_expiry(obtained_at: u64, expires_in: u64) -> String {
    let expires_at = obtained_at.saturating_add(expires_in);
    match DateTime::<Utc>::from_timestamp(expires_at as i64, 0) {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("in {expires_in} seconds"),
    }
}

/// Escapes text for interpolation into HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
