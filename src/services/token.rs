//! Token freshness indicator for the AI bearer token.
//!
//! DESIGN
//! ======
//! Pure inspection of the JWT-shaped token: split into the three dot
//! segments, decode the payload, read `exp`. A payload that cannot be
//! decoded is a normal outcome (`Unknown`), never an error — an opaque
//! token may still be accepted by the service, so the caller proceeds.
//! Expiry is only reported here; nothing acts on it automatically.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

/// Tokens inside this window count as "expiring".
pub const EXPIRY_WARNING_WINDOW_MS: i64 = 5 * 60 * 1000;

// =============================================================================
// STATUS
// =============================================================================

/// Display severity of a [`TokenStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    None,
    Invalid,
    Expired,
    Expiring,
    Valid,
    Unknown,
}

/// Freshness of the configured AI token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No token configured at all.
    NotSet,
    /// Not shaped like a JWT (header.payload.signature).
    Invalid,
    /// `exp` is in the past.
    Expired,
    /// `exp` is less than five minutes away.
    Expiring { minutes_left: i64 },
    /// `exp` is comfortably in the future.
    Valid { minutes_left: i64 },
    /// Payload undecodable — the token may still work.
    Unknown,
}

impl TokenStatus {
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::NotSet => Severity::None,
            Self::Invalid => Severity::Invalid,
            Self::Expired => Severity::Expired,
            Self::Expiring { .. } => Severity::Expiring,
            Self::Valid { .. } => Severity::Valid,
            Self::Unknown => Severity::Unknown,
        }
    }

    /// Human label shown next to the token field.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::NotSet => "No token set - get one from Azure CLI".to_string(),
            Self::Invalid => "Invalid token format".to_string(),
            Self::Expired => "Token expired! Get a new one from Azure CLI".to_string(),
            Self::Expiring { .. } => {
                "Token expires in less than 5 minutes - refresh soon!".to_string()
            }
            Self::Valid { minutes_left } => {
                format!("Token valid - expires in {minutes_left} minutes")
            }
            Self::Unknown => "Could not parse token - may still work".to_string(),
        }
    }
}

// =============================================================================
// INSPECTION
// =============================================================================

/// Status of `token` against the current wall clock.
#[must_use]
pub fn token_status(token: &str) -> TokenStatus {
    token_status_at(token, current_epoch_ms())
}

/// Status of `token` against an explicit clock (epoch milliseconds).
#[must_use]
pub fn token_status_at(token: &str, now_ms: i64) -> TokenStatus {
    let token = token.trim();
    if token.is_empty() {
        return TokenStatus::NotSet;
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return TokenStatus::Invalid;
    }

    let Some(exp_ms) = decode_exp_ms(segments[1]) else {
        return TokenStatus::Unknown;
    };

    let left_ms = exp_ms - now_ms;
    if left_ms <= 0 {
        TokenStatus::Expired
    } else if left_ms < EXPIRY_WARNING_WINDOW_MS {
        TokenStatus::Expiring { minutes_left: left_ms / 60_000 }
    } else {
        TokenStatus::Valid { minutes_left: left_ms / 60_000 }
    }
}

/// `exp` (epoch seconds) from the payload segment, scaled to milliseconds.
/// `None` on any decode failure: bad base64, bad JSON, missing `exp`.
fn decode_exp_ms(payload: &str) -> Option<i64> {
    let bytes = decode_segment(payload)?;
    let json: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = json.get("exp")?.as_i64()?;
    exp.checked_mul(1000)
}

/// JWT payloads are URL-safe base64 without padding, but tokens in the
/// wild show up padded or in the standard alphabet too.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD.decode(segment))
        .ok()
}

fn current_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
