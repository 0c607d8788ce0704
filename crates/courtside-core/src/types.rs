//! Core type definitions for Courtside
//!
//! # Units
//!
//! - Token amounts: whole tokens (i64), 100 tokens = $1.00
//! - Cash amounts: dollars (f64), only ever produced at the display boundary

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens per dollar at the fixed conversion rate.
pub const TOKENS_PER_DOLLAR: i64 = 100;

/// Player ID (backend UUID, opaque here)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session ID for a scheduled social match or coaching booking
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace listing ID (avatar items, coaching packages)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player's token balance as last reported by the backend.
///
/// The authoritative balance lives remotely; this is a read cache refreshed
/// explicitly (on open and after a successful commit), never updated
/// optimistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub tokens: i64,
}

impl TokenBalance {
    pub fn new(tokens: i64) -> Self {
        Self { tokens }
    }
}

/// Convert whole tokens to dollars at the given rate.
pub fn tokens_to_cash(tokens: i64, token_rate: f64) -> f64 {
    tokens as f64 * token_rate
}

/// Round a dollar amount to cents for display.
///
/// Internal comparisons use unrounded values; this is applied only when a
/// figure leaves the core.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
