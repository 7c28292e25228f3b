//! # tlsveil
//!
//! Core data-plane primitives for a TLS-mimicry obfuscation relay.
//!
//! The embedding proxy handles connection establishment, protocol
//! negotiation, and configuration; this crate is the load-bearing core those
//! outer layers share:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │         Embedding Proxy (handshake, config, CLI)         │
//! ├─────────────────────────────────────────────────────────┤
//! │  Relay (proxy::pipe, timeout-aware byte copy loop)       │
//! ├─────────────────────────────────────────────────────────┤
//! │  Record framing (transport::read_record, one record      │
//! │  per call, trailing bytes stay in the transport)         │
//! ├─────────────────────────────────────────────────────────┤
//! │  Crypto (AES-GCM AEAD, hardened entropy source)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Goals
//!
//! 1. **Exact framing**: a record reader that never over-reads, so the
//!    outer protocol can demarcate messages on a raw TCP stream
//! 2. **Clean teardown**: either relay direction failing closes both
//!    connections, leaving no half-open sessions behind
//! 3. **Hardened entropy**: bounded retry on transient entropy failure,
//!    fail-fast when the environment is genuinely broken

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod crypto;
pub mod error;
pub mod proxy;
pub mod transport;

pub use error::{Error, Result};
