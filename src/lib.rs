//! # vbxlink
//!
//! Settings codec and tooling for AMB82 VBX recorder devices:
//! - Binary TLV codec with framing signature validation
//! - Device configuration images (hotspot, recording, schedule)
//! - System-info decoding (SD-card usage, clock)
//! - Request framing for the HTTP settings interface
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  HTTP Transport (external)                   │
//! │              one POST body per message                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Message Framing                         │
//! │               (request-kind byte + body)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  TLV Codec  │◄─────────│  Settings   │
//!   │ Reader /    │          │ Config /    │
//!   │ Writer      │          │ Schedule /  │
//!   └─────────────┘          │ SystemInfo  │
//!                            └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;

pub mod tlv;
pub mod message;
pub mod settings;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, VbxError};
pub use tlv::{DecodeKind, TlvReader, TlvValue, TlvWriter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vbxlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
