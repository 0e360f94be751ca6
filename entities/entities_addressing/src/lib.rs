//! Entities Layer: Network Addressing
//!
//! Provides the `Address` value type: a resolved or hand-built IPv4/IPv6
//! endpoint that converts between textual, structured, and native binary
//! forms.
//!
//! ## Overview
//!
//! The `entities_addressing` crate provides:
//! - **Resolution**: hostname + service lookup through the platform
//!   resolver, preferring IPv6 when a dual-stack answer is offered
//! - **Literal parsing**: presentation-form IPv4/IPv6 text plus a port
//! - **Native interop**: ingestion of raw peer structures and conversion
//!   to the generic form native socket calls consume
//!
//! ## Architecture
//!
//! This crate is part of the entities layer. It depends on:
//! - `entities_system_integration_common`: platform resolver and the
//!   shared error-reporting capability
//! - `socket2`: the bit-exact native socket-address boundary

pub mod address;

pub use address::{Address, AddressError, IpVersion};
