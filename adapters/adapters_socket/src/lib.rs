//! Adapters Layer: Socket Lifecycle
//!
//! Provides the `Socket` type: an owned native socket descriptor driven
//! through the connection-oriented and datagram lifecycle with synchronous,
//! one-native-call-per-operation semantics.
//!
//! ## Overview
//!
//! The `adapters_socket` crate provides:
//! - **Stream sockets**: init, bind, listen, accept, connect, read, write
//! - **Datagram sockets**: init, bind, read (tracking the sender), write
//!   (answering the most recent sender)
//! - **Strict single ownership**: one live descriptor per socket, released
//!   exactly once on drop, transferred by move
//!
//! ## Architecture
//!
//! This crate is part of the adapters layer. It depends on:
//! - `entities_addressing`: endpoint storage and native-structure interop
//! - `entities_system_integration_common`: platform constants and the
//!   shared error-reporting capability
//! - `socket2`: the native socket calls themselves

pub mod socket;

pub use socket::{Socket, SocketError, SocketType};
