//! Socket Module
//!
//! Implements the socket lifecycle: `set_addr` stores a type and endpoint,
//! `init` takes ownership of a fresh native descriptor, and the remaining
//! operations each map onto exactly one native call. Every operation
//! requires the steps before it; a violated precondition comes back as a
//! status, never a panic.
//!
//! A datagram socket tracks its peer implicitly: each `read` overwrites the
//! stored endpoint with the sender of the datagram just received, so a
//! following `write` answers whoever spoke last.

use std::io;
use std::mem::MaybeUninit;
use std::slice;

use log::debug;
use socket2::{Socket as NativeSocket, Type};
use thiserror::Error;

use entities_addressing::Address;
use entities_system_integration_common::{platform, ErrorReporting, ErrorSlot};

/// Socket type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketType {
    /// Stream socket (TCP)
    Stream,
    /// Datagram socket (UDP)
    Datagram,
    /// Raw socket
    Raw,
}

impl From<SocketType> for Type {
    fn from(socket_type: SocketType) -> Self {
        match socket_type {
            SocketType::Stream => Type::STREAM,
            SocketType::Datagram => Type::DGRAM,
            SocketType::Raw => Type::RAW,
        }
    }
}

/// Socket error statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SocketError {
    /// A native call failed, or the stored type does not support the
    /// operation; details are recorded on the instance
    #[error("socket operation failed")]
    Failure,
    /// The operation needs a successfully initialized socket
    #[error("socket is not initialized")]
    Internal,
    /// The stored address is unusable for the operation
    #[error("invalid address for socket operation")]
    Address,
    /// The peer closed the connection while receiving
    #[error("peer disconnected")]
    Disconnect,
}

/// An owned native socket descriptor bound to a type and endpoint.
///
/// Move-only: ownership of the descriptor travels with the value and the
/// descriptor is released exactly once when the owning value drops. A
/// default-constructed socket owns nothing and drops without any native
/// call.
///
/// # Examples
///
/// ```no_run
/// use adapters_socket::{Socket, SocketType};
/// use entities_addressing::{Address, IpVersion};
///
/// let mut addr = Address::new();
/// addr.set_text(IpVersion::V6, "::", 8008).unwrap();
///
/// let mut server = Socket::with_addr(SocketType::Stream, &addr).unwrap();
/// server.init().unwrap();
/// server.bind().unwrap();
/// server.listen().unwrap();
///
/// let mut connection = server.accept().unwrap();
/// let (buffer, received) = connection.read(8192).unwrap();
/// connection.write(&buffer[..received]).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct Socket {
    valid: bool,
    errors: ErrorSlot,
    socket_type: Option<SocketType>,
    addr: Address,
    descriptor: Option<NativeSocket>,
}

impl Socket {
    /// Create a socket with no type, endpoint, or descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a socket with its type and endpoint already stored.
    pub fn with_addr(socket_type: SocketType, address: &Address) -> Result<Self, SocketError> {
        let mut socket = Self::new();
        socket.set_addr(socket_type, address)?;
        Ok(socket)
    }

    /// Store the socket type and a copy of the endpoint.
    ///
    /// Rejects an invalid address. Never touches the descriptor, so it may
    /// be called again freely before `init`.
    pub fn set_addr(&mut self, socket_type: SocketType, address: &Address) -> Result<(), SocketError> {
        if !address.is_valid() {
            return Err(SocketError::Address);
        }
        self.socket_type = Some(socket_type);
        self.addr = address.clone();
        Ok(())
    }

    /// Request a native descriptor for the stored IP version and type.
    ///
    /// Needs a stored valid address and type. On failure the OS error is
    /// recorded and the socket stays invalid.
    pub fn init(&mut self) -> Result<(), SocketError> {
        let version = self.addr.ip_version().map_err(|_| SocketError::Address)?;
        let socket_type = self.socket_type.ok_or(SocketError::Address)?;

        match NativeSocket::new(version.into(), socket_type.into(), None) {
            Ok(descriptor) => {
                debug!("opened {socket_type:?} descriptor for {}", self.addr);
                self.descriptor = Some(descriptor);
                self.valid = true;
                Ok(())
            }
            Err(error) => {
                self.errors.record_os(&error);
                Err(SocketError::Failure)
            }
        }
    }

    /// Adopt a descriptor obtained elsewhere (an accept result).
    ///
    /// The stored address must already describe the descriptor's endpoint;
    /// ownership of the descriptor transfers to this socket.
    pub fn init_with(&mut self, descriptor: NativeSocket) -> Result<(), SocketError> {
        if !self.addr.is_valid() {
            return Err(SocketError::Address);
        }
        self.descriptor = Some(descriptor);
        self.valid = true;
        Ok(())
    }

    /// Bind the descriptor to the stored endpoint.
    pub fn bind(&mut self) -> Result<(), SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        let target = self.addr.to_native().map_err(|_| SocketError::Internal)?;
        let outcome = self.descriptor()?.bind(&target);
        self.check_native(outcome)
    }

    /// Put the descriptor into the listening state with the platform's
    /// maximum backlog.
    pub fn listen(&mut self) -> Result<(), SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        let outcome = self.descriptor()?.listen(platform::max_backlog());
        self.check_native(outcome)
    }

    /// Connect the descriptor to the stored endpoint.
    ///
    /// Stream sockets only; any other stored type fails immediately.
    pub fn connect(&mut self) -> Result<(), SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        if self.socket_type != Some(SocketType::Stream) {
            return Err(SocketError::Failure);
        }
        let target = self.addr.to_native().map_err(|_| SocketError::Internal)?;
        debug!("connecting to {}", self.addr);
        let outcome = self.descriptor()?.connect(&target);
        self.check_native(outcome)
    }

    /// Accept one pending connection.
    ///
    /// Returns a fresh socket that owns the accepted descriptor and stores
    /// the peer's endpoint; it is immediately ready for `read`/`write`.
    /// This socket keeps listening.
    pub fn accept(&mut self) -> Result<Socket, SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        if self.socket_type != Some(SocketType::Stream) {
            return Err(SocketError::Failure);
        }

        let (descriptor, raw_peer) = match self.descriptor()?.accept() {
            Ok(accepted) => accepted,
            Err(error) => {
                self.errors.record_os(&error);
                return Err(SocketError::Failure);
            }
        };

        let mut peer = Address::new();
        peer.set_native(&raw_peer).map_err(|_| SocketError::Address)?;
        debug!("accepted connection from {peer}");

        let mut connection = Socket::new();
        connection.set_addr(SocketType::Stream, &peer)?;
        connection.init_with(descriptor)?;
        Ok(connection)
    }

    /// Receive up to `request_size` bytes in one native call.
    ///
    /// The returned buffer is always `request_size` long; the second tuple
    /// element is how many of its leading bytes the call actually filled,
    /// and callers truncate to it. On a datagram socket the stored endpoint
    /// is overwritten with the sender's address before returning.
    ///
    /// A receive failing with connection-reset/abort reports
    /// [`SocketError::Disconnect`]; other native failures report
    /// [`SocketError::Failure`]. Types other than stream/datagram have no
    /// receive semantics and report [`SocketError::Address`].
    pub fn read(&mut self, request_size: usize) -> Result<(Vec<u8>, usize), SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }

        let mut buffer = vec![0u8; request_size];
        // The native calls take possibly-uninitialized memory; the buffer
        // is zero-filled, so exposing it at full size afterwards is sound.
        let spare = unsafe {
            slice::from_raw_parts_mut(buffer.as_mut_ptr() as *mut MaybeUninit<u8>, buffer.len())
        };

        let received = match self.socket_type {
            Some(SocketType::Stream) => self.descriptor()?.recv(spare),
            Some(SocketType::Datagram) => match self.descriptor()?.recv_from(spare) {
                Ok((received, sender)) => {
                    self.addr
                        .set_native(&sender)
                        .map_err(|_| SocketError::Address)?;
                    Ok(received)
                }
                Err(error) => Err(error),
            },
            _ => return Err(SocketError::Address),
        };

        match received {
            Ok(received) => Ok((buffer, received)),
            Err(error) => {
                let status = match error.kind() {
                    io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
                        SocketError::Disconnect
                    }
                    _ => SocketError::Failure,
                };
                self.errors.record_os(&error);
                Err(status)
            }
        }
    }

    /// Send a byte slice in one native call.
    ///
    /// Stream sockets send on the connected descriptor; datagram sockets
    /// send to the stored endpoint (the configured one, or the sender of
    /// the most recent `read`). Types other than stream/datagram report
    /// [`SocketError::Address`].
    pub fn write(&mut self, data: &[u8]) -> Result<(), SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }

        let sent = match self.socket_type {
            Some(SocketType::Stream) => self.descriptor()?.send(data),
            Some(SocketType::Datagram) => {
                let target = self.addr.to_native().map_err(|_| SocketError::Address)?;
                self.descriptor()?.send_to(data, &target)
            }
            _ => return Err(SocketError::Address),
        };

        match sent {
            // a short send still reports success; framing is a caller concern
            Ok(_) => Ok(()),
            Err(error) => {
                self.errors.record_os(&error);
                Err(SocketError::Failure)
            }
        }
    }

    /// The stored endpoint.
    pub fn addr(&self) -> Result<Address, SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        Ok(self.addr.clone())
    }

    /// The stored socket type.
    pub fn socket_type(&self) -> Result<SocketType, SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        self.socket_type.ok_or(SocketError::Internal)
    }

    /// The kernel's view of the locally bound endpoint. The way to learn
    /// which port a bind to port 0 actually produced.
    pub fn local_addr(&mut self) -> Result<Address, SocketError> {
        let raw = match self.descriptor()?.local_addr() {
            Ok(raw) => raw,
            Err(error) => {
                self.errors.record_os(&error);
                return Err(SocketError::Failure);
            }
        };
        let mut address = Address::new();
        address.set_native(&raw).map_err(|_| SocketError::Address)?;
        Ok(address)
    }

    /// The kernel's view of the connected peer endpoint.
    pub fn peer_addr(&mut self) -> Result<Address, SocketError> {
        let raw = match self.descriptor()?.peer_addr() {
            Ok(raw) => raw,
            Err(error) => {
                self.errors.record_os(&error);
                return Err(SocketError::Failure);
            }
        };
        let mut address = Address::new();
        address.set_native(&raw).map_err(|_| SocketError::Address)?;
        Ok(address)
    }

    /// Set `SO_REUSEADDR` on the descriptor.
    pub fn set_reuse_address(&mut self, reuse: bool) -> Result<(), SocketError> {
        if !self.valid {
            return Err(SocketError::Internal);
        }
        let outcome = self.descriptor()?.set_reuse_address(reuse);
        self.check_native(outcome)
    }

    /// Borrow the underlying native socket, for descriptor-level options
    /// or raw handle access. `None` until an `init` succeeds.
    pub fn native(&self) -> Option<&NativeSocket> {
        self.descriptor.as_ref()
    }

    fn descriptor(&self) -> Result<&NativeSocket, SocketError> {
        self.descriptor.as_ref().ok_or(SocketError::Internal)
    }

    fn check_native(&mut self, outcome: io::Result<()>) -> Result<(), SocketError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(error) => {
                self.errors.record_os(&error);
                Err(SocketError::Failure)
            }
        }
    }
}

impl ErrorReporting for Socket {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn last_error_code(&self) -> i32 {
        self.errors.code()
    }

    fn last_error_message(&self) -> &str {
        self.errors.message()
    }
}
