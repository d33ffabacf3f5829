//! Network address to text conversion.
//!
//! [`format_address`] is the portable counterpart of the C `inet_ntop`: given
//! a platform address-family tag and the raw network-order address bytes, it
//! writes the textual form into a caller-supplied buffer. Failure is reported
//! with the `None` sentinel; [`try_format_address`] gives the reason.
//!
//! The text matches what the system converters produce: dotted quad for
//! IPv4 and the RFC 5952 compressed form for IPv6. Port and scope id are
//! never part of the output.
//!
//! ```rust
//! use interlock::net::{format_address, AddressFamily, INET_ADDRSTRLEN};
//!
//! let mut buf = [0u8; INET_ADDRSTRLEN];
//! let text = format_address(AddressFamily::Inet.as_raw(), &[127, 0, 0, 1], &mut buf);
//! assert_eq!(text, Some("127.0.0.1"));
//! ```

mod sys;


use core::fmt::{self, Write as _};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Buffer size that fits any IPv4 text form (C `INET_ADDRSTRLEN`, NUL included).
pub const INET_ADDRSTRLEN: usize = 16;

/// Buffer size that fits any IPv6 text form (C `INET6_ADDRSTRLEN`, NUL included).
pub const INET6_ADDRSTRLEN: usize = 46;

/// Address families understood by [`format_address`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// IPv4, 4 address bytes.
    Inet,
    /// IPv6, 16 address bytes.
    Inet6,
}

impl AddressFamily {
    /// Maps a platform `AF_*` tag to a family.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            sys::AF_INET => Some(AddressFamily::Inet),
            sys::AF_INET6 => Some(AddressFamily::Inet6),
            _ => None,
        }
    }

    /// The platform `AF_*` tag for this family.
    pub const fn as_raw(self) -> i32 {
        match self {
            AddressFamily::Inet => sys::AF_INET,
            AddressFamily::Inet6 => sys::AF_INET6,
        }
    }

    /// Number of raw address bytes.
    pub const fn address_len(self) -> usize {
        match self {
            AddressFamily::Inet => 4,
            AddressFamily::Inet6 => 16,
        }
    }

    /// Longest possible text form, in bytes.
    pub const fn max_text_len(self) -> usize {
        match self {
            AddressFamily::Inet => INET_ADDRSTRLEN - 1,
            AddressFamily::Inet6 => INET6_ADDRSTRLEN - 1,
        }
    }
}

/// Why an address could not be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NtopError {
    /// The family tag is neither IPv4 nor IPv6.
    UnsupportedFamily(i32),
    /// Fewer source bytes than the family's address length.
    ShortAddress {
        /// Bytes the family needs.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The destination cannot hold the text.
    BufferTooSmall {
        /// Length of the text.
        required: usize,
        /// Length of the destination.
        capacity: usize,
    },
    /// The address could not be rendered.
    Conversion,
}

impl fmt::Display for NtopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NtopError::UnsupportedFamily(raw) => write!(f, "unsupported address family {raw}"),
            NtopError::ShortAddress { expected, actual } => {
                write!(f, "address needs {expected} bytes, got {actual}")
            }
            NtopError::BufferTooSmall { required, capacity } => {
                write!(f, "address text needs {required} bytes, buffer holds {capacity}")
            }
            NtopError::Conversion => f.write_str("address conversion failed"),
        }
    }
}

impl std::error::Error for NtopError {}

/// Formats a raw address into `dest`, returning the text or `None`.
///
/// `family` is a platform `AF_INET` / `AF_INET6` tag and `src` holds at least
/// 4 or 16 network-order bytes; extra bytes are ignored. No NUL terminator is
/// written: the returned slice carries the length.
pub fn format_address<'a>(family: i32, src: &[u8], dest: &'a mut [u8]) -> Option<&'a str> {
    match try_format_address(family, src, dest) {
        Ok(text) => Some(text),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(family, error = %_err, "address conversion failed");
            None
        }
    }
}

/// Like [`format_address`], but reports why the conversion failed.
pub fn try_format_address<'a>(
    family: i32,
    src: &[u8],
    dest: &'a mut [u8],
) -> Result<&'a str, NtopError> {
    let family = AddressFamily::from_raw(family).ok_or(NtopError::UnsupportedFamily(family))?;
    let expected = family.address_len();
    let bytes = src.get(..expected).ok_or(NtopError::ShortAddress {
        expected,
        actual: src.len(),
    })?;

    let addr = match family {
        AddressFamily::Inet => {
            let octets: [u8; 4] = bytes.try_into().map_err(|_| NtopError::Conversion)?;
            IpAddr::V4(Ipv4Addr::from(octets))
        }
        AddressFamily::Inet6 => {
            let octets: [u8; 16] = bytes.try_into().map_err(|_| NtopError::Conversion)?;
            IpAddr::V6(Ipv6Addr::from(octets))
        }
    };

    write_text(addr, dest)
}

/// Fixed-capacity `fmt::Write` sink over a byte buffer.
struct TextBuf {
    bytes: [u8; INET6_ADDRSTRLEN],
    len: usize,
}

impl fmt::Write for TextBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let slot = self.bytes.get_mut(self.len..end).ok_or(fmt::Error)?;
        slot.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

fn write_text(addr: IpAddr, dest: &mut [u8]) -> Result<&str, NtopError> {
    let mut text = TextBuf {
        bytes: [0; INET6_ADDRSTRLEN],
        len: 0,
    };
    write!(text, "{addr}").map_err(|_| NtopError::Conversion)?;

    let required = text.len;
    let capacity = dest.len();
    let out = dest
        .get_mut(..required)
        .ok_or(NtopError::BufferTooSmall { required, capacity })?;
    out.copy_from_slice(&text.bytes[..required]);

    core::str::from_utf8(out).map_err(|_| NtopError::Conversion)
}
