//! Record framing: reading exactly one record from a stream connection.
//!
//! TCP is a stream. Several records can arrive back to back in one segment,
//! and a single record can arrive fragmented by the IP layer's MTU.
//! [`read_record`] consumes exactly one record per call and leaves every
//! byte after it in the transport for the next call.
//!
//! The 5-byte header layout is fixed by the outer wire protocol: one type
//! byte, two version bytes, and a big-endian 16-bit body length. Only the
//! length field is interpreted here; type and version pass through opaque.

use crate::error::{Error, Result};
use crate::transport::Conn;

/// Record header length: type (1) + version (2) + body length (2)
pub const RECORD_HEADER_LEN: usize = 5;

/// Maximum body length representable by the 16-bit length field
pub const MAX_RECORD_BODY_LEN: usize = u16::MAX as usize;

/// Maximum size of a whole record, header included
pub const MAX_RECORD_LEN: usize = RECORD_HEADER_LEN + MAX_RECORD_BODY_LEN;

/// The fixed 5-byte record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Record type byte (opaque to this crate).
    pub content_type: u8,
    /// Protocol version bytes (opaque to this crate).
    pub version: [u8; 2],
    /// Length of the body that follows the header.
    pub body_len: u16,
}

impl RecordHeader {
    /// Parse a raw header.
    pub fn parse(bytes: &[u8; RECORD_HEADER_LEN]) -> Self {
        Self {
            content_type: bytes[0],
            version: [bytes[1], bytes[2]],
            body_len: u16::from_be_bytes([bytes[3], bytes[4]]),
        }
    }

    /// Encode back to the wire layout.
    pub fn encode(&self) -> [u8; RECORD_HEADER_LEN] {
        let len = self.body_len.to_be_bytes();
        [
            self.content_type,
            self.version[0],
            self.version[1],
            len[0],
            len[1],
        ]
    }
}

/// Read exactly one record from `conn` into `buf`.
///
/// Reads the 5-byte header into `buf[..5]`, then the declared body into
/// `buf[5..5 + body_len]`, both as exact-count reads. Returns the total
/// bytes read (header + body). Bytes belonging to a subsequent record are
/// never consumed.
///
/// # Errors
///
/// - [`Error::BufferTooSmall`] if the declared body does not fit in the
///   capacity remaining after the header. No body byte is consumed; the
///   caller can treat the peer as misbehaving and abort the session.
/// - [`Error::Network`] if the connection fails or closes before the full
///   count arrives (`UnexpectedEof` on premature close). No partial result
///   is returned.
pub async fn read_record<C>(conn: &C, buf: &mut [u8]) -> Result<usize>
where
    C: Conn + ?Sized,
{
    if buf.len() < RECORD_HEADER_LEN {
        return Err(Error::BufferTooSmall {
            required: RECORD_HEADER_LEN,
            capacity: buf.len(),
        });
    }

    let (header, body) = buf.split_at_mut(RECORD_HEADER_LEN);
    read_full(conn, header).await?;

    let body_len = u16::from_be_bytes([header[3], header[4]]) as usize;
    if body_len > body.len() {
        return Err(Error::BufferTooSmall {
            required: RECORD_HEADER_LEN + body_len,
            capacity: RECORD_HEADER_LEN + body.len(),
        });
    }

    read_full(conn, &mut body[..body_len]).await?;
    Ok(RECORD_HEADER_LEN + body_len)
}

/// Exact-count read; premature close surfaces as `UnexpectedEof`.
async fn read_full<C>(conn: &C, buf: &mut [u8]) -> Result<()>
where
    C: Conn + ?Sized,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = conn.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(Error::Network(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "connection closed mid-record",
            )));
        }
        filled += n;
    }
    Ok(())
}
