//! Transport primitives: the connection seam and record framing.
//!
//! [`Conn`] abstracts the byte streams the relay operates on; the embedding
//! proxy constructs them (TCP, TLS, or anything else tokio can read and
//! write) and hands them to this crate. [`read_record`] segments such a
//! stream into the outer protocol's length-prefixed records without ever
//! consuming bytes past the record boundary.

mod conn;
mod record;

pub use conn::{Conn, StreamConn};
pub use record::{
    read_record, RecordHeader, MAX_RECORD_BODY_LEN, MAX_RECORD_LEN, RECORD_HEADER_LEN,
};
