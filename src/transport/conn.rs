//! The connection seam between the relay core and the embedding proxy.
//!
//! A [`Conn`] is a bidirectional, ordered, reliable byte stream owned by the
//! outer layers; the core only reads, writes, and closes it. Close is
//! idempotent and unblocks pending I/O on the same connection from other
//! tasks; that contract is what lets one relay direction tear down its
//! peer direction without any explicit signaling channel between them.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::{watch, Mutex};

/// A bidirectional stream connection.
#[async_trait]
pub trait Conn: Send + Sync {
    /// Read up to `buf.len()` bytes, blocking until at least one byte is
    /// available. `Ok(0)` means the peer closed its sending side.
    async fn read(&self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write the entire buffer.
    async fn write_all(&self, buf: &[u8]) -> io::Result<()>;

    /// Close the connection.
    ///
    /// Idempotent. Pending and subsequent reads and writes on this
    /// connection fail once close returns, including those issued by other
    /// tasks sharing the handle.
    async fn close(&self);

    /// Whether [`close`](Conn::close) has been called.
    fn is_closed(&self) -> bool;
}

fn closed_err() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "connection closed")
}

/// [`Conn`] adapter over any tokio byte stream.
///
/// Works for `TcpStream`, TLS streams, and in-memory duplex pipes alike.
/// The read and write halves sit behind independent async mutexes so the
/// two relay directions of a session can operate on the same connection
/// concurrently; a level-triggered close flag fails pending I/O the moment
/// either direction tears the session down.
pub struct StreamConn<S> {
    reader: Mutex<ReadHalf<S>>,
    writer: Mutex<WriteHalf<S>>,
    closed: watch::Sender<bool>,
}

impl<S: AsyncRead + AsyncWrite + Send> StreamConn<S> {
    /// Wrap a stream.
    pub fn new(stream: S) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        let (closed, _) = watch::channel(false);
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            closed,
        }
    }
}

#[async_trait]
impl<S: AsyncRead + AsyncWrite + Send> Conn for StreamConn<S> {
    async fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        let mut closed = self.closed.subscribe();
        tokio::select! {
            biased;
            _ = closed.wait_for(|&c| c) => Err(closed_err()),
            n = async { self.reader.lock().await.read(buf).await } => n,
        }
    }

    async fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut closed = self.closed.subscribe();
        tokio::select! {
            biased;
            _ = closed.wait_for(|&c| c) => Err(closed_err()),
            res = async { self.writer.lock().await.write_all(buf).await } => res,
        }
    }

    async fn close(&self) {
        if self.closed.send_replace(true) {
            return;
        }
        // FIN to the peer; the transport itself is released when the last
        // handle drops.
        let _ = self.writer.lock().await.shutdown().await;
    }

    fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}
