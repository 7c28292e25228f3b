//! One-directional byte relay between two connections.
//!
//! A [`pipe`] invocation copies bytes from a source connection to a
//! destination connection until the session ends. A full-duplex session is
//! two invocations running concurrently with the roles swapped, sharing the
//! same two connection handles. Either direction failing closes both
//! connections, so the peer direction's next read or write fails too and
//! the whole session unwinds with no half-open leftovers.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::transport::Conn;

/// Working-buffer size for one relay direction, in bytes.
///
/// Stays under the 16408-byte maximum record size common peer stacks
/// accept, leaving headroom for the stream header and authentication data
/// the outer layers add per record.
pub const PIPE_BUF_LEN: usize = 16378;

/// Copy bytes from `src` to `dst` until the session ends.
///
/// Each loop iteration reads between 1 and [`PIPE_BUF_LEN`] bytes from
/// `src` and writes them all to `dst`. When `src_read_timeout` is set, the
/// deadline is re-armed before every read; a source idle past it ends the
/// session, bounding how long a relay can wait on a peer that silently
/// vanished. EOF and any read or write error close **both** connections
/// before returning. Error kinds are not distinguished: any interruption
/// of a live relay is equally fatal to the session.
pub async fn pipe(dst: Arc<dyn Conn>, src: Arc<dyn Conn>, src_read_timeout: Option<Duration>) {
    let mut buf = vec![0u8; PIPE_BUF_LEN];

    loop {
        let read = match src_read_timeout {
            Some(limit) => match timeout(limit, src.read(&mut buf)).await {
                Ok(res) => res,
                Err(_) => Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "read deadline exceeded",
                )),
            },
            None => src.read(&mut buf).await,
        };

        let n = match read {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };

        if dst.write_all(&buf[..n]).await.is_err() {
            break;
        }
    }

    dst.close().await;
    src.close().await;
}

/// Run a full-duplex session between `a` and `b`.
///
/// Spawns one [`pipe`] per direction and returns once both have torn down.
/// `read_timeout` applies to each direction's source reads.
pub async fn pipe_session(a: Arc<dyn Conn>, b: Arc<dyn Conn>, read_timeout: Option<Duration>) {
    let forward = tokio::spawn(pipe(Arc::clone(&b), Arc::clone(&a), read_timeout));
    let backward = tokio::spawn(pipe(a, b, read_timeout));
    let _ = tokio::join!(forward, backward);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::StreamConn;

    use std::time::Instant;

    use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};

    fn conn_pair() -> (Arc<StreamConn<DuplexStream>>, DuplexStream) {
        let (local, remote) = duplex(64 * 1024);
        (Arc::new(StreamConn::new(local)), remote)
    }

    #[tokio::test]
    async fn test_copies_until_source_eof() {
        let (src, mut src_peer) = conn_pair();
        let (dst, mut dst_peer) = conn_pair();

        let relay = tokio::spawn(pipe(
            Arc::clone(&dst) as Arc<dyn Conn>,
            Arc::clone(&src) as Arc<dyn Conn>,
            None,
        ));

        // Spans several working-buffer rounds
        let payload: Vec<u8> = (0..40_000u32).map(|i| i as u8).collect();
        src_peer.write_all(&payload).await.unwrap();
        src_peer.shutdown().await.unwrap();
        drop(src_peer);

        let mut observed = Vec::new();
        dst_peer.read_to_end(&mut observed).await.unwrap();
        assert_eq!(observed, payload);

        relay.await.unwrap();
        assert!(src.is_closed());
        assert!(dst.is_closed());
    }

    #[tokio::test]
    async fn test_idle_source_times_out() {
        // Peers stay alive but never send
        let (src, _src_peer) = conn_pair();
        let (dst, _dst_peer) = conn_pair();

        let started = Instant::now();
        pipe(
            Arc::clone(&dst) as Arc<dyn Conn>,
            Arc::clone(&src) as Arc<dyn Conn>,
            Some(Duration::from_millis(100)),
        )
        .await;

        assert!(started.elapsed() >= Duration::from_millis(100));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(src.is_closed());
        assert!(dst.is_closed());
    }

    #[tokio::test]
    async fn test_write_failure_closes_both() {
        let (src, mut src_peer) = conn_pair();
        let (dst, dst_peer) = conn_pair();

        // Destination transport is already gone
        drop(dst_peer);

        let relay = tokio::spawn(pipe(
            Arc::clone(&dst) as Arc<dyn Conn>,
            Arc::clone(&src) as Arc<dyn Conn>,
            None,
        ));

        src_peer.write_all(b"doomed").await.unwrap();

        relay.await.unwrap();
        assert!(src.is_closed());
        assert!(dst.is_closed());
    }

    #[tokio::test]
    async fn test_peer_direction_torn_down_too() {
        // Two pipes share the same two connections, as in a real session.
        // Killing one direction's source must terminate the other direction
        // even though its own transport never failed.
        let (a, mut a_peer) = conn_pair();
        let (b, _b_peer) = conn_pair();

        let forward = tokio::spawn(pipe(
            Arc::clone(&b) as Arc<dyn Conn>,
            Arc::clone(&a) as Arc<dyn Conn>,
            None,
        ));
        let backward = tokio::spawn(pipe(
            Arc::clone(&a) as Arc<dyn Conn>,
            Arc::clone(&b) as Arc<dyn Conn>,
            None,
        ));

        a_peer.shutdown().await.unwrap();
        drop(a_peer);

        forward.await.unwrap();
        backward.await.unwrap();
        assert!(a.is_closed());
        assert!(b.is_closed());
    }

    #[tokio::test]
    async fn test_session_relays_both_directions() {
        let (a, mut a_peer) = conn_pair();
        let (b, mut b_peer) = conn_pair();

        let session = tokio::spawn(pipe_session(
            Arc::clone(&a) as Arc<dyn Conn>,
            Arc::clone(&b) as Arc<dyn Conn>,
            None,
        ));

        let mut buf = [0u8; 4];

        a_peer.write_all(b"ping").await.unwrap();
        b_peer.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"ping");

        b_peer.write_all(b"pong").await.unwrap();
        a_peer.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"pong");

        // One endpoint vanishing ends the whole session
        a_peer.shutdown().await.unwrap();
        drop(a_peer);

        session.await.unwrap();
        assert!(a.is_closed());
        assert!(b.is_closed());
    }
}
