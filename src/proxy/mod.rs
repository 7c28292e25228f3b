//! Steady-state data plane: the relay loop run once a proxied session is
//! established.

mod relay;

pub use relay::{pipe, pipe_session, PIPE_BUF_LEN};
