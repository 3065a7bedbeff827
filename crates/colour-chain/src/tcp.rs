//! TCP network implementation.
//!
//! Wire format: each message is a 4-byte big-endian length prefix
//! followed by a CBOR-encoded [`Request`] or [`Response`]. Peers are
//! tried in list order; the first one that answers wins, and per-peer
//! failures are logged rather than surfaced until every peer has failed.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use colour_core::{canonical, Block, BlockHash};

use crate::channel::HeadRef;
use crate::error::{ChainError, Result};
use crate::network::Network;
use crate::peers::PeerSet;

/// Port the Colour node protocol listens on.
pub const DEFAULT_PORT: u16 = 22522;

/// Maximum accepted frame size. Larger frames are treated as protocol
/// errors rather than allocated.
const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize, Deserialize)]
enum Request {
    Head { channel: String },
    Block { hash: BlockHash },
    Announce { head: HeadRef, blocks: Vec<Block> },
}

#[derive(Debug, Serialize, Deserialize)]
enum Response {
    Head(HeadRef),
    Block(Block),
    Ack,
    Error(String),
}

/// Network backed by TCP connections to a list of peer hosts.
pub struct TcpNetwork {
    peers: PeerSet,
    timeout: Duration,
}

impl TcpNetwork {
    /// Create a network over the given peers with the default timeout.
    pub fn new(peers: PeerSet) -> Self {
        Self {
            peers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-connection timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send a request to one peer and read its response.
    fn exchange_with(&self, host: &str, request: &Request) -> Result<Response> {
        let addr = if host.contains(':') {
            host.to_string()
        } else {
            format!("{host}:{DEFAULT_PORT}")
        };
        let sockaddr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| ChainError::Network(format!("cannot resolve {addr}")))?;
        let mut stream = TcpStream::connect_timeout(&sockaddr, self.timeout)?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;

        write_frame(&mut stream, request)?;
        read_frame(&mut stream)
    }

    /// Try each peer in order until one succeeds.
    fn exchange(&self, request: &Request) -> Result<Response> {
        if self.peers.is_empty() {
            return Err(ChainError::Network("no peers configured".to_string()));
        }
        let mut last = None;
        for host in &self.peers {
            match self.exchange_with(host, request) {
                Ok(Response::Error(message)) => {
                    debug!(host = %host, %message, "peer returned error");
                    last = Some(ChainError::Network(message));
                }
                Ok(response) => return Ok(response),
                Err(err) => {
                    warn!(host = %host, error = %err, "peer request failed");
                    last = Some(err);
                }
            }
        }
        Err(last.unwrap_or_else(|| ChainError::Network("no peers configured".to_string())))
    }
}

fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let bytes = canonical::to_vec(message)?;
    let len = u32::try_from(bytes.len())
        .map_err(|_| ChainError::Network("frame too large".to_string()))?;
    if len > MAX_FRAME_LEN {
        return Err(ChainError::Network("frame too large".to_string()));
    }
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

fn read_frame<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> Result<T> {
    let mut len_bytes = [0u8; 4];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_be_bytes(len_bytes);
    if len > MAX_FRAME_LEN {
        return Err(ChainError::Network(format!("frame of {len} bytes refused")));
    }
    let mut bytes = vec![0u8; len as usize];
    reader.read_exact(&mut bytes)?;
    Ok(canonical::from_slice(&bytes)?)
}

impl Network for TcpNetwork {
    fn head(&self, channel: &str) -> Result<HeadRef> {
        match self.exchange(&Request::Head {
            channel: channel.to_string(),
        })? {
            Response::Head(head) => Ok(head),
            other => Err(ChainError::Network(format!(
                "unexpected response to head request: {other:?}"
            ))),
        }
    }

    fn block(&self, hash: &BlockHash) -> Result<Block> {
        match self.exchange(&Request::Block { hash: *hash })? {
            Response::Block(block) => Ok(block),
            other => Err(ChainError::Network(format!(
                "unexpected response to block request: {other:?}"
            ))),
        }
    }

    fn announce(&self, head: &HeadRef, blocks: &[Block]) -> Result<()> {
        match self.exchange(&Request::Announce {
            head: head.clone(),
            blocks: blocks.to_vec(),
        })? {
            Response::Ack => Ok(()),
            other => Err(ChainError::Network(format!(
                "unexpected response to announce: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_frame_roundtrip() {
        let request = Request::Head {
            channel: "colour-canvas".to_string(),
        };
        let mut buffer = Vec::new();
        write_frame(&mut buffer, &request).unwrap();
        assert_eq!(
            u32::from_be_bytes(buffer[..4].try_into().unwrap()) as usize,
            buffer.len() - 4
        );

        let decoded: Request = read_frame(&mut Cursor::new(&buffer)).unwrap();
        match decoded {
            Request::Head { channel } => assert_eq!(channel, "colour-canvas"),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_frame_refused() {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(&(MAX_FRAME_LEN + 1).to_be_bytes());
        let result: Result<Request> = read_frame(&mut Cursor::new(&buffer));
        assert!(matches!(result, Err(ChainError::Network(_))));
    }

    #[test]
    fn test_truncated_frame_errors() {
        let mut buffer = Vec::new();
        write_frame(
            &mut buffer,
            &Request::Head {
                channel: "c".to_string(),
            },
        )
        .unwrap();
        buffer.truncate(buffer.len() - 1);
        let result: Result<Request> = read_frame(&mut Cursor::new(&buffer));
        assert!(result.is_err());
    }

    #[test]
    fn test_no_peers_is_a_network_error() {
        let network = TcpNetwork::new(PeerSet::new());
        assert!(matches!(
            network.head("c"),
            Err(ChainError::Network(_))
        ));
    }
}
