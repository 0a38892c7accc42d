//! UDP datagram channel and receive loop.
//!
//! Architecture:
//! - `DatagramChannel` owns one UDP socket bound to the configured address.
//! - [`DatagramChannel::run`] is the single worker: it waits for the next
//!   datagram, frames it, decodes it and applies it to completion before
//!   reading the next one, so events reach the host strictly in receipt order.
//! - The loop only ends when the shutdown future resolves.  A malformed
//!   datagram or a failed receive never stops it.
//!
//! # Why UDP? (for beginners)
//!
//! Each touch-pad gesture is independently meaningful: a lost or reordered
//! movement datagram is simply superseded by the next one.  UDP avoids TCP's
//! retransmission and head-of-line blocking, which would add latency to every
//! subsequent event just to deliver a stale one.

use std::future::Future;
use std::net::SocketAddr;

use infalsus_core::{decode, Datagram, RECV_BUFFER_SIZE};
use thiserror::Error;
use tokio::net::UdpSocket;
use tracing::{debug, info, trace, warn};

use crate::application::synthesize_input::{Disposition, InputSynthesizer};

/// Errors that can occur while setting up the channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The UDP socket could not be bound (e.g. the port is already in use).
    #[error("failed to bind UDP socket on {addr}: {source}")]
    BindFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The bound socket could not be prepared for async receiving.
    #[error("failed to set up UDP socket on {addr}: {source}")]
    SocketSetup {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Counters reported when the receive loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    /// Datagrams read from the socket.
    pub received: u64,
    /// Datagrams that produced a host input event.
    pub emitted: u64,
    /// Datagrams with nothing to inject (zero delta, invalid framing).
    pub no_op: u64,
    /// Datagrams discarded after a failed query, lookup or injection.
    pub dropped: u64,
    /// Datagrams longer than the payload capacity.
    pub truncated: u64,
    /// Failed socket reads.
    pub recv_errors: u64,
}

impl ReceiverStats {
    fn record(&mut self, disposition: Disposition, truncated: bool) {
        self.received += 1;
        if truncated {
            self.truncated += 1;
        }
        match disposition {
            Disposition::Emitted => self.emitted += 1,
            Disposition::NoOp => self.no_op += 1,
            Disposition::Dropped => self.dropped += 1,
        }
    }
}

/// The receiving end of the wire protocol.
pub struct DatagramChannel {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl DatagramChannel {
    /// Binds a UDP socket on `addr`.  Port 0 picks an ephemeral port.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::BindFailed`] if the address cannot be bound.
    /// - [`ChannelError::SocketSetup`] if the socket cannot be made
    ///   non-blocking or registered with the runtime.
    pub fn bind(addr: SocketAddr) -> Result<Self, ChannelError> {
        let std_socket =
            std::net::UdpSocket::bind(addr).map_err(|source| ChannelError::BindFailed { addr, source })?;
        let setup = |source| ChannelError::SocketSetup { addr, source };

        std_socket.set_nonblocking(true).map_err(setup)?;
        let socket = UdpSocket::from_std(std_socket).map_err(setup)?;
        let local_addr = socket.local_addr().map_err(setup)?;

        info!("listening on UDP {local_addr}");
        Ok(Self { socket, local_addr })
    }

    /// The address the socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Receives and applies datagrams until `shutdown` resolves.
    ///
    /// Returns the counters accumulated over the run.
    pub async fn run<F>(&self, synthesizer: &InputSynthesizer, shutdown: F) -> ReceiverStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let mut stats = ReceiverStats::default();

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    debug!("receive loop shutting down");
                    break;
                }

                result = self.socket.recv_from(&mut buf) => match result {
                    Ok((len, src)) => {
                        let (disposition, truncated) = process_datagram(synthesizer, &buf[..len]);
                        trace!(%src, len, ?disposition, "datagram processed");
                        stats.record(disposition, truncated);
                    }
                    Err(e) => {
                        // Oversized datagrams on Windows and ICMP port-unreachable
                        // reports surface here; neither affects later datagrams.
                        warn!("UDP receive error: {e}");
                        stats.recv_errors += 1;
                    }
                },
            }
        }

        stats
    }
}

/// Frames, decodes and applies one received datagram.
///
/// Returns what the synthesizer did and whether the datagram was truncated.
pub fn process_datagram(synthesizer: &InputSynthesizer, received: &[u8]) -> (Disposition, bool) {
    let datagram = Datagram::from_received(received);
    let action = decode(datagram.payload());
    if action.is_invalid() {
        trace!(len = datagram.payload().len(), "discarding unrecognized datagram");
    }
    (synthesizer.apply(&action), datagram.is_truncated())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::application::synthesize_input::SynthesizerOptions;
    use crate::infrastructure::input_sink::recording::RecordingInputSink;

    fn synthesizer() -> (InputSynthesizer, Arc<RecordingInputSink>) {
        let sink = Arc::new(RecordingInputSink::new());
        let synth = InputSynthesizer::new(sink.clone(), SynthesizerOptions::default());
        (synth, sink)
    }

    #[test]
    fn test_process_datagram_applies_decoded_action() {
        // Arrange
        let (synth, sink) = synthesizer();

        // Act
        let result = process_datagram(&synth, b"-6.5");

        // Assert
        assert_eq!(result, (Disposition::Emitted, false));
        assert_eq!(*sink.relative_moves.lock().unwrap(), vec![(-6, 0)]);
    }

    #[test]
    fn test_process_datagram_reports_truncation() {
        let (synth, sink) = synthesizer();
        let mut bytes = b"KDj".to_vec();
        bytes.resize(RECV_BUFFER_SIZE, b' ');

        let result = process_datagram(&synth, &bytes);

        assert_eq!(result, (Disposition::Emitted, true));
        assert_eq!(sink.key_events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_process_datagram_discards_unrecognized_payload() {
        let (synth, sink) = synthesizer();

        let result = process_datagram(&synth, b"Axyz\0KDs");

        assert_eq!(result, (Disposition::NoOp, false));
        assert_eq!(sink.event_count(), 0);
    }

    #[test]
    fn test_stats_record_counts_each_disposition() {
        let mut stats = ReceiverStats::default();
        stats.record(Disposition::Emitted, false);
        stats.record(Disposition::NoOp, true);
        stats.record(Disposition::Dropped, false);

        assert_eq!(
            stats,
            ReceiverStats {
                received: 3,
                emitted: 1,
                no_op: 1,
                dropped: 1,
                truncated: 1,
                recv_errors: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_bind_to_ephemeral_port_reports_real_port() {
        let channel = DatagramChannel::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        assert_ne!(channel.local_addr().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_to_taken_port_fails_with_bind_error() {
        // Arrange
        let first = DatagramChannel::bind("127.0.0.1:0".parse().unwrap()).unwrap();

        // Act
        let second = DatagramChannel::bind(first.local_addr());

        // Assert
        assert!(matches!(second, Err(ChannelError::BindFailed { .. })));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_with_no_traffic() {
        let (synth, _sink) = synthesizer();
        let channel = DatagramChannel::bind("127.0.0.1:0".parse().unwrap()).unwrap();

        let stats = tokio::time::timeout(
            Duration::from_secs(5),
            channel.run(&synth, std::future::ready(())),
        )
        .await
        .expect("run must return once shutdown resolves");

        assert_eq!(stats, ReceiverStats::default());
    }
}
