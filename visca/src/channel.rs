//! Transport layer for VISCA over a serial link.
//!
//! The protocol has no request IDs, so only one message may be in flight at
//! a time: [ViscaChannel::send] writes a frame and waits for the reply
//! before returning.
//!
//! ## Serial parameters
//!
//! 9600 or 115200 baud, 8 data bits, no parity, 1 stop bit, no flow control.
//! Cameras start at 9600 baud.
use crate::{
    protocol::{
        command::BaudRate, interpret, packet::is_inquiry, Frame, DEFAULT_ADDRESS, TERMINATOR,
    },
    Error, Result,
};
use std::time::Duration;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};

/// Default time to wait for a complete reply.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// A byte stream connected to a camera.
pub trait ViscaLink: AsyncRead + AsyncWrite + Unpin + Send {
    /// Changes the host side of the link to a new speed.
    fn set_baud_rate(&mut self, baud_rate: BaudRate) -> Result;
}

impl ViscaLink for SerialStream {
    fn set_baud_rate(&mut self, baud_rate: BaudRate) -> Result {
        tokio_serial::SerialPort::set_baud_rate(self, baud_rate.bits_per_second())?;
        Ok(())
    }
}

/// Opens a serial port with VISCA's line settings.
pub fn open_serial(port: &str, baud_rate: BaudRate) -> Result<SerialStream> {
    let link = tokio_serial::new(port, baud_rate.bits_per_second())
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open_native_async()?;
    Ok(link)
}

/// A link to one camera, carrying one message at a time.
pub struct ViscaChannel<L = SerialStream> {
    link: Option<BufReader<L>>,
    address: u8,
    timeout: Duration,
}

impl<L: ViscaLink> ViscaChannel<L> {
    pub fn new(timeout: Duration) -> Self {
        Self {
            link: None,
            address: DEFAULT_ADDRESS,
            timeout,
        }
    }

    /// Starts using `link`, replacing any existing link.
    ///
    /// The camera address goes back to [DEFAULT_ADDRESS].
    pub fn attach(&mut self, link: L) {
        self.link = Some(BufReader::new(link));
        self.address = DEFAULT_ADDRESS;
    }

    /// Stops using the current link, and returns it.
    ///
    /// Any unread bytes are discarded.
    pub fn detach(&mut self) -> Option<L> {
        self.link.take().map(BufReader::into_inner)
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    /// The address byte sent at the start of each frame.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn set_address(&mut self, address: u8) {
        debug!("camera address now {address:#04x}");
        self.address = address;
    }

    /// Changes the host side speed of the link.
    pub fn set_baud_rate(&mut self, baud_rate: BaudRate) -> Result {
        let link = self.link.as_mut().ok_or(Error::NotConnected)?;
        info!("switching link to {baud_rate} baud");
        link.get_mut().set_baud_rate(baud_rate)
    }

    /// Sends a payload to the camera, and waits for its reply.
    ///
    /// Returns the reply data for inquiries, or an empty `Vec` for commands.
    ///
    /// ## Errors
    ///
    /// * [`Error::NotConnected`] when there is no link; nothing is sent.
    /// * [`Error::Timeout`] when there is no complete reply in time. The
    ///   link should be reconnected after this, as a late reply would be
    ///   mistaken for the reply to the next message.
    /// * [`Error::Protocol`] when the camera returns an error, or the reply
    ///   doesn't make sense.
    pub async fn send(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
        let address = self.address;
        let timeout = self.timeout;
        let link = self.link.as_mut().ok_or(Error::NotConnected)?;

        let frame = Frame::new(address, payload);
        trace!(">>> {frame:?}");
        link.write_all(frame.as_bytes()).await?;
        link.flush().await?;

        let reply = match tokio::time::timeout(timeout, recv_frame(link)).await {
            Ok(reply) => reply?,
            Err(_) => {
                error!("no reply to {frame:?} after {timeout:?}");
                return Err(Error::Timeout);
            }
        };
        trace!("<<< {reply:?}");

        Ok(interpret(reply.payload(), is_inquiry(payload))?)
    }
}

/// Reads one frame, up to and including the terminator.
///
/// The link closing before the terminator is a malformed reply.
async fn recv_frame<R: AsyncBufRead + Unpin>(r: &mut R) -> Result<Frame> {
    let mut b = Vec::new();
    if r.read_until(TERMINATOR, &mut b).await? == 0 {
        warn!("link closed while waiting for reply");
    }
    Ok(Frame::from_bytes(b)?)
}
