//! In-memory camera for tests.
use crate::{channel::ViscaLink, protocol::command::BaudRate, Result};
use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream, ReadBuf},
    task::JoinHandle,
};

/// Completion reply from camera 1.
pub const COMPLETION: &[u8] = &[0x90, 0x50, 0xff];

/// Link end used by the code under test, which remembers baud rate changes.
pub struct TestLink {
    inner: DuplexStream,
    pub baud_rates: Vec<BaudRate>,
}

impl ViscaLink for TestLink {
    fn set_baud_rate(&mut self, baud_rate: BaudRate) -> Result {
        self.baud_rates.push(baud_rate);
        Ok(())
    }
}

impl AsyncRead for TestLink {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for TestLink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

/// Makes a connected pair of a [TestLink] and the camera's end.
pub fn link() -> (TestLink, DuplexStream) {
    let (a, b) = tokio::io::duplex(256);
    (
        TestLink {
            inner: a,
            baud_rates: Vec::new(),
        },
        b,
    )
}

/// Runs a camera which answers each frame it receives with the next reply in
/// `replies`.
///
/// Once `replies` runs out, frames are still collected but never answered.
/// The task finishes when the other end of the link is dropped, and returns
/// every frame received.
pub fn spawn_camera(io: DuplexStream, replies: Vec<Vec<u8>>) -> JoinHandle<Vec<Vec<u8>>> {
    tokio::spawn(async move {
        let mut io = BufReader::new(io);
        let mut replies = replies.into_iter();
        let mut frames = Vec::new();
        loop {
            let mut frame = Vec::new();
            match io.read_until(0xff, &mut frame).await {
                Ok(0) | Err(_) => break,
                Ok(_) => (),
            }
            frames.push(frame);
            if let Some(reply) = replies.next() {
                if io.get_mut().write_all(&reply).await.is_err() {
                    break;
                }
            }
        }
        frames
    })
}

/// Decodes a list of hex strings.
pub fn frames(h: &[&str]) -> Vec<Vec<u8>> {
    h.iter()
        .map(|f| hex::decode(f).expect("bad hex in test"))
        .collect()
}
