#![doc = include_str!("../README.md")]

#[macro_use]
extern crate num_derive;

#[macro_use]
extern crate tracing;

pub mod codec;
pub mod command;
mod error;
pub mod packet;
pub mod reply;

pub use crate::{
    command::{Command, Inquiry},
    error::{CameraError, Error, ErrorCode},
    packet::{Frame, DEFAULT_ADDRESS, MAX_FRAME_LENGTH, TERMINATOR},
    reply::interpret,
};

/// Result type.
pub type Result<T = ()> = std::result::Result<T, Error>;
