#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

mod channel;
mod controller;
mod error;
mod operation;
mod state;
#[cfg(test)]
mod test_util;

pub use {
    crate::{
        channel::{open_serial, ViscaChannel, ViscaLink, DEFAULT_RESPONSE_TIMEOUT},
        controller::{ControllerConfig, ViscaController, DEFAULT_SETTLE_DELAY},
        error::Error,
        operation::{Config, Exposure, Gamma, LensMove, Operation, Toggle, WhiteBalance},
        state::{CameraState, ToggleMode},
    },
    visca_protocol as protocol,
};
pub type Result<T = ()> = std::result::Result<T, Error>;
