//! Sends one operation to a camera, eg:
//!
//! ```sh
//! cargo run --features clap --example visca_cmd -- --port /dev/ttyUSB0 steer left
//! cargo run --features clap --example visca_cmd -- --port /dev/ttyUSB0 white-balance off 4
//! cargo run --features clap --example visca_cmd -- --port /dev/ttyUSB0 --query zoom-position
//! ```
use clap::Parser;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;
use visca::{
    protocol::{command::BaudRate, Inquiry},
    ControllerConfig, Operation, Result, ViscaController,
};

/// VISCA camera control.
#[derive(Debug, Parser)]
#[clap(verbatim_doc_comment)]
struct CliParser {
    /// Serial port the camera is connected to.
    #[clap(short, long)]
    pub port: String,

    /// Serial speed the camera is currently using.
    #[clap(short, long, default_value_t = 9600)]
    pub baud: u32,

    /// Seconds to wait for each reply.
    #[clap(long, default_value_t = 5)]
    pub timeout: u64,

    /// Send an inquiry after the operation.
    #[clap(short, long, value_enum)]
    pub query: Option<Inquiry>,

    /// Operation name, eg: `steer`, `flip`, `zoom-focus`.
    pub op: Option<String>,

    /// Operation arguments.
    #[clap(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .compact()
        .init();
    let opts = CliParser::parse();

    let config = ControllerConfig {
        baud_rate: BaudRate::try_from(opts.baud)?,
        response_timeout: Duration::from_secs(opts.timeout),
        ..Default::default()
    };
    let mut camera: ViscaController = ViscaController::with_config(config);
    camera.connect(&opts.port)?;

    if let Some(op) = &opts.op {
        let args: Vec<&str> = opts.args.iter().map(String::as_str).collect();
        let op = Operation::from_args(op, &args)?;
        if let Some(data) = camera.execute(op).await? {
            info!("reply: {}", hex::encode(data));
        }
    }

    if let Some(query) = opts.query {
        let data = camera.inquire(query).await?;
        info!("{query}: {}", hex::encode(data));
    }

    camera.disconnect()?;
    Ok(())
}
