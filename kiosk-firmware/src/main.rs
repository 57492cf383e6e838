//! Kiosk - Payment Terminal Controller
//!
//! Drives a 2x16 character LCD and a hex keypad at the till, and shows
//! payment and identification QR codes on a remote e-ink display.
//!
//! On a development host the LCD is drawn on stdout and the keypad is
//! typed on stdin; logs go to stderr.

use std::io::stdout;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context};
use clap::Parser;
use embassy_executor::Executor;
use static_cell::StaticCell;
use tracing::{error, info};

use kiosk_core::controller::ControllerSettings;
use kiosk_display::DisplaySink;
use kiosk_drivers::Keypad;
use kiosk_hal_console::{spawn_stdin_reader, ConsoleLcd, EdgeLine, LineBank};

use crate::artifact::QrRenderer;
use crate::ident::SimulatedProvider;
use crate::io::{BoardIo, KioskBoardIo};
use crate::logging::LogLevel;
use crate::remote::RemoteDisplay;
use crate::tasks::{ConsoleKeypad, ConsoleSink};

mod artifact;
mod channels;
mod config;
mod ident;
mod io;
mod logging;
mod remote;
mod tasks;

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[derive(Debug, Parser)]
#[command(version, about = "Kiosk payment terminal controller")]
struct Args {
    /// Configuration file; the built-in configuration is used if missing
    #[arg(short, long, default_value = "kiosk.toml")]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Write JSON logs to this file instead of stderr
    #[arg(long)]
    log_json: Option<PathBuf>,
}

/// Everything the tasks need, built before the executor starts
struct Board {
    sink: ConsoleSink,
    keypad: ConsoleKeypad,
    io: BoardIo,
    settings: ControllerSettings,
    poll_interval_ms: u32,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_level, args.log_json.as_deref()) {
        eprintln!("kiosk: {:#}", e);
        process::exit(1);
    }

    let board = match setup(&args) {
        Ok(board) => board,
        Err(e) => {
            error!("startup failed: {:#}", e);
            process::exit(1);
        }
    };

    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner.spawn(tasks::display_task(board.sink)).unwrap();
        spawner
            .spawn(tasks::keypad_task(board.keypad, board.poll_interval_ms))
            .unwrap();
        spawner
            .spawn(tasks::controller_task(board.settings, board.io))
            .unwrap();

        info!("All tasks spawned, kiosk running");
    })
}

fn setup(args: &Args) -> anyhow::Result<Board> {
    info!(version = env!("CARGO_PKG_VERSION"), "kiosk starting");

    let config = config::load(&args.config).context("loading configuration")?;
    let kiosk = &config.kiosk;

    let sink = DisplaySink::new(ConsoleLcd::new(stdout()))
        .map_err(|e| anyhow!("display init failed: {:?}", e))?;

    let bank = LineBank::new();
    let keypad = Keypad::new(
        bank.data_lines()?,
        bank.edge_line(EdgeLine::Select)?,
        bank.edge_line(EdgeLine::Identification)?,
        bank.edge_line(EdgeLine::Settings)?,
        &kiosk.keypad,
    );
    spawn_stdin_reader(bank)?;

    let io = KioskBoardIo::new(
        QrRenderer::new(&kiosk.payment, &kiosk.remote_display),
        RemoteDisplay::new(&kiosk.remote_display),
        SimulatedProvider::with_channel(config.simulation.clone()),
    );

    Ok(Board {
        sink,
        keypad,
        io,
        settings: kiosk.controller_settings(),
        poll_interval_ms: kiosk.keypad.poll_interval_ms,
    })
}
