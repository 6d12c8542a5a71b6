#![cfg_attr(not(windows), allow(dead_code))]

pub mod adapter_selection;
pub mod error;
pub mod fence_counter;
pub mod frame_loop;
pub mod launch_options;
pub mod teardown;
pub mod transitions;
pub mod vertex;
pub mod window_event;

#[cfg(windows)]
pub mod create_window;
#[cfg(windows)]
pub mod message_pump;
#[cfg(windows)]
pub mod run;
#[cfg(windows)]
pub mod triangle;
#[cfg(windows)]
pub mod window_class;

use error::AppResult;
use launch_options::LaunchOptions;
use tracing::info;

#[cfg(windows)]
use run::run;

pub fn main() -> AppResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::SubscriberBuilder::default()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false)
        .init();

    let options = LaunchOptions::from_env();
    info!(?options, "starting");
    run(&options)
}

#[cfg(not(windows))]
fn run(_options: &LaunchOptions) -> AppResult<()> {
    Err(error::StartupError::UnsupportedPlatform.into())
}
