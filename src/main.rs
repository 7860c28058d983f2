/*
 *  main.rs
 *
 *  Wiener Uhr - es ist viertel Drei
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::Context;
use env_logger::Env;
use log::{info, warn};
use std::time::Instant;

#[cfg(unix)] // Only compile this block on Unix-like systems
use tokio::signal::unix::{signal, SignalKind}; // Import specific Unix signals

use wiener_uhr::clock::{self, TickOutcome, WienerUhr};
use wiener_uhr::config::{self, Cli, Config};
use wiener_uhr::display::{ConsoleRenderer, MockRenderer, Renderer};
use wiener_uhr::timesource::{FallbackClock, NtpClock, RtcClock};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
#[cfg(unix)]
async fn signal_handler() -> anyhow::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

async fn serve<R: Renderer>(
    cli: &Cli,
    cfg: &Config,
    renderer: R,
    source: &mut FallbackClock,
) -> anyhow::Result<()> {
    let mut uhr = WienerUhr::new(cfg.clock_settings(), renderer);

    if cli.once {
        match uhr.tick(source.read())? {
            TickOutcome::Skipped => warn!("No valid time available"),
            TickOutcome::Unchanged => {}
            TickOutcome::Redrawn { lines, brightness } => {
                info!("{} (brightness {})", lines, brightness);
            }
        }
        return Ok(());
    }

    // Main application loop
    tokio::select! {
        res = signal_handler() => {
            res.context("installing signal handlers")?;
        }
        _ = clock::run(&mut uhr, source) => {}
    }

    uhr.clear().context("clearing display")?;
    info!("Clock stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (cli, cfg) = config::load().context("loading configuration")?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        println!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} - es ist viertel Drei", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let ntp = NtpClock::new(cfg.ntp_settings()).context("configuring network time")?;
    let mut source = FallbackClock::new(ntp, RtcClock::new(), cfg.sync_rtc());

    if source.ntp().is_enabled() {
        info!("Initial NTP sync with {}", source.ntp().settings().server);
    }
    source.resync(Instant::now()).await;
    source.status().log();

    if cli.dry_run {
        let renderer = MockRenderer::new();
        serve(&cli, &cfg, renderer.clone(), &mut source).await?;
        info!("Dry run recorded {} frame(s)", renderer.frame_count());
    } else {
        let renderer = ConsoleRenderer::stdout(cfg.text_layout());
        serve(&cli, &cfg, renderer, &mut source).await?;
    }

    Ok(())
}
