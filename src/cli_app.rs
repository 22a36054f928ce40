// cli_app.rs
use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use tracing::{error, info, warn};

use crate::{
    config::{AppConfig, default_config_path},
    cycle::{CycleConfig, PublishCycle},
    devices::DeviceHandles,
    error::ReaderError,
    gilrs_backend::GilrsBackend,
    simulate::{SimulatedBackend, Sweep},
    transport::UdpPublisher,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub simulate: bool,
    pub verbose: bool,
}

impl CliArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut out = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--simulate" => out.simulate = true,
                "--verbose" | "-v" => out.verbose = true,
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    out.config = Some(PathBuf::from(path));
                }
                other => anyhow::bail!("unknown argument: {other}"),
            }
        }
        Ok(out)
    }
}

/// Owns the driving loop: one publish cycle per tick until Ctrl+C.
pub struct CliApp {
    cfg: AppConfig,
    period: Duration,
    simulate: bool,
    running_signal: Arc<AtomicBool>,
}

impl CliApp {
    pub fn new(args: &CliArgs) -> anyhow::Result<Self> {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let mut cfg = AppConfig::load_from(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        if args.simulate {
            cfg.emit_platform_signals = true;
        }
        let period = cfg.publish_period()?;

        info!("Driver input reader");
        info!("----------------------------------------");
        info!("Config: {}", path.display());
        info!("Publisher: {}", cfg.publisher.address);
        info!("Topic: {}", cfg.publisher.topic);
        info!("Rate: {} Hz", cfg.publish_rate_hz);

        Ok(CliApp {
            cfg,
            period,
            simulate: args.simulate,
            running_signal: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        let r = self.running_signal.clone();
        ctrlc::set_handler(move || {
            if r.load(Ordering::SeqCst) {
                info!("Ctrl+C pressed. Stopping...");
                r.store(false, Ordering::SeqCst);
            } else {
                warn!("Ctrl+C pressed again. Already stopping.");
            }
        })?;

        let transport = UdpPublisher::connect(&self.cfg.publisher.address)?;
        let cycle_cfg = CycleConfig {
            topic: self.cfg.publisher.topic.clone(),
            emit_platform_signals: self.cfg.emit_platform_signals,
            axes: self.cfg.axes,
        };

        if self.simulate {
            info!("Simulating devices, no hardware is read.");
            let backend = SimulatedBackend::from_table(&self.cfg.devices);
            let devices = DeviceHandles::bind(backend, &self.cfg.devices)?;
            let mut cycle = PublishCycle::new(devices, transport, cycle_cfg);
            let mut sweep = Sweep::new();
            self.drive(|now| {
                let axes = *cycle.axes();
                sweep.apply(cycle.devices_mut(), &axes);
                sweep.advance();
                cycle.run_once(now).map(|_| ())
            })?;
        } else {
            let devices = bind_hardware(&self.cfg)?;
            let mut cycle = PublishCycle::new(devices, transport, cycle_cfg);
            self.drive(|now| cycle.run_once(now).map(|_| ()))?;
        }

        info!("Stopped.");
        Ok(())
    }

    /// Tick `step` at the configured rate. Transport errors are logged and
    /// the next tick retries with fresh inputs; anything else ends the loop.
    fn drive<F>(&self, mut step: F) -> Result<(), ReaderError>
    where
        F: FnMut(Instant) -> Result<(), ReaderError>,
    {
        info!("Running. Press Ctrl+C to stop.");

        while self.running_signal.load(Ordering::SeqCst) {
            let started = Instant::now();
            match step(started) {
                Ok(()) => {}
                Err(ReaderError::Transport(e)) => warn!("publish failed: {e}"),
                Err(e) => {
                    error!("cycle failed: {e}");
                    return Err(e);
                }
            }
            if let Some(rest) = self.period.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        Ok(())
    }
}

fn bind_hardware(cfg: &AppConfig) -> anyhow::Result<DeviceHandles<GilrsBackend>> {
    let backend = GilrsBackend::new()?;
    match DeviceHandles::bind(backend, &cfg.devices) {
        Ok(devices) => Ok(devices),
        Err(ReaderError::DeviceMissing { role, detected }) => {
            error!("A critical input is missing: no {role} device");
            for name in &detected {
                error!("\tdetected: {name}");
            }
            Err(ReaderError::DeviceMissing { role, detected }.into())
        }
        Err(e) => Err(e.into()),
    }
}
