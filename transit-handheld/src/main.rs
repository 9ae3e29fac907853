use std::io::{BufRead, IsTerminal};
use std::sync::mpsc::{self, Sender};

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use transit_handheld::cache::EntityCache;
use transit_handheld::catalog::{CatalogClient, MockTransport, ReqwestTransport, Transport};
use transit_handheld::clock::SystemClock;
use transit_handheld::config::DeviceConfig;
use transit_handheld::device::Device;
use transit_handheld::input::{Button, Press, ScriptedPins};
use transit_handheld::nav::NavigationController;
use transit_handheld::store::FileBlobStore;
use transit_handheld::ui::TerminalPresenter;

/// SELECT hold sent by `h` (past the long-press threshold).
const LONG_HOLD_MS: u64 = 1_200;

/// SELECT hold sent by `c` (past the clear threshold).
const CLEAR_HOLD_MS: u64 = 10_500;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("transit_handheld=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = DeviceConfig::from_env()?;
    info!(base_url = %config.base_url, data_dir = %config.data_dir.display(), "configuration loaded");

    match &config.mock_dir {
        Some(dir) => {
            let transport = MockTransport::from_dir(dir)?;
            run(transport, &config)
        }
        None => {
            let transport =
                ReqwestTransport::new(config.timeout_secs, config.accept_invalid_certs)?;
            run(transport, &config)
        }
    }
}

fn run<T: Transport>(transport: T, config: &DeviceConfig) -> Result<(), BoxError> {
    let catalog = CatalogClient::new(transport, config.base_url.clone())?;
    let cache = EntityCache::new(FileBlobStore::open(&config.data_dir)?);
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let presenter = TerminalPresenter::new(stdout).with_color(color);
    let clock = SystemClock::new();

    let controller = NavigationController::new(catalog, cache, presenter, clock, config.nav);

    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || read_commands(tx));
    let pins = ScriptedPins::new(rx, clock);

    eprintln!("keys: n = NEXT, s = SELECT, h = hold SELECT, c = clear cache, q = quit");
    let mut device = Device::new(controller, pins, config.gesture)
        .with_timing(config.tick_ms, config.offline_backoff_ms);
    device.run();
    Ok(())
}

/// Map stdin keys to button presses until `q` or end of input.
fn read_commands(tx: Sender<Press>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        for key in line.chars().filter(|c| !c.is_whitespace()) {
            let press = match key {
                'n' => Press::tap(Button::Next),
                's' => Press::tap(Button::Select),
                'h' => Press::hold(Button::Select, LONG_HOLD_MS),
                'c' => Press::hold(Button::Select, CLEAR_HOLD_MS),
                'q' => return,
                other => {
                    warn!(key = %other, "unknown key");
                    continue;
                }
            };
            if tx.send(press).is_err() {
                return;
            }
        }
    }
}
