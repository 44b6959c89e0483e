//! Input subsystem lifecycle and the reader-facing API

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use esp_idf_svc::hal::cpu::Core;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;

use gopad_input::{
    BatteryError, BatteryMonitor, BatteryState, Config, GamepadState, InputSubsystem, Key, Sampler,
    SamplingDriver,
};

use crate::hal::{self, EspInputInterface, EspMonotonic};

const INPUT_TASK_STACK_BYTES: usize = 4 * 1024;
const INPUT_TASK_PRIORITY: u8 = 5;

struct BatteryReader {
    monitor: BatteryMonitor,
    interface: EspInputInterface,
}

/// The one input context of the firmware.
///
/// Owns the shared published state, the battery monitor, and the sampling
/// task handle. Readers go through this object; the sampling task itself
/// is spawned by [`start`](Self::start) pinned to core 1 so tick timing is
/// not disturbed by the application core.
pub struct Input {
    config: Config,
    shared: Arc<InputSubsystem<EspMonotonic>>,
    battery: Mutex<BatteryReader>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Input {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            shared: Arc::new(InputSubsystem::new(&config, EspMonotonic)),
            battery: Mutex::new(BatteryReader {
                monitor: BatteryMonitor::new(&config),
                interface: EspInputInterface::new(),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Start periodic sampling. Logs and no-ops if already running.
    pub fn start(&self) {
        if !self.shared.try_start() {
            return;
        }
        hal::configure_pins();

        let mut spawn_config = ThreadSpawnConfiguration::default();
        spawn_config.stack_size = INPUT_TASK_STACK_BYTES;
        spawn_config.priority = INPUT_TASK_PRIORITY;
        spawn_config.inherit = false;
        spawn_config.pin_to_core = Some(Core::Core1);
        if let Err(err) = spawn_config.set() {
            log::warn!("Failed to configure input task spawn: {}", err);
        }

        let shared = Arc::clone(&self.shared);
        let config = self.config;
        let handle = std::thread::spawn(move || {
            let mut driver =
                SamplingDriver::new(EspInputInterface::new(), Sampler::new(&config), &shared);
            while shared.should_run() {
                driver.tick();
                FreeRtos::delay_ms(config.tick_period_ms);
            }
            shared.mark_stopped();
            log::info!("Input sampling stopped");
        });
        *self.worker.lock().unwrap() = Some(handle);

        // Restore defaults for threads spawned later.
        if let Err(err) = ThreadSpawnConfiguration::default().set() {
            log::warn!("Failed to restore thread spawn defaults: {}", err);
        }

        log::info!(
            "Input sampling started ({} ms tick, core 1)",
            self.config.tick_period_ms
        );
    }

    /// Request stop and wait for the sampling task to finish its
    /// in-progress tick. A later [`start`](Self::start) is supported.
    pub fn stop(&self) {
        self.shared.request_stop();
        if let Some(handle) = self.worker.lock().unwrap().take() {
            let _ = handle.join();
        }
    }

    /// Debounced state as of the most recently completed tick.
    pub fn read_gamepad(&self) -> GamepadState {
        self.shared.read_gamepad()
    }

    pub fn key_is_pressed(&self, key: Key) -> bool {
        self.shared.key_is_pressed(key)
    }

    /// Block the calling task until `key` reaches the requested state.
    pub fn wait_for_key(&self, key: Key, pressed: bool) {
        let mut delay = FreeRtos;
        self.shared.wait_for_key(key, pressed, &mut delay);
    }

    /// Bounded variant of [`wait_for_key`](Self::wait_for_key).
    pub fn wait_for_key_deadline(&self, key: Key, pressed: bool, timeout: Duration) -> bool {
        let mut delay = FreeRtos;
        self.shared
            .wait_for_key_deadline(key, pressed, &mut delay, timeout)
    }

    pub fn time_since_last_read(&self) -> Duration {
        self.shared.time_since_last_read()
    }

    /// Read the battery divider channel.
    ///
    /// Serialized behind a mutex so concurrent callers cannot lose
    /// smoothing accumulator updates.
    pub fn read_battery(&self) -> Result<BatteryState, BatteryError> {
        let mut reader = self.battery.lock().unwrap();
        let BatteryReader { monitor, interface } = &mut *reader;
        monitor.read(interface)
    }
}
