mod hal;
mod input;

use std::time::Duration;

use esp_idf_svc::hal::delay::FreeRtos;

use gopad_input::{Builder, GamepadState, Key};

use input::Input;

/// Main-loop iterations between battery reports (~5 s at 50 ms).
const BATTERY_REPORT_ITERATIONS: u32 = 100;

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Builder::new()
        .build()
        .expect("default input configuration is valid");

    let input = Input::new(config);
    input.start();
    // Double start is a logged no-op, never fatal.
    input.start();

    log::info!("Ready. Menu+Select restarts sampling.");

    let mut last = GamepadState::empty();
    let mut iterations = 0u32;

    loop {
        let state = input.read_gamepad();
        if state != last {
            log::info!("Gamepad: {:?}", state);
            last = state;
        }

        if state.contains(Key::Menu) && state.contains(Key::Select) {
            log::info!("Restarting input sampling...");
            input.stop();
            FreeRtos::delay_ms(500);
            input.start();
            if input.key_is_pressed(Key::Menu) {
                input.wait_for_key(Key::Menu, false);
            }
            if !input.wait_for_key_deadline(Key::Select, false, Duration::from_secs(2)) {
                log::warn!("Select still held after restart");
            }
        }

        iterations += 1;
        if iterations >= BATTERY_REPORT_ITERATIONS {
            iterations = 0;
            match input.read_battery() {
                Ok(battery) => log::info!(
                    "Battery: {} mV ({}%), last gamepad read {} ms ago",
                    battery.millivolts,
                    battery.percentage,
                    input.time_since_last_read().as_millis()
                ),
                Err(err) => log::warn!("Battery read failed: {}", err),
            }
        }

        FreeRtos::delay_ms(50);
    }
}
