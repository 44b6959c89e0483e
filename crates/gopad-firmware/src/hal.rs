//! ESP-IDF hardware access for the ODROID-GO input pins

use esp_idf_svc::sys;

use gopad_input::{Axis, GamepadState, InputInterface, Key, Monotonic};

const ADC_WIDTH_BIT_12: u32 = 3;
const ADC_ATTEN_DB_11: u32 = 3;
const ADC_DEFAULT_VREF_MV: u32 = 1100;

const ADC_CHANNEL_X: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_6; // GPIO34
const ADC_CHANNEL_Y: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_7; // GPIO35
const ADC_CHANNEL_BATTERY: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_0; // GPIO36

const GPIO_MENU: i32 = 13;
const GPIO_VOLUME: i32 = 0;
const GPIO_SELECT: i32 = 27;
const GPIO_START: i32 = 39;
const GPIO_A: i32 = 32;
const GPIO_B: i32 = 33;

/// Configure the stick ADC channels and button GPIOs.
///
/// Called once per sampling start. GPIO0 (Volume) has an external pull-up
/// on the board and GPIO39 (Start) is input-only without internal pulls,
/// so neither gets a pull mode here.
pub fn configure_pins() {
    unsafe {
        sys::adc1_config_width(ADC_WIDTH_BIT_12);
        sys::adc1_config_channel_atten(ADC_CHANNEL_X, ADC_ATTEN_DB_11);
        sys::adc1_config_channel_atten(ADC_CHANNEL_Y, ADC_ATTEN_DB_11);

        for (pin, pull_up) in [
            (GPIO_MENU, true),
            (GPIO_VOLUME, false),
            (GPIO_SELECT, true),
            (GPIO_START, false),
            (GPIO_A, true),
            (GPIO_B, true),
        ] {
            sys::gpio_set_direction(pin, sys::gpio_mode_t_GPIO_MODE_INPUT);
            if pull_up {
                sys::gpio_set_pull_mode(pin, sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
            }
        }
    }
}

fn button_gpio(key: Key) -> i32 {
    match key {
        Key::Menu => GPIO_MENU,
        Key::Volume => GPIO_VOLUME,
        Key::Select => GPIO_SELECT,
        Key::Start => GPIO_START,
        Key::A => GPIO_A,
        Key::B => GPIO_B,
        Key::Up | Key::Down | Key::Left | Key::Right => {
            unreachable!("stick directions have no GPIO line")
        }
    }
}

/// Battery ADC calibration failures.
#[derive(Debug)]
pub enum CalibrationError {
    /// Characterization produced no usable reference voltage.
    MissingVref,
}

impl core::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CalibrationError::MissingVref => write!(f, "ADC reference voltage unavailable"),
        }
    }
}

impl core::error::Error for CalibrationError {}

/// Raw ADC/GPIO access implementing the input core's hardware trait.
pub struct EspInputInterface {
    adc_chars: sys::esp_adc_cal_characteristics_t,
}

impl EspInputInterface {
    pub fn new() -> Self {
        Self {
            adc_chars: Default::default(),
        }
    }
}

impl InputInterface for EspInputInterface {
    type Error = CalibrationError;

    fn read_axis(&mut self, axis: Axis) -> u16 {
        let channel = match axis {
            Axis::X => ADC_CHANNEL_X,
            Axis::Y => ADC_CHANNEL_Y,
        };
        let raw = unsafe { sys::adc1_get_raw(channel) };
        raw.max(0) as u16
    }

    fn read_level(&mut self, key: Key) -> bool {
        unsafe { sys::gpio_get_level(button_gpio(key)) != 0 }
    }

    fn read_external(&mut self) -> GamepadState {
        // The GO does not bring out enough GPIO for both the external DAC
        // and a shift-register controller, and the controller protocol was
        // never specified. Unsupported until it is.
        GamepadState::empty()
    }

    fn calibrate_battery(&mut self) -> Result<(), CalibrationError> {
        unsafe {
            sys::adc1_config_width(ADC_WIDTH_BIT_12);
            sys::adc1_config_channel_atten(ADC_CHANNEL_BATTERY, ADC_ATTEN_DB_11);
            sys::esp_adc_cal_characterize(
                sys::adc_unit_t_ADC_UNIT_1,
                ADC_ATTEN_DB_11,
                ADC_WIDTH_BIT_12,
                ADC_DEFAULT_VREF_MV,
                &mut self.adc_chars,
            );
        }
        if self.adc_chars.vref == 0 {
            return Err(CalibrationError::MissingVref);
        }
        Ok(())
    }

    fn read_battery_millivolts(&mut self) -> u32 {
        let raw = unsafe { sys::adc1_get_raw(ADC_CHANNEL_BATTERY) };
        unsafe { sys::esp_adc_cal_raw_to_voltage(raw.max(0) as u32, &self.adc_chars) }
    }
}

/// Monotonic clock over `esp_timer_get_time`.
pub struct EspMonotonic;

impl Monotonic for EspMonotonic {
    fn now_micros(&self) -> i64 {
        unsafe { sys::esp_timer_get_time() }
    }
}
