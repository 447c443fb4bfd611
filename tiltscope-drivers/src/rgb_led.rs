//! RGB LED on three PWM channels

use embedded_hal::pwm::SetDutyCycle;

use tiltscope_core::traits::output::{check_percent, scale_pulse};
use tiltscope_core::traits::{OutputError, RgbOutput};

/// Which PWM level lights the LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// High duty lights the LED (common cathode)
    #[default]
    ActiveHigh,
    /// Low duty lights the LED (common anode)
    ActiveLow,
}

/// Three-channel LED with per-channel intensity and a shared brightness
pub struct PwmRgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    polarity: Polarity,
}

impl<R, G, B> PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B, polarity: Polarity) -> Self {
        Self {
            red,
            green,
            blue,
            polarity,
        }
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn drive<P: SetDutyCycle>(
    pin: &mut P,
    channel: u8,
    brightness: u8,
    polarity: Polarity,
) -> Result<(), OutputError> {
    let max = pin.max_duty_cycle();
    // scale_pulse never exceeds `max`
    let on = scale_pulse(max as u32, channel, brightness)? as u16;
    let duty = match polarity {
        Polarity::ActiveHigh => on,
        Polarity::ActiveLow => max - on,
    };
    pin.set_duty_cycle(duty).map_err(|_| OutputError::Pwm)
}

impl<R, G, B> RgbOutput for PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set(&mut self, r: u8, g: u8, b: u8, brightness: u8) -> Result<(), OutputError> {
        // Validate everything before touching any channel
        for value in [r, g, b, brightness] {
            check_percent(value)?;
        }
        drive(&mut self.red, r, brightness, self.polarity)?;
        drive(&mut self.green, g, brightness, self.polarity)?;
        drive(&mut self.blue, b, brightness, self.polarity)
    }
}
