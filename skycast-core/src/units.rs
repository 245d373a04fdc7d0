//! Display units for the measured values.
//!
//! Temperatures are stored in Kelvin and converted on render; every other
//! reading keeps its canonical unit and only carries a display label.

use std::fmt;

/// User-selectable temperature scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TempScale {
    Kelvin,
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempScale {
    pub fn symbol(&self) -> &'static str {
        match self {
            TempScale::Kelvin => "K",
            TempScale::Celsius => "\u{b0}C",
            TempScale::Fahrenheit => "\u{b0}F",
        }
    }

    pub const fn all() -> &'static [TempScale] {
        &[TempScale::Kelvin, TempScale::Celsius, TempScale::Fahrenheit]
    }

    /// Convert a Kelvin reading to this scale, rounded to one decimal.
    ///
    /// Rounding is half-away-from-zero (`f64::round`). The Fahrenheit ratio
    /// is applied as `* 9.0 / 5.0`, multiplication first, so the 9/5 factor
    /// does not pick up drift before the offset is subtracted.
    pub fn convert(self, kelvin: f64) -> f64 {
        let value = match self {
            TempScale::Kelvin => kelvin,
            TempScale::Celsius => kelvin - 273.15,
            TempScale::Fahrenheit => kelvin * 9.0 / 5.0 - 459.67,
        };
        round_tenth(value)
    }
}

impl fmt::Display for TempScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for TempScale {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "k" | "kelvin" => Ok(TempScale::Kelvin),
            "c" | "\u{b0}c" | "celsius" => Ok(TempScale::Celsius),
            "f" | "\u{b0}f" | "fahrenheit" => Ok(TempScale::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature scale '{value}'. Supported scales: kelvin, celsius, fahrenheit."
            )),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Which display unit a [`Scales::set`] call is changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Temperature,
    Wind,
    Pressure,
    Humidity,
    Clouds,
}

/// The full set of presentation scales. Only the temperature scale changes
/// the rendered numbers; the rest label the canonical units the API already
/// uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scales {
    pub temp: TempScale,
    pub wind: &'static str,
    pub pressure: &'static str,
    pub humidity: &'static str,
    pub clouds: &'static str,
}

impl Default for Scales {
    fn default() -> Self {
        Self {
            temp: TempScale::default(),
            wind: "m/s",
            pressure: "hPa",
            humidity: "%",
            clouds: "%",
        }
    }
}

impl Scales {
    /// Change one display unit. Wind, pressure, humidity and clouds accept
    /// only their canonical label; temperature accepts any of the
    /// [`TempScale`] spellings.
    pub fn set(&mut self, kind: ScaleKind, value: &str) -> anyhow::Result<()> {
        match kind {
            ScaleKind::Temperature => {
                self.temp = TempScale::try_from(value)?;
                Ok(())
            }
            ScaleKind::Wind => Self::fixed(value, self.wind),
            ScaleKind::Pressure => Self::fixed(value, self.pressure),
            ScaleKind::Humidity => Self::fixed(value, self.humidity),
            ScaleKind::Clouds => Self::fixed(value, self.clouds),
        }
    }

    fn fixed(value: &str, expected: &'static str) -> anyhow::Result<()> {
        if value == expected {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "Unknown unit '{value}'. The only supported unit is '{expected}'."
            ))
        }
    }
}
