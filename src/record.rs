/// The desired operating configuration of a heat pump unit.
///
/// The string fields carry whatever names the controller uses (e.g. `"ON"`, `"HEAT"`, `"AUTO"`)
/// and are passed through as-is.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settings {
    pub power: String,
    pub mode: String,
    /// Target temperature in degrees Celsius.
    pub temperature: f32,
    pub fan: String,
    /// Vertical airflow direction.
    pub vane: String,
    /// Horizontal airflow direction.
    pub wide_vane: String,
}

/// The observed operating state of a heat pump unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Status {
    /// Room temperature in degrees Celsius.
    pub room_temperature: f32,
    /// Whether the compressor is currently running.
    pub operating: bool,
    pub compressor_frequency: i32,
}

/// Either of the records a heat pump controller reports.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    Settings(Settings),
    Status(Status),
}

impl From<Settings> for Record {
    fn from(value: Settings) -> Self {
        Self::Settings(value)
    }
}

impl From<Status> for Record {
    fn from(value: Status) -> Self {
        Self::Status(value)
    }
}
