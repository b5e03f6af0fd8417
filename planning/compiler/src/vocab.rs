//! The fixed vocabulary of the building domain: type names, device
//! categories and the qualitative buckets of numerical sensors.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Names of the non-category types in the taxonomy.
pub mod tpe {
    pub const OBJECT: &str = "object";
    pub const FLOOR: &str = "floor";
    pub const ROOM: &str = "room";
    pub const CLEANING_TEAM: &str = "cleaning_team";
    pub const ROOM_POSITION: &str = "room_position";
    pub const IOT_DEVICE: &str = "iot_device";
    pub const SENSOR: &str = "sensor";
    pub const BINARY_SENSOR: &str = "binary_sensor";
    pub const NUMERICAL_SENSOR: &str = "numerical_sensor";
    pub const TEXTUAL_SENSOR: &str = "textual_sensor";
    pub const ACTUATOR: &str = "actuator";
    pub const BINARY_ACTUATOR: &str = "binary_actuator";
    pub const NUMERICAL_ACTUATOR: &str = "numerical_actuator";
    pub const TEXTUAL_ACTUATOR: &str = "textual_actuator";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensorKind {
    Binary,
    Numerical,
    Textual,
}

/// Concrete sensor categories, each a leaf type of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorCategory {
    #[serde(rename = "motion_s")]
    Motion,
    #[serde(rename = "smoke_s")]
    Smoke,
    #[serde(rename = "pressure_s")]
    Pressure,
    #[serde(rename = "light_s")]
    Light,
    #[serde(rename = "temperature_s")]
    Temperature,
    #[serde(rename = "humidity_s")]
    Humidity,
    #[serde(rename = "noise_s")]
    Noise,
    #[serde(rename = "status_s")]
    Status,
}

impl SensorCategory {
    pub const ALL: [SensorCategory; 8] = [
        SensorCategory::Motion,
        SensorCategory::Smoke,
        SensorCategory::Pressure,
        SensorCategory::Light,
        SensorCategory::Temperature,
        SensorCategory::Humidity,
        SensorCategory::Noise,
        SensorCategory::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SensorCategory::Motion => "motion_s",
            SensorCategory::Smoke => "smoke_s",
            SensorCategory::Pressure => "pressure_s",
            SensorCategory::Light => "light_s",
            SensorCategory::Temperature => "temperature_s",
            SensorCategory::Humidity => "humidity_s",
            SensorCategory::Noise => "noise_s",
            SensorCategory::Status => "status_s",
        }
    }

    pub fn kind(self) -> SensorKind {
        match self {
            SensorCategory::Motion | SensorCategory::Smoke | SensorCategory::Pressure => SensorKind::Binary,
            SensorCategory::Light | SensorCategory::Temperature | SensorCategory::Humidity | SensorCategory::Noise => {
                SensorKind::Numerical
            }
            SensorCategory::Status => SensorKind::Textual,
        }
    }

    /// The subtype of `sensor` this category hangs below.
    pub fn parent_type(self) -> &'static str {
        match self.kind() {
            SensorKind::Binary => tpe::BINARY_SENSOR,
            SensorKind::Numerical => tpe::NUMERICAL_SENSOR,
            SensorKind::Textual => tpe::TEXTUAL_SENSOR,
        }
    }
}

impl Display for SensorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Concrete actuator categories, each a leaf type of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActuatorCategory {
    #[serde(rename = "lamp_a")]
    Lamp,
    #[serde(rename = "siren_a")]
    Siren,
    #[serde(rename = "dimmer_a")]
    Dimmer,
    #[serde(rename = "heater_a")]
    Heater,
    #[serde(rename = "cooler_a")]
    Cooler,
    #[serde(rename = "humidifier_a")]
    Humidifier,
    #[serde(rename = "display_a")]
    Display,
}

impl ActuatorCategory {
    pub const ALL: [ActuatorCategory; 7] = [
        ActuatorCategory::Lamp,
        ActuatorCategory::Siren,
        ActuatorCategory::Dimmer,
        ActuatorCategory::Heater,
        ActuatorCategory::Cooler,
        ActuatorCategory::Humidifier,
        ActuatorCategory::Display,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActuatorCategory::Lamp => "lamp_a",
            ActuatorCategory::Siren => "siren_a",
            ActuatorCategory::Dimmer => "dimmer_a",
            ActuatorCategory::Heater => "heater_a",
            ActuatorCategory::Cooler => "cooler_a",
            ActuatorCategory::Humidifier => "humidifier_a",
            ActuatorCategory::Display => "display_a",
        }
    }

    pub fn parent_type(self) -> &'static str {
        match self {
            ActuatorCategory::Lamp | ActuatorCategory::Siren => tpe::BINARY_ACTUATOR,
            ActuatorCategory::Dimmer
            | ActuatorCategory::Heater
            | ActuatorCategory::Cooler
            | ActuatorCategory::Humidifier => tpe::NUMERICAL_ACTUATOR,
            ActuatorCategory::Display => tpe::TEXTUAL_ACTUATOR,
        }
    }
}

impl std::fmt::Display for ActuatorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One of the three ordered qualitative states a numerical sensor occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Low,
    Ok,
    High,
}

impl Bucket {
    /// Adjacent bucket pairs, lower bucket first.
    pub const BOUNDARIES: [(Bucket, Bucket); 2] = [(Bucket::Low, Bucket::Ok), (Bucket::Ok, Bucket::High)];

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Low => "low",
            Bucket::Ok => "ok",
            Bucket::High => "high",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Expected state of one sensor inside an activity detection signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedReading {
    Sensing,
    NotSensing,
    Low,
    Ok,
    High,
}

impl ExpectedReading {
    /// The sensor kind this expectation applies to.
    pub fn kind(self) -> SensorKind {
        match self {
            ExpectedReading::Sensing | ExpectedReading::NotSensing => SensorKind::Binary,
            ExpectedReading::Low | ExpectedReading::Ok | ExpectedReading::High => SensorKind::Numerical,
        }
    }
}
