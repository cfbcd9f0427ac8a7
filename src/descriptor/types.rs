use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use super::error::DescriptorError;

/// `[latitude, longitude]` in degrees, the order Leaflet expects.
pub type LatLon = [f64; 2];

/// South-west and north-east corners of an overlay.
pub type Bounds = [LatLon; 2];

/// Optional writer fields are informational only. A value of an unexpected
/// type is dropped instead of failing the whole descriptor.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Transmitter site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qth {
    pub coordinates: LatLon,
    /// Antenna height above ground level, metres.
    pub height: f64,
}

/// Longley-Rice parameters block. Only `erp` is needed for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lrp {
    /// Effective radiated power, watts.
    pub erp: f64,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub permittivity: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub conductivity: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bending: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub climate: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub polarization: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location_variability: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time_variability: Option<f64>,
}

/// Georeferenced coverage image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Path or URL of the PNG, used as given.
    pub file: String,
    pub bounds: Bounds,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub colormap: Option<BTreeMap<String, String>>,
}

/// A SPLAT! coverage descriptor.
///
/// The typed fields are what rendering consumes. The document it was parsed
/// from is kept as-is so the text dump shows every field, including ones this
/// type does not model.
#[derive(Debug, Clone, Deserialize)]
pub struct Descriptor {
    #[serde(default, deserialize_with = "lenient")]
    pub splat: Option<String>,
    pub name: String,
    pub qth: Qth,
    pub lrp: Lrp,
    pub image: Image,
    #[serde(default, deserialize_with = "lenient")]
    pub arguments: Option<BTreeMap<String, String>>,
    #[serde(skip)]
    raw: Value,
}

impl Descriptor {
    /// Parse descriptor text. Syntax errors and shape errors are reported
    /// separately so callers can tell a truncated download from a wrong file.
    pub fn from_json(text: &str) -> Result<Self, DescriptorError> {
        let raw: Value = serde_json::from_str(text).map_err(DescriptorError::Json)?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: Value) -> Result<Self, DescriptorError> {
        let mut descriptor = Descriptor::deserialize(&raw).map_err(DescriptorError::Shape)?;
        descriptor.raw = raw;
        Ok(descriptor)
    }

    /// Pretty-print the whole document with four-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.raw.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
