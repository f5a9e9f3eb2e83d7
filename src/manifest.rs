//! Tolerant read-only view over a StartOS package manifest.
//!
//! Manifests are kept as a `serde_yaml::Value` so that unrelated or malformed
//! sections never prevent reading the fields target extraction needs. Each
//! accessor states its default when the field is absent or has the wrong shape.
//! Mappings keep document order.

use serde_yaml::{Mapping, Value};

/// A parsed manifest document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Value,
}

impl Manifest {
    /// Wrap an already-parsed document.
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// Parse a YAML document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_slice(bytes).map(Self::new)
    }

    /// True when the document is null or an empty mapping.
    pub fn is_empty(&self) -> bool {
        match &self.doc {
            Value::Null => true,
            Value::Mapping(m) => m.is_empty(),
            _ => false,
        }
    }

    /// The package's canonical id. Absent when missing, not a string, or empty.
    pub fn id(&self) -> Option<&str> {
        self.doc
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Declared interfaces in document order. Empty when `interfaces` is
    /// missing or not a mapping; entries whose descriptor is not a mapping
    /// are dropped.
    pub fn interfaces(&self) -> Vec<(String, Interface<'_>)> {
        let Some(interfaces) = self.doc.get("interfaces").and_then(Value::as_mapping) else {
            return Vec::new();
        };
        interfaces
            .iter()
            .filter_map(|(key, value)| {
                let id = scalar_to_string(key)?;
                let fields = value.as_mapping()?;
                Some((id, Interface { fields }))
            })
            .collect()
    }
}

/// One advertised network interface.
#[derive(Debug, Clone, Copy)]
pub struct Interface<'a> {
    fields: &'a Mapping,
}

impl<'a> Interface<'a> {
    /// Human-readable label, or `fallback` when `name` is absent or not a string.
    pub fn name_or<'b>(&self, fallback: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(fallback)
    }

    /// Declared protocols. Empty unless `protocols` is a sequence; non-string
    /// items are ignored.
    pub fn protocols(&self) -> Vec<&'a str> {
        self.fields
            .get("protocols")
            .and_then(Value::as_sequence)
            .map(|seq| seq.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// True when `http` or `https` is among the declared protocols.
    pub fn is_http(&self) -> bool {
        self.protocols()
            .iter()
            .any(|p| *p == "http" || *p == "https")
    }

    /// `lan-config` entries in document order. Empty when missing or not a mapping.
    pub fn lan_config(&self) -> Vec<(&'a Value, PortEntry<'a>)> {
        let Some(lan) = self.fields.get("lan-config").and_then(Value::as_mapping) else {
            return Vec::new();
        };
        lan.iter()
            .map(|(external, value)| {
                let entry = match value.as_mapping() {
                    Some(fields) => PortEntry::Mapping(PortConfig { fields }),
                    None => PortEntry::Degenerate,
                };
                (external, entry)
            })
            .collect()
    }
}

/// A `lan-config` value: either a port descriptor or a shorthand form that
/// carries no internal port / ssl information.
#[derive(Debug, Clone, Copy)]
pub enum PortEntry<'a> {
    Mapping(PortConfig<'a>),
    Degenerate,
}

/// Port descriptor within `lan-config`.
#[derive(Debug, Clone, Copy)]
pub struct PortConfig<'a> {
    fields: &'a Mapping,
}

impl<'a> PortConfig<'a> {
    /// Raw `internal` value; `None` when omitted (caller defaults to the external key).
    pub fn internal(&self) -> Option<&'a Value> {
        self.fields.get("internal")
    }

    /// `ssl` flag, false when absent or not a boolean.
    pub fn ssl(&self) -> bool {
        self.fields
            .get("ssl")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Coerce a port value to a `u16`. Accepts integers, integral floats
/// (`8080.0`) and strings holding an integer; anything else, or an
/// out-of-range number, yields `None`.
pub fn coerce_port(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(p) => u16::try_from(p).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(f))
                .map(|f| f as u16),
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
