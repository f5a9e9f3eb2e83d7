//! Target extraction. Turns a manifest's LAN port configuration into
//! Tailrelay proxy/relay targets.

use serde::Serialize;

use crate::manifest::{coerce_port, Manifest, PortEntry};

/// How Tailrelay exposes a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Reverse-proxied through Caddy (HTTP-family interfaces)
    Proxy,
    /// Raw TCP relay through socat
    Relay,
}

/// Protocol the internal port speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetProtocol {
    Https,
    Http,
    Tcp,
}

impl TargetKind {
    pub fn classify(is_http: bool) -> Self {
        if is_http {
            TargetKind::Proxy
        } else {
            TargetKind::Relay
        }
    }
}

impl TargetProtocol {
    /// `ssl` wins over the interface's declared protocols.
    pub fn classify(ssl: bool, is_http: bool) -> Self {
        if ssl {
            TargetProtocol::Https
        } else if is_http {
            TargetProtocol::Http
        } else {
            TargetProtocol::Tcp
        }
    }
}

/// One connectable endpoint, serialized as an element of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub app_id: String,
    pub host: String,
    pub port: u16,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    pub protocol: TargetProtocol,
    pub target_name: String,
}

/// Extract all targets from `manifest`, in interface then `lan-config` order.
///
/// Returns nothing for a manifest without an id. Degenerate port entries and
/// ports that cannot be read as a number are skipped without affecting
/// their siblings.
pub fn extract_targets(manifest: &Manifest, domain_suffix: &str) -> Vec<Target> {
    let Some(app_id) = manifest.id() else {
        tracing::warn!("manifest missing 'id' field");
        return Vec::new();
    };
    let host = format!("{}{}", app_id, domain_suffix);

    let mut targets = Vec::new();
    for (iface_id, iface) in manifest.interfaces() {
        let is_http = iface.is_http();
        let target_name = iface.name_or(&iface_id);

        for (external, entry) in iface.lan_config() {
            let PortEntry::Mapping(port_config) = entry else {
                tracing::debug!(
                    app = %app_id,
                    interface = %iface_id,
                    "skipping simplified lan-config entry"
                );
                continue;
            };

            let internal = port_config.internal().unwrap_or(external);
            let Some(port) = coerce_port(internal) else {
                tracing::warn!(
                    app = %app_id,
                    interface = %iface_id,
                    port = ?internal,
                    "skipping lan-config entry with non-numeric port"
                );
                continue;
            };

            let ssl = port_config.ssl();
            targets.push(Target {
                app_id: app_id.to_string(),
                host: host.clone(),
                port,
                kind: TargetKind::classify(is_http),
                protocol: TargetProtocol::classify(ssl, is_http),
                target_name: target_name.to_string(),
            });
        }
    }
    targets
}
