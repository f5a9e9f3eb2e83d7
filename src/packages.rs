//! Built-in list of StartOS wrapper repositories scanned by default.

/// Package identifiers (`owner/repo`) whose manifests are fetched, in order.
pub const DEFAULT_PACKAGES: &[&str] = &[
    "Start9Labs/bisq-startos",
    "Start9Labs/bitcoin-core-startos",
    "Start9Labs/bitcoin-explorer-startos",
    "Start9Labs/btc-rpc-proxy-startos",
    "Start9Labs/btcpayserver-startos",
    "Start9Labs/cln-startos",
    "Start9Labs/cryptpad-startos",
    "Start9Labs/cups-startos",
    "Start9Labs/cwtch-startos",
    "Start9Labs/deluge-startos",
    "Start9Labs/docuseal-startos",
    "Start9Labs/element-web-startos",
    "Start9Labs/filebrowser-startos",
    "Start9Labs/ghost-startos",
    "Start9Labs/hello-world-startos",
    "Start9Labs/holesail-startos",
    "Start9Labs/home-assistant-startos",
    "Start9Labs/iris-startos",
    "Start9Labs/jam-startos",
    "Start9Labs/jellyfin-startos",
    "Start9Labs/lightning-terminal-startos",
    "Start9Labs/lnbits-startos",
    "Start9Labs/lnd-startos",
    "Start9Labs/lndboss-startos",
    "Start9Labs/mastodon-startos",
    "Start9Labs/mempool-startos",
    "Start9Labs/myspeed-startos",
    "Start9Labs/nextcloud-startos",
    "Start9Labs/nostr-rs-relay-startos",
    "Start9Labs/ollama-startos",
    "Start9Labs/open-webui-startos",
    "Start9Labs/openclaw-startos",
    "Start9Labs/phoenixd-dashboard-startos",
    "Start9Labs/phoenixd-startos",
    "Start9Labs/ride-the-lightning-startos",
    "Start9Labs/searxng-startos",
    "Start9Labs/serge-startos",
    "Start9Labs/spark-wallet-startos",
    "Start9Labs/sphinx-relay-startos",
    "Start9Labs/start9-pages-startos",
    "Start9Labs/synapse-startos",
    "Start9Labs/syncthing-startos",
    "Start9Labs/thunderhub-startos",
    "Start9Labs/tor-startos",
    "Start9Labs/vaultwarden-startos",
];

/// Owned copy of [`DEFAULT_PACKAGES`].
pub fn default_packages() -> Vec<String> {
    DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect()
}
