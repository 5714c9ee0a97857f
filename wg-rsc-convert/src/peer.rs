//! WireGuard peer entries of a RouterOS export.
//!
//! RouterOS 7 can store client-side settings on server peers
//! (`client-address`, `client-dns`, `private-key`, ...). Only entries carrying
//! everything a client config needs become [`PeerRecord`]s; the rest, such as
//! `responder=yes` server-only peers, are reported as [`RejectedEntry`]s.

use std::fmt::{self, Display, Formatter};

use rsc_core::{scan_section, Entry, Record, SectionFilter};
use serde::Serialize;
use tracing::debug;

const NAME: &[&str] = &["name"];
const CLIENT_ADDRESS: &[&str] = &["client-address", "address", "clientaddress"];
const CLIENT_DNS: &[&str] = &["client-dns", "dns", "clientdns"];
const ENDPOINT_ADDRESS: &[&str] = &["endpoint-address", "endpoint", "endpointaddress"];
const ENDPOINT_PORT: &[&str] = &["endpoint-port", "endpointport"];
const PRIVATE_KEY: &[&str] = &["private-key"];
const PUBLIC_KEY: &[&str] = &["public-key"];
const PRESHARED_KEY: &[&str] = &["preshared-key"];
const ALLOWED_ADDRESS: &[&str] = &["allowed-address", "allowedaddress"];

/// One complete client peer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerRecord {
    pub name: String,
    pub client_address: String,
    pub client_dns: String,
    pub endpoint_address: String,
    pub endpoint_port: String,
    pub private_key: String,
    /// Parsed for completeness; clients are always given the server's key.
    pub public_key: String,
    pub preshared_key: String,
    pub allowed_address: String,
}

/// Why an entry did not become a [`PeerRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    EmptyEntry,
    MissingClientAddress,
    MissingPrivateKey,
    MissingPresharedKey,
    MissingEndpointAddress,
    MissingEndpointPort,
}

impl Rejection {
    pub fn code(self) -> &'static str {
        match self {
            Rejection::EmptyEntry => "empty_entry",
            Rejection::MissingClientAddress => "missing_client_address",
            Rejection::MissingPrivateKey => "missing_private_key",
            Rejection::MissingPresharedKey => "missing_preshared_key",
            Rejection::MissingEndpointAddress => "missing_endpoint_address",
            Rejection::MissingEndpointPort => "missing_endpoint_port",
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An entry skipped by [`scan_peers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// Physical line of the export where the entry starts.
    pub line: usize,
    pub reason: Rejection,
    /// Keys the entry did carry, sorted.
    pub keys: Vec<String>,
}

/// Result of scanning an export for peers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerScan {
    pub peers: Vec<PeerRecord>,
    pub rejected: Vec<RejectedEntry>,
}

impl PeerRecord {
    /// Build a peer from an entry's fields, or say why it cannot be one.
    ///
    /// Each field takes the first of its aliases that has a non-empty value.
    pub fn from_record(record: &Record) -> Result<Self, Rejection> {
        if record.is_empty() {
            return Err(Rejection::EmptyEntry);
        }
        let field = |aliases: &[&str]| record.first_non_empty(aliases).to_string();
        let peer = PeerRecord {
            name: field(NAME),
            client_address: field(CLIENT_ADDRESS),
            client_dns: field(CLIENT_DNS),
            endpoint_address: field(ENDPOINT_ADDRESS),
            endpoint_port: field(ENDPOINT_PORT),
            private_key: field(PRIVATE_KEY),
            public_key: field(PUBLIC_KEY),
            preshared_key: field(PRESHARED_KEY),
            allowed_address: field(ALLOWED_ADDRESS),
        };
        peer.validate()?;
        Ok(peer)
    }

    /// Check required fields in a fixed order and return the first missing one.
    pub fn validate(&self) -> Result<(), Rejection> {
        let required = [
            (&self.client_address, Rejection::MissingClientAddress),
            (&self.private_key, Rejection::MissingPrivateKey),
            (&self.preshared_key, Rejection::MissingPresharedKey),
            (&self.endpoint_address, Rejection::MissingEndpointAddress),
            (&self.endpoint_port, Rejection::MissingEndpointPort),
        ];
        match required.into_iter().find(|(value, _)| value.is_empty()) {
            Some((_, reason)) => Err(reason),
            None => Ok(()),
        }
    }

    /// Client address with any `/prefix` removed, used to name output files.
    pub fn ip(&self) -> &str {
        ip_only(&self.client_address)
    }
}

/// Strip a `/prefix` suffix. An address starting with `/` is returned as-is.
pub fn ip_only(address: &str) -> &str {
    match address.find('/') {
        Some(idx) if idx > 0 => &address[..idx],
        _ => address,
    }
}

/// Scan export text for client peers in the section chosen by `filter`.
pub fn scan_peers(text: &str, filter: &SectionFilter) -> PeerScan {
    let mut scan = PeerScan::default();
    for entry in scan_section(text, filter) {
        match PeerRecord::from_record(&entry.fields) {
            Ok(peer) => scan.peers.push(peer),
            Err(reason) => scan.rejected.push(reject(&entry, reason)),
        }
    }
    scan
}

fn reject(entry: &Entry, reason: Rejection) -> RejectedEntry {
    let keys: Vec<String> = entry.fields.keys().map(str::to_string).collect();
    debug!(
        line = entry.line,
        %reason,
        keys = %keys.join(","),
        client_address = entry.fields.first_non_empty(CLIENT_ADDRESS),
        "skipping peer entry"
    );
    RejectedEntry {
        line: entry.line,
        reason,
        keys,
    }
}
