//! Reading constants out of a known-good WireGuard client config.
//!
//! Every generated client shares the template's `ListenPort`, the server's
//! `[Peer] PublicKey` and, when the export does not provide them, its `DNS`
//! and `[Peer] AllowedIPs`.

use std::fs;
use std::path::Path;

use rsc_core::split_lines;
use serde::Serialize;
use thiserror::Error;

/// Constants taken from the template config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateDefaults {
    pub listen_port: String,
    /// `[Peer] PublicKey`: the server's key, shared by every client.
    pub server_public_key: String,
    pub fallback_dns: String,
    /// `[Peer] AllowedIPs`; any `/32` entry stands for the client's own address.
    pub allowed_ips_template: String,
}

/// Errors returned while reading the template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("template missing {0}")]
    MissingRequiredField(&'static str),
}

const PEER_SECTION: &str = "[Peer]";

/// Read a template file into memory.
pub fn read_template(path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Extract [`TemplateDefaults`] from template text.
///
/// `ListenPort` and `DNS` are accepted anywhere; `PublicKey` and `AllowedIPs`
/// only inside `[Peer]`, since `[Interface]` may carry the client's own key.
pub fn parse_template(text: &str) -> Result<TemplateDefaults, TemplateError> {
    let mut defaults = TemplateDefaults::default();
    let mut in_peer = false;

    for raw in split_lines(text) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            in_peer = line.eq_ignore_ascii_case(PEER_SECTION);
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim().to_ascii_lowercase().as_str() {
            "listenport" => defaults.listen_port = value,
            "dns" => defaults.fallback_dns = value,
            "publickey" if in_peer => defaults.server_public_key = value,
            "allowedips" if in_peer => defaults.allowed_ips_template = value,
            _ => {}
        }
    }

    if defaults.server_public_key.is_empty() {
        return Err(TemplateError::MissingRequiredField(
            "[Peer] PublicKey (server public key)",
        ));
    }
    Ok(defaults)
}
