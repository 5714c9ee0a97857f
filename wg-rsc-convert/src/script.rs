//! Windows installer script for one client.
//!
//! The script writes `<ip>.conf` line by line with `echo`, moves it into the
//! WireGuard folder and installs it as a tunnel service. Empty values leave
//! their line out.

use std::fmt::Write as _;
use std::path::{Component, Path};

use thiserror::Error;

use crate::reconcile::ReconciledPeer;
use crate::settings::ScriptSettings;

const CRLF: &str = "\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty script name")]
    EmptyName,
    #[error("invalid script name {0:?}: not a plain file name")]
    InvalidName(String),
}

/// Output file name for a client, e.g. `10.7.0.12.que`.
///
/// The name must stay inside the output directory, so separators and
/// relative components are rejected.
pub fn script_file_name(ip: &str, settings: &ScriptSettings) -> Result<String, ScriptError> {
    check_name(ip)?;
    let name = format!("{ip}.{}", settings.extension);
    check_name(&name)?;
    Ok(name)
}

fn check_name(name: &str) -> Result<(), ScriptError> {
    if name.is_empty() {
        return Err(ScriptError::EmptyName);
    }
    let mut components = Path::new(name).components();
    let plain = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !name.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(ScriptError::InvalidName(name.to_string()))
    }
}

/// Render the installer script for `peer`, naming the config after `ip`.
pub fn render_script(
    ip: &str,
    peer: &ReconciledPeer,
    settings: &ScriptSettings,
) -> Result<String, ScriptError> {
    check_name(ip)?;
    let conf = format!("{ip}.conf");
    let mut out = String::new();

    push_line(&mut out, format_args!("echo [Interface] > {conf}"));
    push_setting(&mut out, &conf, "ListenPort", &peer.listen_port);
    push_setting(&mut out, &conf, "PrivateKey", &peer.private_key);
    push_setting(&mut out, &conf, "Address", &peer.address);
    push_setting(&mut out, &conf, "DNS", &peer.dns);
    push_line(&mut out, format_args!("echo. >> {conf}"));

    push_line(&mut out, format_args!("echo [Peer] >> {conf}"));
    push_setting(&mut out, &conf, "PublicKey", &peer.public_key);
    push_setting(&mut out, &conf, "AllowedIPs", &peer.allowed_ips);
    push_setting(&mut out, &conf, "PresharedKey", &peer.preshared_key);
    push_setting(&mut out, &conf, "Endpoint", &peer.endpoint);

    let install_dir = settings.install_dir.trim_end_matches('\\');
    push_line(
        &mut out,
        format_args!("move /y {conf} \"{install_dir}\\\""),
    );
    push_line(
        &mut out,
        format_args!(
            "\"{}\" /installtunnelservice \"{install_dir}\\{conf}\"",
            settings.wireguard_exe
        ),
    );

    Ok(out)
}

fn push_setting(out: &mut String, conf: &str, key: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    push_line(out, format_args!("echo {key} = {value} >> {conf}"));
}

fn push_line(out: &mut String, line: std::fmt::Arguments<'_>) {
    // writing into a String cannot fail
    let _ = out.write_fmt(line);
    out.push_str(CRLF);
}
