//! Merging a peer with the template into the final client config values.

use serde::Serialize;

use crate::peer::PeerRecord;
use crate::template::TemplateDefaults;

const HOST_ROUTE: &str = "/32";

/// Final values for one client config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciledPeer {
    pub listen_port: String,
    #[serde(skip)]
    pub private_key: String,
    pub address: String,
    pub dns: String,
    /// The server's key from the template, never the peer's own.
    pub public_key: String,
    pub allowed_ips: String,
    #[serde(skip)]
    pub preshared_key: String,
    pub endpoint: String,
}

/// Combine a peer with the template values.
pub fn reconcile(peer: &PeerRecord, defaults: &TemplateDefaults) -> ReconciledPeer {
    ReconciledPeer {
        listen_port: defaults.listen_port.clone(),
        private_key: peer.private_key.clone(),
        address: peer.client_address.clone(),
        dns: coalesce(&[peer.client_dns.as_str(), defaults.fallback_dns.as_str()])
            .to_string(),
        public_key: defaults.server_public_key.clone(),
        allowed_ips: derive_allowed_ips(peer, defaults),
        preshared_key: peer.preshared_key.clone(),
        endpoint: format!("{}:{}", peer.endpoint_address, peer.endpoint_port),
    }
}

/// Allowed IPs for a peer, in canonical order.
///
/// Source priority: the export's `allowed-address`, then the template's
/// `AllowedIPs` with each `/32` entry replaced by the client address, then
/// the client address alone.
pub fn derive_allowed_ips(peer: &PeerRecord, defaults: &TemplateDefaults) -> String {
    let allowed = if !peer.allowed_address.is_empty() {
        peer.allowed_address.clone()
    } else if !defaults.allowed_ips_template.is_empty() {
        split_csv(&defaults.allowed_ips_template)
            .map(|entry| {
                if entry.ends_with(HOST_ROUTE) {
                    peer.client_address.as_str()
                } else {
                    entry
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    } else {
        peer.client_address.clone()
    };
    reorder_allowed_ips(&allowed)
}

/// Sort non-`/32` entries lexicographically and move `/32` entries to the end.
///
/// `/32` entries keep their relative order. Empty entries are dropped.
pub fn reorder_allowed_ips(list: &str) -> String {
    let (mut others, host_routes): (Vec<&str>, Vec<&str>) = split_csv(list)
        .filter(|entry| !entry.is_empty())
        .partition(|entry| !entry.ends_with(HOST_ROUTE));
    others.sort_unstable();
    others.extend(host_routes);
    others.join(",")
}

fn split_csv(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim)
}

fn coalesce<'a>(values: &[&'a str]) -> &'a str {
    values
        .iter()
        .copied()
        .find(|v| !v.trim().is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{derive_allowed_ips, reconcile, reorder_allowed_ips};
    use crate::peer::PeerRecord;
    use crate::template::TemplateDefaults;

    fn peer() -> PeerRecord {
        PeerRecord {
            client_address: "10.7.0.12/32".to_string(),
            private_key: "PRIV=".to_string(),
            preshared_key: "PSK=".to_string(),
            endpoint_address: "1.2.3.4".to_string(),
            endpoint_port: "13231".to_string(),
            public_key: "CLIENTPUB=".to_string(),
            ..PeerRecord::default()
        }
    }

    fn defaults() -> TemplateDefaults {
        TemplateDefaults {
            listen_port: "13231".to_string(),
            server_public_key: "SERVERKEY=".to_string(),
            ..TemplateDefaults::default()
        }
    }

    fn is_host(entry: &str) -> bool {
        entry.ends_with("/32")
    }

    #[test]
    fn falls_back_to_bare_client_address() {
        let out = reconcile(&peer(), &defaults());
        assert_eq!(out.listen_port, "13231");
        assert_eq!(out.public_key, "SERVERKEY=");
        assert_eq!(out.allowed_ips, "10.7.0.12/32");
        assert_eq!(out.endpoint, "1.2.3.4:13231");
        assert_eq!(out.dns, "");
        assert_eq!(out.address, "10.7.0.12/32");
        assert_eq!(out.private_key, "PRIV=");
        assert_eq!(out.preshared_key, "PSK=");
    }

    #[test]
    fn template_host_route_is_replaced_by_client_address() {
        let mut defaults = defaults();
        defaults.allowed_ips_template = "0.0.0.0/0,10.0.0.0/24,172.16.0.0/32".to_string();
        assert_eq!(
            derive_allowed_ips(&peer(), &defaults),
            "0.0.0.0/0,10.0.0.0/24,10.7.0.12/32"
        );
    }

    #[test]
    fn export_allowed_address_wins_over_template() {
        let mut defaults = defaults();
        defaults.allowed_ips_template = "0.0.0.0/0".to_string();
        let mut peer = peer();
        peer.allowed_address = "10.7.0.12/32, 192.168.88.0/24".to_string();
        assert_eq!(
            derive_allowed_ips(&peer, &defaults),
            "192.168.88.0/24,10.7.0.12/32"
        );
    }

    #[test]
    fn peer_dns_overrides_template_dns() {
        let mut defaults = defaults();
        defaults.fallback_dns = "9.9.9.9".to_string();
        assert_eq!(reconcile(&peer(), &defaults).dns, "9.9.9.9");

        let mut peer = peer();
        peer.client_dns = "1.1.1.1".to_string();
        assert_eq!(reconcile(&peer, &defaults).dns, "1.1.1.1");
    }

    #[test]
    fn peer_public_key_is_never_used() {
        assert_eq!(reconcile(&peer(), &defaults()).public_key, "SERVERKEY=");
    }

    #[test]
    fn reorder_puts_host_routes_last_and_sorts_the_rest() {
        let cases = [
            "10.0.0.5/32,192.168.0.0/16,10.0.0.0/8,10.0.0.4/32",
            "0.0.0.0/0",
            "1.1.1.1/32,2.2.2.2/32",
            " 172.16.0.0/12 , 10.0.0.1/32,10.0.0.0/24 ",
            "fd00::/64,10.0.0.1/32,::/0",
        ];
        for case in cases {
            let out = reorder_allowed_ips(case);
            let entries: Vec<&str> = out.split(',').collect();

            let first_host = entries.iter().position(|e| is_host(e)).unwrap_or(entries.len());
            assert!(entries[first_host..].iter().all(|e| is_host(e)), "{case} -> {out}");

            let others = &entries[..first_host];
            let mut sorted = others.to_vec();
            sorted.sort();
            assert_eq!(others, sorted.as_slice(), "{case} -> {out}");

            let mut before: Vec<&str> = case.split(',').map(str::trim).collect();
            let mut after = entries.clone();
            before.sort();
            after.sort();
            assert_eq!(before, after, "{case} -> {out}");
        }
    }

    #[test]
    fn reorder_keeps_host_route_order() {
        assert_eq!(
            reorder_allowed_ips("10.0.0.9/32,0.0.0.0/0,10.0.0.1/32"),
            "0.0.0.0/0,10.0.0.9/32,10.0.0.1/32"
        );
    }

    #[test]
    fn reorder_is_idempotent() {
        let once = reorder_allowed_ips("10.0.0.5/32,192.168.0.0/16,10.0.0.0/8,fd00::/64");
        assert_eq!(reorder_allowed_ips(&once), once);
    }

    #[test]
    fn reorder_drops_empty_entries() {
        assert_eq!(reorder_allowed_ips("10.0.0.0/8,,"), "10.0.0.0/8");
        assert_eq!(reorder_allowed_ips(""), "");
    }
}
