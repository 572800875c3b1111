//! Static catalog of known exporter kinds and their defaults.
//!
//! The catalog is the versioned source of default ports, listen addresses, and collector
//! sets. Per-deployment overrides are layered over these entries field by field during
//! exporter resolution; the catalog itself is never mutated.

/// Default settings for one known exporter kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Exporter name, as used in the specification's exporter map.
    pub name: &'static str,
    /// Default listen port, drawn from the exporter's conventional registered port.
    pub default_port: u16,
    /// Default listen address.
    pub default_listen_address: &'static str,
    /// Default collector set enabled for this exporter, if it has the concept.
    pub default_collectors: &'static [&'static str],
}

/// The default exporter catalog.
pub const DEFAULT_EXPORTERS: &[CatalogEntry] = &[
    CatalogEntry {
        name: "blackbox",
        default_port: 9115,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
    CatalogEntry {
        name: "nginx",
        default_port: 9113,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
    CatalogEntry {
        name: "node",
        default_port: 9100,
        default_listen_address: "0.0.0.0",
        default_collectors: &["cpu", "diskstats", "filesystem", "loadavg", "meminfo", "netdev"],
    },
    CatalogEntry {
        name: "postgres",
        default_port: 9187,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
    CatalogEntry {
        name: "process",
        default_port: 9256,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
    CatalogEntry {
        name: "redis",
        default_port: 9121,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
    CatalogEntry {
        name: "smartctl",
        default_port: 9633,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
    CatalogEntry {
        name: "systemd",
        default_port: 9558,
        default_listen_address: "0.0.0.0",
        default_collectors: &[],
    },
];

/// Looks up a catalog entry by exporter name.
pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    DEFAULT_EXPORTERS.iter().find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_exporters() {
        assert_eq!(lookup("node").unwrap().default_port, 9100);
        assert_eq!(lookup("systemd").unwrap().default_port, 9558);
        assert!(lookup("teapot").is_none());
    }

    #[test]
    fn test_catalog_is_sorted_and_unique() {
        let names: Vec<&str> = DEFAULT_EXPORTERS.iter().map(|e| e.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_catalog_ports_are_unique() {
        let mut ports: Vec<u16> = DEFAULT_EXPORTERS.iter().map(|e| e.default_port).collect();
        ports.sort_unstable();
        let len = ports.len();
        ports.dedup();
        assert_eq!(ports.len(), len);
    }
}
