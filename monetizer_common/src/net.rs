//! Shared networking constants and helpers used by client and server.

/// HTTP port the settings/rates API listens on by default.
pub const API_PORT: u16 = 3000;

/// Route prefix for all JSON endpoints.
pub const API_PREFIX: &str = "/api";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_joins_ip_and_port() {
        assert_eq!(addr("0.0.0.0", API_PORT), "0.0.0.0:3000");
    }
}
