//! Server Config

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Seed the product catalogue on startup when it is empty
    #[arg(long, env = "MERX_SEED_PRODUCTS", default_value_t = true)]
    pub seed_products: bool,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        server: ServerRuntimeConfig,
    }

    #[test]
    fn defaults_bind_every_interface_on_8080() {
        let harness = Harness::parse_from(["merx-json"]);

        assert_eq!(harness.server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn seeding_is_on_by_default() {
        let harness = Harness::parse_from(["merx-json"]);

        assert!(harness.server.seed_products);
    }
}
