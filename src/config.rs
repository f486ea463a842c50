//! Runtime configuration, read from flags or the environment.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// HTML search front end for an Apache Solr core
#[derive(Parser, Debug, Clone)]
#[command(name = "search-frontend")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Config {
    /// Base URL of the Solr core (the `select` handler is resolved beneath it)
    #[arg(
        long,
        env = "SOLR_URL",
        default_value = "http://localhost:8983/solr/search_core"
    )]
    pub solr_url: String,

    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Upper bound on a single request to Solr, in seconds
    #[arg(long, env = "SOLR_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
