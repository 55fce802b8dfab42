use std::net::{IpAddr, SocketAddr};

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Synthetic-load data service for request/response benchmarks")]
pub struct Config {
    /// Listen port
    #[arg(long, env = "PERFTEST_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "PERFTEST_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Raw-generation endpoint of the upstream instance used by /perftest/get
    #[arg(
        long = "api_url",
        env = "PERFTEST_API_URL",
        default_value = "http://127.0.0.1:3000/perftest/gen"
    )]
    pub api_url: String,

    /// Which route set to serve
    #[arg(long, env = "PERFTEST_MODE", value_enum, default_value_t = Mode::All)]
    pub mode: Mode,

    /// Upper bound on a single upstream fetch
    #[arg(
        long = "upstream_timeout_ms",
        env = "PERFTEST_UPSTREAM_TIMEOUT_MS",
        default_value_t = 30_000
    )]
    pub upstream_timeout_ms: u64,

    /// Largest payload (sample_size * num_copy) a request may ask for
    #[arg(
        long = "max_samples",
        env = "PERFTEST_MAX_SAMPLES",
        default_value_t = 10_000_000
    )]
    pub max_samples: usize,

    /// Base seed for reproducible samples (OS entropy when unset)
    #[arg(long, env = "PERFTEST_SEED")]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Raw generation and aggregation routes
    Gen,
    /// Fetch-and-aggregate route
    Get,
    /// Every route
    All,
}

impl Mode {
    pub fn serves_gen(self) -> bool {
        matches!(self, Mode::Gen | Mode::All)
    }

    pub fn serves_get(self) -> bool {
        matches!(self, Mode::Get | Mode::All)
    }
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
