use clap::Parser;
use std::net::SocketAddr;

use crate::existence::{DEFAULT_CAPACITY, DEFAULT_ERROR_RATE};

#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(about = "In-memory product search and recommendation engine", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8005")]
    pub bind: SocketAddr,

    /// Existence filter design capacity (distinct product ids)
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub filter_capacity: usize,

    /// Existence filter target false-positive rate at design capacity
    #[arg(long, default_value_t = DEFAULT_ERROR_RATE)]
    pub filter_error_rate: f64,
}
