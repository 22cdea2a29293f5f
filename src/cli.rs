use clap::Parser;
use crate::signatures;

#[derive(Parser, Debug)]
#[command(name = "RustWAF-Hunter")]
#[command(version = "1.2.0")]
#[command(about = "Fingerprints the WAF in front of an HTTP endpoint.", long_about = None)]
pub struct Args {
    /// Target URL to fingerprint.
    #[arg(short, long)]
    pub url: Option<String>,

    /// List all WAFs known to the signature catalog and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Write the report to this file at the end.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Proxy URL to route the request through.
    #[arg(long)]
    pub proxy: Option<String>,

    /// Path to the WAF signature catalog.
    #[arg(long, default_value = signatures::DEFAULT_CATALOG_PATH)]
    pub signatures: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}
