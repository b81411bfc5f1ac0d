use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "zeekline", about = "Convert Zeek JSON logs from stdin into tagged TSV lines")]
pub struct Cli {
    /// Path to TOML configuration file. Without it a single corelight processor is used.
    #[arg(long, env = "ZEEKLINE_CONFIG")]
    pub config: Option<String>,

    /// Tag prefix for the default corelight processor (ignored with --config).
    #[arg(long, default_value = "zeek")]
    pub prefix: String,

    /// Number of input lines processed per batch.
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch: u64,

    /// Prefix every output line with its tag name and a tab.
    #[arg(long)]
    pub with_tag: bool,
}
