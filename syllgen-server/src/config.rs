use std::path::PathBuf;

use clap::Parser;
use syllgen_core::MAX_CHAINS_COUNT;

/// Configuration of the name generation server
#[derive(Debug, Clone, Parser)]
#[command(name = "syllgen-server")]
#[command(about = "HTTP service generating names from syllable chains")]
pub struct ServerConfig {
	/// Address to bind (default: 127.0.0.1)
	#[arg(long, default_value = "127.0.0.1")]
	pub host: String,

	/// Port to listen on (default: 5000)
	#[arg(long, default_value = "5000")]
	pub port: u16,

	/// Directory holding the `<base>.dat` word lists
	#[arg(long, default_value = "./data")]
	pub data_dir: PathBuf,

	/// Maximum number of bases kept in memory
	#[arg(long, default_value_t = MAX_CHAINS_COUNT)]
	pub cache_capacity: usize,

	/// Load every base of the data directory at startup
	#[arg(long)]
	pub preload: bool,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "info")]
	pub log_level: String,
}
