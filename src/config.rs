use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 21)]
    pub rows: usize,

    #[arg(long, default_value_t = 31)]
    pub cols: usize,

    #[arg(long, default_value_t = false)]
    pub bordered: bool,

    /// Successful carves between visualization frames.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub multiplier: u32,

    #[arg(long, default_value = "prim")]
    pub generator: String,

    #[arg(long, default_value = "a_star")]
    pub algorithm: String,

    /// Fixed seed for reproducible generation runs.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 40)]
    pub delay_ms: u64,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
