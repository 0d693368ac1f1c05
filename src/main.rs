use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use streamtree::ui::cli::drivers::InquireDriver;
use streamtree::ui::cli::{Args, run};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args, &InquireDriver)?;
    Ok(())
}
