use anyhow::Context;
use clap::Parser;
use hypsoramp::{PreviewRenderer, cli::Args, export::write_ramp_json, utils::status};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let summary = args.summary;
    let ramp_json = args.ramp_json.clone();
    let config = args.into_config()?;

    if summary {
        status::print_palette_summary(&config);
    }
    if let Some(path) = ramp_json {
        write_ramp_json(&config.palette, &path)?;
    }

    let renderer = PreviewRenderer::new(config)?;
    let saved = renderer.save().context("rendering colour preview")?;
    println!("✅ Color preview saved to {}", saved.display());

    Ok(())
}
