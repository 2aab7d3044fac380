use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use wavelevels::config::DEFAULT_TARGET_SR;
use wavelevels::{run, Aggregation, ExtractionConfig, OutputMode, StreamSelection};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg()]
    input: PathBuf,
    #[arg()]
    output: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputMode::Waveform)]
    mode: OutputMode,
    #[arg(long, default_value_t = DEFAULT_TARGET_SR)]
    target_sr: u32,
    /// Remplace la stratégie de sélection du mode choisi
    #[arg(long, value_enum)]
    stream: Option<StreamSelection>,
    #[arg(long, value_enum, default_value_t = Aggregation::Cumulative)]
    aggregation: Aggregation,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // 1. Configuration à partir du préréglage du mode
    let preset = match args.mode {
        OutputMode::Waveform => ExtractionConfig::waveform(args.input, args.output),
        OutputMode::Pcm => ExtractionConfig::pcm(args.input, args.output),
    };
    let config = ExtractionConfig {
        target_sr: args.target_sr,
        stream_selection: args.stream.unwrap_or(preset.stream_selection),
        aggregation: args.aggregation,
        ..preset
    };

    // 2. Extraction
    let report = run(&config)
        .with_context(|| format!("Échec de l'extraction de {:?}", config.input_path))?;

    // 3. Bilan en JSON
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
