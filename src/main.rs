use tour_narration::{
    engines::gtts::{GttsEngine, GttsParams},
    generate_audio, GenerationConfig, NarrationTable,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let table = NarrationTable::builtin()?;
    let config = GenerationConfig::default();
    let mut engine = GttsEngine::new();

    let report = generate_audio(&mut engine, &table, &config, GttsParams { slow: false });

    if !report.all_saved() {
        log::warn!(
            "{} of {} files failed",
            report.failures.len(),
            report.attempted()
        );
    }
    Ok(())
}
