use std::path::{Path, PathBuf};

use derive_builder::Builder;

use crate::narration::NarrationTable;
use crate::SynthesisEngine;

/// Where the tour's audio files are written, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "public/VR/gangaikondacholapuram/audio";

/// Settings for a batch run.
///
/// ```rust
/// use tour_narration::GenerationConfigBuilder;
///
/// let config = GenerationConfigBuilder::default()
///     .output_dir("out/audio")
///     .build()?;
/// assert_eq!(config.extension, "mp3");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default)]
pub struct GenerationConfig {
    /// Directory receiving one file per location and language. Created,
    /// parents included, when missing.
    #[builder(setter(into))]
    pub output_dir: PathBuf,
    /// File extension without the dot.
    #[builder(setter(into))]
    pub extension: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: "mp3".to_string(),
        }
    }
}

/// One `(location, language)` pair that could not be synthesized or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub filename: String,
    pub message: String,
}

/// Outcome of [`generate_audio`].
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in processing order.
    pub saved: Vec<PathBuf>,
    pub failures: Vec<ItemFailure>,
}

impl GenerationReport {
    pub fn attempted(&self) -> usize {
        self.saved.len() + self.failures.len()
    }

    pub fn all_saved(&self) -> bool {
        self.failures.is_empty()
    }
}

/// `<location>_<language>.<extension>`
pub fn output_file_name(location: &str, lang: &str, extension: &str) -> String {
    format!("{location}_{lang}.{extension}")
}

/// Synthesize every entry of `table` into `config.output_dir`.
///
/// Each entry is independent: a synthesis or write failure is logged and
/// recorded in the report, and processing moves on to the next entry.
/// Existing files are overwritten. This function never fails as a whole.
pub fn generate_audio<E>(
    engine: &mut E,
    table: &NarrationTable,
    config: &GenerationConfig,
    params: E::SynthesisParams,
) -> GenerationReport
where
    E: SynthesisEngine,
    E::SynthesisParams: Clone,
{
    let output_dir = config.output_dir.as_path();
    ensure_output_dir(output_dir);

    log::info!("Generating audio files in '{}'...", output_dir.display());

    let mut report = GenerationReport::default();
    for (location, lang, text) in table.entries() {
        let filename = output_file_name(location, lang, &config.extension);
        let path = output_dir.join(&filename);

        log::info!("Generating {filename}...");

        match engine.synthesize_to_file(text, lang, &path, Some(params.clone())) {
            Ok(()) => {
                log::info!("Saved: {}", path.display());
                report.saved.push(path);
            }
            Err(e) => {
                log::error!("Error generating {filename}: {e}");
                report.failures.push(ItemFailure {
                    filename,
                    message: e.to_string(),
                });
            }
        }
    }

    log::info!("Audio generation complete!");
    report
}

// A directory that cannot be created shows up as per-file write errors.
fn ensure_output_dir(dir: &Path) {
    if dir.is_dir() {
        return;
    }
    if let Err(e) = std::fs::create_dir_all(dir) {
        log::error!("Could not create '{}': {e}", dir.display());
    }
}
