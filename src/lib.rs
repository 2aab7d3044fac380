pub mod analysis;
pub mod config;
pub mod error;
pub mod model;

#[cfg(feature = "jni")]
pub mod ffi;

use std::fs::File;
use std::path::Path;

pub use config::{Aggregation, ExtractionConfig, OutputMode, StreamSelection};
pub use error::ExtractionError;
pub use model::ExtractionReport;

use analysis::aggregate::aggregate;
use analysis::decoder::AudioSource;
use analysis::resampler::FrameResampler;
use analysis::sink::{AmplitudeSink, LineSink};
use model::{Metadata, OutputSummary};

/// Exécute l'extraction décrite par `config` et renvoie son bilan
pub fn run(config: &ExtractionConfig) -> Result<ExtractionReport, ExtractionError> {
    match config.mode {
        OutputMode::Waveform => extract_waveform(config).map(|(report, _)| report),
        OutputMode::Pcm => extract(config, LineSink::streaming).map(|(report, _)| report),
    }
}

/// Mode "waveform" : fichier tamponné, valeurs aussi renvoyées en mémoire
pub fn extract_waveform(
    config: &ExtractionConfig,
) -> Result<(ExtractionReport, Vec<i32>), ExtractionError> {
    let (report, (_, values)) =
        extract(config, |file| (LineSink::buffered(file), Vec::<i32>::new()))?;
    Ok((report, values))
}

/// Premier flux audio, écrit dans `output` et renvoie les points émis
pub fn decode_to_waveform(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<Vec<i32>, ExtractionError> {
    let config = ExtractionConfig::waveform(input.as_ref(), output.as_ref());
    extract_waveform(&config)
        .map(|(_, values)| values)
        .inspect_err(|e| log::error!("decode_to_waveform {:?} : {}", config.input_path, e))
}

/// Meilleur flux audio, chaque point est écrit dès qu'il est calculé
pub fn decode_to_pcm(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<(), ExtractionError> {
    let config = ExtractionConfig::pcm(input.as_ref(), output.as_ref());
    run(&config)
        .map(|_| ())
        .inspect_err(|e| log::error!("decode_to_pcm {:?} : {}", config.input_path, e))
}

/// Pipeline commun : décodage -> rééchantillonnage -> agrégation -> sink.
///
/// Le fichier de sortie n'est créé qu'une fois le décodeur et le resampler prêts.
fn extract<S, F>(
    config: &ExtractionConfig,
    make_sink: F,
) -> Result<(ExtractionReport, S), ExtractionError>
where
    S: AmplitudeSink,
    F: FnOnce(File) -> S,
{
    // 1. Ouverture du conteneur et du décodeur
    let mut source = AudioSource::open(&config.input_path, config.stream_selection)?;

    // 2. Resampler vers la fréquence cible
    let mut resampler =
        FrameResampler::new(source.sample_rate(), config.target_sr, source.channels())?;

    // 3. Sortie
    let mut sink = make_sink(File::create(&config.output_path)?);

    let mut lines_written = 0u64;
    let frames_decoded = source.for_each_frame(|samples, _| {
        let frame = resampler.convert(samples)?;
        if frame.is_empty() {
            return Ok(());
        }
        lines_written +=
            aggregate(&frame.samples, frame.channels, config.aggregation, |v| sink.push(v))?;
        Ok(())
    })?;
    sink.finish()?;

    log::info!(
        "{:?} -> {:?} : {} trames décodées, {} lignes",
        config.input_path,
        config.output_path,
        frames_decoded,
        lines_written
    );

    let report = ExtractionReport {
        metadata: Metadata {
            file_path: config.input_path.clone(),
            track_id: source.track_id(),
            codec: source.codec().to_string(),
            sample_rate: source.sample_rate(),
            channels: source.channels(),
            target_sr: config.target_sr,
        },
        output: OutputSummary {
            file_path: config.output_path.clone(),
            mode: config.mode,
            stream_selection: config.stream_selection,
            aggregation: config.aggregation,
            frames_decoded,
            lines_written,
        },
    };

    Ok((report, sink))
}
