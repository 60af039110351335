// src/convert.rs
//! Log-to-annotation conversion driver

use crate::{
    aggregate::{FixAggregator, MergeOutcome},
    annotations::AnnotationWriter,
    config::ConverterConfig,
    error::{ConvertError, Result},
    gps::{data::Sentence, nmea::SentenceDecoder, time::FixKey},
};
use log::{debug, info, warn};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Counters collected over one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub lines_read: usize,
    pub gga_matched: usize,
    pub rmc_matched: usize,
    pub sentinel_dates: usize,
    /// Distinct seconds seen, dated or not
    pub entries: usize,
    pub records_written: usize,
}

/// Runs the decode, merge and write pipeline with one configuration
pub struct Converter {
    config: ConverterConfig,
    decoder: SentenceDecoder,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Result<Self> {
        Ok(Self {
            config,
            decoder: SentenceDecoder::new()?,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Decode and merge every line of `reader`.
    ///
    /// Lines are decoded lossily, so invalid UTF-8 only affects the line it
    /// appears on.
    pub fn process_reader<R: BufRead>(
        &self,
        mut reader: R,
    ) -> io::Result<(FixAggregator, ConversionSummary)> {
        let mut aggregator = FixAggregator::new(self.config.altitude_policy);
        let mut summary = ConversionSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break; // EOF
            }
            summary.lines_read += 1;

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim_end_matches(['\r', '\n']);
            let Some(sentence) = self.decoder.decode(line) else {
                continue;
            };

            match sentence {
                Sentence::Gga(_) => summary.gga_matched += 1,
                Sentence::Rmc(_) => summary.rmc_matched += 1,
            }

            match aggregator.push(&sentence) {
                MergeOutcome::SentinelDate => {
                    summary.sentinel_dates += 1;
                    debug!("line {}: RMC without a valid date skipped", summary.lines_read);
                }
                outcome => debug!(
                    "line {}: {:?} at {}",
                    summary.lines_read,
                    outcome,
                    FixKey::from_time(sentence.time())
                ),
            }
        }

        summary.entries = aggregator.len();
        Ok((aggregator, summary))
    }

    /// Convert `input` into an annotation file at `output`.
    ///
    /// The input is read completely before the output is created; if writing
    /// fails part way, the incomplete output file is removed.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ConversionSummary> {
        let file = File::open(input).map_err(|e| ConvertError::input(input, e))?;
        let (aggregator, mut summary) = self
            .process_reader(BufReader::new(file))
            .map_err(|e| ConvertError::input(input, e))?;

        let file = File::create(output).map_err(|e| ConvertError::output(output, e))?;
        let mut writer = BufWriter::new(file);
        let writer_result = AnnotationWriter::new(&self.config)
            .write_to(&mut writer, aggregator.eligible())
            .and_then(|written| writer.flush().map(|_| written));

        match writer_result {
            Ok(written) => summary.records_written = written,
            Err(e) => {
                drop(writer);
                if let Err(remove_err) = std::fs::remove_file(output) {
                    warn!(
                        "Could not remove incomplete output {}: {}",
                        output.display(),
                        remove_err
                    );
                }
                return Err(ConvertError::output(output, e));
            }
        }

        info!(
            "Converted {} -> {}: {} lines, {} GGA, {} RMC ({} without date), {} records",
            input.display(),
            output.display(),
            summary.lines_read,
            summary.gga_matched,
            summary.rmc_matched,
            summary.sentinel_dates,
            summary.records_written
        );

        Ok(summary)
    }
}

/// Convert with the default configuration and report a printable status
pub fn convert(input: &Path, output: &Path) -> std::result::Result<String, String> {
    convert_with_config(input, output, &ConverterConfig::default())
}

/// Convert and report either `Success! ...` or `Error: ...`
pub fn convert_with_config(
    input: &Path,
    output: &Path,
    config: &ConverterConfig,
) -> std::result::Result<String, String> {
    Converter::new(config.clone())
        .and_then(|converter| converter.run(input, output))
        .map(|_| format!("Success! File saved as: {}", output.display()))
        .map_err(|e| format!("Error: {}", e))
}
