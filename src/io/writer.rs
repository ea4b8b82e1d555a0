use crate::io::IoError;
use crate::selection::{AttributeScore, GainRatios, NonFinitePolicy, compare_scores};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{info, instrument};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

#[derive(Serialize)]
struct RatioEntry<'a> {
    name: &'a str,
    gain_ratio: f64,
}

/// Writes scores ascending by gain ratio.
///
/// Plain ratios go out as headerless `name,score` lines (tab separated for
/// TSV) or a JSON array. Full breakdowns carry a header row in CSV/TSV.
/// JSON renders non-finite numbers as `null`.
pub struct ResultWriter {
    path: PathBuf,
    format: OutputFormat,
    policy: NonFinitePolicy,
}

impl ResultWriter {
    pub fn new(path: &Path, format: OutputFormat, policy: NonFinitePolicy) -> Self {
        Self {
            path: path.to_path_buf(),
            format,
            policy,
        }
    }

    #[instrument(skip_all, fields(path = %self.path.display(), format = %self.format))]
    pub fn write(&self, ratios: &GainRatios) -> Result<(), IoError> {
        self.to_file(|w| self.write_ratios_to(w, ratios))?;
        info!(attributes = ratios.len(), "gain ratios written");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.path.display(), format = %self.format))]
    pub fn write_scores(&self, scores: &[AttributeScore]) -> Result<(), IoError> {
        self.to_file(|w| self.write_scores_to(w, scores))?;
        info!(attributes = scores.len(), "attribute scores written");
        Ok(())
    }

    pub fn write_ratios_to<W: Write>(&self, w: W, ratios: &GainRatios) -> std::io::Result<()> {
        let ranked = ratios.ranked(self.policy);
        match self.format {
            OutputFormat::Csv => write_delimited(w, b',', &ranked),
            OutputFormat::Tsv => write_delimited(w, b'\t', &ranked),
            OutputFormat::Json => {
                let entries: Vec<RatioEntry> = ranked
                    .iter()
                    .map(|&(name, gain_ratio)| RatioEntry { name, gain_ratio })
                    .collect();
                write_json(w, &entries)
            }
        }
    }

    pub fn write_scores_to<W: Write>(&self, w: W, scores: &[AttributeScore]) -> std::io::Result<()> {
        let mut ranked: Vec<&AttributeScore> = scores.iter().collect();
        ranked.sort_by(|a, b| {
            compare_scores(a.gain_ratio, b.gain_ratio, self.policy).then_with(|| a.name.cmp(&b.name))
        });

        let delimiter = match self.format {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
            OutputFormat::Json => return write_json(w, &ranked),
        };
        let mut out = csv::WriterBuilder::new().delimiter(delimiter).from_writer(w);
        for s in ranked {
            out.serialize(s)?;
        }
        out.flush()
    }

    fn to_file<F>(&self, write: F) -> Result<(), IoError>
    where
        F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
    {
        let wrap = |e: std::io::Error| IoError::WriteFile {
            path: self.path.clone(),
            source: e,
        };
        let mut w = BufWriter::new(File::create(&self.path).map_err(wrap)?);
        write(&mut w).map_err(wrap)?;
        w.flush().map_err(wrap)
    }
}

fn write_delimited<W: Write>(w: W, delimiter: u8, ranked: &[(&str, f64)]) -> std::io::Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(w);
    for (name, score) in ranked {
        out.write_record([*name, format_score(*score).as_str()])?;
    }
    out.flush()
}

/// Renders a score the way `java.lang.Double::toString` does: always a
/// fractional part, `Infinity`/`NaN` spelled out, and `1.0E-4` style
/// scientific notation outside `[1e-3, 1e7)`.
fn format_score(score: f64) -> String {
    if score.is_nan() {
        return "NaN".to_string();
    }
    if score.is_infinite() {
        return if score > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = score.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = score.to_string();
        return if plain.contains('.') { plain } else { plain + ".0" };
    }

    let sci = format!("{score:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

fn write_json<W: Write, T: Serialize>(mut w: W, value: &T) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut w, value)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::blank_cell;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn ratios() -> GainRatios {
        let mut m = BTreeMap::new();
        m.insert("Color".to_string(), f64::NAN);
        m.insert("Outlook".to_string(), 0.75);
        m.insert("Weather".to_string(), 0.0);
        GainRatios::new(m)
    }

    fn render(format: OutputFormat, policy: NonFinitePolicy) -> String {
        let mut buf = Vec::new();
        ResultWriter::new(Path::new("out"), format, policy)
            .write_ratios_to(&mut buf, &ratios())
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_is_ascending_without_header() {
        let text = render(OutputFormat::Csv, NonFinitePolicy::Last);
        assert_eq!(text, "Weather,0.0\nOutlook,0.75\nColor,NaN\n");
    }

    #[test]
    fn tsv_with_nan_first() {
        let text = render(OutputFormat::Tsv, NonFinitePolicy::First);
        assert_eq!(text, "Color\tNaN\nWeather\t0.0\nOutlook\t0.75\n");
    }

    #[test]
    fn infinities_are_spelled_out() {
        let mut m = BTreeMap::new();
        m.insert("A".to_string(), f64::INFINITY);
        m.insert("B".to_string(), 0.0);
        m.insert("C".to_string(), f64::NEG_INFINITY);
        let mut buf = Vec::new();
        ResultWriter::new(Path::new("out"), OutputFormat::Csv, NonFinitePolicy::Last)
            .write_ratios_to(&mut buf, &GainRatios::new(m))
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "C,-Infinity\nB,0.0\nA,Infinity\n"
        );
    }

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(-0.0), "-0.0");
        assert_eq!(format_score(0.125), "0.125");
        assert_eq!(format_score(0.0001), "1.0E-4");
        assert_eq!(format_score(0.00025), "2.5E-4");
        assert_eq!(format_score(12345678.0), "1.2345678E7");
        assert_eq!(format_score(f64::NAN), "NaN");
    }

    #[test]
    fn json_renders_nan_as_null() {
        let text = render(OutputFormat::Json, NonFinitePolicy::Last);
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["name"], "Weather");
        assert_eq!(arr[1]["gain_ratio"], 0.75);
        assert!(arr[2]["gain_ratio"].is_null());
    }

    #[test]
    fn scores_csv_has_header_and_all_columns() {
        let scores = blank_cell().scores();
        let mut buf = Vec::new();
        ResultWriter::new(Path::new("out"), OutputFormat::Csv, NonFinitePolicy::Last)
            .write_scores_to(&mut buf, &scores)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,support,entropy,conditional_entropy,gain,intrinsic_information,gain_ratio"
        );
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.csv");
        ResultWriter::new(&path, OutputFormat::Csv, NonFinitePolicy::Last)
            .write(&ratios())
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("Weather,0.0"));
    }

    #[test]
    fn unwritable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("result.csv");
        let err = ResultWriter::new(&path, OutputFormat::Json, NonFinitePolicy::Last)
            .write(&ratios())
            .unwrap_err();
        assert!(matches!(err, IoError::WriteFile { .. }));
    }
}
