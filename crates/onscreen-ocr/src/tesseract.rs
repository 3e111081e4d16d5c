use std::fs;
use std::path::PathBuf;
use std::process::Command;

use image::{ImageFormat, RgbaImage};
use onscreen_core::{OcrEngine, OcrError};
use onscreen_types::{Rect, TextFragment};
use tempfile::NamedTempFile;

use crate::languages::MODEL_EXTENSION;

// TSV levels
const LEVEL_LINE: u8 = 4;
const LEVEL_WORD: u8 = 5;

/// Runs the `tesseract` executable and reads its TSV output at line level
pub struct TesseractEngine {
    executable: PathBuf,
    tessdata: PathBuf,
    page_seg_mode: u8,
}

impl TesseractEngine {
    pub fn new(executable: impl Into<PathBuf>, tessdata: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            tessdata: tessdata.into(),
            page_seg_mode: 12,
        }
    }

    pub fn with_page_seg_mode(mut self, page_seg_mode: u8) -> Self {
        self.page_seg_mode = page_seg_mode;
        self
    }

    pub fn model_path(&self, language: &str) -> PathBuf {
        self.tessdata.join(format!("{language}.{MODEL_EXTENSION}"))
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &RgbaImage, language: &str) -> Result<Vec<TextFragment>, OcrError> {
        let model = self.model_path(language);
        if !model.is_file() {
            return Err(OcrError::MissingModel {
                language: language.to_string(),
                path: model,
            });
        }

        let input = NamedTempFile::with_suffix(".png")?;
        image.save_with_format(input.path(), ImageFormat::Png)?;

        // Tesseract appends .tsv to this base name
        let output = NamedTempFile::new()?;
        let output_base = output.path().to_string_lossy().to_string();

        tracing::debug!(
            "Running {} -l {} --psm {}",
            self.executable.display(),
            language,
            self.page_seg_mode
        );
        let result = Command::new(&self.executable)
            .arg(input.path())
            .arg(&output_base)
            .arg("--tessdata-dir")
            .arg(&self.tessdata)
            .arg("-l")
            .arg(language)
            .arg("--psm")
            .arg(self.page_seg_mode.to_string())
            .arg("tsv")
            .output()
            .map_err(|e| {
                OcrError::Engine(format!("failed to run {}: {e}", self.executable.display()))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(OcrError::Engine(stderr.trim().to_string()));
        }

        let tsv_path = format!("{output_base}.tsv");
        let tsv = fs::read_to_string(&tsv_path)?;
        let _ = fs::remove_file(&tsv_path);

        parse_tsv(&tsv)
    }
}

struct LineAccumulator {
    key: [u32; 4],
    bounds: Rect,
    words: Vec<String>,
}

/// Line-level fragments from Tesseract TSV.
///
/// Line rows (level 4) give the bounds, the words of that line (level 5)
/// give the text, joined by single spaces. Lines without words are skipped.
pub fn parse_tsv(tsv: &str) -> Result<Vec<TextFragment>, OcrError> {
    let mut lines: Vec<LineAccumulator> = Vec::new();

    for row in tsv.lines() {
        // level page block par line word left top width height conf text
        let fields: Vec<&str> = row.splitn(12, '\t').collect();
        if fields.len() < 11 {
            continue;
        }
        let Ok(level) = fields[0].parse::<u8>() else {
            // Header row
            continue;
        };

        match level {
            LEVEL_LINE => {
                let key = parse_key(&fields)?;
                let bounds = parse_bounds(&fields)?;
                lines.push(LineAccumulator {
                    key,
                    bounds,
                    words: Vec::new(),
                });
            }
            LEVEL_WORD => {
                let key = parse_key(&fields)?;
                let text = fields.get(11).map(|t| t.trim()).unwrap_or_default();
                if text.is_empty() {
                    continue;
                }
                match lines.last_mut() {
                    Some(line) if line.key == key => line.words.push(text.to_string()),
                    _ => {
                        return Err(OcrError::MalformedOutput(format!(
                            "word outside of its line: {row}"
                        )));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(lines
        .into_iter()
        .filter(|line| !line.words.is_empty())
        .map(|line| TextFragment::new(line.bounds, line.words.join(" ")))
        .collect())
}

fn parse_number(fields: &[&str], index: usize) -> Result<i32, OcrError> {
    fields[index].trim().parse().map_err(|_| {
        OcrError::MalformedOutput(format!("column {index} is not a number: {:?}", fields[index]))
    })
}

fn parse_key(fields: &[&str]) -> Result<[u32; 4], OcrError> {
    let mut key = [0; 4];
    for (slot, index) in key.iter_mut().zip(1..=4) {
        *slot = parse_number(fields, index)? as u32;
    }
    Ok(key)
}

fn parse_bounds(fields: &[&str]) -> Result<Rect, OcrError> {
    Ok(Rect::new(
        parse_number(fields, 6)?,
        parse_number(fields, 7)?,
        parse_number(fields, 8)?,
        parse_number(fields, 9)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn words_are_grouped_by_line() {
        let input = tsv(&[
            "1\t1\t0\t0\t0\t0\t0\t0\t400\t200\t-1\t",
            "2\t1\t1\t0\t0\t0\t10\t10\t300\t60\t-1\t",
            "3\t1\t1\t1\t0\t0\t10\t10\t300\t60\t-1\t",
            "4\t1\t1\t1\t1\t0\t10\t10\t120\t20\t-1\t",
            "5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t96.1\tHello",
            "5\t1\t1\t1\t1\t2\t70\t10\t60\t20\t95.0\tworld",
            "4\t1\t1\t1\t2\t0\t10\t40\t80\t22\t-1\t",
            "5\t1\t1\t1\t2\t1\t10\t40\t80\t22\t91.3\tagain",
        ]);

        let fragments = parse_tsv(&input).unwrap();
        assert_eq!(
            fragments,
            vec![
                TextFragment::new(Rect::new(10, 10, 120, 20), "Hello world"),
                TextFragment::new(Rect::new(10, 40, 80, 22), "again"),
            ]
        );
    }

    #[test]
    fn lines_without_text_are_skipped() {
        let input = tsv(&[
            "4\t1\t1\t1\t1\t0\t0\t0\t10\t10\t-1\t",
            "5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t-1\t ",
            "4\t1\t2\t1\t1\t0\t0\t50\t10\t10\t-1",
        ]);
        assert!(parse_tsv(&input).unwrap().is_empty());
    }

    #[test]
    fn bad_numbers_are_reported() {
        let input = tsv(&["4\t1\t1\t1\t1\t0\tx\t0\t10\t10\t-1\t"]);
        assert!(matches!(parse_tsv(&input), Err(OcrError::MalformedOutput(_))));
    }

    #[test]
    fn orphan_word_is_reported() {
        let input = tsv(&["5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t90\tlost"]);
        assert!(matches!(parse_tsv(&input), Err(OcrError::MalformedOutput(_))));
    }

    #[test]
    fn missing_model_fails_before_running() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TesseractEngine::new("does-not-exist", dir.path());
        let err = engine.recognize(&RgbaImage::new(4, 4), "jpn").unwrap_err();
        match err {
            OcrError::MissingModel { language, path } => {
                assert_eq!(language, "jpn");
                assert_eq!(path, dir.path().join("jpn.traineddata"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_executable_is_an_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("eng.traineddata"), b"").unwrap();
        let engine = TesseractEngine::new(dir.path().join("no-such-tesseract"), dir.path());
        let err = engine.recognize(&RgbaImage::new(4, 4), "eng").unwrap_err();
        assert!(matches!(err, OcrError::Engine(_)));
    }
}
