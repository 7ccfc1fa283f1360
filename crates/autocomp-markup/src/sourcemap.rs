//! Version 3 source maps for a single splice.
//!
//! Columns are counted in UTF-16 code units, matching what JavaScript
//! tooling expects.

use serde::Serialize;

use crate::splice::Splice;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Builds a map from the output of `splice` (or the unchanged text when
    /// `splice` is `None`) back to `source`.
    ///
    /// Every output line that carries original text gets a segment pointing
    /// at its origin; lines made only of inserted text are left unmapped.
    pub fn for_splice(source: &str, splice: Option<&Splice>, file: &str) -> Self {
        let original_lines = source.split('\n').count();
        let mut lines: Vec<Vec<(u32, u32, u32)>> = Vec::new();

        match splice {
            None => {
                for line in 0..original_lines {
                    lines.push(vec![(0, line as u32, 0)]);
                }
            }
            Some(splice) => {
                let before = &source[..splice.offset];
                let splice_line = before.matches('\n').count();
                let splice_col = utf16_len(before.rsplit('\n').next().unwrap_or(""));
                let inserted_breaks = splice.text.matches('\n').count();
                let tail_len = utf16_len(splice.text.rsplit('\n').next().unwrap_or(""));

                for line in 0..splice_line {
                    lines.push(vec![(0, line as u32, 0)]);
                }

                let line = splice_line as u32;
                if inserted_breaks == 0 {
                    lines.push(vec![(0, line, 0), (splice_col + tail_len, line, splice_col)]);
                } else {
                    lines.push(vec![(0, line, 0)]);
                    for _ in 1..inserted_breaks {
                        lines.push(Vec::new());
                    }
                    lines.push(vec![(tail_len, line, splice_col)]);
                }

                for line in splice_line + 1..original_lines {
                    lines.push(vec![(0, line as u32, 0)]);
                }
            }
        }

        Self {
            version: 3,
            file: file.to_string(),
            sources: vec![file.to_string()],
            sources_content: vec![source.to_string()],
            names: Vec::new(),
            mappings: encode_mappings(&lines),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Encodes `(generated column, source line, source column)` segments, all in
/// source 0.
fn encode_mappings(lines: &[Vec<(u32, u32, u32)>]) -> String {
    let mut out = String::new();
    let mut prev_src_line = 0i64;
    let mut prev_src_col = 0i64;

    for (i, segments) in lines.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let mut prev_gen_col = 0i64;
        for (j, &(gen_col, src_line, src_col)) in segments.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            encode_vlq(&mut out, gen_col as i64 - prev_gen_col);
            // Single source, so the source index delta is always 0 after the first
            encode_vlq(&mut out, 0);
            encode_vlq(&mut out, src_line as i64 - prev_src_line);
            encode_vlq(&mut out, src_col as i64 - prev_src_col);
            prev_gen_col = gen_col as i64;
            prev_src_line = src_line as i64;
            prev_src_col = src_col as i64;
        }
    }

    out
}

fn encode_vlq(out: &mut String, value: i64) {
    let mut v = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    loop {
        let mut digit = v & 31;
        v >>= 5;
        if v > 0 {
            digit |= 32;
        }
        out.push(BASE64[digit as usize] as char);
        if v == 0 {
            break;
        }
    }
}
