use log::debug;
use rayon::prelude::*;

/// Reads a program written one binary literal per line, e.g.
///
/// ```text
/// 10000010 # LDI R0,8
/// 00000000
/// 00001000
/// ```
///
/// Text after `#` is ignored. A literal may carry a `0b` prefix and `_`
/// digit separators; values wider than a byte keep their low 8 bits. Lines
/// that do not hold a binary literal are skipped.
pub fn load(source: &str) -> Vec<u8> {
    source.par_lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<u8> {
    let code = line.split('#').next().unwrap_or("").trim();
    if code.is_empty() {
        return None;
    }

    let digits = code
        .strip_prefix("0b")
        .or(code.strip_prefix("0B"))
        .unwrap_or(code);
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        debug!("skipping {code:?}: misplaced digit separator");
        return None;
    }

    match u64::from_str_radix(&digits.replace('_', ""), 2) {
        // Cells are a byte wide.
        Ok(value) => Some((value & 0xFF) as u8),
        Err(err) => {
            debug!("skipping {code:?}: {err}");
            None
        }
    }
}
