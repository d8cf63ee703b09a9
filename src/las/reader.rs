//! LAS 2.0 text parsing

use tracing::debug;

use crate::types::{Curve, Sample, WellLog};

use super::{find_item, well_identifier, HeaderItem, LasError, LasFile, DEFAULT_NULL_VALUE};

/// Tolerance when matching a data value against the declared NULL value.
const NULL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Version,
    Well,
    Curve,
    Parameter,
    Other,
    Ascii,
    Unknown,
}

impl Section {
    fn from_marker(line: &str) -> Self {
        match line[1..].chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curve,
            Some('P') => Self::Parameter,
            Some('O') => Self::Other,
            Some('A') => Self::Ascii,
            _ => Self::Unknown,
        }
    }
}

/// Split a `MNEM.UNIT VALUE : DESCRIPTION` line.
///
/// The unit runs from the first `.` to the next whitespace (empty when a space
/// follows the dot). The value/description split is the last `:` on the line.
pub fn parse_header_line(line: &str, line_no: usize) -> Result<HeaderItem, LasError> {
    let dot = line.find('.').ok_or_else(|| LasError::Header {
        line: line_no,
        message: format!("missing '.' after mnemonic in '{}'", line.trim()),
    })?;

    let mnemonic = line[..dot].trim();
    if mnemonic.is_empty() {
        return Err(LasError::Header {
            line: line_no,
            message: "empty mnemonic".to_string(),
        });
    }

    let rest = &line[dot + 1..];
    let unit_end = rest
        .find(|c: char| c.is_whitespace() || c == ':')
        .unwrap_or(rest.len());
    let (unit, after) = rest.split_at(unit_end);

    let (value, description) = match after.rfind(':') {
        Some(colon) => (after[..colon].trim(), after[colon + 1..].trim()),
        None => (after.trim(), ""),
    };

    Ok(HeaderItem::new(mnemonic, unit, value, description))
}

fn parse_data_value(token: &str, null_value: f64, line_no: usize) -> Result<Sample, LasError> {
    let v: f64 = token.parse().map_err(|_| LasError::Data {
        line: line_no,
        message: format!("'{token}' is not a number"),
    })?;
    if !v.is_finite() || (v - null_value).abs() < NULL_TOLERANCE {
        Ok(None)
    } else {
        Ok(Some(v))
    }
}

fn check_version(version: &[HeaderItem]) -> Result<(), LasError> {
    if let Some(vers) = find_item(version, "VERS") {
        if vers.value.trim().starts_with('3') {
            return Err(LasError::Unsupported(format!("LAS version {}", vers.value)));
        }
    }
    if let Some(wrap) = find_item(version, "WRAP") {
        if wrap.value.trim().eq_ignore_ascii_case("YES") {
            return Err(LasError::Unsupported("wrapped data (WRAP = YES)".to_string()));
        }
    }
    Ok(())
}

fn header_number(well: &[HeaderItem], mnemonic: &'static str) -> Result<Option<f64>, LasError> {
    find_item(well, mnemonic)
        .map(|item| {
            item.value
                .trim()
                .parse::<f64>()
                .map_err(|_| LasError::NonNumericHeader {
                    mnemonic,
                    value: item.value.clone(),
                })
        })
        .transpose()
}

pub(super) fn parse(text: &str, fallback_id: &str) -> Result<LasFile, LasError> {
    let mut section = Section::None;
    let mut seen_well = false;
    let mut seen_ascii = false;

    let mut version = Vec::new();
    let mut well = Vec::new();
    let mut curve_items = Vec::new();
    let mut parameters = Vec::new();
    let mut other = Vec::new();
    let mut data_lines: Vec<(usize, &str)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        if trimmed.starts_with('~') {
            section = Section::from_marker(trimmed);
            seen_well |= section == Section::Well;
            seen_ascii |= section == Section::Ascii;
            continue;
        }
        if section == Section::Other {
            other.push(line.to_string());
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match section {
            Section::Version => version.push(parse_header_line(trimmed, line_no)?),
            Section::Well => well.push(parse_header_line(trimmed, line_no)?),
            Section::Curve => curve_items.push(parse_header_line(trimmed, line_no)?),
            Section::Parameter => parameters.push(parse_header_line(trimmed, line_no)?),
            Section::Ascii => data_lines.push((line_no, trimmed)),
            Section::None => {
                return Err(LasError::Header {
                    line: line_no,
                    message: "content before the first section marker".to_string(),
                })
            }
            Section::Other | Section::Unknown => {}
        }
    }

    check_version(&version)?;
    if !seen_well {
        return Err(LasError::MissingSection("Well"));
    }
    if curve_items.is_empty() {
        return Err(LasError::MissingSection("Curve"));
    }
    if !seen_ascii {
        return Err(LasError::MissingSection("ASCII"));
    }

    let null_value = header_number(&well, "NULL")?.unwrap_or(DEFAULT_NULL_VALUE);
    let step = header_number(&well, "STEP")?.ok_or(LasError::MissingHeader("STEP"))?;

    let n_curves = curve_items.len();
    let mut columns: Vec<Vec<Sample>> = vec![Vec::with_capacity(data_lines.len()); n_curves];
    for (line_no, line) in data_lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != n_curves {
            return Err(LasError::Data {
                line: line_no,
                message: format!("expected {n_curves} values, found {}", tokens.len()),
            });
        }
        for (column, token) in columns.iter_mut().zip(tokens) {
            column.push(parse_data_value(token, null_value, line_no)?);
        }
    }

    let mut curves = curve_items
        .into_iter()
        .zip(columns)
        .map(|(item, values)| Curve {
            mnemonic: item.mnemonic,
            unit: item.unit,
            description: item.description,
            values,
        });

    let depth = curves.next().ok_or(LasError::MissingSection("Curve"))?;
    let well_id = well_identifier(&well, fallback_id);
    let mut log = WellLog::new(well_id, step, depth);
    for curve in curves {
        log.insert(curve);
    }

    debug!(
        well = %log.well_id,
        samples = log.len(),
        curves = log.curves.len(),
        step,
        "Parsed LAS file"
    );

    Ok(LasFile {
        version,
        well,
        parameters,
        other,
        null_value,
        log,
    })
}
