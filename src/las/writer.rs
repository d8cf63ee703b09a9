//! LAS 2.0 text output

use std::fmt::{self, Write};

use crate::types::{Curve, Sample};

use super::{HeaderItem, LasFile};

fn default_version() -> Vec<HeaderItem> {
    vec![
        HeaderItem::new("VERS", "", "2.0", "CWLS LOG ASCII STANDARD - VERSION 2.0"),
        HeaderItem::new("WRAP", "", "NO", "ONE LINE PER DEPTH STEP"),
    ]
}

fn write_items<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a HeaderItem> + Clone,
{
    let mnem_w = items.clone().into_iter().map(|i| i.mnemonic.len()).max().unwrap_or(0);
    let unit_w = items.clone().into_iter().map(|i| i.unit.len()).max().unwrap_or(0);
    let value_w = items.clone().into_iter().map(|i| i.value.len()).max().unwrap_or(0);

    for item in items {
        writeln!(
            f,
            " {:<mnem_w$}.{:<unit_w$}  {:>value_w$} : {}",
            item.mnemonic, item.unit, item.value, item.description
        )?;
    }
    Ok(())
}

/// LAS 2.0 units end at the first space, so embedded whitespace is joined with `_`.
fn las_unit(unit: &str) -> String {
    unit.split_whitespace().collect::<Vec<_>>().join("_")
}

fn curve_item(curve: &Curve) -> HeaderItem {
    HeaderItem::new(&curve.mnemonic, &las_unit(&curve.unit), "", &curve.description)
}

fn format_sample(sample: Sample, null_value: f64, out: &mut String) -> fmt::Result {
    match sample {
        Some(v) => write!(out, " {v:>14.6}"),
        None => write!(out, " {null_value:>14.4}"),
    }
}

impl fmt::Display for LasFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults;
        let version = if self.version.is_empty() {
            defaults = default_version();
            &defaults
        } else {
            &self.version
        };

        writeln!(f, "~Version Information")?;
        write_items(f, version.iter())?;

        writeln!(f, "~Well Information")?;
        write_items(f, self.well.iter())?;

        let log = &self.log;
        let curve_items: Vec<HeaderItem> = std::iter::once(&log.depth)
            .chain(log.curves.iter())
            .map(curve_item)
            .collect();
        writeln!(f, "~Curve Information")?;
        write_items(f, curve_items.iter())?;

        if !self.parameters.is_empty() {
            writeln!(f, "~Parameter Information")?;
            write_items(f, self.parameters.iter())?;
        }

        if self.other.iter().any(|l| !l.trim().is_empty()) {
            writeln!(f, "~Other Information")?;
            for line in &self.other {
                writeln!(f, "{line}")?;
            }
        }

        writeln!(f, "~ASCII")?;
        let mut row = String::new();
        for i in 0..log.len() {
            row.clear();
            for curve in std::iter::once(&log.depth).chain(log.curves.iter()) {
                let sample = curve.values.get(i).copied().flatten();
                format_sample(sample, self.null_value, &mut row)?;
            }
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
