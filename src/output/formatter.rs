use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::cli::OutputFormat;
use crate::engine::Resolution;

use super::{Binding, UnitReport};

#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub units_resolved: usize,
    pub units_failed: usize,
    pub total_bindings: usize,
    pub total_unresolved: usize,
    pub units: &'a [UnitReport],
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(reports: &[UnitReport], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&Self::build_output(reports))?),
            OutputFormat::Text => Ok(Self::format_text(reports)),
        }
    }

    pub fn build_output(reports: &[UnitReport]) -> JsonOutput<'_> {
        let units_failed = reports.iter().filter(|r| r.is_failed()).count();
        JsonOutput {
            units_resolved: reports.len() - units_failed,
            units_failed,
            total_bindings: reports.iter().map(|r| r.bindings.len()).sum(),
            total_unresolved: reports.iter().map(|r| r.unresolved.len()).sum(),
            units: reports,
        }
    }

    fn format_text(reports: &[UnitReport]) -> String {
        let mut out = String::new();
        for report in reports {
            if let Some(error) = &report.error {
                let _ = writeln!(out, "{}: error: {error}", report.file);
                continue;
            }
            let _ = writeln!(
                out,
                "{} ({}): {} resolved, {} unresolved, {} implicit members",
                report.file,
                report.translation_unit,
                report.resolved,
                report.unresolved.len(),
                report.implicit_members
            );
            for binding in &report.bindings {
                let _ = writeln!(out, "  {}", Self::format_binding(binding));
            }
            for duplicate in &report.duplicates {
                let _ = writeln!(
                    out,
                    "  duplicate '{}' {} ignored, first declared at {}",
                    duplicate.name, duplicate.duplicate, duplicate.first
                );
            }
        }
        out
    }

    fn format_binding(binding: &Binding) -> String {
        let position = match (binding.line, binding.column) {
            (Some(line), Some(column)) => format!("{line}:{column}"),
            _ => "-".to_string(),
        };
        let target = match &binding.resolution {
            Resolution::Unresolved => "unresolved".to_string(),
            Resolution::Single(_) | Resolution::Ambiguous(_) => binding
                .declarations
                .iter()
                .map(|d| format!("{} {} {}", d.kind, d.name, d.id))
                .collect::<Vec<_>>()
                .join(" | "),
        };
        let marker = if binding.resolution.is_ambiguous() {
            " (ambiguous)"
        } else if binding.implicit_base {
            " (implicit receiver)"
        } else {
            ""
        };
        format!(
            "{position} {} {} -> {target}{marker}",
            binding.name, binding.node
        )
    }
}
