//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary of the unified model for
//! terminal usage.

use super::{ModelReporter, ReportError, ReportFormat};
use crate::model::{Component, UnifiedModel, UNKNOWN_LICENSE};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Coarse license classification for the summary breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LicenseFamily {
    Permissive,
    Copyleft,
    Other,
    Unknown,
}

/// Classify a license string using lax SPDX expression parsing, with
/// substring fallback for non-standard expressions.
fn license_family(license: &str) -> LicenseFamily {
    if license.is_empty() || license == UNKNOWN_LICENSE || license.contains("NOASSERTION") {
        return LicenseFamily::Unknown;
    }

    if let Ok(expr) = spdx::Expression::parse_mode(license, spdx::ParseMode::LAX) {
        let mut copyleft = false;
        let mut permissive = false;
        for req in expr.requirements() {
            if let spdx::LicenseItem::Spdx { id, .. } = req.req.license {
                if id.is_copyleft() {
                    copyleft = true;
                } else if id.is_osi_approved() || id.is_fsf_free_libre() {
                    permissive = true;
                }
            }
        }
        return if copyleft {
            LicenseFamily::Copyleft
        } else if permissive {
            LicenseFamily::Permissive
        } else {
            LicenseFamily::Other
        };
    }

    // Fallback for expressions the spdx crate cannot parse
    let lower = license.to_lowercase();
    if lower.contains("gpl") || lower.contains("mpl") {
        LicenseFamily::Copyleft
    } else if lower.contains("mit")
        || lower.contains("apache")
        || lower.contains("bsd")
        || lower.contains("isc")
    {
        LicenseFamily::Permissive
    } else {
        LicenseFamily::Other
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
    /// How many most-depended-upon components to list
    top_limit: usize,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colored: true,
            top_limit: 5,
        }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Set the length of the most-depended-upon list
    #[must_use]
    pub const fn top_limit(mut self, limit: usize) -> Self {
        self.top_limit = limit;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelReporter for SummaryReporter {
    fn generate(
        &self,
        model: &UnifiedModel,
        components: &[&Component],
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Unified SBOM Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));

        lines.push(format!(
            "{}  {}",
            self.color("Project:", "cyan"),
            model.project_name
        ));
        lines.push(format!(
            "{}  {}",
            self.color("Analyzed:", "cyan"),
            model.timestamp.to_rfc3339()
        ));
        lines.push(format!(
            "{}  {} total ({} direct, {} transitive), {} roots",
            self.color("Size:", "cyan"),
            model.total_components,
            model.direct_count,
            model.transitive_count,
            model.roots.len()
        ));
        if components.len() != model.total_components {
            lines.push(format!(
                "{}  {} of {} components match the active filter",
                self.color("View:", "cyan"),
                components.len(),
                model.total_components
            ));
        }

        lines.push(String::new());
        lines.push(self.color("Vulnerabilities:", "bold"));
        let counts = model.severity_counts();
        if counts.total() == 0 {
            lines.push("  none reported in input".to_string());
        } else {
            if counts.critical > 0 {
                lines.push(format!(
                    "  {} {} critical",
                    self.color("✗", "red"),
                    counts.critical
                ));
            }
            if counts.high > 0 {
                lines.push(format!("  {} {} high", self.color("✗", "red"), counts.high));
            }
            if counts.medium > 0 {
                lines.push(format!(
                    "  {} {} medium",
                    self.color("!", "yellow"),
                    counts.medium
                ));
            }
            if counts.low > 0 {
                lines.push(format!("  {} {} low", self.color("!", "yellow"), counts.low));
            }
            if counts.info > 0 {
                lines.push(format!("  {} {} info", self.color("·", "dim"), counts.info));
            }
        }

        let index = model.build_index();
        let ranked = index.most_depended_upon(self.top_limit);
        if !ranked.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Most depended upon:", "bold"));
            for (id, count) in &ranked {
                let display = model
                    .get(id)
                    .map_or_else(|| id.value().to_string(), Component::display_name);
                lines.push(format!("  {display}  ({count} dependents)"));
            }
        }

        let mut permissive = 0;
        let mut copyleft = 0;
        let mut other = 0;
        let mut unknown = 0;
        for comp in components {
            match license_family(&comp.license) {
                LicenseFamily::Permissive => permissive += 1,
                LicenseFamily::Copyleft => copyleft += 1,
                LicenseFamily::Other => other += 1,
                LicenseFamily::Unknown => unknown += 1,
            }
        }
        lines.push(String::new());
        lines.push(self.color("Licenses:", "bold"));
        lines.push(format!(
            "  {} permissive, {} copyleft, {} other, {} unknown",
            self.color(&permissive.to_string(), "green"),
            self.color(&copyleft.to_string(), "yellow"),
            other,
            unknown
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
