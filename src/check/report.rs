//! Dependency check summary.

use crate::ui::UserInterface;

use super::probe::PackageCheck;

const RULE_WIDTH: usize = 50;

/// Collected results of a dependency check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    checks: Vec<PackageCheck>,
}

impl CheckReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one package result.
    pub fn push(&mut self, check: PackageCheck) {
        self.checks.push(check);
    }

    /// All results, in check order.
    pub fn checks(&self) -> &[PackageCheck] {
        &self.checks
    }

    /// Module names that failed to import.
    pub fn missing_modules(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| !c.is_installed())
            .map(|c| c.package.module.as_str())
            .collect()
    }

    /// Display names that imported.
    pub fn installed_names(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.is_installed())
            .map(|c| c.package.name.as_str())
            .collect()
    }

    /// Whether every package imported.
    pub fn all_installed(&self) -> bool {
        self.checks.iter().all(PackageCheck::is_installed)
    }

    /// Exit status: 0 when complete, 1 when anything is missing.
    pub fn exit_code(&self) -> i32 {
        if self.all_installed() {
            0
        } else {
            1
        }
    }

    /// Render the summary block that follows the per-package lines.
    pub fn render_summary(&self, ui: &mut dyn UserInterface) {
        ui.message("");
        ui.message(&"=".repeat(RULE_WIDTH));

        let missing = self.missing_modules();
        if missing.is_empty() {
            ui.success("All required packages are installed!");
            ui.message(&format!("Installed: {}", self.installed_names().join(", ")));
            return;
        }

        let label = if missing.len() == 1 {
            "package"
        } else {
            "packages"
        };
        ui.error(&format!(
            "Missing {} {}: {}",
            missing.len(),
            label,
            missing.join(", ")
        ));
        ui.message("");
        ui.message("Install them with:");
        ui.message(&format!("  pip install {}", missing.join(" ")));
        ui.message("");
        ui.message("Or from requirements.txt:");
        ui.message("  pip install -r requirements.txt");
    }
}
