use botanica_core::catalog::Catalog;
use botanica_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

use super::{CommandResult, EXIT_CATALOG_FAILURE, EXIT_CONFIG_FAILURE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    fn failed(&self, name: &str) -> bool {
        self.checks.iter().any(|check| check.name == name && check.status == CheckStatus::Fail)
    }

    fn exit_code(&self) -> u8 {
        if self.failed("config_validation") {
            EXIT_CONFIG_FAILURE
        } else if self.failed("catalog_load") || self.failed("catalog_integrity") {
            EXIT_CATALOG_FAILURE
        } else {
            0
        }
    }
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = report.exit_code();

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.extend(check_catalog(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["catalog_load", "catalog_integrity"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> Vec<DoctorCheck> {
    let source = config
        .catalog
        .path
        .as_deref()
        .map(|path| format!("`{}`", path.display()))
        .unwrap_or_else(|| "built-in sample".to_string());

    let catalog = match Catalog::load_or_sample(config.catalog.path.as_deref()) {
        Ok(catalog) => catalog,
        Err(error) => {
            return vec![
                DoctorCheck {
                    name: "catalog_load",
                    status: CheckStatus::Fail,
                    details: error.to_string(),
                },
                DoctorCheck {
                    name: "catalog_integrity",
                    status: CheckStatus::Skipped,
                    details: "skipped because the catalog did not load".to_string(),
                },
            ];
        }
    };

    let load = DoctorCheck {
        name: "catalog_load",
        status: CheckStatus::Pass,
        details: format!("{} products loaded from {source}", catalog.len()),
    };

    let issues = catalog.validate();
    let integrity = if catalog.is_empty() {
        DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: "catalog has no products".to_string(),
        }
    } else if issues.is_empty() {
        DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Pass,
            details: "every product has a name, parseable prices and a rating within 0-5"
                .to_string(),
        }
    } else {
        let findings = issues
            .iter()
            .map(|issue| format!("product {} {}: {}", issue.product_id, issue.field, issue.message))
            .collect::<Vec<_>>()
            .join("; ");
        DoctorCheck { name: "catalog_integrity", status: CheckStatus::Fail, details: findings }
    };

    vec![load, integrity]
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
