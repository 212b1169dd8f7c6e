//! Doctor command - validate configuration and show status

use anyhow::Result;
use engage_lens_adapters::{models::FsModelStore, posts::SqlitePostSource};
use engage_lens_domain::{ClusterPredictor, EngagementTaxonomy};
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    model: CheckResult,
    source: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        model: CheckResult::error("Not checked"),
        source: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    // Check config
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.model = check_model(config);
        report.source = check_source(config).await;
    }

    // Determine overall status
    let checks = [&report.config, &report.model, &report.source];
    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    // Output report
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

/// Loading through the predictor also exercises the schema validation, so
/// a mismatched artifact pair is caught here and not at analyze time.
fn check_model(config: &AppConfig) -> CheckResult {
    let store = FsModelStore::new(&config.general.models_dir, &config.general.model_name);
    let model_dir = store.model_dir().display().to_string();
    let predictor = ClusterPredictor::new(store, EngagementTaxonomy::standard());

    match predictor.artifacts() {
        Ok(artifacts) => CheckResult::ok(format!(
            "Model '{}' loaded ({} clusters)",
            config.general.model_name,
            artifacts.kmeans.centroids.len()
        ))
        .with_details(serde_json::json!({
            "model_dir": model_dir,
            "fingerprint": artifacts.fingerprint,
            "feature_names": artifacts.scaler.feature_names,
        })),
        Err(e) => CheckResult::error(format!("Model check failed: {}", e)),
    }
}

async fn check_source(config: &AppConfig) -> CheckResult {
    match config.source.kind.as_str() {
        "json" => {
            let path = &config.source.posts_file;
            if path.exists() {
                CheckResult::ok(format!("Posts file: {}", path.display()))
            } else {
                CheckResult::warn(format!("Posts file does not exist: {}", path.display()))
            }
        }
        "sqlite" => match SqlitePostSource::new(&config.source.db_path).await {
            Ok(_) => CheckResult::ok(format!("Posts database: {}", config.source.db_path.display())),
            Err(e) => CheckResult::error(format!("Failed to open posts database: {}", e)),
        },
        "stub" => CheckResult::ok("Source: stub (offline)".to_string()),
        other => CheckResult::error(format!("Unknown source kind: {}", other)),
    }
}

fn print_report(report: &DoctorReport) {
    println!("engage-lens doctor");
    println!("==================");
    println!();

    let rows = [
        ("Config", &report.config),
        ("Model", &report.model),
        ("Source", &report.source),
    ];

    for (name, check) in rows {
        let icon = match check.status.as_str() {
            "ok" => "✓",
            "warn" => "!",
            _ => "✗",
        };
        println!("{} {}: {}", icon, name, check.message);
        if let Some(ref details) = check.details {
            if let Some(fingerprint) = details.get("fingerprint").and_then(|v| v.as_str()) {
                println!("    fingerprint: {}", fingerprint);
            }
        }
    }

    println!();
    println!("Overall: {}", report.overall);
}
