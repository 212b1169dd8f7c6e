//! Analyze command - run the engagement pipeline for one account

use anyhow::{Context, Result};
use engage_lens_adapters::{
    models::FsModelStore,
    posts::{JsonPostSource, SqlitePostSource, StubPostSource},
};
use engage_lens_domain::usecases::{AnalyzeConfig, AnalyzeError, AnalyzeUseCase};
use engage_lens_domain::{
    AnalysisReport, AssignError, ClusterPredictor, EngagementTaxonomy, FeatureMode, PostSource,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::AnalyzeArgs;
use crate::config::AppConfig;

pub async fn execute(args: AnalyzeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref()).unwrap_or_default();

    let mode: FeatureMode = args
        .mode
        .as_deref()
        .unwrap_or(&config.general.mode)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let model_name = args
        .model_name
        .as_deref()
        .unwrap_or(&config.general.model_name);

    let post_source = build_post_source(&args, &config).await?;
    let store = FsModelStore::new(&config.general.models_dir, model_name);
    let predictor = ClusterPredictor::new(store, EngagementTaxonomy::standard());
    let usecase = AnalyzeUseCase::new(post_source, predictor, AnalyzeConfig { mode });

    let report = match usecase.analyze(&args.account).await {
        Ok(report) => report,
        Err(e) => return Err(user_facing_error(e)),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    Ok(())
}

async fn build_post_source(
    args: &AnalyzeArgs,
    config: &AppConfig,
) -> Result<Arc<dyn PostSource>> {
    if let Some(ref posts_file) = args.posts_file {
        return Ok(Arc::new(JsonPostSource::new(posts_file)));
    }

    if let Some(ref db) = args.db {
        let source = SqlitePostSource::new(db)
            .await
            .context("Failed to open posts database")?;
        return Ok(Arc::new(source));
    }

    match config.source.kind.as_str() {
        "json" => Ok(Arc::new(JsonPostSource::new(&config.source.posts_file))),
        "sqlite" => {
            let source = SqlitePostSource::new(&config.source.db_path)
                .await
                .context("Failed to open posts database")?;
            Ok(Arc::new(source))
        }
        "stub" => Ok(Arc::new(StubPostSource::sample())),
        other => anyhow::bail!(
            "Unknown source kind '{}' (expected json, sqlite, or stub)",
            other
        ),
    }
}

/// Map pipeline failures onto distinct user-facing messages: "no data",
/// "no model" and "bad model schema" must never blur into one another.
fn user_facing_error(error: AnalyzeError) -> anyhow::Error {
    match &error {
        AnalyzeError::NoPosts(_)
        | AnalyzeError::NoValidPosts(_)
        | AnalyzeError::Assign(AssignError::NoData) => {
            anyhow::anyhow!("Nothing to analyze: {}", error)
        }
        AnalyzeError::Assign(AssignError::Model(_)) => {
            anyhow::anyhow!("Model unavailable: {}", error)
        }
        AnalyzeError::Assign(AssignError::SchemaMismatch(_)) => {
            anyhow::anyhow!("Bad model schema: {}", error)
        }
        AnalyzeError::Source(_) => anyhow::anyhow!("Post source error: {}", error),
    }
}

fn print_report(report: &AnalysisReport) {
    let taxonomy = EngagementTaxonomy::standard();

    println!("Engagement Analysis: @{}", report.account);
    println!("=====================");
    println!();
    println!("Mode: {}", report.mode);
    println!("Valid posts: {}", report.valid_posts);
    println!();

    let summary = &report.summary;
    if let Some(ref dominant) = summary.dominant_cluster {
        let marker = taxonomy
            .profiles()
            .iter()
            .find(|p| p.label == *dominant)
            .map(|p| p.color.as_str())
            .unwrap_or("");
        println!("Dominant cluster: {} {}", marker, dominant);
        if let Some(profile) = taxonomy.profiles().iter().find(|p| p.label == *dominant) {
            println!("  {}", profile.description);
        }
        println!();
    }

    println!("Totals:");
    println!("  Views:    {}", summary.total_views);
    println!("  Likes:    {}", summary.total_likes);
    println!("  Retweets: {}", summary.total_retweets);
    println!("  Replies:  {}", summary.total_replies);
    println!();
    println!("Average ratios:");
    println!("  Likes/Views:    {:.4}", summary.avg_likes_per_views);
    println!("  Retweets/Views: {:.4}", summary.avg_retweets_per_views);
    println!("  Replies/Views:  {:.4}", summary.avg_replies_per_views);
    println!();

    if !summary.cluster_distribution.is_empty() {
        println!("Cluster distribution:");
        for entry in &summary.cluster_distribution {
            println!("  {}: {}", entry.label, entry.count);
        }
        println!();
    }

    println!("Assignments:");
    for assignment in &report.assignments {
        let marker = taxonomy
            .get(assignment.cluster)
            .map(|p| p.color.as_str())
            .unwrap_or("");
        println!(
            "  {} {} {} (likes/views: {:.4}, retweets/views: {:.4}, replies/views: {:.4})",
            assignment.id,
            marker,
            assignment.cluster_label,
            assignment.features.likes_per_views,
            assignment.features.retweets_per_views,
            assignment.features.replies_per_views,
        );
    }
}
