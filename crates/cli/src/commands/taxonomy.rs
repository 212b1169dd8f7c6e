//! Taxonomy command - show the engagement cluster taxonomy

use anyhow::{Context, Result};
use engage_lens_domain::EngagementTaxonomy;

use crate::args::TaxonomyArgs;

pub async fn execute(args: TaxonomyArgs) -> Result<()> {
    let taxonomy = EngagementTaxonomy::standard();

    if args.json {
        let json = serde_json::to_string_pretty(taxonomy.profiles())
            .context("Failed to serialize taxonomy")?;
        println!("{}", json);
    } else {
        println!("Engagement Clusters ({} defined)", taxonomy.len());
        println!("========================");
        println!();

        for profile in taxonomy.profiles() {
            println!("Cluster {}: {} {}", profile.id, profile.color, profile.label);
            println!("  {}", profile.description);
            println!();
        }

        println!("Cluster IDs carry no severity ordering; meaning comes from this table only.");
    }

    Ok(())
}
