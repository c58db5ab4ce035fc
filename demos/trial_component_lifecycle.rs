//! Trial Component Lifecycle Example
//!
//! Creates, updates, lists and deletes trial components against the
//! in-memory service, logging every remote call.
//!
//! Run with: RUST_LOG=smexperiments=debug cargo run --example trial_component_lifecycle

use anyhow::{Context, Result};
use smexperiments::client::MemoryClient;
use smexperiments::experiment::{
    PrimaryStatus, SortBy, SortOrder, TrialComponent, TrialComponentArtifact,
    TrialComponentFilter, TrialComponentParameterValue, TrialComponentStatus,
};
use smexperiments::record::Mapper;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("=== smexperiments Trial Component Lifecycle ===\n");

    let client = MemoryClient::new();
    let mapper = Mapper::builder(&client)
        .page_size(2)
        .build()
        .context("building mapper")?;
    mapper
        .validate::<TrialComponent>()
        .context("trial component declarations")?;

    // -------------------------------------------------------------------------
    // 1. Create trial components
    // -------------------------------------------------------------------------
    println!("1. Creating trial components...");

    let mut preprocess = TrialComponent::create(&mapper, "preprocess", Some("Preprocessing"))?;
    let mut train = TrialComponent::create(&mapper, "train", Some("Training"))?;
    let evaluate = TrialComponent::create(&mapper, "evaluate", None)?;
    for tc in [&preprocess, &train, &evaluate] {
        println!(
            "   {} -> {}",
            tc.trial_component_name().unwrap_or_default(),
            tc.trial_component_arn().unwrap_or_default()
        );
    }
    client.associate("preprocess", "trial-1", "churn")?;
    client.associate("train", "trial-1", "churn")?;

    // -------------------------------------------------------------------------
    // 2. Record work and save
    // -------------------------------------------------------------------------
    println!("\n2. Recording parameters and artifacts...");

    preprocess.start();
    preprocess.set_parameter("train_split", TrialComponentParameterValue::number(0.8));
    preprocess.set_output_artifact(
        "processed",
        TrialComponentArtifact::new("s3://bucket/churn/processed/").with_media_type("text/csv"),
    );
    preprocess.complete(TrialComponentStatus::new(PrimaryStatus::Completed));
    preprocess.save(&mapper)?;

    train.start();
    train.set_parameter("optimizer", TrialComponentParameterValue::string("adam"));
    train.set_parameter("learning_rate", TrialComponentParameterValue::number(0.001));
    train.save(&mapper)?;

    let reloaded = TrialComponent::load(&mapper, "train")?;
    println!(
        "   train status: {:?}",
        reloaded
            .status()
            .and_then(TrialComponentStatus::primary_status)
    );
    if let Some(parameters) = reloaded.parameters() {
        for (name, value) in parameters.iter() {
            println!(
                "   {name} = {}",
                value
                    .string_value()
                    .map(str::to_string)
                    .or_else(|| value.number_value().map(|n| n.to_string()))
                    .unwrap_or_default()
            );
        }
    }

    // -------------------------------------------------------------------------
    // 3. List
    // -------------------------------------------------------------------------
    println!("\n3. Listing trial components of experiment 'churn'...");

    let filter = TrialComponentFilter::new()
        .experiment_name("churn")
        .sort_by(SortBy::Name)
        .sort_order(SortOrder::Ascending);
    let mut pages = TrialComponent::list(&mapper, &filter);
    for summary in pages.by_ref() {
        let summary = summary?;
        println!(
            "   {} ({:?})",
            summary.trial_component_name().unwrap_or_default(),
            summary.status().and_then(TrialComponentStatus::primary_status)
        );
    }
    println!("   {} page request(s)", pages.requests());

    // -------------------------------------------------------------------------
    // 4. Delete
    // -------------------------------------------------------------------------
    println!("\n4. Deleting...");

    for tc in [preprocess, train, evaluate] {
        tc.delete(&mapper)?;
    }
    match TrialComponent::load(&mapper, "train") {
        Err(error) if error.is_not_found() => println!("   train is gone: {error}"),
        Err(error) => return Err(error.into()),
        Ok(_) => anyhow::bail!("train still exists"),
    }

    println!("\n=== Done ===");
    Ok(())
}
