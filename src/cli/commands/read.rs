//! Implementation of the `sidebyside read` command.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{build_app_state, load_config};
use crate::adapters::http::odata::entity_set_payload;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::infrastructure::logging::LoggerImpl;
use crate::services::entity_router::{EntitySet, ReadContext};

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Service name, e.g. northwind or catalog
    pub service: String,

    /// Entity segment, e.g. CustomProducts or Books(1)
    pub segment: String,

    /// Query option passed through to the handler, as name=value
    #[arg(short, long = "query", value_parser = parse_query_option)]
    pub query: Vec<(String, String)>,

    /// Configuration file to use instead of .sidebyside/config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn parse_query_option(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

#[derive(Debug, serde::Serialize)]
pub struct ReadOutput {
    #[serde(skip)]
    pub set: EntitySet,
    pub service: String,
}

impl CommandOutput for ReadOutput {
    fn to_human(&self) -> String {
        let count = self.set.records.len();
        format!(
            "{}/{}: {} record{}\n{}",
            self.service,
            self.set.entity,
            count,
            if count == 1 { "" } else { "s" },
            TableFormatter::new().format_entity_set(&self.set)
        )
    }

    fn to_json(&self) -> Value {
        entity_set_payload(self.set.clone())
    }
}

pub async fn execute(args: ReadArgs, json_mode: bool) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;

    let state = build_app_state(&config).await?;

    let query: BTreeMap<String, String> = args.query.into_iter().collect();
    let ctx = ReadContext::parse(&args.service, &args.segment)?.with_query(query);
    let set = state
        .entities
        .dispatch(ctx)
        .await
        .with_context(|| format!("Failed to read {}/{}", args.service, args.segment))?;

    output(
        &ReadOutput {
            set,
            service: args.service,
        },
        json_mode,
    );
    Ok(())
}
