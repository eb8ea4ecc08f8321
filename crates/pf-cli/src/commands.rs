//! Subcommand implementations
//!
//! Each command reads its JSON input, runs the lab operation and returns
//! the rendered output; `main` prints it.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use pf_core::{
    PrizeCategorySpec, PrizeSelectionRow, SelectionDomain, SuccessCriteria, format_result_table,
};
use pf_lab::presets;
use pf_lab::{
    CategoryPrizes, LabConfig, SelectionEngine, SuccessEvaluator, SuccessRule,
    build_selection_table, create_category_spec, validate_table,
};

use crate::OutputFormat;

/// Body of the `chance` and `until` commands
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRequest {
    pub success_criteria: SuccessCriteria,
    pub selection_domains: Vec<SelectionDomain>,
    #[serde(default)]
    pub selection_count: Option<u32>,
    #[serde(default)]
    pub subset_size: Option<usize>,
}

impl SuccessRequest {
    /// Subset rule when `subsetSize` is present
    pub fn rule(&self) -> SuccessRule {
        match self.subset_size {
            Some(subset_size) => SuccessRule::AtLeast(subset_size),
            None => SuccessRule::All,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetSummary {
    id: String,
    name: String,
    description: String,
}

/// Shared state for one invocation
pub struct Session {
    config: LabConfig,
    format: OutputFormat,
}

impl Session {
    /// Load the configuration (if any) and apply the seed override
    pub fn open(config_path: Option<&Path>, seed: Option<u64>, format: OutputFormat) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => LabConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LabConfig::default(),
        };
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        log::debug!("Lab config: {:?}", config);

        Ok(Self { config, format })
    }

    pub fn category(
        &self,
        name: &str,
        share: f64,
        count: Option<u32>,
        names: Option<Vec<String>>,
    ) -> Result<String> {
        let prizes = match (count, names) {
            (Some(count), _) => CategoryPrizes::Count(count),
            (None, Some(names)) => CategoryPrizes::Names(names),
            (None, None) => return Err(anyhow!("Either --count or --names is required")),
        };
        let spec = create_category_spec(name, share, prizes)?;

        match self.format {
            OutputFormat::Json => to_json(&spec),
            OutputFormat::Text => Ok(render_spec(&spec)),
        }
    }

    pub fn table(&self, input: &str) -> Result<String> {
        let specs: Vec<PrizeCategorySpec> = parse_input(input)?;
        let table = build_selection_table(&specs)?;
        log::info!("Built table with {} rows from {} categories", table.len(), specs.len());

        match self.format {
            OutputFormat::Json => to_json(&table),
            OutputFormat::Text => Ok(render_table(&table)),
        }
    }

    pub fn validate(&self, input: &str) -> Result<String> {
        let table: Vec<PrizeSelectionRow> = parse_input(input)?;
        let issues = validate_table(&table);
        for issue in &issues {
            log::warn!("{}", issue);
        }

        match self.format {
            OutputFormat::Json => to_json(&issues.is_empty()),
            OutputFormat::Text if issues.is_empty() => Ok("valid".to_string()),
            OutputFormat::Text => Ok(issues
                .iter()
                .map(|issue| issue.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    pub fn select(&self, input: &str, repetitions: u32) -> Result<String> {
        let domains: Vec<SelectionDomain> = parse_input(input)?;
        let engine = SelectionEngine::from_config(&self.config);
        let results = engine.select_prizes_repeated(&domains, repetitions, &mut self.config.rng())?;

        match self.format {
            OutputFormat::Json => to_json(&results),
            OutputFormat::Text => Ok(format_result_table(&results)),
        }
    }

    pub fn chance(&self, input: &str) -> Result<String> {
        let request: SuccessRequest = parse_input(input)?;
        let repetitions = request
            .selection_count
            .ok_or_else(|| anyhow!("selectionCount is required to estimate a chance"))?;

        let chance = self.evaluator().chance_with_rule(
            request.rule(),
            &request.success_criteria,
            &request.selection_domains,
            repetitions,
            &mut self.config.rng(),
        )?;

        match self.format {
            OutputFormat::Json => to_json(&chance),
            OutputFormat::Text => Ok(format!("{:.2}%", chance * 100.0)),
        }
    }

    pub fn until(&self, input: &str) -> Result<String> {
        let request: SuccessRequest = parse_input(input)?;
        let info = self.evaluator().until_success_with_rule(
            request.rule(),
            &request.success_criteria,
            &request.selection_domains,
            &mut self.config.rng(),
        )?;

        match self.format {
            OutputFormat::Json => to_json(&info),
            OutputFormat::Text => Ok(info.to_string()),
        }
    }

    pub fn preset(&self, id: Option<&str>) -> Result<String> {
        let Some(id) = id else {
            let summaries: Vec<PresetSummary> = presets::all_presets()?
                .into_iter()
                .map(|preset| PresetSummary {
                    id: preset.id,
                    name: preset.name,
                    description: preset.description,
                })
                .collect();
            return match self.format {
                OutputFormat::Json => to_json(&summaries),
                OutputFormat::Text => Ok(summaries
                    .iter()
                    .map(|s| format!("{:<18}{:<18}{}", s.id, s.name, s.description))
                    .collect::<Vec<_>>()
                    .join("\n")),
            };
        };

        let preset = presets::preset(id)?;
        match self.format {
            OutputFormat::Json => to_json(&preset.selection_domains),
            OutputFormat::Text => Ok(preset
                .selection_domains
                .iter()
                .map(|domain| {
                    format!(
                        "{} ({} draws)\n{}",
                        domain.name,
                        domain.draw_count,
                        render_table(&domain.table)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n")),
        }
    }

    fn evaluator(&self) -> SuccessEvaluator {
        SuccessEvaluator::new(SelectionEngine::from_config(&self.config))
    }
}

/// Read a file, or standard input for `-`
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(text);
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
}

fn parse_input<T: DeserializeOwned>(input: &str) -> Result<T> {
    let text = read_input(input)?;
    parse_json(&text).with_context(|| format!("Invalid JSON in {}", input))
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render_spec(spec: &PrizeCategorySpec) -> String {
    format!(
        "Category: {}\nShare: {}\nPrizes: {}",
        spec.category_name,
        spec.probability_share,
        spec.prize_names.join(", ")
    )
}

fn render_table(table: &[PrizeSelectionRow]) -> String {
    let mut out = format!("{:<8}{:<14}{:<15}{}", "Index", "Lower Bound", "Category", "Prize");
    for row in table {
        out.push('\n');
        out.push_str(&format!(
            "{:<8}{:<14.8}{:<15}{}",
            row.prize_index, row.lower_bound, row.category_name, row.prize_name
        ));
    }
    out
}
