use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span};

use nexus_analytics::{
    ComparisonEngine, aggregate_by_object_type, aggregate_by_region, aggregate_by_time,
    compute_summary_metrics, summarize_record,
};
use nexus_cli::dedupe::dedupe_by_fingerprint;
use nexus_cli::ingest::{read_records, validate_required};
use nexus_model::{
    AggregationResult, CanonicalRecord, ComparisonResult, DatasetSummary, NexusConfig,
    NormalizationOutcome, RawRecord, SummaryStatistics, TimeSeriesComparison, fields,
};
use nexus_normalize::NormalizationPipeline;

use crate::cli::{
    AggregateArgs, CompareArgs, GroupByArg, InputArgs, NormalizeArgs, StatsArgs, TrendArgs,
};
use crate::types::NormalizeResult;

pub fn run_normalize(args: &NormalizeArgs, config: &NexusConfig) -> Result<NormalizeResult> {
    let input = &args.input.input;
    let span = info_span!("normalize", input = %input.display());
    let _guard = span.enter();

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let raws = read_input(&args.input)?;

    // =========================================================================
    // Stage 2: Normalize
    // =========================================================================
    let pipeline = NormalizationPipeline::new(config.clone());
    let mut outcomes = pipeline.normalize_batch(&raws);
    let mut duplicates_removed = 0;
    if args.dedupe {
        (outcomes, duplicates_removed) = dedupe_by_fingerprint(outcomes);
        info!(duplicates_removed, "deduplicated canonical records");
    }

    // =========================================================================
    // Stage 3: Output
    // =========================================================================
    match &args.output {
        Some(path) => write_json_file(path, &outcomes)?,
        None => print_json(&outcomes)?,
    }

    let has_errors = outcomes.iter().any(NormalizationOutcome::has_errors);
    Ok(NormalizeResult {
        input: input.clone(),
        output: args.output.clone(),
        outcomes,
        duplicates_removed,
        has_errors,
    })
}

pub fn run_compare(args: &CompareArgs, config: &NexusConfig) -> Result<ComparisonResult> {
    let pipeline = NormalizationPipeline::new(config.clone());
    let left = first_canonical(&pipeline, &args.left)?;
    let right = first_canonical(&pipeline, &args.right)?;

    let result = ComparisonEngine::new(config.clone()).compare_datasets(&left, &right);
    info!(
        similarity = result.similarity_score,
        changed = result.changed_fields().count(),
        "compared records"
    );
    print_json(&result)?;
    Ok(result)
}

pub fn run_aggregate(args: &AggregateArgs, config: &NexusConfig) -> Result<AggregationResult> {
    let records = load_canonical(&args.input, config)?;
    let field = args.field.as_deref();
    let value_field = args.value_field.as_deref();

    let result = match args.by {
        GroupByArg::Time => AggregationResult::TimeSummary(aggregate_by_time(
            &records,
            field.unwrap_or(fields::DATE_CREATED),
            value_field.unwrap_or(fields::BRIGHTNESS),
        )),
        GroupByArg::Region => AggregationResult::RegionCounts(aggregate_by_region(
            &records,
            field.unwrap_or(fields::COORDINATE_SYSTEM),
        )),
        GroupByArg::ObjectType => AggregationResult::ObjectRollups(aggregate_by_object_type(
            &records,
            field.unwrap_or(fields::OBJECT_TYPE),
            value_field,
            config.confidence,
        )),
    };
    if result.is_empty() {
        info!("aggregation produced no groups");
    }
    print_json(&result)?;
    Ok(result)
}

pub fn run_trend(args: &TrendArgs, config: &NexusConfig) -> Result<TimeSeriesComparison> {
    let result =
        ComparisonEngine::new(config.clone()).compare_time_series(&args.first.0, &args.second.0);
    print_json(&result)?;
    Ok(result)
}

pub fn run_stats(args: &StatsArgs, config: &NexusConfig) -> Result<(usize, SummaryStatistics)> {
    let records = load_canonical(&args.input, config)?;
    let count = records
        .iter()
        .filter(|record| record.number(&args.field).is_some())
        .count();
    if count == 0 {
        info!(field = %args.field, "no numeric values, statistics are zero");
    }
    let stats = compute_summary_metrics(&records, &args.field, config.confidence);
    print_json(&stats)?;
    Ok((count, stats))
}

pub fn run_summarize(args: &InputArgs, config: &NexusConfig) -> Result<Vec<DatasetSummary>> {
    let records = load_canonical(args, config)?;
    let summaries: Vec<DatasetSummary> = records
        .iter()
        .map(|record| summarize_record(record, config))
        .collect();
    print_json(&summaries)?;
    Ok(summaries)
}

fn read_input(args: &InputArgs) -> Result<Vec<RawRecord>> {
    let raws = read_records(&args.input, args.format.map(Into::into))?;
    if !args.require.is_empty() {
        validate_required(&raws, &args.require)
            .with_context(|| format!("validate input: {}", args.input.display()))?;
    }
    Ok(raws)
}

fn load_canonical(args: &InputArgs, config: &NexusConfig) -> Result<Vec<CanonicalRecord>> {
    let raws = read_input(args)?;
    let pipeline = NormalizationPipeline::new(config.clone());
    Ok(pipeline
        .normalize_batch(&raws)
        .into_iter()
        .map(NormalizationOutcome::into_record)
        .collect())
}

fn first_canonical(pipeline: &NormalizationPipeline, path: &Path) -> Result<CanonicalRecord> {
    let raws = read_records(path, None)?;
    let raw = raws
        .first()
        .ok_or_else(|| anyhow!("no records in {}", path.display()))?;
    Ok(pipeline.normalize(raw).into_record())
}

fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(value).context("serialize output")?;
    fs::write(path, content).with_context(|| format!("write output: {}", path.display()))?;
    info!(path = %path.display(), "wrote output");
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("write json to stdout")?;
    writeln!(stdout).context("write json to stdout")?;
    Ok(())
}
