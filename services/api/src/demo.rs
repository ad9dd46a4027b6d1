use crate::infra::parse_fraction;
use clap::Args;
use job_pareto::analysis::{
    ConcentrationAnalyzer, ConcentrationReport, CountRecord, ParameterOverrides, ReportParameters,
};
use job_pareto::config::AppConfig;
use job_pareto::error::AppError;
use job_pareto::source::CountSourceImporter;
use job_pareto::telemetry::{self, LogSink};
use std::path::PathBuf;
use tracing::info;

const SAMPLE_OFFERS: &str = include_str!("../../../crates/job-pareto/data/offers_by_city.csv");

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV export with one row per city (entity/city column plus a count/offers column)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Share of all offers to reach, e.g. 0.8 or 80%
    #[arg(long, value_parser = parse_fraction)]
    pub(crate) threshold: Option<f64>,
    /// Pareto scale for the Q-Q comparison (defaults to the smallest count)
    #[arg(long)]
    pub(crate) x_min: Option<f64>,
    /// Pareto shape for the Q-Q comparison
    #[arg(long)]
    pub(crate) alpha: Option<f64>,
    /// Print the full report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Include every point of the cumulative curve in the text output
    #[arg(long)]
    pub(crate) list_curve: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Share of all offers to reach, e.g. 0.8 or 80%
    #[arg(long, value_parser = parse_fraction)]
    pub(crate) threshold: Option<f64>,
    /// Pareto shape for the Q-Q comparison
    #[arg(long)]
    pub(crate) alpha: Option<f64>,
    /// Include every point of the cumulative curve in the output
    #[arg(long)]
    pub(crate) list_curve: bool,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        csv,
        threshold,
        x_min,
        alpha,
        json,
        list_curve,
    } = args;

    let defaults = init_cli()?;
    let records = CountSourceImporter::from_path(&csv)?;
    info!(path = %csv.display(), rows = records.len(), "count export loaded");

    let overrides = ParameterOverrides {
        threshold,
        x_min,
        alpha,
        ..ParameterOverrides::default()
    };
    let (analyzer, report) = analyze(records, &overrides.apply(&defaults))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&analyzer, &report, &csv.display().to_string(), list_curve);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        threshold,
        alpha,
        list_curve,
    } = args;

    let defaults = init_cli()?;
    let records = CountSourceImporter::from_reader(SAMPLE_OFFERS.as_bytes())?;

    let overrides = ParameterOverrides {
        threshold,
        alpha,
        ..ParameterOverrides::default()
    };
    let (analyzer, report) = analyze(records, &overrides.apply(&defaults))?;

    println!("Job offer concentration demo");
    render_report(&analyzer, &report, "bundled sample (offers per city)", list_curve);
    Ok(())
}

fn init_cli() -> Result<ReportParameters, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(config.analysis.defaults)
}

pub(crate) fn analyze(
    records: Vec<CountRecord>,
    parameters: &ReportParameters,
) -> Result<(ConcentrationAnalyzer, ConcentrationReport), AppError> {
    let analyzer = ConcentrationAnalyzer::new(records)?;
    let report = analyzer.report(parameters)?;
    Ok((analyzer, report))
}

fn render_report(
    analyzer: &ConcentrationAnalyzer,
    report: &ConcentrationReport,
    source: &str,
    list_curve: bool,
) {
    let parameters = &report.parameters;
    let insights = &report.insights;

    println!("Source: {}", source);
    println!(
        "Entities with offers: {} | Total offers: {} | Generated {}",
        report.entities,
        report.total_count,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    println!("\n{}", insights.headline);
    println!(
        "Threshold {:.0}% reached after {} entities ({:.2}% of entities, {:.2}% of offers)",
        parameters.threshold * 100.0,
        report.threshold.entity_count,
        report.threshold.entity_fraction * 100.0,
        report.threshold.count_fraction_achieved * 100.0
    );
    println!(
        "Concentration vs {:.0}/{:.0} reference: {} (gap {:+.1} pp at the knee)",
        parameters.knee_share * 100.0,
        parameters.knee * 100.0,
        insights.level_label,
        insights.reference_gap * 100.0
    );

    println!("\nDistribution moments");
    println!(
        "- Mean {:.2} | Variance {:.2}",
        report.moments.mean, report.moments.variance
    );
    match (report.moments.skewness, report.moments.kurtosis) {
        (Some(skewness), Some(kurtosis)) => {
            println!("- Skewness {:.3} | Kurtosis {:.3}", skewness, kurtosis)
        }
        _ => println!("- Skewness and kurtosis undefined (all counts equal)"),
    }

    if !insights.observations.is_empty() {
        println!("\nObservations");
        for note in &insights.observations {
            println!("- {}", note);
        }
    }

    println!(
        "\nPareto Q-Q (x_min {}, alpha {:.1}): {} pairs",
        parameters.x_min,
        parameters.alpha,
        report.qq.len()
    );
    if let (Some(first), Some(last)) = (report.qq.first(), report.qq.last()) {
        println!(
            "- lowest {:.2} vs {:.0} | highest {:.2} vs {:.0} (theoretical vs empirical)",
            first.theoretical, first.empirical, last.theoretical, last.empirical
        );
    }

    println!("\nCount histogram");
    for bin in &report.histogram {
        match &bin.label {
            Some(label) => println!("- {:>6} offers: {} ({})", bin.count, bin.entities, label),
            None => println!("- {:>6} offers: {}", bin.count, bin.entities),
        }
    }

    if list_curve {
        println!("\nCumulative curve (descending by offers)");
        let series = analyzer.sorted_series();
        for (rank, (record, point)) in series
            .records()
            .iter()
            .zip(report.curve.points())
            .enumerate()
        {
            println!(
                "{:>4}. {} | {} | entities {:.2}% | offers {:.2}%",
                rank + 1,
                record.entity_id,
                record.count,
                point.entity_fraction * 100.0,
                point.count_fraction * 100.0
            );
        }
    }
}
