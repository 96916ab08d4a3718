use crate::cli::OutputFormat;
use crate::infra::{
    generator_from_config, load_portfolio, InMemoryAssessmentRepository, PortfolioEntry,
};
use clap::Args;
use epic_prioritizer::config::AppConfig;
use epic_prioritizer::error::AppError;
use epic_prioritizer::workflows::assessments::{
    AssessmentRepository, AssessmentService, AssessmentServiceError,
};
use epic_prioritizer::workflows::prioritization::{
    AssessmentDraft, Category, CategoryCatalog, CategoryRatings, CriteriaOrder, Criterion,
    DerivedMetric, EffortSize, PrioritizationReport, PrioritizationRequest, RatingLevel,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PrioritizeArgs {
    /// JSON file holding an array of stored assessments or drafts
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Ranking order, e.g. `urgency,roi,!cost` (`!` disables a criterion)
    #[arg(long)]
    pub(crate) criteria: Option<String>,
    /// Category ranked first in the primary-category view (defaults to urgency)
    #[arg(long)]
    pub(crate) primary: Option<Category>,
    /// Only include assessments owned by this id
    #[arg(long)]
    pub(crate) owner: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ask the configured text generator (APP_AI_COMMAND) to corroborate the first epic
    #[arg(long)]
    pub(crate) corroborate: bool,
    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_prioritize(args: PrioritizeArgs) -> Result<(), AppError> {
    let PrioritizeArgs {
        input,
        criteria,
        primary,
        owner,
        format,
    } = args;

    let entries = load_portfolio(&input)?;
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = AssessmentService::new(repository.clone(), CategoryCatalog::standard());

    for entry in entries {
        match entry {
            PortfolioEntry::Stored(assessment) => {
                repository
                    .insert(assessment)
                    .map_err(AssessmentServiceError::from)?;
            }
            PortfolioEntry::Draft(draft) => {
                service.submit(draft, None)?;
            }
        }
    }

    let request = build_request(criteria.as_deref(), primary, service.catalog())?;
    let report = service.prioritize(owner.as_deref(), &request)?;
    print_report(&report, format)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let mut service = AssessmentService::new(repository, CategoryCatalog::standard());

    println!("Epic prioritization demo");
    println!("Value categories:");
    for definition in service.catalog().definitions() {
        println!("  - {}: {}", definition.label, definition.description);
    }

    let portfolio = demo_portfolio();
    if args.corroborate {
        let config = AppConfig::load()?;
        match generator_from_config(&config.corroboration) {
            Some(generator) => {
                service = service.with_generator(generator);
                if let Some(first) = portfolio.first() {
                    corroborate_demo_draft(&service, first.clone());
                }
            }
            None => println!("\nCorroboration skipped: APP_AI_COMMAND is not set"),
        }
    }

    println!("\nSubmitting {} assessments", portfolio.len());
    for draft in portfolio {
        match service.submit(draft, Some("demo".to_string())) {
            Ok(stored) => println!(
                "  - {} ({}) -> score {}",
                stored.epic_name,
                stored.t_shirt_size.label(),
                service.engine().score(&stored)
            ),
            Err(err) => println!("  Submission rejected: {}", err),
        }
    }

    let mut order = service.engine().default_order();
    let roi_index = order
        .as_slice()
        .iter()
        .position(|criterion| criterion.key == Criterion::Derived(DerivedMetric::Roi));
    if let Some(index) = roi_index {
        for position in (1..=index).rev() {
            order.move_up(position);
        }
    }
    order.toggle(Criterion::Category(Category::Cost));
    println!(
        "\nCriteria order after moving ROI to the top and disabling cost: {}",
        describe_order(&order)
    );

    let request = PrioritizationRequest {
        criteria: Some(order.into_inner()),
        primary: Some(Category::Revenue),
    };
    let report = service.prioritize(Some("demo"), &request)?;
    print_report(&report, args.format)
}

fn corroborate_demo_draft(
    service: &AssessmentService<InMemoryAssessmentRepository>,
    draft: AssessmentDraft,
) {
    println!("\nCorroborating \"{}\"", draft.epic_name);
    match service.corroborate(draft) {
        Ok(outcome) if outcome.changes.is_empty() => {
            println!("  Generator agreed with every level")
        }
        Ok(outcome) => {
            for change in outcome.changes {
                println!(
                    "  - {}: {} -> {}",
                    change.category.label(),
                    change.from.map(RatingLevel::label).unwrap_or("unrated"),
                    change.to.label()
                );
            }
        }
        Err(err) => println!("  Corroboration unavailable: {}", err),
    }
}

pub(crate) fn build_request(
    criteria: Option<&str>,
    primary: Option<Category>,
    catalog: &CategoryCatalog,
) -> Result<PrioritizationRequest, AppError> {
    let criteria = criteria
        .map(|raw| CriteriaOrder::parse(raw, catalog))
        .transpose()?
        .map(CriteriaOrder::into_inner);
    Ok(PrioritizationRequest { criteria, primary })
}

fn print_report(report: &PrioritizationReport, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => print!("{}", render_table(report)),
        OutputFormat::Csv => report.write_csv(std::io::stdout())?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn describe_order(order: &CriteriaOrder) -> String {
    let labels: Vec<&str> = order.active().map(Criterion::label).collect();
    if labels.is_empty() {
        "(no active criteria)".to_string()
    } else {
        labels.join(" > ")
    }
}

pub(crate) fn render_table(report: &PrioritizationReport) -> String {
    let mut out = String::new();
    if report.assessed == 0 {
        out.push_str("No assessments to prioritize.\n");
        return out;
    }

    let _ = writeln!(out, "\nDirect score ranking ({} epics)", report.assessed);
    for entry in &report.direct {
        let _ = writeln!(out, "  {:>2}. {:<32} {:>3}", entry.rank, entry.epic_name, entry.score);
    }

    let order = CriteriaOrder::from_criteria(report.criteria.clone());
    let _ = writeln!(out, "\nRanked by criteria: {}", describe_order(&order));
    for entry in &report.ranked {
        let _ = writeln!(out, "  {:>2}. {}", entry.rank, entry.epic_name);
    }

    let _ = writeln!(out, "\nRanked by {} first", report.primary.label);
    for entry in &report.primary.entries {
        let _ = writeln!(out, "  {:>2}. {}", entry.rank, entry.epic_name);
    }

    let _ = writeln!(out, "\n{}", DerivedMetric::Roi.label());
    for entry in &report.roi {
        let _ = writeln!(
            out,
            "  {:>2}. {:<32} {:<3} {:>5.2}",
            entry.rank,
            entry.epic_name,
            entry.t_shirt_size.label(),
            entry.roi
        );
    }

    out
}

fn demo_draft(
    epic_name: &str,
    size: EffortSize,
    levels: [RatingLevel; 5],
    urgency_note: &str,
) -> AssessmentDraft {
    let mut draft = AssessmentDraft::new(epic_name);
    draft.t_shirt_size = size;
    draft.ratings = CategoryRatings::from_levels(levels);
    if let Some(urgency) = draft.ratings.get_mut(Category::Urgency) {
        urgency.notes = urgency_note.to_string();
    }
    draft
}

fn demo_portfolio() -> Vec<AssessmentDraft> {
    use RatingLevel::{High, Low, Mid, NotApplicable};

    vec![
        demo_draft(
            "Self-serve onboarding",
            EffortSize::M,
            [High, High, Mid, High, Mid],
            "Trial conversion dropped two quarters in a row",
        ),
        demo_draft(
            "Audit log export",
            EffortSize::S,
            [High, Low, Mid, Mid, Low],
            "Required for the enterprise renewal in March",
        ),
        demo_draft(
            "Mobile offline mode",
            EffortSize::Xl,
            [Low, High, High, High, Mid],
            "Requested often but no committed date",
        ),
        demo_draft(
            "Internal build cache",
            EffortSize::Xs,
            [Mid, Low, Mid, NotApplicable, High],
            "CI times keep growing",
        ),
    ]
}
