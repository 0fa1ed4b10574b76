use chrono::{DateTime, Utc};
use clap::Args;
use credit_5c::error::AppError;
use credit_5c::workflows::credit::{
    fuzzify, BatchEntry, CreditEvaluationService, Criterion, CriterionScores, Decision,
    EvaluationResult, FiredRule, FuzzyCreditEngine, Rule, ACCEPTANCE_THRESHOLD,
    DEFAULT_BATCH_LIMIT,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Character score (0-100)
    #[arg(long, value_parser = crate::infra::parse_score)]
    pub(crate) character: f64,
    /// Capital score (0-100)
    #[arg(long, value_parser = crate::infra::parse_score)]
    pub(crate) capital: f64,
    /// Capacity score (0-100)
    #[arg(long, value_parser = crate::infra::parse_score)]
    pub(crate) capacity: f64,
    /// Collateral score (0-100)
    #[arg(long, value_parser = crate::infra::parse_score)]
    pub(crate) collateral: f64,
    /// Condition score (0-100)
    #[arg(long, value_parser = crate::infra::parse_score)]
    pub(crate) condition: f64,
    /// Print the evaluation trail as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    fn scores(&self) -> Result<CriterionScores, AppError> {
        Ok(CriterionScores::new([
            self.character,
            self.capital,
            self.capacity,
            self.collateral,
            self.condition,
        ])?)
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV with columns applicant,character,capital,capacity,collateral,condition
    pub(crate) path: PathBuf,
    /// Maximum number of applicants to accept from the file
    #[arg(long, default_value_t = DEFAULT_BATCH_LIMIT)]
    pub(crate) limit: usize,
    /// Print the batch report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct BatchReport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    count: usize,
    accepted: usize,
    applicants: &'a [BatchEntry],
}

impl<'a> BatchReport<'a> {
    fn new(args: &BatchArgs, entries: &'a [BatchEntry]) -> Self {
        Self {
            generated_at: Utc::now(),
            source: args.path.display().to_string(),
            count: entries.len(),
            accepted: entries
                .iter()
                .filter(|entry| entry.evaluation.decision() == Decision::Accepted)
                .count(),
            applicants: entries,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let scores = args.scores()?;
    let result = FuzzyCreditEngine::standard().evaluate(&scores);
    if args.json {
        return print_json(&result);
    }
    render_evaluation(&result);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let service = CreditEvaluationService::new(args.limit);
    let file = std::fs::File::open(&args.path)?;
    let entries = service.evaluate_batch(file)?;
    let report = BatchReport::new(&args, &entries);
    if args.json {
        return print_json(&report);
    }

    println!(
        "Batch evaluation: {} ({})",
        report.source,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for entry in report.applicants {
        println!("- {}: {}", entry.applicant, entry.evaluation.summary());
    }
    println!("\n{} of {} applicant(s) accepted", report.accepted, report.count);
    Ok(())
}

pub(crate) fn run_rules() {
    let engine = FuzzyCreditEngine::standard();
    println!("Acceptance rules (z = 1)");
    render_rule_table(engine.acceptance_rules());
    println!("\nRejection rules (z = 0)");
    render_rule_table(engine.rejection_rules());
}

pub(crate) fn run_demo() {
    println!("5C fuzzy credit evaluation demo");
    let engine = FuzzyCreditEngine::standard();
    let applicants = [
        ("Established borrower", [100.0; 5]),
        ("No track record", [0.0; 5]),
        ("Midpoint applicant", [50.0; 5]),
        ("Borderline character", [38.0, 50.0, 50.0, 50.0, 50.0]),
    ];

    for (name, values) in applicants {
        println!("\n=== {name} ===");
        match CriterionScores::new(values) {
            Ok(scores) => render_evaluation(&engine.evaluate(&scores)),
            Err(err) => println!("skipped: {err}"),
        }
    }
}

fn render_rule_table(rules: &[Rule]) {
    for (offset, rule) in rules.iter().enumerate() {
        println!("{:>2}. {:?} {}", offset + 1, rule.levels, rule.describe());
    }
}

fn render_evaluation(result: &EvaluationResult) {
    println!("Fuzzification");
    for (criterion, value) in result.scores.iter() {
        let degrees = fuzzify(criterion, value)
            .into_iter()
            .enumerate()
            .map(|(slot, degree)| {
                let label = level_label(criterion, slot);
                format!("{label} {degree:.2}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!("- {criterion} (x = {value:.1}): {degrees}");
    }

    render_fired("Acceptance rules fired", &result.accepted);
    render_fired("Rejection rules fired", &result.rejected);

    let outcome = &result.outcome;
    println!("\nDefuzzification (weighted average)");
    println!("- sum(alpha x 1) = {:.2}", outcome.accept_weight);
    println!("- rejection weight = {:.2}", outcome.reject_weight);
    println!("- sum(alpha) = {:.2}", outcome.total_weight);
    if outcome.total_weight > 0.0 {
        println!(
            "- z = {:.2} / {:.2} = {:.2}",
            outcome.accept_weight, outcome.total_weight, outcome.z
        );
    } else {
        println!("- no rule fired, z = 0");
    }

    let comparison = if outcome.z > ACCEPTANCE_THRESHOLD {
        ">"
    } else {
        "<="
    };
    println!(
        "Decision: {} (z = {:.2} {comparison} {ACCEPTANCE_THRESHOLD})",
        outcome.decision.label(),
        outcome.z
    );
}

fn render_fired(title: &str, fired: &[FiredRule]) {
    if fired.is_empty() {
        println!("\n{title}: none");
        return;
    }

    println!("\n{title}");
    for (number, rule) in fired.iter().enumerate() {
        let degrees = rule
            .degrees
            .iter()
            .map(|degree| format!("{degree:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "Rule {} (table #{}): {}",
            number + 1,
            rule.position,
            rule.rule.describe()
        );
        println!("  alpha = min({degrees}) = {:.2}", rule.alpha);
    }
}

fn level_label(criterion: Criterion, slot: usize) -> &'static str {
    u8::try_from(slot + 1)
        .ok()
        .and_then(|level| criterion.level_label(level))
        .unwrap_or("?")
}
