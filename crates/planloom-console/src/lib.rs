//! Colourful console output for solver events.
//!
//! Provides a `tracing` layer that formats the structured events emitted by
//! `planloom-solver` and `planloom-benchmark`.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solving/phase start/end)
//! - **WARN**: Phases that ended early, unbounded phases, unsupported statistics
//! - **DEBUG**: Progress updates (1/sec with speed and score)
//! - **TRACE**: Individual steps

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};


static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const TARGETS: [&str; 3] = ["planloom_solver", "planloom_benchmark", "planloom::"];

/// Initializes the solver console output.
///
/// Safe to call multiple times, only the first call has effect. The filter
/// reads `RUST_LOG` and defaults to `info`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !is_solver_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

fn is_solver_target(target: &str) -> bool {
    TARGETS.iter().any(|prefix| target.starts_with(prefix))
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    score: Option<String>,
    step: Option<u64>,
    entity: Option<u64>,
    duration_ms: Option<u64>,
    phases: Option<u64>,
    moves_evaluated: Option<u64>,
    candidates: Option<u64>,
    improved: Option<bool>,
    ended_early: Option<bool>,
    terminated_early: Option<bool>,
    statistic: Option<String>,
    move_description: Option<String>,
    message: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_text(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "step" => self.step = Some(value),
            "entity" => self.entity = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "phases" => self.phases = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            "candidates" => self.candidates = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "improved" => self.improved = Some(value),
            "ended_early" => self.ended_early = Some(value),
            "terminated_early" => self.terminated_early = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value);
    }
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "phase" => &mut self.phase,
            "score" => &mut self.score,
            "statistic" => &mut self.statistic,
            "move_description" => &mut self.move_description,
            "message" => &mut self.message,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "phase_ended_early" | "unbounded_phase" | "unsupported_feature" => format_warning(v),
        "progress" => format_progress(v),
        "step" => format_step(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let phases = v.phases.unwrap_or(0);

    format!(
        "{} {} Solving │ {} phases",
        format_elapsed(),
        "▶".bright_green().bold(),
        phases.to_formatted_string(&Locale::en).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let steps = v.steps.unwrap_or(0);
    let moves = v.moves_evaluated.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} steps │ {} moves │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
        moves.to_formatted_string(&Locale::en).white(),
        format_score(score),
    );
    if v.terminated_early.unwrap_or(false) {
        output.push_str(&format!(" │ {}", "terminated early".bright_yellow()));
    }
    output
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} {} ended │ {} │ {} steps │ {} steps/s",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
        speed.to_formatted_string(&Locale::en).bright_magenta().bold(),
    );
    if v.ended_early.unwrap_or(false) {
        output.push_str(&format!(" │ {}", "ended early".bright_yellow()));
    }
    output.push_str(&format!(" │ {}", format_score(score)));

    output
}

fn format_warning(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("warning");
    let mut output = format!("{} {} {}", format_elapsed(), "⚠".bright_yellow().bold(), event.yellow());
    if let Some(index) = v.phase_index {
        output.push_str(&format!(" │ phase {}", index));
    }
    if let Some(step) = v.step {
        output.push_str(&format!(" │ step {}", step.to_formatted_string(&Locale::en)));
    }
    if let Some(statistic) = &v.statistic {
        output.push_str(&format!(" │ {}", statistic));
    }
    if let Some(message) = &v.message {
        output.push_str(&format!(" │ {}", message.bright_black()));
    }
    output
}

fn format_progress(v: &EventVisitor) -> String {
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {:>10} steps │ {:>12}/s │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        steps.to_formatted_string(&Locale::en).white(),
        speed
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        format_score(score)
    )
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let step = v.step.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");
    let subject = match (&v.move_description, v.entity) {
        (Some(description), _) => description.clone(),
        (None, Some(entity)) => format!("Entity {}", entity.to_formatted_string(&Locale::en)),
        (None, None) => String::new(),
    };

    let icon = if v.improved.unwrap_or(false) {
        "✓".bright_green().to_string()
    } else {
        "·".bright_black().to_string()
    };

    format!(
        "{} {} Step {:>10} │ {} │ {}",
        format_elapsed(),
        icon,
        step.to_formatted_string(&Locale::en).bright_black(),
        subject.bright_black(),
        format_score(score).bright_black()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Colours each `/`-separated level of a score string by its sign.
///
/// A negative init level and a negative first score level are red, later
/// negative levels are yellow.
fn format_score(score: &str) -> String {
    let first_level = usize::from(score.split('/').next().is_some_and(|p| p.ends_with("init")));
    score
        .split('/')
        .enumerate()
        .map(|(index, part)| format_score_level(part, index <= first_level))
        .collect::<Vec<_>>()
        .join("/")
}

fn format_score_level(part: &str, is_major: bool) -> String {
    let number_end = part
        .find(|c: char| !(c.is_ascii_digit() || c == '-' || c == '.'))
        .unwrap_or(part.len());
    let value: f64 = part[..number_end].parse().unwrap_or(0.0);

    if value < 0.0 {
        if is_major {
            part.bright_red().to_string()
        } else {
            part.yellow().to_string()
        }
    } else if value > 0.0 {
        part.bright_green().to_string()
    } else {
        part.white().to_string()
    }
}
