use academy_track::academics::{
    evaluate_display, standing_for_display, AcademicCalendar, CapturePolicy, EligibilityView,
    MemorySubmissionRepository, ProgressTrackingService, StandingView, StudentId,
    SubmissionLogImporter, SubmissionWindowGuard, TracingNotifier, WindowView,
};
use academy_track::config::AppConfig;
use academy_track::error::AppError;
use academy_track::telemetry;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Academy Track",
    about = "Run the academic progress service or inspect a student's standing from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Resolve a student's standing and certificate progress
    Standing(StandingArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct StandingArgs {
    /// Enrollment span as shown on the student profile, e.g. "2025 - 2029"
    #[arg(long)]
    enrollment_span: String,
    /// Reference date for the standing (defaults to today)
    #[arg(long, value_parser = parse_date)]
    on: Option<NaiveDate>,
    /// Optional submission-history CSV export to compute eligibility
    #[arg(long)]
    submissions_csv: Option<PathBuf>,
    /// Restrict the CSV history to one student id
    #[arg(long)]
    student: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Standing(args) => run_standing(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = ProgressTrackingService::new(
        Arc::new(MemorySubmissionRepository::default()),
        Arc::new(TracingNotifier),
        CapturePolicy::new(config.policy.geofence_radius_m),
    );

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(academy_track::academics::progress_router(Arc::new(service)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "academic progress service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_standing(args: StandingArgs) -> Result<(), AppError> {
    let StandingArgs {
        enrollment_span,
        on,
        submissions_csv,
        student,
    } = args;

    let today = on.unwrap_or_else(|| Local::now().date_naive());
    let standing = standing_for_display(&enrollment_span, today);
    let view = StandingView::from_standing(&standing);

    println!("Academic standing");
    println!("Enrollment span: {enrollment_span} (evaluated {today})");
    println!("- Year: {}", view.year_label);
    println!("- Semester: {}", view.semester_label);

    let Some(path) = submissions_csv else {
        return Ok(());
    };

    let import = SubmissionLogImporter::from_path(path)?;
    if import.skipped_rows > 0 {
        println!(
            "\nNote: {} export row(s) had no usable timestamp and were skipped",
            import.skipped_rows
        );
    }

    let history = match &student {
        Some(id) => import.for_student(&StudentId(id.clone())),
        None => import.all_records(),
    };

    let eligibility = evaluate_display(Some(&enrollment_span), &history);
    let eligibility_view = EligibilityView::from_result(&eligibility);

    println!("\nCertificate progress");
    println!("- {}", eligibility_view.summary);
    if !eligibility_view.semesters_covered.is_empty() {
        let covered: Vec<String> = eligibility_view
            .semesters_covered
            .iter()
            .map(|semester| semester.to_string())
            .collect();
        println!("- Documented semesters: {}", covered.join(", "));
    }

    if let Ok(calendar) = AcademicCalendar::from_display(&enrollment_span) {
        let guard = SubmissionWindowGuard::new(calendar.term());
        let decision = guard.decide(today, &eligibility.covered_semesters);
        let window = WindowView::from_decision(&decision);

        println!("\nSubmission window");
        println!("- {}", window.message);
        if let Some(next) = window.next_allowed_on {
            println!("- Next window opens: {next}");
        }
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
