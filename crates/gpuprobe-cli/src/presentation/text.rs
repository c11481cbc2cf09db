//! Terminal rendering of reports.

use gpuprobe_core::{
    CapabilityReport, DelegateOutcome, InferenceResults, MeasurementDetail, Outcome, ProbeReport,
};

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn heading(title: &str) -> String {
    format!("{BOLD}{title}{RESET}")
}

fn mark(ok: bool) -> String {
    if ok {
        format!("{GREEN}✓{RESET}")
    } else {
        format!("{RED}✗{RESET}")
    }
}

/// First line of multi-line tool output.
fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("")
}

pub fn environment(report: &CapabilityReport) -> String {
    let mut lines = vec![heading("Environment")];

    if report.has_gpu_devices() {
        lines.push(format!(
            "  {} {:<18} {}",
            mark(true),
            "device nodes",
            report.gpu_device_nodes.join(", ")
        ));
    } else {
        lines.push(format!("  {YELLOW}○{RESET} {:<18} none found", "device nodes"));
    }

    for (name, result) in &report.driver_tools {
        lines.push(format!(
            "  {} {:<18} {}",
            mark(result.ok),
            name,
            first_line(&result.output)
        ));
    }

    let context = &report.graphics_context;
    let detail = match (&context.version, &context.error) {
        (Some(version), _) => format!("EGL {version}"),
        (None, Some(error)) => error.clone(),
        (None, None) => String::new(),
    };
    lines.push(format!("  {} {:<18} {}", mark(context.ok), "graphics context", detail));

    if !report.environment.is_empty() {
        lines.push(String::new());
        lines.push(heading("Variables"));
        for (key, value) in &report.environment {
            lines.push(format!("  {key}={value}"));
        }
    }

    lines.join("\n")
}

fn outcome_line(outcome: &DelegateOutcome) -> String {
    let backend = outcome.backend.as_str();
    match &outcome.outcome {
        Outcome::Success(measurement) => {
            let detail = match &measurement.detail {
                MeasurementDetail::Latency { result_type } => result_type.clone(),
                MeasurementDetail::Throughput(t) => {
                    format!("{} frames in {:.2} s ({:.1} fps)", t.frames, t.seconds, t.fps)
                }
            };
            format!(
                "  {} {backend:<4} {:>10.2} ms  {detail}",
                mark(true),
                measurement.elapsed_ms
            )
        }
        Outcome::Failure { error } => format!("  {} {backend:<4} {error}", mark(false)),
    }
}

pub fn inference(results: &InferenceResults) -> String {
    let mut lines = vec![heading("Inference")];
    lines.extend(results.iter().map(outcome_line));
    lines.join("\n")
}

pub fn report(report: &ProbeReport) -> String {
    format!(
        "{}\n\n{}",
        environment(&report.environment),
        inference(&report.inference)
    )
}
