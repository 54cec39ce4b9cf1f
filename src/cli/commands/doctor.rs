//! Doctor command - verify API keys and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::llm::API_KEY_VAR;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Research Agent Doctor");
    println!();
    println!("Checking API keys and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Keys").bold());
    let key_checks = vec![
        check_openai_api_key(std::env::var(API_KEY_VAR).ok()),
        check_tavily_api_key(settings.search.resolved_api_key()),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Files").bold());
    let file_checks = vec![
        check_config_file(),
        check_frontend(settings),
        CheckResult::ok(
            "Feedback log",
            &settings.feedback_log_path().display().to_string(),
        ),
    ];
    for check in &file_checks {
        check.print();
    }
    checks.extend(file_checks);

    println!();

    println!("{}", style("Model").bold());
    Output::kv("Model", &settings.llm.model);
    Output::kv("Max iterations", &settings.agent.max_iterations.to_string());
    Output::kv("Request timeout", &format!("{}s", settings.llm.timeout_secs));

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before serving queries.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! The research agent is ready.");
    }

    Ok(())
}

fn check_openai_api_key(key: Option<String>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("sk-") && key.len() > 20 => {
            CheckResult::ok(API_KEY_VAR, &format!("configured ({})", mask(&key)))
        }
        Some(key) if key.is_empty() => CheckResult::error(
            API_KEY_VAR,
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(_) => CheckResult::warning(
            API_KEY_VAR,
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::error(
            API_KEY_VAR,
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

fn check_tavily_api_key(key: Option<String>) -> CheckResult {
    match key {
        Some(key) if key.len() > 12 => {
            CheckResult::ok("TAVILY_API_KEY", &format!("configured ({})", mask(&key)))
        }
        Some(_) => CheckResult::ok("TAVILY_API_KEY", "configured"),
        None => CheckResult::warning(
            "TAVILY_API_KEY",
            "not set, WebSearch will fail",
            "Set with: export TAVILY_API_KEY='tvly-...' or search.api_key in the config",
        ),
    }
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            &format!("Create {} to override", config_path.display()),
        )
    }
}

fn check_frontend(settings: &Settings) -> CheckResult {
    let index = settings.static_dir().join("index.html");
    if index.exists() {
        CheckResult::ok("Frontend", &format!("{}", index.display()))
    } else {
        CheckResult::warning(
            "Frontend",
            &format!("{} not found", index.display()),
            "Set server.static_dir to the directory holding index.html",
        )
    }
}

/// Keep the first 7 and last 4 characters of a key.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
