use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Outcome of `ogtags check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub allowed: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addrs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckReport {
    fn to_text(&self) -> String {
        match &self.reason {
            Some(reason) => format!("denied  {}\n  {reason}", self.url),
            None if self.addrs.is_empty() => format!("allowed {}", self.url),
            None => format!("allowed {} -> {}", self.url, self.addrs.join(", ")),
        }
    }
}

pub fn print_report(format: OutputFormat, quiet: bool, report: &CheckReport) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Json => {
            if let Ok(s) = serde_json::to_string(report) {
                println!("{s}");
            }
        }
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
