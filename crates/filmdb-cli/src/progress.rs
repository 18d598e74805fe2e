//! Progress indicators for long-running loads

use filmdb_ingest::PipelineEvent;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Update `pb` from a pipeline event
pub fn report_event(pb: &ProgressBar, event: &PipelineEvent<'_>) {
    match event {
        PipelineEvent::Started { kind, path } => {
            pb.set_message(format!("Loading {} from {}", kind, path.display()));
        },
        PipelineEvent::Finished(file) => {
            let status = match &file.error {
                Some(error) => format!("stopped: {}", error),
                None => format!("{} added", format_count(file.counts.added)),
            };
            pb.println(format!(
                "  {} {} ({} lines, {})",
                file.kind,
                file.path.display(),
                format_count(file.lines),
                status
            ));
        },
    }
}

/// Format a count with thousands separators
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("Loading");
        assert_eq!(pb.message(), "Loading");
        pb.finish_and_clear();
    }
}
