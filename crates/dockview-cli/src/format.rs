//! Table and notice rendering

use chrono::{DateTime, Utc};
use dockview_engine::{ContainerDetail, ImageSummary, OperationCategory, OperationResult};

const SIZE_UNITS: [&str; 4] = ["Byte", "KB", "MB", "GB"];

/// Size scaled to the largest unit it fits under, rounded up to `floating`
/// decimals. `None` when it does not fit in gigabytes.
pub fn file_size_with_unit(size: u64, floating: u32) -> Option<(f64, &'static str)> {
    let base = 10f64.powi(floating as i32);
    SIZE_UNITS.iter().enumerate().find_map(|(i, unit)| {
        let upper = 1024f64.powi(i as i32 + 1);
        let size = size as f64;
        if size < upper {
            let divisor = 1024f64.powi(i as i32).max(1.0);
            Some(((size * base / divisor).ceil() / base, *unit))
        } else {
            None
        }
    })
}

pub fn format_size(size: i64) -> String {
    match u64::try_from(size).ok().and_then(|s| file_size_with_unit(s, 1)) {
        Some((value, unit)) => format!("{} {}", value, unit),
        None => "unknown".to_string(),
    }
}

/// "3 days ago" / "in 2 hours", using the single closest unit
pub fn relative_time(timestamp: i64, now: DateTime<Utc>) -> String {
    let Some(then) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return "unknown".to_string();
    };

    let delta = now.signed_duration_since(then).num_seconds();
    let secs = delta.unsigned_abs() as f64;

    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;

    let (value, unit) = if secs < MINUTE {
        (secs, "second")
    } else if secs < HOUR {
        ((secs / MINUTE).round(), "minute")
    } else if secs < DAY {
        ((secs / HOUR).round(), "hour")
    } else if secs < 30.0 * DAY {
        ((secs / DAY).round(), "day")
    } else if secs < 365.0 * DAY {
        ((secs / (30.0 * DAY)).round(), "month")
    } else {
        ((secs / (365.0 * DAY)).round(), "year")
    };

    let value = value as u64;
    let plural = if value == 1 { "" } else { "s" };
    if delta >= 0 {
        format!("{} {}{} ago", value, unit, plural)
    } else {
        format!("in {} {}{}", value, unit, plural)
    }
}

const NAME_WIDTH: usize = 26;
const IMAGE_WIDTH: usize = 28;
const STATUS_WIDTH: usize = 12;
const CPU_WIDTH: usize = 8;

/// Container table: NAME, IMAGE, STATUS, CPU(%), PORTS
pub fn container_table(containers: &[ContainerDetail]) -> String {
    let mut out = format!(
        "  {:<NAME_WIDTH$} {:<IMAGE_WIDTH$} {:<STATUS_WIDTH$} {:<CPU_WIDTH$} PORTS\n",
        "NAME", "IMAGE", "STATUS", "CPU(%)"
    );
    out.push_str(&"-".repeat(90));
    out.push('\n');

    for container in containers {
        let symbol = if container.is_running() { "●" } else { "○" };
        let ports = container.published_ports();
        let ports = if ports.is_empty() {
            "-".to_string()
        } else {
            ports.join(", ")
        };

        out.push_str(&format!(
            "{} {:<NAME_WIDTH$} {:<IMAGE_WIDTH$} {:<STATUS_WIDTH$} {:<CPU_WIDTH$} {}\n",
            symbol,
            container.display_name(),
            container.image(),
            container.state.status,
            format!("{}%", container.host_config.cpu_percent),
            ports
        ));
    }

    out
}

const TAG_WIDTH: usize = 14;
const USAGE_WIDTH: usize = 8;
const CREATED_WIDTH: usize = 16;

/// Image table: NAME, TAG, STATUS, CREATED, SIZE
pub fn image_table(images: &[ImageSummary], now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{:<IMAGE_WIDTH$} {:<TAG_WIDTH$} {:<USAGE_WIDTH$} {:<CREATED_WIDTH$} SIZE\n",
        "NAME", "TAG", "STATUS", "CREATED"
    );
    out.push_str(&"-".repeat(84));
    out.push('\n');

    for image in images {
        let (name, tag) = image.repo_and_tag().unwrap_or(("<none>", "<none>"));
        let usage = if image.in_use() { "used" } else { "unused" };

        out.push_str(&format!(
            "{:<IMAGE_WIDTH$} {:<TAG_WIDTH$} {:<USAGE_WIDTH$} {:<CREATED_WIDTH$} {}\n",
            name,
            tag,
            usage,
            relative_time(image.created, now),
            format_size(image.size)
        ));
    }

    out
}

/// One-line rendering of an operation outcome
pub fn notice(result: &OperationResult) -> String {
    match result.category {
        OperationCategory::Success => format!("✓ {}", result.message),
        OperationCategory::Warning => format!("! {}", result.message),
        OperationCategory::Error => match result.status_code {
            Some(code) if result.status_text.is_empty() => {
                format!("✗ {} ({})", result.message, code)
            }
            Some(code) => format!("✗ {} ({} {})", result.message, code, result.status_text),
            None => format!("✗ {}", result.message),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockview_engine::{
        ContainerId, DetailConfig, DetailHostConfig, DetailNetworkSettings, DetailState, EngineResponse,
        ImageId, Operation, PortBinding,
    };
    use std::collections::BTreeMap;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_file_size_with_unit() {
        assert_eq!(file_size_with_unit(0, 1), Some((0.0, "Byte")));
        assert_eq!(file_size_with_unit(512, 1), Some((512.0, "Byte")));
        assert_eq!(file_size_with_unit(1024, 1), Some((1.0, "KB")));
        assert_eq!(file_size_with_unit(1500, 1), Some((1.5, "KB")));
        assert_eq!(file_size_with_unit(1537, 1), Some((1.6, "KB")));
        assert_eq!(file_size_with_unit(172_064_416, 1), Some((164.1, "MB")));
        assert_eq!(file_size_with_unit(3 * 1024 * 1024 * 1024, 1), Some((3.0, "GB")));
        assert_eq!(file_size_with_unit(1024u64.pow(4), 1), None);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(172_064_416), "164.1 MB");
        assert_eq!(format_size(5 * 1024), "5 KB");
        assert_eq!(format_size(-1), "unknown");
        assert_eq!(format_size(2 * 1024i64.pow(4)), "unknown");
    }

    #[test]
    fn test_relative_time() {
        let now = now();
        let ts = now.timestamp();
        assert_eq!(relative_time(ts, now), "0 seconds ago");
        assert_eq!(relative_time(ts - 1, now), "1 second ago");
        assert_eq!(relative_time(ts - 90 * 60, now), "2 hours ago");
        assert_eq!(relative_time(ts - 3 * 86_400, now), "3 days ago");
        assert_eq!(relative_time(ts - 60 * 86_400, now), "2 months ago");
        assert_eq!(relative_time(ts - 400 * 86_400, now), "1 year ago");
        assert_eq!(relative_time(ts + 120, now), "in 2 minutes");
    }

    fn detail(name: &str, image: &str, running: bool) -> ContainerDetail {
        let mut ports = BTreeMap::new();
        if running {
            ports.insert(
                "80/tcp".to_string(),
                Some(vec![PortBinding {
                    host_ip: "0.0.0.0".to_string(),
                    host_port: "8080".to_string(),
                }]),
            );
        }
        ContainerDetail {
            id: ContainerId::new(format!("{}-id", name)),
            name: format!("/{}", name),
            created: String::new(),
            config: DetailConfig {
                image: image.to_string(),
            },
            state: DetailState {
                status: if running { "running" } else { "exited" }.to_string(),
                running,
            },
            host_config: DetailHostConfig { cpu_percent: 0 },
            network_settings: DetailNetworkSettings { ports: Some(ports) },
        }
    }

    #[test]
    fn test_container_table() {
        let table = container_table(&[
            detail("web", "nginx:latest", true),
            detail("db-primary", "postgres:14", false),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("NAME") && lines[0].contains("PORTS"));
        assert!(lines[2].starts_with("● web "));
        assert!(lines[2].contains("nginx:latest"));
        assert!(lines[2].ends_with("80:8080"));
        assert!(lines[3].starts_with("○ db-primary "));
        assert!(lines[3].contains("exited"));
        assert!(lines[3].ends_with('-'));
    }

    #[test]
    fn test_image_table() {
        let images = vec![
            ImageSummary {
                id: ImageId::new("sha256:aaa"),
                repo_tags: Some(vec!["myapp:1.0".to_string()]),
                size: 172_064_416,
                containers: 2,
                created: now().timestamp() - 3 * 86_400,
            },
            ImageSummary {
                id: ImageId::new("sha256:bbb"),
                repo_tags: None,
                size: 1024,
                containers: 0,
                created: now().timestamp() - 3600,
            },
        ];

        let table = image_table(&images, now());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("myapp "));
        assert!(lines[2].contains(" 1.0 "));
        assert!(lines[2].contains(" used "));
        assert!(lines[2].contains("3 days ago"));
        assert!(lines[2].ends_with("164.1 MB"));
        assert!(lines[3].starts_with("<none> "));
        assert!(lines[3].contains(" unused "));
        assert!(lines[3].ends_with("1 KB"));
    }

    #[test]
    fn test_notice() {
        let ok = OperationResult::from_response(
            Operation::StopContainer,
            "web",
            &EngineResponse::new(204, ""),
        );
        assert_eq!(notice(&ok), "✓ Container web stopped");

        let missing = OperationResult::from_response(
            Operation::StopContainer,
            "gone",
            &EngineResponse::new(404, r#"{"message": "No such container: gone"}"#),
        );
        assert_eq!(
            notice(&missing),
            "✗ Failed to stop container gone: No such container: gone (404 Not Found)"
        );

        let odd = OperationResult::from_response(
            Operation::StartContainer,
            "web",
            &EngineResponse::new(599, ""),
        );
        assert_eq!(
            notice(&odd),
            "✗ Failed to start container web: unexpected status 599 (599)"
        );
    }
}
