//! Server-rendered dashboard HTML.
//!
//! Rendering is a pure function of already-queried [`DashboardData`]; the
//! display handler owns the queries.

use triage_core::{CaseRecord, NotificationRecord};

use crate::dto::DashboardData;

const DASHBOARD_CSS: &str = r#"
body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
.dashboard { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
.section { background: #fff; padding: 20px; border-radius: 8px; }
.case-item { margin: 10px 0; padding: 15px; border-radius: 6px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.emergency { background: #ffe6e6; border-left: 4px solid #ff4444; }
.non-emergency { background: #e6ffe6; border-left: 4px solid #44ff44; }
.case-header { display: flex; justify-content: space-between; }
.severity { padding: 3px 8px; border-radius: 4px; font-weight: bold; }
.severity-HIGH, .severity-CRITICAL { background: #ff4444; color: white; }
.severity-MEDIUM { background: #ffaa44; color: white; }
.severity-LOW { background: #44ff44; color: white; }
pre { white-space: pre-wrap; }
"#;

/// Renders the full dashboard page.
pub fn dashboard_page(data: &DashboardData) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Medical Dashboard</title>
    <style>{css}</style>
</head>
<body>
    <h1>Medical Dashboard</h1>
    <div class="dashboard">
{emergency}
{non_emergency}
{notifications}
    </div>
</body>
</html>"#,
        css = DASHBOARD_CSS,
        emergency = case_section("Emergency Cases", &data.emergency_cases, "emergency"),
        non_emergency = case_section(
            "Non-Emergency Cases",
            &data.non_emergency_cases,
            "non-emergency"
        ),
        notifications = notification_section(&data.notifications),
    )
}

fn case_section(title: &str, cases: &[CaseRecord], class: &str) -> String {
    let mut out = format!("<div class='section'><h2>{}</h2>", title);
    for case in cases {
        out.push_str(&case_item(case, class));
    }
    out.push_str("</div>");
    out
}

fn case_item(case: &CaseRecord, class: &str) -> String {
    let severity = case
        .analysis
        .get("severity_level")
        .and_then(|v| v.as_str())
        .unwrap_or("UNKNOWN");
    let analysis_pretty =
        serde_json::to_string_pretty(&case.analysis).unwrap_or_else(|_| "{}".into());

    format!(
        r#"<div class='case-item {class}'>
    <div class='case-header'>
        <span>Case ID: {case_id}</span>
        <span class='severity severity-{severity}'>{severity}</span>
    </div>
    <pre>Timestamp: {timestamp}
{analysis}</pre>
</div>"#,
        class = class,
        case_id = escape_html(case.case_id.as_deref().unwrap_or("unassigned")),
        severity = escape_html(severity),
        timestamp = escape_html(&case.timestamp),
        analysis = escape_html(&analysis_pretty),
    )
}

fn notification_section(notifications: &[NotificationRecord]) -> String {
    let mut out = String::from("<div class='section'><h2>Notifications</h2>");
    for n in notifications {
        let patient_pretty =
            serde_json::to_string_pretty(&n.patient_data).unwrap_or_else(|_| "{}".into());
        out.push_str(&format!(
            r#"<div class='case-item emergency'>
    <div>Case ID: {case_id}</div>
    <pre>Timestamp: {timestamp}
{patient}</pre>
</div>"#,
            case_id = n.case_id,
            timestamp = escape_html(&n.timestamp),
            patient = escape_html(&patient_pretty),
        ));
    }
    out.push_str("</div>");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(id: i64, severity: &str, emergency: bool) -> CaseRecord {
        CaseRecord {
            id,
            case_id: Some(format!("CASE-{:04}", id)),
            timestamp: "2026-01-01T00:00:00Z".into(),
            is_emergency: emergency,
            analysis: json!({"severity_level": severity}),
            original_data: json!({}),
        }
    }

    #[test]
    fn page_contains_all_sections_and_case_ids() {
        let data = DashboardData {
            emergency_cases: vec![case(1, "CRITICAL", true)],
            non_emergency_cases: vec![case(2, "LOW", false)],
            notifications: vec![],
        };
        let html = dashboard_page(&data);
        assert!(html.contains("Emergency Cases"));
        assert!(html.contains("Non-Emergency Cases"));
        assert!(html.contains("Notifications"));
        assert!(html.contains("CASE-0001"));
        assert!(html.contains("CASE-0002"));
        assert!(html.contains("severity-CRITICAL"));
    }

    #[test]
    fn unassigned_case_id_renders_placeholder() {
        let mut c = case(1, "LOW", false);
        c.case_id = None;
        let data = DashboardData {
            emergency_cases: vec![],
            non_emergency_cases: vec![c],
            notifications: vec![],
        };
        assert!(dashboard_page(&data).contains("unassigned"));
    }

    #[test]
    fn patient_content_is_escaped() {
        let mut c = case(1, "LOW", false);
        c.analysis = json!({"severity_level": "<script>alert(1)</script>"});
        let data = DashboardData {
            emergency_cases: vec![],
            non_emergency_cases: vec![c],
            notifications: vec![],
        };
        let html = dashboard_page(&data);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
