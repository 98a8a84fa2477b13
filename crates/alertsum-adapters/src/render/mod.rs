use std::fmt::Write;

use chrono::{DateTime, Utc};

use alertsum_core::report::{AggregationResult, GroupEntries};
use alertsum_core::severity::Severity;
use alertsum_core::window::WindowLabels;
use alertsum_ports::error::RenderError;
use alertsum_ports::outbound::ReportRenderer;
use alertsum_ports::types::RenderedReport;

const TEMPLATE: &str = include_str!("templates/alert_report.html");
pub const DEFAULT_TITLE: &str = "Zabbix Alerts Report";

/// Renders an [`AggregationResult`] into a standalone HTML email body.
pub struct HtmlReportRenderer {
    title: String,
}

impl HtmlReportRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn render_html(
        &self,
        report: &AggregationResult,
        labels: &WindowLabels,
        generated_at: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        let summary_rows = build_summary_rows(report)?;
        let group_sections = build_group_sections(report)?;
        let html = TEMPLATE
            .replace("{{title}}", &html_escape(&self.title))
            .replace("{{time_from}}", &html_escape(&labels.from))
            .replace("{{time_till}}", &html_escape(&labels.till))
            .replace("{{summary_rows}}", &summary_rows)
            .replace("{{group_sections}}", &group_sections)
            .replace(
                "{{generated_at}}",
                &generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            );
        Ok(html)
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(&self, report: &AggregationResult) -> Result<RenderedReport, RenderError> {
        let html = self.render_html(report, &report.labels(), Utc::now())?;
        Ok(RenderedReport::html(html))
    }
}

fn build_summary_rows(report: &AggregationResult) -> Result<String, RenderError> {
    let mut html = String::new();
    if report.totals().is_empty() {
        html.push_str("<tr><td colspan=\"2\" class=\"muted\">No alerts fired in this window.</td></tr>");
        return Ok(html);
    }
    for (group, total) in report.totals() {
        write!(
            html,
            "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
            html_escape(group),
            total
        )
        .map_err(template_error)?;
    }
    Ok(html)
}

fn build_group_sections(report: &AggregationResult) -> Result<String, RenderError> {
    let mut html = String::new();
    for (group, entries) in report.groups() {
        write!(html, "<div class=\"card\"><h2>{}</h2>", html_escape(group)).map_err(template_error)?;
        write_group(&mut html, entries).map_err(template_error)?;
        html.push_str("</div>\n");
    }
    Ok(html)
}

fn write_group(html: &mut String, entries: &GroupEntries) -> std::fmt::Result {
    for (severity, entry) in entries {
        write!(
            html,
            "<h3><span class=\"badge {}\">{}</span></h3>",
            severity_class(*severity),
            severity
        )?;

        html.push_str("<table><thead><tr><th>Channel</th><th class=\"num\">Deliveries</th></tr></thead><tbody>");
        for (channel, count) in entry.channel_usage.iter() {
            write!(
                html,
                "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
                html_escape(channel),
                count
            )?;
        }
        html.push_str("</tbody></table>");

        if !entry.triggers.is_empty() {
            html.push_str("<table><thead><tr><th>Trigger</th><th class=\"num\">Events</th></tr></thead><tbody>");
            for (description, count) in entry.triggers.iter() {
                write!(
                    html,
                    "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
                    html_escape(description),
                    count
                )?;
            }
            html.push_str("</tbody></table>");
        }
    }
    Ok(())
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::P0 => "is-danger",
        Severity::P1 => "is-warn",
        Severity::P2 => "is-info",
        Severity::P3 => "is-muted",
    }
}

fn template_error(e: std::fmt::Error) -> RenderError {
    RenderError::Template(e.to_string())
}

pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
