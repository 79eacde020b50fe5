//! Report rendering with Tera templates
//!
//! Templates are embedded at build time. Images are referenced by path; any
//! configured image that cannot be read is left out of the report.

use chrono::NaiveDate;
use rust_embed::Embed;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Tera, Value};
use thiserror::Error;

use crate::core::config::{Config, VendorInfo};
use crate::core::format::{format_long_date, format_number, CurrencyFormat};
use crate::core::inputs::{AllInputs, InputField};
use crate::core::project::Project;
use crate::core::results::PainResult;
use crate::core::session::Session;
use crate::lead::form::Lead;
use crate::report::breakdown::{breakdown_lines, BreakdownLine};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

pub const HIDDEN_COSTS: [&str; 6] = [
    "Transportation costs for rejected batches sent back and forth",
    "Loss of customer confidence and strained relationships",
    "Stress and uncertainty in production planning",
    "Missed innovation opportunities and competitive advantages",
    "Production disruption during critical peak seasons",
    "Inability to explore cost-saving material alternatives",
];

pub const PAYBACK_PERIOD: &str = "< 12 Months";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Html,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "report.md.tera",
            ReportFormat::Html => "report.html.tera",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// What a report is about
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub lead: Lead,
    pub inputs: AllInputs,
    pub results: Vec<PainResult>,
    pub total: f64,
}

impl ReportData {
    pub fn from_session(session: &Session, lead: Lead) -> Self {
        Self {
            lead,
            inputs: session.inputs,
            results: session.results.clone(),
            total: session.total(),
        }
    }
}

/// Presentation settings that do not depend on the lead
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub vendor: VendorInfo,
    pub currency: CurrencyFormat,
    pub logo: Option<PathBuf>,
    pub customer_logos: Vec<PathBuf>,
    pub date: NaiveDate,
}

impl ReportOptions {
    pub fn from_config(config: &Config, project: Option<&Project>, date: NaiveDate) -> Self {
        let resolve = |p: &PathBuf| match project {
            Some(project) => project.resolve(p),
            None => p.clone(),
        };
        Self {
            vendor: config.vendor.clone(),
            currency: config.currency(),
            logo: config.logo.as_ref().map(resolve),
            customer_logos: config.customer_logos.iter().map(resolve).collect(),
            date,
        }
    }
}

#[derive(Debug, Serialize)]
struct SettingRow {
    label: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct PainSection {
    id: u8,
    title: String,
    description: String,
    breakdown: Vec<BreakdownLine>,
    monthly_loss: f64,
    annual_loss: f64,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: f64,
    monthly: f64,
    five_year: f64,
    payback: &'static str,
}

/// Everything the templates see
#[derive(Debug, Serialize)]
pub struct ReportContext {
    vendor: VendorInfo,
    lead: Lead,
    date: String,
    factory: Vec<SettingRow>,
    pains: Vec<PainSection>,
    hidden_costs: [&'static str; 6],
    summary: Summary,
    logo: Option<String>,
    customer_logos: Vec<String>,
}

impl ReportContext {
    pub fn build(data: &ReportData, options: &ReportOptions) -> Self {
        let currency = &options.currency;
        let factory = InputField::factory()
            .map(|field| SettingRow {
                label: field.label(),
                value: setting_value(field, &data.inputs, currency),
            })
            .collect();

        let pains = data
            .results
            .iter()
            .filter(|r| r.is_selected)
            .map(|r| PainSection {
                id: r.id.number(),
                title: r.id.title().to_string(),
                description: r.id.description().to_string(),
                breakdown: breakdown_lines(r.id, &data.inputs, currency),
                monthly_loss: r.monthly_loss,
                annual_loss: r.annual_loss,
            })
            .collect();

        Self {
            vendor: options.vendor.clone(),
            lead: data.lead.clone(),
            date: format_long_date(options.date),
            factory,
            pains,
            hidden_costs: HIDDEN_COSTS,
            summary: Summary {
                total: data.total,
                monthly: data.total / 12.0,
                five_year: data.total * 5.0,
                payback: PAYBACK_PERIOD,
            },
            logo: options.logo.as_deref().and_then(readable_asset),
            customer_logos: options
                .customer_logos
                .iter()
                .filter_map(|p| readable_asset(p))
                .collect(),
        }
    }
}

fn setting_value(field: InputField, inputs: &AllInputs, currency: &CurrencyFormat) -> String {
    let value = field.get(inputs);
    match (field.is_currency(), field.suffix()) {
        (true, Some(unit)) => currency.format_rate(value, unit),
        (true, None) => currency.format(value),
        (false, Some(unit)) => format!("{} {}", format_number(value), unit),
        (false, None) => format_number(value),
    }
}

/// Path of an image that can actually be read, or `None` (with a warning)
fn readable_asset(path: &Path) -> Option<String> {
    match fs::File::open(path) {
        Ok(_) => Some(path.display().to_string()),
        Err(e) => {
            log::warn!("Skipping image {}: {}", path.display(), e);
            None
        }
    }
}

/// Renders reports from the embedded templates
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    pub fn new(currency: CurrencyFormat) -> Result<Self, ReportError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| ReportError::RenderError(e.to_string()))?;
                }
            }
        }
        tera.autoescape_on(vec![".html.tera"]);

        tera.register_filter(
            "currency",
            move |value: &Value, _: &HashMap<String, Value>| -> tera::Result<Value> {
                // Non-finite amounts reach the template as null
                let amount = match value {
                    Value::Null => f64::NAN,
                    other => other
                        .as_f64()
                        .ok_or_else(|| tera::Error::msg("currency filter expects a number"))?,
                };
                Ok(Value::String(currency.format(amount)))
            },
        );

        Ok(Self { tera })
    }

    pub fn render(
        &self,
        data: &ReportData,
        options: &ReportOptions,
        format: ReportFormat,
    ) -> Result<String, ReportError> {
        let name = format.template();
        if !self.tera.get_template_names().any(|n| n == name) {
            return Err(ReportError::NotFound(name.to_string()));
        }
        let report = ReportContext::build(data, options);
        let context = tera::Context::from_serialize(&report)
            .map_err(|e| ReportError::RenderError(e.to_string()))?;
        self.tera
            .render(name, &context)
            .map_err(|e| ReportError::RenderError(format_tera_error(&e)))
    }
}

/// Tera hides the useful part of an error in its source chain
fn format_tera_error(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

/// Render and write `<stem>.<ext>` into `dir`, creating it when needed
pub fn write_report(
    renderer: &ReportRenderer,
    data: &ReportData,
    options: &ReportOptions,
    format: ReportFormat,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let content = renderer.render(data, options, format)?;
    let io_error = |path: &Path, source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    let path = dir.join(format!(
        "{}.{}",
        data.lead.report_file_stem(options.date),
        format.extension()
    ));
    fs::write(&path, content).map_err(|e| io_error(&path, e))?;
    log::info!("Wrote report to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calc::{calculate_all_pains, calculate_total};
    use crate::core::pain::PainId;
    use crate::core::results::set_selected;
    use tempfile::TempDir;

    fn data() -> ReportData {
        let inputs = AllInputs::default();
        let mut results = calculate_all_pains(&inputs);
        set_selected(&mut results, PainId::Pain2, false);
        let total = calculate_total(&results);
        ReportData {
            lead: Lead::new("Asha", "Manager", "Acme & Sons", "+91 98765 43210", "a@acme.example"),
            inputs,
            results,
            total,
        }
    }

    fn options() -> ReportOptions {
        ReportOptions {
            vendor: VendorInfo::default(),
            currency: CurrencyFormat::default(),
            logo: None,
            customer_logos: Vec::new(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        }
    }

    fn render(format: ReportFormat, options: &ReportOptions) -> String {
        let renderer = ReportRenderer::new(options.currency.clone()).unwrap();
        renderer.render(&data(), options, format).unwrap()
    }

    #[test]
    fn test_markdown_contains_selected_pains_only() {
        let md = render(ReportFormat::Markdown, &options());
        assert!(md.contains("Lab ROI Analysis Report for Acme & Sons"));
        assert!(md.contains("19 October 2026"));
        assert!(md.contains("Color Rejection After Stretching"));
        assert!(!md.contains("Missed R&D Opportunities"));
        assert!(md.contains("1 trials × 200 kg/hr × 3 hrs × ₹110/kg = ₹66,000/month"));
    }

    #[test]
    fn test_markdown_summary_figures() {
        let md = render(ReportFormat::Markdown, &options());
        // 3,632,000 - 1,320,000
        assert!(md.contains("₹23,12,000"));
        assert!(md.contains("₹1,92,667"));
        assert!(md.contains("₹1,15,60,000"));
        assert!(md.contains("< 12 Months"));
        for cost in HIDDEN_COSTS {
            assert!(md.contains(cost), "{}", cost);
        }
    }

    #[test]
    fn test_overflowing_amounts_still_render() {
        let mut data = data();
        data.inputs.factory.output_per_hour = 1e200;
        data.inputs.factory.working_hours_per_day = 1e200;
        data.results = calculate_all_pains(&data.inputs);
        data.total = calculate_total(&data.results);
        assert!(data.total.is_infinite());

        let renderer = ReportRenderer::new(CurrencyFormat::default()).unwrap();
        let md = renderer
            .render(&data, &options(), ReportFormat::Markdown)
            .unwrap();
        assert!(md.contains("₹NaN"));
        assert!(md.contains("Financial Summary"));
    }

    #[test]
    fn test_factory_rows() {
        let md = render(ReportFormat::Markdown, &options());
        assert!(md.contains("| Output per hour | 200 kg/hr |"));
        assert!(md.contains("| Material cost per kg | ₹100/kg |"));
    }

    #[test]
    fn test_html_escapes_lead_text() {
        let html = render(ReportFormat::Html, &options());
        assert!(html.contains("<html"));
        assert!(html.contains("Acme &amp; Sons"));
        assert!(html.contains("nikunj@neptuneplastic.net"));
    }

    #[test]
    fn test_missing_logo_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("present.png");
        fs::write(&present, b"png").unwrap();

        let mut opts = options();
        opts.logo = Some(tmp.path().join("missing.png"));
        opts.customer_logos = vec![tmp.path().join("gone.png"), present.clone()];

        let context = ReportContext::build(&data(), &opts);
        assert_eq!(context.logo, None);
        assert_eq!(context.customer_logos, vec![present.display().to_string()]);

        let html = render(ReportFormat::Html, &opts);
        assert!(html.contains("Trusted by Industry Leaders"));
    }

    #[test]
    fn test_no_selection_renders_without_pain_sections() {
        let mut data = data();
        crate::core::results::set_all_selected(&mut data.results, false);
        data.total = 0.0;
        let renderer = ReportRenderer::new(CurrencyFormat::default()).unwrap();
        let md = renderer.render(&data, &options(), ReportFormat::Markdown).unwrap();
        assert!(!md.contains("Pain Points & Impact Analysis"));
        assert!(md.contains("Financial Summary"));
    }

    #[test]
    fn test_write_report_file_name() {
        let tmp = TempDir::new().unwrap();
        let renderer = ReportRenderer::new(CurrencyFormat::default()).unwrap();
        let dir = tmp.path().join("reports");
        let path = write_report(&renderer, &data(), &options(), ReportFormat::Html, &dir).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Neptune_ROI_Report_Acme_&_Sons_2026-10-19.html"
        );
        assert!(path.exists());
    }
}
