//! `roi fields` command - List editable inputs

use miette::Result;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{escape_md, load_config, load_project};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::format::{format_number, CurrencyFormat};
use crate::core::inputs::InputField;
use crate::core::pain::PainId;
use crate::core::session::SessionStore;

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    /// Only the inputs of one pain point (1-6); `factory` for factory settings
    #[arg(long, short = 'p')]
    pub pain: Option<String>,
}

#[derive(Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Value")]
    value: f64,
    #[tabled(rename = "Default")]
    default: f64,
    #[tabled(rename = "Unit")]
    unit: String,
}

fn unit(field: InputField, currency: &CurrencyFormat) -> String {
    match (field.is_currency(), field.suffix()) {
        (true, Some(s)) => format!("{}{}", currency.symbol(), s),
        (true, None) => currency.symbol().to_string(),
        (false, Some(s)) => s.to_string(),
        (false, None) => String::new(),
    }
}

pub fn run(args: FieldsArgs, global: &GlobalOpts) -> Result<()> {
    let project = load_project()?;
    let config = load_config(&project)?;
    let currency = config.currency();
    let session = SessionStore::load_or_default(&project);

    let fields: Vec<InputField> = match args.pain.as_deref() {
        None => InputField::ALL.to_vec(),
        Some("factory") => InputField::factory().collect(),
        Some(raw) => {
            let pain: PainId = raw.parse().map_err(|e: String| miette::miette!("{}", e))?;
            InputField::for_pain(pain).collect()
        }
    };

    let rows: Vec<FieldRow> = fields
        .into_iter()
        .map(|f| FieldRow {
            key: f.key(),
            label: f.label(),
            value: f.get(&session.inputs),
            default: f.default_value(),
            unit: unit(f, &currency),
        })
        .collect();

    let format = effective_format(global.output);
    if print_structured(&rows, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Csv => {
            println!("key,label,value,default,unit");
            for r in &rows {
                println!("{},{},{},{},{}", r.key, r.label, r.value, r.default, r.unit);
            }
        }
        OutputFormat::Md => {
            println!("| Key | Label | Value | Default | Unit |");
            println!("|-----|-------|-------|---------|------|");
            for r in &rows {
                println!(
                    "| `{}` | {} | {} | {} | {} |",
                    r.key,
                    escape_md(r.label),
                    format_number(r.value),
                    format_number(r.default),
                    r.unit
                );
            }
        }
        _ => println!("{}", Table::new(&rows).with(Style::rounded())),
    }
    Ok(())
}
