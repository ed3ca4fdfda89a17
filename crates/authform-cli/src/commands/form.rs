use anyhow::{Context, Result};
use authform_validation::{Config, FieldDescriptor, FormReport, FormSession};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::print_verdict;

/// A rendered form: its fields and any errors the server put on the page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFixture {
    pub fields: Vec<FieldDescriptor>,

    #[serde(default)]
    pub server_errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOutcome {
    pub report: FormReport,

    /// Server messages still displayed after client validation, including
    /// ones keyed to no listed field (such as a form-wide `__all__` error)
    pub server_errors: BTreeMap<String, Vec<String>>,
}

impl FormOutcome {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid() && self.server_errors.is_empty()
    }
}

pub fn execute(config: &Config, path: &Path, json: bool) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form fixture: {:?}", path))?;
    let fixture: FormFixture = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse form fixture: {:?}", path))?;

    tracing::info!(fields = fixture.fields.len(), "validating form fixture");
    let outcome = run_fixture(config, fixture);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for verdict in &outcome.report.fields {
            print_verdict(&verdict.field, &verdict.result);
        }
        for (field, messages) in &outcome.server_errors {
            for message in messages {
                println!("{} {}: {}", "!".yellow().bold(), field.bold(), message);
            }
        }
    }

    Ok(outcome.is_valid())
}

pub fn run_fixture(config: &Config, fixture: FormFixture) -> FormOutcome {
    let keys: Vec<String> = fixture.fields.iter().map(|f| f.key().to_string()).collect();
    let mut session = FormSession::from_config(fixture.fields, config);

    let mut unattached = BTreeMap::new();
    for (field, messages) in fixture.server_errors {
        if !session.load_server_errors(&field, messages.iter().cloned()) && !messages.is_empty() {
            unattached.insert(field, messages);
        }
    }

    let report = session.validate_all();

    let mut server_errors: BTreeMap<String, Vec<String>> = keys
        .into_iter()
        .filter_map(|key| {
            let messages: Vec<String> = session
                .errors(&key)?
                .messages()
                .iter()
                .filter(|m| config.provenance.is_server(m))
                .cloned()
                .collect();
            (!messages.is_empty()).then_some((key, messages))
        })
        .collect();
    server_errors.extend(unattached);

    FormOutcome {
        report,
        server_errors,
    }
}
