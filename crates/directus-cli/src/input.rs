//! Parsing of request bodies and query pairs given on the command line.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde_json::Value;

use directus::RequestOptions;

/// A JSON document given inline or read from a file.
#[derive(Args, Debug, Default)]
pub struct JsonInput {
    /// Inline JSON document
    #[arg(long, conflicts_with = "file")]
    pub data: Option<String>,

    /// Read the JSON document from a file ("-" for stdin)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl JsonInput {
    /// The document, or `None` when neither `--data` nor `--file` was given.
    pub fn read(&self) -> Result<Option<Value>> {
        let raw = match (&self.data, &self.file) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) if path.as_os_str() == "-" => {
                std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
            }
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => return Ok(None),
        };
        let value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
        Ok(Some(value))
    }

    /// The document, failing when none was given.
    pub fn require(&self) -> Result<Value> {
        self.read()?.context("A JSON body is required (--data or --file)")
    }

    /// The document as a list of items.
    pub fn require_array(&self) -> Result<Vec<Value>> {
        match self.require()? {
            Value::Array(items) => Ok(items),
            other => bail!("Expected a JSON array of items, got {}", kind(&other)),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turn `key=value` pairs into request options.
pub fn query_options(pairs: &[String]) -> Result<RequestOptions> {
    pairs.iter().try_fold(RequestOptions::new(), |opts, pair| {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Query parameter '{pair}' is not key=value"))?;
        if key.is_empty() {
            bail!("Query parameter '{pair}' has an empty key");
        }
        Ok(opts.query(key, value))
    })
}
