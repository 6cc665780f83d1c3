use crate::error::{Error, Result};
use crate::format::FormatterKind;
use crate::reader;
use crate::writer::{FieldCatalog, RowConfig};
use crate::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Validated settings for one export run.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub template_path: PathBuf,
    pub sheet_name: String,
    pub result_path: PathBuf,
    pub formatters: Vec<FormatterKind>,
    pub category_depth: usize,
    pub start_row: u32,
    pub column_offset: u32,
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let url = args
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingUrl)?
            .to_string();

        reader::check_template(&args.template)?;

        let result_path = match &args.result_file_dir {
            Some(dir) => dir.join(&args.result_file_name),
            None => PathBuf::from(&args.result_file_name),
        };

        let headers = args
            .headers
            .iter()
            .map(|h| parse_header(h))
            .collect::<Result<Vec<_>>>()?;

        let params = args
            .params
            .iter()
            .map(|p| parse_param(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            url,
            template_path: args.template.clone(),
            sheet_name: args.sheet.clone(),
            result_path,
            formatters: args.formatters.clone(),
            category_depth: args.category_depth,
            start_row: args.start_row,
            column_offset: args.column_offset,
            timeout: Duration::from_secs(args.timeout),
            headers,
            params,
        })
    }

    pub fn row_config(&self) -> RowConfig {
        RowConfig {
            catalog: FieldCatalog::default(),
            start_row: self.start_row,
            column_offset: self.column_offset,
        }
    }
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| Error::InvalidHeader(raw.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidHeader(raw.to_string()));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_param(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::InvalidParam(raw.to_string()))?;
    if key.is_empty() {
        return Err(Error::InvalidParam(raw.to_string()));
    }
    Ok((key.to_string(), value.to_string()))
}
