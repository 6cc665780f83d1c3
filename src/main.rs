mod category;
mod config;
mod error;
mod extractor;
mod fetch;
mod format;
mod logger;
mod reader;
mod record;
mod writer;

use clap::Parser;
use config::Config;
use fetch::{Fetch, HttpFetcher};
use format::{FormatterKind, DEFAULT_FORMATTERS};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "catalog2xlsx")]
#[command(version, about = "Download a product catalog XML feed into an Excel template")]
pub struct Args {
    /// Catalog feed URL
    #[arg(long, env = "URL")]
    pub url: Option<String>,

    /// Excel template to fill
    #[arg(short, long, env = "TEMPLATE_PATH", default_value = "templates/template.xlsx")]
    pub template: PathBuf,

    /// Sheet of the template that receives the products
    #[arg(short, long, env = "SHEET_NAME", default_value = "Ассортимент")]
    pub sheet: String,

    /// Name of the result file
    #[arg(long, env = "RESULT_FILE_NAME", default_value = "result.xlsx")]
    pub result_file_name: String,

    /// Directory for the result file (default: current directory)
    #[arg(long, env = "RESULT_FILE_DIR")]
    pub result_file_dir: Option<PathBuf>,

    /// Depth of the <sections> level whose name becomes the product category
    #[arg(long, env = "CATEGORY_DEPTH", default_value_t = extractor::DEFAULT_CATEGORY_DEPTH)]
    pub category_depth: usize,

    /// Formatters to apply, in order
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = DEFAULT_FORMATTERS.to_vec())]
    pub formatters: Vec<FormatterKind>,

    /// First row written in the sheet
    #[arg(long, default_value_t = writer::DEFAULT_START_ROW)]
    pub start_row: u32,

    /// Added to every output column
    #[arg(long, default_value_t = 0)]
    pub column_offset: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = fetch::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Extra request header, "Name: value" (repeatable)
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Extra query parameter, key=value (repeatable)
    #[arg(long = "param")]
    pub params: Vec<String>,

    /// Log level (error, warning, info, debug)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print detailed progress
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { args.log_level.as_str() };
    if let Err(e) = logger::init_tracing(level, args.log_file.as_deref()) {
        eprintln!("warning: cannot set up logging: {}", e);
    }

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: &Args) -> error::Result<()> {
    let config = Config::from_args(args)?;
    let fetcher = HttpFetcher::new(config.timeout, &config.headers, &config.params)?;

    let rows = export(&config, &fetcher)?;
    info!("{} products written to {:?}", rows, config.result_path);
    Ok(())
}

/// Fill the template with the feed's products and save the result.
///
/// The template and sheet are checked before the feed is downloaded, and
/// nothing is saved unless every item parses.
fn export(config: &Config, fetcher: &dyn Fetch) -> error::Result<usize> {
    let mut workbook = reader::open_template(&config.template_path)?;
    let sheet_idx = reader::resolve_sheet_index(&workbook, &config.sheet_name)?;

    let xml = fetcher.fetch_bytes(&config.url)?;
    let records = extractor::extract(xml.as_slice(), &config.formatters, config.category_depth)?;

    let sheet = workbook
        .get_sheet_mut(&sheet_idx)
        .ok_or_else(|| error::Error::SheetNotFound {
            name: config.sheet_name.clone(),
            available: String::new(),
        })?;
    let rows = writer::write_rows(sheet, &records, &config.row_config());

    writer::save_workbook(&workbook, &config.result_path)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::tempdir;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
  <sections>
    <section>
      <name>Safes</name>
      <sections>
        <section>
          <name>Fireproof</name>
          <item>
            <id>101</id>
            <name>Box</name>
            <manufacturer>-Promet-</manufacturer>
            <price22>15000</price22>
            <warranty>1</warranty>
            <weight>-30kg-</weight>
            <preview_text>&amp;lt;p&amp;gt;Steel &amp;lt;b&amp;gt;box&amp;lt;/b&amp;gt;&amp;lt;/p&amp;gt;</preview_text>
            <preview_picture>/img/101.jpg</preview_picture>
            <material>Steel</material>
          </item>
        </section>
      </sections>
    </section>
  </sections>
  <item_count>1</item_count>
</catalog>"#;

    struct StubFetcher {
        body: error::Result<Vec<u8>>,
        calls: Cell<usize>,
    }

    impl StubFetcher {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.as_bytes().to_vec()),
                calls: Cell::new(0),
            }
        }
    }

    impl Fetch for StubFetcher {
        fn fetch_bytes(&self, url: &str) -> error::Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            match &self.body {
                Ok(bytes) => Ok(bytes.clone()),
                Err(_) => Err(error::Error::Timeout {
                    url: url.to_string(),
                }),
            }
        }
    }

    fn make_template(dir: &Path) -> PathBuf {
        let path = dir.join("template.xlsx");
        let mut book = umya_spreadsheet::new_file();
        book.new_sheet("Ассортимент").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();
        path
    }

    fn make_config(dir: &Path) -> Config {
        Config {
            url: "http://feed.local/catalog.xml".to_string(),
            template_path: make_template(dir),
            sheet_name: "Ассортимент".to_string(),
            result_path: dir.join("result.xlsx"),
            formatters: DEFAULT_FORMATTERS.to_vec(),
            category_depth: 1,
            start_row: writer::DEFAULT_START_ROW,
            column_offset: 0,
            timeout: Duration::from_secs(5),
            headers: Vec::new(),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_export_writes_rows() {
        let dir = tempdir().unwrap();
        let config = make_config(dir.path());

        let rows = export(&config, &StubFetcher::ok(FEED)).unwrap();
        assert_eq!(rows, 1);

        let result = umya_spreadsheet::reader::xlsx::read(&config.result_path).unwrap();
        let sheet = result.get_sheet_by_name("Ассортимент").unwrap();
        assert_eq!(sheet.get_value((2, 5)), "101S");
        assert_eq!(sheet.get_value((4, 5)), "Box");
        assert_eq!(sheet.get_value((6, 5)), "Promet");
        assert_eq!(sheet.get_value((8, 5)), "<p>Steel box</p>");
        assert_eq!(sheet.get_value((16, 5)), "20");
        assert_eq!(sheet.get_value((17, 5)), "Safes");
        assert_eq!(sheet.get_value((19, 5)), "/img/101.jpg");
        assert_eq!(sheet.get_value((21, 5)), "Да");
        assert_eq!(sheet.get_value((23, 5)), "Материал|Steel;");
        assert_eq!(sheet.get_value((24, 5)), "Шт");
        assert_eq!(sheet.get_value((25, 5)), "под заказ");
        assert_eq!(sheet.get_value((34, 5)), "30kg");
        assert_eq!(sheet.get_value((2, 6)), "");
    }

    #[test]
    fn test_parse_error_saves_nothing() {
        let dir = tempdir().unwrap();
        let config = make_config(dir.path());
        let feed = "<catalog><item><id>1</id></item></catalog>";

        let err = export(&config, &StubFetcher::ok(feed)).unwrap_err();
        assert!(matches!(err, error::Error::MissingCategory { .. }));
        assert!(!config.result_path.exists());
    }

    #[test]
    fn test_missing_sheet_fails_before_fetch() {
        let dir = tempdir().unwrap();
        let config = Config {
            sheet_name: "Products".to_string(),
            ..make_config(dir.path())
        };
        let fetcher = StubFetcher::ok(FEED);

        let err = export(&config, &fetcher).unwrap_err();
        assert!(matches!(err, error::Error::SheetNotFound { .. }));
        assert_eq!(fetcher.calls.get(), 0);
    }

    #[test]
    fn test_fetch_error_is_surfaced() {
        let dir = tempdir().unwrap();
        let config = make_config(dir.path());
        let fetcher = StubFetcher {
            body: Err(error::Error::MissingUrl),
            calls: Cell::new(0),
        };

        let err = export(&config, &fetcher).unwrap_err();
        assert!(matches!(err, error::Error::Timeout { .. }));
        assert_eq!(err.exit_code(), 2);
        assert!(!config.result_path.exists());
    }
}
