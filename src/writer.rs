use crate::error::{Error, Result};
use crate::record::FormattedRecord;
use std::path::Path;
use tracing::{debug, error, info};
use umya_spreadsheet::structs::Worksheet;
use umya_spreadsheet::Spreadsheet;

pub const DEFAULT_START_ROW: u32 = 5;

/// Output column (1-based) for every field the template has room for.
const DEFAULT_COLUMNS: &[(&str, u32)] = &[
    ("id", 2),               // SKU
    ("name", 4),             // Название
    ("manufacturer", 6),     // Бренд
    ("description", 8),      // Описание
    ("price22", 11),         // Цена по умолчанию
    ("vat", 16),             // НДС
    ("category", 17),        // Категория
    ("images", 19),          // Изображения товара
    ("warranty", 21),        // Гарантия
    ("country", 22),         // Страна
    ("characteristics", 23), // Характеристики
    ("unit_measurement", 24), // Единица измерения
    ("available", 25),       // Доступность
    ("weight", 34),          // Вес
];

#[derive(Debug, Clone)]
pub struct FieldCatalog {
    columns: Vec<(String, u32)>,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(name, col)| (name.to_string(), *col))
                .collect(),
        }
    }
}

impl FieldCatalog {
    pub fn column(&self, field: &str) -> Option<u32> {
        self.columns
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, col)| *col)
    }
}

pub struct RowConfig {
    pub catalog: FieldCatalog,
    pub start_row: u32,
    pub column_offset: u32,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            catalog: FieldCatalog::default(),
            start_row: DEFAULT_START_ROW,
            column_offset: 0,
        }
    }
}

/// Write one row per record starting at `config.start_row`.
///
/// Fields missing from the catalog are skipped. Returns the number of rows
/// written.
pub fn write_rows(sheet: &mut Worksheet, records: &[FormattedRecord], config: &RowConfig) -> usize {
    info!("Inserting {} products into sheet {:?}", records.len(), sheet.get_name());

    for (row, record) in (config.start_row..).zip(records) {
        for (field, value) in record.iter() {
            let Some(col) = config.catalog.column(field) else {
                continue;
            };
            sheet
                .get_cell_mut((col + config.column_offset, row))
                .set_value_string(value);
        }
        debug!("Row {} written", row);
    }

    records.len()
}

pub fn save_workbook(workbook: &Spreadsheet, path: &Path) -> Result<()> {
    info!("Saving file {:?}", path);

    umya_spreadsheet::writer::xlsx::write(workbook, path).map_err(|e| {
        let err = Error::Save {
            path: path.to_path_buf(),
            details: e.to_string(),
        };
        error!("{}", err);
        err
    })?;

    info!("Excel file has been saved");
    Ok(())
}
