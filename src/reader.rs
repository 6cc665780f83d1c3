use crate::error::{Error, Result};
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

/// Check that the template exists and is a workbook we can write into.
pub fn check_template(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::TemplateNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "xlsx" | "xlsm" => Ok(()),
        _ => Err(Error::UnsupportedTemplate(extension)),
    }
}

pub fn open_template(path: &Path) -> Result<Spreadsheet> {
    check_template(path)?;

    umya_spreadsheet::reader::xlsx::read(path).map_err(|e| Error::InvalidTemplate {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

pub fn get_sheet_names(workbook: &Spreadsheet) -> Vec<String> {
    workbook
        .get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect()
}

pub fn resolve_sheet_index(workbook: &Spreadsheet, name: &str) -> Result<usize> {
    let sheet_names = get_sheet_names(workbook);
    sheet_names
        .iter()
        .position(|n| n == name)
        .ok_or_else(|| Error::SheetNotFound {
            name: name.to_string(),
            available: sheet_names.join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        assert!(matches!(check_template(&path), Err(Error::TemplateNotFound(_))));
    }

    #[test]
    fn test_unsupported_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.csv");
        std::fs::write(&path, "a,b").unwrap();
        assert!(matches!(
            check_template(&path),
            Err(Error::UnsupportedTemplate(ext)) if ext == "csv"
        ));
    }

    #[test]
    fn test_resolve_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.xlsx");
        let mut book = umya_spreadsheet::new_file();
        book.new_sheet("Ассортимент").unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let workbook = open_template(&path).unwrap();
        assert_eq!(resolve_sheet_index(&workbook, "Ассортимент").unwrap(), 1);

        let err = resolve_sheet_index(&workbook, "Products").unwrap_err();
        assert!(matches!(err, Error::SheetNotFound { ref available, .. } if available == "Sheet1, Ассортимент"));
    }
}
