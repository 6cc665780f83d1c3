//! Create a blank template with the sheet and header row the exporter expects.
use umya_spreadsheet::*;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).map(|s| s.as_str()).unwrap_or("templates/template.xlsx");

    let mut book = new_file();
    {
        let sheet = book.get_sheet_mut(&0).unwrap();
        sheet.set_name("Ассортимент");

        // Header row; products start at row 5
        sheet.get_cell_mut("B4").set_value("SKU");
        sheet.get_cell_mut("D4").set_value("Название");
        sheet.get_cell_mut("F4").set_value("Бренд");
        sheet.get_cell_mut("H4").set_value("Описание");
        sheet.get_cell_mut("K4").set_value("Цена по умолчанию");
        sheet.get_cell_mut("P4").set_value("НДС");
        sheet.get_cell_mut("Q4").set_value("Категория");
        sheet.get_cell_mut("S4").set_value("Изображения товара");
        sheet.get_cell_mut("U4").set_value("Гарантия");
        sheet.get_cell_mut("V4").set_value("Страна");
        sheet.get_cell_mut("W4").set_value("Характеристики");
        sheet.get_cell_mut("X4").set_value("Единица измерения");
        sheet.get_cell_mut("Y4").set_value("Доступность");
        sheet.get_cell_mut("AH4").set_value("Вес");
    }

    if let Some(dir) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(dir).expect("Failed to create template directory");
    }
    writer::xlsx::write(&book, path).expect("Failed to write template");
    println!("Created {} successfully!", path);
}
