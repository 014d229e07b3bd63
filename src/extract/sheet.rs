use super::books::{report_date_from_name, Book};
use crate::config::{
    CODE_COL, CURRENT_YEAR_COL, NAME_COL, PREV_DATASETS_START_COL, PREV_DATASET_WIDTH,
    REFERENCE_DATE_COL, REFERENCE_DATE_ROW, ROW_DATE_COL, TOTAL_ROW_MARKER, YEAR_LABELS_ROW,
};
use crate::errors::Error;
use crate::shared::utils;
use crate::ui;
use calamine::{DataType, Range, Reader};
use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static YEAR_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4} год\b").expect("валидное регулярное выражение подписи года")
});

const EMPTY_CELL: DataType = DataType::Empty;

// Блок столбцов с показателями одного из прошлых годов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrevDataset {
    pub year_no: i32,
    pub start_col: usize,
}

// Контекст одного файла: лист целиком и все, что разобрано из его шапки.
// Отчетная дата живет здесь, а не в глобальном состоянии, чтобы файлы
// в одном запуске не влияли друг на друга.
pub struct Sheet {
    pub path: PathBuf,
    pub data: Range<DataType>,
    pub reference_date: NaiveDate,
    pub current_year_no: i32,
    pub prev_datasets: Vec<PrevDataset>,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

impl Sheet {
    // разработчики Calamine делают зачем-то &mut self в функции worksheet_range_at(&mut self, n: usize),
    // из-за этого workbook приходится держать мутабельным, хотя этот код его менять вовсе не собирается
    pub fn new(workbook: &mut Book) -> Result<Sheet, Error> {
        let xl_sheet = workbook
            .data
            .worksheet_range_at(0)
            .ok_or(Error::CalamineSheetOfTheBookIsUndetectable {
                file_path: workbook.path.clone(),
            })?
            .map_err(|err| Error::CalamineSheetOfTheBookIsUnreadable {
                file_path: workbook.path.clone(),
                err,
            })?;

        Self::from_range(workbook.path.clone(), xl_sheet)
    }

    // Отделено от new: в тестах диапазон собирается в памяти, без файла Excel
    pub fn from_range(path: PathBuf, data: Range<DataType>) -> Result<Sheet, Error> {
        let range_start = data.start().ok_or_else(|| Error::EmptySheetRange {
            file_path: path.clone(),
        })?;

        // вся дальнейшая адресация рассчитана на лист, заполненный с "A1"
        if range_start != (0, 0) {
            return Err(Error::ShiftedSheetRange {
                file_path: path,
                range_start,
            });
        }

        let reference_date =
            utils::get_date(cell_of(&data, REFERENCE_DATE_ROW, REFERENCE_DATE_COL)).ok_or_else(
                || Error::NoReferenceDateInHeader {
                    file_path: path.clone(),
                },
            )?;

        let current_year_no = year_from_label(cell_of(&data, YEAR_LABELS_ROW, CURRENT_YEAR_COL))
            .ok_or_else(|| Error::YearLabelIsUnreadable {
                file_path: path.clone(),
                cell_address: utils::get_xl_cell_address(YEAR_LABELS_ROW, CURRENT_YEAR_COL),
            })?;

        let prev_datasets = find_prev_datasets(&data, &path)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let report_date =
            report_date_from_name(&file_name).ok_or_else(|| Error::NoReportDateInFileName {
                file_path: path.clone(),
            })?;
        let (week_start, week_end) = week_window(report_date);

        Ok(Sheet {
            path,
            data,
            reference_date,
            current_year_no,
            prev_datasets,
            week_start,
            week_end,
        })
    }

    pub fn height(&self) -> usize {
        self.data.get_size().0
    }

    pub fn width(&self) -> usize {
        self.data.get_size().1
    }

    pub fn cell(&self, row: usize, col: usize) -> &DataType {
        cell_of(&self.data, row, col)
    }

    pub fn code_text(&self, row: usize) -> Option<String> {
        utils::get_text(self.cell(row, CODE_COL))
    }

    pub fn name_text(&self, row: usize) -> Option<String> {
        utils::get_text(self.cell(row, NAME_COL))
    }

    pub fn row_date(&self, row: usize) -> Option<NaiveDate> {
        utils::get_date(self.cell(row, ROW_DATE_COL))
    }

    // Строка участвует в сборе, только когда ее дата совпадает с отчетной
    pub fn is_row_dated(&self, row: usize) -> bool {
        self.row_date(row) == Some(self.reference_date)
    }

    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        utils::get_number(self.cell(row, col))
    }

    // Доли из процентных ячеек хранятся умноженными на 100. Доля вне 0..1
    // записывается как есть, но о ней сообщается в консоль
    pub fn percent(&self, row: usize, col: usize) -> Option<f64> {
        let fraction = self.number(row, col)?;
        if !(0.0..=1.0).contains(&fraction) {
            let msg = format!(
                r#"Внимание: в ячейке "{}" файла {} доля {} вне диапазона 0..1, значение записано с умножением на 100"#,
                utils::get_xl_cell_address(row, col),
                self.path.display(),
                fraction
            );
            ui::display_formatted_text(&msg, Some(ui::warning_style()));
        }
        Some(fraction * 100.0)
    }

    // Первая строка со значением "Итого" в столбце "A" отделяет строки
    // проектов и организаций от сводных строк листа
    pub fn total_row(&self) -> Result<usize, Error> {
        (0..self.height())
            .find(|row| self.code_text(*row).as_deref() == Some(TOTAL_ROW_MARKER))
            .ok_or_else(|| Error::NoTotalRowInSheet {
                file_path: self.path.clone(),
            })
    }
}

fn cell_of(data: &Range<DataType>, row: usize, col: usize) -> &DataType {
    data.get_value((row as u32, col as u32)).unwrap_or(&EMPTY_CELL)
}

// Подпись года: текст, начинающийся с четырех цифр, например "2023 год"
fn year_from_label(cell: &DataType) -> Option<i32> {
    let label = cell.get_string()?;
    let year_part: String = label.trim().chars().take(4).collect();
    year_part.parse::<i32>().ok()
}

// Число блоков прошлых годов равно числу подписей вида "NNNN год" в строке
// подписей от столбца "K" и правее; сами блоки следуют с шагом в 5 столбцов
fn find_prev_datasets(data: &Range<DataType>, path: &Path) -> Result<Vec<PrevDataset>, Error> {
    let (_, width) = data.get_size();

    let labels_found: usize = (PREV_DATASETS_START_COL..width)
        .filter_map(|col| cell_of(data, YEAR_LABELS_ROW, col).get_string())
        .map(|label| YEAR_LABEL_RE.find_iter(label).count())
        .sum();

    let mut prev_datasets = Vec::with_capacity(labels_found);
    for i in 0..labels_found {
        let start_col = PREV_DATASETS_START_COL + PREV_DATASET_WIDTH * i;
        let year_no = year_from_label(cell_of(data, YEAR_LABELS_ROW, start_col)).ok_or_else(
            || Error::YearLabelIsUnreadable {
                file_path: path.to_path_buf(),
                cell_address: utils::get_xl_cell_address(YEAR_LABELS_ROW, start_col),
            },
        )?;
        prev_datasets.push(PrevDataset { year_no, start_col });
    }

    Ok(prev_datasets)
}

// Отчетная неделя: понедельник..воскресенье вокруг даты из имени файла
pub fn week_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week_start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    (week_start, week_start + Duration::days(6))
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;

    #[test]
    fn header_is_parsed_from_valid_grid() {
        let sheet = sheet_from(grid_with_header(4, 20));

        assert_eq!(
            sheet.reference_date,
            NaiveDate::from_ymd_opt(2023, 7, 14).unwrap()
        );
        assert_eq!(sheet.current_year_no, 2023);
        assert!(sheet.prev_datasets.is_empty());
        assert_eq!(sheet.height(), 4);
        assert_eq!(sheet.width(), 20);
    }

    #[test]
    fn reference_date_must_be_a_date_cell() {
        // пустая ячейка "R1"
        let mut grid = empty_grid(4, 20);
        set_text(&mut grid, 1, 3, "2023 год");
        let result = Sheet::from_range(PathBuf::from(TEST_FILE_NAME), grid);
        assert!(matches!(result, Err(Error::NoReferenceDateInHeader { .. })));

        // число без датного формата тоже не подходит
        let mut grid = empty_grid(4, 20);
        set_text(&mut grid, 1, 3, "2023 год");
        grid.set_value((0, 17), DataType::Float(TEST_REFERENCE_SERIAL));
        let result = Sheet::from_range(PathBuf::from(TEST_FILE_NAME), grid);
        assert!(matches!(result, Err(Error::NoReferenceDateInHeader { .. })));
    }

    #[test]
    fn current_year_label_must_start_with_four_digits() {
        let mut grid = empty_grid(4, 20);
        grid.set_value((0, 17), DataType::DateTime(TEST_REFERENCE_SERIAL));
        set_text(&mut grid, 1, 3, "год 2023");

        let result = Sheet::from_range(PathBuf::from(TEST_FILE_NAME), grid);
        match result {
            Err(Error::YearLabelIsUnreadable { cell_address, .. }) => {
                assert_eq!(cell_address, "D2")
            }
            _ => panic!("ожидалась ошибка подписи года"),
        }
    }

    #[test]
    fn two_prev_year_labels_make_two_blocks() {
        let mut grid = grid_with_header(4, 22);
        set_text(&mut grid, 1, 10, "2022 год");
        set_text(&mut grid, 1, 15, "2021 год");

        let sheet = sheet_from(grid);
        assert_eq!(
            sheet.prev_datasets,
            vec![
                PrevDataset { year_no: 2022, start_col: 10 },
                PrevDataset { year_no: 2021, start_col: 15 },
            ]
        );
    }

    #[test]
    fn empty_range_is_rejected() {
        let result = Sheet::from_range(PathBuf::from(TEST_FILE_NAME), Range::empty());
        assert!(matches!(result, Err(Error::EmptySheetRange { .. })));
    }

    #[test]
    fn shifted_range_is_rejected() {
        let grid: Range<DataType> = Range::new((1, 0), (5, 19));
        let result = Sheet::from_range(PathBuf::from(TEST_FILE_NAME), grid);
        match result {
            Err(Error::ShiftedSheetRange { range_start, .. }) => {
                assert_eq!(range_start, (1, 0))
            }
            _ => panic!("ожидалась ошибка смещенной раскладки"),
        }
    }

    #[test]
    fn file_name_without_date_is_rejected() {
        let grid = grid_with_header(4, 20);
        let result = Sheet::from_range(PathBuf::from("форма эталон.xlsx"), grid);
        assert!(matches!(result, Err(Error::NoReportDateInFileName { .. })));
    }

    #[test]
    fn rows_are_dated_only_by_exact_reference_date() {
        let mut grid = grid_with_header(5, 20);
        set_date(&mut grid, 2, 2);
        // соседний день
        grid.set_value((3, 2), DataType::DateTime(TEST_REFERENCE_SERIAL + 1.0));
        // число без датного формата
        grid.set_value((4, 2), DataType::Float(TEST_REFERENCE_SERIAL));

        let sheet = sheet_from(grid);
        assert!(sheet.is_row_dated(2));
        assert!(!sheet.is_row_dated(3));
        assert!(!sheet.is_row_dated(4));
    }

    #[test]
    fn week_window_is_monday_aligned() {
        // 14.07.2023 - пятница
        let friday = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
        assert_eq!(
            week_window(friday),
            (
                NaiveDate::from_ymd_opt(2023, 7, 10).unwrap(),
                NaiveDate::from_ymd_opt(2023, 7, 16).unwrap()
            )
        );

        // понедельник остается началом своей недели
        let monday = NaiveDate::from_ymd_opt(2023, 7, 10).unwrap();
        assert_eq!(week_window(monday).0, monday);

        // воскресенье относится к уходящей неделе
        let sunday = NaiveDate::from_ymd_opt(2023, 7, 16).unwrap();
        assert_eq!(
            week_window(sunday).0,
            NaiveDate::from_ymd_opt(2023, 7, 10).unwrap()
        );
    }

    #[test]
    fn total_row_is_first_marker_occurrence() {
        let mut grid = grid_with_header(8, 20);
        set_text(&mut grid, 5, 0, "Итого");
        set_text(&mut grid, 7, 0, "Итого");

        let sheet = sheet_from(grid);
        assert_eq!(sheet.total_row().unwrap(), 5);
    }

    #[test]
    fn sheet_without_total_row_is_rejected() {
        let sheet = sheet_from(grid_with_header(6, 20));
        assert!(matches!(
            sheet.total_row(),
            Err(Error::NoTotalRowInSheet { .. })
        ));
    }

    #[test]
    fn percent_is_stored_multiplied_by_hundred() {
        let mut grid = grid_with_header(3, 20);
        set_number(&mut grid, 2, 5, 0.25);

        let sheet = sheet_from(grid);
        assert_eq!(sheet.percent(2, 5), Some(25.0));
        assert_eq!(sheet.percent(2, 6), None);
        // доля вне 0..1 записывается как есть
        let mut grid = grid_with_header(3, 20);
        set_number(&mut grid, 2, 5, 1.5);
        let sheet = sheet_from(grid);
        assert_eq!(sheet.percent(2, 5), Some(150.0));
    }
}
