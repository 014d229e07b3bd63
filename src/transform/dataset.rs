use crate::config::{
    YEAR_ACHIEVED_CNT_COL, YEAR_ACHIEVED_PERCENT_COL, YEAR_DELAYED_CNT_COL,
    YEAR_DELAYED_PERCENT_COL, YEAR_LEFT_CNT_COL, YEAR_LEFT_PERCENT_COL, YEAR_PLAN_COL,
};
use crate::extract::Sheet;
use chrono::NaiveDate;

// Одна запись показателей за один год, будущая строка таблицы
// federal_projects_delayed. Поля "осталось" заполняются только для текущего
// года: в блоках прошлых годов таких столбцов нет
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub federal_prj_id: i64,
    pub federal_org_id: Option<i64>,
    pub prj_date: NaiveDate,
    pub year_no: i32,
    pub year_plan: Option<f64>,
    pub year_achieved_cnt: Option<f64>,
    pub year_achieved_percent: Option<f64>,
    pub year_left_cnt: Option<f64>,
    pub year_left_percent: Option<f64>,
    pub year_delayed_cnt: Option<f64>,
    pub year_delayed_percent: Option<f64>,
    pub total_delayed_cnt: Option<f64>,
    pub total_delayed_percent: Option<f64>,
    pub created_from: NaiveDate,
    pub created_to: NaiveDate,
    pub relevance_dttm: NaiveDate,
}

// Идентификаторы из базы, к которым относятся записи одной строки листа
#[derive(Debug, Clone, Copy)]
pub struct RowIdentity {
    pub federal_prj_id: i64,
    pub federal_org_id: Option<i64>,
}

// Из одной подходящей строки извлекается 1 + N записей: текущий год и по
// одной записи на каждый блок прошлого года. Задержки за все время всегда
// читаются из двух последних столбцов листа
pub fn build_datasets(sheet: &Sheet, row: usize, identity: RowIdentity) -> Vec<Dataset> {
    let total_delayed_cnt_col = sheet.width() - 2;
    let total_delayed_percent_col = sheet.width() - 1;

    let mut datasets = Vec::with_capacity(1 + sheet.prev_datasets.len());

    datasets.push(Dataset {
        federal_prj_id: identity.federal_prj_id,
        federal_org_id: identity.federal_org_id,
        prj_date: sheet.reference_date,
        year_no: sheet.current_year_no,
        year_plan: sheet.number(row, YEAR_PLAN_COL),
        year_achieved_cnt: sheet.number(row, YEAR_ACHIEVED_CNT_COL),
        year_achieved_percent: sheet.percent(row, YEAR_ACHIEVED_PERCENT_COL),
        year_left_cnt: sheet.number(row, YEAR_LEFT_CNT_COL),
        year_left_percent: sheet.percent(row, YEAR_LEFT_PERCENT_COL),
        year_delayed_cnt: sheet.number(row, YEAR_DELAYED_CNT_COL),
        year_delayed_percent: sheet.percent(row, YEAR_DELAYED_PERCENT_COL),
        total_delayed_cnt: sheet.number(row, total_delayed_cnt_col),
        total_delayed_percent: sheet.percent(row, total_delayed_percent_col),
        created_from: sheet.week_start,
        created_to: sheet.week_end,
        relevance_dttm: sheet.reference_date,
    });

    for prev in &sheet.prev_datasets {
        datasets.push(Dataset {
            federal_prj_id: identity.federal_prj_id,
            federal_org_id: identity.federal_org_id,
            prj_date: sheet.reference_date,
            year_no: prev.year_no,
            year_plan: sheet.number(row, prev.start_col),
            year_achieved_cnt: sheet.number(row, prev.start_col + 1),
            year_achieved_percent: sheet.percent(row, prev.start_col + 2),
            year_left_cnt: None,
            year_left_percent: None,
            year_delayed_cnt: sheet.number(row, prev.start_col + 3),
            year_delayed_percent: sheet.percent(row, prev.start_col + 4),
            total_delayed_cnt: sheet.number(row, total_delayed_cnt_col),
            total_delayed_percent: sheet.percent(row, total_delayed_percent_col),
            created_from: sheet.week_start,
            created_to: sheet.week_end,
            relevance_dttm: sheet.reference_date,
        });
    }

    datasets
}

#[cfg(test)]
mod tests {
    use super::{build_datasets, RowIdentity};
    use crate::extract::test_fixtures::*;
    use chrono::NaiveDate;

    // строка с показателями текущего года (столбцы 3..9), одним блоком
    // прошлого года (столбцы 10..14) и задержками за все время (16, 17)
    fn one_block_grid() -> calamine::Range<calamine::DataType> {
        let mut grid = grid_with_header(3, 18);
        set_text(&mut grid, 1, 10, "2022 год");

        set_date(&mut grid, 2, 2);
        set_number(&mut grid, 2, 3, 5.0);
        set_number(&mut grid, 2, 4, 3.0);
        set_number(&mut grid, 2, 5, 0.5);
        set_number(&mut grid, 2, 6, 2.0);
        set_number(&mut grid, 2, 7, 0.25);
        set_number(&mut grid, 2, 8, 1.0);
        set_number(&mut grid, 2, 9, 0.75);

        set_number(&mut grid, 2, 10, 4.0);
        set_number(&mut grid, 2, 11, 2.0);
        set_number(&mut grid, 2, 12, 0.5);
        set_number(&mut grid, 2, 13, 1.0);
        set_number(&mut grid, 2, 14, 0.25);

        set_number(&mut grid, 2, 16, 7.0);
        set_number(&mut grid, 2, 17, 0.125);
        grid
    }

    #[test]
    fn row_with_one_prev_block_yields_two_records() {
        let sheet = sheet_from(one_block_grid());
        let identity = RowIdentity {
            federal_prj_id: 9,
            federal_org_id: Some(4),
        };

        let datasets = build_datasets(&sheet, 2, identity);
        assert_eq!(datasets.len(), 2);

        let current = &datasets[0];
        assert_eq!(current.federal_prj_id, 9);
        assert_eq!(current.federal_org_id, Some(4));
        assert_eq!(current.year_no, 2023);
        assert_eq!(current.year_plan, Some(5.0));
        assert_eq!(current.year_achieved_cnt, Some(3.0));
        assert_eq!(current.year_achieved_percent, Some(50.0));
        assert_eq!(current.year_left_cnt, Some(2.0));
        assert_eq!(current.year_left_percent, Some(25.0));
        assert_eq!(current.year_delayed_cnt, Some(1.0));
        assert_eq!(current.year_delayed_percent, Some(75.0));
        assert_eq!(current.total_delayed_cnt, Some(7.0));
        assert_eq!(current.total_delayed_percent, Some(12.5));

        let prev = &datasets[1];
        assert_eq!(prev.year_no, 2022);
        assert_eq!(prev.year_plan, Some(4.0));
        assert_eq!(prev.year_achieved_cnt, Some(2.0));
        assert_eq!(prev.year_achieved_percent, Some(50.0));
        // в блоках прошлых годов нет столбцов "осталось"
        assert_eq!(prev.year_left_cnt, None);
        assert_eq!(prev.year_left_percent, None);
        assert_eq!(prev.year_delayed_cnt, Some(1.0));
        assert_eq!(prev.year_delayed_percent, Some(25.0));
        // задержки за все время одинаковы во всех записях строки
        assert_eq!(prev.total_delayed_cnt, Some(7.0));
        assert_eq!(prev.total_delayed_percent, Some(12.5));
    }

    #[test]
    fn dates_come_from_header_and_file_name() {
        let sheet = sheet_from(one_block_grid());
        let identity = RowIdentity {
            federal_prj_id: 1,
            federal_org_id: None,
        };

        let datasets = build_datasets(&sheet, 2, identity);
        for dataset in &datasets {
            assert_eq!(
                dataset.prj_date,
                NaiveDate::from_ymd_opt(2023, 7, 14).unwrap()
            );
            assert_eq!(
                dataset.relevance_dttm,
                NaiveDate::from_ymd_opt(2023, 7, 14).unwrap()
            );
            assert_eq!(
                dataset.created_from,
                NaiveDate::from_ymd_opt(2023, 7, 10).unwrap()
            );
            assert_eq!(
                dataset.created_to,
                NaiveDate::from_ymd_opt(2023, 7, 16).unwrap()
            );
        }
    }

    #[test]
    fn missing_numeric_cells_stay_empty() {
        let mut grid = grid_with_header(3, 18);
        set_date(&mut grid, 2, 2);
        // заполнен только план
        set_number(&mut grid, 2, 3, 5.0);

        let sheet = sheet_from(grid);
        let datasets = build_datasets(
            &sheet,
            2,
            RowIdentity {
                federal_prj_id: 1,
                federal_org_id: None,
            },
        );

        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].year_plan, Some(5.0));
        assert_eq!(datasets[0].year_achieved_cnt, None);
        assert_eq!(datasets[0].year_achieved_percent, None);
        assert_eq!(datasets[0].total_delayed_cnt, None);
    }
}
