use crate::errors::Error;
use std::env;

// Раскладка листа «формы эталон» (нумерация строк и столбцов с нуля):
// строка 0 - шапка, отчетная дата в ячейке "R1" (столбец 17);
// строка 1 - подписи годов: текущий год в столбце 3, блоки прошлых годов
// начиная со столбца 10, каждый блок занимает 5 столбцов;
// данные со строки 2: столбец "A" - иерархический код, "B" - наименование,
// "C" - дата строки. Последние два столбца листа - задержки за все время.
pub const REFERENCE_DATE_ROW: usize = 0;
pub const REFERENCE_DATE_COL: usize = 17;
pub const YEAR_LABELS_ROW: usize = 1;
pub const CURRENT_YEAR_COL: usize = 3;
pub const PREV_DATASETS_START_COL: usize = 10;
pub const PREV_DATASET_WIDTH: usize = 5;
pub const DATA_START_ROW: usize = 2;
pub const CODE_COL: usize = 0;
pub const NAME_COL: usize = 1;
pub const ROW_DATE_COL: usize = 2;

// Столбцы показателей текущего года
pub const YEAR_PLAN_COL: usize = 3;
pub const YEAR_ACHIEVED_CNT_COL: usize = 4;
pub const YEAR_ACHIEVED_PERCENT_COL: usize = 5;
pub const YEAR_LEFT_CNT_COL: usize = 6;
pub const YEAR_LEFT_PERCENT_COL: usize = 7;
pub const YEAR_DELAYED_CNT_COL: usize = 8;
pub const YEAR_DELAYED_PERCENT_COL: usize = 9;

// Строка "Итого" отделяет данные проектов от сводных данных листа
pub const TOTAL_ROW_MARKER: &str = "Итого";

pub const XL_FILE_EXTENSION: &str = ".xlsx";
pub const REPORT_NAME_PREFIX: &str = "форма эталон";

pub const PROJECTS_TABLE: &str = "federal_projects";
pub const ORGANIZATIONS_TABLE: &str = "federal_organizations";
pub const DATASETS_TABLE: &str = "federal_projects_delayed";

pub struct DbConfig {
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, Error> {
        // файл ".env" не обязателен: переменные могут быть заданы в самом окружении
        dotenvy::dotenv().ok();

        let port_var = read_env_var("PORT")?;
        let port = port_var.parse::<u16>().map_err(|_| Error::EnvVarInvalid {
            var_name: "PORT".to_string(),
            value: port_var,
        })?;

        Ok(Self {
            dbname: read_env_var("POSTGRES_DB")?,
            user: read_env_var("POSTGRES_USER")?,
            password: read_env_var("POSTGRES_PASSWORD")?,
            host: read_env_var("HOST")?,
            port,
        })
    }
}

fn read_env_var(var_name: &str) -> Result<String, Error> {
    env::var(var_name).map_err(|_| Error::EnvVarMissing {
        var_name: var_name.to_string(),
    })
}
