use crate::config::{
    REFERENCE_DATE_COL, REFERENCE_DATE_ROW, REPORT_NAME_PREFIX, XL_FILE_EXTENSION,
};
use crate::shared::utils::get_xl_cell_address;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    InternalLogic {
        tech_descr: String,
        err: Option<Box<dyn std::error::Error>>,
    },
    NoFilesInSpecifiedPath(PathBuf),
    CalamineFileOpen {
        file_path: PathBuf,
        err: calamine::XlsxError,
    },
    CalamineSheetOfTheBookIsUndetectable {
        file_path: PathBuf,
    },
    CalamineSheetOfTheBookIsUnreadable {
        file_path: PathBuf,
        err: calamine::XlsxError,
    },
    EmptySheetRange {
        file_path: PathBuf,
    },
    ShiftedSheetRange {
        file_path: PathBuf,
        range_start: (u32, u32),
    },
    NoReferenceDateInHeader {
        file_path: PathBuf,
    },
    YearLabelIsUnreadable {
        file_path: PathBuf,
        cell_address: String,
    },
    NoTotalRowInSheet {
        file_path: PathBuf,
    },
    NoReportDateInFileName {
        file_path: PathBuf,
    },
    EnvVarMissing {
        var_name: String,
    },
    EnvVarInvalid {
        var_name: String,
        value: String,
    },
    DbConnection {
        err: postgres::Error,
    },
    DbQuery {
        err: postgres::Error,
    },
}

impl Error {
    // Ошибки уровня файла: файл пропускается, сбор остальных продолжается.
    // Все прочие ошибки прерывают запуск целиком.
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            Self::CalamineFileOpen { .. }
                | Self::CalamineSheetOfTheBookIsUndetectable { .. }
                | Self::CalamineSheetOfTheBookIsUnreadable { .. }
                | Self::EmptySheetRange { .. }
                | Self::ShiftedSheetRange { .. }
                | Self::NoReferenceDateInHeader { .. }
                | Self::YearLabelIsUnreadable { .. }
                | Self::NoTotalRowInSheet { .. }
                | Self::NoReportDateInFileName { .. }
        )
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InternalLogic { tech_descr, err } => {
                let base_msg = format!(
                    "Во внутренней логике программы произошла ошибка.
                    {tech_descr}"
                );

                let footer_msg = match err {
                    Some(err) => format!("\n\nПодробности об ошибке:\n{}", err),
                    None => "".to_string(),
                };

                let full_msg = format!("{base_msg}{footer_msg}");

                write!(f, "{full_msg}")
            }
            Self::NoFilesInSpecifiedPath(path) => {
                let path = path.display();
                let msg = format!(
                    r#"Нет файлов «формы эталон» по указанному пути:
{path}

Собираются только файлы с расширением "{XL_FILE_EXTENSION}", имя которых
начинается с "{REPORT_NAME_PREFIX}" и содержит дату вида ДД.ММ.ГГГГ."#
                );
                write!(f, "{msg}")
            }
            Self::CalamineFileOpen { file_path, err } => {
                let base_msg = "Не удалось открыть файл Excel.";
                let footer_msg = format!("Подробности об ошибке:\n{err}");
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{footer_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::CalamineSheetOfTheBookIsUndetectable { file_path } => {
                let base_msg = "Файл не содержит ни одного листа Excel, собирать нечего.";
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::CalamineSheetOfTheBookIsUnreadable { file_path, err } => {
                let base_msg = "Возникла проблема с чтением первого листа книги Excel.";
                let footer_msg = format!("Подробности об ошибке:\n{err}");
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{footer_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::EmptySheetRange { file_path } => {
                let base_msg = "Первый лист файла не содержит данных (пуст).";
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::ShiftedSheetRange {
                file_path,
                range_start,
            } => {
                let base_msg = format!(
                    r#"Данные первого листа начинаются не с ячейки "A1"
(обнаружен отступ: {} стр. и {} стб.).
«Форма эталон» ожидается с шапкой в двух первых строках листа и данными
с третьей строки, лист со смещенной раскладкой собран быть не может."#,
                    range_start.0, range_start.1
                );
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::NoReferenceDateInHeader { file_path } => {
                let r1_address = get_xl_cell_address(REFERENCE_DATE_ROW, REFERENCE_DATE_COL);
                let base_msg = format!(
                    r#"В ячейке "{r1_address}" шапки не обнаружена отчетная дата.
Ожидается ячейка с датой в формате даты Excel: по отчетной дате отбираются
строки для сбора (собираются только строки, чья дата в столбце "C"
совпадает с отчетной)."#
                );
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::YearLabelIsUnreadable {
                file_path,
                cell_address,
            } => {
                let base_msg = format!(
                    r#"Не удалось прочитать год в подписи столбцов с показателями.
В ячейке "{cell_address}" ожидается текст, начинающийся с четырех цифр года,
например "2023 год"."#
                );
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::NoTotalRowInSheet { file_path } => {
                let base_msg = r#"На листе не обнаружена строка "Итого" в столбце "A".
Строка "Итого" отделяет данные проектов и организаций от сводных данных,
без нее лист собран быть не может."#;
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::NoReportDateInFileName { file_path } => {
                let base_msg = r#"Имя файла не содержит дату вида ДД.ММ.ГГГГ.
По дате из имени файла определяется отчетная неделя (понедельник..воскресенье),
без нее файл собран быть не может."#;
                let path_msg = format!("Файл, вызывающий ошибку:\n{}", file_path.display());
                let full_msg = format!("{base_msg}\n\n{path_msg}");
                write!(f, "{full_msg}")
            }
            Self::EnvVarMissing { var_name } => {
                let msg = format!(
                    r#"Не задана переменная окружения "{var_name}".
Для подключения к базе данных задайте переменные POSTGRES_DB, POSTGRES_USER,
POSTGRES_PASSWORD, HOST и PORT (можно через файл ".env" рядом с программой)."#
                );
                write!(f, "{msg}")
            }
            Self::EnvVarInvalid { var_name, value } => {
                let msg = format!(
                    r#"Переменная окружения "{var_name}" имеет недопустимое значение "{value}"."#
                );
                write!(f, "{msg}")
            }
            Self::DbConnection { err } => {
                let base_msg = r#"Не удалось подключиться к базе данных PostgreSQL.
Проверьте, что сервер запущен и доступен, а переменные окружения POSTGRES_DB,
POSTGRES_USER, POSTGRES_PASSWORD, HOST и PORT заданы верно."#;
                let footer_msg = format!("Подробности об ошибке:\n{err}");
                let full_msg = format!("{base_msg}\n\n{footer_msg}");
                write!(f, "{full_msg}")
            }
            Self::DbQuery { err } => {
                let base_msg = r#"Возникла ошибка при выполнении запроса к базе данных PostgreSQL.
Сбор прерван, часть данных текущего запуска могла быть уже записана."#;
                let footer_msg = format!("Подробности об ошибке:\n{err}");
                let full_msg = format!("{base_msg}\n\n{footer_msg}");
                write!(f, "{full_msg}")
            }
        }
    }
}
