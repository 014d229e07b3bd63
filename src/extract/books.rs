use crate::config::{REPORT_NAME_PREFIX, XL_FILE_EXTENSION};
use crate::errors::Error;
use crate::ui;
use calamine::Xlsx;
use chrono::NaiveDate;
use regex::Regex;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static REPORT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("валидное регулярное выражение даты"));

// Дата в имени файла задает отчетную неделю
pub fn report_date_from_name(file_name: &str) -> Option<NaiveDate> {
    let token = REPORT_DATE_RE.find(file_name)?.as_str();
    NaiveDate::parse_from_str(token, "%d.%m.%Y").ok()
}

fn is_report_name(file_name: &str) -> bool {
    let lowercase = file_name.to_lowercase();
    lowercase.starts_with(REPORT_NAME_PREFIX)
        && lowercase.ends_with(XL_FILE_EXTENSION)
        && REPORT_DATE_RE.is_match(file_name)
}

pub struct Book {
    pub path: PathBuf,
    pub data: Xlsx<BufReader<File>>,
}

impl Book {
    pub fn new(path: PathBuf) -> Result<Self, Error> {
        let data = calamine::open_workbook(&path).map_err(|err| Error::CalamineFileOpen {
            file_path: path.clone(),
            err,
        })?;
        Ok(Book { path, data })
    }
}

pub struct ReportFiles {
    pub paths: Vec<PathBuf>,
    pub file_count_excluded: usize,
}

impl ReportFiles {
    pub fn new(path: &Path) -> Result<Self, Error> {
        let files: Vec<_> = WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok()) //будет молча пропускать каталоги, на доступ к которым у владельца запущенного процесса нет разрешения
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|s| !s.starts_with('~') && is_report_name(s))
                    .unwrap_or(false)
            })
            .collect();

        let mut paths = vec![];
        let mut file_count_excluded = 0;
        let mut file_print_counter = 0;

        for entry in files {
            let file_checked_path = entry
                .path()
                .strip_prefix(path)
                .map_err(|err| Error::InternalLogic {
                    tech_descr: format!(
                        r#"Не удалось выполнить проверку на наличие символа "@" в пути для файла:
{}"#,
                        entry.path().to_string_lossy()
                    ),
                    err: Some(Box::new(err)),
                })?
                .to_string_lossy()
                .to_string();

            if file_checked_path.contains('@') {
                file_count_excluded += 1;
                continue;
            }

            if paths.is_empty() {
                ui::display_formatted_text("\nОтобраны файлы:", None);
            }

            file_print_counter += 1;
            let msg = format!("{}: {}", file_print_counter, entry.path().to_string_lossy());
            ui::display_formatted_text(&msg, None);

            paths.push(entry.into_path());
        }

        if paths.is_empty() {
            return Err(Error::NoFilesInSpecifiedPath(path.to_path_buf()));
        }

        Ok(Self {
            paths,
            file_count_excluded,
        })
    }
}
