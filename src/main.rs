use console::Term;
use etalon_etl::config::DbConfig;
use etalon_etl::errors::Error;
use etalon_etl::extract::{Book, ReportFiles, Sheet};
use etalon_etl::load::Db;
use etalon_etl::transform::{self, CollectStats};
use etalon_etl::ui;
use std::path::Path;

// Итоги запуска по всем собранным файлам
#[derive(Default)]
struct RunStats {
    files_collected: usize,
    files_skipped: usize,
    datasets_written: usize,
    rows_skipped_without_parent: usize,
}

fn main() {
    let path = ui::session();

    match run(&path) {
        Ok(stats) => {
            let _ = Term::stdout().clear_screen();
            println!(
                "Успешно выполнено.\nСобрано файлов: {}.\nПропущено файлов: {}.\nЗаписано датасетов: {}.",
                stats.files_collected, stats.files_skipped, stats.datasets_written
            );
            if stats.rows_skipped_without_parent > 0 {
                println!(
                    "Строк организаций без владеющего проекта: {}.",
                    stats.rows_skipped_without_parent
                );
            }
        }
        Err(err) => {
            let _ = Term::stdout().clear_screen();
            println!("\nВозникла ошибка. \n{}", err);
        }
    }

    ui::wait_before_exit();
}

fn run(path: &Path) -> Result<RunStats, Error> {
    let db_config = DbConfig::from_env()?;
    let mut db = Db::connect(&db_config)?;
    db.init_schema()?;

    let files = ReportFiles::new(path)?;
    if files.file_count_excluded > 0 {
        println!(
            "Файлов исключено по символу «@»: {}",
            files.file_count_excluded
        );
    }

    let mut stats = RunStats::default();
    for file_path in &files.paths {
        match collect_file(file_path, &mut db) {
            Ok(file_stats) => {
                stats.files_collected += 1;
                stats.datasets_written += file_stats.datasets_written;
                stats.rows_skipped_without_parent += file_stats.rows_skipped_without_parent;
                println!(
                    "Собрано датасетов: {} - {}",
                    file_stats.datasets_written,
                    file_path.display()
                );
            }
            // ошибка уровня файла не прерывает сбор остальных файлов
            Err(err) if err.is_file_scoped() => {
                stats.files_skipped += 1;
                println!("\nФайл пропущен.\n{}\n", err);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(stats)
}

fn collect_file(path: &Path, db: &mut Db) -> Result<CollectStats, Error> {
    let mut book = Book::new(path.to_path_buf())?;
    let sheet = Sheet::new(&mut book)?;
    transform::collect(&sheet, db)
}
