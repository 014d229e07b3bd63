use super::classify::{classify_code, RowKind};
use super::dataset::{build_datasets, RowIdentity};
use super::resolve::find_parent_project_code;
use crate::config::{DATA_START_ROW, TOTAL_ROW_MARKER};
use crate::errors::Error;
use crate::extract::Sheet;
use crate::load::{DatasetStore, IdentityKind, IdentityStore};
use crate::ui;

// Итоги сбора одного листа
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectStats {
    pub datasets_written: usize,
    pub rows_skipped_without_parent: usize,
}

// Сбор листа в два прохода: строки проектов и организаций до строки
// "Итого", затем сводные строки от нее и до конца листа. В обоих проходах
// участвуют только строки с отчетной датой
pub fn collect<S>(sheet: &Sheet, store: &mut S) -> Result<CollectStats, Error>
where
    S: IdentityStore + DatasetStore,
{
    let total_row = sheet.total_row()?;
    let mut stats = CollectStats::default();

    // проект, которому достаются строки организаций ниже него
    let mut current_prj_id: Option<i64> = None;

    for row in DATA_START_ROW..total_row {
        if !sheet.is_row_dated(row) {
            continue;
        }

        match classify_code(sheet.code_text(row).as_deref()) {
            RowKind::Project => {
                let Some(name) = sheet.name_text(row) else {
                    warn_skipped_row(sheet, row, "у строки проекта нет наименования");
                    continue;
                };
                let prj_id = ensure_identity(store, IdentityKind::Project, &name)?;
                current_prj_id = Some(prj_id);
                let identity = RowIdentity {
                    federal_prj_id: prj_id,
                    federal_org_id: None,
                };
                insert_datasets(sheet, row, identity, store, &mut stats)?;
            }
            RowKind::Organization => {
                // организация без владеющего проекта выше не может быть
                // отнесена ни к какому проекту и в сбор не попадает
                if find_parent_project_code(sheet, row).is_none() {
                    warn_skipped_row(sheet, row, "выше не нашлось строки владеющего проекта");
                    stats.rows_skipped_without_parent += 1;
                    continue;
                }
                let Some(prj_id) = current_prj_id else {
                    warn_skipped_row(sheet, row, "выше не нашлось строки владеющего проекта");
                    stats.rows_skipped_without_parent += 1;
                    continue;
                };
                let Some(name) = sheet.name_text(row) else {
                    warn_skipped_row(sheet, row, "у строки организации нет наименования");
                    continue;
                };
                let org_id = ensure_identity(store, IdentityKind::Organization, &name)?;
                let identity = RowIdentity {
                    federal_prj_id: prj_id,
                    federal_org_id: Some(org_id),
                };
                insert_datasets(sheet, row, identity, store, &mut stats)?;
            }
            RowKind::Summary | RowKind::Unclassified => continue,
        }
    }

    // сводные строки относятся к служебному проекту с именем "Итого";
    // запись в справочнике заводится при первой сводной строке, дальше
    // переиспользуется по имени
    let mut summary_prj_id: Option<i64> = None;
    for row in total_row..sheet.height() {
        if !sheet.is_row_dated(row) {
            continue;
        }

        let prj_id = match summary_prj_id {
            Some(id) => id,
            None => {
                let id = ensure_identity(store, IdentityKind::Project, TOTAL_ROW_MARKER)?;
                summary_prj_id = Some(id);
                id
            }
        };
        let identity = RowIdentity {
            federal_prj_id: prj_id,
            federal_org_id: None,
        };
        insert_datasets(sheet, row, identity, store, &mut stats)?;
    }

    Ok(stats)
}

// Идентификатор записи с данным именем; отсутствующая запись создается.
// Повторные встречи имени, в том числе из других файлов запуска, получают
// идентификатор уже существующей записи
fn ensure_identity<S: IdentityStore>(
    store: &mut S,
    kind: IdentityKind,
    name: &str,
) -> Result<i64, Error> {
    if !store.exists(kind, name)? {
        return store.create(kind, name);
    }

    let found = match kind {
        IdentityKind::Project => store.find_project_id(name)?,
        IdentityKind::Organization => store.find_organization_id(name)?,
    };
    found.ok_or_else(|| Error::InternalLogic {
        tech_descr: format!(
            r#"Идентификатор записи "{}" в таблице "{}" не найден сразу после успешной проверки наличия"#,
            name,
            kind.table_name()
        ),
        err: None,
    })
}

fn insert_datasets<S: DatasetStore>(
    sheet: &Sheet,
    row: usize,
    identity: RowIdentity,
    store: &mut S,
    stats: &mut CollectStats,
) -> Result<(), Error> {
    for dataset in build_datasets(sheet, row, identity) {
        store.insert_dataset(&dataset)?;
        stats.datasets_written += 1;
    }
    Ok(())
}

fn warn_skipped_row(sheet: &Sheet, row: usize, reason: &str) {
    let msg = format!(
        "Внимание: пропущена строка {} файла {}: {}",
        row + 1,
        sheet.path.display(),
        reason
    );
    ui::display_formatted_text(&msg, Some(ui::warning_style()));
}
