use super::classify::{classify_code, RowKind};
use crate::extract::Sheet;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("валидное регулярное выражение номера проекта"));

// Ищет проект, которому принадлежит строка организации: просмотр строк вверх
// от соседней до самой первой, без рекурсии. Подходит первая строка, чья дата
// совпадает с отчетной и чей код имеет глубину проекта. Возвращается первая
// последовательность цифр из наименования найденной строки - номер проекта
// в самой форме. Если такой строки нет, организация считается ничьей
pub fn find_parent_project_code(sheet: &Sheet, row: usize) -> Option<String> {
    for prev_row in (0..row).rev() {
        if !sheet.is_row_dated(prev_row) {
            continue;
        }
        if classify_code(sheet.code_text(prev_row).as_deref()) != RowKind::Project {
            continue;
        }

        // строка проекта найдена: ее номер либо читается из наименования,
        // либо организация остается ничьей
        return sheet
            .name_text(prev_row)
            .and_then(|name| LEADING_DIGITS_RE.find(&name).map(|m| m.as_str().to_string()));
    }

    None
}
