use crate::config::TOTAL_ROW_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Project,
    Organization,
    Summary,
    Unclassified,
}

// Глубина кода в столбце "A" определяется числом точек: "1." - проект,
// "1.2." - организация. Все прочее в сбор не попадает
pub fn classify_code(code: Option<&str>) -> RowKind {
    let Some(code) = code else {
        return RowKind::Unclassified;
    };
    let code = code.trim();

    if code == TOTAL_ROW_MARKER {
        return RowKind::Summary;
    }

    if !is_numbering_code(code) {
        return RowKind::Unclassified;
    }

    match code.matches('.').count() {
        1 => RowKind::Project,
        2 => RowKind::Organization,
        _ => RowKind::Unclassified,
    }
}

// Иерархический код состоит только из цифр и точек и содержит хотя бы одну цифру
fn is_numbering_code(code: &str) -> bool {
    code.chars().any(|ch| ch.is_ascii_digit())
        && code.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

#[cfg(test)]
mod tests {
    use super::{classify_code, RowKind};

    #[test]
    fn depth_one_is_project() {
        assert_eq!(classify_code(Some("1.")), RowKind::Project);
        assert_eq!(classify_code(Some("12.")), RowKind::Project);
        // глубина определяется только числом точек: "1.2" без хвостовой
        // точки содержит одну точку и потому читается как код проекта
        assert_eq!(classify_code(Some("1.2")), RowKind::Project);
    }

    #[test]
    fn depth_two_is_organization() {
        assert_eq!(classify_code(Some("1.2.")), RowKind::Organization);
        assert_eq!(classify_code(Some("10.11.")), RowKind::Organization);
    }

    #[test]
    fn total_marker_is_summary() {
        assert_eq!(classify_code(Some("Итого")), RowKind::Summary);
        assert_eq!(classify_code(Some(" Итого ")), RowKind::Summary);
    }

    #[test]
    fn everything_else_is_unclassified() {
        assert_eq!(classify_code(None), RowKind::Unclassified);
        assert_eq!(classify_code(Some("")), RowKind::Unclassified);
        // без точек
        assert_eq!(classify_code(Some("1")), RowKind::Unclassified);
        // слишком глубокий код
        assert_eq!(classify_code(Some("1.2.3.")), RowKind::Unclassified);
        // не цифровой код
        assert_eq!(classify_code(Some("п.1.")), RowKind::Unclassified);
        assert_eq!(classify_code(Some("...")), RowKind::Unclassified);
    }
}
