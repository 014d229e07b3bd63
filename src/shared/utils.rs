use calamine::DataType;
use chrono::NaiveDate;

pub fn get_xl_column_letter(zero_based_column: u16) -> String {
    let integer = zero_based_column / 26;
    let remainder = (zero_based_column % 26) as u8;
    let ch = char::from(remainder + 65).to_ascii_uppercase().to_string();

    if integer == 0 {
        return ch;
    }

    get_xl_column_letter(integer - 1) + &ch
}

// Адрес ячейки в нотации Excel, например (0, 17) -> "R1"
pub fn get_xl_cell_address(zero_based_row: usize, zero_based_column: usize) -> String {
    format!(
        "{}{}",
        get_xl_column_letter(zero_based_column as u16),
        zero_based_row + 1
    )
}

// Датой признается только ячейка с датным форматом Excel: обычное число
// вроде 45121.0 без датного формата датой не считается
pub fn get_date(cell: &DataType) -> Option<NaiveDate> {
    match cell {
        DataType::DateTime(_) => cell.as_datetime().map(|dt| dt.date()),
        _ => None,
    }
}

pub fn get_number(cell: &DataType) -> Option<f64> {
    match cell {
        DataType::Float(x) => Some(*x),
        DataType::Int(x) => Some(*x as f64),
        _ => None,
    }
}

pub fn get_text(cell: &DataType) -> Option<String> {
    cell.get_string().map(|x| x.trim().replace("\r\n", ""))
}
