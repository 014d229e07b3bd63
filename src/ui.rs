use crate::config::{REPORT_NAME_PREFIX, XL_FILE_EXTENSION};
use console::{Style, Term};
use std::io;
use std::path::PathBuf;

pub fn session() -> PathBuf {
    show_help();
    inputting_path()
}

fn inputting_path() -> PathBuf {
    println!("Введите путь к папке с файлами «формы эталон» (Enter - текущая папка):");
    let mut text = String::new();
    io::stdin()
        .read_line(&mut text)
        .expect("Ошибка чтения ввода");

    // filter нужен на случай пути, вставленного вместе с кавычками
    let text = text
        .trim()
        .chars()
        .filter(|ch| *ch != '"')
        .collect::<String>();

    if text.is_empty() {
        return PathBuf::from(".");
    }

    PathBuf::from(text)
}

#[rustfmt::skip]
fn show_help() {
    println!("------------------------------------------------------------------------------------------------------------\n");
    println!("● Используйте CTRL + V, чтобы вставить скопированный путь к папке, из которой необходимо собрать данные;");
    println!("● Программа будет собирать данные из файлов в указанной папке и всех вложенных папках;");
    println!("● Собираются только файлы с расширением «{}», имя которых начинается с", XL_FILE_EXTENSION);
    println!("  «{}» и содержит дату вида ДД.ММ.ГГГГ;", REPORT_NAME_PREFIX);
    println!("● Полезный совет: переименуйте файл Excel, добавив символ «@», и программа не будет собирать его данные.");
    println!("\n------------------------------------------------------------------------------------------------------------\n");
}

pub fn display_formatted_text(text: &str, style: Option<Style>) {
    let msg = match style {
        Some(style) => style.apply_to(text).to_string(),
        None => text.to_string(),
    };
    let _ = Term::stdout().write_line(&msg);
}

pub fn warning_style() -> Style {
    Style::new().yellow()
}

pub fn wait_before_exit() {
    println!("\nДля выхода нажмите Enter.");
    let mut text = String::new();
    let _ = io::stdin().read_line(&mut text);
}
