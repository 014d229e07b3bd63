//! Сборщик данных из еженедельных отчетов «форма эталон» в PostgreSQL.
//!
//! Файлы Excel находятся рекурсивным обходом указанной папки, из каждого
//! листа собираются показатели проектов и организаций по годам и
//! записываются в базу данных.

pub mod config;
pub mod errors;
pub mod extract;
pub mod load;
pub mod shared;
pub mod transform;
pub mod ui;
