use crate::config::{ORGANIZATIONS_TABLE, PROJECTS_TABLE};
use crate::errors::Error;
use crate::transform::Dataset;

// Справочник, к которому относится операция
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    Project,
    Organization,
}

impl IdentityKind {
    pub fn table_name(self) -> &'static str {
        match self {
            IdentityKind::Project => PROJECTS_TABLE,
            IdentityKind::Organization => ORGANIZATIONS_TABLE,
        }
    }
}

// Справочники проектов и организаций: проверка наличия по имени,
// создание и обратный поиск идентификатора
pub trait IdentityStore {
    fn exists(&mut self, kind: IdentityKind, name: &str) -> Result<bool, Error>;
    fn create(&mut self, kind: IdentityKind, name: &str) -> Result<i64, Error>;
    fn find_project_id(&mut self, name: &str) -> Result<Option<i64>, Error>;
    fn find_organization_id(&mut self, name: &str) -> Result<Option<i64>, Error>;
}

// Приемник готовых записей показателей
pub trait DatasetStore {
    fn insert_dataset(&mut self, dataset: &Dataset) -> Result<(), Error>;
}
