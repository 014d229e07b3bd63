use super::store::{DatasetStore, IdentityKind, IdentityStore};
use crate::config::{DbConfig, DATASETS_TABLE, ORGANIZATIONS_TABLE, PROJECTS_TABLE};
use crate::errors::Error;
use crate::transform::Dataset;
use postgres::{Client, Config, NoTls};

// Подключение к PostgreSQL и реализация обоих хранилищ поверх него
pub struct Db {
    client: Client,
}

impl Db {
    pub fn connect(config: &DbConfig) -> Result<Db, Error> {
        let client = Config::new()
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&config.user)
            .password(&config.password)
            .connect(NoTls)
            .map_err(|err| Error::DbConnection { err })?;

        Ok(Db { client })
    }

    // Таблицы создаются при первом запуске, дальше запросы их не трогают
    pub fn init_schema(&mut self) -> Result<(), Error> {
        let ddl = format!(
            r#"
CREATE TABLE IF NOT EXISTS {PROJECTS_TABLE} (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS {ORGANIZATIONS_TABLE} (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS {DATASETS_TABLE} (
    id BIGSERIAL PRIMARY KEY,
    federal_prj_id BIGINT NOT NULL,
    federal_org_id BIGINT,
    prj_date DATE NOT NULL,
    year_no INTEGER NOT NULL,
    year_plan DOUBLE PRECISION,
    year_achieved_cnt DOUBLE PRECISION,
    year_achieved_percent DOUBLE PRECISION,
    year_left_cnt DOUBLE PRECISION,
    year_left_percent DOUBLE PRECISION,
    year_delayed_cnt DOUBLE PRECISION,
    year_delayed_percent DOUBLE PRECISION,
    total_delayed_cnt DOUBLE PRECISION,
    total_delayed_percent DOUBLE PRECISION,
    created_from DATE NOT NULL,
    created_to DATE NOT NULL,
    relevance_dttm DATE NOT NULL
);
"#
        );

        self.client
            .batch_execute(&ddl)
            .map_err(|err| Error::DbQuery { err })
    }

    fn find_id(&mut self, table: &str, name: &str) -> Result<Option<i64>, Error> {
        let sql = format!("SELECT id FROM {table} WHERE name = $1 ORDER BY id LIMIT 1");
        let row = self
            .client
            .query_opt(&sql, &[&name])
            .map_err(|err| Error::DbQuery { err })?;

        Ok(row.map(|row| row.get(0)))
    }
}

impl IdentityStore for Db {
    fn exists(&mut self, kind: IdentityKind, name: &str) -> Result<bool, Error> {
        let sql = format!("SELECT 1 FROM {} WHERE name = $1 LIMIT 1", kind.table_name());
        let row = self
            .client
            .query_opt(&sql, &[&name])
            .map_err(|err| Error::DbQuery { err })?;

        Ok(row.is_some())
    }

    fn create(&mut self, kind: IdentityKind, name: &str) -> Result<i64, Error> {
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id",
            kind.table_name()
        );
        let row = self
            .client
            .query_one(&sql, &[&name])
            .map_err(|err| Error::DbQuery { err })?;

        Ok(row.get(0))
    }

    fn find_project_id(&mut self, name: &str) -> Result<Option<i64>, Error> {
        self.find_id(PROJECTS_TABLE, name)
    }

    fn find_organization_id(&mut self, name: &str) -> Result<Option<i64>, Error> {
        self.find_id(ORGANIZATIONS_TABLE, name)
    }
}

impl DatasetStore for Db {
    fn insert_dataset(&mut self, dataset: &Dataset) -> Result<(), Error> {
        let sql = format!(
            r#"
INSERT INTO {DATASETS_TABLE} (
    federal_prj_id, federal_org_id, prj_date, year_no,
    year_plan, year_achieved_cnt, year_achieved_percent,
    year_left_cnt, year_left_percent,
    year_delayed_cnt, year_delayed_percent,
    total_delayed_cnt, total_delayed_percent,
    created_from, created_to, relevance_dttm
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
"#
        );

        self.client
            .execute(
                &sql,
                &[
                    &dataset.federal_prj_id,
                    &dataset.federal_org_id,
                    &dataset.prj_date,
                    &dataset.year_no,
                    &dataset.year_plan,
                    &dataset.year_achieved_cnt,
                    &dataset.year_achieved_percent,
                    &dataset.year_left_cnt,
                    &dataset.year_left_percent,
                    &dataset.year_delayed_cnt,
                    &dataset.year_delayed_percent,
                    &dataset.total_delayed_cnt,
                    &dataset.total_delayed_percent,
                    &dataset.created_from,
                    &dataset.created_to,
                    &dataset.relevance_dttm,
                ],
            )
            .map_err(|err| Error::DbQuery { err })?;

        Ok(())
    }
}
