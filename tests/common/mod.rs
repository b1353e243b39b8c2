#![allow(dead_code)]

use std::collections::HashSet;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use jpapi::EntityConfig;
use jpapi::cache::CachedExecutor;
use jpapi::entities;
use jpapi::routes::{AppState, router};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, JsonValue, Value};
use sea_orm_migration::prelude::*;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-key";

const INTEGER_COLUMNS: &[&str] = &[
    "PeopleID1",
    "PeopleID2",
    "PeopleID3",
    "Population",
    "JPScale",
    "JPScaleCtry",
    "BibleStatus",
    "RegionCode",
    "LRofTheDayMonth",
    "LRofTheDayDay",
    "CntPeoples",
    "CntPeoplesLR",
    "WorldSpeakers",
    "NbrPGIC",
    "NbrPGICLR",
    "NbrLR",
    "NbrCountries",
    "SumContinent",
    "SumContinentLR",
    "SumRegion",
    "SumRegionLR",
    "ProfileID",
    "DisplaySeq",
    "Value",
    "RoundPrecision",
];

/// Every entity table, with nullable columns typed roughly as in production.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateEntityTables)]
    }
}

pub struct CreateEntityTables;

#[async_trait::async_trait]
impl MigrationName for CreateEntityTables {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_entity_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateEntityTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for config in &entities::ALL {
            manager.create_table(entity_table(config)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for config in &entities::ALL {
            manager
                .drop_table(Table::drop().table(Alias::new(config.table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

fn entity_table(config: &EntityConfig) -> TableCreateStatement {
    let mut table = Table::create();
    table.table(Alias::new(config.table)).if_not_exists();
    for column in config.columns {
        let mut def = ColumnDef::new(Alias::new(*column));
        if INTEGER_COLUMNS.contains(column) {
            def.integer();
        } else if column.starts_with("Percent")
            || *column == "Latitude"
            || *column == "Longitude"
            || *column == "LiteracyRate"
        {
            def.double();
        } else {
            def.string();
        }
        def.null();
        table.col(&mut def);
    }
    table.to_owned()
}

async fn insert(
    db: &DatabaseConnection,
    table: &str,
    row: &[(&str, Value)],
) -> Result<(), DbErr> {
    let mut statement = Query::insert();
    statement
        .into_table(Alias::new(table))
        .columns(row.iter().map(|(column, _)| Alias::new(*column)))
        .values_panic(row.iter().map(|(_, value)| value.clone().into()));
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}

fn text(value: &str) -> Value {
    Value::from(value)
}

fn int(value: i32) -> Value {
    Value::from(value)
}

fn null_text() -> Value {
    Value::String(None)
}

/// A small people-group dataset:
///
/// | PeopleID3 | ROG3 | ROG2 | Name    | Population | JPScale | LeastReached |
/// |-----------|------|------|---------|------------|---------|--------------|
/// | 1001      | US   | NAR  | Alpha   | 5000       | 1       | Y            |
/// | 1001      | CA   | NAR  | Alpha   | 2000       | 2       | N            |
/// | 1002      | NG   | AFR  | Bravo   | 80000      | 1       | Y            |
/// | 1003      | IN   | ASI  | Charlie | 150000     | 3       | ''           |
/// | 1004      | MX   | LAM  | Delta   | 30000      | 5       | NULL         |
async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    let people_groups = [
        (1001, "US", "United States", "NAR", "Alpha", 5000, 1, text("Y"), "a.jpg", 1, 1),
        (1001, "CA", "Canada", "NAR", "Alpha", 2000, 2, text("N"), "", 0, 0),
        (1002, "NG", "Nigeria", "AFR", "Bravo", 80000, 1, text("Y"), "", 2, 14),
        (1003, "IN", "India", "ASI", "Charlie", 150_000, 3, text(""), "", 0, 0),
        (1004, "MX", "Mexico", "LAM", "Delta", 30000, 5, null_text(), "", 0, 0),
    ];
    for (id, rog3, ctry, rog2, name, population, scale, least_reached, photo, month, day) in
        people_groups
    {
        let photo = if photo.is_empty() { null_text() } else { text(photo) };
        insert(
            db,
            "jppeoplegroups",
            &[
                ("PeopleID3", int(id)),
                ("ROG3", text(rog3)),
                ("Ctry", text(ctry)),
                ("ROG2", text(rog2)),
                ("PeopNameInCountry", text(name)),
                ("Population", int(population)),
                ("JPScale", int(scale)),
                ("LeastReached", least_reached),
                ("PhotoAddress", photo),
                ("LRofTheDayMonth", int(month)),
                ("LRofTheDayDay", int(day)),
            ],
        )
        .await?;
    }

    for (rog3, rog2, ctry, population) in [
        ("US", "NAR", "United States", 331_000_000),
        ("CA", "NAR", "Canada", 38_000_000),
        ("NG", "AFR", "Nigeria", 206_000_000),
        ("IN", "ASI", "India", 1_380_000_000),
        ("MX", "LAM", "Mexico", 128_000_000),
    ] {
        insert(
            db,
            "jpcountries",
            &[
                ("ROG3", text(rog3)),
                ("ROG2", text(rog2)),
                ("Ctry", text(ctry)),
                ("Population", int(population)),
            ],
        )
        .await?;
    }

    for (rol3, language, nt_year) in [
        ("eng", "English", text("1526")),
        ("hau", "Hausa", text("1932")),
        ("hin", "Hindi", null_text()),
    ] {
        insert(
            db,
            "jplanguages",
            &[
                ("ROL3", text(rol3)),
                ("Language", text(language)),
                ("NTYear", nt_year),
            ],
        )
        .await?;
    }

    for (rog2, continent) in [("AFR", "Africa"), ("ASI", "Asia"), ("NAR", "North America")] {
        insert(
            db,
            "jpcontinents",
            &[("ROG2", text(rog2)), ("Continent", text(continent))],
        )
        .await?;
    }

    for (code, name) in [(1, "South Pacific"), (2, "Southeast Asia")] {
        insert(
            db,
            "jpregions",
            &[("RegionCode", int(code)), ("RegionName", text(name))],
        )
        .await?;
    }

    for (id, value) in [("cntpeoplegroups", 17000), ("cntcountries", 238)] {
        insert(db, "jptotals", &[("id", text(id)), ("Value", int(value))]).await?;
    }

    for (seq, category) in [(1, "Audio"), (2, "Film")] {
        insert(
            db,
            "jpresources",
            &[
                ("ROL3", text("eng")),
                ("Category", text(category)),
                ("DisplaySeq", int(seq)),
            ],
        )
        .await?;
    }

    insert(
        db,
        "jpprofiletext",
        &[
            ("ProfileID", int(1)),
            ("PeopleID3", int(1002)),
            ("ROG3", text("NG")),
            ("Summary", text("The Bravo live in the north.")),
        ],
    )
    .await?;

    Ok(())
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    seed(&db).await?;
    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    router(AppState::new(db, test_keys()))
}

/// Same app with responses cached for a minute.
pub fn setup_cached_test_app(db: DatabaseConnection) -> Router {
    let cached = CachedExecutor::new(db, std::time::Duration::from_secs(60));
    router(AppState::new(cached, test_keys()))
}

fn test_keys() -> HashSet<String> {
    [TEST_API_KEY.to_string()].into_iter().collect()
}

/// GET `uri` and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// Values of `column` across `rows`, as strings.
pub fn column_values(rows: &[JsonValue], column: &str) -> Vec<String> {
    rows.iter()
        .map(|row| match &row[column] {
            JsonValue::String(value) => value.clone(),
            other => other.to_string(),
        })
        .collect()
}
