// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Build, lint and test automation for the SiteCrew workspace.
//!
//! - `cargo xtask test` runs every test against in-memory `SQLite`.
//! - `cargo xtask test-mariadb` starts a throwaway `MariaDB` container and
//!   runs the ignored backend validation tests of `sitecrew-persistence`
//!   with the `mysql` feature enabled.
//! - `cargo xtask verify-migrations` applies both migration sets and fails
//!   when the resulting schemas differ.
//!
//! External databases are only ever touched by these explicit commands.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    process::Output,
    thread::sleep,
    time::Duration,
};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const SQLITE_MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");
const MYSQL_MIGRATIONS: EmbeddedMigrations =
    embed_migrations!("../crates/persistence/migrations_mysql");

const PERSISTENCE_PACKAGE: &str = "sitecrew-persistence";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the workspace
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate an lcov coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply clippy fixes
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Apply formatting
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run unit, integration and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run `MariaDB` backend validation tests
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Verify schema parity between `SQLite` and `MySQL` migrations
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::Coverage => run_cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
            ]),
            Self::Lint => lint(),
            Self::LintClippy => run_cargo(&[
                "clippy",
                "--all-targets",
                "--all-features",
                "--",
                "-D",
                "warnings",
            ]),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::LintTypos => {
                cmd!("typos").run_with_trace()?;
                Ok(())
            }
            Self::FixClippy => run_cargo(&[
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
            ]),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::Test => test(),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    Command::Build.run()?;
    test()?;
    Ok(())
}

fn lint() -> Result<()> {
    Command::LintClippy.run()?;
    lint_docs()?;
    Command::LintFormatting.run()?;
    Command::LintTypos.run()?;
    Ok(())
}

/// Check that docs build without warnings using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            ["doc", "--no-deps", "--package", package.name.as_str()],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test", "--all-targets"])?;
    // slowest, so last
    run_cargo(&["test", "--doc"])
}

fn run_cargo(args: &[&str]) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because we're running as a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// A `MariaDB` 11 container that is stopped and removed when dropped.
struct MariaDbContainer {
    name: &'static str,
    database: &'static str,
    user: &'static str,
    password: &'static str,
    port: u16,
}

impl MariaDbContainer {
    const READY_ATTEMPTS: u32 = 30;

    /// Starts the container and waits until it accepts queries.
    fn start(
        name: &'static str,
        database: &'static str,
        password: &'static str,
        port: u16,
    ) -> Result<Self> {
        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        Self::remove(name);

        tracing::info!(name, port, "Starting MariaDB container");
        cmd!(
            "docker",
            "run",
            "--name",
            name,
            "-e",
            format!("MARIADB_DATABASE={database}"),
            "-e",
            "MARIADB_USER=sitecrew",
            "-e",
            format!("MARIADB_PASSWORD={password}"),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{port}:3306"),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        let container = Self {
            name,
            database,
            user: "sitecrew",
            password,
            port,
        };
        container.wait_ready()?;
        Ok(container)
    }

    fn wait_ready(&self) -> Result<()> {
        for attempt in 1..=Self::READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            tracing::debug!(attempt, "Probing MariaDB");

            let probe = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "-u",
                self.user,
                format!("-p{}", self.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if probe.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(());
            }
        }
        Err(eyre!(
            "MariaDB did not become ready within {} seconds",
            Self::READY_ATTEMPTS
        ))
    }

    fn url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn remove(name: &str) {
        let _ = cmd!("docker", "stop", name)
            .stdout_null()
            .stderr_null()
            .unchecked()
            .run();
        let _ = cmd!("docker", "rm", name)
            .stdout_null()
            .stderr_null()
            .unchecked()
            .run();
    }
}

impl Drop for MariaDbContainer {
    fn drop(&mut self) {
        tracing::info!(name = self.name, "Removing MariaDB container");
        Self::remove(self.name);
    }
}

/// Runs the ignored backend validation tests against a fresh `MariaDB`.
///
/// Requires Docker, a free port 3307 and `MySQL` client libraries for the
/// `mysql` feature. The container is removed whatever the outcome.
fn test_mariadb() -> Result<()> {
    let container = MariaDbContainer::start(
        "sitecrew-test-mariadb",
        "sitecrew_test",
        "test_password",
        3307,
    )?;

    tracing::info!("Running MariaDB backend validation tests");
    cmd!(
        "cargo",
        "test",
        "--package",
        PERSISTENCE_PACKAGE,
        "--features",
        "mysql",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.url())
    .env("SITECREW_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation passed");
    Ok(())
}

/// Applies both migration sets and compares the resulting schemas.
///
/// Tables, columns (normalized type and nullability), primary keys,
/// foreign keys and unique constraints must match. Plain indexes are not
/// compared since `InnoDB` adds its own for foreign keys.
fn verify_migrations() -> Result<()> {
    let container = MariaDbContainer::start(
        "sitecrew-verify-migrations",
        "sitecrew_verify",
        "verify_password",
        3308,
    )?;

    let mut sqlite = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut sqlite)
        .wrap_err("Failed to enable foreign keys on SQLite")?;
    sqlite
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    let mut mysql =
        MysqlConnection::establish(&container.url()).wrap_err("Failed to connect to MariaDB")?;
    mysql
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;

    let sqlite_schema = introspect_sqlite(&mut sqlite)?;
    let mysql_schema = introspect_mysql(&mut mysql, container.database)?;

    let mismatches = compare_schemas(&sqlite_schema, &mysql_schema);
    if !mismatches.is_empty() {
        return Err(eyre!(
            "Schema parity check failed:\n{}",
            mismatches.join("\n")
        ));
    }

    tracing::info!(
        tables = sqlite_schema.len(),
        "Schema parity verification passed"
    );
    Ok(())
}

/// A table's shape with backend differences normalized away.
#[derive(Debug, Default, PartialEq, Eq)]
struct Table {
    /// Column name to `(normalized type, nullable)`.
    columns: BTreeMap<String, (&'static str, bool)>,
    primary_key: BTreeSet<String>,
    /// `(column, referenced table, referenced column)`.
    foreign_keys: BTreeSet<(String, String, String)>,
    unique: BTreeSet<Vec<String>>,
}

type Schema = BTreeMap<String, Table>;

fn introspect_sqlite(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct Name {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyRow {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    let tables: Vec<Name> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list SQLite tables")?;

    let mut schema = Schema::new();
    for table in tables {
        let mut shape = Table::default();

        let columns: Vec<ColumnRow> = diesel::sql_query(format!("PRAGMA table_info({})", table.name))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read columns of {}", table.name))?;
        for col in columns {
            if col.pk > 0 {
                shape.primary_key.insert(col.name.clone());
            }
            // SQLite reports INTEGER PRIMARY KEY as nullable
            let nullable = col.notnull == 0 && col.pk == 0;
            shape
                .columns
                .insert(col.name, (normalize_type(&col.r#type), nullable));
        }

        let foreign_keys: Vec<ForeignKeyRow> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read foreign keys of {}", table.name))?;
        shape.foreign_keys = foreign_keys
            .into_iter()
            .map(|fk| (fk.from, fk.table, fk.to))
            .collect();

        let indexes: Vec<IndexRow> = diesel::sql_query(format!("PRAGMA index_list({})", table.name))
            .load(conn)
            .wrap_err_with(|| format!("Failed to read indexes of {}", table.name))?;
        for index in indexes.into_iter().filter(|i| i.origin == "u") {
            let columns: Vec<Name> = diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read index {}", index.name))?;
            shape
                .unique
                .insert(columns.into_iter().map(|c| c.name).collect());
        }

        schema.insert(table.name, shape);
    }

    Ok(schema)
}

fn introspect_mysql(conn: &mut MysqlConnection, database: &str) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnRow {
        #[diesel(sql_type = Text)]
        table_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    struct KeyRow {
        #[diesel(sql_type = Text)]
        table_name: String,
        #[diesel(sql_type = Text)]
        constraint_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        constraint_type: String,
        #[diesel(sql_type = diesel::sql_types::Nullable<Text>)]
        referenced_table_name: Option<String>,
        #[diesel(sql_type = diesel::sql_types::Nullable<Text>)]
        referenced_column_name: Option<String>,
    }

    let columns: Vec<ColumnRow> = diesel::sql_query(
        "SELECT table_name, column_name, data_type, is_nullable, column_key \
         FROM information_schema.columns \
         WHERE table_schema = ? AND table_name != '__diesel_schema_migrations' \
         ORDER BY table_name, ordinal_position",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to read MySQL columns")?;

    let mut schema = Schema::new();
    for col in columns {
        let shape = schema.entry(col.table_name).or_default();
        if col.column_key == "PRI" {
            shape.primary_key.insert(col.column_name.clone());
        }
        shape.columns.insert(
            col.column_name,
            (normalize_type(&col.data_type), col.is_nullable == "YES"),
        );
    }

    let keys: Vec<KeyRow> = diesel::sql_query(
        "SELECT kcu.table_name, kcu.constraint_name, kcu.column_name, tc.constraint_type, \
                kcu.referenced_table_name, kcu.referenced_column_name \
         FROM information_schema.key_column_usage kcu \
         JOIN information_schema.table_constraints tc \
           ON tc.constraint_name = kcu.constraint_name \
          AND tc.table_schema = kcu.table_schema \
          AND tc.table_name = kcu.table_name \
         WHERE kcu.table_schema = ? AND tc.constraint_type IN ('UNIQUE', 'FOREIGN KEY') \
         ORDER BY kcu.table_name, kcu.constraint_name, kcu.ordinal_position",
    )
    .bind::<Text, _>(database)
    .load(conn)
    .wrap_err("Failed to read MySQL constraints")?;

    let mut unique: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for key in keys {
        if key.constraint_type == "UNIQUE" {
            unique
                .entry((key.table_name, key.constraint_name))
                .or_default()
                .push(key.column_name);
        } else if let (Some(to_table), Some(to_column), Some(shape)) = (
            key.referenced_table_name,
            key.referenced_column_name,
            schema.get_mut(&key.table_name),
        ) {
            shape
                .foreign_keys
                .insert((key.column_name, to_table, to_column));
        }
    }
    for ((table, _), columns) in unique {
        if let Some(shape) = schema.get_mut(&table) {
            shape.unique.insert(columns);
        }
    }

    Ok(schema)
}

/// Maps a backend column type onto a small common vocabulary.
fn normalize_type(raw: &str) -> &'static str {
    let upper = raw.to_uppercase();
    if upper.contains("INT") {
        "integer"
    } else if upper.contains("REAL")
        || upper.contains("FLOA")
        || upper.contains("DOUB")
        || upper.contains("DEC")
    {
        "real"
    } else if upper.contains("BLOB") || upper.contains("BINARY") {
        "blob"
    } else {
        "text"
    }
}

/// Returns one line per difference; empty when the schemas agree.
fn compare_schemas(sqlite: &Schema, mysql: &Schema) -> Vec<String> {
    let mut mismatches = Vec::new();

    for name in sqlite.keys().filter(|t| !mysql.contains_key(*t)) {
        mismatches.push(format!("  - table '{name}' only exists in SQLite"));
    }
    for name in mysql.keys().filter(|t| !sqlite.contains_key(*t)) {
        mismatches.push(format!("  - table '{name}' only exists in MySQL"));
    }

    for (name, lite) in sqlite {
        let Some(my) = mysql.get(name) else {
            continue;
        };
        if lite.columns != my.columns {
            mismatches.push(format!(
                "  - columns of '{name}' differ\n    SQLite: {:?}\n    MySQL: {:?}",
                lite.columns, my.columns
            ));
        }
        if lite.primary_key != my.primary_key {
            mismatches.push(format!("  - primary key of '{name}' differs"));
        }
        if lite.foreign_keys != my.foreign_keys {
            mismatches.push(format!(
                "  - foreign keys of '{name}' differ\n    SQLite: {:?}\n    MySQL: {:?}",
                lite.foreign_keys, my.foreign_keys
            ));
        }
        if lite.unique != my.unique {
            mismatches.push(format!(
                "  - unique constraints of '{name}' differ\n    SQLite: {:?}\n    MySQL: {:?}",
                lite.unique, my.unique
            ));
        }
    }

    mismatches
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
