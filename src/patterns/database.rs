//! Simulated database connections produced by a factory.

#![allow(missing_docs)]

use std::fmt;
use std::str::FromStr;

use crate::core::console::Console;
use crate::core::errors::{NotifyError, Result};

/// Supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseKind {
    MySql,
    PostgreSql,
    MongoDb,
}

impl DatabaseKind {
    pub const ALL: [Self; 3] = [Self::MySql, Self::PostgreSql, Self::MongoDb];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::PostgreSql => "PostgreSQL",
            Self::MongoDb => "MongoDB",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DatabaseKind {
    type Err = NotifyError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "postgresql" | "postgres" => Ok(Self::PostgreSql),
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            _ => Err(NotifyError::UnknownBackend {
                name: name.to_string(),
            }),
        }
    }
}

/// A (simulated) database connection.
pub trait Database: Send {
    fn kind(&self) -> DatabaseKind;
    fn connect(&mut self) -> Result<()>;
    fn execute(&self, query: &str) -> Result<()>;
}

#[derive(Debug)]
pub struct MySql {
    console: Console,
}

#[derive(Debug)]
pub struct PostgreSql {
    console: Console,
}

#[derive(Debug)]
pub struct MongoDb {
    console: Console,
}

impl Database for MySql {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }

    fn connect(&mut self) -> Result<()> {
        self.console.emit("Connected to MySQL\n")
    }

    fn execute(&self, query: &str) -> Result<()> {
        self.console.emit(&format!("MySQL executing: {query}\n"))
    }
}

impl Database for PostgreSql {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::PostgreSql
    }

    fn connect(&mut self) -> Result<()> {
        self.console.emit("Connected to PostgreSQL\n")
    }

    fn execute(&self, query: &str) -> Result<()> {
        self.console.emit(&format!("PostgreSQL executing: {query}\n"))
    }
}

impl Database for MongoDb {
    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MongoDb
    }

    fn connect(&mut self) -> Result<()> {
        self.console.emit("Connected to MongoDB\n")
    }

    fn execute(&self, query: &str) -> Result<()> {
        self.console.emit(&format!("MongoDB executing: {query}\n"))
    }
}

/// Builds a connection for a backend kind.
pub struct DatabaseFactory;

impl DatabaseFactory {
    #[must_use]
    pub fn create(kind: DatabaseKind, console: Console) -> Box<dyn Database> {
        match kind {
            DatabaseKind::MySql => Box::new(MySql { console }),
            DatabaseKind::PostgreSql => Box::new(PostgreSql { console }),
            DatabaseKind::MongoDb => Box::new(MongoDb { console }),
        }
    }

    /// Resolve `name` first; unknown backends are an error, never a null handle.
    pub fn create_by_name(name: &str, console: Console) -> Result<Box<dyn Database>> {
        Ok(Self::create(name.parse()?, console))
    }
}
