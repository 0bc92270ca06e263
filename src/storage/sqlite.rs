//! SQLite storage backend for termgraph

use super::traits::{GraphUpdate, OpenStore, QuadPattern, StorageError, StorageResult, TripleStore};
use crate::graph::{Iri, Literal, Quad, Term};
use rusqlite::{params, Connection, ToSql};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const KIND_IRI: &str = "iri";
const KIND_LITERAL: &str = "literal";

/// Column values for one quad: (graph, subject, predicate, object, kind, lang, datatype)
type QuadRow = (String, String, String, String, String, String, String);

/// SQLite-backed quad store
///
/// Uses a single `quads` table; a named graph exists exactly as long as it
/// holds at least one quad. Thread-safe via internal mutex on the connection.
/// Update batches run inside one SQLite transaction, so a cascading mutation
/// over many graphs either lands completely or not at all.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            -- Language tag and datatype use '' for "absent" so that they can
            -- take part in the primary key.
            CREATE TABLE IF NOT EXISTS quads (
                graph TEXT NOT NULL,
                subject TEXT NOT NULL,
                predicate TEXT NOT NULL,
                object TEXT NOT NULL,
                object_kind TEXT NOT NULL,
                lang TEXT NOT NULL DEFAULT '',
                datatype TEXT NOT NULL DEFAULT '',
                PRIMARY KEY (graph, subject, predicate, object, object_kind, lang, datatype)
            );

            CREATE INDEX IF NOT EXISTS idx_quads_subject
                ON quads(subject, predicate);
            CREATE INDEX IF NOT EXISTS idx_quads_predicate_object
                ON quads(predicate, object);

            -- Enable WAL mode for concurrent reads during writes
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serialize a quad to database columns
    fn quad_to_row(quad: &Quad) -> QuadRow {
        let (object, kind, lang, datatype) = Self::term_to_columns(&quad.object);
        (
            quad.graph.as_str().to_string(),
            quad.subject.as_str().to_string(),
            quad.predicate.as_str().to_string(),
            object,
            kind,
            lang,
            datatype,
        )
    }

    fn term_to_columns(term: &Term) -> (String, String, String, String) {
        match term {
            Term::Iri { iri } => (
                iri.as_str().to_string(),
                KIND_IRI.to_string(),
                String::new(),
                String::new(),
            ),
            Term::Literal { literal } => (
                literal.value.clone(),
                KIND_LITERAL.to_string(),
                literal.language.clone().unwrap_or_default(),
                literal
                    .datatype
                    .as_ref()
                    .map(|d| d.as_str().to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Deserialize a quad from database columns
    fn row_to_quad(row: QuadRow) -> StorageResult<Quad> {
        let (graph, subject, predicate, object, kind, lang, datatype) = row;
        let object = match kind.as_str() {
            KIND_IRI => Term::iri(object),
            KIND_LITERAL => Term::literal(Literal {
                value: object,
                language: (!lang.is_empty()).then_some(lang),
                datatype: (!datatype.is_empty()).then(|| Iri::from(datatype)),
            }),
            other => {
                return Err(StorageError::InvalidTerm(format!(
                    "unknown object kind '{}' for <{}>",
                    other, subject
                )))
            }
        };
        Ok(Quad {
            subject: Iri::from(subject),
            predicate: Iri::from(predicate),
            object,
            graph: Iri::from(graph),
        })
    }

    /// Build the WHERE clause for a pattern, with positional parameters
    fn where_clause(pattern: &QuadPattern) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clauses: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref graph) = pattern.graph {
            clauses.push("graph = ?");
            params_vec.push(Box::new(graph.as_str().to_string()));
        }
        if let Some(ref subject) = pattern.subject {
            clauses.push("subject = ?");
            params_vec.push(Box::new(subject.as_str().to_string()));
        }
        if let Some(ref predicate) = pattern.predicate {
            clauses.push("predicate = ?");
            params_vec.push(Box::new(predicate.as_str().to_string()));
        }
        if let Some(ref object) = pattern.object {
            let (value, kind, lang, datatype) = Self::term_to_columns(object);
            clauses.push("object = ? AND object_kind = ? AND lang = ? AND datatype = ?");
            params_vec.push(Box::new(value));
            params_vec.push(Box::new(kind));
            params_vec.push(Box::new(lang));
            params_vec.push(Box::new(datatype));
        }

        if clauses.is_empty() {
            (String::new(), params_vec)
        } else {
            (format!(" WHERE {}", clauses.join(" AND ")), params_vec)
        }
    }

    fn apply_update(conn: &Connection, update: &GraphUpdate) -> StorageResult<()> {
        match update {
            GraphUpdate::Insert(quads) => {
                let mut stmt = conn.prepare_cached(
                    r#"
                    INSERT OR IGNORE INTO quads (graph, subject, predicate, object, object_kind, lang, datatype)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                )?;
                for quad in quads {
                    let (graph, subject, predicate, object, kind, lang, datatype) = Self::quad_to_row(quad);
                    stmt.execute(params![graph, subject, predicate, object, kind, lang, datatype])?;
                }
            }
            GraphUpdate::Delete(pattern) => {
                let (where_sql, params_vec) = Self::where_clause(pattern);
                let sql = format!("DELETE FROM quads{}", where_sql);
                let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| b.as_ref()).collect();
                conn.execute(&sql, params_refs.as_slice())?;
            }
            GraphUpdate::DropGraph(graph) => {
                conn.execute("DELETE FROM quads WHERE graph = ?1", params![graph.as_str()])?;
            }
        }
        Ok(())
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl TripleStore for SqliteStore {
    fn find(&self, pattern: &QuadPattern) -> StorageResult<Vec<Quad>> {
        let conn = self.conn();

        let (where_sql, params_vec) = Self::where_clause(pattern);
        let mut sql = format!(
            "SELECT graph, subject, predicate, object, object_kind, lang, datatype FROM quads{}
             ORDER BY graph, subject, predicate, object",
            where_sql
        );
        if let Some(limit) = pattern.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| b.as_ref()).collect();
        let rows = stmt.query_map(params_refs.as_slice(), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut quads = Vec::new();
        for row in rows {
            quads.push(Self::row_to_quad(row?)?);
        }
        Ok(quads)
    }

    fn ask(&self, pattern: &QuadPattern) -> StorageResult<bool> {
        let conn = self.conn();
        let (where_sql, params_vec) = Self::where_clause(pattern);
        let sql = format!("SELECT EXISTS(SELECT 1 FROM quads{})", where_sql);
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| b.as_ref()).collect();
        let exists: bool = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
        Ok(exists)
    }

    fn graphs(&self) -> StorageResult<Vec<Iri>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT DISTINCT graph FROM quads ORDER BY graph")?;
        let graphs = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .map(|r| r.map(Iri::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(graphs)
    }

    fn apply(&self, updates: &[GraphUpdate]) -> StorageResult<()> {
        let mut conn = self.conn();
        // Dropping the transaction without commit rolls it back
        let tx = conn.transaction()?;
        for update in updates {
            Self::apply_update(&tx, update)?;
        }
        tx.commit()?;
        Ok(())
    }
}
