//! # SQL Output
//!
//! Renders record batches as multi-row MySQL `INSERT` statements and streams
//! the assembled seed script to a writer.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SeedError};
use crate::generate::record::Record;
use crate::seed::SeedScript;

/// Build one multi-row INSERT for a batch of records.
///
/// Produces:
///
/// ```text
/// INSERT INTO tags (id, name) VALUES
/// (1, 'Favorites'),
/// (2, 'Must Watch');
/// ```
///
/// An empty batch yields a `-- No data for <table>` comment instead of a
/// statement. The column list comes from the record type, so every row has
/// the same columns in the same order.
pub fn build_insert<R: Record>(rows: &[R]) -> Result<String> {
    if rows.is_empty() {
        return Ok(no_data_comment(R::TABLE));
    }

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES\n",
        R::TABLE,
        R::COLUMNS.join(", ")
    );

    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            sql.push_str(",\n");
        }
        sql.push('(');
        for (j, (&column, value)) in R::COLUMNS.iter().zip(row.values()).enumerate() {
            if j > 0 {
                sql.push_str(", ");
            }
            let literal = value
                .to_sql_literal()
                .ok_or_else(|| SeedError::UnsupportedValueKind {
                    kind: value.kind(),
                    table: R::TABLE,
                    column,
                })?;
            sql.push_str(&literal);
        }
        sql.push(')');
    }
    sql.push(';');

    Ok(sql)
}

pub fn no_data_comment(table: &str) -> String {
    format!("-- No data for {}", table)
}

/// Stream a seed script: header comments, optional transaction wrapper, and
/// one banner plus statement per section.
pub fn write_script<W: Write>(writer: &mut W, script: &SeedScript) -> Result<()> {
    write_line(writer, "-- Seed Data for Letterboxd Database")?;
    write_line(
        writer,
        &format!(
            "-- Generated: {}",
            script.generated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ")
        ),
    )?;
    write_line(writer, "")?;

    if script.transactional {
        write_line(writer, "START TRANSACTION;")?;
        write_line(writer, "")?;
    }

    for section in &script.sections {
        write_line(writer, &format!("-- {}", section.section.banner()))?;
        write_line(writer, &section.sql)?;
        write_line(writer, "")?;
    }

    if script.transactional {
        write_line(writer, "COMMIT;")?;
    }

    Ok(())
}

/// Write the script to `path`, creating parent directories as needed.
///
/// Writes to a temporary file in the same directory, then renames it into
/// place, so an interrupted run never leaves a half-written script behind.
pub fn write_script_file(script: &SeedScript, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| SeedError::Output {
        message: format!("Failed to create directory {}", dir.display()),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "seed.sql".to_string());
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    let result = persist(script, &tmp_path, path);
    if result.is_err() && tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            tracing::warn!("Failed to remove {}: {}", tmp_path.display(), e);
        }
    }
    result
}

/// Write `script` to `tmp_path`, sync it, and rename it onto `path`.
fn persist(script: &SeedScript, tmp_path: &Path, path: &Path) -> Result<()> {
    let file = fs::File::create(tmp_path).map_err(|e| SeedError::Output {
        message: format!("Failed to create temp script at {}", tmp_path.display()),
        source: e,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    write_script(&mut writer, script)?;
    let file = writer.into_inner().map_err(|e| SeedError::Output {
        message: format!("Failed to flush {}", tmp_path.display()),
        source: e.into_error(),
    })?;
    file.sync_all().map_err(|e| SeedError::Output {
        message: "Failed to sync script to disk".to_string(),
        source: e,
    })?;
    drop(file);

    fs::rename(tmp_path, path).map_err(|e| SeedError::Output {
        message: format!(
            "Failed to rename {} → {}",
            tmp_path.display(),
            path.display()
        ),
        source: e,
    })
}

fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writeln!(writer, "{}", line).map_err(|e| SeedError::Output {
        message: "writing seed script".to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::record::record;

    record! {
        struct ReviewRow => "reviews" {
            id: i64,
            body: String,
            score: Option<f64>,
        }
    }

    fn review(id: i64, body: &str, score: Option<f64>) -> ReviewRow {
        ReviewRow {
            id,
            body: body.to_string(),
            score,
        }
    }

    #[test]
    fn test_build_insert_multi_row() {
        let rows = vec![review(1, "Great", Some(4.5)), review(2, "Meh", None)];
        let sql = build_insert(&rows).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO reviews (id, body, score) VALUES\n(1, 'Great', 4.5),\n(2, 'Meh', NULL);"
        );
    }

    #[test]
    fn test_build_insert_escapes_text() {
        let rows = vec![review(1, r"It's a \ classic", None)];
        let sql = build_insert(&rows).unwrap();
        assert!(sql.contains(r"'It''s a \\ classic'"), "{}", sql);
    }

    #[test]
    fn test_empty_batch_is_a_comment() {
        let rows: Vec<ReviewRow> = Vec::new();
        let sql = build_insert(&rows).unwrap();
        assert_eq!(sql, "-- No data for reviews");
        assert!(!sql.contains("INSERT"));
    }

    #[test]
    fn test_build_insert_is_deterministic() {
        let rows = vec![review(1, "a", Some(1.0)), review(2, "b", None)];
        assert_eq!(build_insert(&rows).unwrap(), build_insert(&rows).unwrap());
    }

    #[test]
    fn test_unsupported_value_fails_fast() {
        let rows = vec![review(1, "ok", Some(1.0)), review(2, "bad", Some(f64::NAN))];
        let err = build_insert(&rows).unwrap_err();
        match err {
            SeedError::UnsupportedValueKind {
                kind,
                table,
                column,
            } => {
                assert_eq!(kind, "NaN float");
                assert_eq!(table, "reviews");
                assert_eq!(column, "score");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
