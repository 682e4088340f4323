use crate::db::Database;
use crate::error::{CropOpsError, Result};
use crate::models::{Field, IssueKind, IssueSeverity, PestDiseaseRecord, Planting};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Field Queries

impl Database {
    pub fn create_field(&self, field: &Field) -> Result<i64> {
        let id = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO fields (name, soil_ph, soil_type, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    field.name,
                    field.soil_ph,
                    field.soil_type,
                    field.created_at.to_rfc3339(),
                ],
            )?;
            let id = tx.last_insert_rowid();
            for record in &field.pest_disease_history {
                insert_issue(&tx, id, record)?;
            }
            tx.commit()?;
            Ok(id)
        })?;
        tracing::info!(field_id = id, name = %field.name, "Created field");
        Ok(id)
    }

    /// The field with its full pest/disease history, oldest first.
    pub fn get_field(&self, id: i64) -> Result<Field> {
        self.with_conn(|conn| {
            let mut field = conn
                .query_row("SELECT * FROM fields WHERE id = ?1", [id], row_to_field)
                .optional()?
                .ok_or_else(|| CropOpsError::NotFound(format!("Field {}", id)))?;
            field.pest_disease_history = issues_for_field(conn, id)?;
            Ok(field)
        })
    }

    /// Fields without their pest/disease history.
    pub fn list_fields(&self) -> Result<Vec<Field>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM fields ORDER BY id")?;
            let fields = stmt
                .query_map([], row_to_field)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(fields)
        })
    }

    pub fn update_field(&self, field: &Field) -> Result<()> {
        let id = field
            .id
            .ok_or_else(|| CropOpsError::InvalidData("Field has no ID".into()))?;

        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE fields SET name = ?1, soil_ph = ?2, soil_type = ?3 WHERE id = ?4",
                params![field.name, field.soil_ph, field.soil_type, id],
            )?;
            if changed == 0 {
                return Err(CropOpsError::NotFound(format!("Field {}", id)));
            }
            Ok(())
        })
    }

    pub fn delete_field(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM fields WHERE id = ?1", [id])?;
            if changed == 0 {
                return Err(CropOpsError::NotFound(format!("Field {}", id)));
            }
            Ok(())
        })
    }
}

fn row_to_field(row: &Row) -> rusqlite::Result<Field> {
    let created_at_str: String = row.get("created_at")?;

    Ok(Field {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        soil_ph: row.get("soil_ph")?,
        soil_type: row.get("soil_type")?,
        pest_disease_history: Vec::new(),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Pest & Disease Queries

impl Database {
    pub fn add_issue(&self, field_id: i64, record: &PestDiseaseRecord) -> Result<i64> {
        self.with_conn(|conn| insert_issue(conn, field_id, record))
    }

    pub fn resolve_issue(&self, issue_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE pest_disease_records SET resolved = 1 WHERE id = ?1",
                [issue_id],
            )?;
            if changed == 0 {
                return Err(CropOpsError::NotFound(format!("Issue {}", issue_id)));
            }
            Ok(())
        })
    }
}

fn insert_issue(conn: &Connection, field_id: i64, record: &PestDiseaseRecord) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO pest_disease_records (field_id, kind, name, severity, observed_on, resolved)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            field_id,
            record.kind.as_str(),
            record.name,
            record.severity.as_str(),
            record.observed_on.format(DATE_FORMAT).to_string(),
            record.resolved,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn issues_for_field(conn: &Connection, field_id: i64) -> Result<Vec<PestDiseaseRecord>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM pest_disease_records WHERE field_id = ?1 ORDER BY observed_on, id",
    )?;
    let records = stmt
        .query_map([field_id], row_to_issue)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

fn row_to_issue(row: &Row) -> rusqlite::Result<PestDiseaseRecord> {
    let kind_str: String = row.get("kind")?;
    let severity_str: String = row.get("severity")?;
    let date_str: String = row.get("observed_on")?;

    let kind = IssueKind::from_str(&kind_str).unwrap_or_else(|| {
        warn!(kind = %kind_str, "Unknown issue kind in database, defaulting to pest");
        IssueKind::Pest
    });
    let severity = IssueSeverity::from_str(&severity_str).unwrap_or_else(|| {
        warn!(severity = %severity_str, "Unknown severity in database, defaulting to medium");
        IssueSeverity::Medium
    });

    Ok(PestDiseaseRecord {
        id: Some(row.get("id")?),
        kind,
        name: row.get("name")?,
        severity,
        observed_on: parse_date(&date_str),
        resolved: row.get("resolved")?,
    })
}

// Planting Queries

impl Database {
    pub fn create_planting(&self, planting: &Planting) -> Result<i64> {
        let id = self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO plantings (field_id, crop_id, plant_date, notes, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    planting.field_id,
                    planting.crop_id,
                    planting.plant_date.format(DATE_FORMAT).to_string(),
                    planting.notes,
                    planting.created_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        tracing::info!(
            planting_id = id,
            field_id = planting.field_id,
            crop = %planting.crop_id,
            "Recorded planting"
        );
        Ok(id)
    }

    /// Newest first.
    pub fn get_plantings_for_field(&self, field_id: i64) -> Result<Vec<Planting>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM plantings WHERE field_id = ?1 ORDER BY plant_date DESC, id DESC",
            )?;
            let plantings = stmt
                .query_map([field_id], row_to_planting)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(plantings)
        })
    }

    pub fn get_all_plantings(&self) -> Result<Vec<Planting>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM plantings ORDER BY plant_date DESC, id DESC")?;
            let plantings = stmt
                .query_map([], row_to_planting)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(plantings)
        })
    }

    pub fn delete_planting(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM plantings WHERE id = ?1", [id])?;
            if changed == 0 {
                return Err(CropOpsError::NotFound(format!("Planting {}", id)));
            }
            Ok(())
        })
    }
}

fn row_to_planting(row: &Row) -> rusqlite::Result<Planting> {
    let date_str: String = row.get("plant_date")?;
    let created_at_str: String = row.get("created_at")?;

    Ok(Planting {
        id: Some(row.get("id")?),
        field_id: row.get("field_id")?,
        crop_id: row.get("crop_id")?,
        plant_date: parse_date(&date_str),
        notes: row.get("notes")?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_else(|_| {
        warn!(date = %s, "Unparseable date in database, using today");
        chrono::Local::now().date_naive()
    })
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
