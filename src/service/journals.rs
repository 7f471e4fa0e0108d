use crate::db::Database;
use crate::error::StoreError;
use crate::models::{CreateJournalInput, Journal, UpdateJournalInput};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

pub(crate) fn map_row_to_journal(row: &rusqlite::Row) -> rusqlite::Result<Journal> {
    Ok(Journal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        date: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub(crate) fn insert_journal_row(conn: &Connection, journal: &Journal) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO journals (id, user_id, account_id, title, content, date, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            journal.id,
            journal.user_id,
            journal.account_id,
            journal.title,
            journal.content,
            journal.date,
            journal.created_at
        ],
    )?;
    Ok(())
}

pub fn list_journals(db: &Database, account_id: &str) -> Result<Vec<Journal>, StoreError> {
    let conn = db.lock()?;
    let mut stmt =
        conn.prepare("SELECT * FROM journals WHERE account_id = ? ORDER BY date DESC")?;
    let journals = stmt
        .query_map([account_id], map_row_to_journal)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(journals)
}

pub fn get_journal(db: &Database, id: &str) -> Result<Journal, StoreError> {
    let conn = db.lock()?;
    conn.query_row("SELECT * FROM journals WHERE id = ?", [id], map_row_to_journal)
        .optional()?
        .ok_or_else(|| StoreError::NotFound {
            entity: "journal",
            id: id.to_string(),
        })
}

pub fn create_journal(
    db: &Database,
    user_id: &str,
    input: CreateJournalInput,
) -> Result<Journal, StoreError> {
    let journal = Journal {
        id: format!("JRNL-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4()),
        user_id: user_id.to_string(),
        account_id: input.account_id,
        title: input.title,
        content: input.content,
        date: input.date,
        created_at: Utc::now().timestamp(),
    };

    let conn = db.lock()?;
    insert_journal_row(&conn, &journal)?;
    Ok(journal)
}

pub fn update_journal(
    db: &Database,
    id: &str,
    update: UpdateJournalInput,
) -> Result<Journal, StoreError> {
    {
        let conn = db.lock()?;

        let mut updates = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(title) = update.title {
            updates.push("title = ?");
            values.push(Box::new(title));
        }
        if let Some(content) = update.content {
            updates.push("content = ?");
            values.push(Box::new(content));
        }
        if let Some(date) = update.date {
            updates.push("date = ?");
            values.push(Box::new(date));
        }

        if !updates.is_empty() {
            let query = format!("UPDATE journals SET {} WHERE id = ?", updates.join(", "));
            values.push(Box::new(id.to_string()));
            let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
            conn.execute(&query, params.as_slice())?;
        }
    }

    get_journal(db, id)
}

pub fn delete_journal(db: &Database, id: &str) -> Result<(), StoreError> {
    let conn = db.lock()?;
    let deleted = conn.execute("DELETE FROM journals WHERE id = ?", [id])?;
    if deleted == 0 {
        return Err(StoreError::NotFound {
            entity: "journal",
            id: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, CreateAccountInput};
    use crate::service::accounts::{create_account, delete_account};
    use crate::service::trades::list_trades;

    fn setup() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        let account = create_account(
            &db,
            "user-1",
            CreateAccountInput {
                name: "Demo".to_string(),
                account_type: AccountType::Demo,
                balance: 0.0,
                initial_balance: 0.0,
            },
        )
        .unwrap();
        (db, account.id)
    }

    fn entry(account_id: &str, title: &str, date: i64) -> CreateJournalInput {
        CreateJournalInput {
            account_id: account_id.to_string(),
            title: title.to_string(),
            content: "Reviewed the session.".to_string(),
            date,
        }
    }

    #[test]
    fn create_and_list_orders_by_date_desc() {
        let (db, account_id) = setup();

        create_journal(&db, "user-1", entry(&account_id, "Older", 1_700_000_000)).unwrap();
        create_journal(&db, "user-1", entry(&account_id, "Newer", 1_800_000_000)).unwrap();

        let journals = list_journals(&db, &account_id).unwrap();
        assert_eq!(journals.len(), 2);
        assert_eq!(journals[0].title, "Newer");
        assert_eq!(journals[1].title, "Older");
    }

    #[test]
    fn update_journal_changes_provided_fields_only() {
        let (db, account_id) = setup();
        let journal =
            create_journal(&db, "user-1", entry(&account_id, "Draft", 1_700_000_000)).unwrap();

        let updated = update_journal(
            &db,
            &journal.id,
            UpdateJournalInput {
                title: Some("Final".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.content, "Reviewed the session.");
        assert_eq!(updated.date, 1_700_000_000);
    }

    #[test]
    fn delete_journal_removes_entry() {
        let (db, account_id) = setup();
        let journal =
            create_journal(&db, "user-1", entry(&account_id, "Gone", 1_700_000_000)).unwrap();

        delete_journal(&db, &journal.id).unwrap();
        assert!(list_journals(&db, &account_id).unwrap().is_empty());
        assert!(matches!(
            get_journal(&db, &journal.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn deleting_account_cascades_to_journals_and_trades() {
        let (db, account_id) = setup();
        create_journal(&db, "user-1", entry(&account_id, "Entry", 1_700_000_000)).unwrap();

        delete_account(&db, &account_id).unwrap();

        assert!(list_journals(&db, &account_id).unwrap().is_empty());
        assert!(list_trades(&db, &account_id).unwrap().is_empty());
    }
}
