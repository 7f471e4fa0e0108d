use crate::db::Database;
use crate::error::StoreError;
use crate::models::{Account, CreateAccountInput, UpdateAccountInput};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

pub(crate) fn map_row_to_account(row: &rusqlite::Row) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        account_type: row.get(3)?,
        balance: row.get(4)?,
        initial_balance: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub(crate) fn insert_account_row(conn: &Connection, account: &Account) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO accounts (id, user_id, name, account_type, balance, initial_balance, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            account.id,
            account.user_id,
            account.name,
            account.account_type,
            account.balance,
            account.initial_balance,
            account.created_at
        ],
    )?;
    Ok(())
}

/// Applies a signed delta to an account's balance in place. Runs inside
/// the caller's transaction; a delta that matches no account row is an
/// anomaly worth logging but must not fail the enclosing trade mutation.
pub(crate) fn adjust_balance(
    conn: &Connection,
    account_id: &str,
    delta: f64,
) -> Result<(), StoreError> {
    let updated = conn.execute(
        "UPDATE accounts SET balance = balance + ? WHERE id = ?",
        rusqlite::params![delta, account_id],
    )?;
    if updated == 0 {
        log::warn!(
            "Balance adjustment of {} matched no account {}",
            delta,
            account_id
        );
    }
    Ok(())
}

pub fn list_accounts(db: &Database, user_id: &str) -> Result<Vec<Account>, StoreError> {
    let conn = db.lock()?;
    let mut stmt =
        conn.prepare("SELECT * FROM accounts WHERE user_id = ? ORDER BY created_at DESC")?;
    let accounts = stmt
        .query_map([user_id], map_row_to_account)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(accounts)
}

pub fn get_account(db: &Database, id: &str) -> Result<Account, StoreError> {
    let conn = db.lock()?;
    conn.query_row("SELECT * FROM accounts WHERE id = ?", [id], map_row_to_account)
        .optional()?
        .ok_or_else(|| StoreError::NotFound {
            entity: "account",
            id: id.to_string(),
        })
}

pub fn create_account(
    db: &Database,
    user_id: &str,
    input: CreateAccountInput,
) -> Result<Account, StoreError> {
    let account = Account {
        id: format!("ACCT-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4()),
        user_id: user_id.to_string(),
        name: input.name,
        account_type: input.account_type,
        balance: input.balance,
        initial_balance: input.initial_balance,
        created_at: Utc::now().timestamp(),
    };

    let conn = db.lock()?;
    insert_account_row(&conn, &account)?;
    Ok(account)
}

pub fn update_account(
    db: &Database,
    id: &str,
    update: UpdateAccountInput,
) -> Result<Account, StoreError> {
    {
        let conn = db.lock()?;

        let mut updates = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(name) = update.name {
            updates.push("name = ?");
            values.push(Box::new(name));
        }
        if let Some(account_type) = update.account_type {
            updates.push("account_type = ?");
            values.push(Box::new(account_type));
        }

        if !updates.is_empty() {
            let query = format!("UPDATE accounts SET {} WHERE id = ?", updates.join(", "));
            values.push(Box::new(id.to_string()));
            let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
            conn.execute(&query, params.as_slice())?;
        }
    }

    get_account(db, id)
}

/// Sets both `balance` and `initial_balance` to the supplied value,
/// disconnecting the equity curve's anchor from trade history up to this
/// point.
pub fn reset_balance(db: &Database, id: &str, new_balance: f64) -> Result<Account, StoreError> {
    {
        let conn = db.lock()?;
        let updated = conn.execute(
            "UPDATE accounts SET balance = ?, initial_balance = ? WHERE id = ?",
            rusqlite::params![new_balance, new_balance, id],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "account",
                id: id.to_string(),
            });
        }
    }

    get_account(db, id)
}

/// Deletes an account together with its trades and journals.
pub fn delete_account(db: &Database, id: &str) -> Result<(), StoreError> {
    let conn = db.lock()?;
    let tx = conn.unchecked_transaction()?;

    tx.execute("DELETE FROM journals WHERE account_id = ?", [id])?;
    tx.execute("DELETE FROM trades WHERE account_id = ?", [id])?;
    let deleted = tx.execute("DELETE FROM accounts WHERE id = ?", [id])?;
    if deleted == 0 {
        return Err(StoreError::NotFound {
            entity: "account",
            id: id.to_string(),
        });
    }

    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    fn demo_input(name: &str) -> CreateAccountInput {
        CreateAccountInput {
            name: name.to_string(),
            account_type: AccountType::Demo,
            balance: 1000.0,
            initial_balance: 1000.0,
        }
    }

    #[test]
    fn create_and_list_accounts() {
        let db = Database::open_in_memory().unwrap();
        create_account(&db, "user-1", demo_input("Demo A")).unwrap();
        create_account(&db, "user-1", demo_input("Demo B")).unwrap();
        create_account(&db, "user-2", demo_input("Other user")).unwrap();

        let accounts = list_accounts(&db, "user-1").unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(accounts.iter().all(|a| a.user_id == "user-1"));
    }

    #[test]
    fn update_account_changes_name_and_type() {
        let db = Database::open_in_memory().unwrap();
        let account = create_account(&db, "user-1", demo_input("Paper")).unwrap();

        let updated = update_account(
            &db,
            &account.id,
            UpdateAccountInput {
                name: Some("Funded".to_string()),
                account_type: Some(AccountType::PropFirm),
            },
        )
        .unwrap();

        assert_eq!(updated.name, "Funded");
        assert_eq!(updated.account_type, AccountType::PropFirm);
        assert_eq!(updated.balance, 1000.0);
    }

    #[test]
    fn reset_balance_sets_both_fields() {
        let db = Database::open_in_memory().unwrap();
        let account = create_account(&db, "user-1", demo_input("Live")).unwrap();

        let reset = reset_balance(&db, &account.id, 5000.0).unwrap();
        assert_eq!(reset.balance, 5000.0);
        assert_eq!(reset.initial_balance, 5000.0);
    }

    #[test]
    fn reset_balance_on_missing_account_errors() {
        let db = Database::open_in_memory().unwrap();
        let result = reset_balance(&db, "ACCT-missing", 100.0);
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }
}
