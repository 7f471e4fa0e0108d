//! JSON snapshot export/import of a user's accounts, trades, and
//! journals.

use crate::db::Database;
use crate::error::StoreError;
use crate::models::{Account, Journal, Trade};
use crate::service::{accounts, journals, trades};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub trades: Vec<Trade>,
    pub journals: Vec<Journal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub fn export_snapshot(db: &Database, user_id: &str) -> Result<Snapshot, StoreError> {
    let conn = db.lock()?;

    let mut stmt =
        conn.prepare("SELECT * FROM accounts WHERE user_id = ? ORDER BY created_at DESC")?;
    let account_rows = stmt
        .query_map([user_id], accounts::map_row_to_account)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare("SELECT * FROM trades WHERE user_id = ? ORDER BY exit_date ASC")?;
    let trade_rows = stmt
        .query_map([user_id], trades::map_row_to_trade)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare("SELECT * FROM journals WHERE user_id = ? ORDER BY date DESC")?;
    let journal_rows = stmt
        .query_map([user_id], journals::map_row_to_journal)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Snapshot {
        accounts: account_rows,
        trades: trade_rows,
        journals: journal_rows,
    })
}

pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn snapshot_from_json(json: &str) -> Result<Snapshot, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// Restores a snapshot, skipping any record whose id already exists.
/// Account balances are restored verbatim, so trade inserts here do not
/// go through balance reconciliation.
pub fn import_snapshot(db: &Database, snapshot: &Snapshot) -> Result<ImportSummary, StoreError> {
    let conn = db.lock()?;
    let tx = conn.unchecked_transaction()?;

    let mut summary = ImportSummary::default();

    for account in &snapshot.accounts {
        if row_exists(&tx, "accounts", &account.id)? {
            summary.skipped += 1;
            continue;
        }
        accounts::insert_account_row(&tx, account)?;
        summary.imported += 1;
    }

    for trade in &snapshot.trades {
        if row_exists(&tx, "trades", &trade.id)? {
            summary.skipped += 1;
            continue;
        }
        trades::insert_trade_row(&tx, trade)?;
        summary.imported += 1;
    }

    for journal in &snapshot.journals {
        if row_exists(&tx, "journals", &journal.id)? {
            summary.skipped += 1;
            continue;
        }
        journals::insert_journal_row(&tx, journal)?;
        summary.imported += 1;
    }

    tx.commit()?;

    log::info!(
        "Snapshot import: {} records imported, {} skipped",
        summary.imported,
        summary.skipped
    );

    Ok(summary)
}

// `table` is always one of the three compile-time table names above.
fn row_exists(conn: &Connection, table: &str, id: &str) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", table),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccountType, CreateAccountInput, CreateJournalInput, CreateTradeInput, Market,
        TradeStatus, TradeType,
    };
    use crate::service::{create_account, create_journal, create_trade};

    fn seeded_db() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        let account = create_account(
            &db,
            "user-1",
            CreateAccountInput {
                name: "Demo".to_string(),
                account_type: AccountType::Demo,
                balance: 1000.0,
                initial_balance: 1000.0,
            },
        )
        .unwrap();

        create_trade(
            &db,
            "user-1",
            CreateTradeInput {
                account_id: account.id.clone(),
                market: Market::Stocks,
                symbol: "AAPL".to_string(),
                trade_type: TradeType::Long,
                entry_price: 180.0,
                exit_price: 185.0,
                stop_loss: None,
                take_profit: None,
                size: 10.0,
                risk_reward: Some("1:2".to_string()),
                profit_loss: 50.0,
                status: TradeStatus::Win,
                entry_date: 1_700_000_000,
                exit_date: 1_700_003_600,
                notes: None,
                image_url: None,
            },
        )
        .unwrap();

        create_journal(
            &db,
            "user-1",
            CreateJournalInput {
                account_id: account.id.clone(),
                title: "Week review".to_string(),
                content: "Solid week.".to_string(),
                date: 1_700_000_000,
            },
        )
        .unwrap();

        (db, account.id)
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let (db, _) = seeded_db();

        let snapshot = export_snapshot(&db, "user-1").unwrap();
        let json = snapshot_to_json(&snapshot).unwrap();
        let parsed = snapshot_from_json(&json).unwrap();

        assert_eq!(parsed.accounts.len(), 1);
        assert_eq!(parsed.trades.len(), 1);
        assert_eq!(parsed.journals.len(), 1);
        assert_eq!(parsed.accounts[0].balance, 1050.0);
    }

    #[test]
    fn import_into_empty_store_reproduces_entities() {
        let (db, account_id) = seeded_db();
        let snapshot = export_snapshot(&db, "user-1").unwrap();

        let fresh = Database::open_in_memory().unwrap();
        let summary = import_snapshot(&fresh, &snapshot).unwrap();
        assert_eq!(summary.imported, 3);
        assert_eq!(summary.skipped, 0);

        let restored = export_snapshot(&fresh, "user-1").unwrap();
        assert_eq!(restored.accounts[0].id, account_id);
        // Balance comes back verbatim, including the reconciled trade
        assert_eq!(restored.accounts[0].balance, 1050.0);
        assert_eq!(restored.trades[0].symbol, "AAPL");
    }

    #[test]
    fn import_skips_existing_records() {
        let (db, _) = seeded_db();
        let snapshot = export_snapshot(&db, "user-1").unwrap();

        let summary = import_snapshot(&db, &snapshot).unwrap();
        assert_eq!(summary.imported, 0);
        assert_eq!(summary.skipped, 3);
    }
}
