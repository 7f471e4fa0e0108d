use crate::db::Database;
use crate::error::StoreError;
use crate::models::{CreateTradeInput, Trade, TradeFilters, UpdateTradeInput};
use crate::service::accounts::adjust_balance;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

/// Maps a database row to a Trade struct. Column order follows the
/// trades table definition.
pub(crate) fn map_row_to_trade(row: &rusqlite::Row) -> rusqlite::Result<Trade> {
    Ok(Trade {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        market: row.get(3)?,
        symbol: row.get(4)?,
        trade_type: row.get(5)?,
        entry_price: row.get(6)?,
        exit_price: row.get(7)?,
        stop_loss: row.get(8)?,
        take_profit: row.get(9)?,
        size: row.get(10)?,
        risk_reward: row.get(11)?,
        profit_loss: row.get(12)?,
        status: row.get(13)?,
        entry_date: row.get(14)?,
        exit_date: row.get(15)?,
        notes: row.get(16)?,
        image_url: row.get(17)?,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}

pub(crate) fn insert_trade_row(conn: &Connection, trade: &Trade) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO trades (
            id, user_id, account_id, market, symbol, trade_type,
            entry_price, exit_price, stop_loss, take_profit, size, risk_reward,
            profit_loss, status, entry_date, exit_date, notes, image_url,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            trade.id,
            trade.user_id,
            trade.account_id,
            trade.market,
            trade.symbol,
            trade.trade_type,
            trade.entry_price,
            trade.exit_price,
            trade.stop_loss,
            trade.take_profit,
            trade.size,
            trade.risk_reward,
            trade.profit_loss,
            trade.status,
            trade.entry_date,
            trade.exit_date,
            trade.notes,
            trade.image_url,
            trade.created_at,
            trade.updated_at
        ],
    )?;
    Ok(())
}

fn get_trade_tx(conn: &Connection, id: &str) -> Result<Trade, StoreError> {
    conn.query_row("SELECT * FROM trades WHERE id = ?", [id], map_row_to_trade)
        .optional()?
        .ok_or_else(|| StoreError::NotFound {
            entity: "trade",
            id: id.to_string(),
        })
}

pub fn list_trades(db: &Database, account_id: &str) -> Result<Vec<Trade>, StoreError> {
    let conn = db.lock()?;
    let mut stmt =
        conn.prepare("SELECT * FROM trades WHERE account_id = ? ORDER BY exit_date DESC")?;
    let trades = stmt
        .query_map([account_id], map_row_to_trade)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(trades)
}

pub fn list_trades_filtered(
    db: &Database,
    account_id: &str,
    filters: &TradeFilters,
) -> Result<Vec<Trade>, StoreError> {
    let conn = db.lock()?;

    let mut query = String::from("SELECT * FROM trades WHERE account_id = ?");
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(account_id.to_string())];

    if let Some(q) = &filters.query {
        query.push_str(" AND (symbol LIKE ? OR notes LIKE ?)");
        let pattern = format!("%{}%", q);
        params.push(Box::new(pattern.clone()));
        params.push(Box::new(pattern));
    }
    if let Some(market) = filters.market {
        query.push_str(" AND market = ?");
        params.push(Box::new(market));
    }
    if let Some(trade_type) = filters.trade_type {
        query.push_str(" AND trade_type = ?");
        params.push(Box::new(trade_type));
    }
    if let Some(status) = filters.status {
        query.push_str(" AND status = ?");
        params.push(Box::new(status));
    }
    if let Some(start_date) = filters.start_date {
        query.push_str(" AND exit_date >= ?");
        params.push(Box::new(start_date));
    }
    if let Some(end_date) = filters.end_date {
        query.push_str(" AND exit_date <= ?");
        params.push(Box::new(end_date));
    }

    query.push_str(" ORDER BY exit_date DESC");

    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&query)?;
    let trades = stmt
        .query_map(param_refs.as_slice(), map_row_to_trade)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(trades)
}

pub fn get_trade(db: &Database, id: &str) -> Result<Trade, StoreError> {
    let conn = db.lock()?;
    get_trade_tx(&conn, id)
}

/// Inserts the trade and applies its profit/loss to the account balance
/// in one transaction.
pub fn create_trade(
    db: &Database,
    user_id: &str,
    input: CreateTradeInput,
) -> Result<Trade, StoreError> {
    let now = Utc::now().timestamp();
    let trade = Trade {
        id: format!("TRADE-{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4()),
        user_id: user_id.to_string(),
        account_id: input.account_id,
        market: input.market,
        symbol: input.symbol,
        trade_type: input.trade_type,
        entry_price: input.entry_price,
        exit_price: input.exit_price,
        stop_loss: input.stop_loss,
        take_profit: input.take_profit,
        size: input.size,
        risk_reward: input.risk_reward,
        profit_loss: input.profit_loss,
        status: input.status,
        entry_date: input.entry_date,
        exit_date: input.exit_date,
        notes: input.notes,
        image_url: input.image_url,
        created_at: now,
        updated_at: now,
    };

    let conn = db.lock()?;
    let tx = conn.unchecked_transaction()?;

    insert_trade_row(&tx, &trade)?;
    if trade.profit_loss != 0.0 {
        adjust_balance(&tx, &trade.account_id, trade.profit_loss)?;
    }

    tx.commit()?;
    Ok(trade)
}

/// Partial update. When the edit provides `profit_loss`, the difference
/// against the stored value is applied to the account balance in the same
/// transaction; an edit without `profit_loss` leaves both untouched.
pub fn update_trade(
    db: &Database,
    id: &str,
    update: UpdateTradeInput,
) -> Result<Trade, StoreError> {
    {
        let conn = db.lock()?;
        let tx = conn.unchecked_transaction()?;

        let existing = get_trade_tx(&tx, id)?;

        let now = Utc::now().timestamp();
        let mut updates = vec!["updated_at = ?"];
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(now)];

        if let Some(market) = update.market {
            updates.push("market = ?");
            values.push(Box::new(market));
        }
        if let Some(symbol) = update.symbol {
            updates.push("symbol = ?");
            values.push(Box::new(symbol));
        }
        if let Some(trade_type) = update.trade_type {
            updates.push("trade_type = ?");
            values.push(Box::new(trade_type));
        }
        if let Some(entry_price) = update.entry_price {
            updates.push("entry_price = ?");
            values.push(Box::new(entry_price));
        }
        if let Some(exit_price) = update.exit_price {
            updates.push("exit_price = ?");
            values.push(Box::new(exit_price));
        }
        if let Some(stop_loss) = update.stop_loss {
            updates.push("stop_loss = ?");
            values.push(Box::new(stop_loss));
        }
        if let Some(take_profit) = update.take_profit {
            updates.push("take_profit = ?");
            values.push(Box::new(take_profit));
        }
        if let Some(size) = update.size {
            updates.push("size = ?");
            values.push(Box::new(size));
        }
        if let Some(risk_reward) = update.risk_reward {
            updates.push("risk_reward = ?");
            values.push(Box::new(risk_reward));
        }
        if let Some(profit_loss) = update.profit_loss {
            updates.push("profit_loss = ?");
            values.push(Box::new(profit_loss));
        }
        if let Some(status) = update.status {
            updates.push("status = ?");
            values.push(Box::new(status));
        }
        if let Some(entry_date) = update.entry_date {
            updates.push("entry_date = ?");
            values.push(Box::new(entry_date));
        }
        if let Some(exit_date) = update.exit_date {
            updates.push("exit_date = ?");
            values.push(Box::new(exit_date));
        }
        if let Some(notes) = update.notes {
            updates.push("notes = ?");
            values.push(Box::new(notes));
        }
        if let Some(image_url) = update.image_url {
            updates.push("image_url = ?");
            values.push(Box::new(image_url));
        }

        let query = format!("UPDATE trades SET {} WHERE id = ?", updates.join(", "));
        values.push(Box::new(id.to_string()));
        let params: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        tx.execute(&query, params.as_slice())?;

        if let Some(new_profit_loss) = update.profit_loss {
            let delta = new_profit_loss - existing.profit_loss;
            if delta != 0.0 {
                adjust_balance(&tx, &existing.account_id, delta)?;
            }
        }

        tx.commit()?;
    }

    get_trade(db, id)
}

/// Removes the trade and subtracts its profit/loss back out of the
/// account balance in one transaction.
pub fn delete_trade(db: &Database, id: &str) -> Result<(), StoreError> {
    let conn = db.lock()?;
    let tx = conn.unchecked_transaction()?;

    let existing = get_trade_tx(&tx, id)?;
    tx.execute("DELETE FROM trades WHERE id = ?", [id])?;
    if existing.profit_loss != 0.0 {
        adjust_balance(&tx, &existing.account_id, -existing.profit_loss)?;
    }

    tx.commit()?;
    Ok(())
}
