use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Demo,
    Live,
    #[serde(rename = "Prop Firm")]
    PropFirm,
    Other,
}

text_enum!(AccountType {
    Demo => "Demo",
    Live => "Live",
    PropFirm => "Prop Firm",
    Other => "Other",
});

/// An isolated ledger a user tracks independently (demo vs. live, etc).
///
/// Intended invariant: `balance == initial_balance + sum(profit_loss)` over
/// the account's trades. `reset_balance` re-anchors both fields at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub initial_balance: f64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountInput {
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub initial_balance: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prop_firm_uses_spaced_label() {
        assert_eq!(AccountType::PropFirm.as_str(), "Prop Firm");
        let parsed: AccountType = "Prop Firm".parse().unwrap();
        assert_eq!(parsed, AccountType::PropFirm);
        let json = serde_json::to_string(&AccountType::PropFirm).unwrap();
        assert_eq!(json, "\"Prop Firm\"");
    }
}
