use super::{AssignmentRule, Direction, GroupRule, RuleError, Transfer, TransferLabel};

use anyhow::Result;
use chrono_tz::Europe::Berlin;

fn create_transfer(from: &str, to: &str, token: &str, amount: u64, timestamp: i64) -> Transfer {
    Transfer {
        from_address: from.to_string(),
        to_address: to.to_string(),
        token_name: token.to_string(),
        amount,
        timestamp,
        confirmed: true,
        comment: String::new()
    }
}

#[test]
fn test_assignment_rule_without_any_address_is_rejected() {
    let result = AssignmentRule::new(TransferLabel::Mining, None, None);

    assert!(matches!(result, Err(RuleError::MissingAddress)));
}

#[test]
fn test_group_rule_without_any_address_is_rejected() {
    let result = GroupRule::new("TokenX", None, None);

    assert!(matches!(result, Err(RuleError::MissingAddress)));
}

#[test]
fn test_assignment_rule_matches_on_its_configured_side() -> Result<()> {
    let sender_rule = AssignmentRule::new(TransferLabel::Mining, Some("Pool".to_string()), None)?;
    let receiver_rule = AssignmentRule::new(TransferLabel::Donation, None, Some("Charity".to_string()))?;

    let mined = create_transfer("Pool", "Wallet", "TokenX", 10, 1);
    let donated = create_transfer("Wallet", "Charity", "TokenX", 10, 2);

    assert!(sender_rule.matches(&mined));
    assert!(!sender_rule.matches(&donated));
    assert!(receiver_rule.matches(&donated));
    assert!(!receiver_rule.matches(&mined));

    Ok(())
}

#[test]
fn test_group_rule_resolves_direction_and_counterparty() -> Result<()> {
    let deposit_rule = GroupRule::new("TokenX", Some("Exchange".to_string()), None)?;
    let withdrawal_rule = GroupRule::new("TokenX", None, Some("Exchange".to_string()))?;

    let incoming = create_transfer("Exchange", "Wallet", "TokenX", 10, 1);
    let outgoing = create_transfer("Wallet", "Exchange", "TokenX", 10, 2);

    assert_eq!(deposit_rule.apply(&incoming), Some((Direction::Incoming, "Exchange".to_string())));
    assert_eq!(deposit_rule.apply(&outgoing), None);
    assert_eq!(withdrawal_rule.apply(&outgoing), Some((Direction::Outgoing, "Exchange".to_string())));
    assert_eq!(withdrawal_rule.apply(&incoming), None);

    Ok(())
}

#[test]
fn test_transfer_label_parses_snake_case_names() -> Result<()> {
    assert_eq!(serde_json::from_str::<TransferLabel>("\"gift_in\"")?, TransferLabel::GiftIn);
    assert_eq!(serde_json::from_str::<TransferLabel>("\"withdrawal\"")?, TransferLabel::Withdrawal);
    assert!(serde_json::from_str::<TransferLabel>("\"unheard_of\"").is_err());

    Ok(())
}

#[test]
fn test_transfer_date_renders_in_the_requested_timezone() {
    let transfer = create_transfer("A", "B", "TokenX", 1, 0);

    assert_eq!(transfer.date(Berlin), "1970-01-01 01:00:00");
    assert_eq!(transfer.date(chrono_tz::UTC), "1970-01-01 00:00:00");
}

#[test]
fn test_native_token_sentinel_is_recognized() {
    let native = create_transfer("A", "B", super::NATIVE_TOKEN, 1, 0);
    let token = create_transfer("A", "B", "TokenX", 1, 0);

    assert!(native.is_native());
    assert!(!token.is_native());
}
