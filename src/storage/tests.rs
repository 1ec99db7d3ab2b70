use super::{SessionReport, SessionStorage, Storage};
use crate::clock::ManualClock;
use crate::session::{Credentials, Session, SessionSettings, DASHBOARD_RECENT_LIMIT};
use crate::types::{Gateway, SessionView};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

fn logged_in_session(clock: Arc<ManualClock>, profile_name: &str) -> Result<Session> {
    let settings = SessionSettings {
        profile_name: profile_name.to_string(),
        seed: Some(5),
        ..SessionSettings::default()
    };
    let mut session = Session::new(clock.clone(), settings);

    session.submit_credentials(&Credentials::new("user@example.com", "secret", ""))?;
    clock.advance(Duration::from_millis(1500));
    session.tick();

    Ok(session)
}

#[test]
fn test_storage_basic_load_and_save_operations() -> Result<()> {
    let storage = SessionStorage::new();

    assert!(storage.load(99).is_none());

    let mut report = SessionReport::new(1);
    report.logged_in = true;
    report.balance = Some(Decimal::from_str("49900.00")?);
    storage.save(1, report);

    let retrieved_report = storage.load(1).ok_or_else(|| anyhow!("Report not found in storage"))?;

    assert_eq!(retrieved_report.session_id, 1);
    assert_eq!(retrieved_report.balance.map(|balance| balance.to_string()), Some("49900.00".to_string()));

    Ok(())
}

#[test]
fn test_storage_sorted_orders_by_session_id() {
    let storage = SessionStorage::new();
    storage.save(3, SessionReport::new(3));
    storage.save(1, SessionReport::new(1));
    storage.save(2, SessionReport::new(2));

    let ids: Vec<_> = storage.sorted().into_iter().map(|report| report.session_id).collect();

    assert_eq!(storage.iter().count(), 3);
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_storage_enforces_correct_overwrite_semantics() -> Result<()> {
    let storage = SessionStorage::new();

    storage.save(1, SessionReport::new(1));

    let mut report_version_2 = storage.load(1).ok_or_else(|| anyhow!("Report v1 missing"))?;
    report_version_2.alerts.push("Passwords do not match".to_string());
    storage.save(1, report_version_2);

    let final_report = storage.load(1).ok_or_else(|| anyhow!("Final report version missing"))?;

    assert_eq!(final_report.alerts, vec!["Passwords do not match".to_string()]);
    assert_eq!(storage.iter().count(), 1);

    Ok(())
}

#[test]
fn test_capture_reports_profile_name_and_dashboard_slice() -> Result<()> {
    let clock = Arc::new(ManualClock::new());
    let mut session = logged_in_session(clock.clone(), "Rahim Uddin")?;

    for _ in 0..6 {
        session.select_gateway(Gateway::Nagad)?;
        session.set_account_number("01800000000")?;
        session.set_amount("100")?;
        session.submit_withdrawal()?;
        clock.advance(Duration::from_millis(5500));
        session.tick();
    }
    session.navigate(SessionView::History)?;

    let report = SessionReport::capture(3, &session, Vec::new());
    let newest: Vec<_> = report.transactions.iter().take(DASHBOARD_RECENT_LIMIT).map(|tx| tx.id.clone()).collect();

    assert!(report.logged_in);
    assert_eq!(report.profile_name.as_deref(), Some("Rahim Uddin"));
    assert_eq!(report.view, Some(SessionView::History));
    assert_eq!(report.balance, Some(Decimal::from_str("49400.00")?));
    assert_eq!(report.transactions.len(), 6);
    assert_eq!(report.recent.len(), DASHBOARD_RECENT_LIMIT);
    assert_eq!(report.recent, newest);

    Ok(())
}

#[test]
fn test_capture_of_logged_out_session_has_no_wallet_fields() -> Result<()> {
    let clock = Arc::new(ManualClock::new());
    let mut session = logged_in_session(clock, "Rahim Uddin")?;
    session.logout()?;

    let report = SessionReport::capture(4, &session, vec!["Passwords do not match".to_string()]);

    assert!(!report.logged_in);
    assert_eq!(report.profile_name, None);
    assert_eq!(report.view, None);
    assert_eq!(report.balance, None);
    assert!(report.transactions.is_empty());
    assert!(report.recent.is_empty());
    assert_eq!(report.alerts.len(), 1);

    Ok(())
}
