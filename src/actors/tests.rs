use super::SessionActor;
use crate::clock::{ClockMode, ManualClock};
use crate::session::{Credentials, SessionSettings, WalletEvent};
use crate::storage::SessionStorage;
use crate::types::{Gateway, SessionView};
use anyhow::{anyhow, Result};
use std::sync::Arc;

fn login_events() -> Vec<WalletEvent> {
    vec![WalletEvent::SubmitCredentials(Credentials::new("user@example.com", "secret", ""))]
}

fn withdrawal_events(gateway: Gateway, amount: &str) -> Vec<WalletEvent> {
    vec![
        WalletEvent::QuickWithdraw(gateway),
        WalletEvent::SetAccountNumber("01700000000".to_string()),
        WalletEvent::SetAmount(amount.to_string()),
        WalletEvent::SubmitWithdrawal,
    ]
}

fn send_all(actor: &SessionActor, events: &[WalletEvent]) -> Result<()> {
    for event in events {
        if !actor.accept(event) {
            return Err(anyhow!("Actor rejected event [{}]", event.name()))
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_actor_isolation_and_storage_persistence() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());

    let actor_session_1 = SessionActor::new(1, storage.clone(), ClockMode::Virtual.create(), SessionSettings::default());
    let actor_session_2 = SessionActor::new(2, storage.clone(), ClockMode::Virtual.create(), SessionSettings::default());

    send_all(&actor_session_1, &login_events())?;
    send_all(&actor_session_2, &login_events())?;
    send_all(&actor_session_1, &withdrawal_events(Gateway::BKash, "100"))?;
    send_all(&actor_session_2, &withdrawal_events(Gateway::Nagad, "2000"))?;
    send_all(&actor_session_1, &withdrawal_events(Gateway::Rocket, "400"))?;

    actor_session_1.despawn().await?;
    actor_session_2.despawn().await?;

    let report_session_1 = storage.load(1).ok_or_else(|| anyhow!("Session 1 missing from storage"))?;
    let report_session_2 = storage.load(2).ok_or_else(|| anyhow!("Session 2 missing from storage"))?;

    assert_eq!(report_session_1.balance.map(|b| b.to_string()), Some("49500.00".to_string()));
    assert_eq!(report_session_1.transactions.len(), 2);
    assert_eq!(report_session_1.transactions[0].gateway, Gateway::Rocket);
    assert_eq!(report_session_2.balance.map(|b| b.to_string()), Some("48000.00".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_actor_maintains_resilience_to_validation_errors() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    let actor = SessionActor::new(1, storage.clone(), Arc::new(ManualClock::new()), SessionSettings::default());

    // Valid -> Invalid (Insufficient Funds) -> Valid
    send_all(&actor, &login_events())?;
    send_all(&actor, &withdrawal_events(Gateway::BKash, "100"))?;
    send_all(&actor, &withdrawal_events(Gateway::BKash, "999999"))?;
    send_all(&actor, &withdrawal_events(Gateway::BKash, "200"))?;
    send_all(&actor, &[WalletEvent::Navigate(SessionView::History)])?;

    actor.despawn().await?;

    let report = storage.load(1).ok_or_else(|| anyhow!("Session missing from storage"))?;

    assert_eq!(report.balance.map(|b| b.to_string()), Some("49700.00".to_string()));
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.alerts.len(), 1);
    assert!(report.alerts[0].contains("Insufficient balance"));

    Ok(())
}

#[tokio::test]
async fn test_actor_reports_logged_out_session_without_balance() -> Result<()> {
    let storage = Arc::new(SessionStorage::new());
    let actor = SessionActor::new(7, storage.clone(), ClockMode::Virtual.create(), SessionSettings::default());

    send_all(&actor, &login_events())?;
    send_all(&actor, &withdrawal_events(Gateway::Nagad, "100"))?;
    send_all(&actor, &[WalletEvent::Logout, WalletEvent::Logout])?;

    actor.despawn().await?;

    let report = storage.load(7).ok_or_else(|| anyhow!("Session missing from storage"))?;

    assert!(!report.logged_in);
    assert!(report.balance.is_none());
    assert!(report.transactions.is_empty());
    assert!(report.alerts.is_empty());

    Ok(())
}
