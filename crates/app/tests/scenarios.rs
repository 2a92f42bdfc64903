//! End-to-end scenarios from the specification's testable-properties
//! section, exercised against a real `Dispatcher` wired to in-process
//! infra adapters rather than against any single use case in isolation.

use rendezvous_app::{AppDeps, Dispatcher};
use rendezvous_core::ports::ConnectionPort;
use rendezvous_core::{InboundEvent, MatchmakingConfig, OutboundEvent, Preferences, Session, Tier};
use rendezvous_infra::{InMemoryBlockStore, StaticIdentityStore, WordListModerator};
use std::sync::Arc;
use std::time::Duration;

fn session(tag: &str, user: &str) -> Session {
    Session::new(tag.into(), user.into(), Tier::Free)
}

fn deps() -> Arc<AppDeps> {
    Arc::new(AppDeps::new(
        Arc::new(StaticIdentityStore::new()),
        Arc::new(InMemoryBlockStore::new()),
        Arc::new(WordListModerator::default()),
        MatchmakingConfig::default(),
    ))
}

async fn find_match(dispatcher: &Dispatcher, session: &Session) {
    dispatcher
        .dispatch(
            session,
            InboundEvent::FindMatch {
                user_id: session.user_id.clone(),
                preferences: Preferences::default(),
            },
        )
        .await;
}

/// Scenario 1: two-peer happy path.
#[tokio::test]
async fn two_peer_happy_path() {
    let deps = deps();
    let dispatcher = Dispatcher::new(deps.clone());
    let s1 = session("s1", "u1");
    let s2 = session("s2", "u2");
    let mut rx1 = deps.registry.register(s1.clone());
    let mut rx2 = deps.registry.register(s2.clone());

    find_match(&dispatcher, &s1).await;
    find_match(&dispatcher, &s2).await;

    let found1 = tokio::time::timeout(Duration::from_secs(2), rx1.recv())
        .await
        .expect("s1 should hear match-found promptly");
    let found2 = tokio::time::timeout(Duration::from_secs(2), rx2.recv())
        .await
        .expect("s2 should hear match-found promptly");

    match (found1, found2) {
        (
            Some(OutboundEvent::MatchFound { match_session_id: m1, .. }),
            Some(OutboundEvent::MatchFound { match_session_id: m2, .. }),
        ) => {
            assert_eq!(m1, s2.id);
            assert_eq!(m2, s1.id);
        }
        other => panic!("expected match-found on both sides, got {other:?}"),
    }

    assert_eq!(deps.pairing.partner_of(&s1.id), Some(s2.id.clone()));
    assert_eq!(deps.pairing.partner_of(&s2.id), Some(s1.id.clone()));
    assert_eq!(deps.queue.len(), 0);
}

/// Scenario 2: a mutual block keeps both sides queued forever.
#[tokio::test]
async fn block_filter_prevents_a_match() {
    let block_store = Arc::new(InMemoryBlockStore::new());
    block_store.block("u1".into(), "u2".into());
    let deps = Arc::new(AppDeps::new(
        Arc::new(StaticIdentityStore::new()),
        block_store,
        Arc::new(WordListModerator::default()),
        MatchmakingConfig::default(),
    ));
    let dispatcher = Dispatcher::new(deps.clone());

    let s1 = session("s1", "u1");
    let s2 = session("s2", "u2");
    let _rx1 = deps.registry.register(s1.clone());
    let _rx2 = deps.registry.register(s2.clone());

    find_match(&dispatcher, &s2).await;
    find_match(&dispatcher, &s1).await;

    // Give both drivers a few poll ticks to find each other, which they must not.
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert!(!deps.pairing.is_paired(&s1.id));
    assert!(!deps.pairing.is_paired(&s2.id));
    assert_eq!(deps.queue.len(), 2);
}

/// Scenario 3: skip with auto-requeue re-enqueues both sides, and a third
/// waiting session gets picked up by one of them.
#[tokio::test]
async fn skip_with_auto_requeue_feeds_a_waiting_third_session() {
    let deps = deps();
    let dispatcher = Dispatcher::new(deps.clone());
    let s1 = session("s1", "u1");
    let s2 = session("s2", "u2");
    let s3 = session("s3", "u3");
    let mut rx1 = deps.registry.register(s1.clone());
    let mut rx2 = deps.registry.register(s2.clone());
    let _rx3 = deps.registry.register(s3.clone());

    deps.pairing.try_pair(s1.id.clone(), s2.id.clone());
    find_match(&dispatcher, &s3).await;

    dispatcher
        .dispatch(
            &s1,
            InboundEvent::Skip {
                user_id: None,
                preferences: None,
                auto_requeue: true,
            },
        )
        .await;

    let mut saw_match_ended_s1 = false;
    let mut saw_match_ended_s2 = false;
    for _ in 0..4 {
        if let Ok(Some(OutboundEvent::MatchEnded { disconnected, .. })) =
            tokio::time::timeout(Duration::from_millis(200), rx1.recv()).await
        {
            saw_match_ended_s1 = saw_match_ended_s1 || disconnected;
        }
        if let Ok(Some(OutboundEvent::MatchEnded { disconnected, .. })) =
            tokio::time::timeout(Duration::from_millis(200), rx2.recv()).await
        {
            saw_match_ended_s2 = saw_match_ended_s2 || disconnected;
        }
    }
    assert!(saw_match_ended_s1 && saw_match_ended_s2);

    tokio::time::sleep(Duration::from_millis(deps.config.requeue_delay_ms + 900)).await;

    // Every session ends up paired with someone: the third session could not
    // have stayed queued alone once two auto-requeued sessions arrived.
    assert!(deps.pairing.is_paired(&s3.id));
}

/// Scenario 4: two racing `TryPair` calls against the same target session —
/// exactly one wins.
#[tokio::test]
async fn double_match_race_exactly_one_try_pair_wins() {
    let deps = deps();
    let pairing = deps.pairing.clone();

    let p1 = pairing.clone();
    let p2 = pairing.clone();
    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { p1.try_pair("s1".into(), "s3".into()) }),
        tokio::spawn(async move { p2.try_pair("s2".into(), "s3".into()) }),
    );

    let outcomes = [r1.unwrap(), r2.unwrap()];
    let wins = outcomes
        .iter()
        .filter(|o| matches!(o, rendezvous_app::pairing::PairOutcome::Paired(_)))
        .count();
    assert_eq!(wins, 1, "exactly one of the two racing TryPair calls must succeed");
    assert!(pairing.is_paired(&"s3".into()));
}

/// Scenario 5: a moderator veto reaches only the sender.
#[tokio::test]
async fn moderator_veto_reaches_only_the_sender() {
    let deps = Arc::new(AppDeps::new(
        Arc::new(StaticIdentityStore::new()),
        Arc::new(InMemoryBlockStore::new()),
        Arc::new(WordListModerator::new(vec!["banned".to_string()])),
        MatchmakingConfig::default(),
    ));
    let dispatcher = Dispatcher::new(deps.clone());
    let s1 = session("s1", "u1");
    let s2 = session("s2", "u2");
    let mut rx1 = deps.registry.register(s1.clone());
    let mut rx2 = deps.registry.register(s2.clone());
    deps.pairing.try_pair(s1.id.clone(), s2.id.clone());

    dispatcher
        .dispatch(
            &s1,
            InboundEvent::SendMessage {
                message: "this text is banned".to_string(),
            },
        )
        .await;

    assert!(matches!(
        rx1.recv().await,
        Some(OutboundEvent::MessageBlocked { .. })
    ));
    tokio::time::timeout(Duration::from_millis(50), rx2.recv())
        .await
        .expect_err("partner must receive nothing for a vetoed message");
}

/// Scenario 6: disconnect mid-pair tears down the pairing and notifies the
/// surviving peer, without touching the queue.
#[tokio::test]
async fn disconnect_mid_pair_notifies_the_survivor() {
    let deps = deps();
    let dispatcher = Dispatcher::new(deps.clone());
    let s1 = session("s1", "u1");
    let s2 = session("s2", "u2");
    let _rx1 = deps.registry.register(s1.clone());
    let mut rx2 = deps.registry.register(s2.clone());
    deps.pairing.try_pair(s1.id.clone(), s2.id.clone());

    dispatcher.disconnect(&s1.id).await;

    match rx2.recv().await {
        Some(OutboundEvent::MatchEnded { disconnected, .. }) => assert!(disconnected),
        other => panic!("expected match-ended, got {other:?}"),
    }
    assert!(!deps.pairing.is_paired(&s2.id));
    assert_eq!(deps.queue.len(), 0);
    assert!(!deps.registry.is_connected(&s1.id).await);
}
