//! Service Integration Tests
//!
//! One section per engine resource. Besides the happy paths these check
//! that locally rejected input never reaches the engine.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use integration_tests::{
    log_json, rule_draft, rule_json, schedule_draft, unique_rule_draft, FakeEngine, BASE_USER_ID,
};
use serde_json::json;
use vmod_client::{
    KickTargetService, LogService, MemberListService, OverviewService, RuleService,
    ScheduleService, StackingPairService,
};
use vmod_common::ConsoleError;
use vmod_core::{
    DiscordId, DomainError, KickTargetDraft, KickTargetPatch, ListEntryDraft, ListType,
    LogFilterDraft, LogPage, RuleDraft, StackingPairDraft,
};

fn local_error(err: &ConsoleError) -> &DomainError {
    match err {
        ConsoleError::LocalValidation(e) => e,
        other => panic!("expected a local validation error, got {other:?}"),
    }
}

// ============================================================================
// Rules
// ============================================================================

#[tokio::test]
async fn test_create_rule_sends_normalized_body() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let draft = RuleDraft {
        name: "  Late night  ".to_string(),
        channel_ids: "111, 222 111 abc".to_string(),
        max_time_sec: "1800".to_string(),
        action_type: "move".to_string(),
        action_params: r#"{"channel_id": 333}"#.to_string(),
        target_list: "blacklist".to_string(),
        priority: "5".to_string(),
        ..RuleDraft::default()
    };
    let created = RuleService::new(&ctx).create_rule(&draft).await.unwrap();

    assert!(created.defaulted("channel_ids"));
    let body = engine.last_request().unwrap().body.unwrap();
    assert_eq!(body["name"], "Late night");
    assert_eq!(body["channel_ids"], json!([111, 222]));
    assert_eq!(body["max_time_sec"], 1800);
    assert_eq!(body["action_type"], "move");
    assert_eq!(body["action_params"], json!({ "channel_id": 333 }));
    assert_eq!(body["target_list"], "blacklist");
    assert_eq!(body["priority"], 5);
    assert_eq!(created.value.name, "Late night");
}

#[tokio::test]
async fn test_malformed_params_default_to_empty_object() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let draft = RuleDraft {
        action_params: "{not json".to_string(),
        ..rule_draft("Params")
    };
    let created = RuleService::new(&ctx).create_rule(&draft).await.unwrap();

    assert!(created.defaulted("action_params"));
    let body = engine.last_request().unwrap().body.unwrap();
    assert_eq!(body["action_params"], json!({}));
}

#[tokio::test]
async fn test_empty_rule_name_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let err = RuleService::new(&ctx)
        .create_rule(&rule_draft("   "))
        .await
        .unwrap_err();
    assert!(err.is_local());
    assert_eq!(engine.request_count(), 0);
}

#[tokio::test]
async fn test_toggle_twice_restores_state() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Toggle me", true));
    let ctx = engine.context().unwrap();
    let rules = RuleService::new(&ctx);

    let once = rules.toggle_rule(id).await.unwrap();
    assert!(!once.is_active);
    let twice = rules.toggle_rule(id).await.unwrap();
    assert!(twice.is_active);

    let toggles: Vec<_> = engine
        .requests()
        .into_iter()
        .filter(|r| r.method == "PATCH")
        .collect();
    assert_eq!(toggles.len(), 2);
    assert!(toggles.iter().all(|r| r.path == format!("/api/rules/{id}/toggle")));
    assert!(toggles.iter().all(|r| r.body.is_none()));
}

#[tokio::test]
async fn test_update_and_get_rule() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Before", true));
    let ctx = engine.context().unwrap();
    let rules = RuleService::new(&ctx);

    let existing = rules.get_rule(id).await.unwrap();
    let mut draft = RuleDraft::from_rule(&existing);
    draft.name = "After".to_string();
    rules.update_rule(id, &draft).await.unwrap();

    let request = engine.last_request().unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, format!("/api/rules/{id}"));
    assert_eq!(rules.get_rule(id).await.unwrap().name, "After");
}

#[tokio::test]
async fn test_delete_rule_then_not_found() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Doomed", true));
    let ctx = engine.context().unwrap();
    let rules = RuleService::new(&ctx);

    rules.delete_rule(id).await.unwrap();
    let err = rules.delete_rule(id).await.unwrap_err();
    assert!(err.is_not_found());
}

// ============================================================================
// Schedules
// ============================================================================

#[tokio::test]
async fn test_empty_cron_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Scheduled", true));
    let ctx = engine.context().unwrap();

    let err = ScheduleService::new(&ctx)
        .create_schedule(&schedule_draft(id, "   "))
        .await
        .unwrap_err();
    assert!(matches!(local_error(&err), DomainError::MissingCronExpression));
    assert_eq!(engine.request_count(), 0);
}

#[tokio::test]
async fn test_schedule_for_unknown_rule_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Known", true));
    let ctx = engine.context().unwrap();
    let schedules = ScheduleService::new(&ctx);

    let board = schedules.load_board().await.unwrap();
    engine.clear_requests();

    let err = schedules
        .create_schedule_for(&schedule_draft(id + 100, "0 22 * * *"), &board.rules)
        .await
        .unwrap_err();
    assert!(matches!(local_error(&err), DomainError::UnknownRule(_)));
    assert_eq!(engine.request_count(), 0);
}

#[tokio::test]
async fn test_create_schedule_and_board() {
    let engine = FakeEngine::start().await.unwrap();
    let id = engine.seed_rule(rule_json("Nightly", false));
    let ctx = engine.context().unwrap();
    let schedules = ScheduleService::new(&ctx);

    let schedule = schedules
        .create_schedule(&schedule_draft(id, "0 22 * * *"))
        .await
        .unwrap();
    assert_eq!(schedule.rule_id, id);
    assert_eq!(schedule.cron_expr, "0 22 * * *");

    let board = schedules.load_board().await.unwrap();
    assert_eq!(board.schedules.len(), 1);
    assert_eq!(board.rule_name(id), Some("Nightly"));

    schedules.delete_schedule(schedule.id).await.unwrap();
    assert!(schedules.list_schedules().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_board_fails_when_either_fetch_fails() {
    let engine = FakeEngine::start().await.unwrap();
    engine.seed_rule(rule_json("Nightly", true));
    let ctx = engine.context().unwrap();
    let schedules = ScheduleService::new(&ctx);

    engine.fail_next(500, r#"{"detail":"database unavailable"}"#);
    // Whichever of the two fetches lands first gets the 500
    let err = schedules.load_board().await.unwrap_err();
    assert!(matches!(
        &err,
        ConsoleError::RequestFailed { status: 500, message } if message == "database unavailable"
    ));

    // The failure was one-shot; the next load sees both lists again
    let board = schedules.load_board().await.unwrap();
    assert_eq!(board.rules.len(), 1);
}

// ============================================================================
// List Membership
// ============================================================================

#[tokio::test]
async fn test_add_list_and_remove_member() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();
    let members = MemberListService::new(&ctx);

    let draft = ListEntryDraft {
        discord_id: "123456789012345678".to_string(),
        username: "alice".to_string(),
        reason: String::new(),
    };
    members.add_member(&draft, ListType::Whitelist).await.unwrap();

    let whitelist = members.list_members(ListType::Whitelist).await.unwrap();
    assert_eq!(whitelist.len(), 1);
    assert_eq!(whitelist[0].display_name(), "alice");
    assert!(members.list_members(ListType::Blacklist).await.unwrap().is_empty());
    assert_eq!(
        engine.last_request().unwrap().query_param("list_type").as_deref(),
        Some("blacklist")
    );

    let id = DiscordId::new(123_456_789_012_345_678);
    members.remove_member(id, ListType::Whitelist).await.unwrap();
    let request = engine.last_request().unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/users/123456789012345678");
    assert_eq!(request.query_param("list_type").as_deref(), Some("whitelist"));
    assert!(engine.users().is_empty());
}

#[tokio::test]
async fn test_invalid_member_id_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let draft = ListEntryDraft {
        discord_id: "not-a-number".to_string(),
        ..ListEntryDraft::default()
    };
    let err = MemberListService::new(&ctx)
        .add_member(&draft, ListType::Blacklist)
        .await
        .unwrap_err();
    assert!(err.is_local());
    assert_eq!(engine.request_count(), 0);
}

#[tokio::test]
async fn test_bulk_all_invalid_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let err = MemberListService::new(&ctx)
        .bulk_add("abc\n\n  \n-5, bob\n", ListType::Blacklist)
        .await
        .unwrap_err();
    assert!(matches!(local_error(&err), DomainError::NoValidRows));
    assert_eq!(engine.request_count(), 0);
}

#[tokio::test]
async fn test_bulk_partial_sends_only_valid_lines() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let text = "111,alice,spam\nnot-an-id\n\n222\tbob\n";
    let outcome = MemberListService::new(&ctx)
        .bulk_add(text, ListType::Blacklist)
        .await
        .unwrap();

    assert_eq!(outcome.submitted, 2);
    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.dropped_lines, vec![2]);

    let request = engine.last_request().unwrap();
    assert_eq!(request.path, "/api/users/bulk");
    let entries = request.body.unwrap()["entries"].as_array().cloned().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["discord_id"], 111);
    assert_eq!(entries[0]["username"], "alice");
    assert_eq!(entries[0]["reason"], "spam");
    assert_eq!(entries[1]["discord_id"], 222);
    assert_eq!(entries[1]["list_type"], "blacklist");
}

// ============================================================================
// Audit Log
// ============================================================================

#[tokio::test]
async fn test_log_pagination() {
    let engine = FakeEngine::start().await.unwrap();
    engine.seed_logs(60, log_json);
    let ctx = engine.context().unwrap();
    let logs = LogService::new(&ctx);

    let filter = LogFilterDraft::default().to_filter(LogPage::default()).unwrap();
    let first = logs.query_logs(&filter).await.unwrap();
    assert_eq!(first.records.len(), 50);
    assert!(first.has_next());
    assert!(!first.has_prev());

    let next = first.next_page().unwrap();
    assert_eq!(next.offset, 50);
    let second = logs.query_logs(&filter.with_page(next)).await.unwrap();
    assert_eq!(second.records.len(), 10);
    assert!(!second.has_next());
    assert_eq!(second.prev_page().map(|p| p.offset), Some(0));

    let request = engine.last_request().unwrap();
    assert_eq!(request.query_param("offset").as_deref(), Some("50"));
    assert_eq!(request.query_param("limit").as_deref(), Some("50"));
}

#[tokio::test]
async fn test_log_filters_sent_only_when_set() {
    let engine = FakeEngine::start().await.unwrap();
    engine.seed_logs(60, log_json);
    let ctx = engine.context().unwrap();

    let draft = LogFilterDraft {
        discord_id: BASE_USER_ID.to_string(),
        action_type: "kick".to_string(),
        ..LogFilterDraft::default()
    };
    let filter = draft.to_filter(LogPage::new(0, 500)).unwrap();
    let page = LogService::new(&ctx).query_logs(&filter).await.unwrap();

    assert!(!page.records.is_empty());
    assert!(page
        .records
        .iter()
        .all(|r| r.discord_id == DiscordId::new(BASE_USER_ID)
            && r.action_type.as_deref() == Some("kick")));

    let keys: Vec<String> = engine
        .last_request()
        .unwrap()
        .query_pairs()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec!["discord_id", "action_type", "offset", "limit"]);
}

#[tokio::test]
async fn test_invalid_log_filter_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();

    let draft = LogFilterDraft {
        rule_id: "seven".to_string(),
        ..LogFilterDraft::default()
    };
    assert!(draft.to_filter(LogPage::default()).is_err());
    assert_eq!(engine.request_count(), 0);
}

// ============================================================================
// Dashboard & Stats
// ============================================================================

#[tokio::test]
async fn test_dashboard_and_stats() {
    let engine = FakeEngine::start().await.unwrap();
    engine.seed_rule(rule_json("On", true));
    engine.seed_rule(rule_json("Off", false));
    engine.seed_logs(12, log_json);
    let ctx = engine.context().unwrap();
    let overview = OverviewService::new(&ctx);

    let dashboard = overview.dashboard().await.unwrap();
    assert_eq!(dashboard.active_rules.len(), 1);
    assert_eq!(dashboard.recent_logs.len(), 10);
    assert_eq!(dashboard.voice_online_count, Some(7));

    let stats = overview.stats_overview().await.unwrap();
    assert_eq!(stats.total_actions, 12);
    assert_eq!(stats.actions_by_type.get("kick"), Some(&6));

    let user = overview.user_stats(DiscordId::new(BASE_USER_ID)).await.unwrap();
    assert_eq!(user.total_actions, 4);
    assert_eq!(
        engine.last_request().unwrap().path,
        format!("/api/stats/user/{BASE_USER_ID}")
    );
}

// ============================================================================
// Kick Targets
// ============================================================================

#[tokio::test]
async fn test_kick_target_lifecycle() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();
    let targets = KickTargetService::new(&ctx);

    let draft = KickTargetDraft {
        discord_id: "424242".to_string(),
        username: "lurker".to_string(),
        timeout_sec: String::new(),
    };
    let target = targets.create_kick_target(&draft).await.unwrap();
    assert_eq!(target.timeout_sec, 3600);
    assert!(target.is_active);

    let id = DiscordId::new(424_242);
    let patch = KickTargetPatch {
        is_active: Some(false),
        ..KickTargetPatch::default()
    };
    let updated = targets.update_kick_target(id, &patch).await.unwrap();
    assert!(!updated.is_active);
    assert_eq!(updated.timeout_sec, 3600);
    assert_eq!(
        engine.last_request().unwrap().body,
        Some(json!({ "is_active": false }))
    );

    let duplicate = targets.create_kick_target(&draft).await.unwrap_err();
    assert_eq!(duplicate.status_code(), Some(409));

    targets.delete_kick_target(id).await.unwrap();
    assert!(targets.get_kick_target(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_kick_target_bounds_checked_locally() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();
    let targets = KickTargetService::new(&ctx);

    let draft = KickTargetDraft {
        discord_id: "424242".to_string(),
        username: String::new(),
        timeout_sec: "30".to_string(),
    };
    assert!(targets.create_kick_target(&draft).await.unwrap_err().is_local());

    let empty = KickTargetPatch::default();
    let err = targets
        .update_kick_target(DiscordId::new(424_242), &empty)
        .await
        .unwrap_err();
    assert!(err.is_local());
    assert_eq!(engine.request_count(), 0);
}

// ============================================================================
// Stacking Pairs
// ============================================================================

#[tokio::test]
async fn test_stacking_pair_lifecycle() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();
    let pairs = StackingPairService::new(&ctx);

    let draft = StackingPairDraft {
        user_id_1: "1001".to_string(),
        user_id_2: "1002".to_string(),
        target_channel_id: "2001".to_string(),
    };
    let pair = pairs.create_stacking_pair(&draft).await.unwrap();
    assert!(pair.involves(DiscordId::new(1002)));

    let toggled = pairs.toggle_stacking_pair(pair.id).await.unwrap();
    assert!(!toggled.is_active);
    assert_eq!(pairs.list_stacking_pairs().await.unwrap().len(), 1);

    pairs.delete_stacking_pair(pair.id).await.unwrap();
    assert!(pairs.list_stacking_pairs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_same_user_pair_sends_nothing() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();

    let draft = StackingPairDraft {
        user_id_1: "1001".to_string(),
        user_id_2: " 1001 ".to_string(),
        target_channel_id: "2001".to_string(),
    };
    let err = StackingPairService::new(&ctx)
        .create_stacking_pair(&draft)
        .await
        .unwrap_err();
    assert!(matches!(local_error(&err), DomainError::SameUserPair));
    assert_eq!(engine.request_count(), 0);
}

// ============================================================================
// Mutation Then Refresh
// ============================================================================

#[tokio::test]
async fn test_list_reflects_mutation() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();
    let rules = RuleService::new(&ctx);

    let created = rules.create_rule(&unique_rule_draft()).await.unwrap();
    let listed = rules.list_rules().await.unwrap();
    assert!(listed.iter().any(|r| r.id == created.value.id));
}

#[tokio::test]
async fn test_cancelled_view_discards_result() {
    let engine = FakeEngine::start().await.unwrap();
    let ctx = engine.context().unwrap();
    let token = tokio_util::sync::CancellationToken::new();
    token.cancel();

    let result = vmod_client::unless_cancelled(&token, RuleService::new(&ctx).list_rules()).await;
    assert!(result.is_none());
}
