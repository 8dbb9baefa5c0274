//! Lifecycle tests for SessionManager against the scripted service.

use std::sync::Arc;

use super::*;
use crate::scripted::ScriptedService;
use crate::{AiError, GenerationParams, SYSTEM_INSTRUCTION};

fn manager_with(service: &ScriptedService) -> SessionManager {
    SessionManager::new(Arc::new(service.clone()))
}

fn params() -> GenerationParams {
    GenerationParams::new(0.7, 5)
}

#[tokio::test]
async fn reset_without_session_is_a_noop() {
    let service = ScriptedService::new();
    let manager = manager_with(&service);

    manager.reset().await;
    manager.reset().await;

    assert_eq!(manager.state().await, SessionState::NoSession);
    assert_eq!(service.destroyed(), 0);
}

#[tokio::test]
async fn first_submit_creates_session_lazily() {
    let service = ScriptedService::new();
    service.push_reply("Wear a trench coat.");
    let manager = manager_with(&service);

    assert_eq!(service.created(), 0);
    let reply = manager.ensure_and_submit("what to wear?", params()).await.unwrap();

    assert_eq!(reply, "Wear a trench coat.");
    assert_eq!(service.created(), 1);
    assert_eq!(service.prompts(), vec!["what to wear?".to_string()]);
    assert_eq!(manager.state().await, SessionState::HasSession);
    assert_eq!(manager.current_params().await, Some(params()));
}

#[tokio::test]
async fn session_is_created_with_system_instruction_and_params() {
    let service = ScriptedService::new();
    let manager = manager_with(&service);

    manager.ensure_and_submit("hi", params()).await.unwrap();

    let configs = service.configs();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].system_instruction, SYSTEM_INSTRUCTION);
    assert_eq!(configs[0].params, params());
}

#[tokio::test]
async fn custom_system_instruction_is_forwarded() {
    let service = ScriptedService::new();
    let manager = manager_with(&service).with_system_instruction("be brief");

    manager.ensure_and_submit("hi", params()).await.unwrap();

    assert_eq!(service.configs()[0].system_instruction, "be brief");
}

#[tokio::test]
async fn repeated_submits_reuse_the_session() {
    let service = ScriptedService::new();
    let manager = manager_with(&service);

    manager.ensure_and_submit("one", params()).await.unwrap();
    manager.ensure_and_submit("two", params()).await.unwrap();

    assert_eq!(service.created(), 1);
    assert_eq!(manager.sessions_created(), 1);
    assert_eq!(service.prompts().len(), 2);
}

#[tokio::test]
async fn reset_after_param_change_forces_new_session() {
    let service = ScriptedService::new();
    let manager = manager_with(&service);

    manager.ensure_and_submit("one", params()).await.unwrap();
    manager.reset().await;
    assert_eq!(service.destroyed(), 1);

    let changed = GenerationParams::new(0.2, 5);
    manager.ensure_and_submit("two", changed).await.unwrap();

    assert_eq!(service.created(), 2);
    assert_eq!(service.configs()[1].params, changed);
}

#[tokio::test]
async fn changed_params_without_reset_still_replace_session() {
    let service = ScriptedService::new();
    let manager = manager_with(&service);

    manager.ensure_and_submit("one", params()).await.unwrap();
    let changed = GenerationParams::new(0.7, 40);
    manager.ensure_and_submit("two", changed).await.unwrap();

    assert_eq!(service.created(), 2);
    assert_eq!(service.destroyed(), 1);
    assert_eq!(manager.current_params().await, Some(changed));
}

#[tokio::test]
async fn creation_failure_leaves_no_session_and_is_returned_unchanged() {
    let service = ScriptedService::new();
    service.fail_next_create(AiError::Api("quota exceeded".into()));
    let manager = manager_with(&service);

    let err = manager.ensure_and_submit("hi", params()).await.unwrap_err();
    assert_eq!(err, AiError::Api("quota exceeded".into()));
    assert_eq!(manager.state().await, SessionState::NoSession);

    manager.ensure_and_submit("again", params()).await.unwrap();
    assert_eq!(service.created(), 1);
    assert_eq!(manager.sessions_created(), 1);
}

#[tokio::test]
async fn prompt_failure_destroys_session_and_next_submit_recreates() {
    let service = ScriptedService::new();
    service.fail_next_prompt(AiError::RateLimited);
    let manager = manager_with(&service);

    let err = manager.ensure_and_submit("hi", params()).await.unwrap_err();
    assert_eq!(err, AiError::RateLimited);
    assert_eq!(service.destroyed(), 1);
    assert_eq!(manager.state().await, SessionState::NoSession);

    manager.ensure_and_submit("again", params()).await.unwrap();
    assert_eq!(service.created(), 2);
}

#[tokio::test]
async fn destroy_failure_still_clears_session() {
    let service = ScriptedService::new();
    service.fail_destroy();
    let manager = manager_with(&service);

    manager.ensure_and_submit("hi", params()).await.unwrap();
    manager.reset().await;

    assert_eq!(service.destroyed(), 1);
    assert_eq!(manager.state().await, SessionState::NoSession);
}

#[tokio::test]
async fn overlapping_submit_is_rejected_as_busy() {
    let (service, gate) = ScriptedService::gated();
    let manager = Arc::new(manager_with(&service));

    let first = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.ensure_and_submit("first", params()).await })
    };
    while !manager.is_busy() {
        tokio::task::yield_now().await;
    }

    let second = manager.ensure_and_submit("second", params()).await;
    assert_eq!(second.unwrap_err(), AiError::Busy);

    gate.open();
    assert_eq!(first.await.unwrap().unwrap(), "ok");
    assert_eq!(service.created(), 1);
    assert_eq!(service.destroyed(), 0);
    assert_eq!(service.prompts(), vec!["first".to_string()]);
    assert!(manager.has_session().await);
    assert!(!manager.is_busy());
}

#[tokio::test]
async fn reset_waits_for_in_flight_prompt() {
    let (service, gate) = ScriptedService::gated();
    let manager = Arc::new(manager_with(&service));

    let first = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.ensure_and_submit("first", params()).await })
    };
    while service.prompts().is_empty() {
        tokio::task::yield_now().await;
    }

    let reset = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.reset().await })
    };
    gate.open();

    assert!(first.await.unwrap().is_ok());
    reset.await.unwrap();
    assert_eq!(service.destroyed(), 1);
    assert_eq!(manager.state().await, SessionState::NoSession);
}
