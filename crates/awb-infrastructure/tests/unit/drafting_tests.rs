//! Rule drafting service tests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use awb_domain::error::{Error, Result};
use awb_domain::ports::{RuleAdvisor, RuleDraft};
use awb_domain::rules::{CoRunMode, RuleKind};
use awb_domain::{Rule, Snapshot};
use awb_infrastructure::{DraftOutcome, NullRuleAdvisor, RuleDraftingService};
use awb_validate::RuleRegistry;

enum Reply {
    Draft(RuleDraft),
    Fail,
    Hang,
}

struct StubAdvisor {
    reply: Reply,
}

#[async_trait]
impl RuleAdvisor for StubAdvisor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn draft_rule(&self, _request: &str, _snapshot: &Snapshot) -> Result<Option<RuleDraft>> {
        match &self.reply {
            Reply::Draft(draft) => Ok(Some(draft.clone())),
            Reply::Fail => Err(Error::advisor("connection refused")),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(None)
            }
        }
    }

    async fn explain_rule(&self, rule: &Rule) -> Result<Option<String>> {
        match &self.reply {
            Reply::Fail => Err(Error::advisor("connection refused")),
            _ => Ok(Some(format!("{} keeps its tasks together", rule.name))),
        }
    }
}

fn co_run_draft(name: &str, tasks: &[&str]) -> RuleDraft {
    RuleDraft {
        name: name.to_string(),
        description: None,
        priority: Some(70),
        kind: RuleKind::CoRun {
            tasks: tasks.iter().map(|t| (*t).to_string()).collect(),
            mode: CoRunMode::Together,
        },
    }
}

fn service(reply: Reply) -> RuleDraftingService {
    RuleDraftingService::new(Arc::new(StubAdvisor { reply }), Duration::from_millis(200))
}

#[tokio::test]
async fn test_valid_draft_is_accepted() {
    let service = service(Reply::Draft(co_run_draft("Pair T1 and T2", &["T1", "T2"])));

    let outcome = service
        .draft("run T1 with T2", &Snapshot::default(), &RuleRegistry::new())
        .await
        .unwrap();

    assert!(outcome.is_accepted());
    assert_eq!(outcome.rule().priority, 70);
}

#[tokio::test]
async fn test_conflicting_draft_is_rejected() {
    let existing = Rule::new(
        "Pair T1 and T3",
        RuleKind::CoRun {
            tasks: vec!["T1".to_string(), "T3".to_string()],
            mode: CoRunMode::Together,
        },
    );
    let registry = RuleRegistry::from_rules([existing]).unwrap();
    let service = service(Reply::Draft(co_run_draft("Pair T1 and T2", &["T1", "T2"])));

    let outcome = service
        .draft("run T1 with T2", &Snapshot::default(), &registry)
        .await
        .unwrap();

    match outcome {
        DraftOutcome::Rejected { reasons, .. } => {
            assert_eq!(reasons.len(), 1);
            assert!(reasons[0].contains("T1"));
        }
        DraftOutcome::Accepted(rule) => panic!("conflicting draft accepted: {}", rule.name),
    }
}

#[tokio::test]
async fn test_structurally_invalid_draft_is_rejected() {
    let service = service(Reply::Draft(co_run_draft("Lonely", &["T1", "T1"])));

    let outcome = service
        .draft("run T1 with itself", &Snapshot::default(), &RuleRegistry::new())
        .await
        .unwrap();

    assert!(!outcome.is_accepted());
}

#[tokio::test]
async fn test_advisor_failure_degrades_to_none() {
    let service = service(Reply::Fail);
    let snapshot = Snapshot::default();

    assert!(service.draft("anything", &snapshot, &RuleRegistry::new()).await.is_none());
    let rule = co_run_draft("Pair", &["T1", "T2"]).into_rule();
    assert!(service.explain(&rule).await.is_none());
}

#[tokio::test]
async fn test_advisor_timeout_degrades_to_none() {
    let service = service(Reply::Hang);
    let outcome = service
        .draft("anything", &Snapshot::default(), &RuleRegistry::new())
        .await;
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_explanation_passes_through() {
    let service = service(Reply::Draft(co_run_draft("Pair", &["T1", "T2"])));
    let rule = co_run_draft("Pair", &["T1", "T2"]).into_rule();
    assert_eq!(
        service.explain(&rule).await.as_deref(),
        Some("Pair keeps its tasks together")
    );
}

#[tokio::test]
async fn test_null_advisor_never_recommends() {
    let service = RuleDraftingService::new(Arc::new(NullRuleAdvisor::new()), Duration::from_secs(1));
    assert!(
        service
            .draft("anything", &Snapshot::default(), &RuleRegistry::new())
            .await
            .is_none()
    );
}
