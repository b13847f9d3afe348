//! Tests for the vocabulary service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    AuditRepositoryError, FixtureAuditRepository, MockAuditRepository, MockVocabRepository,
};
use crate::domain::{Audit, AuditTable, ErrorCode};
use crate::test_support::{fixture_clock, fixture_timestamp, sample_vocab};

fn service_with<A>(
    vocab_repo: MockVocabRepository,
    audit_repo: A,
) -> VocabService<MockVocabRepository, A> {
    VocabService::new(
        Arc::new(vocab_repo),
        AuditService::new(Arc::new(audit_repo), fixture_clock()),
        "sys",
    )
}

fn echo_audit(audit: &crate::domain::NewAudit) -> Audit {
    Audit {
        id: 1,
        object_id: audit.object_id,
        table_name: audit.table_name,
        diff: audit.diff.clone(),
        before: audit.before.clone(),
        after: audit.after.clone(),
        comments: audit.comments.clone(),
        created_by: audit.created_by.clone(),
        created: fixture_timestamp(),
    }
}

fn changes_clearing_hint_and_infinitive(id: i32) -> VocabChanges {
    let mut content = sample_vocab(id).content();
    content.hint = String::new();
    content.infinitive = String::new();
    VocabChanges { id, content }
}

#[rstest]
#[tokio::test]
async fn create_vocab_persists_and_audits_creation() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_learning_lang()
        .withf(|learning_lang| learning_lang == "ser")
        .times(1)
        .return_once(|_| Ok(None));
    vocab_repo
        .expect_create()
        .times(1)
        .return_once(|_| Ok(sample_vocab(12)));

    let mut audit_repo = MockAuditRepository::new();
    audit_repo
        .expect_create()
        .withf(|audit| {
            audit.object_id == 12
                && audit.table_name == AuditTable::Vocab
                && audit.comments == "created vocab"
                && audit.created_by == "sys"
                && audit.before.is_empty()
                && audit.diff.is_empty()
        })
        .times(1)
        .returning(|audit| Ok(echo_audit(audit)));

    let mut draft = NewVocab::new("ser");
    draft.content = sample_vocab(0).content();

    let created = service_with(vocab_repo, audit_repo)
        .create_vocab(draft)
        .await
        .expect("create succeeds");
    assert_eq!(created.id, 12);
}

#[rstest]
#[tokio::test]
async fn create_vocab_rejects_duplicates_naming_existing_id() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_learning_lang()
        .times(1)
        .return_once(|_| Ok(Some(sample_vocab(4))));
    vocab_repo.expect_create().times(0);

    let mut audit_repo = MockAuditRepository::new();
    audit_repo.expect_create().times(0);

    let err = service_with(vocab_repo, audit_repo)
        .create_vocab(NewVocab::new("ser"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.message(),
        "vocab with learning lang ser and id 4 already exists"
    );
}

#[rstest]
#[tokio::test]
async fn create_vocab_maps_unique_violation_to_conflict() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_learning_lang()
        .return_once(|_| Ok(None));
    vocab_repo
        .expect_create()
        .return_once(|_| Err(VocabRepositoryError::duplicate_learning_lang("ser")));

    let err = service_with(vocab_repo, FixtureAuditRepository)
        .create_vocab(NewVocab::new("ser"))
        .await
        .expect_err("lost the race");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn create_vocab_validates_before_touching_storage() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo.expect_find_by_learning_lang().times(0);
    vocab_repo.expect_create().times(0);

    let mut draft = NewVocab::new("ser");
    draft.content.hint = "<a href=\"/x\">".to_owned();

    let err = service_with(vocab_repo, FixtureAuditRepository)
        .create_vocab(draft)
        .await
        .expect_err("markup rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "hint contains invalid characters");
}

#[rstest]
#[tokio::test]
async fn update_vocab_writes_entity_and_diff() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_id()
        .with(eq(4))
        .times(1)
        .return_once(|_| Ok(Some(sample_vocab(4))));
    vocab_repo
        .expect_update()
        .withf(|vocab| vocab.id == 4 && vocab.hint.is_empty() && vocab.infinitive.is_empty())
        .times(1)
        .return_once(|_| Ok(()));

    let mut audit_repo = MockAuditRepository::new();
    audit_repo
        .expect_create()
        .withf(|audit| {
            audit.comments == "updated vocab"
                && audit.diff
                    == r#"[{"key":"'hint'","before":"A hint","after":""},{"key":"'infinitive'","before":"ser","after":""}]"#
        })
        .times(1)
        .returning(|audit| Ok(echo_audit(audit)));

    let updated = service_with(vocab_repo, audit_repo)
        .update_vocab(changes_clearing_hint_and_infinitive(4))
        .await
        .expect("update succeeds");

    assert_eq!(updated.learning_lang, "ser");
    assert_eq!(updated.created, fixture_timestamp());
    assert!(updated.hint.is_empty());
}

#[rstest]
#[tokio::test]
async fn update_vocab_without_changes_is_a_conflict() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_vocab(4))));
    vocab_repo.expect_update().times(0);

    let mut audit_repo = MockAuditRepository::new();
    audit_repo.expect_create().times(0);

    let err = service_with(vocab_repo, audit_repo)
        .update_vocab(VocabChanges {
            id: 4,
            content: sample_vocab(4).content(),
        })
        .await
        .expect_err("no-op update");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "update for vocab 4 has no changes");
}

#[rstest]
#[tokio::test]
async fn update_vocab_reports_missing_entries() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo.expect_find_by_id().return_once(|_| Ok(None));
    vocab_repo.expect_update().times(0);

    let err = service_with(vocab_repo, FixtureAuditRepository)
        .update_vocab(changes_clearing_hint_and_infinitive(99))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "vocab 99 not found");
}

#[rstest]
#[tokio::test]
async fn audit_failure_after_update_is_returned() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_id()
        .return_once(|_| Ok(Some(sample_vocab(4))));
    vocab_repo.expect_update().times(1).return_once(|_| Ok(()));

    let mut audit_repo = MockAuditRepository::new();
    audit_repo
        .expect_create()
        .times(1)
        .return_once(|_| Err(AuditRepositoryError::query("disk full")));

    let err = service_with(vocab_repo, audit_repo)
        .update_vocab(changes_clearing_hint_and_infinitive(4))
        .await
        .expect_err("audit failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn audit_failure_after_create_is_returned() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_learning_lang()
        .return_once(|_| Ok(None));
    vocab_repo
        .expect_create()
        .times(1)
        .return_once(|_| Ok(sample_vocab(12)));

    let mut audit_repo = MockAuditRepository::new();
    audit_repo
        .expect_create()
        .withf(|audit| audit.object_id == 12 && audit.comments == "created vocab")
        .times(1)
        .return_once(|_| Err(AuditRepositoryError::query("disk full")));

    let err = service_with(vocab_repo, audit_repo)
        .create_vocab(NewVocab::new("ser"))
        .await
        .expect_err("audit failed");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "audit repository error: disk full");
}

#[rstest]
#[tokio::test]
async fn find_vocabs_passes_filter_through() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find()
        .withf(|filter| {
            filter.learning_lang_code == "es" && filter.has_first && filter.limit.get() == 10
        })
        .times(1)
        .return_once(|_| Ok(vec![sample_vocab(1)]));

    let vocabs = service_with(vocab_repo, FixtureAuditRepository)
        .find_vocabs(ListVocabsRequest {
            learning_lang_code: "es".to_owned(),
            has_first: true,
            limit: 10,
        })
        .await
        .expect("listing succeeds");

    assert_eq!(vocabs.len(), 1);
}

#[rstest]
#[tokio::test]
async fn find_vocabs_rejects_oversized_limits() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo.expect_find().times(0);

    let err = service_with(vocab_repo, FixtureAuditRepository)
        .find_vocabs(ListVocabsRequest {
            learning_lang_code: "es".to_owned(),
            has_first: false,
            limit: 1000,
        })
        .await
        .expect_err("limit too large");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn connection_failures_map_to_service_unavailable() {
    let mut vocab_repo = MockVocabRepository::new();
    vocab_repo
        .expect_find_by_id()
        .return_once(|_| Err(VocabRepositoryError::connection("refused")));

    let err = service_with(vocab_repo, FixtureAuditRepository)
        .find_vocab_by_id(3)
        .await
        .expect_err("connection failure");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
