//! End-to-end behaviour of vocab mutations and their audit trail over
//! in-memory repositories.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use verdure_admin::domain::ports::{
    AuditQuery, AuditRepository, AuditRepositoryError, ListAuditsRequest, VocabCommand,
    VocabRepository, VocabRepositoryError,
};
use verdure_admin::domain::{
    Audit, AuditFilter, AuditService, AuditTable, ErrorCode, NewAudit, NewVocab, Vocab,
    VocabChanges, VocabFilter, VocabService,
};

struct FrozenClock(DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[derive(Default)]
struct MemoryVocabRepository {
    rows: Mutex<Vec<Vocab>>,
}

#[async_trait]
impl VocabRepository for MemoryVocabRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vocab>, VocabRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_learning_lang(
        &self,
        learning_lang: &str,
    ) -> Result<Option<Vocab>, VocabRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows
            .iter()
            .find(|row| row.learning_lang == learning_lang)
            .cloned())
    }

    async fn find(&self, filter: &VocabFilter) -> Result<Vec<Vocab>, VocabRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows
            .iter()
            .filter(|row| row.learning_lang_code == filter.learning_lang_code)
            .filter(|row| row.first_lang.is_empty() != filter.has_first)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &NewVocab) -> Result<Vocab, VocabRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let id = i32::try_from(rows.len()).expect("small table") + 1;
        let mut vocab = Vocab {
            id,
            learning_lang: draft.learning_lang.clone(),
            first_lang: String::new(),
            created: now(),
            alternatives: String::new(),
            skill: String::new(),
            infinitive: String::new(),
            pos: String::new(),
            hint: String::new(),
            num_learning_words: 1,
            known_lang_code: draft.known_lang_code.clone(),
            learning_lang_code: draft.learning_lang_code.clone(),
        };
        vocab.apply_content(draft.content.clone());
        rows.push(vocab.clone());
        Ok(vocab)
    }

    async fn update(&self, entry: &Vocab) -> Result<(), VocabRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let slot = rows
            .iter_mut()
            .find(|row| row.id == entry.id)
            .ok_or_else(|| VocabRepositoryError::query("row vanished"))?;
        *slot = entry.clone();
        Ok(())
    }
}

#[derive(Default)]
struct MemoryAuditRepository {
    rows: Mutex<Vec<Audit>>,
}

#[async_trait]
impl AuditRepository for MemoryAuditRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Audit>, AuditRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find(&self, filter: &AuditFilter) -> Result<Vec<Audit>, AuditRepositoryError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows
            .iter()
            .filter(|row| filter.window().contains(row.created))
            .filter(|row| filter.table().is_none_or(|table| table == row.table_name))
            .filter(|row| filter.object_id().is_none_or(|id| id == row.object_id))
            .cloned()
            .collect())
    }

    async fn create(&self, audit: &NewAudit) -> Result<Audit, AuditRepositoryError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let stored = Audit {
            id: i32::try_from(rows.len()).expect("small table") + 1,
            object_id: audit.object_id,
            table_name: audit.table_name,
            diff: audit.diff.clone(),
            before: audit.before.clone(),
            after: audit.after.clone(),
            comments: audit.comments.clone(),
            created_by: audit.created_by.clone(),
            created: now() - chrono::TimeDelta::minutes(5),
        };
        rows.push(stored.clone());
        Ok(stored)
    }
}

struct Harness {
    vocabs: VocabService<MemoryVocabRepository, MemoryAuditRepository>,
    audits: AuditService<MemoryAuditRepository>,
}

#[fixture]
fn harness() -> Harness {
    let clock: Arc<dyn Clock> = Arc::new(FrozenClock(now()));
    let audits = AuditService::new(Arc::new(MemoryAuditRepository::default()), clock);
    let vocabs = VocabService::new(
        Arc::new(MemoryVocabRepository::default()),
        audits.clone(),
        "curator",
    );
    Harness { vocabs, audits }
}

fn ser_draft() -> NewVocab {
    let mut draft = NewVocab::new("ser");
    draft.content.first_lang = "to be".to_owned();
    draft.content.infinitive = "ser".to_owned();
    draft.content.hint = "A hint".to_owned();
    draft
}

fn object_request(object_id: i32) -> ListAuditsRequest {
    ListAuditsRequest {
        table_name: Some(AuditTable::Vocab),
        object_id: Some(object_id),
        start: None,
        end: None,
        limit: 10,
    }
}

#[rstest]
#[tokio::test]
async fn clearing_fields_leaves_an_ordered_diff(harness: Harness) {
    let created = harness
        .vocabs
        .create_vocab(ser_draft())
        .await
        .expect("create succeeds");

    let mut content = created.content();
    content.hint = String::new();
    content.infinitive = String::new();
    harness
        .vocabs
        .update_vocab(VocabChanges {
            id: created.id,
            content,
        })
        .await
        .expect("update succeeds");

    let trail = harness
        .audits
        .find_audits(object_request(created.id))
        .await
        .expect("listing succeeds");

    assert_eq!(trail.len(), 2);
    let creation = trail.first().expect("creation audit");
    assert_eq!(creation.comments, "created vocab");
    assert_eq!(creation.before, "");
    assert_eq!(creation.diff, "");
    assert_eq!(creation.created_by, "curator");

    let update = trail.get(1).expect("update audit");
    assert_eq!(update.comments, "updated vocab");
    assert_eq!(
        update.diff,
        r#"[{"key":"'hint'","before":"A hint","after":""},{"key":"'infinitive'","before":"ser","after":""}]"#
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_learning_lang_is_a_conflict(harness: Harness) {
    let first = harness
        .vocabs
        .create_vocab(ser_draft())
        .await
        .expect("first create succeeds");

    let err = harness
        .vocabs
        .create_vocab(ser_draft())
        .await
        .expect_err("duplicate rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        err.message(),
        format!("vocab with learning lang ser and id {} already exists", first.id)
    );
}

#[rstest]
#[tokio::test]
async fn unchanged_update_writes_no_audit(harness: Harness) {
    let created = harness
        .vocabs
        .create_vocab(ser_draft())
        .await
        .expect("create succeeds");

    let err = harness
        .vocabs
        .update_vocab(VocabChanges {
            id: created.id,
            content: created.content(),
        })
        .await
        .expect_err("no-op update");

    assert_eq!(err.code(), ErrorCode::Conflict);
    let trail = harness
        .audits
        .find_audits(object_request(created.id))
        .await
        .expect("listing succeeds");
    assert_eq!(trail.len(), 1);
}

#[rstest]
#[tokio::test]
async fn object_filter_needs_a_table(harness: Harness) {
    let err = harness
        .audits
        .find_audits(ListAuditsRequest {
            table_name: None,
            ..object_request(1)
        })
        .await
        .expect_err("object id without table");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "objectId requires table name filter");
}
