//! Shared fixtures for unit tests in `src/`.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Fixit, FixitStatus, Vocab};

/// Instant every fixture clock reports.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock frozen at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

/// A stored entry for the verb "ser".
pub fn sample_vocab(id: i32) -> Vocab {
    Vocab {
        id,
        learning_lang: "ser".to_owned(),
        first_lang: "to be".to_owned(),
        created: fixture_timestamp(),
        alternatives: String::new(),
        skill: "Verbs".to_owned(),
        infinitive: "ser".to_owned(),
        pos: "verb".to_owned(),
        hint: "A hint".to_owned(),
        num_learning_words: 1,
        known_lang_code: "en".to_owned(),
        learning_lang_code: "es".to_owned(),
    }
}

/// A pending fixit against `vocab_id`.
pub fn sample_fixit(id: i32, vocab_id: i32) -> Fixit {
    Fixit {
        id,
        vocab_id,
        status: FixitStatus::Pending,
        field_name: "hint".to_owned(),
        comments: "hint is misleading".to_owned(),
        created_by: "ana".to_owned(),
        created: fixture_timestamp(),
    }
}
