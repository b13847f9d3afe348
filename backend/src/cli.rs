//! Command-line surface of the admin binary.
//!
//! Parsing is handled by `clap`; [`execute`] dispatches an entity command to
//! the driving ports and returns the JSON document printed on stdout.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use crate::domain::ports::{
    AuditQuery, FixitCommand, FixitQuery, ListAuditsRequest, ListFixitsRequest,
    ListVocabsRequest, VocabCommand, VocabQuery,
};
use crate::domain::{
    AuditTable, DomainError, FixitChanges, FixitStatus, NewFixit, NewVocab, VocabChanges,
    VocabContent,
};

const DEFAULT_LIST_LIMIT: i64 = 100;

/// `verdure-admin` arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "verdure-admin",
    about = "Administer vocabulary entries, fixits and the audit log",
    version
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Apply pending schema migrations.
    Migrate,
    #[command(flatten)]
    Entity(EntityCommand),
}

/// Subcommands that go through the driving ports.
#[derive(Debug, Clone, Subcommand)]
pub enum EntityCommand {
    /// Vocabulary entries.
    #[command(subcommand)]
    Vocab(VocabAction),
    /// Correction proposals.
    #[command(subcommand)]
    Fixit(FixitAction),
    /// Audit log.
    #[command(subcommand)]
    Audit(AuditAction),
}

#[derive(Debug, Clone, Subcommand)]
pub enum VocabAction {
    /// Show one entry.
    Get { id: i32 },
    /// List entries of a learning language.
    List {
        #[arg(long = "code", value_name = "code", default_value = "es")]
        learning_lang_code: String,
        /// Only entries that already have a translation.
        #[arg(long)]
        has_first: bool,
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: i64,
    },
    /// Add an entry.
    Create {
        #[arg(long, value_name = "word")]
        learning_lang: String,
        #[arg(long, value_name = "code", default_value = "en")]
        known_lang_code: String,
        #[arg(long, value_name = "code", default_value = "es")]
        learning_lang_code: String,
        #[command(flatten)]
        fields: VocabFieldArgs,
    },
    /// Change an entry; omitted fields keep their stored value.
    Update {
        id: i32,
        #[command(flatten)]
        fields: VocabFieldArgs,
    },
}

/// Mutable vocabulary fields settable from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct VocabFieldArgs {
    #[arg(long)]
    pub first_lang: Option<String>,
    #[arg(long)]
    pub alternatives: Option<String>,
    #[arg(long)]
    pub skill: Option<String>,
    #[arg(long)]
    pub infinitive: Option<String>,
    #[arg(long)]
    pub pos: Option<String>,
    #[arg(long)]
    pub hint: Option<String>,
    #[arg(long)]
    pub num_learning_words: Option<i32>,
}

impl VocabFieldArgs {
    /// Overlay the supplied fields onto `content`.
    pub fn apply_to(self, content: &mut VocabContent) {
        let Self {
            first_lang,
            alternatives,
            skill,
            infinitive,
            pos,
            hint,
            num_learning_words,
        } = self;
        if let Some(value) = first_lang {
            content.first_lang = value;
        }
        if let Some(value) = alternatives {
            content.alternatives = value;
        }
        if let Some(value) = skill {
            content.skill = value;
        }
        if let Some(value) = infinitive {
            content.infinitive = value;
        }
        if let Some(value) = pos {
            content.pos = value;
        }
        if let Some(value) = hint {
            content.hint = value;
        }
        if let Some(value) = num_learning_words {
            content.num_learning_words = value;
        }
    }
}

/// Time window and cap shared by the listing subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct WindowArgs {
    /// RFC 3339 start; defaults to one hour ago.
    #[arg(long)]
    pub start: Option<String>,
    /// RFC 3339 end; defaults to now.
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    pub limit: i64,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FixitAction {
    /// Show one fixit.
    Get { id: i32 },
    /// List fixits by status.
    List {
        #[arg(long, default_value = "pending")]
        status: FixitStatus,
        #[arg(long)]
        vocab_id: Option<i32>,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Raise a fixit against a vocabulary field.
    Create {
        #[arg(long)]
        vocab_id: i32,
        #[arg(long)]
        field_name: String,
        #[arg(long, default_value = "")]
        comments: String,
        #[arg(long, default_value = "pending")]
        status: FixitStatus,
        /// Reporter; defaults to the configured audit actor.
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Change a fixit; omitted fields keep their stored value.
    Update {
        id: i32,
        #[arg(long)]
        status: Option<FixitStatus>,
        #[arg(long)]
        field_name: Option<String>,
        #[arg(long)]
        comments: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AuditAction {
    /// Show one audit row.
    Get { id: i32 },
    /// List audit rows.
    List {
        #[arg(long = "table")]
        table_name: Option<AuditTable>,
        /// Requires `--table`.
        #[arg(long)]
        object_id: Option<i32>,
        #[command(flatten)]
        window: WindowArgs,
    },
}

/// Driving ports the CLI dispatches to.
pub struct AdminPorts<'a> {
    pub vocab_command: &'a dyn VocabCommand,
    pub vocab_query: &'a dyn VocabQuery,
    pub fixit_command: &'a dyn FixitCommand,
    pub fixit_query: &'a dyn FixitQuery,
    pub audit_query: &'a dyn AuditQuery,
    /// Default reporter for new fixits.
    pub actor: &'a str,
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|err| DomainError::internal(format!("failed to encode output: {err}")))
}

/// Run an entity command and return its JSON output.
pub async fn execute(command: EntityCommand, ports: &AdminPorts<'_>) -> Result<Value, DomainError> {
    match command {
        EntityCommand::Vocab(action) => execute_vocab(action, ports).await,
        EntityCommand::Fixit(action) => execute_fixit(action, ports).await,
        EntityCommand::Audit(action) => execute_audit(action, ports).await,
    }
}

async fn execute_vocab(action: VocabAction, ports: &AdminPorts<'_>) -> Result<Value, DomainError> {
    match action {
        VocabAction::Get { id } => to_json(&ports.vocab_query.find_vocab_by_id(id).await?),
        VocabAction::List {
            learning_lang_code,
            has_first,
            limit,
        } => {
            let request = ListVocabsRequest {
                learning_lang_code,
                has_first,
                limit,
            };
            to_json(&ports.vocab_query.find_vocabs(request).await?)
        }
        VocabAction::Create {
            learning_lang,
            known_lang_code,
            learning_lang_code,
            fields,
        } => {
            let mut draft = NewVocab::new(learning_lang);
            draft.known_lang_code = known_lang_code;
            draft.learning_lang_code = learning_lang_code;
            fields.apply_to(&mut draft.content);
            to_json(&ports.vocab_command.create_vocab(draft).await?)
        }
        VocabAction::Update { id, fields } => {
            let current = ports.vocab_query.find_vocab_by_id(id).await?;
            let mut content = current.content();
            fields.apply_to(&mut content);
            let updated = ports
                .vocab_command
                .update_vocab(VocabChanges { id, content })
                .await?;
            to_json(&updated)
        }
    }
}

async fn execute_fixit(action: FixitAction, ports: &AdminPorts<'_>) -> Result<Value, DomainError> {
    match action {
        FixitAction::Get { id } => to_json(&ports.fixit_query.find_fixit_by_id(id).await?),
        FixitAction::List {
            status,
            vocab_id,
            window,
        } => {
            let request = ListFixitsRequest {
                status,
                vocab_id,
                start: window.start,
                end: window.end,
                limit: window.limit,
            };
            to_json(&ports.fixit_query.find_fixits(request).await?)
        }
        FixitAction::Create {
            vocab_id,
            field_name,
            comments,
            status,
            created_by,
        } => {
            let draft = NewFixit {
                vocab_id,
                status,
                field_name,
                comments,
                created_by: created_by.unwrap_or_else(|| ports.actor.to_owned()),
            };
            to_json(&ports.fixit_command.create_fixit(draft).await?)
        }
        FixitAction::Update {
            id,
            status,
            field_name,
            comments,
        } => {
            let current = ports.fixit_query.find_fixit_by_id(id).await?;
            let changes = FixitChanges {
                id,
                status: status.unwrap_or(current.status),
                field_name: field_name.unwrap_or(current.field_name),
                comments: comments.unwrap_or(current.comments),
            };
            to_json(&ports.fixit_command.update_fixit(changes).await?)
        }
    }
}

async fn execute_audit(action: AuditAction, ports: &AdminPorts<'_>) -> Result<Value, DomainError> {
    match action {
        AuditAction::Get { id } => to_json(&ports.audit_query.find_audit_by_id(id).await?),
        AuditAction::List {
            table_name,
            object_id,
            window,
        } => {
            let request = ListAuditsRequest {
                table_name,
                object_id,
                start: window.start,
                end: window.end,
                limit: window.limit,
            };
            to_json(&ports.audit_query.find_audits(request).await?)
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
