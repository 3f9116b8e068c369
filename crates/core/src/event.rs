//! Git hook events that can carry a hook pipeline

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A git hook event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
    /// Runs before a commit is created
    PreCommit,
    /// Runs before the commit message editor opens
    PrepareCommitMsg,
    /// Runs after the commit message was written
    CommitMsg,
    /// Runs after a commit was created
    PostCommit,
    /// Runs before a rebase starts
    PreRebase,
    /// Runs after commits were rewritten (amend, rebase)
    PostRewrite,
    /// Runs after a checkout or switch
    PostCheckout,
    /// Runs after a merge
    PostMerge,
    /// Runs before refs are pushed
    PrePush,
}

impl HookEvent {
    /// Every supported event, in the order git usually fires them
    pub const ALL: [Self; 9] = [
        Self::PreCommit,
        Self::PrepareCommitMsg,
        Self::CommitMsg,
        Self::PostCommit,
        Self::PreRebase,
        Self::PostRewrite,
        Self::PostCheckout,
        Self::PostMerge,
        Self::PrePush,
    ];

    /// The git hook file name for this event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreCommit => "pre-commit",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::CommitMsg => "commit-msg",
            Self::PostCommit => "post-commit",
            Self::PreRebase => "pre-rebase",
            Self::PostRewrite => "post-rewrite",
            Self::PostCheckout => "post-checkout",
            Self::PostMerge => "post-merge",
            Self::PrePush => "pre-push",
        }
    }

    /// Whether git passes the commit message file to this hook.
    ///
    /// Message events run with a [`CommitMessage`](crate::CommitMessage)
    /// payload, every other event with a [`HookContext`](crate::HookContext).
    #[must_use]
    pub const fn is_message_event(self) -> bool {
        matches!(self, Self::PrepareCommitMsg | Self::CommitMsg)
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| Error::unknown_event(s))
    }
}
