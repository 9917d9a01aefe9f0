//! One-line feedback after a command, with an optional follow-up.

use std::fmt;

/// How a [`Notice`] should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Done,
    Warning,
    /// The user has to do something before the booking can go on
    ActionNeeded,
}

impl NoticeKind {
    fn label(self) -> &'static str {
        match self {
            NoticeKind::Done => "Done",
            NoticeKind::Warning => "Warning",
            NoticeKind::ActionNeeded => "Action needed",
        }
    }
}

/// Feedback line such as `Done: Signed out`, optionally followed by the
/// command to run next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub next: Option<String>,
}

impl Notice {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Done,
            message: message.into(),
            next: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
            next: None,
        }
    }

    /// The sign-in redirect, naming the service waiting on the other side.
    pub fn sign_in_required(stashed: Option<u64>) -> Self {
        let message = match stashed {
            Some(id) => format!("Sign-in required to continue booking service {id}"),
            None => "Sign-in required".to_string(),
        };
        Self {
            kind: NoticeKind::ActionNeeded,
            message,
            next: None,
        }
    }

    /// A requested time the current slot list does not offer.
    pub fn slot_unavailable(time: &str) -> Self {
        Self::warning(format!("{time} is not available, please pick another time"))
    }

    pub fn with_next(mut self, command: impl Into<String>) -> Self {
        self.next = Some(command.into());
        self
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.kind.label(), self.message)?;
        if let Some(next) = &self.next {
            writeln!(f)?;
            writeln!(f, "Next: `{next}`")?;
        }
        Ok(())
    }
}
