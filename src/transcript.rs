use assistant_api::Annotation;
use serde::{Deserialize, Serialize};

use crate::annotations;

/// Producer of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    /// Code-execution input streamed by the backend's code tool.
    Code,
    System,
}

impl Role {
    const COUNT: usize = 4;

    fn slot(self) -> usize {
        match self {
            Self::User => 0,
            Self::Assistant => 1,
            Self::Code => 2,
            Self::System => 3,
        }
    }
}

/// One rendered message. `sensitive` marks text a renderer must mask (the
/// captured secret echoed back); it never changes what is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub sensitive: bool,
}

/// Ordered, append-only message list.
///
/// Delta application targets the most recently appended message of the
/// producing role, tracked as an explicit per-role index rather than
/// re-derived from position, so interleaved roles never mis-target.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    last_by_role: [Option<usize>; Role::COUNT],
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the most recently appended message of `role`.
    pub fn last_of(&self, role: Role) -> Option<&Message> {
        self.last_by_role[role.slot()].map(|index| &self.messages[index])
    }

    /// Append a message and make it the role's delta target.
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.push(Message {
            role,
            text: text.into(),
            sensitive: false,
        });
    }

    /// Append a message whose text must be rendered masked.
    pub fn append_sensitive(&mut self, role: Role, text: impl Into<String>) {
        self.push(Message {
            role,
            text: text.into(),
            sensitive: true,
        });
    }

    /// Append streamed text to the role's open message, synthesizing an
    /// empty placeholder when the backend never announced one.
    pub fn append_delta(&mut self, role: Role, text: &str) {
        let index = match self.last_by_role[role.slot()] {
            Some(index) => index,
            None => {
                self.append(role, "");
                self.last_by_role[role.slot()]
                    .unwrap_or(self.messages.len() - 1)
            }
        };
        self.messages[index].text.push_str(text);
    }

    /// Rewrite citation placeholders in the role's open message.
    pub fn rewrite_last(&mut self, role: Role, annotations: &[Annotation]) {
        if let Some(index) = self.last_by_role[role.slot()] {
            let message = &mut self.messages[index];
            message.text = annotations::rewrite(&message.text, annotations);
        }
    }

    fn push(&mut self, message: Message) {
        let role = message.role;
        self.messages.push(message);
        self.last_by_role[role.slot()] = Some(self.messages.len() - 1);
    }
}
