//! Request vocabulary for submissions
//!
//! Local payloads always serialize with their own field names. The rename table
//! below is the only place that knows what the script endpoint calls them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::Submission;
use crate::types::SubmissionKind;

/// Versions of the submission field names the endpoint has accepted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Vocabulary {
    /// Local names sent unchanged
    V1,
    /// `staffName` -> `staff`, `barName` -> `bar`
    #[default]
    V2,
}

const V2_RENAMES: &[(&str, &str)] = &[("staffName", "staff"), ("barName", "bar")];

impl Vocabulary {
    /// (local key, remote key) pairs applied to the top level of a payload
    pub fn renames(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Vocabulary::V1 => &[],
            Vocabulary::V2 => V2_RENAMES,
        }
    }

    pub fn remote_key<'a>(&self, local: &'a str) -> &'a str {
        self.renames()
            .iter()
            .find(|(from, _)| *from == local)
            .map(|(_, to)| *to)
            .unwrap_or(local)
    }
}

/// How a payload is wrapped before posting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeMode {
    /// The payload object itself
    Bare,
    /// `{ "action": ..., "data": payload }`
    #[default]
    Action,
}

/// Command name the script dispatches on
pub fn action_name(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Stocktake => "submitStock",
        SubmissionKind::Transfer => "submitTransfer",
    }
}

/// Turns a submission into the request body the endpoint expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionMapper {
    pub vocabulary: Vocabulary,
    pub envelope: EnvelopeMode,
}

impl SubmissionMapper {
    pub fn new(vocabulary: Vocabulary, envelope: EnvelopeMode) -> Self {
        Self {
            vocabulary,
            envelope,
        }
    }

    /// Assumes the item list has already been filtered and checked non-empty
    pub fn to_body(&self, submission: &Submission) -> Result<Value, serde_json::Error> {
        let mut payload = serde_json::to_value(submission)?;

        if let Value::Object(map) = &mut payload {
            for (local, remote) in self.vocabulary.renames() {
                if let Some(value) = map.remove(*local) {
                    map.insert((*remote).to_string(), value);
                }
            }
        }

        Ok(match self.envelope {
            EnvelopeMode::Bare => payload,
            EnvelopeMode::Action => json!({
                "action": action_name(submission.kind()),
                "data": payload,
            }),
        })
    }

    /// JSON text for the request body
    pub fn encode(&self, submission: &Submission) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_body(submission)?)
    }
}
