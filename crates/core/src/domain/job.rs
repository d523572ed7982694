// Job Descriptor Domain Model
//
// The job runtime owns the job. This is a read-only view of the three
// identifying fields used for marker matching; arguments are never read.

use crate::domain::marker::{Marker, MarkerType};
use serde::{Deserialize, Serialize};

/// Job ID as assigned by the job runtime
pub type Jid = String;

/// Batch ID shared by jobs enqueued together
pub type Bid = String;

/// Identifying fields of a job about to execute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    #[serde(default)]
    pub jid: Option<Jid>,
    #[serde(default)]
    pub bid: Option<Bid>,
    #[serde(default)]
    pub class: Option<String>,
}

impl JobDescriptor {
    pub fn new(jid: impl Into<String>) -> Self {
        Self {
            jid: Some(jid.into()),
            ..Default::default()
        }
    }

    pub fn with_bid(mut self, bid: impl Into<String>) -> Self {
        self.bid = Some(bid.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Read the identifying fields from a raw job hash
    ///
    /// Numeric ids are taken in their decimal form; any other non-string
    /// value counts as absent. Every other key (args, queue, retry settings,
    /// ...) is ignored.
    pub fn from_job_value(job: &serde_json::Value) -> Self {
        let field = |name: &str| match job.get(name)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        };

        Self {
            jid: field("jid"),
            bid: field("bid"),
            class: field("class"),
        }
    }

    /// Value of the field matching a marker type, if present and non-empty
    pub fn field(&self, marker_type: MarkerType) -> Option<&str> {
        let value = match marker_type {
            MarkerType::Jid => self.jid.as_deref(),
            MarkerType::Bid => self.bid.as_deref(),
            MarkerType::Class => self.class.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Encoded markers derivable from this job, in jid, bid, class order
    pub fn candidate_markers(&self) -> Vec<String> {
        MarkerType::ALL
            .iter()
            .filter_map(|&marker_type| {
                self.field(marker_type)
                    .map(|value| Marker::new(marker_type, value).encode())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_markers_full_job() {
        let job = JobDescriptor::new("abcdef1234567890")
            .with_bid("deadbeef420420")
            .with_class("TillyScratchesTheCouchJob");

        assert_eq!(
            job.candidate_markers(),
            vec![
                "jid:abcdef1234567890".to_string(),
                "bid:deadbeef420420".to_string(),
                "class:TillyScratchesTheCouchJob".to_string(),
            ]
        );
    }

    #[test]
    fn test_absent_and_empty_fields_contribute_nothing() {
        let job = JobDescriptor {
            jid: Some("".to_string()),
            bid: None,
            class: Some("X".to_string()),
        };
        assert_eq!(job.candidate_markers(), vec!["class:X".to_string()]);

        assert!(JobDescriptor::default().candidate_markers().is_empty());
    }

    #[test]
    fn test_from_job_value_reads_only_identifying_fields() {
        let raw = json!({
            "jid": "abc123",
            "class": "NightlyReportJob",
            "queue": "within_50_years",
            "args": ["foo", 2, "baz"],
            "bid": 42,
        });

        let job = JobDescriptor::from_job_value(&raw);
        assert_eq!(job.jid.as_deref(), Some("abc123"));
        assert_eq!(job.class.as_deref(), Some("NightlyReportJob"));
        assert_eq!(job.bid.as_deref(), Some("42"));
    }

    #[test]
    fn test_numeric_ids_match_their_string_markers() {
        let job = JobDescriptor::from_job_value(&json!({"jid": 7, "bid": 42, "class": null}));
        assert_eq!(
            job.candidate_markers(),
            vec!["jid:7".to_string(), "bid:42".to_string()]
        );

        let odd = JobDescriptor::from_job_value(&json!({"jid": true, "bid": ["x"], "class": {}}));
        assert!(odd.candidate_markers().is_empty());
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let job: JobDescriptor = serde_json::from_value(json!({"bid": "batch42"})).unwrap();
        assert_eq!(job.candidate_markers(), vec!["bid:batch42".to_string()]);
    }
}
