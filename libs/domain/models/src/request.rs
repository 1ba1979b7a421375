//! The analysis request record the contract owns. The worker only ever
//! observes it and transitions it `pending -> completed|failed` exactly
//! once per id (see the monotone-status invariant in the data model).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::primitives::{Address, Uint256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Completed,
    Failed,
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(RequestStatus::Pending),
            "completed" => Ok(RequestStatus::Completed),
            "failed" => Ok(RequestStatus::Failed),
            other => Err(format!("unrecognized request status: '{other}'")),
        }
    }
}

/// Mirrors the tuple returned by `getAnalysisRequest(uint256)`:
/// `(requester, user1, user2, status, result, requestTime, completionTime)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub id: Uint256,
    pub requester: Address,
    pub user1: Address,
    pub user2: Address,
    pub status: RequestStatus,
    pub result: String,
    pub request_time: u64,
    pub completion_time: u64,
}

impl AnalysisRequest {
    /// The contract-bug surface noted in the design notes: a request can be
    /// observed `pending` while already carrying a non-empty `result`. The
    /// worker treats that as already `done` rather than re-processing it.
    pub fn looks_already_done(&self) -> bool {
        !self.status.is_pending() || !self.result.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_with_empty_result_is_not_done() {
        let req = AnalysisRequest {
            id: Uint256::from_u64(1),
            requester: Address::zero(),
            user1: Address::zero(),
            user2: Address::zero(),
            status: RequestStatus::Pending,
            result: String::new(),
            request_time: 0,
            completion_time: 0,
        };
        assert!(!req.looks_already_done());
    }

    #[test]
    fn request_status_parses_from_the_contract_strings() {
        assert_eq!("pending".parse::<RequestStatus>().unwrap(), RequestStatus::Pending);
        assert_eq!("completed".parse::<RequestStatus>().unwrap(), RequestStatus::Completed);
        assert_eq!("failed".parse::<RequestStatus>().unwrap(), RequestStatus::Failed);
        assert!("unknown".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn pending_with_nonempty_result_is_treated_as_done() {
        let req = AnalysisRequest {
            id: Uint256::from_u64(1),
            requester: Address::zero(),
            user1: Address::zero(),
            user2: Address::zero(),
            status: RequestStatus::Pending,
            result: "{}".to_string(),
            request_time: 0,
            completion_time: 0,
        };
        assert!(req.looks_already_done());
    }
}
