//! The job application state machine.
//!
//! ```text
//! underreview --consider--> considering
//! underreview|considering --reject--> rejected
//! underreview --sendOffer--> offerSent
//! offerSent --acceptOffer--> offerAccepted
//! offerSent --declineOffer--> rejected
//! offerAccepted --sendJoiningLetter--> joiningLetterSent
//! joiningLetterSent --acceptJoining--> joined
//! ```

use std::str::FromStr;

use crate::errors::AppError;
use crate::letters::LetterKind;
use crate::models::job::JobApplicationStatus::{self, *};
use crate::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Consider,
    Reject,
    SendOffer,
    SendJoiningLetter,
    AcceptOffer,
    DeclineOffer,
    AcceptJoining,
}

const TRANSITIONS: &[(JobAction, &[JobApplicationStatus], JobApplicationStatus)] = &[
    (JobAction::Consider, &[UnderReview], Considering),
    (JobAction::Reject, &[UnderReview, Considering], Rejected),
    (JobAction::SendOffer, &[UnderReview], OfferSent),
    (JobAction::AcceptOffer, &[OfferSent], OfferAccepted),
    (JobAction::DeclineOffer, &[OfferSent], Rejected),
    (JobAction::SendJoiningLetter, &[OfferAccepted], JoiningLetterSent),
    (JobAction::AcceptJoining, &[JoiningLetterSent], Joined),
];

impl JobAction {
    /// The only kind of account allowed to perform this action.
    pub fn actor(&self) -> Role {
        match self {
            JobAction::Consider
            | JobAction::Reject
            | JobAction::SendOffer
            | JobAction::SendJoiningLetter => Role::Contractor,
            JobAction::AcceptOffer | JobAction::DeclineOffer | JobAction::AcceptJoining => {
                Role::Worker
            }
        }
    }

    /// The letter that must be produced before the move is written.
    pub fn letter(&self) -> Option<LetterKind> {
        match self {
            JobAction::SendOffer => Some(LetterKind::Offer),
            JobAction::SendJoiningLetter => Some(LetterKind::Joining),
            _ => None,
        }
    }
}

/// Where `action` takes an application currently in `from`, if anywhere.
pub fn next_status(action: JobAction, from: JobApplicationStatus) -> Option<JobApplicationStatus> {
    TRANSITIONS
        .iter()
        .find(|(a, sources, _)| *a == action && sources.contains(&from))
        .map(|(_, _, to)| *to)
}

/// Body of `PUT /contractor/application/:id/process`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    Consider,
    Reject,
    SendOffer,
}

impl FromStr for ProcessAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consider" => Ok(ProcessAction::Consider),
            "reject" => Ok(ProcessAction::Reject),
            "sendOffer" => Ok(ProcessAction::SendOffer),
            other => Err(AppError::InvalidAction(format!(
                "'{other}' is not one of consider, reject, sendOffer"
            ))),
        }
    }
}

impl From<ProcessAction> for JobAction {
    fn from(action: ProcessAction) -> Self {
        match action {
            ProcessAction::Consider => JobAction::Consider,
            ProcessAction::Reject => JobAction::Reject,
            ProcessAction::SendOffer => JobAction::SendOffer,
        }
    }
}

/// Body of `PUT /worker/application/:id/respond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferResponse {
    Accept,
    Reject,
}

impl FromStr for OfferResponse {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(OfferResponse::Accept),
            "reject" => Ok(OfferResponse::Reject),
            other => Err(AppError::InvalidAction(format!(
                "'{other}' is not one of accept, reject"
            ))),
        }
    }
}

impl From<OfferResponse> for JobAction {
    fn from(response: OfferResponse) -> Self {
        match response {
            OfferResponse::Accept => JobAction::AcceptOffer,
            OfferResponse::Reject => JobAction::DeclineOffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIONS: [JobAction; 7] = [
        JobAction::Consider,
        JobAction::Reject,
        JobAction::SendOffer,
        JobAction::SendJoiningLetter,
        JobAction::AcceptOffer,
        JobAction::DeclineOffer,
        JobAction::AcceptJoining,
    ];

    #[test]
    fn test_happy_path() {
        let mut status = UnderReview;
        for action in [
            JobAction::SendOffer,
            JobAction::AcceptOffer,
            JobAction::SendJoiningLetter,
            JobAction::AcceptJoining,
        ] {
            status = next_status(action, status).unwrap();
        }
        assert_eq!(status, Joined);
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for action in ACTIONS {
            assert_eq!(next_status(action, Joined), None);
            assert_eq!(next_status(action, Rejected), None);
        }
    }

    #[test]
    fn test_send_offer_only_from_under_review() {
        for status in JobApplicationStatus::ALL {
            let expected = (status == UnderReview).then_some(OfferSent);
            assert_eq!(next_status(JobAction::SendOffer, status), expected);
        }
    }

    #[test]
    fn test_no_backward_moves() {
        let rank = |s: JobApplicationStatus| match s {
            UnderReview => 0,
            Considering => 1,
            OfferSent => 2,
            OfferAccepted => 3,
            JoiningLetterSent => 4,
            Joined => 5,
            Rejected => 6,
        };
        for action in ACTIONS {
            for from in JobApplicationStatus::ALL {
                if let Some(to) = next_status(action, from) {
                    assert!(rank(to) > rank(from), "{action:?}: {from} -> {to}");
                }
            }
        }
    }

    #[test]
    fn test_actors_and_letters() {
        assert_eq!(JobAction::SendOffer.actor(), Role::Contractor);
        assert_eq!(JobAction::AcceptJoining.actor(), Role::Worker);
        assert_eq!(JobAction::SendOffer.letter(), Some(LetterKind::Offer));
        assert_eq!(JobAction::SendJoiningLetter.letter(), Some(LetterKind::Joining));
        assert_eq!(JobAction::Consider.letter(), None);
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(
            JobAction::from("sendOffer".parse::<ProcessAction>().unwrap()),
            JobAction::SendOffer
        );
        assert_eq!(
            JobAction::from("reject".parse::<OfferResponse>().unwrap()),
            JobAction::DeclineOffer
        );
        assert!(matches!(
            "promote".parse::<ProcessAction>(),
            Err(AppError::InvalidAction(_))
        ));
        assert!(matches!(
            "sendOffer".parse::<OfferResponse>(),
            Err(AppError::InvalidAction(_))
        ));
    }
}
