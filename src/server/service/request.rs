//! Request lifecycle.
//!
//! ```text
//! waiting --(donor approves)--> approved
//! waiting --(donor rejects)--> rejected
//! waiting|approved --(either party cancels)--> canceled
//! approved --(requester picks up)--> completed
//! ```
//!
//! A status change and its donation side effects are committed in one transaction. The
//! request row is locked before the donation row on every path. Notifications go out only
//! after the commit.

use entity::{donation::DonationStatus, request::RequestStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::request::CreateRequestDto,
    server::{
        data::{
            donation::DonationRepository,
            request::{NewRequest, RequestRepository},
        },
        error::{
            auth::AuthError, conflict::ConflictError, not_found::NotFoundError,
            validation::ValidationError, Error,
        },
        model::{
            app::LifecycleSettings,
            db::{DonationModel, RequestModel},
        },
        service::{
            donation::lifecycle::{DonationLifecycle, DonationTransition},
            notification::{NotificationEvent, NotificationService},
            retry::RetryPolicy,
        },
        util::{
            parse::{parse_datetime, required_text},
            quantity::{
                check_requested_unit, parse_requested_quantity, validate_requested_quantity,
            },
        },
    },
};

pub const NOTE_MAX_LEN: usize = 1000;

/// Whether the lifecycle allows moving a request from `from` to `to`.
pub fn can_transition(from: RequestStatus, to: RequestStatus) -> bool {
    use RequestStatus::*;

    matches!(
        (from, to),
        (Waiting, Approved)
            | (Waiting, Rejected)
            | (Waiting, Canceled)
            | (Approved, Canceled)
            | (Approved, Completed)
    )
}

/// Checks that `actor_id` may move `request` to `to`.
///
/// The donor approves and rejects, the requester completes, either of them cancels.
pub fn authorize(
    actor_id: i32,
    request: &RequestModel,
    donation: &DonationModel,
    to: RequestStatus,
) -> Result<(), AuthError> {
    let is_donor = actor_id == donation.user_id;
    let is_requester = actor_id == request.user_id;

    if !is_donor && !is_requester {
        return Err(AuthError::Forbidden(
            "only the donor or the requester can change this request".to_string(),
        ));
    }

    match to {
        RequestStatus::Approved | RequestStatus::Rejected if !is_donor => Err(
            AuthError::Forbidden("only the donor can approve or reject a request".to_string()),
        ),
        RequestStatus::Completed if !is_requester => Err(AuthError::Forbidden(
            "only the requester can mark a request completed".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Outcome of a committed request status change.
#[derive(Clone, Debug)]
pub struct RequestTransition {
    pub from: RequestStatus,
    pub request: RequestModel,
    pub donation: DonationModel,
    pub donation_transition: Option<DonationTransition>,
    /// Other waiting requests rejected by an approval
    pub auto_rejected: Vec<RequestModel>,
}

impl RequestTransition {
    /// Notifications owed to the parties once the transition is committed.
    pub fn events(&self, actor_id: i32) -> Vec<NotificationEvent> {
        let request = &self.request;
        let donation = &self.donation;

        match request.request_status {
            RequestStatus::Approved => {
                let mut events = vec![
                    NotificationEvent::request_approved(request, donation),
                    NotificationEvent::donation_confirmed(donation, request),
                ];
                events.extend(
                    self.auto_rejected
                        .iter()
                        .map(|rejected| NotificationEvent::request_rejected(rejected, donation)),
                );
                events
            }
            RequestStatus::Rejected => vec![NotificationEvent::request_rejected(request, donation)],
            RequestStatus::Canceled => {
                let recipient_id = if actor_id == donation.user_id {
                    request.user_id
                } else {
                    donation.user_id
                };
                vec![NotificationEvent::request_canceled(
                    recipient_id,
                    request,
                    donation,
                )]
            }
            RequestStatus::Completed => {
                let mut events = vec![NotificationEvent::request_completed(request, donation)];
                if self
                    .donation_transition
                    .as_ref()
                    .is_some_and(|t| t.entered(DonationStatus::Completed))
                {
                    events.push(NotificationEvent::donation_completed(donation));
                }
                events
            }
            RequestStatus::Waiting => Vec::new(),
        }
    }
}

pub struct RequestService<'a> {
    db: &'a DatabaseConnection,
    settings: LifecycleSettings,
}

impl<'a> RequestService<'a> {
    /// Creates a new instance of [`RequestService`]
    pub fn new(db: &'a DatabaseConnection, settings: LifecycleSettings) -> Self {
        Self { db, settings }
    }

    /// Validates and stores a new `waiting` request.
    ///
    /// No notification is sent on creation, the donor hears about requests once they act
    /// on them.
    ///
    /// # Returns
    /// - `Ok(RequestModel)` - The stored request
    /// - `Err(Error::ValidationError)` - Missing or malformed field, or unknown donation
    /// - `Err(Error::AuthError)` - The donor requested their own donation
    /// - `Err(Error::ConflictError)` - The donation is already completed or canceled
    pub async fn create(
        &self,
        requester_id: i32,
        input: CreateRequestDto,
    ) -> Result<RequestModel, Error> {
        let requested_quantity =
            validate_requested_quantity(input.requested_quantity.as_deref())?;
        let pickup_time = input
            .pickup_time
            .ok_or(ValidationError::MissingField("pickup_time"))?;
        let pickup_time = parse_datetime("pickup_time", &pickup_time)?;
        let note = required_text(input.note, "note", NOTE_MAX_LEN)?;
        let donation_id = input
            .donation_id
            .ok_or(ValidationError::MissingField("donation_id"))?;

        let donation = DonationRepository::new(self.db)
            .get(donation_id)
            .await?
            .ok_or(ValidationError::UnknownDonation(donation_id))?;
        check_requested_unit(&requested_quantity, donation.quantity_unit)?;

        if donation.user_id == requester_id {
            return Err(AuthError::Forbidden(
                "donors cannot request their own donation".to_string(),
            )
            .into());
        }

        if matches!(
            donation.donation_status,
            DonationStatus::Completed | DonationStatus::Canceled
        ) {
            return Err(ConflictError::DonationUnavailable {
                donation_id: donation.donation_id,
                status: donation.donation_status,
            }
            .into());
        }

        let request = RequestRepository::new(self.db)
            .create(NewRequest {
                user_id: requester_id,
                donation_id: donation.donation_id,
                requested_quantity,
                pickup_time,
                note,
            })
            .await?;

        tracing::info!(
            request_id = request.request_id,
            donation_id = request.donation_id,
            requester_id,
            "Request created"
        );

        Ok(request)
    }

    pub async fn get(&self, request_id: i32) -> Result<RequestModel, Error> {
        let db = self.db.clone();

        RetryPolicy::default()
            .execute_with_retry(&format!("get request {}", request_id), || {
                let db = db.clone();

                async move {
                    let request = RequestRepository::new(&db)
                        .get(request_id)
                        .await?
                        .ok_or(NotFoundError::Request(request_id))?;

                    Ok::<_, Error>(request)
                }
            })
            .await
    }

    /// Lists a donation's requests oldest first.
    pub async fn list_for_donation(&self, donation_id: i32) -> Result<Vec<RequestModel>, Error> {
        let db = self.db.clone();

        RetryPolicy::default()
            .execute_with_retry(&format!("list requests of donation {}", donation_id), || {
                let db = db.clone();

                async move {
                    DonationRepository::new(&db)
                        .get(donation_id)
                        .await?
                        .ok_or(NotFoundError::Donation(donation_id))?;

                    let requests = RequestRepository::new(&db)
                        .list_by_donation(donation_id)
                        .await?;

                    Ok::<_, Error>(requests)
                }
            })
            .await
    }

    /// Moves a request to `status` on behalf of `actor_id`.
    ///
    /// - `approved` confirms the donation. The donation must not be completed or canceled
    ///   and no other request on it may be approved. With auto-reject enabled every other
    ///   waiting request on the donation is rejected.
    /// - `completed` takes the requested quantity off the donation and completes it.
    /// - `canceled` from `approved` releases the donation back to `available`.
    /// - `rejected` and any other `canceled` only change the request.
    ///
    /// # Returns
    /// - `Ok(RequestModel)` - The request with its new status
    /// - `Err(Error::NotFoundError)` - The request does not exist
    /// - `Err(Error::AuthError)` - `actor_id` may not perform this transition
    /// - `Err(Error::ConflictError)` - Transition not allowed, donation already claimed, or
    ///   a concurrent writer changed the request or donation
    /// - `Err(Error::ValidationError)` - The requested quantity cannot be parsed
    pub async fn update_status(
        &self,
        actor_id: i32,
        request_id: i32,
        status: RequestStatus,
    ) -> Result<RequestModel, Error> {
        let db = self.db.clone();
        let settings = self.settings;

        let description = format!("move request {} to {:?}", request_id, status);
        let transition = RetryPolicy::default()
            .execute_with_retry(&description, || {
                let db = db.clone();

                async move {
                    transition_request(&db, settings, actor_id, request_id, status).await
                }
            })
            .await?;

        NotificationService::new(self.db)
            .notify_all(transition.events(actor_id))
            .await;

        Ok(transition.request)
    }
}

async fn transition_request(
    db: &DatabaseConnection,
    settings: LifecycleSettings,
    actor_id: i32,
    request_id: i32,
    to: RequestStatus,
) -> Result<RequestTransition, Error> {
    let txn = db.begin().await?;
    let requests = RequestRepository::new(&txn);

    let request = requests
        .get_for_update(request_id)
        .await?
        .ok_or(NotFoundError::Request(request_id))?;
    let donation_id = request.donation_id;
    let donation = DonationRepository::new(&txn)
        .get_for_update(donation_id)
        .await?
        .ok_or(NotFoundError::Donation(donation_id))?;

    authorize(actor_id, &request, &donation, to)?;

    let from = request.request_status;
    if !can_transition(from, to) {
        return Err(ConflictError::InvalidTransition { from, to }.into());
    }

    let lifecycle = DonationLifecycle::new(&txn);
    let mut auto_rejected = Vec::new();

    let donation_transition = match to {
        RequestStatus::Approved => {
            if !matches!(
                donation.donation_status,
                DonationStatus::Available | DonationStatus::Confirmed
            ) {
                return Err(ConflictError::DonationUnavailable {
                    donation_id,
                    status: donation.donation_status,
                }
                .into());
            }

            // The donation row lock serializes approvals, so at most one can pass this check.
            if let Some(holder) = requests
                .find_other_approved(donation_id, request_id)
                .await?
            {
                return Err(ConflictError::DonationClaimed {
                    donation_id,
                    request_id: holder.request_id,
                }
                .into());
            }

            let confirmed = lifecycle
                .update_status(donation_id, DonationStatus::Confirmed)
                .await?;

            if settings.auto_reject_on_approve {
                auto_rejected = requests
                    .reject_waiting_for_donation(donation_id, request_id)
                    .await?;
            }

            Some(confirmed)
        }
        RequestStatus::Completed => {
            let delta = parse_requested_quantity(&request.requested_quantity)?;
            let taken = lifecycle.apply_quantity_delta(donation_id, delta).await?;
            let completed = lifecycle
                .update_status(donation_id, DonationStatus::Completed)
                .await?;

            Some(DonationTransition {
                before: taken.before,
                after: completed.after,
            })
        }
        RequestStatus::Canceled
            if from == RequestStatus::Approved
                && donation.donation_status == DonationStatus::Confirmed =>
        {
            Some(
                lifecycle
                    .update_status(donation_id, DonationStatus::Available)
                    .await?,
            )
        }
        RequestStatus::Rejected | RequestStatus::Canceled | RequestStatus::Waiting => None,
    };

    set_status(&requests, request_id, from, to).await?;

    txn.commit().await?;

    tracing::info!(
        request_id,
        donation_id,
        actor_id,
        from = ?from,
        to = ?to,
        auto_rejected = auto_rejected.len(),
        "Request transitioned"
    );

    let donation = match &donation_transition {
        Some(transition) => transition.after.clone(),
        None => donation,
    };

    Ok(RequestTransition {
        from,
        request: RequestModel {
            request_status: to,
            ..request
        },
        donation,
        donation_transition,
        auto_rejected,
    })
}

/// Writes the status guarded by the one that was read.
async fn set_status<C: ConnectionTrait>(
    requests: &RequestRepository<'_, C>,
    request_id: i32,
    from: RequestStatus,
    to: RequestStatus,
) -> Result<(), Error> {
    if !requests.compare_and_set_status(request_id, from, to).await? {
        return Err(ConflictError::StaleWrite {
            entity: "request",
            id: request_id,
        }
        .into());
    }

    Ok(())
}
