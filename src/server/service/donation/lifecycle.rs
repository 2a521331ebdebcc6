//! Donation status and quantity transitions.
//!
//! Every method expects to run inside a transaction: the donation row is locked when it
//! is read and the write is guarded by the values that were read, so a concurrent writer
//! surfaces as [`ConflictError::StaleWrite`] instead of a lost update.
//!
//! ```text
//! available --(request approved)--> confirmed
//! confirmed --(approved request canceled)--> available
//! confirmed --(pickup completed)--> completed
//! available|confirmed --(quantity reaches 0)--> completed
//! available --(donor cancels)--> canceled
//! ```

use entity::donation::DonationStatus;
use sea_orm::ConnectionTrait;

use crate::server::{
    data::donation::DonationRepository,
    error::{conflict::ConflictError, not_found::NotFoundError, Error},
    model::db::DonationModel,
};

/// Quantities are kept to six decimal places so repeated subtraction cannot leave dust.
const QUANTITY_SCALE: f64 = 1_000_000.0;

/// Remaining quantity after taking `delta`, never below zero.
pub fn floor_quantity(current: f64, delta: f64) -> f64 {
    let remaining = ((current - delta) * QUANTITY_SCALE).round() / QUANTITY_SCALE;

    if remaining > 0.0 {
        remaining
    } else {
        0.0
    }
}

/// An empty donation is completed whatever status was asked for.
pub fn effective_status(requested: DonationStatus, quantity_value: f64) -> DonationStatus {
    if quantity_value <= 0.0 {
        DonationStatus::Completed
    } else {
        requested
    }
}

fn is_terminal(status: DonationStatus) -> bool {
    matches!(status, DonationStatus::Completed | DonationStatus::Canceled)
}

/// Donation state before and after a lifecycle write.
#[derive(Clone, Debug)]
pub struct DonationTransition {
    pub before: DonationModel,
    pub after: DonationModel,
}

impl DonationTransition {
    /// Whether this transition moved the donation into `status`.
    pub fn entered(&self, status: DonationStatus) -> bool {
        self.before.donation_status != status && self.after.donation_status == status
    }
}

pub struct DonationLifecycle<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DonationLifecycle<'a, C> {
    /// Creates a new instance of [`DonationLifecycle`] on a transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Removes `delta` from the donation's quantity.
    ///
    /// The quantity is floored at zero and an emptied donation is forced to `completed`.
    ///
    /// # Returns
    /// - `Ok(DonationTransition)` - The donation before and after the write
    /// - `Err(Error::NotFoundError)` - The donation does not exist
    /// - `Err(Error::ConflictError)` - The donation is canceled, or changed since it was read
    pub async fn apply_quantity_delta(
        &self,
        donation_id: i32,
        delta: f64,
    ) -> Result<DonationTransition, Error> {
        let before = self.lock(donation_id).await?;

        if before.donation_status == DonationStatus::Canceled {
            return Err(ConflictError::DonationUnavailable {
                donation_id,
                status: before.donation_status,
            }
            .into());
        }

        let quantity_value = floor_quantity(before.quantity_value, delta);
        let status = effective_status(before.donation_status, quantity_value);

        self.write(before, status, quantity_value).await
    }

    /// Moves the donation to `requested`, or to `completed` if it is already empty.
    ///
    /// Leaving `completed` or `canceled` is refused with `ConflictError::DonationUnavailable`.
    pub async fn update_status(
        &self,
        donation_id: i32,
        requested: DonationStatus,
    ) -> Result<DonationTransition, Error> {
        let before = self.lock(donation_id).await?;
        let status = effective_status(requested, before.quantity_value);

        if is_terminal(before.donation_status) && status != before.donation_status {
            return Err(ConflictError::DonationUnavailable {
                donation_id,
                status: before.donation_status,
            }
            .into());
        }

        let quantity_value = before.quantity_value;
        self.write(before, status, quantity_value).await
    }

    async fn lock(&self, donation_id: i32) -> Result<DonationModel, Error> {
        DonationRepository::new(self.db)
            .get_for_update(donation_id)
            .await?
            .ok_or_else(|| NotFoundError::Donation(donation_id).into())
    }

    async fn write(
        &self,
        before: DonationModel,
        status: DonationStatus,
        quantity_value: f64,
    ) -> Result<DonationTransition, Error> {
        if status == before.donation_status && quantity_value == before.quantity_value {
            return Ok(DonationTransition {
                after: before.clone(),
                before,
            });
        }

        let applied = DonationRepository::new(self.db)
            .compare_and_set(&before, status, quantity_value)
            .await?;

        if !applied {
            return Err(ConflictError::StaleWrite {
                entity: "donation",
                id: before.donation_id,
            }
            .into());
        }

        tracing::info!(
            donation_id = before.donation_id,
            from = ?before.donation_status,
            to = ?status,
            quantity_value,
            "Donation transitioned"
        );

        let after = DonationModel {
            donation_status: status,
            quantity_value,
            ..before.clone()
        };

        Ok(DonationTransition { before, after })
    }
}
